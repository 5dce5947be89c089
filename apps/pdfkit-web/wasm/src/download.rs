//! Browser download via a transient anchor element
//!
//! Bytes become a `Blob`, the blob gets an object URL, and a hidden
//! `<a download>` is clicked. The anchor is detached and the URL revoked when
//! the guards drop, including on early error returns.

use async_trait::async_trait;
use pdfkit_core::{Downloader, PdfKitError};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use web_sys::{Blob, BlobPropertyBag, Document, Element, HtmlAnchorElement, Url};

#[cfg(target_arch = "wasm32")]
use crate::tauri_bridge::js_error_message;

/// `Downloader` backed by the page's DOM
#[derive(Debug, Default, Clone, Copy)]
pub struct AnchorDownloader;

#[async_trait(?Send)]
impl Downloader for AnchorDownloader {
    async fn trigger(&self, bytes: &[u8], filename: &str) -> Result<(), PdfKitError> {
        #[cfg(target_arch = "wasm32")]
        {
            download_bytes(bytes, filename)
                .map_err(|e| PdfKitError::Download(js_error_message(&e)))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (bytes, filename);
            Err(PdfKitError::Download(
                "Browser downloads need a wasm32 target".to_string(),
            ))
        }
    }
}

/// MIME type for the blob, so the browser picks a sensible handler.
pub fn mime_type(filename: &str) -> &'static str {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "json" => "application/json",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(target_arch = "wasm32")]
fn download_bytes(bytes: &[u8], filename: &str) -> Result<(), JsValue> {
    let document = document()?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime_type(filename));
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

    let url = ObjectUrl::create(&blob)?;
    click_anchor(&document, url.as_str(), filename)
}

#[cfg(target_arch = "wasm32")]
fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("No window object available"))?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object available"))
}

#[cfg(target_arch = "wasm32")]
fn click_anchor(document: &Document, href: &str, filename: &str) -> Result<(), JsValue> {
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(href);
    anchor.set_download(filename);
    anchor.set_attribute("style", "display: none")?;

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("Document has no body"))?;
    body.append_child(&anchor)?;
    let _attached = Attached(anchor.clone().into());

    anchor.click();
    Ok(())
}

/// Object URL revoked on drop
#[cfg(target_arch = "wasm32")]
struct ObjectUrl(String);

#[cfg(target_arch = "wasm32")]
impl ObjectUrl {
    fn create(blob: &Blob) -> Result<Self, JsValue> {
        Url::create_object_url_with_blob(blob).map(Self)
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Err(e) = Url::revoke_object_url(&self.0) {
            web_sys::console::warn_1(&e);
        }
    }
}

/// Element detached from the DOM on drop
#[cfg(target_arch = "wasm32")]
struct Attached(Element);

#[cfg(target_arch = "wasm32")]
impl Drop for Attached {
    fn drop(&mut self) {
        self.0.remove();
    }
}
