//! "File saved" confirmation modal
//!
//! Shown after a successful native save. Dismissed by the OK button or by a
//! click on the backdrop.

use std::path::Path;

use pdfkit_core::Notifier;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Element, MouseEvent};

#[cfg(target_arch = "wasm32")]
const OVERLAY_STYLE: &str = "position: fixed; inset: 0; background: rgba(0, 0, 0, 0.5); \
     display: flex; align-items: center; justify-content: center; z-index: 10000;";
#[cfg(target_arch = "wasm32")]
const MODAL_STYLE: &str = "background: white; padding: 24px; border-radius: 8px; \
     max-width: 500px; box-shadow: 0 4px 20px rgba(0, 0, 0, 0.3);";
#[cfg(target_arch = "wasm32")]
const PATH_STYLE: &str = "margin: 0 0 16px 0; word-break: break-all; font-family: monospace; \
     font-size: 13px; color: #444;";
#[cfg(target_arch = "wasm32")]
const BUTTON_STYLE: &str = "padding: 8px 24px; background: #2563eb; color: white; border: none; \
     border-radius: 4px; cursor: pointer;";

/// Title shown above the saved path
pub const SAVED_TITLE: &str = "File Saved";

/// Body text for the confirmation. The path is rendered as text, never as markup.
pub fn saved_message(path: &Path) -> String {
    format!("Saved to: {}", path.display())
}

/// `Notifier` that shows a DOM modal with the saved path
#[derive(Debug, Default, Clone, Copy)]
pub struct ModalNotifier;

impl Notifier for ModalNotifier {
    fn confirm_saved(&self, path: &Path) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Err(e) = show_modal(&saved_message(path)) {
                // The file is already on disk; a missing modal is cosmetic.
                web_sys::console::error_2(
                    &JsValue::from_str("Could not show save confirmation:"),
                    &e,
                );
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = path;
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn show_modal(message: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document object available"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("Document has no body"))?;

    let overlay = element(&document, "div", OVERLAY_STYLE, None)?;
    overlay.set_class_name("pdfkit-save-confirmation");
    let modal = element(&document, "div", MODAL_STYLE, None)?;
    let title = element(&document, "h3", "margin: 0 0 12px 0;", Some(SAVED_TITLE))?;
    let text = element(&document, "p", PATH_STYLE, Some(message))?;
    let button = element(&document, "button", BUTTON_STYLE, Some("OK"))?;

    modal.append_child(&title)?;
    modal.append_child(&text)?;
    modal.append_child(&button)?;
    overlay.append_child(&modal)?;

    let dismiss = {
        let overlay = overlay.clone();
        let button = button.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let target: Option<Element> = event.target().and_then(|t| t.dyn_into().ok());
            let hit = |el: &Element| target.as_ref().map(|t| t == el).unwrap_or(false);
            if hit(&overlay) || hit(&button) {
                overlay.remove();
            }
        })
    };
    overlay.add_event_listener_with_callback("click", dismiss.as_ref().unchecked_ref())?;
    // Lives as long as the overlay node
    dismiss.forget();

    body.append_child(&overlay)?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn element(
    document: &Document,
    tag: &str,
    style: &str,
    text: Option<&str>,
) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_attribute("style", style)?;
    if let Some(text) = text {
        el.set_text_content(Some(text));
    }
    Ok(el)
}
