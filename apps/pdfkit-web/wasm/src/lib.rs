//! WASM bindings for the PDF toolkit's save path and display helpers
//!
//! The same bundle runs in a plain browser tab and inside the Tauri desktop
//! shell. Saving picks the right path on its own:
//! - desktop: native "Save As" dialog, direct write, confirmation modal
//! - browser (or any native failure): regular file download
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { downloadFile, parsePageRanges, formatBytes } from './pkg/pdfkit_wasm.js';
//!
//! await init();
//!
//! const pages = parsePageRanges("1-3, 5", 10);   // [0, 1, 2, 4]
//! const report = await downloadFile(bytes, "merged.pdf");
//! if (!report.alreadyCommunicated) {
//!     showToast(`Downloaded (${formatBytes(bytes.length)})`);
//! }
//! ```

pub mod download;
pub mod environment;
pub mod notify;
pub mod tauri_bridge;

use std::rc::Rc;

use pdfkit_core::format::{self, Unit};
use pdfkit_core::{Persister, SaveConfig, SaveOutcome, SaveRequest};
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use download::AnchorDownloader;
pub use environment::{is_native_environment, DetectedEnvironment};
pub use notify::ModalNotifier;
pub use tauri_bridge::TauriEnvironment;

/// Persister wired to the page: detected environment, anchor download, modal
pub type WebPersister = Persister<DetectedEnvironment, AnchorDownloader, ModalNotifier>;

thread_local! {
    static PERSISTER: Rc<WebPersister> = Rc::new(Persister::new(
        DetectedEnvironment::detect(),
        AnchorDownloader,
        ModalNotifier,
        SaveConfig::default(),
    ));
}

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// ============================================
// Saving
// ============================================

/// Result of a save, as handed back to JavaScript
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReport {
    pub outcome: SaveOutcome,
    /// When true the user has already seen the result; skip the toast
    pub already_communicated: bool,
}

impl From<SaveOutcome> for SaveReport {
    fn from(outcome: SaveOutcome) -> Self {
        Self {
            already_communicated: outcome.already_communicated(),
            outcome,
        }
    }
}

/// Save bytes under `filename`: native dialog on desktop, download otherwise.
///
/// Rejects only when the browser download itself fails.
#[wasm_bindgen(js_name = downloadFile)]
pub async fn download_file(bytes: Vec<u8>, filename: String) -> Result<JsValue, JsValue> {
    persist(SaveRequest::new(bytes, filename)).await
}

/// Like `downloadFile`, for a `Blob` produced by the page.
#[wasm_bindgen(js_name = downloadBlob)]
pub async fn download_blob(blob: web_sys::Blob, filename: String) -> Result<JsValue, JsValue> {
    let buffer = wasm_bindgen_futures::JsFuture::from(blob.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    persist(SaveRequest::new(bytes, filename)).await
}

async fn persist(request: SaveRequest) -> Result<JsValue, JsValue> {
    let persister = PERSISTER.with(Rc::clone);
    let outcome = persister
        .persist(request)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&SaveReport::from(outcome))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ============================================
// Page ranges
// ============================================

/// Zero-based page indices selected by `expression` ("1-3, 5, 8-10").
/// Invalid segments are skipped; an empty expression selects every page.
#[wasm_bindgen(js_name = parsePageRanges)]
pub fn parse_page_ranges(expression: &str, total_pages: u32) -> Vec<u32> {
    pdfkit_core::parse_page_ranges(expression, total_pages as usize)
        .into_iter()
        .map(|index| index as u32)
        .collect()
}

/// Message for the first invalid segment, or `undefined` when the input is usable.
#[wasm_bindgen(js_name = validatePageRanges)]
pub fn validate_page_ranges(expression: &str, total_pages: u32) -> Option<String> {
    pdfkit_core::validate_page_ranges(expression, total_pages as usize)
        .err()
        .map(|e| e.to_string())
}

// ============================================
// Display helpers
// ============================================

/// Convert points to "in", "mm", "px" or "pt" (unknown codes mean points).
#[wasm_bindgen(js_name = convertPoints)]
pub fn convert_points(points: f64, unit: &str) -> String {
    format::convert_points(points, Unit::from_code(unit))
}

#[wasm_bindgen(js_name = getStandardPageName)]
pub fn get_standard_page_name(width: f64, height: f64) -> String {
    format::standard_page_name(width, height).to_string()
}

/// JS numbers arrive as f64; negatives and NaN count as zero.
#[wasm_bindgen(js_name = formatBytes)]
pub fn format_bytes(bytes: f64, decimals: Option<u32>) -> String {
    format::format_bytes(js_count(bytes), decimals.unwrap_or(1) as usize)
}

#[wasm_bindgen(js_name = formatStars)]
pub fn format_stars(count: f64) -> String {
    format::format_stars(js_count(count))
}

#[wasm_bindgen(js_name = truncateFilename)]
pub fn truncate_filename(filename: &str, max_length: Option<u32>) -> String {
    let max = max_length
        .map(|m| m as usize)
        .unwrap_or(format::filename::DEFAULT_MAX_LENGTH);
    format::truncate_filename(filename, max)
}

#[wasm_bindgen(js_name = formatIsoDate)]
pub fn format_iso_date(input: &str) -> String {
    format::format_iso_date(input)
}

/// `{ r, g, b }` with channels in 0..1
#[wasm_bindgen(js_name = hexToRgb)]
pub fn hex_to_rgb(hex: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&format::hex_to_rgb(hex))
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[wasm_bindgen(js_name = formatShortcutDisplay)]
pub fn format_shortcut_display(shortcut: &str, is_mac: bool) -> String {
    format::format_shortcut_display(shortcut, is_mac)
}

#[wasm_bindgen(js_name = isNativeEnvironment)]
pub fn is_native() -> bool {
    is_native_environment()
}

fn js_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_get_version() {
        assert!(!get_version().is_empty());
    }

    #[test]
    fn test_parse_page_ranges_wrapper() {
        assert_eq!(parse_page_ranges("1-3, 5", 10), vec![0, 1, 2, 4]);
        assert_eq!(parse_page_ranges("", 3), vec![0, 1, 2]);
        assert!(parse_page_ranges("4", 0).is_empty());
    }

    #[test]
    fn test_validate_page_ranges_wrapper() {
        assert_eq!(validate_page_ranges("1-3", 5), None);
        assert_eq!(validate_page_ranges("", 5), None);
        assert_eq!(
            validate_page_ranges("1-9", 5),
            Some("Page 9 is outside 1-5".to_string())
        );
    }

    #[test]
    fn test_convert_points_codes() {
        assert_eq!(convert_points(72.0, "in"), "1.00");
        assert_eq!(convert_points(72.0, "parsec"), "72.00");
    }

    #[test]
    fn test_format_bytes_defaults_and_clamps() {
        assert_eq!(format_bytes(1536.0, None), "1.5 KB");
        assert_eq!(format_bytes(1100.0, Some(2)), "1.07 KB");
        assert_eq!(format_bytes(-5.0, None), "0 Bytes");
        assert_eq!(format_bytes(f64::NAN, None), "0 Bytes");
    }

    #[test]
    fn test_truncate_filename_default_max() {
        assert_eq!(
            truncate_filename("quarterly-financial-report.pdf", None),
            "quarterly-financia....pdf"
        );
        assert_eq!(truncate_filename("short.pdf", Some(5)), "sh...");
    }

    #[test]
    fn test_save_report_flags_communication() {
        let report = SaveReport::from(SaveOutcome::NativeCancelled);
        assert!(report.already_communicated);

        let json = serde_json::to_value(SaveReport::from(SaveOutcome::BrowserDownloadTriggered))
            .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "outcome": { "type": "BrowserDownloadTriggered" },
                "alreadyCommunicated": false
            })
        );
    }

    proptest! {
        /// Property: indices handed to JS are sorted, unique and in range
        #[test]
        fn parsed_indices_in_range(expr in "[0-9, -]{0,20}", total in 0u32..50) {
            let pages = parse_page_ranges(&expr, total);
            prop_assert!(pages.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(pages.iter().all(|&p| p < total));
        }
    }
}
