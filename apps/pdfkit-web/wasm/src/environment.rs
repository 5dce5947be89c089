//! Desktop-shell detection for the webview
//!
//! The Tauri runtime injects `window.__TAURI__` (when `withGlobalTauri` is on)
//! and `window.__TAURI_INTERNALS__` (always, in v2). Either marker means the
//! page is running inside the desktop app.

use std::rc::Rc;

use async_trait::async_trait;
#[cfg(target_arch = "wasm32")]
use js_sys::Reflect;
use pdfkit_core::{
    BrowserEnvironment, Environment, EnvironmentKind, FileSystem, PdfKitError, SaveDialog, Shell,
};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

use crate::tauri_bridge::TauriEnvironment;

const TAURI_MARKERS: [&str; 2] = ["__TAURI__", "__TAURI_INTERNALS__"];

/// True inside the Tauri desktop shell. Never panics; `false` without a window.
pub fn is_native_environment() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return false,
        };

        TAURI_MARKERS.iter().any(|marker| {
            Reflect::get(&window, &JsValue::from_str(marker))
                .map(|val| !val.is_undefined() && !val.is_null())
                .unwrap_or(false)
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = TAURI_MARKERS;
        false
    }
}

/// Environment chosen once, when the persister is built
#[derive(Debug, Clone, Copy)]
pub enum DetectedEnvironment {
    Tauri(TauriEnvironment),
    Browser(BrowserEnvironment),
}

impl DetectedEnvironment {
    pub fn detect() -> Self {
        if is_native_environment() {
            DetectedEnvironment::Tauri(TauriEnvironment)
        } else {
            DetectedEnvironment::Browser(BrowserEnvironment)
        }
    }
}

impl Default for DetectedEnvironment {
    fn default() -> Self {
        Self::detect()
    }
}

#[async_trait(?Send)]
impl Environment for DetectedEnvironment {
    fn kind(&self) -> EnvironmentKind {
        match self {
            DetectedEnvironment::Tauri(env) => env.kind(),
            DetectedEnvironment::Browser(env) => env.kind(),
        }
    }

    async fn acquire_dialog(&self) -> Result<Rc<dyn SaveDialog>, PdfKitError> {
        match self {
            DetectedEnvironment::Tauri(env) => env.acquire_dialog().await,
            DetectedEnvironment::Browser(env) => env.acquire_dialog().await,
        }
    }

    async fn acquire_filesystem(&self) -> Result<Rc<dyn FileSystem>, PdfKitError> {
        match self {
            DetectedEnvironment::Tauri(env) => env.acquire_filesystem().await,
            DetectedEnvironment::Browser(env) => env.acquire_filesystem().await,
        }
    }

    async fn acquire_shell(&self) -> Result<Rc<dyn Shell>, PdfKitError> {
        match self {
            DetectedEnvironment::Tauri(env) => env.acquire_shell().await,
            DetectedEnvironment::Browser(env) => env.acquire_shell().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_target_is_not_native() {
        assert!(!is_native_environment());
        assert!(!is_native_environment());
    }

    #[test]
    fn test_detect_on_host_selects_browser() {
        let env = DetectedEnvironment::detect();
        assert!(matches!(env, DetectedEnvironment::Browser(_)));
        assert_eq!(env.kind(), EnvironmentKind::Browser);
        assert!(!env.is_native());
    }

    #[test]
    fn test_tauri_variant_reports_native() {
        let env = DetectedEnvironment::Tauri(TauriEnvironment);
        assert!(env.is_native());
    }
}
