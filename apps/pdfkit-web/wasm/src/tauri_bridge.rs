//! Tauri plugin capabilities reached through `window.__TAURI__`
//!
//! Needs `app.withGlobalTauri = true` in the desktop shell and the dialog, fs
//! and shell plugins registered. Each capability is looked up separately, so a
//! missing plugin only disables its own capability.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use async_trait::async_trait;
use js_sys::{Array, Function, Promise, Reflect, Uint8Array};
use pdfkit_core::{
    CapabilityKind, Environment, EnvironmentKind, FileSystem, FileTypeFilter, PdfKitError,
    SaveDialog, SaveDialogOptions, Shell,
};
use serde::Serialize;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// Options object passed to `dialog.save()`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogSaveOptions {
    pub title: String,
    pub default_path: String,
    pub filters: Vec<DialogFilter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl From<&FileTypeFilter> for DialogFilter {
    fn from(filter: &FileTypeFilter) -> Self {
        Self {
            name: filter.label.clone(),
            extensions: filter.extensions.clone(),
        }
    }
}

impl From<&SaveDialogOptions<'_>> for DialogSaveOptions {
    fn from(options: &SaveDialogOptions<'_>) -> Self {
        Self {
            title: options.title.to_string(),
            default_path: options.default_path().to_string_lossy().into_owned(),
            filters: options.filters.iter().map(DialogFilter::from).collect(),
        }
    }
}

/// Native environment inside the Tauri webview
#[derive(Debug, Default, Clone, Copy)]
pub struct TauriEnvironment;

#[async_trait(?Send)]
impl Environment for TauriEnvironment {
    fn kind(&self) -> EnvironmentKind {
        EnvironmentKind::Native
    }

    async fn acquire_dialog(&self) -> Result<Rc<dyn SaveDialog>, PdfKitError> {
        let save = plugin_function(CapabilityKind::Dialog, "dialog", "save")?;
        Ok(Rc::new(TauriDialog { save }))
    }

    async fn acquire_filesystem(&self) -> Result<Rc<dyn FileSystem>, PdfKitError> {
        let write_file = plugin_function(CapabilityKind::FileSystem, "fs", "writeFile")?;
        Ok(Rc::new(TauriFs { write_file }))
    }

    async fn acquire_shell(&self) -> Result<Rc<dyn Shell>, PdfKitError> {
        let open = plugin_function(CapabilityKind::Shell, "shell", "open")?;
        Ok(Rc::new(TauriShell { open }))
    }
}

/// `__TAURI__.dialog.save`
pub struct TauriDialog {
    save: Function,
}

#[async_trait(?Send)]
impl SaveDialog for TauriDialog {
    async fn prompt_save_location(
        &self,
        options: &SaveDialogOptions<'_>,
    ) -> Result<Option<PathBuf>, PdfKitError> {
        let options = serde_wasm_bindgen::to_value(&DialogSaveOptions::from(options))
            .map_err(|e| PdfKitError::Dialog(format!("Serialization error: {}", e)))?;

        let selected = call_async(&self.save, &[options])
            .await
            .map_err(PdfKitError::Dialog)?;

        // null when the user dismisses the dialog
        Ok(selected.as_string().map(PathBuf::from))
    }
}

/// `__TAURI__.fs.writeFile`
pub struct TauriFs {
    write_file: Function,
}

#[async_trait(?Send)]
impl FileSystem for TauriFs {
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), PdfKitError> {
        let path = JsValue::from_str(&path.to_string_lossy());
        let data: JsValue = Uint8Array::from(bytes).into();

        call_async(&self.write_file, &[path, data])
            .await
            .map(|_| ())
            .map_err(PdfKitError::Write)
    }
}

/// `__TAURI__.shell.open`
pub struct TauriShell {
    open: Function,
}

#[async_trait(?Send)]
impl Shell for TauriShell {
    async fn open(&self, target: &str) -> Result<(), PdfKitError> {
        call_async(&self.open, &[JsValue::from_str(target)])
            .await
            .map(|_| ())
            .map_err(PdfKitError::Shell)
    }
}

fn plugin_function(
    kind: CapabilityKind,
    plugin: &str,
    name: &str,
) -> Result<Function, PdfKitError> {
    #[cfg(target_arch = "wasm32")]
    {
        let load_error = |reason: String| PdfKitError::CapabilityLoad { kind, reason };

        let window = web_sys::window().ok_or_else(|| load_error("No window object".into()))?;
        let tauri = Reflect::get(&window, &JsValue::from_str("__TAURI__"))
            .map_err(|e| load_error(js_error_message(&e)))?;
        if tauri.is_undefined() {
            return Err(load_error(
                "window.__TAURI__ is not defined (is withGlobalTauri enabled?)".into(),
            ));
        }

        let module = Reflect::get(&tauri, &JsValue::from_str(plugin))
            .map_err(|e| load_error(js_error_message(&e)))?;
        if module.is_undefined() {
            return Err(load_error(format!("plugin '{}' is not registered", plugin)));
        }

        Reflect::get(&module, &JsValue::from_str(name))
            .map_err(|e| load_error(js_error_message(&e)))?
            .dyn_into::<Function>()
            .map_err(|_| load_error(format!("{}.{} is not a function", plugin, name)))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (plugin, name);
        Err(PdfKitError::CapabilityUnavailable(kind))
    }
}

/// Call a bridge function and await its result, whether or not it returns a promise.
async fn call_async(function: &Function, args: &[JsValue]) -> Result<JsValue, String> {
    let args: Array = args.iter().collect();
    let returned = function
        .apply(&JsValue::NULL, &args)
        .map_err(|e| js_error_message(&e))?;

    JsFuture::from(Promise::resolve(&returned))
        .await
        .map_err(|e| js_error_message(&e))
}

/// Best-effort text for a thrown JS value: plugin errors are usually strings,
/// DOM errors carry a `message`.
pub(crate) fn js_error_message(error: &JsValue) -> String {
    if let Some(text) = error.as_string() {
        return text;
    }
    Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", error))
}
