//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Storage, Url, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[inline]
pub fn document() -> Option<Document> {
    window()?.document()
}

/// Get localStorage.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// Get sessionStorage.
#[inline]
pub fn session_storage() -> Option<Storage> {
    window()?.session_storage().ok()?
}

/// Random v4 UUID from `crypto.randomUUID()`.
pub fn random_uuid() -> Option<String> {
    Some(window()?.crypto().ok()?.random_uuid())
}

/// Ask the user to confirm a destructive action.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

// =============================================================================
// Downloads
// =============================================================================

/// Wrap text in a Blob of the given media type.
pub fn text_blob(text: &str, mime: &str) -> Option<Blob> {
    let parts = Array::new();
    parts.push(&JsValue::from_str(text));
    let bag = BlobPropertyBag::new();
    bag.set_type(mime);
    Blob::new_with_str_sequence_and_options(&parts, &bag).ok()
}

/// Save a Blob through a temporary `<a download>` element.
///
/// Returns `true` if the click was dispatched.
pub fn download_blob(blob: &Blob, file_name: &str) -> bool {
    let Some(document) = document() else {
        return false;
    };
    let Some(body) = document.body() else {
        return false;
    };
    let Ok(url) = Url::create_object_url_with_blob(blob) else {
        return false;
    };

    let clicked = match document
        .create_element("a")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
    {
        Some(anchor) => {
            anchor.set_href(&url);
            anchor.set_download(file_name);
            let appended = body.append_child(&anchor).is_ok();
            anchor.click();
            if appended {
                anchor.remove();
            }
            true
        }
        None => false,
    };

    let _ = Url::revoke_object_url(&url);
    clicked
}

/// Save text as a file.
pub fn download_text(text: &str, mime: &str, file_name: &str) -> bool {
    text_blob(text, mime).is_some_and(|blob| download_blob(&blob, file_name))
}

// =============================================================================
// Clipboard & Navigation
// =============================================================================

/// Copy text to the clipboard.
pub async fn copy_to_clipboard(text: &str) -> bool {
    let Some(window) = window() else {
        return false;
    };
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise).await.is_ok()
}

/// Open a URL in a new tab.
pub fn open_in_new_tab(url: &str) -> bool {
    window()
        .and_then(|w| w.open_with_url_and_target(url, "_blank").ok())
        .flatten()
        .is_some()
}

/// Full page load of the app root (starts a fresh session state).
pub fn reload_to_root() {
    if let Some(window) = window() {
        let _ = window.location().set_href("/");
    }
}

/// Reload the current page.
pub fn reload() {
    if let Some(window) = window() {
        let _ = window.location().reload();
    }
}
