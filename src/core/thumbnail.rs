//! Reading a picked thumbnail image into an inline data URL.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use js_sys::Uint8Array;
use mergedesk_core::ThumbnailInput;
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

use crate::core::error::ThumbnailError;

/// Read an image file into an inline thumbnail.
pub async fn read_inline(file: File) -> Result<ThumbnailInput, ThumbnailError> {
    let mime_type = file.type_();
    if !mime_type.starts_with("image/") {
        return Err(ThumbnailError::NotAnImage(mime_type));
    }

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| ThumbnailError::ReadFailed)?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    Ok(ThumbnailInput::Inline {
        name: file.name(),
        data_url: data_url(&mime_type, &bytes),
        mime_type,
    })
}

/// `data:<mime>;base64,<payload>`
pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}
