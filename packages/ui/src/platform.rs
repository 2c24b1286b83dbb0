//! Browser shims with native stand-ins, so shared components compile and
//! test on every target.

use std::time::Duration;

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// `window.confirm`. Native builds have no dialog and always confirm.
pub fn confirm(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("confirm (auto-accepted): {}", message);
        true
    }
}

/// `window.prompt`. `None` when cancelled, empty, or unavailable.
pub fn prompt(message: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.prompt_with_message(message).ok())
            .flatten()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("prompt unavailable: {}", message);
        None
    }
}

/// Offer `contents` as a file download.
pub fn download_text(filename: &str, mime: &str, contents: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = download_in_browser(filename, mime, contents) {
            tracing::error!("Download of {} failed: {:?}", filename, e);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let dir = dirs::download_dir().unwrap_or_else(std::env::temp_dir);
        let path = dir.join(filename);
        match std::fs::write(&path, contents) {
            Ok(()) => tracing::info!("Saved {} ({}) to {}", filename, mime, path.display()),
            Err(e) => tracing::error!("Failed to save {}: {}", path.display(), e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn download_in_browser(
    filename: &str,
    mime: &str,
    contents: &str,
) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("no document"))?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();
    web_sys::Url::revoke_object_url(&url)?;
    Ok(())
}
