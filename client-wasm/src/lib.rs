pub mod shell;

use shell::{FetchError, Shell};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Where the API lives when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

thread_local! {
    static SHELL: RefCell<Shell> = RefCell::new(Shell::new());
}

/// Fetch the greeting from `<base_url>/api/hello-world/`.
///
/// Returns the `message` field of the JSON response, or `undefined` when the
/// response carries no such field.
#[wasm_bindgen]
pub async fn fetch_message(base_url: String) -> Result<JsValue, JsValue> {
    match fetch_message_outcome(&base_url).await {
        Ok(Some(message)) => Ok(JsValue::from_str(&message)),
        Ok(None) => Ok(JsValue::UNDEFINED),
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

async fn fetch_message_outcome(base_url: &str) -> Result<Option<String>, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::new("no window object"))?;
    let url = format!("{}/api/hello-world/", base_url.trim_end_matches('/'));

    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(|e| FetchError::new(format!("{e:?}")))?;
    let resp: web_sys::Response = resp_value
        .dyn_into()
        .map_err(|_| FetchError::new("fetch did not yield a Response"))?;

    let text_promise = resp
        .text()
        .map_err(|e| FetchError::new(format!("{e:?}")))?;
    let text = wasm_bindgen_futures::JsFuture::from(text_promise)
        .await
        .map_err(|e| FetchError::new(format!("{e:?}")))?
        .as_string()
        .ok_or_else(|| FetchError::new("response body was not text"))?;

    let body: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| FetchError::new(e.to_string()))?;
    Ok(shell::message_from_json(&body))
}

/// Wire the page: every click on `button_id` issues an independent request
/// against the default base URL and renders the outcome into `output_id`.
/// In-flight requests are neither de-duplicated nor cancelled, so the last
/// response to resolve wins the displayed state.
#[wasm_bindgen]
pub fn mount(button_id: &str, output_id: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document object"))?;

    let button = document
        .get_element_by_id(button_id)
        .ok_or_else(|| JsValue::from_str("Button element not found"))?;
    let output = document
        .get_element_by_id(output_id)
        .ok_or_else(|| JsValue::from_str("Output element not found"))?;

    let closure = Closure::<dyn FnMut()>::new(move || {
        let output = output.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = fetch_message_outcome(DEFAULT_BASE_URL).await;
            let message = SHELL.with(|shell| {
                let mut shell = shell.borrow_mut();
                // A failed request leaves the previous message in place
                let _ = shell.apply(outcome);
                shell.message().map(str::to_string)
            });
            output.set_text_content(message.as_deref());
        });
    });

    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_fetch_message_unreachable_host_errors() {
        // Nothing listens on port 9; the failure must surface as Err
        let result = fetch_message("http://localhost:9".to_string()).await;
        assert!(result.is_err());
    }
}
