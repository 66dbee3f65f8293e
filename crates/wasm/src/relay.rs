use folio_core::contact::{ContactPayload, RelayError};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

fn transport(e: impl std::fmt::Debug) -> RelayError {
    RelayError::Transport(format!("{e:?}"))
}

/// POST `payload` as JSON to the form relay with the browser's `fetch`.
pub async fn post_contact(endpoint: &str, payload: &ContactPayload) -> Result<(), RelayError> {
    let body = serde_json::to_string(payload).map_err(transport)?;

    let headers = web_sys::Headers::new().map_err(transport)?;
    headers
        .set("Content-Type", "application/json")
        .map_err(transport)?;
    headers.set("Accept", "application/json").map_err(transport)?;

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&wasm_bindgen::JsValue::from_str(&body));

    let request =
        web_sys::Request::new_with_str_and_init(endpoint, &init).map_err(transport)?;
    let window = web_sys::window().ok_or_else(|| RelayError::Transport("no window".into()))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;
    let response: web_sys::Response = value
        .dyn_into()
        .map_err(|_| RelayError::Transport("not a Response".into()))?;

    if response.ok() {
        Ok(())
    } else {
        Err(RelayError::Rejected(response.status()))
    }
}
