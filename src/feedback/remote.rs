use crate::model::{Attempt, FeedbackResponse};
use serde::Serialize;
use thiserror::Error;

const FEEDBACK_PATH: &str = "/feedback";
const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

#[derive(Debug, Serialize)]
struct FeedbackRequest<'a> {
    quiz: &'a Attempt,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("feedback request failed: {0}")]
    Request(String),
    #[error("feedback endpoint returned HTTP {0}")]
    Status(u16),
    #[error("feedback response is not valid JSON: {0}")]
    Malformed(String),
}

fn trim_trailing_slashes(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed == "/" {
        return trimmed.to_string();
    }

    trimmed.trim_end_matches('/').to_string()
}

pub fn feedback_url(base: &str) -> String {
    format!("{}{FEEDBACK_PATH}", trim_trailing_slashes(base))
}

fn normalize_base(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
pub fn api_base_from_environment() -> String {
    base_from_window_global().unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

// La página puede dejar window.QFE_API_BASE definido antes de arrancar el widget.
#[cfg(target_arch = "wasm32")]
fn base_from_window_global() -> Option<String> {
    let window = web_sys::window()?;
    let value =
        js_sys::Reflect::get(&window, &wasm_bindgen::JsValue::from_str("QFE_API_BASE")).ok()?;

    value.as_string().as_deref().and_then(normalize_base)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn api_base_from_environment() -> String {
    std::env::var("QFE_API_BASE")
        .ok()
        .and_then(|value| normalize_base(&value))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn submit_attempt(api_base: &str, attempt: &Attempt) -> Result<FeedbackResponse, SubmitError> {
    let url = feedback_url(api_base);
    let payload = FeedbackRequest { quiz: attempt };
    let client = reqwest::blocking::Client::new();

    let response = client
        .post(&url)
        .json(&payload)
        .send()
        .map_err(|err| SubmitError::Request(err.to_string()))?;

    if !response.status().is_success() {
        return Err(SubmitError::Status(response.status().as_u16()));
    }

    let body = response
        .text()
        .map_err(|err| SubmitError::Request(err.to_string()))?;

    serde_json::from_str(&body).map_err(|err| SubmitError::Malformed(err.to_string()))
}

#[cfg(target_arch = "wasm32")]
pub async fn submit_attempt(
    api_base: &str,
    attempt: &Attempt,
) -> Result<FeedbackResponse, SubmitError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let url = feedback_url(api_base);
    let payload = serde_json::to_string(&FeedbackRequest { quiz: attempt })
        .map_err(|err| SubmitError::Request(err.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&payload));

    let request = Request::new_with_str_and_init(&url, &opts)
        .map_err(|err| SubmitError::Request(format!("{err:?}")))?;

    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|err| SubmitError::Request(format!("{err:?}")))?;

    let window = web_sys::window()
        .ok_or_else(|| SubmitError::Request("no window in wasm environment".into()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|err| SubmitError::Request(format!("{err:?}")))?;

    let response: Response = resp_value
        .dyn_into()
        .map_err(|_| SubmitError::Request("fetch did not return a Response".into()))?;

    if !response.ok() {
        return Err(SubmitError::Status(response.status()));
    }

    let text_promise = response
        .text()
        .map_err(|err| SubmitError::Request(format!("{err:?}")))?;

    let text = JsFuture::from(text_promise)
        .await
        .map_err(|err| SubmitError::Request(format!("{err:?}")))?
        .as_string()
        .ok_or_else(|| SubmitError::Request("response body is not text".into()))?;

    serde_json::from_str(&text).map_err(|err| SubmitError::Malformed(err.to_string()))
}
