use crate::model::Quiz;
use thiserror::Error;

pub const DEFAULT_QUIZ_FILE: &str = "collision_quiz.json";
const QUIZ_DATA_PATH: &str = "/static/quiz-data";

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_STATIC_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("quiz request failed: {0}")]
    Request(String),
    #[error("quiz request returned HTTP {0}")]
    Status(u16),
    #[error("quiz document is not valid JSON: {0}")]
    Malformed(String),
}

pub fn quiz_request_path(file: &str) -> String {
    format!("{QUIZ_DATA_PATH}/{file}")
}

fn normalize_file(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extrae el parámetro `quiz` de un query string tipo `?quiz=pendulum_quiz.json`.
pub fn quiz_param(search: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);

    for pair in query.split('&') {
        let (key, value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };

        if key == "quiz" {
            return normalize_file(value);
        }
    }

    None
}

#[cfg(target_arch = "wasm32")]
pub fn quiz_file_from_location() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| quiz_param(&search))
        .and_then(|raw| {
            js_sys::decode_uri_component(&raw)
                .ok()
                .and_then(|decoded| decoded.as_string())
        })
        .and_then(|decoded| normalize_file(&decoded))
        .unwrap_or_else(|| DEFAULT_QUIZ_FILE.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn quiz_file_from_environment() -> String {
    std::env::var("VOINICI_QUIZ_FILE")
        .ok()
        .and_then(|value| normalize_file(&value))
        .unwrap_or_else(|| DEFAULT_QUIZ_FILE.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn quiz_url_from_environment() -> String {
    let base = std::env::var("VOINICI_STATIC_BASE")
        .ok()
        .and_then(|value| normalize_file(&value))
        .unwrap_or_else(|| DEFAULT_STATIC_BASE.to_string());

    format!(
        "{}{}",
        base.trim_end_matches('/'),
        quiz_request_path(&quiz_file_from_environment())
    )
}

#[cfg(not(target_arch = "wasm32"))]
pub fn fetch_quiz(url: &str) -> Result<Quiz, LoadError> {
    let response =
        reqwest::blocking::get(url).map_err(|err| LoadError::Request(err.to_string()))?;

    if !response.status().is_success() {
        return Err(LoadError::Status(response.status().as_u16()));
    }

    let body = response
        .text()
        .map_err(|err| LoadError::Request(err.to_string()))?;

    serde_json::from_str(&body).map_err(|err| LoadError::Malformed(err.to_string()))
}

#[cfg(target_arch = "wasm32")]
pub async fn fetch_quiz(url: &str) -> Result<Quiz, LoadError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    let opts = RequestInit::new();
    opts.set_method("GET");

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|err| LoadError::Request(format!("{err:?}")))?;

    let window = web_sys::window()
        .ok_or_else(|| LoadError::Request("no window in wasm environment".into()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|err| LoadError::Request(format!("{err:?}")))?;

    let response: Response = resp_value
        .dyn_into()
        .map_err(|_| LoadError::Request("fetch did not return a Response".into()))?;

    if !response.ok() {
        return Err(LoadError::Status(response.status()));
    }

    let text_promise = response
        .text()
        .map_err(|err| LoadError::Request(format!("{err:?}")))?;

    let text = JsFuture::from(text_promise)
        .await
        .map_err(|err| LoadError::Request(format!("{err:?}")))?
        .as_string()
        .ok_or_else(|| LoadError::Request("response body is not text".into()))?;

    serde_json::from_str(&text).map_err(|err| LoadError::Malformed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_param_reads_the_quiz_entry() {
        assert_eq!(
            quiz_param("?quiz=pendulum_quiz.json"),
            Some("pendulum_quiz.json".to_string())
        );
        assert_eq!(
            quiz_param("?page=2&quiz=inclined_plane.json"),
            Some("inclined_plane.json".to_string())
        );
    }

    #[test]
    fn quiz_param_is_none_when_missing_or_blank() {
        assert_eq!(quiz_param(""), None);
        assert_eq!(quiz_param("?page=2"), None);
        assert_eq!(quiz_param("?quiz="), None);
        assert_eq!(quiz_param("?quiz"), None);
    }

    #[test]
    fn quiz_request_path_targets_the_static_data_directory() {
        assert_eq!(
            quiz_request_path(DEFAULT_QUIZ_FILE),
            "/static/quiz-data/collision_quiz.json"
        );
    }
}
