use std::time::Duration;

use reqwest::{
    header::{
        HeaderMap,
        HeaderValue,
        ACCEPT,
        USER_AGENT,
    },
    Client,
    StatusCode,
};

use crate::core::KakitoriError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub fn http_client(timeout_secs: u64) -> Result<Client, KakitoriError> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("kakitori/0.1 (+reqwest)"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .default_headers(headers)
        .build()
        .map_err(|e| KakitoriError::Custom(format!("HTTP client build failed: {e}")))
}

/// A non-2xx status counts as a malformed answer.
pub fn ensure_success(status: StatusCode, url: &str) -> Result<(), KakitoriError> {
    if !status.is_success() {
        tracing::warn!("HTTP error {} from {}", status, redact(url));
        return Err(KakitoriError::UnexpectedResponse);
    }
    Ok(())
}

/// The user API embeds the credential in the path; keep it out of the logs.
pub fn redact(url: &str) -> String {
    match url.find("/user/") {
        Some(idx) => {
            let (head, tail) = url.split_at(idx + "/user/".len());
            match tail.find('/') {
                Some(end) => format!("{head}***{}", &tail[end..]),
                None => format!("{head}***"),
            }
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_hides_key_segment() {
        assert_eq!(
            redact("https://www.wanikani.com/api/user/abc123/kanji/"),
            "https://www.wanikani.com/api/user/***/kanji/"
        );
        assert_eq!(redact("https://example.com/other"), "https://example.com/other");
    }

    #[test]
    fn test_ensure_success_rejects_non_2xx() {
        let url = "https://example.com/api/user/k/kanji/";
        assert!(ensure_success(StatusCode::OK, url).is_ok());
        assert!(matches!(
            ensure_success(StatusCode::NOT_FOUND, url),
            Err(KakitoriError::UnexpectedResponse)
        ));
    }
}
