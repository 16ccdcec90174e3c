use async_trait::async_trait;
use reqwest::{
    Client,
    StatusCode,
};

use super::types::{
    ApiResponse,
    RawItem,
    UserInformation,
};
use crate::core::{
    http::{
        ensure_success,
        http_client,
        redact,
    },
    ItemKind,
    KakitoriError,
    Settings,
};

/// A successful answer from one user resource.
#[derive(Debug)]
pub struct ResourcePayload {
    pub user: UserInformation,
    pub items: Vec<RawItem>,
}

/// Where the learned items come from. One call per item kind.
#[async_trait]
pub trait ItemSource: Send + Sync {
    async fn fetch(&self, api_key: &str, kind: ItemKind) -> Result<ResourcePayload, KakitoriError>;
}

/// Validates a response body: an error object wins, otherwise both the user
/// profile and the results must be present.
pub fn parse_response(body: &str) -> Result<ResourcePayload, KakitoriError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|_| KakitoriError::UnexpectedResponse)?;

    if let Some(error) = response.error {
        let message = error.message.filter(|m| !m.is_empty()).unwrap_or_else(|| {
            error.code.map(|c| format!("API error: {c}")).unwrap_or_else(|| "Unknown error".into())
        });
        return Err(KakitoriError::Credential(message));
    }

    match (response.user_information, response.requested_information) {
        (Some(user), Some(info)) => Ok(ResourcePayload { user, items: info.into_items() }),
        _ => Err(KakitoriError::UnexpectedResponse),
    }
}

/// Checks a whole answer. An error object is reported verbatim whatever the
/// status; otherwise a non-2xx status makes the answer malformed.
pub fn parse_answer(
    status: StatusCode,
    body: &str,
    url: &str,
) -> Result<ResourcePayload, KakitoriError> {
    match parse_response(body) {
        Err(KakitoriError::Credential(message)) => Err(KakitoriError::Credential(message)),
        result => {
            ensure_success(status, url)?;
            result
        }
    }
}

pub struct WaniKaniClient {
    client: Client,
    base_url: String,
}

impl WaniKaniClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, KakitoriError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client: http_client(timeout_secs)?, base_url })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, KakitoriError> {
        Self::new(settings.api_base_url.clone(), settings.request_timeout_secs)
    }

    pub fn resource_url(&self, api_key: &str, kind: ItemKind) -> String {
        format!("{}/{}/{}/", self.base_url, api_key, kind.resource())
    }
}

#[async_trait]
impl ItemSource for WaniKaniClient {
    async fn fetch(&self, api_key: &str, kind: ItemKind) -> Result<ResourcePayload, KakitoriError> {
        let url = self.resource_url(api_key, kind);
        tracing::info!("Getting {} from server", kind.resource());

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let payload = parse_answer(status, &body, &url).inspect_err(|e| {
            tracing::warn!("{} from {} rejected: {}", kind.resource(), redact(&url), e);
        })?;
        tracing::debug!("Received {} raw {} records", payload.items.len(), kind);
        Ok(payload)
    }
}
