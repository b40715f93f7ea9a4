use crate::utils::error::{AppError, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

const USER_AGENT: &str = concat!("upc-lookup/", env!("CARGO_PKG_VERSION"));

/// Upper bound for an upstream JSON body.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub fn build_client(timeout_seconds: u64) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// 上游 JSON 回應的分類結果
#[derive(Debug)]
pub enum JsonResponse {
    Body(Value),
    RateLimited,
    Status(StatusCode),
}

/// GET a JSON object. Non-2xx statuses are returned, not raised; a 2xx body
/// that is oversized, not JSON, or not an object is an error.
pub async fn get_json(
    client: &Client,
    provider: &str,
    url: &str,
    query: &[(&str, &str)],
) -> Result<JsonResponse> {
    let mut response = client.get(url).query(query).send().await?;
    let status = response.status();
    tracing::debug!("GET {} -> {}", url, status);

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Ok(JsonResponse::RateLimited);
    }
    if !status.is_success() {
        return Ok(JsonResponse::Status(status));
    }

    if let Some(length) = response.content_length() {
        if length > MAX_BODY_BYTES as u64 {
            return Err(AppError::upstream(
                provider,
                format!("body of {} bytes exceeds {} byte limit", length, MAX_BODY_BYTES),
            ));
        }
    }

    // 沒有 Content-Length 時邊讀邊檢查上限
    let mut bytes = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if bytes.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(AppError::upstream(
                provider,
                format!("body exceeds {} byte limit", MAX_BODY_BYTES),
            ));
        }
        bytes.extend_from_slice(&chunk);
    }

    let body: Value = serde_json::from_slice(&bytes)?;
    if !body.is_object() {
        return Err(AppError::upstream(provider, "expected a JSON object"));
    }
    Ok(JsonResponse::Body(body))
}

/// First element of a JSON array field, if any.
pub fn first_of<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).and_then(Value::as_array).and_then(|items| items.first())
}
