use crate::app::AppState;
use crate::domain::model::LookupOutcome;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

/// First `upc` value of the query string; repeated keys are not an error.
pub fn first_upc(params: &[(String, String)]) -> String {
    params
        .iter()
        .find(|(key, _)| key == "upc")
        .map(|(_, value)| value.clone())
        .unwrap_or_default()
}

/// GET /ping
pub async fn ping() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({"ok": true}))
}

/// GET /api/lookup?upc=<code>
///
/// 查無商品仍回 200；只有缺少或格式錯誤的條碼回 400
pub async fn lookup(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> (StatusCode, Json<LookupOutcome>) {
    let raw = first_upc(&params);
    let outcome = state.resolver.resolve(&raw).await;

    let status = match outcome.error() {
        Some(kind) if kind.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::OK,
    };
    (status, Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_upc_wins() {
        let params = pairs(&[("upc", "012345678905"), ("upc", "036000291452")]);
        assert_eq!(first_upc(&params), "012345678905");
    }

    #[test]
    fn test_missing_upc_is_empty() {
        assert_eq!(first_upc(&pairs(&[("code", "1")])), "");
        assert_eq!(first_upc(&[]), "");
    }
}
