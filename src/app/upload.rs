use crate::app::AppState;
use crate::core::Storage;
use crate::utils::error::Result;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Default, Serialize)]
pub struct UploadResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl UploadResponse {
    fn failed(error: &'static str, detail: Option<String>) -> Self {
        Self {
            ok: false,
            error: Some(error),
            detail,
            ..Default::default()
        }
    }
}

type UploadReply = (StatusCode, Json<UploadResponse>);

fn bad_request(error: &'static str, detail: Option<String>) -> UploadReply {
    (StatusCode::BAD_REQUEST, Json(UploadResponse::failed(error, detail)))
}

/// Lower-case label reduced to `[a-z0-9_-]`, `unknown` when nothing is left.
pub fn sanitize_label(raw: &str) -> String {
    let label: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if label.is_empty() {
        "unknown".to_string()
    } else {
        label
    }
}

/// `<label>_<YYYYMMDD>_<8 hex>.csv`
pub fn generate_filename(label: &str) -> String {
    let date = chrono::Local::now().format("%Y%m%d");
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}.csv", sanitize_label(label), date, &suffix[..8])
}

/// 計算資料列數（不含標題列）；格式錯誤時回傳 CSV 錯誤
pub fn count_rows(data: &[u8]) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data);
    reader.headers()?;

    let mut rows = 0;
    for record in reader.records() {
        record?;
        rows += 1;
    }
    Ok(rows)
}

/// POST /upload-csv (multipart: `file`, `marketplace`)
pub async fn upload_csv(State(state): State<AppState>, mut multipart: Multipart) -> UploadReply {
    let mut file: Option<Vec<u8>> = None;
    let mut marketplace = String::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request("invalid_multipart", Some(e.to_string())),
        };
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => match field.bytes().await {
                Ok(bytes) => file = Some(bytes.to_vec()),
                Err(e) => return bad_request("invalid_multipart", Some(e.to_string())),
            },
            "marketplace" => match field.text().await {
                Ok(text) => marketplace = text,
                Err(e) => return bad_request("invalid_multipart", Some(e.to_string())),
            },
            other => tracing::debug!("Ignoring multipart field '{}'", other),
        }
    }

    let Some(data) = file else {
        return bad_request("missing_file", None);
    };

    let rows = match count_rows(&data) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!("Rejected CSV upload: {}", e);
            return bad_request("csv_parse_error", Some(e.to_string()));
        }
    };

    let filename = generate_filename(&marketplace);
    if let Err(e) = state.uploads.write_file(&filename, &data).await {
        tracing::error!("Failed to store upload {}: {}", filename, e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(UploadResponse::failed("storage_error", Some(e.user_friendly_message()))),
        );
    }

    tracing::info!("📁 Stored {} ({} rows)", filename, rows);
    (
        StatusCode::OK,
        Json(UploadResponse {
            ok: true,
            filename: Some(filename),
            rows: Some(rows),
            ..Default::default()
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn test_sanitize_label() {
        assert_eq!(sanitize_label("eBay"), "ebay");
        assert_eq!(sanitize_label(" FB Marketplace "), "fb_marketplace");
        assert_eq!(sanitize_label("../../etc"), "etc");
        assert_eq!(sanitize_label(""), "unknown");
        assert_eq!(sanitize_label("!!!"), "unknown");
    }

    #[test]
    fn test_generated_filename_pattern() {
        let name = generate_filename("Whatnot");
        let pattern = Regex::new(r"^whatnot_\d{8}_[0-9a-f]{8}\.csv$").unwrap();
        assert!(pattern.is_match(&name), "unexpected filename {}", name);
        assert_ne!(generate_filename("a"), generate_filename("a"));
    }

    #[test]
    fn test_count_rows() {
        assert_eq!(count_rows(b"upc,title\n1,A\n2,B\n").unwrap(), 2);
        assert_eq!(count_rows(b"upc,title\n").unwrap(), 0);
        assert!(count_rows(b"upc,title\n1,A,extra\n").is_err());
    }
}
