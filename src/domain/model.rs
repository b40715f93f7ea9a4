use serde::{Deserialize, Serialize};

/// 單一資料來源回傳的正規化商品資料
///
/// 字串欄位以空字串表示「未知」；`retail` 為 `0.0` 同樣代表未知價格，而非免費。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResult {
    pub provider: String,
    pub upc: String,
    pub asin: String,
    pub title: String,
    pub brand: String,
    pub retail: f64,
    pub image: String,
    pub amazon_url: String,
    pub description: String,
}

impl ProviderResult {
    pub fn new(provider: &str, upc: &str) -> Self {
        Self {
            provider: provider.to_string(),
            upc: upc.to_string(),
            asin: String::new(),
            title: String::new(),
            brand: String::new(),
            retail: 0.0,
            image: String::new(),
            amazon_url: String::new(),
            description: String::new(),
        }
    }

    /// Clamp negative or non-finite prices to the "unknown" value.
    pub fn with_retail(mut self, retail: f64) -> Self {
        self.retail = if retail.is_finite() && retail > 0.0 {
            retail
        } else {
            0.0
        };
        self
    }
}

/// 回傳給呼叫端的錯誤種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingUpc,
    InvalidUpc,
    NoApiKey,
    NotFound,
    NotFoundOrRateLimited,
}

impl ErrorKind {
    /// Only request-shape problems are client errors; misses are normal outcomes.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ErrorKind::MissingUpc | ErrorKind::InvalidUpc)
    }
}

/// Result of one provider call for one barcode candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt {
    Hit(ProviderResult),
    Miss,
    RateLimited,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(ProviderResult),
    Failed(ErrorKind),
}

impl LookupOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }

    pub fn error(&self) -> Option<ErrorKind> {
        match self {
            LookupOutcome::Found(_) => None,
            LookupOutcome::Failed(kind) => Some(*kind),
        }
    }
}

#[derive(Serialize)]
struct OutcomeBody<'a> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    queried: Option<&'a str>,
    #[serde(flatten)]
    result: Option<&'a ProviderResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorKind>,
}

impl Serialize for LookupOutcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = match self {
            LookupOutcome::Found(result) => OutcomeBody {
                ok: true,
                queried: Some(&result.upc),
                result: Some(result),
                error: None,
            },
            LookupOutcome::Failed(kind) => OutcomeBody {
                ok: false,
                queried: None,
                result: None,
                error: Some(*kind),
            },
        };
        body.serialize(serializer)
    }
}
