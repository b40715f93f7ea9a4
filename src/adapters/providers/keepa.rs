use crate::adapters::http::{first_of, get_json, JsonResponse};
use crate::adapters::providers::amazon_url;
use crate::core::describe::{describe, str_field};
use crate::domain::model::{Attempt, ProviderResult};
use crate::domain::ports::Provider;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

pub const PROVIDER_NAME: &str = "keepa";

const IMAGE_HOST: &str = "https://images-na.ssl-images-amazon.com/images/I/";

/// Keepa product API (US marketplace). Prices come back in cents and `-1`
/// means "no data".
pub struct KeepaProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl KeepaProvider {
    pub fn new(client: Client, base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }
}

/// 價格優先順序：Amazon 自營價、新品價、Buy Box 價
fn price_cents(product: &Value) -> Option<i64> {
    let stats = product.get("stats")?;
    let current = stats.get("current").and_then(Value::as_array);
    let from_current = |idx: usize| current.and_then(|c| c.get(idx)).and_then(Value::as_i64);

    [from_current(0), from_current(1), stats.get("buyBoxPrice").and_then(Value::as_i64)]
        .into_iter()
        .flatten()
        .find(|cents| *cents > 0)
}

fn first_image(product: &Value) -> String {
    str_field(product, "imagesCSV")
        .split(',')
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(|name| format!("{}{}", IMAGE_HOST, name))
        .unwrap_or_default()
}

pub(crate) fn parse_product(product: &Value, code: &str) -> ProviderResult {
    let retail = price_cents(product).map(|c| c as f64 / 100.0).unwrap_or(0.0);
    let mut result = ProviderResult::new(PROVIDER_NAME, code).with_retail(retail);

    result.asin = str_field(product, "asin");
    result.title = str_field(product, "title");
    result.brand = str_field(product, "brand");
    result.image = first_image(product);
    result.amazon_url = amazon_url(&result.asin);
    result.description = describe(product, &result.brand, &result.title, result.retail);
    result
}

#[async_trait]
impl Provider for KeepaProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn fetch(&self, code: &str) -> Result<Attempt> {
        let Some(key) = self.api_key.as_deref() else {
            return Ok(Attempt::Miss);
        };

        let url = format!("{}/product", self.base_url);
        let query = [("key", key), ("domain", "1"), ("code", code), ("stats", "180")];

        let body = match get_json(&self.client, PROVIDER_NAME, &url, &query).await? {
            JsonResponse::Body(body) => body,
            JsonResponse::RateLimited => return Ok(Attempt::RateLimited),
            JsonResponse::Status(status) => {
                tracing::debug!("Keepa returned {} for {}", status, code);
                return Ok(Attempt::Miss);
            }
        };

        // Keepa 找不到商品時仍回傳 products，但只有 asin 而沒有 title
        match first_of(&body, "products") {
            Some(product) if !str_field(product, "title").is_empty() => {
                Ok(Attempt::Hit(parse_product(product, code)))
            }
            _ => Ok(Attempt::Miss),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_in_cents() {
        let product = json!({
            "asin": "B00TEST123",
            "title": "Cordless Vacuum",
            "brand": "Dyson",
            "imagesCSV": "41abc.jpg,51def.jpg",
            "stats": {"current": [-1, 29999, 0], "buyBoxPrice": 31000}
        });

        let result = parse_product(&product, "885609015404");
        assert_eq!(result.retail, 299.99);
        assert_eq!(result.image, "https://images-na.ssl-images-amazon.com/images/I/41abc.jpg");
        assert_eq!(result.amazon_url, "https://www.amazon.com/dp/B00TEST123");
        assert_eq!(
            result.description,
            "Dyson Cordless Vacuum Approx. retail: $299.99. Condition not verified. See photos for details."
        );
    }

    #[test]
    fn test_missing_stats_is_unknown_price() {
        let product = json!({"title": "Thing", "description": "From Keepa"});
        let result = parse_product(&product, "012345678905");
        assert_eq!(result.retail, 0.0);
        assert_eq!(result.asin, "");
        assert_eq!(result.amazon_url, "");
        assert_eq!(result.description, "From Keepa");
    }

    #[test]
    fn test_buy_box_fallback() {
        let product = json!({"title": "Thing", "stats": {"current": [-1, -1], "buyBoxPrice": 1250}});
        assert_eq!(parse_product(&product, "1").retail, 12.5);
    }
}
