use crate::adapters::http::{first_of, get_json, JsonResponse};
use crate::adapters::providers::amazon_url;
use crate::core::describe::{describe, max_offer_price, safe_float, str_field};
use crate::domain::model::{Attempt, ProviderResult};
use crate::domain::ports::Provider;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

pub const PROVIDER_NAME: &str = "upcitemdb";

/// UPCitemdb 免金鑰試用端點，額度有限，排在最後
pub struct UpcItemDbProvider {
    client: Client,
    base_url: String,
}

impl UpcItemDbProvider {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

pub(crate) fn parse_item(item: &Value, code: &str) -> ProviderResult {
    let offers = item
        .get("offers")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let mut retail = max_offer_price(offers);
    if retail <= 0.0 {
        retail = safe_float(item.get("highest_recorded_price"))
            .max(safe_float(item.get("lowest_recorded_price")));
    }
    let mut result = ProviderResult::new(PROVIDER_NAME, code).with_retail(retail);

    result.asin = str_field(item, "asin");
    result.title = str_field(item, "title");
    result.brand = str_field(item, "brand");
    result.image = first_of(item, "images")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    result.amazon_url = amazon_url(&result.asin);
    result.description = describe(item, &result.brand, &result.title, result.retail);
    result
}

#[async_trait]
impl Provider for UpcItemDbProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn fetch(&self, code: &str) -> Result<Attempt> {
        let url = format!("{}/prod/trial/lookup", self.base_url);

        let body = match get_json(&self.client, PROVIDER_NAME, &url, &[("upc", code)]).await? {
            JsonResponse::Body(body) => body,
            JsonResponse::RateLimited => return Ok(Attempt::RateLimited),
            JsonResponse::Status(status) => {
                tracing::debug!("UPCitemdb returned {} for {}", status, code);
                return Ok(Attempt::Miss);
            }
        };

        Ok(match first_of(&body, "items") {
            Some(item) => Attempt::Hit(parse_item(item, code)),
            None => Attempt::Miss,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_offer_maximum_wins() {
        let item = json!({
            "upc": "012345678905",
            "title": "Blender",
            "brand": "Ninja",
            "asin": "B00NINJA01",
            "images": ["https://img.example/1.jpg", "https://img.example/2.jpg"],
            "offers": [{"price": 10}, {"list_price": 25}, {"price": 5}]
        });

        let result = parse_item(&item, "012345678905");
        assert_eq!(result.retail, 25.0);
        assert_eq!(result.image, "https://img.example/1.jpg");
        assert_eq!(result.amazon_url, "https://www.amazon.com/dp/B00NINJA01");
        assert_eq!(
            result.description,
            "Ninja Blender Approx. retail: $25.00. Condition not verified. See photos for details."
        );
    }

    #[test]
    fn test_recorded_price_fallback() {
        let item = json!({
            "title": "Blender",
            "offers": [{"price": ""}],
            "lowest_recorded_price": 12.0,
            "highest_recorded_price": 30.5
        });
        assert_eq!(parse_item(&item, "1").retail, 30.5);
    }

    #[test]
    fn test_bare_item() {
        let result = parse_item(&json!({}), "1");
        assert_eq!(result.retail, 0.0);
        assert_eq!(result.title, "");
        assert_eq!(result.description, "Condition not verified. See photos for details.");
    }
}
