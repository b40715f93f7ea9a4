use crate::adapters::http::{first_of, get_json, JsonResponse};
use crate::adapters::providers::amazon_url;
use crate::core::describe::{describe, safe_float, str_field};
use crate::domain::model::{Attempt, ProviderResult};
use crate::domain::ports::Provider;
use crate::utils::error::Result;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde_json::Value;
use std::sync::LazyLock;

pub const PROVIDER_NAME: &str = "barcodelookup";

const MARKETPLACE_DOMAIN: &str = "amazon.";

static ASIN_IN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?:dp|gp/product)/([A-Z0-9]{10})").expect("ASIN pattern is a valid regex")
});

pub struct BarcodeLookupProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl BarcodeLookupProvider {
    pub fn new(client: Client, base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }
}

fn stores(product: &Value) -> &[Value] {
    product
        .get("stores")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// 第一個連到 Amazon 的商店連結
fn marketplace_link(product: &Value) -> Option<String> {
    stores(product)
        .iter()
        .map(|store| str_field(store, "link"))
        .find(|link| link.contains(MARKETPLACE_DOMAIN))
}

pub(crate) fn parse_product(product: &Value, code: &str) -> ProviderResult {
    let mut retail = safe_float(product.get("msrp"));
    if retail <= 0.0 {
        retail = stores(product)
            .iter()
            .map(|store| safe_float(store.get("price")))
            .fold(0.0, f64::max);
    }
    let mut result = ProviderResult::new(PROVIDER_NAME, code).with_retail(retail);

    result.title = str_field(product, "title");
    if result.title.is_empty() {
        result.title = str_field(product, "product_name");
    }
    result.brand = str_field(product, "brand");
    result.image = first_of(product, "images")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let link = marketplace_link(product);
    let asin_from_link = link
        .as_deref()
        .and_then(|l| ASIN_IN_LINK.captures(l))
        .map(|caps| caps[1].to_string());
    result.asin = asin_from_link.unwrap_or_else(|| str_field(product, "asin"));
    result.amazon_url = link.unwrap_or_else(|| amazon_url(&result.asin));
    result.description = describe(product, &result.brand, &result.title, result.retail);
    result
}

#[async_trait]
impl Provider for BarcodeLookupProvider {
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

        let url = format!("{}/v3/products", self.base_url);
        let query = [("barcode", code), ("formatted", "y"), ("key", key)];

        let body = match get_json(&self.client, PROVIDER_NAME, &url, &query).await? {
            JsonResponse::Body(body) => body,
            JsonResponse::RateLimited => return Ok(Attempt::RateLimited),
            JsonResponse::Status(status) => {
                // 查無商品時 API 回傳 404
                tracing::debug!("BarcodeLookup returned {} for {}", status, code);
                return Ok(Attempt::Miss);
            }
        };

        Ok(match first_of(&body, "products") {
            Some(product) => Attempt::Hit(parse_product(product, code)),
            None => Attempt::Miss,
        })
    }
}
