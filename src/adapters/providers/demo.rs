use crate::adapters::providers::amazon_url;
use crate::core::describe::synthesize_description;
use crate::domain::model::{Attempt, ProviderResult};
use crate::domain::ports::Provider;
use crate::utils::error::Result;
use async_trait::async_trait;

pub const PROVIDER_NAME: &str = "mock";

struct DemoRecord {
    upc: &'static str,
    asin: &'static str,
    title: &'static str,
    brand: &'static str,
    retail: f64,
    image: &'static str,
    description: &'static str,
}

/// 離線測試用的固定資料，只比對完全相同的條碼
const DEMO_RECORDS: &[DemoRecord] = &[
    DemoRecord {
        upc: "012345678905",
        asin: "B0DEMO0001",
        title: "Demo Wireless Earbuds",
        brand: "DemoAudio",
        retail: 49.99,
        image: "https://via.placeholder.com/300x300.png?text=Earbuds",
        description: "Bluetooth earbuds with charging case. Demo record for offline testing.",
    },
    DemoRecord {
        upc: "036000291452",
        asin: "",
        title: "Facial Tissues, 3-Ply",
        brand: "Kleenex",
        retail: 3.49,
        image: "",
        description: "",
    },
    DemoRecord {
        upc: "885609015404",
        asin: "B0DEMO0003",
        title: "Dyson",
        brand: "Dyson",
        retail: 0.0,
        image: "https://via.placeholder.com/300x300.png?text=Dyson",
        description: "",
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoTable;

impl DemoTable {
    pub fn get(&self, code: &str) -> Option<ProviderResult> {
        let record = DEMO_RECORDS.iter().find(|r| r.upc == code)?;

        let mut result = ProviderResult::new(PROVIDER_NAME, record.upc).with_retail(record.retail);
        result.asin = record.asin.to_string();
        result.title = record.title.to_string();
        result.brand = record.brand.to_string();
        result.image = record.image.to_string();
        result.amazon_url = amazon_url(record.asin);
        result.description = if record.description.is_empty() {
            synthesize_description(record.brand, record.title, result.retail)
        } else {
            record.description.to_string()
        };
        Some(result)
    }
}

#[async_trait]
impl Provider for DemoTable {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn is_remote(&self) -> bool {
        false
    }

    async fn fetch(&self, code: &str) -> Result<Attempt> {
        Ok(match self.get(code) {
            Some(result) => Attempt::Hit(result),
            None => Attempt::Miss,
        })
    }
}
