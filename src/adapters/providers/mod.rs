pub mod barcode_lookup;
pub mod demo;
pub mod keepa;
pub mod upcitemdb;

use crate::adapters::http::build_client;
use crate::config::AppConfig;
use crate::domain::ports::Provider;
use crate::utils::error::Result;

pub use barcode_lookup::BarcodeLookupProvider;
pub use demo::DemoTable;
pub use keepa::KeepaProvider;
pub use upcitemdb::UpcItemDbProvider;

/// Product page link for an ASIN, empty when the ASIN is unknown.
pub fn amazon_url(asin: &str) -> String {
    let asin = asin.trim();
    if asin.is_empty() {
        String::new()
    } else {
        format!("https://www.amazon.com/dp/{}", asin)
    }
}

/// 依優先順序建立資料來源：示範資料、Keepa、BarcodeLookup、UPCitemdb
///
/// Keyed providers are always part of the chain and report themselves disabled
/// when their key is absent.
pub fn build_chain(config: &AppConfig) -> Result<Vec<Box<dyn Provider>>> {
    let settings = &config.providers;
    let client = build_client(settings.timeout_seconds)?;

    let mut chain: Vec<Box<dyn Provider>> = Vec::new();
    if config.lookup.demo_table {
        chain.push(Box::new(DemoTable));
    }
    chain.push(Box::new(KeepaProvider::new(
        client.clone(),
        &settings.keepa_base_url,
        settings.keepa_key(),
    )));
    chain.push(Box::new(BarcodeLookupProvider::new(
        client.clone(),
        &settings.barcode_lookup_base_url,
        settings.barcode_lookup_key(),
    )));
    if config.lookup.trial_provider {
        chain.push(Box::new(UpcItemDbProvider::new(client, &settings.upcitemdb_base_url)));
    }

    Ok(chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(chain: &[Box<dyn Provider>]) -> Vec<&'static str> {
        chain.iter().filter(|p| p.is_enabled()).map(|p| p.name()).collect()
    }

    #[test]
    fn test_default_chain_without_keys() {
        let chain = build_chain(&AppConfig::default()).unwrap();
        assert_eq!(enabled(&chain), vec!["mock", "upcitemdb"]);
    }

    #[test]
    fn test_full_chain_order() {
        let mut config = AppConfig::default();
        config.providers.keepa_api_key = Some("k".to_string());
        config.providers.barcode_lookup_api_key = Some("b".to_string());

        let chain = build_chain(&config).unwrap();
        assert_eq!(
            enabled(&chain),
            vec!["mock", "keepa", "barcodelookup", "upcitemdb"]
        );
    }

    #[test]
    fn test_optional_providers_can_be_dropped() {
        let mut config = AppConfig::default();
        config.lookup.demo_table = false;
        config.lookup.trial_provider = false;

        let chain = build_chain(&config).unwrap();
        assert!(enabled(&chain).is_empty());
    }

    #[test]
    fn test_amazon_url() {
        assert_eq!(amazon_url("B000TEST01"), "https://www.amazon.com/dp/B000TEST01");
        assert_eq!(amazon_url(" "), "");
    }
}
