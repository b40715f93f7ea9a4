use crate::adapters::providers;
use crate::config::AppConfig;
use crate::core::barcode;
use crate::domain::model::{Attempt, ErrorKind, LookupOutcome};
use crate::domain::ports::Provider;
use crate::utils::error::Result;

/// 多來源條碼解析器
///
/// Candidates form the outer loop and providers the inner loop: every enabled
/// provider is tried for the submitted code before the stripped UPC-A form.
pub struct Resolver {
    providers: Vec<Box<dyn Provider>>,
    strict_upc: bool,
}

impl Resolver {
    pub fn new(providers: Vec<Box<dyn Provider>>) -> Self {
        Self {
            providers,
            strict_upc: false,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let providers = providers::build_chain(config)?;
        Ok(Self::new(providers).with_strict_upc(config.lookup.strict_upc))
    }

    pub fn with_strict_upc(mut self, strict: bool) -> Self {
        self.strict_upc = strict;
        self
    }

    /// Names of enabled providers in priority order.
    pub fn enabled_providers(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .filter(|p| p.is_enabled())
            .map(|p| p.name())
            .collect()
    }

    pub async fn resolve(&self, raw: &str) -> LookupOutcome {
        if self.strict_upc {
            if let Err(kind) = barcode::validate_strict(raw) {
                return LookupOutcome::Failed(kind);
            }
        }

        let candidates = match barcode::candidates(raw) {
            Ok(list) => list,
            Err(kind) => return LookupOutcome::Failed(kind),
        };

        let mut rate_limited = false;
        for code in &candidates {
            for provider in self.providers.iter().filter(|p| p.is_enabled()) {
                tracing::debug!(provider = provider.name(), upc = %code, "Trying provider");
                match provider.fetch(code).await {
                    Ok(Attempt::Hit(result)) => {
                        tracing::info!(
                            provider = provider.name(),
                            upc = %code,
                            "✅ Barcode resolved"
                        );
                        return LookupOutcome::Found(result);
                    }
                    Ok(Attempt::Miss) => {}
                    Ok(Attempt::RateLimited) => {
                        tracing::warn!(provider = provider.name(), upc = %code, "Provider rate limited");
                        rate_limited = true;
                    }
                    Err(e) => {
                        tracing::warn!(
                            provider = provider.name(),
                            upc = %code,
                            "Provider failed, trying next: {}",
                            e
                        );
                    }
                }
            }
        }

        let any_remote = self
            .providers
            .iter()
            .any(|p| p.is_enabled() && p.is_remote());
        let kind = if !any_remote {
            ErrorKind::NoApiKey
        } else if rate_limited {
            ErrorKind::NotFoundOrRateLimited
        } else {
            ErrorKind::NotFound
        };
        tracing::info!(upc = %raw.trim(), error = ?kind, "Barcode not resolved");
        LookupOutcome::Failed(kind)
    }
}
