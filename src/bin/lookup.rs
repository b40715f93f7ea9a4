use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use upc_lookup::utils::{logger, validation::Validate};
use upc_lookup::{CliArgs, LookupOutcome, Resolver};

/// Resolve one barcode from the command line and print the JSON outcome
#[derive(Parser)]
#[command(name = "lookup")]
struct Args {
    /// UPC/EAN to resolve
    upc: String,

    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    // API 金鑰等設定沿用服務的環境變數
    let mut service = CliArgs::parse_from(["upc-lookup"]);
    if args.config.is_some() {
        service.config = args.config;
    }

    let config = service
        .into_config()
        .context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    let resolver = Resolver::from_config(&config).context("failed to build provider chain")?;
    tracing::debug!("Providers: {}", resolver.enabled_providers().join(", "));

    let outcome = resolver.resolve(&args.upc).await;
    let json = if args.pretty {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string(&outcome)?
    };
    println!("{}", json);

    let code = exit_code(&outcome);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// 0 表示查到；任何查詢失敗（含空白或無效 UPC）都是 2，1 保留給設定錯誤
fn exit_code(outcome: &LookupOutcome) -> i32 {
    match outcome {
        LookupOutcome::Found(_) => 0,
        LookupOutcome::Failed(_) => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use upc_lookup::ErrorKind;

    #[test]
    fn test_blank_upc_does_not_use_config_exit_code() {
        assert_eq!(exit_code(&LookupOutcome::Failed(ErrorKind::MissingUpc)), 2);
        assert_eq!(exit_code(&LookupOutcome::Failed(ErrorKind::InvalidUpc)), 2);
        assert_eq!(exit_code(&LookupOutcome::Failed(ErrorKind::NotFound)), 2);
    }
}
