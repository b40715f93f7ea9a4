use clap::Parser;
use upc_lookup::utils::{logger, validation::Validate};
use upc_lookup::{app, AppConfig, CliArgs};

fn fail(e: upc_lookup::AppError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting upc-lookup {}", env!("CARGO_PKG_VERSION"));

    let config: AppConfig = match args.into_config() {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    tracing::debug!("Effective config: {:?}", config.server);

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(e);
    }

    if let Err(e) = app::serve(config).await {
        fail(e);
    }
}
