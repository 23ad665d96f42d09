use clap::Parser;
use consignment_service::core::ConfigProvider;
use consignment_service::utils::error::ErrorSeverity;
use consignment_service::utils::{logger, validation::Validate};
use consignment_service::{app, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(config.verbose());
    } else {
        logger::init_cli_logger(config.verbose());
    }

    tracing::info!("Starting consignment-service");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
        }
        tracing::info!("Shutdown signal received");
    };

    if let Err(e) = app::serve(&config, shutdown).await {
        tracing::error!(
            "❌ Service stopped with error: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        let exit_code = match e.severity() {
            ErrorSeverity::Low | ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}
