use clap::Parser;
use mc_solr::utils::logger::{self, LogFormat};
use mc_solr::{app, CliConfig, RunOutcome};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(cli.verbose, format);

    tracing::info!("Starting mc-solr");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match app::build_engine(&cli) {
        Ok(engine) => app::run_standalone_cli(&cli, &engine).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(RunOutcome::Exited(exit)) => {
            tracing::info!("Solr on port {} exited ({})", cli.port, exit);
        }
        Ok(RunOutcome::Interrupted) => {
            tracing::info!("✅ Solr on port {} stopped", cli.port);
        }
        Ok(RunOutcome::Detached(handle)) => {
            // CLI 只跑前景模式，這裡照理不會發生
            tracing::warn!("Unexpected detached handle {:?}", handle);
        }
        Err(e) => {
            tracing::error!(
                "❌ Standalone Solr failed: {} (Category: {:?})",
                e,
                e.category()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
