// 命令列流程：CliConfig → 引擎 → 前景執行

use crate::config::toml_config::StandaloneConfig;
use crate::config::CliConfig;
use crate::core::bootstrap::SolrBootstrap;
use crate::core::engine::{shutdown_signal, EngineSettings, StandaloneEngine};
use crate::core::service::RunOutcome;
use crate::core::Bootstrap;
use crate::utils::error::Result;
use std::future::Future;

pub type SolrEngine = StandaloneEngine<SolrBootstrap<StandaloneConfig>>;

/// 載入設定並組出預設的引擎
pub fn build_engine(cli: &CliConfig) -> Result<SolrEngine> {
    let config = cli.resolve()?;
    let settings = EngineSettings::from_config(&config);
    Ok(StandaloneEngine::new_with_monitoring(
        SolrBootstrap::new(config),
        settings,
        cli.monitor,
    ))
}

/// 前景啟動 Solr，直到它結束或收到 Ctrl-C
pub async fn run_standalone_cli<B: Bootstrap>(
    cli: &CliConfig,
    engine: &StandaloneEngine<B>,
) -> Result<RunOutcome> {
    run_standalone_cli_until(cli, engine, shutdown_signal()).await
}

pub async fn run_standalone_cli_until<B, F>(
    cli: &CliConfig,
    engine: &StandaloneEngine<B>,
    shutdown: F,
) -> Result<RunOutcome>
where
    B: Bootstrap,
    F: Future<Output = ()> + Send,
{
    let port = cli.port()?;
    tracing::info!("Installing and starting standalone Solr on port {}", port);
    engine.run_until(port, shutdown).await
}
