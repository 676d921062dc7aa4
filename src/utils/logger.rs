use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    /// 一行一個 JSON 物件，給 log 收集器用
    Json,
}

/// RUST_LOG 優先；`solr` target 是 JVM 轉送過來的輸出
fn default_filter(verbose: bool) -> EnvFilter {
    let directives = if verbose {
        "mc_solr=debug,solr=debug,info"
    } else {
        "mc_solr=info,solr=warn"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

pub fn init_logger(verbose: bool, format: LogFormat) {
    let layer = match format {
        LogFormat::Compact => fmt::layer()
            .with_target(verbose)
            .with_file(false)
            .with_line_number(false)
            .compact()
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .json()
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(layer)
        .init();
}
