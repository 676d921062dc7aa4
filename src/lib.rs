#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod constants;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::StandaloneConfig;
pub use core::{
    bootstrap::SolrBootstrap,
    engine::{EngineSettings, StandaloneEngine},
    service::{RunOutcome, ServiceHandle},
};
pub use domain::model::{Port, RunMode};
pub use utils::error::{Result, SolrError};
