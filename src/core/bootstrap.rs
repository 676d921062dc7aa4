use crate::core::configurator::HomeConfigurator;
use crate::core::health::ReadinessProbe;
use crate::core::installer::DistributionInstaller;
use crate::core::{launcher, Bootstrap, ConfigProvider, ServiceProcess};
use crate::domain::model::{InstallLayout, Port};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// 以設定驅動的單機 Solr 啟動流程
pub struct SolrBootstrap<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> SolrBootstrap<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait]
impl<C: ConfigProvider> Bootstrap for SolrBootstrap<C> {
    async fn install(&self) -> Result<InstallLayout> {
        DistributionInstaller::new(&self.config, &self.client)
            .ensure_installed()
            .await
    }

    async fn configure(&self, layout: &InstallLayout, port: Port) -> Result<()> {
        tracing::debug!(
            "Configuring Solr home {} for port {}",
            layout.home_dir.display(),
            port
        );
        HomeConfigurator::new(self.config.collections_dir()).configure(layout)
    }

    async fn launch(&self, layout: &InstallLayout, port: Port) -> Result<Box<dyn ServiceProcess>> {
        let spec = launcher::build_launch_spec(&self.config, layout, port);
        let process = launcher::spawn(&spec, self.config.shutdown_grace())?;
        Ok(Box::new(process))
    }

    async fn probe(&self, port: Port) -> Result<bool> {
        ReadinessProbe::new(&self.client, self.config.probe_host())
            .check(port)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::{
        DistributionConfig, HomeConfig, InstallConfig, StandaloneConfig,
    };
    use crate::test_support::solr_zip;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_install_then_configure_from_local_archive() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("solr-6.5.0.zip");
        fs::write(&archive, solr_zip("solr-6.5.0")).unwrap();
        let root = temp_dir.path().join("install");

        let config = StandaloneConfig {
            install: Some(InstallConfig {
                dir: Some(root.clone()),
            }),
            distribution: Some(DistributionConfig {
                archive_path: Some(archive),
                ..Default::default()
            }),
            home: Some(HomeConfig {
                dir: Some(temp_dir.path().join("home")),
                collections_dir: None,
            }),
            ..Default::default()
        };
        let bootstrap = SolrBootstrap::new(config);

        let layout = bootstrap.install().await.unwrap();
        bootstrap
            .configure(&layout, Port::new(8983).unwrap())
            .await
            .unwrap();

        assert_eq!(layout.home_dir, temp_dir.path().join("home"));
        assert!(layout.home_dir.join("solr.xml").is_file());
        assert!(root.join("logs").is_dir());
    }
}
