use super::toml_config::StandaloneConfig;
use super::CliConfig;
use crate::domain::model::Port;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

impl CliConfig {
    pub fn port(&self) -> Result<Port> {
        Port::new(self.port)
    }

    /// 載入設定檔 (若有) 並套用命令列覆蓋
    pub fn resolve(&self) -> Result<StandaloneConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                StandaloneConfig::from_file(path)?
            }
            None => StandaloneConfig::default(),
        };

        if let Some(dir) = &self.install_dir {
            tracing::debug!("🔧 install.dir overridden to: {}", dir.display());
            config.set_install_dir(dir.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ConfigProvider;
    use clap::error::ErrorKind;
    use clap::Parser;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    #[test]
    fn test_no_arguments_uses_default_port() {
        let cli = CliConfig::try_parse_from(["mc-solr"]).unwrap();
        assert_eq!(cli.port, crate::constants::MC_SOLR_STANDALONE_PORT);
        assert_eq!(cli.port().unwrap().get(), 8983);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_short_and_long_port_flags() {
        let long = CliConfig::try_parse_from(["mc-solr", "--port", "9001"]).unwrap();
        let short = CliConfig::try_parse_from(["mc-solr", "-p", "9001"]).unwrap();
        assert_eq!(long.port, 9001);
        assert_eq!(short.port, 9001);
    }

    #[test]
    fn test_non_integer_port_is_usage_error() {
        let error = CliConfig::try_parse_from(["mc-solr", "--port", "abc"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ValueValidation);
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_out_of_range_port_is_usage_error() {
        assert!(CliConfig::try_parse_from(["mc-solr", "--port", "0"]).is_err());
        assert!(CliConfig::try_parse_from(["mc-solr", "--port", "70000"]).is_err());
    }

    #[test]
    fn test_help_shows_default_port() {
        let error = CliConfig::try_parse_from(["mc-solr", "--help"]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::DisplayHelp);
        assert_eq!(error.exit_code(), 0);

        let help = error.render().to_string();
        assert!(help.contains("--port"));
        assert!(help.contains("[default: 8983]"));
    }

    #[test]
    fn test_resolve_without_config_file() {
        let cli = CliConfig::try_parse_from(["mc-solr", "--install-dir", "/tmp/solr-cli"]).unwrap();
        let config = cli.resolve().unwrap();
        assert_eq!(config.install_dir(), Path::new("/tmp/solr-cli"));
    }

    #[test]
    fn test_resolve_reads_config_file_and_applies_override() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[install]\ndir = \"/from/file\"\n\n[launch]\nheap_size = \"1g\"\n")
            .unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::try_parse_from(["mc-solr", "-c", path.as_str()]).unwrap();
        let config = cli.resolve().unwrap();
        assert_eq!(config.install_dir(), Path::new("/from/file"));
        assert_eq!(config.heap_size(), "1g");

        let cli = CliConfig::try_parse_from([
            "mc-solr",
            "-c",
            path.as_str(),
            "--install-dir",
            "/from/cli",
        ])
        .unwrap();
        let config = cli.resolve().unwrap();
        assert_eq!(config.install_dir(), Path::new("/from/cli"));
    }

    #[test]
    fn test_resolve_missing_config_file_fails() {
        let cli =
            CliConfig::try_parse_from(["mc-solr", "-c", "/definitely/not/here.toml"]).unwrap();
        assert!(cli.resolve().is_err());
    }
}
