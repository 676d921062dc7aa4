use crate::constants;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SolrError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 單機 Solr 的設定，所有區段皆可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandaloneConfig {
    pub install: Option<InstallConfig>,
    pub distribution: Option<DistributionConfig>,
    pub home: Option<HomeConfig>,
    pub launch: Option<LaunchConfig>,
    pub readiness: Option<ReadinessConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallConfig {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistributionConfig {
    pub version: Option<String>,
    pub url: Option<String>,
    pub archive_path: Option<PathBuf>,
    pub keep_archive: Option<bool>,
    pub download_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomeConfig {
    pub dir: Option<PathBuf>,
    pub collections_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchConfig {
    pub java_bin: Option<PathBuf>,
    pub heap_size: Option<String>,
    pub jvm_opts: Option<Vec<String>>,
    pub bind_host: Option<String>,
    pub shutdown_grace_secs: Option<u64>,
    /// 額外傳給 JVM 的環境變數
    pub env: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadinessConfig {
    pub probe_host: Option<String>,
    pub startup_timeout_secs: Option<u64>,
    pub poll_interval_ms: Option<u64>,
}

impl StandaloneConfig {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SolrError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${SOLR_INSTALL_DIR})，未定義的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SolrError::Config {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn set_install_dir(&mut self, dir: PathBuf) {
        self.install.get_or_insert_with(InstallConfig::default).dir = Some(dir);
    }

    fn download_timeout_secs(&self) -> u64 {
        self.distribution
            .as_ref()
            .and_then(|d| d.download_timeout_secs)
            .unwrap_or(constants::MC_SOLR_DOWNLOAD_TIMEOUT_SECS)
    }

    fn shutdown_grace_secs(&self) -> u64 {
        self.launch
            .as_ref()
            .and_then(|l| l.shutdown_grace_secs)
            .unwrap_or(constants::MC_SOLR_SHUTDOWN_GRACE_SECS)
    }

    fn startup_timeout_secs(&self) -> u64 {
        self.readiness
            .as_ref()
            .and_then(|r| r.startup_timeout_secs)
            .unwrap_or(constants::MC_SOLR_STARTUP_TIMEOUT_SECS)
    }

    fn poll_interval_ms(&self) -> u64 {
        self.readiness
            .as_ref()
            .and_then(|r| r.poll_interval_ms)
            .unwrap_or(constants::MC_SOLR_POLL_INTERVAL_MS)
    }

    /// 驗證設定的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("install.dir", self.install_dir())?;
        validation::validate_non_empty_string("distribution.version", self.solr_version())?;

        // 有本機封存檔時不會用到下載網址
        if self.archive_path().is_none() {
            validation::validate_url("distribution.url", &self.distribution_url())?;
        }

        if let Some(home) = self.home_dir() {
            validation::validate_path("home.dir", home)?;
        }

        validation::validate_heap_size("launch.heap_size", self.heap_size())?;
        for opt in self.jvm_opts() {
            validation::validate_non_empty_string("launch.jvm_opts", opt)?;
        }
        validation::validate_non_empty_string("launch.bind_host", self.bind_host())?;
        validation::validate_non_empty_string("readiness.probe_host", self.probe_host())?;

        for name in self.launch_env().keys() {
            validation::validate_env_name("launch.env", name)?;
        }

        validation::validate_range(
            "distribution.download_timeout_secs",
            self.download_timeout_secs(),
            1,
            86_400,
        )?;
        validation::validate_range(
            "launch.shutdown_grace_secs",
            self.shutdown_grace_secs(),
            0,
            300,
        )?;
        validation::validate_range(
            "readiness.startup_timeout_secs",
            self.startup_timeout_secs(),
            1,
            3_600,
        )?;
        validation::validate_range(
            "readiness.poll_interval_ms",
            self.poll_interval_ms(),
            10,
            60_000,
        )?;

        Ok(())
    }
}

impl ConfigProvider for StandaloneConfig {
    fn install_dir(&self) -> &Path {
        self.install
            .as_ref()
            .and_then(|i| i.dir.as_deref())
            .unwrap_or_else(|| Path::new(constants::MC_SOLR_DEFAULT_INSTALL_DIR))
    }

    fn solr_version(&self) -> &str {
        self.distribution
            .as_ref()
            .and_then(|d| d.version.as_deref())
            .unwrap_or(constants::MC_SOLR_VERSION)
    }

    fn distribution_url(&self) -> String {
        self.distribution
            .as_ref()
            .and_then(|d| d.url.clone())
            .unwrap_or_else(|| constants::distribution_url(self.solr_version()))
    }

    fn archive_path(&self) -> Option<&Path> {
        self.distribution.as_ref().and_then(|d| d.archive_path.as_deref())
    }

    fn keep_archive(&self) -> bool {
        self.distribution
            .as_ref()
            .and_then(|d| d.keep_archive)
            .unwrap_or(false)
    }

    fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs())
    }

    fn home_dir(&self) -> Option<&Path> {
        self.home.as_ref().and_then(|h| h.dir.as_deref())
    }

    fn collections_dir(&self) -> Option<&Path> {
        self.home.as_ref().and_then(|h| h.collections_dir.as_deref())
    }

    fn java_bin(&self) -> Option<&Path> {
        self.launch.as_ref().and_then(|l| l.java_bin.as_deref())
    }

    fn heap_size(&self) -> &str {
        self.launch
            .as_ref()
            .and_then(|l| l.heap_size.as_deref())
            .unwrap_or(constants::MC_SOLR_DEFAULT_HEAP_SIZE)
    }

    fn jvm_opts(&self) -> &[String] {
        self.launch
            .as_ref()
            .and_then(|l| l.jvm_opts.as_deref())
            .unwrap_or(&[])
    }

    fn launch_env(&self) -> HashMap<String, String> {
        self.launch
            .as_ref()
            .and_then(|l| l.env.clone())
            .unwrap_or_default()
    }

    fn bind_host(&self) -> &str {
        self.launch
            .as_ref()
            .and_then(|l| l.bind_host.as_deref())
            .unwrap_or(constants::MC_SOLR_DEFAULT_BIND_HOST)
    }

    fn probe_host(&self) -> &str {
        self.readiness
            .as_ref()
            .and_then(|r| r.probe_host.as_deref())
            .unwrap_or(constants::MC_SOLR_DEFAULT_BIND_HOST)
    }

    fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs())
    }

    fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs())
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms())
    }
}

impl Validate for StandaloneConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
