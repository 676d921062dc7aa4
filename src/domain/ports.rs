use crate::domain::model::{InstallLayout, Port, ProcessExit};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn install_dir(&self) -> &Path;
    fn solr_version(&self) -> &str;
    fn distribution_url(&self) -> String;
    fn archive_path(&self) -> Option<&Path>;
    fn keep_archive(&self) -> bool;
    fn download_timeout(&self) -> Duration;
    fn home_dir(&self) -> Option<&Path>;
    fn collections_dir(&self) -> Option<&Path>;
    fn java_bin(&self) -> Option<&Path>;
    fn heap_size(&self) -> &str;
    fn jvm_opts(&self) -> &[String];
    fn launch_env(&self) -> HashMap<String, String>;
    fn bind_host(&self) -> &str;
    fn probe_host(&self) -> &str;
    fn shutdown_grace(&self) -> Duration;
    fn startup_timeout(&self) -> Duration;
    fn poll_interval(&self) -> Duration;
}

/// 一個已啟動的服務行程
#[async_trait]
pub trait ServiceProcess: Send {
    fn pid(&self) -> Option<u32>;

    /// 不阻塞地檢查行程是否已結束
    fn try_exit(&mut self) -> Result<Option<ProcessExit>>;

    async fn wait(&mut self) -> Result<ProcessExit>;

    /// 先溫和結束，寬限期過後強制結束
    async fn terminate(&mut self) -> Result<ProcessExit>;
}

/// 單機 Solr 啟動的各個步驟，依序為 install、configure、launch、probe
#[async_trait]
pub trait Bootstrap: Send + Sync {
    async fn install(&self) -> Result<InstallLayout>;
    async fn configure(&self, layout: &InstallLayout, port: Port) -> Result<()>;
    async fn launch(&self, layout: &InstallLayout, port: Port) -> Result<Box<dyn ServiceProcess>>;
    async fn probe(&self, port: Port) -> Result<bool>;
}
