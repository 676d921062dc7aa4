// 共用常數

/// 單機 Solr 預設埠號
pub const MC_SOLR_STANDALONE_PORT: u16 = 8983;

/// 預設安裝的 Solr 版本
pub const MC_SOLR_VERSION: &str = "6.5.0";

/// Solr 發行版下載位置，`{version}` 會被替換
pub const MC_SOLR_DIST_URL_TEMPLATE: &str =
    "https://archive.apache.org/dist/lucene/solr/{version}/solr-{version}.zip";

pub const MC_SOLR_DEFAULT_INSTALL_DIR: &str = "./solr-standalone";

pub const MC_SOLR_DEFAULT_HEAP_SIZE: &str = "512m";

pub const MC_SOLR_DEFAULT_BIND_HOST: &str = "127.0.0.1";

pub const MC_SOLR_STARTUP_TIMEOUT_SECS: u64 = 90;

pub const MC_SOLR_POLL_INTERVAL_MS: u64 = 500;

pub const MC_SOLR_SHUTDOWN_GRACE_SECS: u64 = 10;

pub const MC_SOLR_DOWNLOAD_TIMEOUT_SECS: u64 = 600;

/// 安裝完成標記檔名
pub const MC_SOLR_INSTALL_MARKER: &str = ".mc-solr-install.json";

/// Jetty 啟動檔 (相對於 server 目錄)
pub const MC_SOLR_START_JAR: &str = "start.jar";

/// 就緒檢查路徑 (相對於 /solr)
pub const MC_SOLR_READINESS_PATH: &str = "/admin/info/system";

/// 展開給定版本的下載網址
pub fn distribution_url(version: &str) -> String {
    MC_SOLR_DIST_URL_TEMPLATE.replace("{version}", version)
}
