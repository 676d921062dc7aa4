use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::utils::error::Result;
use crate::utils::validation::validate_port;

/// Solr 綁定的 TCP 埠號，0 不合法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Port(u16);

impl Port {
    pub fn new(port: u16) -> Result<Self> {
        validate_port("port", port)?;
        Ok(Self(port))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// 需要特權才能綁定的埠號
    pub fn is_privileged(self) -> bool {
        self.0 < 1024
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 一次安裝解析後的各個路徑
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    pub root: PathBuf,
    pub dist_dir: PathBuf,
    pub server_dir: PathBuf,
    pub home_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl InstallLayout {
    pub fn new(root: PathBuf, version: &str, home_dir: Option<PathBuf>) -> Self {
        let dist_dir = root.join(format!("solr-{}", version));
        let server_dir = dist_dir.join("server");
        let home_dir = home_dir.unwrap_or_else(|| root.join("home"));
        let log_dir = root.join("logs");

        Self {
            root,
            dist_dir,
            server_dir,
            home_dir,
            log_dir,
        }
    }

    pub fn start_jar(&self) -> PathBuf {
        self.server_dir.join(crate::constants::MC_SOLR_START_JAR)
    }

    pub fn marker_path(&self) -> PathBuf {
        self.dist_dir.join(crate::constants::MC_SOLR_INSTALL_MARKER)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallMarker {
    pub version: String,
    pub source: String,
    pub installed_at: DateTime<Utc>,
}

/// 要啟動的 JVM 指令，spawn 之前先組好方便檢查
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub env: HashMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    pub code: Option<i32>,
    pub success: bool,
}

impl From<std::process::ExitStatus> for ProcessExit {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
            success: status.success(),
        }
    }
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code: {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// 阻塞直到 Solr 結束或收到 Ctrl-C
    #[default]
    Foreground,
    /// 就緒後立即回傳 handle
    Detached,
}
