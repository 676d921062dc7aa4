use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolrError {
    #[error("Download failed from {url}: {message}")]
    Download { url: String, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Archive extraction failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Installation error: {message}")]
    Install { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Port {port} is already in use")]
    PortInUse { port: u16 },

    #[error("Failed to launch Solr: {message}")]
    Launch { message: String },

    #[error("Solr process exited unexpectedly ({status})")]
    ProcessExited { status: String },

    #[error("Solr did not become ready on port {port} within {waited_secs}s")]
    ReadinessTimeout { port: u16, waited_secs: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Install,
    Configuration,
    Bind,
    Launch,
    Timeout,
    System,
}

impl SolrError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SolrError::Download { .. }
            | SolrError::Http(_)
            | SolrError::Archive(_)
            | SolrError::Install { .. } => ErrorCategory::Install,
            SolrError::Config { .. }
            | SolrError::InvalidConfigValue { .. }
            | SolrError::TomlParse(_) => ErrorCategory::Configuration,
            SolrError::PortInUse { .. } => ErrorCategory::Bind,
            SolrError::Launch { .. } | SolrError::ProcessExited { .. } => ErrorCategory::Launch,
            SolrError::ReadinessTimeout { .. } => ErrorCategory::Timeout,
            SolrError::Io(_) | SolrError::Serialization(_) => ErrorCategory::System,
        }
    }

    /// 依錯誤類別決定行程結束碼 (2 保留給 clap 的用法錯誤)
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::System => 1,
            ErrorCategory::Install => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Bind => 5,
            ErrorCategory::Launch => 6,
            ErrorCategory::Timeout => 7,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SolrError::Download { url, .. } => format!("Could not download Solr from {}", url),
            SolrError::Http(_) => "Network request to Solr failed".to_string(),
            SolrError::Archive(_) => "The Solr archive is corrupt or unreadable".to_string(),
            SolrError::Install { message } => format!("Solr installation failed: {}", message),
            SolrError::Config { message } => format!("Invalid configuration: {}", message),
            SolrError::InvalidConfigValue { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            SolrError::TomlParse(_) => "The configuration file is not valid TOML".to_string(),
            SolrError::PortInUse { port } => format!("Port {} is already taken", port),
            SolrError::Launch { message } => format!("Could not start Solr: {}", message),
            SolrError::ProcessExited { status } => {
                format!("Solr stopped unexpectedly ({})", status)
            }
            SolrError::ReadinessTimeout { port, waited_secs } => format!(
                "Solr did not answer on port {} after {} seconds",
                port, waited_secs
            ),
            SolrError::Io(e) => format!("File system error: {}", e),
            SolrError::Serialization(e) => format!("Corrupt install metadata: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Install => {
                "Check network access to the distribution URL \
                 or point distribution.archive_path at a local zip"
            }
            ErrorCategory::Configuration => "Fix the configuration file or command line arguments",
            ErrorCategory::Bind => "Stop the process using the port or pass a different --port",
            ErrorCategory::Launch => {
                "Make sure Java is installed (or set JAVA_HOME) and check the Solr logs"
            }
            ErrorCategory::Timeout => {
                "Increase readiness.startup_timeout_secs \
                 or inspect the Solr logs for startup errors"
            }
            ErrorCategory::System => {
                "Check file permissions and free disk space in the install directory"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SolrError>;
