use crate::core::ServiceProcess;
use crate::domain::model::{Port, ProcessExit};
use crate::utils::error::Result;
use std::fmt;

/// 已就緒的 Solr 實例，drop 時行程會被結束
pub struct ServiceHandle {
    port: Port,
    base_url: String,
    process: Box<dyn ServiceProcess>,
}

impl ServiceHandle {
    pub fn new(port: Port, base_url: String, process: Box<dyn ServiceProcess>) -> Self {
        Self {
            port,
            base_url,
            process,
        }
    }

    pub fn port(&self) -> Port {
        self.port
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn pid(&self) -> Option<u32> {
        self.process.pid()
    }

    pub fn is_running(&mut self) -> Result<bool> {
        Ok(self.process.try_exit()?.is_none())
    }

    pub async fn wait(&mut self) -> Result<ProcessExit> {
        self.process.wait().await
    }

    pub async fn shutdown(mut self) -> Result<ProcessExit> {
        tracing::info!("🛑 Stopping Solr on port {}", self.port);
        self.process.terminate().await
    }
}

impl fmt::Debug for ServiceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceHandle")
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("pid", &self.process.pid())
            .finish()
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    /// 背景模式：呼叫端持有 handle
    Detached(ServiceHandle),
    /// 前景模式下 Solr 自行正常結束
    Exited(ProcessExit),
    /// 收到停止訊號，Solr 已被關閉
    Interrupted,
}
