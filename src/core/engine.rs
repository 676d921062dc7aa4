use crate::core::health::base_url;
use crate::core::service::{RunOutcome, ServiceHandle};
use crate::core::{Bootstrap, ConfigProvider, ServiceProcess};
use crate::domain::model::{Port, RunMode};
use crate::utils::error::{Result, SolrError};
use crate::utils::monitor::ProcessMonitor;
use std::future::Future;
use std::io::ErrorKind;
use std::net::TcpListener;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::Instant;

const MONITOR_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub bind_host: String,
    pub probe_host: String,
    pub startup_timeout: Duration,
    pub poll_interval: Duration,
}

impl EngineSettings {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            bind_host: config.bind_host().to_string(),
            probe_host: config.probe_host().to_string(),
            startup_timeout: config.startup_timeout(),
            poll_interval: config.poll_interval(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            bind_host: crate::constants::MC_SOLR_DEFAULT_BIND_HOST.to_string(),
            probe_host: crate::constants::MC_SOLR_DEFAULT_BIND_HOST.to_string(),
            startup_timeout: Duration::from_secs(crate::constants::MC_SOLR_STARTUP_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(crate::constants::MC_SOLR_POLL_INTERVAL_MS),
        }
    }
}

/// 依序執行 install → configure → launch，並等待 Solr 就緒
pub struct StandaloneEngine<B: Bootstrap> {
    bootstrap: B,
    settings: EngineSettings,
    monitor_enabled: bool,
}

impl<B: Bootstrap> StandaloneEngine<B> {
    pub fn new(bootstrap: B, settings: EngineSettings) -> Self {
        Self {
            bootstrap,
            settings,
            monitor_enabled: false,
        }
    }

    pub fn new_with_monitoring(
        bootstrap: B,
        settings: EngineSettings,
        monitor_enabled: bool,
    ) -> Self {
        Self {
            bootstrap,
            settings,
            monitor_enabled,
        }
    }

    pub fn bootstrap(&self) -> &B {
        &self.bootstrap
    }

    /// 前景模式阻塞到 Solr 結束或收到 Ctrl-C；背景模式就緒後回傳 handle
    pub async fn run_standalone(&self, port: Port, mode: RunMode) -> Result<RunOutcome> {
        match mode {
            RunMode::Detached => Ok(RunOutcome::Detached(self.start(port).await?)),
            RunMode::Foreground => self.run_until(port, shutdown_signal()).await,
        }
    }

    /// 前景執行，`shutdown` 完成時關閉 Solr
    pub async fn run_until<F>(&self, port: Port, shutdown: F) -> Result<RunOutcome>
    where
        F: Future<Output = ()> + Send,
    {
        let mut handle = self.start(port).await?;
        tracing::info!("✅ Solr is ready at {}", handle.base_url());

        let monitor = self.spawn_monitor(handle.pid());

        let waited = tokio::select! {
            exit = handle.wait() => Some(exit),
            _ = shutdown => None,
        };

        if let Some(monitor) = monitor {
            monitor.stop().await;
        }

        match waited {
            Some(exit) => {
                let exit = exit?;
                if exit.success {
                    tracing::info!("Solr exited ({})", exit);
                    Ok(RunOutcome::Exited(exit))
                } else {
                    Err(SolrError::ProcessExited {
                        status: exit.to_string(),
                    })
                }
            }
            None => {
                tracing::info!("Shutdown requested");
                let exit = handle.shutdown().await?;
                tracing::debug!("Solr stopped ({})", exit);
                Ok(RunOutcome::Interrupted)
            }
        }
    }

    /// 啟動 Solr 並等到就緒；失敗時不會留下執行中的行程
    pub async fn start(&self, port: Port) -> Result<ServiceHandle> {
        if port.is_privileged() {
            tracing::warn!("Port {} is privileged; binding may require elevated rights", port);
        }

        ensure_port_available(&self.settings.bind_host, port)?;

        let layout = self.bootstrap.install().await?;
        self.bootstrap.configure(&layout, port).await?;

        tracing::info!("🚀 Starting Solr on port {}", port);
        let mut process = self.bootstrap.launch(&layout, port).await?;

        if let Err(e) = self.wait_until_ready(process.as_mut(), port).await {
            if !matches!(e, SolrError::ProcessExited { .. }) {
                if let Err(stop_error) = process.terminate().await {
                    tracing::warn!("Failed to stop Solr after startup error: {}", stop_error);
                }
            }
            return Err(e);
        }

        Ok(ServiceHandle::new(
            port,
            base_url(&self.settings.probe_host, port),
            process,
        ))
    }

    async fn wait_until_ready(&self, process: &mut dyn ServiceProcess, port: Port) -> Result<()> {
        let started = Instant::now();
        let deadline = started + self.settings.startup_timeout;
        let mut attempts: u32 = 0;

        loop {
            if let Some(exit) = process.try_exit()? {
                return Err(SolrError::ProcessExited {
                    status: exit.to_string(),
                });
            }

            attempts += 1;
            match self.bootstrap.probe(port).await {
                Ok(true) => {
                    tracing::debug!(
                        "Solr ready after {} probes ({:?})",
                        attempts,
                        started.elapsed()
                    );
                    return Ok(());
                }
                Ok(false) => {}
                Err(e) => tracing::debug!("Readiness probe failed: {}", e),
            }

            if Instant::now() >= deadline {
                return Err(SolrError::ReadinessTimeout {
                    port: port.get(),
                    waited_secs: self.settings.startup_timeout.as_secs(),
                });
            }

            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }

    fn spawn_monitor(&self, pid: Option<u32>) -> Option<MonitorTask> {
        if !self.monitor_enabled {
            return None;
        }
        let pid = pid?;
        let mut monitor = ProcessMonitor::new(self.monitor_enabled, pid);
        if !monitor.is_enabled() {
            return None;
        }

        tracing::info!("🔍 Process monitoring enabled");
        let (stop, mut stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(MONITOR_INTERVAL);
            loop {
                tokio::select! {
                    _ = interval.tick() => monitor.log_stats(),
                    _ = &mut stopped => {
                        monitor.log_final_stats();
                        break;
                    }
                }
            }
        });

        Some(MonitorTask { stop, task })
    }
}

struct MonitorTask {
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl MonitorTask {
    async fn stop(self) {
        let _ = self.stop.send(());
        if let Err(e) = self.task.await {
            tracing::debug!("Monitor task ended abnormally: {}", e);
        }
    }
}

/// 綁定一次再放掉，確認沒有其他行程佔用
pub fn ensure_port_available(host: &str, port: Port) -> Result<()> {
    match TcpListener::bind((host, port.get())) {
        Ok(listener) => {
            drop(listener);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            Err(SolrError::PortInUse { port: port.get() })
        }
        Err(e) => Err(e.into()),
    }
}

/// Ctrl-C；無法註冊時永遠不會完成
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
