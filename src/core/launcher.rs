use crate::core::{ConfigProvider, ServiceProcess};
use crate::domain::model::{InstallLayout, LaunchSpec, Port, ProcessExit};
use crate::utils::error::{Result, SolrError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};

/// 組出 Jetty/Solr 的 JVM 指令
pub fn build_launch_spec<C: ConfigProvider>(
    config: &C,
    layout: &InstallLayout,
    port: Port,
) -> LaunchSpec {
    let mut args = vec![
        format!("-Xms{}", config.heap_size()),
        format!("-Xmx{}", config.heap_size()),
        format!("-Djetty.port={}", port),
        format!("-Djetty.host={}", config.bind_host()),
        format!("-Dsolr.solr.home={}", layout.home_dir.display()),
        format!("-Dsolr.install.dir={}", layout.dist_dir.display()),
        format!("-Dsolr.log.dir={}", layout.log_dir.display()),
    ];
    args.extend(config.jvm_opts().iter().cloned());
    args.extend([
        "-jar".to_string(),
        crate::constants::MC_SOLR_START_JAR.to_string(),
        "--module=http".to_string(),
    ]);

    let program = resolve_java(
        config.java_bin().map(PathBuf::from),
        std::env::var_os("JAVA_HOME").map(PathBuf::from),
    );

    LaunchSpec {
        program,
        args,
        working_dir: layout.server_dir.clone(),
        env: config.launch_env(),
    }
}

/// 設定值優先，其次 $JAVA_HOME/bin/java，最後用 PATH 上的 java
fn resolve_java(configured: Option<PathBuf>, java_home: Option<PathBuf>) -> PathBuf {
    if let Some(java) = configured {
        return java;
    }

    match java_home {
        Some(home) if !home.as_os_str().is_empty() => home.join("bin").join("java"),
        _ => PathBuf::from("java"),
    }
}

/// 啟動行程並把 stdout/stderr 轉送到 tracing
pub fn spawn(spec: &LaunchSpec, shutdown_grace: Duration) -> Result<SolrProcess> {
    tracing::debug!(
        "Launching {} {} (cwd {})",
        spec.program.display(),
        spec.args.join(" "),
        spec.working_dir.display()
    );

    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .current_dir(&spec.working_dir)
        .envs(&spec.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    // 終端機的 Ctrl-C 只送給 mc-solr，由它負責關閉 JVM
    #[cfg(unix)]
    command.process_group(0);

    let mut child = command.spawn().map_err(|e| SolrError::Launch {
        message: format!("failed to start {}: {}", spec.program.display(), e),
    })?;

    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(forward_output(stdout, false));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(forward_output(stderr, true));
    }

    tracing::info!("🚀 Solr process started (pid {:?})", child.id());
    Ok(SolrProcess {
        child,
        shutdown_grace,
    })
}

async fn forward_output<R: AsyncRead + Unpin>(reader: R, is_stderr: bool) {
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if is_stderr => tracing::warn!(target: "solr", "{}", line),
            Ok(Some(line)) => tracing::info!(target: "solr", "{}", line),
            Ok(None) => break,
            Err(e) => {
                tracing::debug!("Stopped reading Solr output: {}", e);
                break;
            }
        }
    }
}

pub struct SolrProcess {
    child: Child,
    shutdown_grace: Duration,
}

impl SolrProcess {
    #[cfg(unix)]
    async fn request_stop(&mut self) -> bool {
        let Some(pid) = self.child.id() else {
            return false;
        };

        match Command::new("/bin/kill")
            .arg("-15")
            .arg(pid.to_string())
            .output()
            .await
        {
            Ok(output) if output.status.success() => {
                tracing::debug!("SIGTERM sent to pid {}", pid);
                true
            }
            Ok(output) => {
                tracing::debug!(
                    "kill -15 {} failed: {}",
                    pid,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                false
            }
            Err(e) => {
                tracing::warn!("Could not run /bin/kill: {}", e);
                false
            }
        }
    }

    #[cfg(not(unix))]
    async fn request_stop(&mut self) -> bool {
        false
    }
}

#[async_trait]
impl ServiceProcess for SolrProcess {
    fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    fn try_exit(&mut self) -> Result<Option<ProcessExit>> {
        Ok(self.child.try_wait()?.map(ProcessExit::from))
    }

    async fn wait(&mut self) -> Result<ProcessExit> {
        Ok(self.child.wait().await?.into())
    }

    async fn terminate(&mut self) -> Result<ProcessExit> {
        if let Some(exit) = self.try_exit()? {
            return Ok(exit);
        }

        if self.request_stop().await {
            match tokio::time::timeout(self.shutdown_grace, self.child.wait()).await {
                Ok(status) => {
                    tracing::info!("🛑 Solr stopped gracefully");
                    return Ok(status?.into());
                }
                Err(_) => tracing::warn!(
                    "Solr still running after {:?}, killing it",
                    self.shutdown_grace
                ),
            }
        }

        self.child.kill().await?;
        Ok(self.child.wait().await?.into())
    }
}
