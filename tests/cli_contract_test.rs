#![cfg(feature = "cli")]

use async_trait::async_trait;
use clap::error::ErrorKind;
use clap::Parser;
use mc_solr::app::run_standalone_cli_until;
use mc_solr::core::{Bootstrap, InstallLayout, Port, ProcessExit, ServiceProcess};
use mc_solr::{CliConfig, EngineSettings, RunOutcome, SolrError, StandaloneEngine};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

mod common;

/// 記錄被呼叫的步驟與埠號
#[derive(Clone, Default)]
struct RecordingBootstrap {
    calls: Arc<Mutex<Vec<String>>>,
    fail_launch: bool,
}

impl RecordingBootstrap {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

struct ExitingProcess;

#[async_trait]
impl ServiceProcess for ExitingProcess {
    fn pid(&self) -> Option<u32> {
        None
    }

    fn try_exit(&mut self) -> mc_solr::Result<Option<ProcessExit>> {
        Ok(None)
    }

    async fn wait(&mut self) -> mc_solr::Result<ProcessExit> {
        Ok(ProcessExit {
            code: Some(0),
            success: true,
        })
    }

    async fn terminate(&mut self) -> mc_solr::Result<ProcessExit> {
        self.wait().await
    }
}

#[async_trait]
impl Bootstrap for RecordingBootstrap {
    async fn install(&self) -> mc_solr::Result<InstallLayout> {
        self.record("install".to_string());
        Ok(InstallLayout::new(PathBuf::from("/tmp/mc-solr-cli"), "6.5.0", None))
    }

    async fn configure(&self, _layout: &InstallLayout, port: Port) -> mc_solr::Result<()> {
        self.record(format!("configure:{}", port));
        Ok(())
    }

    async fn launch(
        &self,
        _layout: &InstallLayout,
        port: Port,
    ) -> mc_solr::Result<Box<dyn ServiceProcess>> {
        self.record(format!("launch:{}", port));
        if self.fail_launch {
            return Err(SolrError::Launch {
                message: "java: not found".to_string(),
            });
        }
        Ok(Box::new(ExitingProcess))
    }

    async fn probe(&self, port: Port) -> mc_solr::Result<bool> {
        self.record(format!("probe:{}", port));
        Ok(true)
    }
}

fn engine(bootstrap: RecordingBootstrap) -> StandaloneEngine<RecordingBootstrap> {
    StandaloneEngine::new(
        bootstrap,
        EngineSettings {
            startup_timeout: Duration::from_millis(200),
            poll_interval: Duration::from_millis(10),
            ..Default::default()
        },
    )
}

fn default_port_is_free() -> bool {
    let address = ("127.0.0.1", mc_solr::constants::MC_SOLR_STANDALONE_PORT);
    std::net::TcpListener::bind(address).is_ok()
}

#[tokio::test]
async fn test_no_flags_invokes_bootstrap_with_default_port() {
    let cli = CliConfig::try_parse_from(["mc-solr"]).unwrap();
    assert_eq!(cli.port, mc_solr::constants::MC_SOLR_STANDALONE_PORT);

    let bootstrap = RecordingBootstrap::default();
    let engine = engine(bootstrap.clone());
    let result = run_standalone_cli_until(&cli, &engine, std::future::pending()).await;

    if default_port_is_free() {
        let outcome = result.unwrap();
        assert!(matches!(outcome, RunOutcome::Exited(exit) if exit.success));
        assert_eq!(
            bootstrap.calls(),
            vec!["install", "configure:8983", "launch:8983", "probe:8983"]
        );
    } else {
        // 測試機上 8983 已被佔用：預設埠仍然必須是引擎檢查的那一個
        eprintln!("port 8983 is busy, checking the PortInUse path instead");
        let error = result.unwrap_err();
        assert!(matches!(error, SolrError::PortInUse { port: 8983 }));
        assert!(bootstrap.calls().is_empty());
    }
}

#[tokio::test]
async fn test_port_flag_is_passed_to_bootstrap() {
    let port = common::free_port();
    let port_arg = port.to_string();
    let cli = CliConfig::try_parse_from(["mc-solr", "--port", port_arg.as_str()]).unwrap();

    let bootstrap = RecordingBootstrap::default();
    let engine = engine(bootstrap.clone());
    run_standalone_cli_until(&cli, &engine, std::future::pending())
        .await
        .unwrap();

    assert_eq!(
        bootstrap.calls(),
        vec![
            "install".to_string(),
            format!("configure:{}", port),
            format!("launch:{}", port),
            format!("probe:{}", port),
        ]
    );
}

#[test]
fn test_port_9001_is_parsed() {
    let cli = assert_ok!(CliConfig::try_parse_from(["mc-solr", "--port", "9001"]));
    assert_eq!(assert_ok!(cli.port()).get(), 9001);
}

#[test]
fn test_non_integer_port_fails_without_bootstrap() {
    let bootstrap = RecordingBootstrap::default();

    let error = assert_err!(CliConfig::try_parse_from(["mc-solr", "--port", "abc"]));

    assert_eq!(error.kind(), ErrorKind::ValueValidation);
    assert_ne!(error.exit_code(), 0);
    assert!(bootstrap.calls().is_empty());
}

#[test]
fn test_help_prints_default_and_exits_zero() {
    let error = CliConfig::try_parse_from(["mc-solr", "--help"]).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::DisplayHelp);
    assert_eq!(error.exit_code(), 0);
    let help = error.render().to_string();
    assert!(help.contains("Install Solr and start a standalone instance."));
    assert!(help.contains("-p, --port <PORT>"));
    assert!(help.contains("8983"));
}

#[tokio::test]
async fn test_bootstrap_failure_is_fatal() {
    let port = common::free_port();
    let port_arg = port.to_string();
    let cli = CliConfig::try_parse_from(["mc-solr", "-p", port_arg.as_str()]).unwrap();

    let bootstrap = RecordingBootstrap {
        fail_launch: true,
        ..Default::default()
    };
    let engine = engine(bootstrap.clone());
    let error = run_standalone_cli_until(&cli, &engine, std::future::pending())
        .await
        .unwrap_err();

    assert!(matches!(error, SolrError::Launch { .. }));
    assert_ne!(error.exit_code(), 0);
    // launch 失敗後不會再 probe
    assert_eq!(
        bootstrap.calls(),
        vec![
            "install".to_string(),
            format!("configure:{}", port),
            format!("launch:{}", port),
        ]
    );
}
