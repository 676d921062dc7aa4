use crate::domain::model::Port;
use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

pub fn base_url(host: &str, port: Port) -> String {
    format!("http://{}:{}/solr", host, port)
}

/// 打 Solr 的 system info API 判斷是否就緒
pub struct ReadinessProbe<'a> {
    client: &'a Client,
    host: &'a str,
}

impl<'a> ReadinessProbe<'a> {
    pub fn new(client: &'a Client, host: &'a str) -> Self {
        Self { client, host }
    }

    pub fn url(&self, port: Port) -> String {
        format!(
            "{}{}?wt=json",
            base_url(self.host, port),
            crate::constants::MC_SOLR_READINESS_PATH
        )
    }

    /// 2xx 視為就緒；連線失敗不是錯誤，只是還沒好
    pub async fn check(&self, port: Port) -> Result<bool> {
        let url = self.url(port);

        match self.client.get(&url).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) => {
                tracing::debug!("Readiness probe {} -> {}", url, response.status());
                Ok(response.status().is_success())
            }
            Err(e) if e.is_connect() || e.is_timeout() || e.is_request() => {
                tracing::debug!("Readiness probe {} not reachable yet: {}", url, e);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}
