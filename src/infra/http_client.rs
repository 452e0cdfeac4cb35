use crate::app::ports::HttpClientPort;
use crate::config::HttpConfig;
use crate::error::{Result, ScraperError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get_text(&self, url: &str) -> Result<String> {
        let resp = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                crate::metrics::record_request("error");
                return Err(e.into());
            }
        };

        let status = resp.status();
        if !status.is_success() {
            crate::metrics::record_request("error");
            warn!(%url, status = status.as_u16(), "non-success response");
            return Err(ScraperError::Api {
                message: format!("GET {} returned {}", url, status),
            });
        }

        let body = resp.text().await?;
        crate::metrics::record_request("success");
        debug!(%url, bytes = body.len(), "fetched page");
        Ok(body)
    }
}
