use crate::adapters::{headhunter, superjob};
use crate::config::{ConfigProvider, HeadHunterSettings, SuperJobSettings};
use crate::domain::model::{Page, Source};
use crate::domain::ports::PageFetcher;
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("salary-etl/", env!("CARGO_PKG_VERSION"));

/// 以 reqwest 對兩個職缺 API 發出單頁請求
pub struct HttpPageFetcher {
    client: Client,
    query_prefix: String,
    headhunter: HeadHunterSettings,
    superjob: SuperJobSettings,
}

impl HttpPageFetcher {
    pub fn new(
        query_prefix: String,
        headhunter: HeadHunterSettings,
        superjob: SuperJobSettings,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            query_prefix,
            headhunter,
            superjob,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.query_prefix().to_string(),
            config.headhunter(),
            config.superjob(),
            config.request_timeout(),
        )
    }

    fn build_request(&self, source: Source, language: &str, page: u32) -> reqwest::RequestBuilder {
        match source {
            Source::HeadHunter => self.client.get(&self.headhunter.endpoint).query(
                &headhunter::query(&self.headhunter, &self.query_prefix, language, page),
            ),
            Source::SuperJob => {
                let request = self.client.get(&self.superjob.endpoint).query(&superjob::query(
                    &self.superjob,
                    &self.query_prefix,
                    language,
                    page,
                ));
                match &self.superjob.secret_key {
                    Some(key) => request.header(superjob::APP_ID_HEADER, key),
                    None => request,
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, source: Source, language: &str, page: u32) -> Result<Page> {
        tracing::debug!("🌐 Requesting {} '{}' page {}", source, language, page);

        let response = self
            .build_request(source, language, page)
            .send()
            .await
            .map_err(|e| EtlError::source_unavailable(source, language, page, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::source_unavailable(
                source,
                language,
                page,
                format!("HTTP {}", status),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| EtlError::source_unavailable(source, language, page, e.to_string()))?;

        match source {
            Source::HeadHunter => headhunter::parse_page(&body),
            Source::SuperJob => superjob::parse_page(&body),
        }
    }
}
