// ATV e2e - schema endpoint check
//
// One linear pass: request, status, decode, structure, values. Every step is
// awaited before `run` returns, so a failing assertion can never outlive the check.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::config::CheckConfig;
use crate::document::{self, SchemaSummary};
use crate::error::{CheckError, CheckResult};

/// Outcome of a passing schema check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub url: String,
    pub status: u16,
    #[serde(flatten)]
    pub schema: SchemaSummary,
}

/// A docs UI page that answered with a success status.
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub url: String,
    pub status: u16,
}

pub struct SchemaCheck {
    config: CheckConfig,
    client: Client,
}

impl SchemaCheck {
    pub fn new(config: CheckConfig) -> CheckResult<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("atv-e2e/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let client = builder.build()?;
        Ok(Self::with_client(config, client))
    }

    /// Reuse an existing client (shared connection pool, custom TLS, ...).
    pub fn with_client(config: CheckConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// `GET {base}/v1/schema/?format=json` and assert the document.
    pub async fn run(&self) -> CheckResult<CheckReport> {
        let url = self.config.schema_url()?;
        tracing::info!("schema check: GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("schema check: {} answered {}", url, status);

        if !status.is_success() {
            return Err(CheckError::Status {
                url: url.to_string(),
                status,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("json") {
            tracing::warn!(
                "schema check: content-type '{}' does not look like JSON, parsing anyway",
                content_type
            );
        }

        let body = response.bytes().await?;
        let doc: Value = serde_json::from_slice(&body)?;
        let schema = document::validate(&doc, &self.config.expectations)?;

        let report = CheckReport {
            url: url.to_string(),
            status: status.as_u16(),
            schema,
        };
        tracing::info!(
            openapi = %report.schema.openapi,
            version = %report.schema.version,
            paths = report.schema.path_count,
            "schema check passed"
        );
        Ok(report)
    }

    /// GET the Swagger UI and ReDoc pages; both must answer 2xx.
    pub async fn run_docs_ui(&self) -> CheckResult<Vec<PageReport>> {
        let mut pages = Vec::new();
        for url in self.config.docs_ui_urls()? {
            tracing::info!("docs ui check: GET {}", url);
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(CheckError::Status {
                    url: url.to_string(),
                    status,
                });
            }
            pages.push(PageReport {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(pages)
    }
}

/// Schema check, then the docs UI pages when enabled.
pub async fn run_all(config: CheckConfig) -> CheckResult<(CheckReport, Vec<PageReport>)> {
    let check = SchemaCheck::new(config)?;
    let report = check.run().await?;
    let pages = if check.config().check_docs_ui {
        check.run_docs_ui().await?
    } else {
        Vec::new()
    };
    Ok((report, pages))
}
