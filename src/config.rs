// ATV e2e - configuration
//
// Everything comes from the environment (optionally seeded from `.env`).

use std::time::Duration;

use url::Url;

use crate::error::{CheckError, CheckResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.3";
/// Surrounding spaces are part of the published title.
pub const DEFAULT_TITLE: &str = " Asiointitietovaranto ";

pub const SCHEMA_PATH: &str = "v1/schema/";
pub const SWAGGER_PATH: &str = "v1/schema/swagger/";
pub const REDOC_PATH: &str = "v1/schema/redoc/";

/// Values the schema document must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectations {
    pub openapi_version: String,
    pub title: String,
}

impl Default for Expectations {
    fn default() -> Self {
        Self {
            openapi_version: DEFAULT_OPENAPI_VERSION.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Always ends with `/` so relative joins keep any path prefix.
    pub base_url: Url,
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub expectations: Expectations,
    pub check_docs_ui: bool,
}

impl CheckConfig {
    pub fn new(base_url: &str) -> CheckResult<Self> {
        Ok(Self {
            base_url: normalize_base(base_url)?,
            timeout: None,
            connect_timeout: None,
            expectations: Expectations::default(),
            check_docs_ui: false,
        })
    }

    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> CheckResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> CheckResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base = get("ATV_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut cfg = Self::new(&base)?;

        cfg.timeout = get("ATV_TIMEOUT_SECS")
            .map(|v| parse_secs("ATV_TIMEOUT_SECS", &v))
            .transpose()?;
        cfg.connect_timeout = get("ATV_CONNECT_TIMEOUT_SECS")
            .map(|v| parse_secs("ATV_CONNECT_TIMEOUT_SECS", &v))
            .transpose()?;

        // Titles are compared verbatim, so no trimming here.
        if let Some(v) = lookup("ATV_EXPECTED_OPENAPI").filter(|v| !v.is_empty()) {
            cfg.expectations.openapi_version = v;
        }
        if let Some(v) = lookup("ATV_EXPECTED_TITLE").filter(|v| !v.is_empty()) {
            cfg.expectations.title = v;
        }

        if let Some(v) = get("ATV_CHECK_DOCS_UI") {
            cfg.check_docs_ui = parse_bool("ATV_CHECK_DOCS_UI", &v)?;
        }

        Ok(cfg)
    }

    /// `{base}/v1/schema/?format=json`
    pub fn schema_url(&self) -> CheckResult<Url> {
        let mut url = self.join(SCHEMA_PATH)?;
        url.query_pairs_mut().append_pair("format", "json");
        Ok(url)
    }

    pub fn docs_ui_urls(&self) -> CheckResult<[Url; 2]> {
        Ok([self.join(SWAGGER_PATH)?, self.join(REDOC_PATH)?])
    }

    fn join(&self, path: &str) -> CheckResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| CheckError::Config(format!("cannot resolve '{path}': {e}")))
    }
}

fn normalize_base(raw: &str) -> CheckResult<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| CheckError::Config(format!("invalid base URL '{raw}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(CheckError::Config(format!("base URL '{raw}' cannot be a base")));
    }
    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_secs(key: &str, raw: &str) -> CheckResult<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| CheckError::Config(format!("{key} must be a whole number of seconds, got '{raw}'")))?;
    if secs == 0 {
        return Err(CheckError::Config(format!("{key} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_bool(key: &str, raw: &str) -> CheckResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CheckError::Config(format!("{key} must be a boolean, got '{raw}'"))),
    }
}
