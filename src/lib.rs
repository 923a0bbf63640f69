//! End-to-end check of the ATV (Asiointitietovaranto) OpenAPI schema endpoint.
//!
//! `GET {base}/v1/schema/?format=json` must answer 2xx with a JSON document
//! carrying `openapi`, `info.title`, `info.version` and `paths`, where
//! `openapi == "3.0.3"` and `info.title == " Asiointitietovaranto "`.

pub mod check;
pub mod config;
pub mod document;
pub mod error;

pub use check::{run_all, CheckReport, PageReport, SchemaCheck};
pub use config::{CheckConfig, Expectations};
pub use error::{CheckError, CheckResult};
