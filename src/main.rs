use atv_e2e::{CheckConfig, CheckError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .init();
    }

    let config = CheckConfig::from_env()?;
    tracing::info!("ATV e2e: checking {}", config.base_url);

    match atv_e2e::run_all(config).await {
        Ok((report, pages)) => {
            tracing::info!(
                url = %report.url,
                status = report.status,
                title = ?report.schema.title,
                "schema endpoint OK"
            );
            for page in &pages {
                tracing::info!(url = %page.url, status = page.status, "docs page OK");
            }
            Ok(())
        }
        Err(e) => {
            log_failure(&e);
            Err(e.into())
        }
    }
}

fn log_failure(e: &CheckError) {
    tracing::error!(code = e.code(), "ATV e2e check failed: {}", e);
}
