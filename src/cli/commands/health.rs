use anyhow::{bail, Context};
use serde_json::Value;
use std::time::Duration;

use crate::cli::utils::{output_fields, output_success};
use crate::cli::OutputFormat;
use crate::config;

pub async fn handle(url: Option<String>, output_format: OutputFormat) -> anyhow::Result<()> {
    let base = url.unwrap_or_else(|| format!("http://{}", config::config().bind_addr()));
    let endpoint = format!("{}/health", base.trim_end_matches('/'));

    let response = reqwest::Client::new()
        .get(&endpoint)
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .with_context(|| format!("could not reach {}", endpoint))?;

    let status = response.status();
    let body: Value = response.json().await.context("health response was not JSON")?;

    if !status.is_success() {
        bail!("{} reported {}: {}", endpoint, status, body);
    }

    let field = |key: &str| body.get(key).and_then(Value::as_str).unwrap_or("-").to_string();
    output_fields(
        output_format,
        &[("status", field("status")), ("database", field("database"))],
    );
    output_success(output_format, &format!("{} is healthy", base), Some(body))
}
