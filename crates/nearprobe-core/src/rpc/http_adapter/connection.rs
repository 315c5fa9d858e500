use reqwest::Url;

use crate::error::CoreError;

use super::super::config::ClientConfig;

pub(super) fn parse_connection(connection: &str) -> Result<String, CoreError> {
    let parsed = Url::parse(connection).map_err(|e| {
        CoreError::InvalidConfig(format!(
            "invalid connection `{connection}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(connection.to_owned()),
        other => Err(CoreError::InvalidConfig(format!(
            "unsupported connection scheme `{other}`; expected http or https"
        ))),
    }
}

pub(super) fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, CoreError> {
    let mut builder = reqwest::Client::builder()
        .default_headers(config.headers.clone())
        .connect_timeout(config.connect_timeout)
        .tcp_nodelay(true);
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| CoreError::InvalidConfig(format!("failed to build HTTP client: {e}")))
}
