use clap::Parser;
use reqwest::header::{HeaderName, HeaderValue};

/// nearprobe — fetch a NEAR block over JSON-RPC and print it as JSON.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// NEAR JSON-RPC endpoint URL.
    #[arg(
        long,
        default_value = "https://rpc.mainnet.near.org",
        env = "NEARPROBE_RPC_URL"
    )]
    pub rpc_url: String,

    /// Extra request header as `Name: value` (repeatable; a later value
    /// replaces an earlier one with the same name).
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(HeaderName, HeaderValue)>,

    /// Give up on the call after this many seconds.
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// TCP/TLS connect timeout in seconds.
    #[arg(long, default_value = "10")]
    pub connect_timeout_secs: u64,

    /// Print the block on a single line instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,

    /// Also log request params and raw response bodies. Each call is logged
    /// at info level either way (overridden by RUST_LOG).
    #[arg(long, short)]
    pub verbose: bool,

    /// Block height or block hash.
    pub block_id: String,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "info,nearprobe_core=trace"
        } else {
            "info"
        }
    }
}

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("header `{raw}` must be formatted as `Name: value`"))?;
    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|e| format!("invalid header name in `{raw}`: {e}"))?;
    let value = HeaderValue::from_str(value.trim())
        .map_err(|e| format!("invalid header value in `{raw}`: {e}"))?;
    Ok((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_header_splits_on_first_colon() {
        let (name, value) = parse_header("Authorization: Bearer a:b").expect("header must parse");
        assert_eq!(name, "authorization");
        assert_eq!(value, "Bearer a:b");
    }

    #[test]
    fn parse_header_rejects_missing_colon() {
        let err = parse_header("x-api-key").expect_err("must reject");
        assert!(err.contains("Name: value"));
    }

    #[test]
    fn parse_header_rejects_bad_name() {
        let err = parse_header("bad name: v").expect_err("must reject space in name");
        assert!(err.contains("invalid header name"));
    }

    #[test]
    fn cli_collects_repeated_headers_in_order() {
        let cli = Cli::try_parse_from([
            "nearprobe",
            "--rpc-url",
            "http://127.0.0.1:3030",
            "-H",
            "x-api-key: one",
            "--header",
            "x-api-key: two",
            "--compact",
            "123456",
        ])
        .expect("arguments must parse");

        assert_eq!(cli.rpc_url, "http://127.0.0.1:3030");
        assert_eq!(cli.block_id, "123456");
        assert!(cli.compact);
        assert_eq!(cli.headers.len(), 2);
        assert_eq!(cli.headers[1].1, "two");
        assert_eq!(cli.timeout_secs, 30);
        assert_eq!(cli.connect_timeout_secs, 10);
    }

    #[test]
    fn cli_requires_block_id() {
        assert!(Cli::try_parse_from(["nearprobe"]).is_err());
    }

    #[test]
    fn verbose_raises_core_logging_to_trace() {
        let quiet = Cli::try_parse_from(["nearprobe", "1"]).expect("arguments must parse");
        assert_eq!(quiet.default_log_filter(), "info");

        let verbose = Cli::try_parse_from(["nearprobe", "-v", "1"]).expect("arguments must parse");
        assert_eq!(verbose.default_log_filter(), "info,nearprobe_core=trace");
    }

    #[test]
    fn largest_timeout_is_accepted_and_yields_no_deadline() {
        let cli = Cli::try_parse_from(["nearprobe", "--timeout-secs", "18446744073709551615", "1"])
            .expect("u64::MAX must parse");
        let ctx = nearprobe_core::rpc::CallContext::new()
            .with_timeout(std::time::Duration::from_secs(cli.timeout_secs));
        assert!(ctx.deadline().is_none());
    }
}
