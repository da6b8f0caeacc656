use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG 未設定時 CLI 使用的過濾規則；verbose 會一併打開 HTTP client 的 debug
fn cli_default_filter(verbose: bool) -> &'static str {
    if verbose {
        "cosmos_autoscale=debug,reqwest=debug,hyper_util=debug,info"
    } else {
        "cosmos_autoscale=info,reqwest=warn,hyper_util=warn,warn"
    }
}

pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli_default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_function_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("cosmos_autoscale=info,function=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(), // Functions host 會收集 stdout，JSON 方便在 Log Analytics 查詢
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_filter_parses() {
        for verbose in [false, true] {
            let directives = cli_default_filter(verbose);
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
            assert!(directives.contains("reqwest="));
        }
        assert!(cli_default_filter(true).contains("cosmos_autoscale=debug"));
    }
}
