//! 構造化ログの初期化。
//! `RUST_LOG` が設定されていればそれを優先し、未設定なら環境名からログレベルを決める。

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// init_tracing は tracing-subscriber を初期化する。プロセスにつき 1 回だけ呼び出すこと。
///
/// - dev: debug
/// - staging: info
/// - それ以外: warn
///
/// `format` が "text" の場合はプレーンテキスト、それ以外は JSON で出力する。
pub fn init_tracing(environment: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(environment)));

    let registry = tracing_subscriber::registry().with(filter);

    if format == "text" {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_span_events(fmt::format::FmtSpan::CLOSE),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_span_events(fmt::format::FmtSpan::CLOSE),
            )
            .init();
    }
}

fn default_level(environment: &str) -> &'static str {
    match environment {
        "dev" => "debug",
        "staging" => "info",
        _ => "warn",
    }
}
