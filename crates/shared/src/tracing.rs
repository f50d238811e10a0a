use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG 未設定時のフィルタ
pub const DEFAULT_LOG_FILTER: &str = "info";

/// JSON 形式の構造化ログを CloudWatch Logs に出力するサブスクライバーを登録する
///
/// 呼び出しはプロセス起動時の一度だけ。二度目以降はエラーを返す。
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(false)
                .with_current_span(true)
                .with_span_list(false),
        )
        .with(filter)
        .try_init()?;

    Ok(())
}
