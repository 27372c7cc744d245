//! ロギング初期化ユーティリティ

use tracing_subscriber::EnvFilter;

/// tracingサブスクライバーを初期化する
///
/// `RUST_LOG` が未設定の場合は `info` レベルを使用する。
/// プロセス起動時に一度だけ呼び出すこと。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
