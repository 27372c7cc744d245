//! Configuration management via environment variables
//!
//! Provides helper functions for reading runtime switches that are not part
//! of the CLI surface.

/// 開発モードの有効/無効を取得
///
/// 環境変数 `SHOPLITE_DEV_MODE` が `true/1/yes/on` のときに有効化する。
/// 開発モードではエラーレスポンスの `detail` に診断メッセージを含める。
pub fn is_dev_mode() -> bool {
    std::env::var("SHOPLITE_DEV_MODE")
        .map(|value| {
            matches!(
                value.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}
