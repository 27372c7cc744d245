//! Shoplite server エントリポイント

use clap::Parser;
use shoplite::error::Error;
use shoplite::{api, db, logging, AppState};

/// コマンドライン引数
#[derive(Debug, Parser)]
#[command(
    name = "shoplite",
    about = "Transactional commerce service with a request audit trail"
)]
struct Args {
    /// バインドするホスト
    #[arg(long, env = "SHOPLITE_HOST", default_value = "127.0.0.1")]
    host: String,

    /// バインドするポート
    #[arg(long, env = "SHOPLITE_PORT", default_value_t = 8000)]
    port: u16,

    /// データベースURL
    #[arg(long, env = "SHOPLITE_DATABASE_URL", default_value = "sqlite:shoplite.db")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();
    logging::init();

    // セッションファクトリは起動時に一度だけ作成し、全コンポーネントへ注入する
    let db_pool = db::migrations::initialize_database(&args.database_url).await?;
    let state = AppState { db_pool };
    let app = api::create_app(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Config(format!("Failed to bind {}: {}", addr, e)))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

    Ok(())
}
