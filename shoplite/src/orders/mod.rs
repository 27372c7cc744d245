//! 注文組み立て
//!
//! ヘッダー行と明細行を1つの論理操作として永続化する。

use crate::db;
use crate::db::models::{NewOrderItem, Order};
use crate::error::Error;
use sqlx::SqlitePool;

/// 注文をヘッダー+明細まとめて作成する
///
/// ヘッダー挿入と各明細挿入は単一トランザクション内で実行する。
/// 明細の書き込みに失敗した場合はトランザクションごとロールバックされ、
/// 明細の欠けた注文が残ることはない。コミットまで他のセッションから
/// 作成途中の注文が観測されることもない。コミット後に明細付きで
/// 再読込した注文を返す。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `user_id` - 注文者のユーザーID
/// * `items` - 明細入力（空リストは明細ゼロ件の有効な注文になる）
///
/// # Returns
/// * `Ok(Order)` - 明細まで読み込んだ作成済み注文
/// * `Err(Error)` - 作成失敗（注文全体が取り消される）
pub async fn place_order(
    pool: &SqlitePool,
    user_id: i64,
    items: &[NewOrderItem],
) -> Result<Order, Error> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| Error::Database(format!("Failed to begin transaction: {}", e)))?;

    let order_id = db::orders::insert_header(&mut tx, user_id).await?;
    db::orders::insert_items(&mut tx, order_id, items).await?;

    tx.commit()
        .await
        .map_err(|e| Error::Database(format!("Failed to commit order: {}", e)))?;

    db::orders::get(pool, order_id)
        .await?
        .ok_or_else(|| Error::Database(format!("Order {} not found after commit", order_id)))
}
