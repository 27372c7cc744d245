//! 注文・注文明細のCRUD操作
//!
//! ヘッダー挿入と明細挿入はトランザクションを受け取る独立した操作で、
//! 呼び出し順の制御は注文組み立て側（`crate::orders`）が担う。

use crate::db::models::{ItemDetails, NewOrderItem, Order, OrderDetails, OrderItem};
use crate::error::Error;
use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};

/// 注文ヘッダーを挿入し、生成された注文IDを返す
///
/// `order_date` はこの時点のサーバー時刻が割り当てられる。
/// ユーザーの存在チェックは行わない（制約はストレージ層に委譲）。
///
/// # Arguments
/// * `tx` - 実行中のトランザクション
/// * `user_id` - 注文者のユーザーID
///
/// # Returns
/// * `Ok(i64)` - 生成された注文ID
/// * `Err(Error)` - 挿入失敗
pub async fn insert_header(tx: &mut Transaction<'_, Sqlite>, user_id: i64) -> Result<i64, Error> {
    let order_date = Utc::now();

    let result = sqlx::query("INSERT INTO orders (user_id, order_date) VALUES (?, ?)")
        .bind(user_id)
        .bind(order_date.to_rfc3339())
        .execute(&mut **tx)
        .await
        .map_err(|e| Error::Database(format!("Failed to create order: {}", e)))?;

    Ok(result.last_insert_rowid())
}

/// 注文明細を一括挿入する
///
/// # Arguments
/// * `tx` - 実行中のトランザクション
/// * `order_id` - 親注文のID
/// * `items` - 明細入力（空でも可）
///
/// # Returns
/// * `Ok(())` - 全明細の挿入成功
/// * `Err(Error)` - いずれかの明細の挿入失敗
pub async fn insert_items(
    tx: &mut Transaction<'_, Sqlite>,
    order_id: i64,
    items: &[NewOrderItem],
) -> Result<(), Error> {
    for item in items {
        sqlx::query("INSERT INTO order_items (order_id, product_id, quantity) VALUES (?, ?, ?)")
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .execute(&mut **tx)
            .await
            .map_err(|e| Error::Database(format!("Failed to create order item: {}", e)))?;
    }

    Ok(())
}

/// 注文を明細付きで取得
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `order_id` - 注文ID
///
/// # Returns
/// * `Ok(Some(Order))` - 明細まで読み込んだ注文
/// * `Ok(None)` - 注文が存在しない
/// * `Err(Error)` - 取得失敗
pub async fn get(pool: &SqlitePool, order_id: i64) -> Result<Option<Order>, Error> {
    let rows = sqlx::query_as::<_, OrderRow>(
        "SELECT o.id AS order_id, o.user_id, o.order_date, \
                i.id AS item_id, i.product_id, i.quantity \
         FROM orders o \
         LEFT JOIN order_items i ON i.order_id = o.id \
         WHERE o.id = ? \
         ORDER BY i.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await
    .map_err(|e| Error::Database(format!("Failed to load order: {}", e)))?;

    let first = match rows.first() {
        Some(row) => row,
        None => return Ok(None),
    };

    let mut order = Order {
        id: first.order_id,
        user_id: first.user_id,
        order_date: parse_order_date(&first.order_date),
        items: Vec::new(),
    };
    for row in &rows {
        if let (Some(id), Some(product_id), Some(quantity)) =
            (row.item_id, row.product_id, row.quantity)
        {
            order.items.push(OrderItem {
                id,
                product_id,
                quantity,
            });
        }
    }

    Ok(Some(order))
}

/// 指定ユーザーの全注文を、明細と商品名込みで取得
///
/// 注文・明細・商品を1クエリで結合し、メモリ上でグルーピングする。
/// 呼び出し側は完全に展開されたオブジェクトグラフを受け取る
/// （注文件数分の追加クエリは発生しない）。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `user_id` - 注文者のユーザーID
///
/// # Returns
/// * `Ok(Vec<OrderDetails>)` - 注文一覧（明細ゼロ件の注文も含む）
/// * `Err(Error)` - 取得失敗
pub async fn list_for_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<OrderDetails>, Error> {
    let rows = sqlx::query_as::<_, OrderDetailsRow>(
        "SELECT o.id AS order_id, o.user_id, o.order_date, \
                i.id AS item_id, i.product_id, i.quantity, p.name AS product_name \
         FROM orders o \
         LEFT JOIN order_items i ON i.order_id = o.id \
         LEFT JOIN products p ON p.id = i.product_id \
         WHERE o.user_id = ? \
         ORDER BY o.id, i.id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| Error::Database(format!("Failed to load orders: {}", e)))?;

    let mut orders: Vec<OrderDetails> = Vec::new();
    for row in rows {
        if orders.last().map(|o| o.id) != Some(row.order_id) {
            orders.push(OrderDetails {
                id: row.order_id,
                user_id: row.user_id,
                order_date: parse_order_date(&row.order_date),
                items: Vec::new(),
            });
        }
        if let (Some(current), Some(id), Some(product_id), Some(quantity)) =
            (orders.last_mut(), row.item_id, row.product_id, row.quantity)
        {
            current.items.push(ItemDetails {
                id,
                product_id,
                quantity,
                product_name: row.product_name.unwrap_or_default(),
            });
        }
    }

    Ok(orders)
}

// 自前で書き込んだRFC 3339文字列のみを読むため、パース失敗はデータ破損
fn parse_order_date(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .unwrap()
        .with_timezone(&Utc)
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: i64,
    user_id: i64,
    order_date: String,
    item_id: Option<i64>,
    product_id: Option<i64>,
    quantity: Option<i64>,
}

#[derive(sqlx::FromRow)]
struct OrderDetailsRow {
    order_id: i64,
    user_id: i64,
    order_date: String,
    item_id: Option<i64>,
    product_id: Option<i64>,
    quantity: Option<i64>,
    product_name: Option<String>,
}
