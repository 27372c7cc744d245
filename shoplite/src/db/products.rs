//! 商品CRUD操作

use crate::db::models::Product;
use crate::error::Error;
use sqlx::SqlitePool;

/// 商品を作成
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `name` - 商品名
/// * `price` - 価格
/// * `category` - カテゴリ
///
/// # Returns
/// * `Ok(Product)` - 生成されたIDを含む作成済み商品
/// * `Err(Error)` - 作成失敗
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    price: f64,
    category: &str,
) -> Result<Product, Error> {
    let result = sqlx::query("INSERT INTO products (name, price, category) VALUES (?, ?, ?)")
        .bind(name)
        .bind(price)
        .bind(category)
        .execute(pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to create product: {}", e)))?;

    Ok(Product {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        price,
        category: category.to_string(),
    })
}
