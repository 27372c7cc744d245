//! ドメインモデル定義

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ユーザー
///
/// 作成後は不変（更新経路は存在しない）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// ユーザーID
    pub id: i64,
    /// 表示名
    pub name: String,
    /// メールアドレス
    pub email: String,
    /// ロール
    pub role: String,
}

/// 商品
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// 商品ID
    pub id: i64,
    /// 商品名
    pub name: String,
    /// 価格
    pub price: f64,
    /// カテゴリ
    pub category: String,
}

/// 注文明細
///
/// 親注文の作成時に一括で作られ、単独では存在しない。
/// `order_id` はストレージ列のみでワイヤー形式には含まれない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// 明細ID
    pub id: i64,
    /// 商品ID
    pub product_id: i64,
    /// 数量
    pub quantity: i64,
}

/// 注文（明細付き）
///
/// 明細ゼロ件の空注文も有効。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// 注文ID
    pub id: i64,
    /// 注文者のユーザーID
    pub user_id: i64,
    /// 注文日時（サーバー側で挿入時に割り当て）
    pub order_date: DateTime<Utc>,
    /// 注文明細
    pub items: Vec<OrderItem>,
}

/// 注文作成時の明細入力（商品ID + 数量）
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrderItem {
    /// 商品ID
    pub product_id: i64,
    /// 数量
    pub quantity: i64,
}

/// 商品名を含む注文明細（サマリー射影用）
#[derive(Debug, Clone)]
pub struct ItemDetails {
    /// 明細ID
    pub id: i64,
    /// 商品ID
    pub product_id: i64,
    /// 数量
    pub quantity: i64,
    /// 商品の表示名
    pub product_name: String,
}

/// 明細と商品名まで読み込んだ注文（サマリー射影用）
#[derive(Debug, Clone)]
pub struct OrderDetails {
    /// 注文ID
    pub id: i64,
    /// 注文者のユーザーID
    pub user_id: i64,
    /// 注文日時
    pub order_date: DateTime<Utc>,
    /// 明細（商品名込み）
    pub items: Vec<ItemDetails>,
}
