//! ユーザーCRUD操作

use crate::db::models::User;
use crate::error::Error;
use sqlx::SqlitePool;

/// ユーザーを作成
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `name` - 表示名
/// * `email` - メールアドレス（アプリケーション層では重複チェックしない）
/// * `role` - ロール
///
/// # Returns
/// * `Ok(User)` - 生成されたIDを含む作成済みユーザー
/// * `Err(Error)` - 作成失敗
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    role: &str,
) -> Result<User, Error> {
    let result = sqlx::query("INSERT INTO users (name, email, role) VALUES (?, ?, ?)")
        .bind(name)
        .bind(email)
        .bind(role)
        .execute(pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to create user: {}", e)))?;

    Ok(User {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
    })
}

/// すべてのユーザーを取得
///
/// # Arguments
/// * `pool` - データベース接続プール
///
/// # Returns
/// * `Ok(Vec<User>)` - ユーザー一覧（格納順）
/// * `Err(Error)` - 取得失敗
pub async fn list(pool: &SqlitePool) -> Result<Vec<User>, Error> {
    let rows = sqlx::query_as::<_, UserRow>("SELECT id, name, email, role FROM users ORDER BY id")
        .fetch_all(pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to list users: {}", e)))?;

    Ok(rows.into_iter().map(|r| r.into_user()).collect())
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    role: String,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            role: self.role,
        }
    }
}
