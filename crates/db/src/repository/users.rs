//! Read-only queries against the `users` table.

use sqlx::MySqlConnection;

use crate::DbError;

/// Count the users whose primary key equals `user_id`.
pub async fn count_users_by_id(conn: &mut MySqlConnection, user_id: i64) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_one(conn)
        .await?;

    Ok(count)
}
