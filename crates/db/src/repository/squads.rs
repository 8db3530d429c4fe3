//! Squad insert and listing.

use sqlx::MySqlConnection;

use crate::{DbError, models::SquadRow};

/// Insert a squad administered by `admin_id` and return the id MySQL assigned.
pub async fn insert_squad(conn: &mut MySqlConnection, admin_id: i64) -> Result<u64, DbError> {
    let result = sqlx::query("INSERT INTO squads (admin) VALUES (?)")
        .bind(admin_id)
        .execute(conn)
        .await?;

    Ok(result.last_insert_id())
}

/// Return every squad row, unfiltered, in the server's default order.
pub async fn list_squads(conn: &mut MySqlConnection) -> Result<Vec<SquadRow>, DbError> {
    // Casts pin the decoded types regardless of the columns' signedness.
    let rows = sqlx::query_as::<_, SquadRow>(
        "SELECT CAST(id AS UNSIGNED) AS id, CAST(admin AS SIGNED) AS admin FROM squads",
    )
    .fetch_all(conn)
    .await?;

    Ok(rows)
}
