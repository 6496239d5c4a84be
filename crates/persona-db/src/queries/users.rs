//! User account queries.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::pool::{DbError, DbPool, DbResult};

/// User row from the database.
#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub hashed_password: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub linked_person_id: Option<String>,
    pub is_linked: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

const USER_COLUMNS: &str = "id, email, hashed_password, full_name, is_active,
                            linked_person_id, is_linked, created_at, updated_at";

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        email: row.get(1)?,
        hashed_password: row.get(2)?,
        full_name: row.get(3)?,
        is_active: row.get(4)?,
        linked_person_id: row.get(5)?,
        is_linked: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn fetch_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Option<UserRow>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
        params![email],
        row_to_user,
    )
    .optional()
}

/// Create a new user. Fails with [`DbError::Duplicate`] when the email is taken.
pub fn create_user(
    pool: &DbPool,
    email: &str,
    hashed_password: &str,
    full_name: Option<&str>,
) -> DbResult<UserRow> {
    pool.with_conn(|conn| {
        if fetch_by_email(conn, email)?.is_some() {
            return Err(DbError::Duplicate(format!("user: {}", email)));
        }

        conn.execute(
            "INSERT INTO users (email, hashed_password, full_name) VALUES (?1, ?2, ?3)",
            params![email, hashed_password, full_name],
        )?;

        fetch_by_email(conn, email)?
            .ok_or_else(|| DbError::NotFound(format!("user: {}", email)))
    })
}

/// Look a user up by email.
pub fn get_user_by_email(pool: &DbPool, email: &str) -> DbResult<Option<UserRow>> {
    pool.with_conn(|conn| Ok(fetch_by_email(conn, email)?))
}

/// List users with store-side pagination.
pub fn list_users(pool: &DbPool, offset: i64, limit: i64) -> DbResult<Vec<UserRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt
            .query_map(params![limit, offset], row_to_user)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    })
}

/// Record the weak back-reference from a user to its Person node.
///
/// Passing `None` clears the link.
pub fn set_person_link(pool: &DbPool, email: &str, person_id: Option<&str>) -> DbResult<()> {
    pool.with_conn(|conn| {
        let updated = conn.execute(
            "UPDATE users
             SET linked_person_id = ?2,
                 is_linked = ?3,
                 updated_at = datetime('now')
             WHERE email = ?1",
            params![email, person_id, person_id.is_some()],
        )?;

        if updated == 0 {
            return Err(DbError::NotFound(format!("user: {}", email)));
        }
        Ok(())
    })
}
