use crate::errors::{AppError, AppResult};
use crate::models::user::User;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};
use uuid::Uuid;

const SELECT_USER: &str = "SELECT id, name, token, created_at FROM users";

fn map_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        token: row.get("token")?,
        created_at: row.get("created_at")?,
    })
}

/// Create a user with a fresh random token.
pub fn insert_user(conn: &Connection, name: &str) -> AppResult<User> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::MissingFields("name".into()));
    }
    if find_by_name(conn, name)?.is_some() {
        return Err(AppError::UserExists(name.to_string()));
    }

    let token = Uuid::new_v4().simple().to_string();
    let now = Local::now().to_rfc3339();

    conn.execute(
        "INSERT INTO users (name, token, created_at) VALUES (?1, ?2, ?3)",
        params![name, token, now],
    )?;

    Ok(User {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        token,
        created_at: now,
    })
}

pub fn find_by_name(conn: &Connection, name: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_USER} WHERE name = ?1"))?;
    Ok(stmt.query_row([name.trim()], map_row).optional()?)
}

pub fn find_by_token(conn: &Connection, token: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_USER} WHERE token = ?1"))?;
    Ok(stmt.query_row([token], map_row).optional()?)
}

pub fn list_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare(&format!("{SELECT_USER} ORDER BY id ASC"))?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Replace a user's token, invalidating the old one.
pub fn rotate_token(conn: &Connection, user_id: i64) -> AppResult<String> {
    let token = Uuid::new_v4().simple().to_string();
    let changed = conn.execute(
        "UPDATE users SET token = ?1 WHERE id = ?2",
        params![token, user_id],
    )?;
    if changed == 0 {
        return Err(AppError::NotFound("User".into()));
    }
    Ok(token)
}

/// Resolve a user by name, creating it on first use.
pub fn find_or_create(conn: &Connection, name: &str) -> AppResult<User> {
    match find_by_name(conn, name)? {
        Some(u) => Ok(u),
        None => insert_user(conn, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::pool::DbPool;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn token_resolves_to_its_user() {
        let pool = pool();
        let alice = insert_user(&pool.conn, "alice").unwrap();
        let bob = insert_user(&pool.conn, "bob").unwrap();
        assert_ne!(alice.token, bob.token);

        let found = find_by_token(&pool.conn, &alice.token).unwrap().unwrap();
        assert_eq!(found.id, alice.id);
        assert!(find_by_token(&pool.conn, "nope").unwrap().is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let pool = pool();
        insert_user(&pool.conn, "alice").unwrap();
        assert!(matches!(
            insert_user(&pool.conn, " alice "),
            Err(AppError::UserExists(_))
        ));
        assert!(matches!(
            insert_user(&pool.conn, "  "),
            Err(AppError::MissingFields(_))
        ));
    }

    #[test]
    fn rotated_token_replaces_old_one() {
        let pool = pool();
        let alice = insert_user(&pool.conn, "alice").unwrap();
        let fresh = rotate_token(&pool.conn, alice.id).unwrap();
        assert!(find_by_token(&pool.conn, &alice.token).unwrap().is_none());
        assert_eq!(
            find_by_token(&pool.conn, &fresh).unwrap().unwrap().name,
            "alice"
        );
    }
}
