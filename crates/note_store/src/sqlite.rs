//! SQLite note store implementation backed by sqlx.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entities::{Note, User};
use sqlx::{
    sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow},
    Row,
};
use uuid::Uuid;

use crate::{NoteStore, NoteStoreError, NoteStoreResult};

const CREATE_USERS: &str = "
CREATE TABLE IF NOT EXISTS users (
    id            TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT,
    name          TEXT,
    picture       TEXT,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
)";

const CREATE_NOTES: &str = "
CREATE TABLE IF NOT EXISTS notes (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    content    TEXT NOT NULL,
    is_edited  INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
)";

/// SQLite-backed note store.
#[derive(Debug, Clone)]
pub struct SqliteNoteStore {
    pool: SqlitePool,
}

impl SqliteNoteStore {
    /// Connects to the given database URL and creates the schema if needed.
    ///
    /// URLs follow sqlx conventions, e.g. `sqlite:notes.db?mode=rwc` or
    /// `sqlite::memory:`.
    pub async fn connect(url: &str) -> NoteStoreResult<Self> {
        // In-memory databases exist per connection; a larger pool would
        // hand out empty databases.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await?;

        let store = Self { pool };
        store.create_schema().await?;
        Ok(store)
    }

    async fn create_schema(&self) -> NoteStoreResult<()> {
        sqlx::query(CREATE_USERS).execute(&self.pool).await?;
        sqlx::query(CREATE_NOTES).execute(&self.pool).await?;
        tracing::debug!("Note store schema ready");
        Ok(())
    }
}

fn user_from_row(row: &SqliteRow) -> NoteStoreResult<User> {
    let id: String = row.try_get("id")?;
    let id: Uuid = id
        .parse()
        .map_err(|_| NoteStoreError::Other(format!("invalid user id in store: {id}")))?;

    Ok(User {
        id,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        name: row.try_get("name")?,
        picture: row.try_get("picture")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

fn note_from_row(row: &SqliteRow) -> NoteStoreResult<Note> {
    Ok(Note {
        id: row.try_get("id")?,
        content: row.try_get("content")?,
        is_edited: row.try_get("is_edited")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[async_trait]
impl NoteStore for SqliteNoteStore {
    async fn create_user(&self, user: User) -> NoteStoreResult<User> {
        let result = sqlx::query(
            "INSERT INTO users (id, email, password_hash, name, picture, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.picture)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(NoteStoreError::already_exists("User", user.email))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_user(&self, id: Uuid) -> NoteStoreResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_user_by_email(&self, email: &str) -> NoteStoreResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn create_note(&self, content: &str) -> NoteStoreResult<Note> {
        let created_at = Utc::now();
        let result = sqlx::query("INSERT INTO notes (content, is_edited, created_at) VALUES (?, 0, ?)")
            .bind(content)
            .bind(created_at)
            .execute(&self.pool)
            .await?;

        Ok(Note {
            id: result.last_insert_rowid(),
            content: content.to_string(),
            is_edited: false,
            created_at,
        })
    }

    async fn get_note(&self, id: i64) -> NoteStoreResult<Option<Note>> {
        let row = sqlx::query("SELECT * FROM notes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(note_from_row).transpose()
    }

    async fn list_notes(&self) -> NoteStoreResult<Vec<Note>> {
        let rows = sqlx::query("SELECT * FROM notes ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(note_from_row).collect()
    }

    async fn update_note(&self, id: i64, content: &str) -> NoteStoreResult<Note> {
        let result = sqlx::query("UPDATE notes SET content = ?, is_edited = 1 WHERE id = ?")
            .bind(content)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(NoteStoreError::not_found("Note", id.to_string()));
        }

        self.get_note(id)
            .await?
            .ok_or_else(|| NoteStoreError::not_found("Note", id.to_string()))
    }

    async fn delete_note(&self, id: i64) -> NoteStoreResult<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(NoteStoreError::not_found("Note", id.to_string()));
        }
        Ok(())
    }
}
