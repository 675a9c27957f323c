// src/db/members.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::Member;
use crate::errors::ServerError;
use crate::roster::MemberStore;

/// Member lists persisted wholesale, one JSON document per user.
pub struct SqliteMemberStore<'c> {
    conn: &'c Connection,
    now: i64,
}

impl<'c> SqliteMemberStore<'c> {
    /// `now` is stamped as `updated_at` on save.
    pub fn new(conn: &'c Connection, now: i64) -> Self {
        Self { conn, now }
    }
}

impl MemberStore for SqliteMemberStore<'_> {
    fn load(&self, owner: i64) -> Result<Vec<Member>, ServerError> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "select members from member_lists where user_id = ?",
                params![owner],
                |r| r.get(0),
            )
            .optional()
            .map_err(|e| ServerError::DbError(format!("load member list failed: {e}")))?;

        match raw {
            None => Ok(Vec::new()),
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| ServerError::DbError(format!("decode member list failed: {e}"))),
        }
    }

    fn save(&self, owner: i64, members: &[Member]) -> Result<(), ServerError> {
        let json = serde_json::to_string(members)
            .map_err(|e| ServerError::DbError(format!("encode member list failed: {e}")))?;

        self.conn
            .execute(
                r#"
                insert into member_lists (user_id, members, updated_at)
                values (?, ?, ?)
                on conflict(user_id) do update set
                  members = excluded.members,
                  updated_at = excluded.updated_at
                "#,
                params![owner, json, self.now],
            )
            .map_err(|e| ServerError::DbError(format!("save member list failed: {e}")))?;
        Ok(())
    }
}
