// src/auth/sessions.rs
use crate::auth::token::SessionToken;
use crate::auth::Session;
use crate::errors::ServerError;
use rusqlite::{named_params, Connection, OptionalExtension};

/// Open a session for `user_id` lasting `ttl_secs`; returns the bearer token.
pub fn create_session(
    conn: &Connection,
    user_id: i64,
    now: i64,
    ttl_secs: i64,
) -> Result<String, ServerError> {
    let token = SessionToken::issue();

    conn.execute(
        "insert into sessions (user_id, token_hash, created_at, expires_at)
         values (:user_id, :digest, :now, :expires_at)",
        named_params! {
            ":user_id": user_id,
            ":digest": token.digest(),
            ":now": now,
            ":expires_at": now.saturating_add(ttl_secs),
        },
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(token.into_raw())
}

/// The live session a presented token belongs to, if any.
pub fn load_session(
    conn: &Connection,
    presented: &str,
    now: i64,
) -> Result<Option<Session>, ServerError> {
    let token = SessionToken::from_raw(presented);

    conn.query_row(
        "select users.id, users.email
         from sessions
         join users on users.id = sessions.user_id
         where sessions.token_hash = :digest
           and sessions.revoked_at is null
           and :now < sessions.expires_at",
        named_params! { ":digest": token.digest(), ":now": now },
        |row| {
            Ok(Session {
                user_id: row.get("id")?,
                email: row.get("email")?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}
