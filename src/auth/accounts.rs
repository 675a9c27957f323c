// src/auth/accounts.rs
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::auth::password::{hash_password, verify_password, MIN_PASSWORD_CHARS};
use crate::auth::sessions::{create_session, load_session};
use crate::auth::Session;
use crate::config::Config;
use crate::db::users;
use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct AccountConfig {
    /// Session lifetime in seconds.
    pub session_ttl_secs: i64,
    pub bcrypt_cost: u32,
}

impl From<&Config> for AccountConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            session_ttl_secs: cfg.session_ttl_secs,
            bcrypt_cost: cfg.bcrypt_cost,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Returned by register and login.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedSession {
    pub token: String,
    pub email: String,
}

pub struct AccountService {
    cfg: AccountConfig,
}

impl AccountService {
    pub fn new(cfg: AccountConfig) -> Self {
        Self { cfg }
    }

    /// Trim + lowercase, minimal sanity check.
    pub fn normalize_email(email: &str) -> Result<String, ServerError> {
        let e = email.trim().to_lowercase();
        if e.is_empty() || !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
            return Err(ServerError::BadRequest("invalid email".into()));
        }
        Ok(e)
    }

    pub fn register(
        &self,
        conn: &Connection,
        creds: &Credentials,
        now: i64,
    ) -> Result<IssuedSession, ServerError> {
        let email = Self::normalize_email(&creds.email)?;
        if creds.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ServerError::BadRequest(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }

        // Cheap check first so a duplicate doesn't pay for bcrypt.
        if users::find_user_by_email(conn, &email)?.is_some() {
            return Err(ServerError::BadRequest("User already exists".into()));
        }

        let hash = hash_password(&creds.password, self.cfg.bcrypt_cost)?;
        let Some(user_id) = users::insert_user(conn, &email, &hash, now)? else {
            return Err(ServerError::BadRequest("User already exists".into()));
        };

        let token = create_session(conn, user_id, now, self.cfg.session_ttl_secs)?;
        tracing::info!(user_id, email = %email, "account registered");

        Ok(IssuedSession { token, email })
    }

    pub fn login(
        &self,
        conn: &Connection,
        creds: &Credentials,
        now: i64,
    ) -> Result<IssuedSession, ServerError> {
        let email = Self::normalize_email(&creds.email)?;

        let Some(user) = users::find_user_by_email(conn, &email)? else {
            tracing::warn!(email = %email, "login for unknown user");
            return Err(ServerError::BadRequest("User not found".into()));
        };

        if !verify_password(&creds.password, &user.password_hash) {
            tracing::warn!(user_id = user.id, "login with wrong password");
            return Err(ServerError::BadRequest("Invalid password".into()));
        }

        users::touch_last_login(conn, user.id, now)?;
        let token = create_session(conn, user.id, now, self.cfg.session_ttl_secs)?;

        Ok(IssuedSession {
            token,
            email: user.email,
        })
    }

    /// Resolve a bearer token to the session it belongs to.
    pub fn authenticate(
        &self,
        conn: &Connection,
        token: &str,
        now: i64,
    ) -> Result<Session, ServerError> {
        load_session(conn, token, now)?
            .ok_or_else(|| ServerError::Unauthorized("Unauthorized".into()))
    }
}
