use std::collections::HashMap;

use astra::Request;
use chrono::{Local, Utc};
use rusqlite::Connection;
use serde_json::json;
use uuid::Uuid;

use crate::auth::token::bearer_token;
use crate::auth::Credentials;
use crate::db::SqliteMemberStore;
use crate::domain::{
    parse_date, MemberUpdate, NewMember, RenewalRequest, StatusFilter, DURATION_PRESETS,
};
use crate::errors::{ResultResp, ServerError};
use crate::responses::{json_response, read_json};
use crate::roster::{MemberQuery, Roster};
use crate::state::AppState;

/// Renewal length assumed when a preview request doesn't name one.
const DEFAULT_DURATION_DAYS: i64 = 30;

pub fn handle(mut req: Request, app: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["health"]) => json_response(200, &json!({ "status": "ok" })),

        ("POST", ["api", "auth", "register"]) => {
            let creds: Credentials = read_json(&mut req)?;
            let issued = app
                .db
                .with_conn(|conn| app.accounts.register(conn, &creds, now_unix()))?;
            json_response(200, &issued)
        }
        ("POST", ["api", "auth", "login"]) => {
            let creds: Credentials = read_json(&mut req)?;
            let issued = app
                .db
                .with_conn(|conn| app.accounts.login(conn, &creds, now_unix()))?;
            json_response(200, &issued)
        }

        ("GET", ["api", "durations"]) => json_response(200, &DURATION_PRESETS),

        (method, ["api", "members", rest @ ..]) => members_api(&mut req, app, method, rest),

        (_, ["health"] | ["api", "auth", "register" | "login"] | ["api", "durations"]) => {
            Err(ServerError::MethodNotAllowed)
        }
        _ => Err(ServerError::NotFound("Route".into())),
    }
}

/// `/api/members/**`, all of which need a bearer token.
fn members_api(req: &mut Request, app: &AppState, method: &str, rest: &[&str]) -> ResultResp {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_owned)
        .ok_or_else(|| ServerError::Unauthorized("Unauthorized".into()))?;

    let now = now_unix();
    let query = parse_query(req);

    app.db.with_conn(|conn| {
        let session = app.accounts.authenticate(conn, &token, now)?;
        let today = match query.get("asOf") {
            Some(raw) => parse_date(raw)?,
            None => Local::now().date_naive(),
        };

        match (method, rest) {
            ("GET", []) => {
                let filter = query
                    .get("filter")
                    .map(|f| f.parse::<StatusFilter>())
                    .transpose()
                    .map_err(ServerError::BadRequest)?
                    .unwrap_or_default();
                let member_query = MemberQuery {
                    filter,
                    search: query.get("q").cloned(),
                };
                let store = SqliteMemberStore::new(conn, now);
                let members = Roster::new(&store, &session).list(&member_query, today)?;
                json_response(200, &members)
            }
            ("POST", []) => {
                let input: NewMember = read_json(req)?;
                let member =
                    write_roster(conn, now, |store| Roster::new(store, &session).add(input))?;
                json_response(200, &member)
            }
            ("GET", [id]) => {
                let id = parse_member_id(id)?;
                let store = SqliteMemberStore::new(conn, now);
                let member = Roster::new(&store, &session).get(id, today)?;
                json_response(200, &member)
            }
            ("PUT", [id]) => {
                let id = parse_member_id(id)?;
                let changes: MemberUpdate = read_json(req)?;
                let member = write_roster(conn, now, |store| {
                    Roster::new(store, &session).update(id, changes)
                })?;
                json_response(200, &member)
            }
            ("DELETE", [id]) => {
                let id = parse_member_id(id)?;
                write_roster(conn, now, |store| Roster::new(store, &session).delete(id))?;
                json_response(200, &json!({ "success": true }))
            }
            ("POST", [id, "renew"]) => {
                let id = parse_member_id(id)?;
                let request: RenewalRequest = read_json(req)?;
                let member = write_roster(conn, now, |store| {
                    Roster::new(store, &session).renew(id, &request, today)
                })?;
                json_response(200, &member)
            }
            ("GET", [id, "renewal-preview"]) => {
                let id = parse_member_id(id)?;
                let start_date = match query.get("startDate") {
                    Some(raw) => parse_date(raw)?,
                    None => today,
                };
                let duration = match query.get("duration") {
                    Some(raw) => raw.parse::<i64>().map_err(|_| {
                        ServerError::BadRequest(format!("invalid duration {raw:?}"))
                    })?,
                    None => DEFAULT_DURATION_DAYS,
                };
                let store = SqliteMemberStore::new(conn, now);
                let preview =
                    Roster::new(&store, &session).preview_renewal(id, start_date, duration)?;
                json_response(200, &preview)
            }
            (_, [] | [_] | [_, "renew" | "renewal-preview"]) => {
                Err(ServerError::MethodNotAllowed)
            }
            _ => Err(ServerError::NotFound("Route".into())),
        }
    })
}

/// Run a roster write inside one transaction so the load/save pair is atomic.
fn write_roster<T, F>(conn: &mut Connection, now: i64, f: F) -> Result<T, ServerError>
where
    F: FnOnce(&SqliteMemberStore<'_>) -> Result<T, ServerError>,
{
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    let out = {
        let store = SqliteMemberStore::new(&tx, now);
        f(&store)?
    };

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;
    Ok(out)
}

fn parse_member_id(raw: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(raw).map_err(|_| ServerError::BadRequest(format!("invalid member id {raw:?}")))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

fn now_unix() -> i64 {
    Utc::now().timestamp()
}
