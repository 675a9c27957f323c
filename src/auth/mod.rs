pub mod accounts;
pub mod password;
pub mod sessions;
pub mod token;

pub use accounts::{AccountConfig, AccountService, Credentials};

/// The authenticated caller, passed explicitly to anything user-scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub email: String,
}
