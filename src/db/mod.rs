pub mod connection;
pub mod members;
pub mod users;

pub use connection::{init_db, Database};
pub use members::SqliteMemberStore;
