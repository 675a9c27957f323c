// src/roster/store.rs
use crate::domain::Member;
use crate::errors::ServerError;

/// Keyed persistence for member lists. Lists are read and written whole.
pub trait MemberStore {
    fn load(&self, owner: i64) -> Result<Vec<Member>, ServerError>;
    fn save(&self, owner: i64, members: &[Member]) -> Result<(), ServerError>;
}

#[cfg(test)]
pub use memory::InMemoryMemberStore;
