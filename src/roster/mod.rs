// src/roster/mod.rs
pub mod store;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::Session;
use crate::domain::{
    classify, days_remaining, preview, renew, Member, MemberStatus, MemberUpdate, NewMember,
    RenewalPreview, RenewalRequest, StatusFilter,
};
use crate::errors::ServerError;

pub use store::MemberStore;
#[cfg(test)]
pub use store::InMemoryMemberStore;

/// A member together with its status as of a given day.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    #[serde(flatten)]
    pub member: Member,
    pub status: MemberStatus,
    pub days_remaining: i64,
}

impl MemberView {
    pub fn at(member: Member, today: NaiveDate) -> Self {
        Self {
            status: classify(&member, today),
            days_remaining: days_remaining(&member, today),
            member,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemberQuery {
    pub filter: StatusFilter,
    pub search: Option<String>,
}

/// The signed-in user's member list. Every operation loads the whole list,
/// works on it in memory and, for writes, saves it back.
pub struct Roster<'a, S: MemberStore> {
    store: &'a S,
    session: &'a Session,
}

impl<'a, S: MemberStore> Roster<'a, S> {
    pub fn new(store: &'a S, session: &'a Session) -> Self {
        Self { store, session }
    }

    fn load(&self) -> Result<Vec<Member>, ServerError> {
        self.store.load(self.session.user_id)
    }

    fn save(&self, members: &[Member]) -> Result<(), ServerError> {
        self.store.save(self.session.user_id, members)
    }

    pub fn list(
        &self,
        query: &MemberQuery,
        today: NaiveDate,
    ) -> Result<Vec<MemberView>, ServerError> {
        let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

        Ok(self
            .load()?
            .into_iter()
            .filter(|m| search.map_or(true, |needle| m.name_matches(needle)))
            .map(|m| MemberView::at(m, today))
            .filter(|v| query.filter.matches(v.status))
            .collect())
    }

    pub fn get(&self, id: Uuid, today: NaiveDate) -> Result<MemberView, ServerError> {
        Ok(MemberView::at(self.find(id)?, today))
    }

    /// What a renewal would carry over and where it would end. Nothing is saved.
    pub fn preview_renewal(
        &self,
        id: Uuid,
        start_date: NaiveDate,
        duration: i64,
    ) -> Result<RenewalPreview, ServerError> {
        Ok(preview(&self.find(id)?, start_date, duration)?)
    }

    fn find(&self, id: Uuid) -> Result<Member, ServerError> {
        self.load()?
            .into_iter()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found(id))
    }

    pub fn add(&self, input: NewMember) -> Result<Member, ServerError> {
        let member = Member::create(Uuid::new_v4(), input)?;
        let mut members = self.load()?;
        members.push(member.clone());
        self.save(&members)?;

        tracing::info!(owner = self.session.user_id, member = %member.id, "member added");
        Ok(member)
    }

    pub fn update(&self, id: Uuid, changes: MemberUpdate) -> Result<Member, ServerError> {
        self.replace(id, |m| Ok(m.apply_update(changes)?))
    }

    pub fn renew(
        &self,
        id: Uuid,
        request: &RenewalRequest,
        today: NaiveDate,
    ) -> Result<Member, ServerError> {
        let renewed = self.replace(id, |m| Ok(renew(m, request, today)?))?;
        tracing::info!(
            owner = self.session.user_id,
            member = %id,
            end_date = %renewed.end_date,
            "membership renewed"
        );
        Ok(renewed)
    }

    pub fn delete(&self, id: Uuid) -> Result<(), ServerError> {
        let mut members = self.load()?;
        let before = members.len();
        members.retain(|m| m.id != id);
        if members.len() == before {
            return Err(not_found(id));
        }
        self.save(&members)?;

        tracing::info!(owner = self.session.user_id, member = %id, "member deleted");
        Ok(())
    }

    fn replace<F>(&self, id: Uuid, f: F) -> Result<Member, ServerError>
    where
        F: FnOnce(&Member) -> Result<Member, ServerError>,
    {
        let mut members = self.load()?;
        let slot = members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found(id))?;
        let updated = f(&*slot)?;
        *slot = updated.clone();
        self.save(&members)?;
        Ok(updated)
    }
}

fn not_found(id: Uuid) -> ServerError {
    ServerError::NotFound(format!("Member {id}"))
}
