use super::domain::{GroupId, MemberCompletionRecord, MemberId, MemberProfile};

/// Authoritative store of completion records.
///
/// `upsert` is keyed on (member, instrument): a later write replaces the
/// earlier one wholesale.
pub trait ResultStore: Send + Sync {
    fn upsert(&self, record: MemberCompletionRecord) -> Result<(), RepositoryError>;
    fn member_records(
        &self,
        member: &MemberId,
    ) -> Result<Vec<MemberCompletionRecord>, RepositoryError>;
    fn group_records(&self, group: &GroupId)
        -> Result<Vec<MemberCompletionRecord>, RepositoryError>;
}

/// Lookup of member identity and group membership.
pub trait MemberDirectory: Send + Sync {
    fn profile(&self, member: &MemberId) -> Result<Option<MemberProfile>, RepositoryError>;
    fn group_members(&self, group: &GroupId) -> Result<Vec<MemberProfile>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("stored record is corrupt: {0}")]
    Corrupt(String),
}
