use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use wellbeing_pulse::assessments::{
    AnswerSet, GroupId, Instrument, MemberCompletionRecord, MemberDirectory, MemberId,
    MemberProfile, RepositoryError, ResultSerializer, ResultStore, StoreRow,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{what} lock poisoned")))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryMemberDirectory {
    profiles: Arc<Mutex<BTreeMap<MemberId, MemberProfile>>>,
}

impl InMemoryMemberDirectory {
    pub(crate) fn register(&self, profile: MemberProfile) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.profiles, "member directory")?;
        guard.insert(profile.member_id.clone(), profile);
        Ok(())
    }
}

impl MemberDirectory for InMemoryMemberDirectory {
    fn profile(&self, member: &MemberId) -> Result<Option<MemberProfile>, RepositoryError> {
        let guard = lock(&self.profiles, "member directory")?;
        Ok(guard.get(member).cloned())
    }

    fn group_members(&self, group: &GroupId) -> Result<Vec<MemberProfile>, RepositoryError> {
        let guard = lock(&self.profiles, "member directory")?;
        Ok(guard
            .values()
            .filter(|profile| &profile.group_id == group)
            .cloned()
            .collect())
    }
}

/// Result store keeping the persisted row layout, one row per member and instrument.
#[derive(Clone)]
pub(crate) struct InMemoryResultStore {
    directory: Arc<InMemoryMemberDirectory>,
    rows: Arc<Mutex<BTreeMap<(MemberId, Instrument), StoreRow>>>,
}

impl InMemoryResultStore {
    pub(crate) fn new(directory: Arc<InMemoryMemberDirectory>) -> Self {
        Self {
            directory,
            rows: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    fn decode<'a, I>(rows: I) -> Result<Vec<MemberCompletionRecord>, RepositoryError>
    where
        I: IntoIterator<Item = &'a StoreRow>,
    {
        rows.into_iter()
            .map(|row| {
                ResultSerializer::from_store_row(row)
                    .map_err(|err| RepositoryError::Corrupt(err.to_string()))
            })
            .collect()
    }
}

impl ResultStore for InMemoryResultStore {
    fn upsert(&self, record: MemberCompletionRecord) -> Result<(), RepositoryError> {
        let row = ResultSerializer::to_store_row(&record)
            .map_err(|err| RepositoryError::Corrupt(err.to_string()))?;
        let mut guard = lock(&self.rows, "result store")?;
        guard.insert((record.member_id.clone(), record.instrument()), row);
        Ok(())
    }

    fn member_records(
        &self,
        member: &MemberId,
    ) -> Result<Vec<MemberCompletionRecord>, RepositoryError> {
        let guard = lock(&self.rows, "result store")?;
        Self::decode(guard.values().filter(|row| row.member_id == member.0))
    }

    fn group_records(
        &self,
        group: &GroupId,
    ) -> Result<Vec<MemberCompletionRecord>, RepositoryError> {
        let members = self.directory.group_members(group)?;
        let guard = lock(&self.rows, "result store")?;
        Self::decode(guard.values().filter(|row| {
            members
                .iter()
                .any(|profile| profile.member_id.0 == row.member_id)
        }))
    }
}

/// Parses a comma separated response list, question 0 first.
pub(crate) fn parse_answers(raw: &str) -> Result<AnswerSet, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .enumerate()
        .map(|(question, value)| {
            let response = value.parse::<u8>().map_err(|err| {
                format!("response {} ('{value}') is not a number ({err})", question + 1)
            })?;
            Ok((question, response))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use wellbeing_pulse::assessments::{MemberRole, PerceptionScore, ScoreObject};

    fn profile(id: &str, group: &str) -> MemberProfile {
        MemberProfile {
            member_id: MemberId(id.to_string()),
            group_id: GroupId(group.to_string()),
            name: "Rowan".to_string(),
            surname: "Hale".to_string(),
            email: format!("{id}@example.org"),
            role: MemberRole::Employee,
        }
    }

    fn perception_record(id: &str, minute: u32) -> MemberCompletionRecord {
        MemberCompletionRecord::new(
            MemberId(id.to_string()),
            ScoreObject::Perception(PerceptionScore {
                visual: 4,
                auditory: 3,
                kinesthetic: 2,
                digital: 1,
            }),
            Utc.with_ymd_and_hms(2025, 4, 1, 8, minute, 0)
                .single()
                .expect("valid timestamp"),
        )
    }

    #[test]
    fn store_upserts_by_member_and_instrument() {
        let directory = Arc::new(InMemoryMemberDirectory::default());
        directory
            .register(profile("m-1", "ops"))
            .expect("profile registered");
        let store = InMemoryResultStore::new(directory);

        store
            .upsert(perception_record("m-1", 0))
            .expect("first write");
        store
            .upsert(perception_record("m-1", 30))
            .expect("second write");

        let records = store
            .member_records(&MemberId("m-1".to_string()))
            .expect("records readable");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], perception_record("m-1", 30));
    }

    #[test]
    fn group_records_follow_directory_membership() {
        let directory = Arc::new(InMemoryMemberDirectory::default());
        directory.register(profile("m-1", "ops")).expect("registered");
        directory
            .register(profile("m-2", "finance"))
            .expect("registered");
        let store = InMemoryResultStore::new(directory);
        store.upsert(perception_record("m-1", 0)).expect("write");
        store.upsert(perception_record("m-2", 0)).expect("write");
        store.upsert(perception_record("m-9", 0)).expect("write");

        let records = store
            .group_records(&GroupId("ops".to_string()))
            .expect("records readable");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].member_id, MemberId("m-1".to_string()));
    }

    #[test]
    fn parses_comma_separated_answers() {
        let answers = parse_answers("3, 1,0 ,2").expect("answers parse");
        assert_eq!(answers.len(), 4);
        assert_eq!(answers.get(1), Some(1));
        assert_eq!(answers.get(3), Some(2));

        let error = parse_answers("3,x").expect_err("non numeric rejected");
        assert!(error.contains("response 2"));
    }
}
