use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::assessments::domain::{
    AnswerSet, GroupId, Instrument, MemberCompletionRecord, MemberId, MemberProfile, MemberRole,
};
use crate::assessments::repository::{MemberDirectory, RepositoryError, ResultStore};
use crate::assessments::scoring::{
    option_for, BurnoutScore, Channel, PerceptionScore, PreferenceScore, ScoreObject, Subscale,
};
use crate::assessments::service::AssessmentService;
use crate::config::AssessmentConfig;

pub(super) fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0)
        .single()
        .expect("valid timestamp")
        + Duration::minutes(minutes)
}

pub(super) fn member(id: &str) -> MemberId {
    MemberId(id.to_string())
}

pub(super) fn group() -> GroupId {
    GroupId("northwind-ops".to_string())
}

pub(super) fn profile(id: &str, name: &str, surname: &str) -> MemberProfile {
    MemberProfile {
        member_id: member(id),
        group_id: group(),
        name: name.to_string(),
        surname: surname.to_string(),
        email: format!("{}.{}@northwind.example", name, surname).to_ascii_lowercase(),
        role: MemberRole::Employee,
    }
}

/// Burnout answers whose points add up to `total`, filling items in order.
pub(super) fn burnout_answers_with_total(total: u16) -> AnswerSet {
    assert!(total <= 132, "burnout total out of range");
    let mut remaining = total;
    let mut answers = AnswerSet::new();

    for question in 0..Instrument::Burnout.question_count() {
        let points = remaining.min(6) as u8;
        remaining -= points as u16;
        let raw = if Subscale::Accomplishment.items().contains(&question) {
            6 - points
        } else {
            points
        };
        answers.insert(question, raw);
    }

    answers
}

/// Burnout answers with one raw response per sub-scale.
pub(super) fn burnout_answers(exhaustion: u8, detachment: u8, accomplishment: u8) -> AnswerSet {
    let mut answers = AnswerSet::new();
    for (subscale, raw) in [
        (Subscale::Exhaustion, exhaustion),
        (Subscale::Detachment, detachment),
        (Subscale::Accomplishment, accomplishment),
    ] {
        for question in subscale.items() {
            answers.insert(question, raw);
        }
    }
    answers
}

pub(super) fn perception_answers(choices: [Channel; 10]) -> AnswerSet {
    choices
        .iter()
        .enumerate()
        .map(|(question, channel)| {
            let option = option_for(question, *channel).expect("every channel offered");
            (question, option)
        })
        .collect()
}

pub(super) fn preference_answers(raw: [u8; 8]) -> AnswerSet {
    AnswerSet::from_responses(raw)
}

pub(super) fn burnout_record(id: &str, total: u16, minutes: i64) -> MemberCompletionRecord {
    let exhaustion = total.min(54);
    let detachment = (total - exhaustion).min(30);
    let accomplishment = total - exhaustion - detachment;
    MemberCompletionRecord::new(
        member(id),
        ScoreObject::Burnout(BurnoutScore::from_subscales(
            exhaustion,
            detachment,
            accomplishment,
        )),
        at(minutes),
    )
}

pub(super) fn perception_record(
    id: &str,
    counts: [u8; 4],
    minutes: i64,
) -> MemberCompletionRecord {
    MemberCompletionRecord::new(
        member(id),
        ScoreObject::Perception(PerceptionScore {
            visual: counts[0],
            auditory: counts[1],
            kinesthetic: counts[2],
            digital: counts[3],
        }),
        at(minutes),
    )
}

pub(super) fn preference_record(id: &str, axes: [u8; 4], minutes: i64) -> MemberCompletionRecord {
    MemberCompletionRecord::new(
        member(id),
        ScoreObject::Preference(PreferenceScore {
            energy: axes[0],
            focus: axes[1],
            decisions: axes[2],
            structure: axes[3],
        }),
        at(minutes),
    )
}

#[derive(Default)]
pub(super) struct TestDirectory {
    profiles: Mutex<HashMap<MemberId, MemberProfile>>,
}

impl TestDirectory {
    pub(super) fn with_profiles(profiles: Vec<MemberProfile>) -> Self {
        let directory = Self::default();
        {
            let mut guard = directory.profiles.lock().expect("directory mutex poisoned");
            for profile in profiles {
                guard.insert(profile.member_id.clone(), profile);
            }
        }
        directory
    }
}

impl MemberDirectory for TestDirectory {
    fn profile(&self, member: &MemberId) -> Result<Option<MemberProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("directory mutex poisoned");
        Ok(guard.get(member).cloned())
    }

    fn group_members(&self, group: &GroupId) -> Result<Vec<MemberProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("directory mutex poisoned");
        let mut members: Vec<MemberProfile> = guard
            .values()
            .filter(|profile| &profile.group_id == group)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.member_id.cmp(&b.member_id));
        Ok(members)
    }
}

pub(super) struct TestStore {
    directory: Arc<TestDirectory>,
    records: Mutex<HashMap<(MemberId, Instrument), MemberCompletionRecord>>,
    pub(super) writes: Mutex<usize>,
}

impl TestStore {
    pub(super) fn new(directory: Arc<TestDirectory>) -> Self {
        Self {
            directory,
            records: Mutex::new(HashMap::new()),
            writes: Mutex::new(0),
        }
    }
}

impl ResultStore for TestStore {
    fn upsert(&self, record: MemberCompletionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert((record.member_id.clone(), record.instrument()), record);
        *self.writes.lock().expect("store mutex poisoned") += 1;
        Ok(())
    }

    fn member_records(
        &self,
        member: &MemberId,
    ) -> Result<Vec<MemberCompletionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.member_id == member)
            .cloned()
            .collect())
    }

    fn group_records(
        &self,
        group: &GroupId,
    ) -> Result<Vec<MemberCompletionRecord>, RepositoryError> {
        let members = self.directory.group_members(group)?;
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| {
                members
                    .iter()
                    .any(|profile| profile.member_id == record.member_id)
            })
            .cloned()
            .collect())
    }
}

pub(super) type TestService = AssessmentService<TestStore, TestDirectory>;

pub(super) fn service_with(
    profiles: Vec<MemberProfile>,
    config: AssessmentConfig,
) -> (Arc<TestService>, Arc<TestStore>) {
    let directory = Arc::new(TestDirectory::with_profiles(profiles));
    let store = Arc::new(TestStore::new(directory.clone()));
    let service = Arc::new(AssessmentService::new(store.clone(), directory, config));
    (service, store)
}

pub(super) fn default_service() -> (Arc<TestService>, Arc<TestStore>) {
    service_with(
        vec![
            profile("m-001", "Avery", "Lee"),
            profile("m-002", "Jules", "Moreno"),
            profile("m-003", "Kiara", "Patel"),
        ],
        AssessmentConfig::default(),
    )
}
