use crate::infra::{InMemoryMemberDirectory, InMemoryResultStore};
use crate::report::render_snapshot;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use wellbeing_pulse::assessments::scoring::{option_for, Subscale};
use wellbeing_pulse::assessments::{
    AnswerSet, AssessmentService, AssessmentServiceError, Channel, GroupId, Instrument, MemberId,
    MemberProfile, MemberRole,
};
use wellbeing_pulse::config::AssessmentConfig;
use wellbeing_pulse::error::AppError;

pub(crate) const DEMO_GROUP: &str = "demo-cohort";

type DemoService = AssessmentService<InMemoryResultStore, InMemoryMemberDirectory>;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Group identifier for the seeded cohort
    #[arg(long, default_value = DEMO_GROUP)]
    pub(crate) group: String,
    /// Write the CSV export to this path instead of printing it
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

struct DemoMember {
    id: &'static str,
    name: &'static str,
    surname: &'static str,
    role: MemberRole,
    /// Raw responses for exhaustion, detachment, and accomplishment items.
    burnout: Option<(u8, u8, u8)>,
    perception: Option<(Channel, Channel)>,
    preference: Option<[u8; 8]>,
}

const DEMO_MEMBERS: [DemoMember; 7] = [
    DemoMember {
        id: "m-101",
        name: "Noor",
        surname: "Haddad",
        role: MemberRole::Manager,
        burnout: Some((1, 0, 6)),
        perception: Some((Channel::Visual, Channel::Digital)),
        preference: Some([5, 1, 4, 2, 1, 5, 2, 4]),
    },
    DemoMember {
        id: "m-102",
        name: "Tomas",
        surname: "Berg",
        role: MemberRole::Employee,
        burnout: Some((2, 1, 5)),
        perception: Some((Channel::Auditory, Channel::Visual)),
        preference: None,
    },
    DemoMember {
        id: "m-103",
        name: "Ines",
        surname: "Duarte",
        role: MemberRole::Employee,
        burnout: Some((3, 2, 4)),
        perception: Some((Channel::Kinesthetic, Channel::Auditory)),
        preference: Some([2, 4, 5, 3, 4, 2, 1, 5]),
    },
    DemoMember {
        id: "m-104",
        name: "Kai",
        surname: "Nakamura",
        role: MemberRole::Employee,
        burnout: Some((4, 3, 3)),
        perception: Some((Channel::Digital, Channel::Kinesthetic)),
        preference: None,
    },
    DemoMember {
        id: "m-105",
        name: "Lena",
        surname: "Fischer",
        role: MemberRole::Administrator,
        burnout: Some((5, 4, 2)),
        perception: None,
        preference: None,
    },
    DemoMember {
        id: "m-106",
        name: "Omar",
        surname: "Said",
        role: MemberRole::Employee,
        burnout: Some((6, 5, 1)),
        perception: None,
        preference: None,
    },
    DemoMember {
        id: "m-107",
        name: "Priya",
        surname: "Raman",
        role: MemberRole::Employee,
        burnout: None,
        perception: None,
        preference: None,
    },
];

impl DemoMember {
    fn profile(&self, group: &GroupId) -> MemberProfile {
        MemberProfile {
            member_id: MemberId(self.id.to_string()),
            group_id: group.clone(),
            name: self.name.to_string(),
            surname: self.surname.to_string(),
            email: format!(
                "{}.{}@pulse.example",
                self.name.to_ascii_lowercase(),
                self.surname.to_ascii_lowercase()
            ),
            role: self.role,
        }
    }
}

fn burnout_answers((exhaustion, detachment, accomplishment): (u8, u8, u8)) -> AnswerSet {
    Subscale::ordered()
        .into_iter()
        .zip([exhaustion, detachment, accomplishment])
        .flat_map(|(subscale, raw)| {
            subscale
                .items()
                .into_iter()
                .map(move |question| (question, raw))
        })
        .collect()
}

/// Every third question goes to the secondary channel.
fn perception_answers((primary, secondary): (Channel, Channel)) -> AnswerSet {
    (0..Instrument::Perception.question_count())
        .filter_map(|question| {
            let channel = if question % 3 == 2 { secondary } else { primary };
            option_for(question, channel).map(|option| (question, option))
        })
        .collect()
}

fn preference_answers(responses: [u8; 8]) -> AnswerSet {
    AnswerSet::from_responses(responses)
}

/// Registers the demo roster and submits its answers. Returns the roster size.
pub(crate) fn seed_demo_cohort(
    directory: &InMemoryMemberDirectory,
    service: &DemoService,
    group: &GroupId,
    now: DateTime<Utc>,
) -> Result<usize, AppError> {
    for member in &DEMO_MEMBERS {
        let profile = member.profile(group);
        let member_id = profile.member_id.clone();
        directory
            .register(profile)
            .map_err(AssessmentServiceError::from)?;

        if let Some(levels) = member.burnout {
            service.submit(
                &member_id,
                Instrument::Burnout,
                &burnout_answers(levels),
                now - Duration::minutes(60),
            )?;
        }
        if let Some(channels) = member.perception {
            service.submit(
                &member_id,
                Instrument::Perception,
                &perception_answers(channels),
                now - Duration::minutes(30),
            )?;
        }
        if let Some(responses) = member.preference {
            service.submit(
                &member_id,
                Instrument::Preference,
                &preference_answers(responses),
                now - Duration::minutes(10),
            )?;
        }
    }

    Ok(DEMO_MEMBERS.len())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { group, out } = args;
    let group = GroupId(group);

    let directory = Arc::new(InMemoryMemberDirectory::default());
    let store = Arc::new(InMemoryResultStore::new(directory.clone()));
    let service = AssessmentService::new(store, directory.clone(), AssessmentConfig::default());

    println!("Wellbeing pulse demo ({group})");
    let seeded = seed_demo_cohort(&directory, &service, &group, Utc::now())?;
    println!("Seeded {seeded} members\n");

    println!("Member progress");
    for member in &DEMO_MEMBERS {
        let member_id = MemberId(member.id.to_string());
        let progress = service.progress(&member_id)?;
        println!(
            "  - {} {}: {}% (perception {}, preference {})",
            member.name,
            member.surname,
            progress.percentage,
            progress.unlock_state.perception.label(),
            progress.unlock_state.preference.label(),
        );
    }

    let snapshot = service.cohort_snapshot(&group)?;
    println!("\n{}", render_snapshot(&snapshot));

    let export = service.export_csv(&group)?;
    match out {
        Some(path) => {
            fs::write(&path, export)?;
            println!("\nCSV export written to {}", path.display());
        }
        None => println!("\nCSV export\n{export}"),
    }

    Ok(())
}
