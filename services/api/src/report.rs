use crate::infra::parse_answers;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;
use tracing::info;
use wellbeing_pulse::assessments::{
    classify_band, classify_tier, dominant_channel, AnswerSet, CohortAggregator, CohortSnapshot,
    Instrument, MemberCompletionRecord, MemberId, MemberProfile, PreferenceProfile,
    ResultSerializer, ScoreCalculator, ScoreObject, StoreRow,
};
use wellbeing_pulse::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Instrument identifier: burnout, perception, or preference
    #[arg(long)]
    pub(crate) instrument: String,
    /// Comma separated responses, question 1 first
    #[arg(long, value_parser = parse_answers)]
    pub(crate) answers: AnswerSet,
}

#[derive(Args, Debug)]
pub(crate) struct CohortArgs {
    /// JSON file with `members` profiles and stored `records` rows
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Write the per-member CSV export to this path
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

/// Score plus the derived classification a dashboard would show next to it.
#[derive(Debug, Serialize)]
pub(crate) struct ScoreReport {
    pub(crate) score: ScoreObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) band: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) risk_tier: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) dominant_channel: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) preference_profile: Option<String>,
}

impl ScoreReport {
    pub(crate) fn from_score(score: ScoreObject) -> Self {
        let mut report = Self {
            score,
            band: None,
            risk_tier: None,
            dominant_channel: None,
            preference_profile: None,
        };

        match &report.score {
            ScoreObject::Burnout(burnout) => {
                report.band = Some(classify_band(burnout.total).label());
                report.risk_tier = Some(classify_tier(burnout.total).label());
            }
            ScoreObject::Perception(perception) => {
                report.dominant_channel = Some(dominant_channel(perception).label());
            }
            ScoreObject::Preference(preference) => {
                report.preference_profile =
                    Some(PreferenceProfile::from_score(preference).summary());
            }
        }

        report
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CohortInput {
    #[serde(default)]
    pub(crate) members: Vec<MemberProfile>,
    #[serde(default)]
    pub(crate) records: Vec<StoreRow>,
}

impl CohortInput {
    pub(crate) fn decode(
        raw: &str,
    ) -> Result<(Vec<MemberProfile>, Vec<MemberCompletionRecord>), AppError> {
        let input: CohortInput = serde_json::from_str(raw)?;
        let records = input
            .records
            .iter()
            .map(ResultSerializer::from_store_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((input.members, records))
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        instrument,
        answers,
    } = args;

    let score = ScoreCalculator::new().score_by_key(&instrument, &answers)?;
    let report = ScoreReport::from_score(score);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub(crate) fn run_cohort_report(args: CohortArgs) -> Result<(), AppError> {
    let CohortArgs { input, out } = args;

    let raw = fs::read_to_string(&input)?;
    let (members, records) = CohortInput::decode(&raw)?;
    let roster: Vec<MemberId> = members
        .iter()
        .map(|profile| profile.member_id.clone())
        .collect();

    let snapshot = CohortAggregator::aggregate(&roster, &records);
    info!(
        input = %input.display(),
        members = snapshot.total_members,
        records = records.len(),
        "aggregated cohort"
    );
    println!("{}", render_snapshot(&snapshot));

    if let Some(path) = out {
        let rows = ResultSerializer::export_rows(&members, &records);
        ResultSerializer::write_csv(&rows, File::create(&path)?)?;
        println!("\nWrote {} rows to {}", rows.len(), path.display());
    }

    Ok(())
}

fn percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

/// Plain text dashboard for a cohort snapshot.
pub(crate) fn render_snapshot(snapshot: &CohortSnapshot) -> String {
    let mut lines = vec![
        "Cohort snapshot".to_string(),
        format!("  Members: {}", snapshot.total_members),
    ];

    lines.push("  Completion:".to_string());
    for instrument in Instrument::ordered() {
        lines.push(format!(
            "    - {}: {} ({})",
            instrument.label(),
            snapshot.per_instrument_completed.get(instrument),
            percent(snapshot.completion_rate(instrument)),
        ));
    }
    lines.push(format!(
        "  All three completed: {} | Full progress: {}",
        snapshot.all_three_completed, snapshot.members_at_full_progress
    ));
    lines.push(format!(
        "  Average burnout total: {:.1}",
        snapshot.average_burnout_total
    ));
    lines.push(format!(
        "  Risk tiers: low {} ({}) | moderate {} ({}) | high {} ({})",
        snapshot.risk_tiers.low,
        percent(snapshot.risk_tier_shares.low),
        snapshot.risk_tiers.moderate,
        percent(snapshot.risk_tier_shares.moderate),
        snapshot.risk_tiers.high,
        percent(snapshot.risk_tier_shares.high),
    ));

    lines.push("  Burnout bands:".to_string());
    for entry in &snapshot.band_distribution {
        lines.push(format!("    - {}: {}", entry.band_label, entry.count));
    }

    lines.push("  Dominant channels:".to_string());
    for entry in &snapshot.channel_distribution {
        lines.push(format!(
            "    - {}: {} ({})",
            entry.label,
            entry.count,
            percent(entry.share)
        ));
    }

    lines.join("\n")
}
