use std::collections::BTreeMap;
use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::banding::classify_band;
use super::cohort::group_by_member;
use super::domain::{Instrument, MemberCompletionRecord, MemberId, MemberProfile, ScoringError};
use super::results::MemberResults;
use super::scoring::ScoreObject;

/// Rendered in place of results a member has not produced yet.
pub const PLACEHOLDER: &str = "N/A";

pub const EXPORT_HEADER: [&str; 9] = [
    "name",
    "surname",
    "email",
    "role",
    "completed",
    "burnout_total",
    "burnout_band",
    "dominant_channel",
    "preference_profile",
];

/// Persisted shape of a completion record, one row per (member, instrument).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRow {
    pub member_id: String,
    pub instrument: String,
    pub payload: String,
    pub completed_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub role: String,
    pub completed: String,
    pub burnout_total: String,
    pub burnout_band: String,
    pub dominant_channel: String,
    pub preference_profile: String,
}

impl ExportRow {
    /// Cells in [`EXPORT_HEADER`] order.
    pub fn cells(&self) -> [&str; 9] {
        [
            self.name.as_str(),
            self.surname.as_str(),
            self.email.as_str(),
            self.role.as_str(),
            self.completed.as_str(),
            self.burnout_total.as_str(),
            self.burnout_band.as_str(),
            self.dominant_channel.as_str(),
            self.preference_profile.as_str(),
        ]
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("malformed score payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("malformed completion timestamp '{value}'")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("stored {0} score violates its invariants")]
    InconsistentScore(Instrument),
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
}

/// Converts score objects to and from their stored and exported shapes.
pub struct ResultSerializer;

impl ResultSerializer {
    pub fn to_store_row(record: &MemberCompletionRecord) -> Result<StoreRow, SerializationError> {
        let payload = match &record.score {
            ScoreObject::Burnout(score) => serde_json::to_string(score)?,
            ScoreObject::Perception(score) => serde_json::to_string(score)?,
            ScoreObject::Preference(score) => serde_json::to_string(score)?,
        };

        Ok(StoreRow {
            member_id: record.member_id.0.clone(),
            instrument: record.instrument().key().to_string(),
            payload,
            completed_at: record
                .completed_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        })
    }

    pub fn from_store_row(row: &StoreRow) -> Result<MemberCompletionRecord, SerializationError> {
        let instrument = row.instrument.parse::<Instrument>()?;
        let score = match instrument {
            Instrument::Burnout => ScoreObject::Burnout(serde_json::from_str(&row.payload)?),
            Instrument::Perception => ScoreObject::Perception(serde_json::from_str(&row.payload)?),
            Instrument::Preference => ScoreObject::Preference(serde_json::from_str(&row.payload)?),
        };

        if !score.is_consistent() {
            return Err(SerializationError::InconsistentScore(instrument));
        }

        let completed_at = DateTime::parse_from_rfc3339(row.completed_at.trim())
            .map_err(|source| SerializationError::Timestamp {
                value: row.completed_at.clone(),
                source,
            })?
            .with_timezone(&Utc);

        Ok(MemberCompletionRecord::new(
            MemberId(row.member_id.clone()),
            score,
            completed_at,
        ))
    }

    pub fn export_row(profile: &MemberProfile, results: &MemberResults) -> ExportRow {
        let or_placeholder = |value: Option<String>| value.unwrap_or_else(|| PLACEHOLDER.into());

        ExportRow {
            name: profile.name.clone(),
            surname: profile.surname.clone(),
            email: profile.email.clone(),
            role: profile.role.label().to_string(),
            completed: format!(
                "{}/{}",
                results.completed_count(),
                Instrument::ordered().len()
            ),
            burnout_total: or_placeholder(results.burnout_total().map(|total| total.to_string())),
            burnout_band: or_placeholder(
                results
                    .burnout_total()
                    .map(|total| classify_band(total).label().to_string()),
            ),
            dominant_channel: or_placeholder(
                results
                    .dominant_channel()
                    .map(|dominant| dominant.label().to_string()),
            ),
            preference_profile: or_placeholder(
                results
                    .preference_profile()
                    .map(|profile| profile.summary()),
            ),
        }
    }

    /// One row per profile, in profile order. Records for members without a
    /// profile are skipped.
    pub fn export_rows(
        profiles: &[MemberProfile],
        records: &[MemberCompletionRecord],
    ) -> Vec<ExportRow> {
        let by_member: BTreeMap<MemberId, MemberResults> = group_by_member(&[], records);

        profiles
            .iter()
            .map(|profile| {
                let results = by_member
                    .get(&profile.member_id)
                    .cloned()
                    .unwrap_or_default();
                Self::export_row(profile, &results)
            })
            .collect()
    }

    pub fn write_csv<W: Write>(rows: &[ExportRow], writer: W) -> Result<(), SerializationError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(EXPORT_HEADER)?;
        for row in rows {
            csv_writer.write_record(row.cells())?;
        }
        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn to_csv_string(rows: &[ExportRow]) -> Result<String, SerializationError> {
        let mut buffer = Vec::new();
        Self::write_csv(rows, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
