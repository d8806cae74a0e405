use super::common::*;
use crate::assessments::domain::{Instrument, MemberRole, ScoringError};
use crate::assessments::export::{
    ResultSerializer, SerializationError, StoreRow, EXPORT_HEADER, PLACEHOLDER,
};
use crate::assessments::results::MemberResults;

#[test]
fn store_row_keeps_instrument_and_timestamp_columns() {
    let record = perception_record("m-001", [4, 3, 2, 1], 15);

    let row = ResultSerializer::to_store_row(&record).expect("serializes");

    assert_eq!(row.member_id, "m-001");
    assert_eq!(row.instrument, "perception");
    assert_eq!(row.completed_at, "2025-03-03T09:15:00.000Z");
    assert!(!row.payload.contains("instrument"));

    let restored = ResultSerializer::from_store_row(&row).expect("deserializes");
    assert_eq!(restored, record);
}

#[test]
fn loading_rejects_unknown_instrument() {
    let row = StoreRow {
        member_id: "m-001".to_string(),
        instrument: "mood".to_string(),
        payload: "{}".to_string(),
        completed_at: "2025-03-03T09:00:00Z".to_string(),
    };

    match ResultSerializer::from_store_row(&row) {
        Err(SerializationError::Scoring(ScoringError::UnknownInstrument(key))) => {
            assert_eq!(key, "mood")
        }
        other => panic!("expected unknown instrument, got {other:?}"),
    }
}

#[test]
fn loading_rejects_inconsistent_scores() {
    let row = StoreRow {
        member_id: "m-001".to_string(),
        instrument: "burnout".to_string(),
        payload: r#"{"exhaustion":10,"detachment":5,"accomplishment":5,"total":99}"#.to_string(),
        completed_at: "2025-03-03T09:00:00Z".to_string(),
    };

    match ResultSerializer::from_store_row(&row) {
        Err(SerializationError::InconsistentScore(Instrument::Burnout)) => {}
        other => panic!("expected inconsistent score, got {other:?}"),
    }

    let row = StoreRow {
        instrument: "perception".to_string(),
        payload: r#"{"visual":1,"auditory":1,"kinesthetic":1,"digital":1}"#.to_string(),
        ..row
    };
    assert!(matches!(
        ResultSerializer::from_store_row(&row),
        Err(SerializationError::InconsistentScore(Instrument::Perception))
    ));
}

#[test]
fn loading_rejects_malformed_payload_and_timestamp() {
    let good = ResultSerializer::to_store_row(&burnout_record("m-001", 40, 0)).expect("row");

    let bad_payload = StoreRow {
        payload: "{\"exhaustion\":".to_string(),
        ..good.clone()
    };
    assert!(matches!(
        ResultSerializer::from_store_row(&bad_payload),
        Err(SerializationError::Payload(_))
    ));

    let bad_timestamp = StoreRow {
        completed_at: "last tuesday".to_string(),
        ..good
    };
    match ResultSerializer::from_store_row(&bad_timestamp) {
        Err(SerializationError::Timestamp { value, .. }) => assert_eq!(value, "last tuesday"),
        other => panic!("expected timestamp error, got {other:?}"),
    }
}

#[test]
fn export_row_renders_all_labels() {
    let mut profile = profile("m-001", "Avery", "Lee");
    profile.role = MemberRole::Manager;
    let records = [
        burnout_record("m-001", 61, 0),
        perception_record("m-001", [5, 2, 2, 1], 5),
        preference_record("m-001", [7, 4, 5, 3], 9),
    ];

    let row = ResultSerializer::export_row(&profile, &MemberResults::from_records(&records));

    assert_eq!(
        row.cells(),
        [
            "Avery",
            "Lee",
            "avery.lee@northwind.example",
            "Manager",
            "3/3",
            "61",
            "Strained",
            "Visual",
            "Collaborative / Practical / Analytical / Adaptive",
        ]
    );
}

#[test]
fn missing_results_render_placeholders() {
    let profile = profile("m-002", "Jules", "Moreno");

    let row = ResultSerializer::export_row(&profile, &MemberResults::default());

    assert_eq!(row.completed, "0/3");
    assert_eq!(row.burnout_total, PLACEHOLDER);
    assert_eq!(row.burnout_band, PLACEHOLDER);
    assert_eq!(row.dominant_channel, PLACEHOLDER);
    assert_eq!(row.preference_profile, PLACEHOLDER);
    assert_eq!(row.cells().len(), EXPORT_HEADER.len());
}

#[test]
fn export_rows_follow_profile_order() {
    let profiles = vec![
        profile("m-002", "Jules", "Moreno"),
        profile("m-001", "Avery", "Lee"),
    ];
    let records = [
        burnout_record("m-001", 30, 0),
        burnout_record("m-404", 90, 0),
    ];

    let rows = ResultSerializer::export_rows(&profiles, &records);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Jules");
    assert_eq!(rows[0].completed, "0/3");
    assert_eq!(rows[1].name, "Avery");
    assert_eq!(rows[1].burnout_band, "Balanced");
}

#[test]
fn csv_has_header_and_stable_column_count() {
    let profiles = vec![
        profile("m-001", "Avery", "Lee"),
        profile("m-002", "Jules", "Moreno"),
    ];
    let records = [
        burnout_record("m-001", 61, 0),
        preference_record("m-001", [7, 4, 5, 3], 9),
    ];
    let rows = ResultSerializer::export_rows(&profiles, &records);

    let csv = ResultSerializer::to_csv_string(&rows).expect("csv renders");
    let mut reader = csv::Reader::from_reader(csv.as_bytes());

    let headers = reader.headers().expect("header row").clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), EXPORT_HEADER.to_vec());

    let records: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows parse");
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|record| record.len() == 9));
    assert_eq!(&records[0][4], "2/3");
    assert_eq!(&records[1][7], PLACEHOLDER);
}
