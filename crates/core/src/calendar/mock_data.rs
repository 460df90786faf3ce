//! Demo data generation for seeding and tests.
//!
//! Pure functions producing stored documents the way the wider application
//! writes them, including its mix of timestamp shapes.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::storage::StoredDocument;

use super::document::EntryDocument;
use super::normalize::RawTimestamp;

const INTERVENTIONS: [(&str, &str, &str); 6] = [
    ("INT-BOOK", "Bookkeeping Basics", "Finance"),
    ("INT-MKT", "Digital Marketing", "Marketing"),
    ("INT-LEGAL", "Company Compliance", "Legal"),
    ("INT-PITCH", "Pitch Coaching", "Funding Readiness"),
    ("INT-HR", "Hiring Your First Staff", "Human Resources"),
    ("INT-OPS", "Operations Review", "Operations"),
];

const BENEFICIARIES: [&str; 8] = [
    "Amani Foods",
    "Blue Crane Logistics",
    "Khanyisa Crafts",
    "Lerato Tech",
    "Mokoena Builders",
    "Ndlovu Farming Co",
    "Sizwe Solar",
    "Thandi's Bakery",
];

const COORDINATORS: [(&str, &str); 3] = [
    ("CO-1", "Nomsa Dube"),
    ("CO-2", "Pieter Botha"),
    ("CO-3", "Ayesha Patel"),
];

const STATUSES: [&str; 4] = ["planned", "confirmed", "Confirmed", "cancelled"];

/// Generates demo calendar documents spread around a center date.
///
/// Roughly 40% of documents belong to grouped workshops of three
/// participants sharing an intervention, subtitle and coordinator; the rest
/// are one-to-one sessions. Output is deterministic for a given input.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use indicative_core::calendar::generate_seed_documents;
///
/// let center = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let documents = generate_seed_documents(center, "DEMO", 20);
///
/// assert_eq!(documents.len(), 20);
/// ```
pub fn generate_seed_documents(center: NaiveDate, tenant: &str, count: u32) -> Vec<StoredDocument> {
    let grouped_count = (count * 2).div_ceil(5).min(count);
    let mut documents = Vec::with_capacity(count as usize);

    // Grouped workshops, three participants per session.
    for i in 0..grouped_count {
        let session = i / 3;
        let (intervention_id, title, area) = INTERVENTIONS[session as usize % INTERVENTIONS.len()];
        let (coordinator_id, coordinator_name) = COORDINATORS[session as usize % COORDINATORS.len()];
        let day = center + Duration::days(session as i64 * 3 - 6);

        documents.push(StoredDocument::new(
            format!("seed-{i:03}"),
            EntryDocument {
                participant_id: Some(format!("BEN-{}", i % BENEFICIARIES.len() as u32)),
                beneficiary_name: Some(BENEFICIARIES[i as usize % BENEFICIARIES.len()].to_string()),
                intervention_id: Some(intervention_id.to_string()),
                intervention_title: Some(title.to_string()),
                area_of_support: Some(area.to_string()),
                entry_type: Some("grouped".to_string()),
                implementation_date: Some(timestamp(day, 9 + session % 4, i)),
                subtitle: Some(format!("Session {}", session + 1)),
                coordinator_id: Some(coordinator_id.to_string()),
                coordinator_name: Some(coordinator_name.to_string()),
                company_code: Some(tenant.to_string()),
                status: Some(STATUSES[i as usize % STATUSES.len()].to_string()),
                ..EntryDocument::default()
            },
        ));
    }

    // One-to-one sessions. Every fourth one is only targeted, not yet
    // scheduled.
    for i in grouped_count..count {
        let (intervention_id, title, area) = INTERVENTIONS[i as usize % INTERVENTIONS.len()];
        let day = center + Duration::days((i % 21) as i64 - 10);
        let when = timestamp(day, 8 + i % 9, i);
        let targeted_only = i % 4 == 0;
        let recurring = i % 5 == 0;

        documents.push(StoredDocument::new(
            format!("seed-{i:03}"),
            EntryDocument {
                participant_id: Some(format!("BEN-{}", i % BENEFICIARIES.len() as u32)),
                beneficiary_name: Some(BENEFICIARIES[i as usize % BENEFICIARIES.len()].to_string()),
                intervention_id: Some(intervention_id.to_string()),
                // Some writers leave the title out.
                intervention_title: (i % 7 != 0).then(|| title.to_string()),
                area_of_support: Some(area.to_string()),
                entry_type: Some("singular".to_string()),
                target_date: Some(when.clone()),
                implementation_date: (!targeted_only).then_some(when),
                is_recurring: recurring,
                frequency: recurring.then(|| "Monthly".to_string()),
                company_code: Some(tenant.to_string()),
                status: Some(STATUSES[i as usize % STATUSES.len()].to_string()),
                ..EntryDocument::default()
            },
        ));
    }

    documents
}

/// Writes a UTC wall time on `day` in one of the shapes seen in the store.
fn timestamp(day: NaiveDate, hour: u32, variant: u32) -> RawTimestamp {
    let time = NaiveTime::from_hms_opt(hour % 24, 0, 0).unwrap_or(NaiveTime::MIN);
    let instant = day.and_time(time).and_utc();

    match variant % 3 {
        0 => RawTimestamp::Store {
            seconds: instant.timestamp(),
            nanoseconds: 0,
        },
        1 => RawTimestamp::Text(instant.to_rfc3339()),
        _ => RawTimestamp::Millis(instant.timestamp_millis()),
    }
}
