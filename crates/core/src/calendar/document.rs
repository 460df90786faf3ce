use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_optional_scalar, deserialize_optional_string, deserialize_truthy};

use super::normalize::{deserialize_lenient_timestamp, RawTimestamp};

/// An indicative calendar document exactly as stored.
///
/// Every field is optional because writers elsewhere in the system do not
/// agree on which ones they fill in. Conversion into a
/// [`CalendarEntry`](super::CalendarEntry) applies the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDocument {
    #[serde(default, deserialize_with = "deserialize_optional_scalar")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_scalar")]
    pub participant_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub beneficiary_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_scalar")]
    pub intervention_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub intervention_title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub area_of_support: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "deserialize_optional_string")]
    pub entry_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_timestamp")]
    pub target_date: Option<RawTimestamp>,
    #[serde(default, deserialize_with = "deserialize_lenient_timestamp")]
    pub implementation_date: Option<RawTimestamp>,
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub is_recurring: bool,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_scalar")]
    pub coordinator_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub coordinator_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub company_code: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub status: Option<String>,
}
