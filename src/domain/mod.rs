use serde::{Deserialize, Deserializer, Serialize};

/// The upstream feeds emit explicit `null`s as readily as missing fields.
/// Both collapse to the field's default so one sparse record never sinks
/// the batch.
fn null_to_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_to_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_default())
}

/// A nominee profile from the profile feed. Field names mirror the upstream
/// JSON.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(rename = "FirstName", deserialize_with = "null_to_empty")]
    pub first_name: String,
    #[serde(rename = "MiddleName", deserialize_with = "null_to_empty")]
    pub middle_name: String,
    #[serde(rename = "LastName", deserialize_with = "null_to_empty")]
    pub last_name: String,
    #[serde(rename = "Suffix")]
    pub suffix: Option<String>,
    #[serde(rename = "Nominee_Sequence", deserialize_with = "null_to_zero")]
    pub sequence_number: i64,
    #[serde(rename = "Position", deserialize_with = "null_to_empty")]
    pub position_title: String,
    #[serde(rename = "Term", deserialize_with = "null_to_empty")]
    pub term_text: String,
    #[serde(rename = "Resides_At")]
    pub resides_at: Option<String>,
}

/// One agenda entry from the action feed. A nominee may have zero, one, or
/// many of these.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActionEvent {
    #[serde(rename = "FirstName", deserialize_with = "null_to_empty")]
    pub first_name: String,
    #[serde(rename = "LastName", deserialize_with = "null_to_empty")]
    pub last_name: String,
    #[serde(rename = "Nominee_Sequence", deserialize_with = "null_to_zero")]
    pub sequence_number: i64,
    #[serde(rename = "agendaDate", deserialize_with = "null_to_empty")]
    pub agenda_date_raw: String,
    #[serde(rename = "NominationAction", deserialize_with = "null_to_empty")]
    pub action_text: String,
}

/// One record of the older single-feed source, which arrives pre-merged with
/// its own last-action date and a short free-text "replacing" field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MergedRecord {
    #[serde(deserialize_with = "null_to_empty")]
    pub last_action_date: String,
    #[serde(deserialize_with = "null_to_empty")]
    pub first_name: String,
    #[serde(deserialize_with = "null_to_empty")]
    pub last_name: String,
    pub board: Option<String>,
    pub last_action: Option<String>,
    #[serde(deserialize_with = "null_to_empty")]
    pub replacing: String,
    pub county: Option<String>,
    pub city: Option<String>,
    pub legislative_district: Option<String>,
}

/// Composite identity key for a nominee. Kept structural so a name that
/// happens to contain a separator can never collide with another key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NomineeKey {
    pub first_name: String,
    pub last_name: String,
    pub sequence_number: i64,
}

impl NomineeKey {
    pub fn new(first_name: &str, last_name: &str, sequence_number: i64) -> Self {
        Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            sequence_number,
        }
    }
}

impl Profile {
    pub fn key(&self) -> NomineeKey {
        NomineeKey::new(&self.first_name, &self.last_name, self.sequence_number)
    }

    /// Full display name: first/middle/last/suffix joined with single
    /// spaces, empty parts dropped.
    pub fn full_name(&self) -> String {
        let suffix = self.suffix.as_deref().unwrap_or("");
        [
            self.first_name.trim(),
            self.middle_name.trim(),
            self.last_name.trim(),
            suffix.trim(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

impl ActionEvent {
    pub fn key(&self) -> NomineeKey {
        NomineeKey::new(&self.first_name, &self.last_name, self.sequence_number)
    }
}

impl MergedRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// One row of the analyst-facing table. Serde renames carry the exact
/// downstream column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRow {
    #[serde(rename = "Board/Commission")]
    pub board: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Last Action Date")]
    pub last_action_date: String,
    #[serde(rename = "Last Action")]
    pub last_action: String,
    #[serde(rename = "Replacing")]
    pub replacing: String,
    #[serde(rename = "County")]
    pub county: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "LD of Residence")]
    pub legislative_district: String,
}
