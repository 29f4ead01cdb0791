use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::common::constants::{MDY_FORMAT, NOT_AVAILABLE};
use crate::domain::{ActionEvent, MergedRecord, NormalizedRow, Profile};
use crate::geo::MunicipalityLookup;

use super::board::clean_board_name;
use super::dates;
use super::merge::RecordMerger;
use super::replacing::{AgendaReplacing, MergedReplacing, ReplacingClassifier};

/// Batch processor turning raw feed payloads into the final analyst table.
pub struct NominationProcessor {
    lookup: MunicipalityLookup,
    target_year: i32,
}

impl NominationProcessor {
    pub fn new(lookup: MunicipalityLookup, target_year: i32) -> Self {
        Self {
            lookup,
            target_year,
        }
    }

    /// Two-feed mode: a payload of `[profiles, actions]`. Any other shape is
    /// a recoverable format error yielding an empty table.
    pub fn process_two_feed(&self, payload: &Value) -> Vec<NormalizedRow> {
        let Some((profiles, actions)) = split_two_feed(payload) else {
            warn!("Unexpected payload shape; expected a list of two lists");
            return Vec::new();
        };

        let merger = RecordMerger::new(&actions, self.target_year);
        let classifier = AgendaReplacing;

        let mut dated = Vec::new();
        for profile in &profiles {
            let Some(latest) = merger.latest_action(profile) else {
                continue;
            };

            let full_name = profile.full_name();
            let city = profile
                .resides_at
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());

            let row = NormalizedRow {
                board: clean_board_name(&profile.position_title),
                name: full_name.clone(),
                last_action_date: latest.date.format(MDY_FORMAT).to_string(),
                last_action: latest.action_text.clone(),
                replacing: classifier.classify(&profile.term_text, &full_name),
                county: self.lookup.county_for(&city),
                address: city,
                legislative_district: NOT_AVAILABLE.to_string(),
            };
            dated.push((latest.date, row));
        }

        info!(
            "Two-feed mode: {} of {} profiles qualified for {}",
            dated.len(),
            profiles.len(),
            self.target_year
        );
        sort_rows(dated)
    }

    /// Merged-feed mode: one flat list of pre-joined records, each carrying
    /// its own ISO last-action date.
    pub fn process_merged(&self, records: &[MergedRecord]) -> Vec<NormalizedRow> {
        let classifier = MergedReplacing;

        let mut dated = Vec::new();
        for entry in records {
            let Some(date) = dates::parse_iso(&entry.last_action_date) else {
                continue;
            };
            if date.year() != self.target_year {
                continue;
            }

            let full_name = entry.full_name();
            let row = NormalizedRow {
                board: or_na(&entry.board),
                name: full_name.clone(),
                last_action_date: date.format(MDY_FORMAT).to_string(),
                last_action: or_na(&entry.last_action),
                replacing: classifier.classify(&entry.replacing, &full_name),
                county: or_na(&entry.county),
                address: or_na(&entry.city),
                legislative_district: or_na(&entry.legislative_district),
            };
            dated.push((date, row));
        }

        info!(
            "Merged mode: {} of {} records qualified for {}",
            dated.len(),
            records.len(),
            self.target_year
        );
        sort_rows(dated)
    }

    /// Merged-feed mode over a raw JSON payload.
    pub fn process_merged_value(&self, payload: &Value) -> Vec<NormalizedRow> {
        let records: Vec<MergedRecord> = collect_records(payload);
        self.process_merged(&records)
    }
}

fn split_two_feed(payload: &Value) -> Option<(Vec<Profile>, Vec<ActionEvent>)> {
    let outer = payload.as_array()?;
    if outer.len() < 2 {
        return None;
    }
    Some((collect_records(&outer[0]), collect_records(&outer[1])))
}

/// Deserialize each element of a JSON array, dropping the ones that do not
/// fit so a single malformed record never sinks the batch.
fn collect_records<T: DeserializeOwned>(value: &Value) -> Vec<T> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn or_na(value: &Option<String>) -> String {
    value
        .clone()
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Stable descending sort on the parsed date; same-day rows keep input order.
fn sort_rows(mut dated: Vec<(NaiveDate, NormalizedRow)>) -> Vec<NormalizedRow> {
    dated.sort_by(|a, b| b.0.cmp(&a.0));
    dated.into_iter().map(|(_, row)| row).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn processor(year: i32) -> NominationProcessor {
        let lookup = MunicipalityLookup::from_alias_pairs(vec![
            ("Newark".to_string(), "Essex".to_string()),
            ("Trenton".to_string(), "Mercer".to_string()),
        ]);
        NominationProcessor::new(lookup, year)
    }

    fn two_feed_payload() -> Value {
        json!([
            [
                {
                    "FirstName": "Jane",
                    "MiddleName": "Q",
                    "LastName": "Doe",
                    "Nominee_Sequence": 1,
                    "Position": "to be a member of the State Board of Education",
                    "Term": "to replace the Honorable John Adams, resigned",
                    "Resides_At": "Newark"
                },
                {
                    "FirstName": "Alan",
                    "LastName": "Smithee",
                    "Nominee_Sequence": 1,
                    "Position": "to be the Public Defender",
                    "Term": "to succeed himself",
                    "Resides_At": "Trenton"
                },
                {
                    "FirstName": "Norma",
                    "LastName": "Noaction",
                    "Nominee_Sequence": 1,
                    "Position": "to be an Administrative Law Judge",
                    "Term": ""
                }
            ],
            [
                {
                    "FirstName": "Jane",
                    "LastName": "Doe",
                    "Nominee_Sequence": 1,
                    "agendaDate": "12/01/2024",
                    "NominationAction": "Referred"
                },
                {
                    "FirstName": "Jane",
                    "LastName": "Doe",
                    "Nominee_Sequence": 1,
                    "agendaDate": "01/14/2025",
                    "NominationAction": "Confirmed"
                },
                {
                    "FirstName": "Alan",
                    "LastName": "Smithee",
                    "Nominee_Sequence": 1,
                    "agendaDate": "03/02/2025",
                    "NominationAction": "Noticed"
                }
            ]
        ])
    }

    #[test]
    fn two_feed_mode_joins_filters_and_enriches() {
        let rows = processor(2025).process_two_feed(&two_feed_payload());
        assert_eq!(rows.len(), 2);

        // Descending by date: Smithee (03/02) before Doe (01/14)
        assert_eq!(rows[0].name, "Alan Smithee");
        assert_eq!(rows[0].board, "Public Defender");
        assert_eq!(rows[0].replacing, "Reappointment");
        assert_eq!(rows[0].county, "Mercer");
        assert_eq!(rows[0].legislative_district, "N/A");

        assert_eq!(rows[1].name, "Jane Q Doe");
        assert_eq!(rows[1].board, "State Board of Education");
        assert_eq!(rows[1].last_action_date, "01/14/2025");
        assert_eq!(rows[1].last_action, "Confirmed");
        assert_eq!(rows[1].replacing, "John Adams");
        assert_eq!(rows[1].county, "Essex");
        assert_eq!(rows[1].address, "Newark");
    }

    #[test]
    fn profiles_without_actions_never_reach_the_table() {
        let rows = processor(2025).process_two_feed(&two_feed_payload());
        assert!(rows.iter().all(|row| row.name != "Norma Noaction"));
    }

    #[test]
    fn target_year_filter_uses_the_most_recent_action() {
        // Jane Doe's latest action is in 2025, so she is out for 2024 even
        // though she had a 2024 action.
        let rows = processor(2024).process_two_feed(&two_feed_payload());
        assert!(rows.iter().all(|row| row.name != "Jane Q Doe"));
    }

    #[test]
    fn malformed_top_level_shape_yields_an_empty_table() {
        let p = processor(2025);
        assert!(p.process_two_feed(&json!({"not": "a list"})).is_empty());
        assert!(p.process_two_feed(&json!([[]])).is_empty());
        assert!(p.process_two_feed(&json!([])).is_empty());
    }

    #[test]
    fn pipeline_is_idempotent() {
        let p = processor(2025);
        let first = p.process_two_feed(&two_feed_payload());
        let second = p.process_two_feed(&two_feed_payload());
        assert_eq!(first, second);
    }

    #[test]
    fn merged_mode_filters_and_classifies() {
        let payload = json!([
            {
                "lastActionDate": "2025-01-14T00:00:00Z",
                "firstName": "Jane",
                "lastName": "Roe",
                "board": "Board of Public Utilities",
                "lastAction": "Confirmed",
                "replacing": "Vice John Doe",
                "county": "Essex",
                "city": "Newark",
                "legislativeDistrict": "29"
            },
            {
                "lastActionDate": "2024-06-30T00:00:00",
                "firstName": "Old",
                "lastName": "News",
                "replacing": "Himself"
            },
            {
                "lastActionDate": "not a date",
                "firstName": "No",
                "lastName": "Date",
                "replacing": ""
            },
            {
                "lastActionDate": "2025-03-02T00:00:00Z",
                "firstName": "Sam",
                "lastName": "Self",
                "replacing": "Himself"
            }
        ]);

        let rows = processor(2025).process_merged_value(&payload);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].name, "Sam Self");
        assert_eq!(rows[0].replacing, "Reappointment");
        assert_eq!(rows[0].board, "N/A");
        assert_eq!(rows[0].county, "N/A");

        assert_eq!(rows[1].name, "Jane Roe");
        assert_eq!(rows[1].last_action_date, "01/14/2025");
        assert_eq!(rows[1].replacing, "John Doe");
        assert_eq!(rows[1].legislative_district, "29");
    }

    #[test]
    fn records_with_explicit_nulls_survive_to_the_table() {
        let payload = json!([
            [
                {
                    "FirstName": "Jane",
                    "MiddleName": null,
                    "LastName": "Doe",
                    "Suffix": null,
                    "Nominee_Sequence": 1,
                    "Position": "to be a member of the State Board of Education",
                    "Term": null,
                    "Resides_At": null
                }
            ],
            [
                {
                    "FirstName": "Jane",
                    "LastName": "Doe",
                    "Nominee_Sequence": 1,
                    "agendaDate": "01/14/2025",
                    "NominationAction": null
                }
            ]
        ]);
        let rows = processor(2025).process_two_feed(&payload);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Jane Doe");
        // Null term text degrades per-field, not per-record
        assert_eq!(rows[0].replacing, "Vacant");
        assert_eq!(rows[0].county, "N/A");

        let merged = json!([
            {
                "lastActionDate": "2025-01-14T00:00:00Z",
                "firstName": "Jane",
                "lastName": "Roe",
                "board": null,
                "lastAction": null,
                "replacing": null,
                "county": null,
                "city": null,
                "legislativeDistrict": null
            }
        ]);
        let rows = processor(2025).process_merged_value(&merged);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].replacing, "Vacant");
        assert_eq!(rows[0].board, "N/A");
    }

    #[test]
    fn output_dates_never_increase() {
        let rows = processor(2025).process_two_feed(&two_feed_payload());
        let parsed: Vec<_> = rows
            .iter()
            .map(|row| dates::parse_mdy(&row.last_action_date).unwrap())
            .collect();
        assert!(parsed.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}
