use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::domain::{ActionEvent, NomineeKey, Profile};

use super::dates;

/// An action event whose agenda date has already parsed.
#[derive(Debug, Clone)]
pub struct DatedAction {
    pub date: NaiveDate,
    pub action_text: String,
}

/// Joins action events to profiles by nominee key and picks each nominee's
/// most recent action within the target year.
pub struct RecordMerger {
    index: HashMap<NomineeKey, Vec<DatedAction>>,
    target_year: i32,
}

impl RecordMerger {
    /// Index the action feed by nominee key. Events whose agenda date does
    /// not parse never enter the comparison pool.
    pub fn new(actions: &[ActionEvent], target_year: i32) -> Self {
        let mut index: HashMap<NomineeKey, Vec<DatedAction>> = HashMap::new();
        let mut skipped = 0usize;
        for action in actions {
            match dates::parse_mdy(&action.agenda_date_raw) {
                Some(date) => index.entry(action.key()).or_default().push(DatedAction {
                    date,
                    action_text: action.action_text.clone(),
                }),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!("Skipped {skipped} action events with unparseable agenda dates");
        }
        Self { index, target_year }
    }

    /// The profile's most recent action, if it has any and that action falls
    /// in the target year. Profiles with no action history are not active
    /// for this pipeline.
    pub fn latest_action(&self, profile: &Profile) -> Option<&DatedAction> {
        let actions = self.index.get(&profile.key())?;
        let latest = actions.iter().max_by_key(|a| a.date)?;
        (latest.date.year() == self.target_year).then_some(latest)
    }
}
