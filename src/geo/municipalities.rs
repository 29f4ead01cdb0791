use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{debug, warn};

use crate::common::constants::NOT_AVAILABLE;
use crate::common::error::Result;

/// One municipality record from the reference file: official name, county,
/// and any semicolon-delimited local names.
#[derive(Debug, Clone, Default)]
pub struct Municipality {
    pub name: String,
    pub county: String,
    pub local_names: Vec<String>,
}

impl Municipality {
    /// The official name plus every local name, each paired with the county.
    pub fn alias_pairs(&self) -> impl Iterator<Item = (String, String)> + '_ {
        std::iter::once(&self.name)
            .chain(self.local_names.iter())
            .map(|alias| (alias.clone(), self.county.clone()))
    }
}

/// Case- and whitespace-insensitive city-to-county lookup. A place name may
/// legitimately resolve to several counties; all of them are reported.
pub struct MunicipalityLookup {
    mapping: HashMap<String, BTreeSet<String>>,
}

impl MunicipalityLookup {
    pub fn from_municipalities(records: &[Municipality]) -> Self {
        Self::from_alias_pairs(records.iter().flat_map(|m| m.alias_pairs()))
    }

    /// Build the mapping from raw (alias, county) pairs. Aliases accumulate
    /// counties as a set union; entries with an empty alias or county are
    /// skipped.
    pub fn from_alias_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut mapping: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (alias, county) in pairs {
            let key = alias.trim().to_lowercase();
            let county = county.trim();
            if key.is_empty() || county.is_empty() {
                continue;
            }
            mapping.entry(key).or_default().insert(county.to_string());
        }
        Self { mapping }
    }

    /// Resolve a city name to its county (or counties, sorted and
    /// comma-joined). Unknown, empty, and sentinel inputs all answer "N/A".
    pub fn county_for(&self, city: &str) -> String {
        if city.is_empty() || city == NOT_AVAILABLE {
            return NOT_AVAILABLE.to_string();
        }
        match self.mapping.get(&city.trim().to_lowercase()) {
            Some(counties) => counties
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn alias_count(&self) -> usize {
        self.mapping.len()
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    County,
    LocalNames,
}

/// Load the municipality reference file. A missing or malformed file is
/// reported and degrades to an empty list, leaving the lookup to answer
/// "N/A" for everything.
pub fn load_municipalities(path: &Path) -> Vec<Municipality> {
    match parse_file(path) {
        Ok(records) => {
            debug!(
                "Loaded {} municipality records from {}",
                records.len(),
                path.display()
            );
            records
        }
        Err(e) => {
            warn!(
                "Could not load municipality reference {}: {e}; county lookup disabled",
                path.display()
            );
            Vec::new()
        }
    }
}

fn parse_file(path: &Path) -> Result<Vec<Municipality>> {
    let file = File::open(path)?;
    let mut reader = Reader::from_reader(BufReader::new(file));

    let mut buf = Vec::new();
    let mut records = Vec::new();
    let mut current: Option<Municipality> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"municipality" => current = Some(Municipality::default()),
                b"name" => field = Some(Field::Name),
                b"county" => field = Some(Field::County),
                b"localNames" => field = Some(Field::LocalNames),
                _ => field = None,
            },
            Event::Text(ref e) => {
                if let (Some(muni), Some(field)) = (current.as_mut(), field) {
                    let text = e.unescape()?;
                    match field {
                        Field::Name => muni.name = text.trim().to_string(),
                        Field::County => muni.county = text.trim().to_string(),
                        Field::LocalNames => {
                            muni.local_names = text
                                .split(';')
                                .map(|alias| alias.trim().to_string())
                                .filter(|alias| !alias.is_empty())
                                .collect();
                        }
                    }
                }
            }
            Event::End(ref e) => {
                if e.local_name().as_ref() == b"municipality" {
                    if let Some(muni) = current.take() {
                        records.push(muni);
                    }
                } else {
                    field = None;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(records)
}
