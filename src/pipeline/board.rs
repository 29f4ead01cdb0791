use crate::common::constants::NOT_AVAILABLE;

/// Leading phrases stripped from position titles. Articled forms come before
/// their bare counterparts so the longer match wins.
const BOARD_PREFIXES: &[&str] = &[
    "to be a member of the ",
    "to be a member of ",
    "to be a judge of the ",
    "to be a judge of ",
    "to be the ",
    "to be an ",
];

/// Reduce a raw position title to the bare board or commission name.
/// Stripping repeats until no prefix matches, so stacked phrasings unwrap
/// one layer per pass.
pub fn clean_board_name(text: &str) -> String {
    if text.is_empty() {
        return NOT_AVAILABLE.to_string();
    }

    let mut clean = text;
    loop {
        let lower = clean.to_lowercase();
        match BOARD_PREFIXES.iter().find(|p| lower.starts_with(**p)) {
            Some(prefix) => clean = &clean[prefix.len()..],
            None => break,
        }
    }
    clean.trim().to_string()
}
