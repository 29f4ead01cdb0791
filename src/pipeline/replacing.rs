use once_cell::sync::Lazy;
use regex::Regex;

/// Categories the classifiers can emit. Anything else they return is the
/// extracted name of the person being replaced.
pub const VACANT: &str = "Vacant";
pub const REAPPOINTMENT: &str = "Reappointment";
pub const APPOINTMENT: &str = "Appointment";
pub const FOR_TERM: &str = "for term";

/// "replace/succeed <everything up to the first comma>"
static REPLACE_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:replace|succeed)\s+([^,]+)").expect("replace-target regex"));

const HONORIFIC: &str = "the Honorable";

/// Strategy for deriving the "Replacing" column from source free text.
///
/// The two feeds phrase succession differently (long legislative prose vs.
/// short "Vice X" strings), so each gets its own classifier rather than one
/// heuristic trying to serve both.
pub trait ReplacingClassifier {
    /// Classify `text` for the nominee named `nominee`. Returns a category
    /// or the extracted name of the person being replaced.
    fn classify(&self, text: &str, nominee: &str) -> String;

    /// Short identifier for logs.
    fn name(&self) -> &'static str;
}

struct RuleInput<'a> {
    text: &'a str,
    lower: String,
    nominee_lower: String,
}

type Rule = fn(&RuleInput) -> Option<String>;

/// The agenda-feed cascade, first match wins. Order matters: the unnamed
/// vacancy check must run before name extraction, and the literal vacancy
/// catch stays last before the fallback.
const AGENDA_RULES: &[(&str, Rule)] = &[
    ("unnamed-vacancy", unnamed_vacancy),
    ("self-succession", self_succession),
    ("extracted-name", extracted_name),
    ("generic-term", generic_term),
    ("vacancy-literal", vacancy_literal),
];

/// Classifier for the two-feed source, whose term text reads like
/// "...to replace the Honorable John Adams, resigned".
pub struct AgendaReplacing;

impl ReplacingClassifier for AgendaReplacing {
    fn classify(&self, text: &str, nominee: &str) -> String {
        if text.is_empty() {
            return VACANT.to_string();
        }
        let input = RuleInput {
            text,
            lower: text.to_lowercase(),
            nominee_lower: nominee.trim().to_lowercase(),
        };
        for (_name, rule) in AGENDA_RULES {
            if let Some(category) = rule(&input) {
                return category;
            }
        }
        APPOINTMENT.to_string()
    }

    fn name(&self) -> &'static str {
        "agenda"
    }
}

/// "fill a vacancy" with no named predecessor.
fn unnamed_vacancy(input: &RuleInput) -> Option<String> {
    let l = &input.lower;
    (l.contains("fill a vacancy") && !l.contains("replace") && !l.contains("succeed"))
        .then(|| VACANT.to_string())
}

/// Explicit self-succession, or the nominee's own name in the term text.
fn self_succession(input: &RuleInput) -> Option<String> {
    let l = &input.lower;
    (l.contains("succeed himself")
        || l.contains("succeed herself")
        || (!input.nominee_lower.is_empty() && l.contains(&input.nominee_lower)))
    .then(|| REAPPOINTMENT.to_string())
}

/// Pull the predecessor's name out of "replace/succeed <name>, ...".
fn extracted_name(input: &RuleInput) -> Option<String> {
    let caps = REPLACE_TARGET.captures(input.text)?;
    let residual = caps[1].replace(HONORIFIC, "");
    let residual = residual.trim();
    if residual.to_lowercase().contains("vacan") {
        Some(VACANT.to_string())
    } else {
        Some(residual.to_string())
    }
}

fn generic_term(input: &RuleInput) -> Option<String> {
    let l = &input.lower;
    (l.contains("for the term prescribed by law") || l.contains("for term"))
        .then(|| FOR_TERM.to_string())
}

fn vacancy_literal(input: &RuleInput) -> Option<String> {
    input.lower.contains("vacan").then(|| VACANT.to_string())
}

/// Prefixes stripped by the merged-feed classifier before it reads the rest
/// of the text as a name.
const MERGED_PREFIXES: &[&str] = &["Vice ", "To replace "];

/// Classifier for the merged feed's short "replacing" strings ("Vice John
/// Doe", "Himself", "Vacant"). No extraction grammar and no honorific
/// handling; just prefix stripping over the literal checks.
pub struct MergedReplacing;

impl ReplacingClassifier for MergedReplacing {
    fn classify(&self, text: &str, nominee: &str) -> String {
        if text.is_empty() {
            return VACANT.to_string();
        }
        let lower = text.to_lowercase();
        let nominee_lower = nominee.trim().to_lowercase();
        if lower.contains("himself")
            || lower.contains("herself")
            || (!nominee_lower.is_empty() && lower.contains(&nominee_lower))
        {
            return REAPPOINTMENT.to_string();
        }

        let mut clean = text;
        for prefix in MERGED_PREFIXES {
            if let Some(rest) = clean.strip_prefix(prefix) {
                clean = rest;
            }
        }
        let clean = clean.trim();
        if clean.to_lowercase().contains("vacan") {
            return VACANT.to_string();
        }
        clean.to_string()
    }

    fn name(&self) -> &'static str {
        "merged"
    }
}
