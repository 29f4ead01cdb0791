/// Default endpoint for the Senate nominations feed.
pub const NOMINATIONS_API: &str = "https://www.njleg.state.nj.us/api/senateNominations";

/// Sentinel used wherever a field has no usable value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Calendar-date format used throughout the final table.
pub const MDY_FORMAT: &str = "%m/%d/%Y";

/// Target year when neither the CLI nor the config file supplies one.
pub const DEFAULT_TARGET_YEAR: i32 = 2025;

/// Default location of the municipality-to-county reference file.
pub const MUNICIPALITIES_FILE: &str = "data/municipalities.xml";
