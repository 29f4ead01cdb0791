pub mod municipalities;

pub use municipalities::{load_municipalities, Municipality, MunicipalityLookup};
