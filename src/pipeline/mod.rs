pub mod board;
pub mod dates;
pub mod merge;
pub mod processor;
pub mod replacing;
