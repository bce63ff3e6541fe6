// pwscfrs/src/config/mod.rs

pub mod job;
pub mod species;

pub use job::{CardConfig, JobConfig};
pub use species::SpecieConfig;
