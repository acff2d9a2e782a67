//! Domain types shared by every mastery crate.

pub mod observation;
pub mod settings;
pub mod tier;

pub use observation::GroupObservation;
pub use settings::{EngineSettings, PriorParameters, SolverSettings, Thresholds};
pub use tier::MasteryTier;
