//! Pack scoring and wildcard planning. Keep this crate free of IO and
//! platform concerns.

pub mod budget;
pub mod cards;
pub mod config;
pub mod events;
pub mod needs;
pub mod planner;
pub mod pool;
pub mod ranking;
pub mod run;
pub mod scoring;

pub use budget::*;
pub use cards::*;
pub use config::*;
pub use events::*;
pub use needs::*;
pub use planner::*;
pub use pool::*;
pub use ranking::*;
pub use run::*;
pub use scoring::*;
