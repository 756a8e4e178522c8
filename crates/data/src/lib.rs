//! File-backed inputs for the planner: deck lists, collections, printings
//! and pool-size tables, plus the planner config.

pub mod deck;
pub mod load;
pub mod schema;

pub use deck::*;
pub use load::*;
pub use schema::*;
