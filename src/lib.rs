// Library exports for the Colosseum Survival agent
// The turn adapter and the replay tool both drive the decision logic through this crate.

pub mod bot;
pub mod config;
pub mod connectivity;
pub mod debug_logger;
pub mod heuristic;
pub mod moves;
pub mod replay;
pub mod types;
