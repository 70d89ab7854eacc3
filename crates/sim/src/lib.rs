//! Seeded batch simulation of draw strategies over the core engine API.

mod config;
mod error;
mod simulator;
mod strategy;
mod trace;

pub use config::*;
pub use error::*;
pub use simulator::*;
pub use strategy::*;
pub use trace::*;
