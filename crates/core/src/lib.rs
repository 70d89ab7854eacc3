//! Draw engine for a coin-operated gacha vending machine. Keep this crate free
//! of IO and platform concerns.

pub mod config;
pub mod engine;
pub mod events;
pub mod locale;
pub mod messages;
pub mod pity;
pub mod rng;
pub mod state;

pub use config::*;
pub use engine::*;
pub use events::*;
pub use locale::*;
pub use messages::*;
pub use pity::*;
pub use rng::*;
pub use state::*;
