//! CLI commands module.

mod config;
mod speak;
mod util;
mod voices;

pub use config::ConfigCommand;
pub use speak::SpeakCommand;
pub use voices::VoicesCommand;

pub(crate) use util::*;
