pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::*;
pub use config::*;
pub use shared::events::LocalEventBus;
