pub mod console;
pub mod services;
pub mod state;

pub use console::AppState;
pub use state::{ActiveView, ConsoleState, TicketSelection};
