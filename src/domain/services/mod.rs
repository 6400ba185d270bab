pub mod audio_check;
pub mod call_panel;
pub mod end_confirmation;
pub mod session_filter;
pub mod ticket_filter;

pub use audio_check::*;
pub use call_panel::*;
pub use end_confirmation::*;
pub use session_filter::*;
pub use ticket_filter::*;
