pub mod audio_service;
pub mod call_service;
pub mod end_confirmation_service;
pub mod message_service;
pub mod ticket_service;

pub use audio_service::AudioService;
pub use call_service::{CallPanelController, DEFAULT_LINK_CONFIRM_DELAY};
pub use end_confirmation_service::{CountdownHandle, EndConfirmationService};
pub use message_service::MessageService;
pub use ticket_service::{TicketLookup, TicketService};
