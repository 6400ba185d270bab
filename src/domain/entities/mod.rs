pub mod customer;
pub mod message;
pub mod session;
pub mod ticket;
pub mod user;

pub use customer::*;
pub use message::*;
pub use session::*;
pub use ticket::*;
pub use user::*;
