#![allow(unused_imports)]
pub mod ticket_helpers;
pub mod test_state;

pub use ticket_helpers::*;
pub use test_state::*;
