pub mod events;
pub mod i18n;
pub mod utils;

pub use events::*;
pub use i18n::*;
pub use utils::*;
