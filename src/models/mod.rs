pub mod note;
pub mod trigger;

pub use note::*;
pub use trigger::*;
