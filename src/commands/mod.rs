pub mod notes;
pub mod settings;

pub use notes::*;
pub use settings::*;
