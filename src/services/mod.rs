//! Host-side services: the vault, user notices and the per-note dispatcher.

pub mod dispatcher;
pub mod notice;
pub mod vault;

pub use dispatcher::*;
pub use notice::*;
pub use vault::*;
