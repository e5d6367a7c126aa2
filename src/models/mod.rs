//! Core data models for the tipping engine.

mod fixture;
mod projection;
mod round;
mod standings;
mod tip;
mod user;

pub use fixture::*;
pub use projection::*;
pub use round::*;
pub use standings::*;
pub use tip::*;
pub use user::*;
