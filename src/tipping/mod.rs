//! Round lifecycle and tip eligibility engine.
//!
//! Pure functions over fixtures and tip history. Nothing here touches
//! storage or the clock directly; callers pass a reference instant so
//! every operation is re-runnable for any historical moment.

mod eligibility;
mod projections;
mod rounds;
mod submission;

pub use eligibility::*;
pub use projections::*;
pub use rounds::*;
pub use submission::*;
