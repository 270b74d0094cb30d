//! Collaborators injected into the store and application.
//!
//! The store never reads the system clock or generates random ids on its
//! own; it asks these traits, so tests can pin both down.

mod clock;
mod ids;

pub use clock::*;
pub use ids::*;
