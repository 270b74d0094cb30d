//! Month-view calendar: grid construction and month navigation.

mod grid;
mod navigation;

pub use grid::*;
pub use navigation::*;
