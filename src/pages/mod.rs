//! HTML pages. Pure functions of their view models, no filesystem access.

pub mod listing;
pub mod viewer;
