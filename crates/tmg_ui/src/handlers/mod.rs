//! Handler modules for application messages.
//!
//! Each module adds `impl App` methods for one area of the window.

pub mod browse;
pub mod csv;
pub mod helpers;
pub mod processing;
