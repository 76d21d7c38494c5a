//! Window pages.

pub mod main_window;
