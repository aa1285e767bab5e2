//! UI layer for desktop GUI: app shell, search form, and result cards.

pub mod app;

pub use app::StorySearchApp;
