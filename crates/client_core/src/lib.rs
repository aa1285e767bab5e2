//! Client-side core of the story search tool: owns the query text, runs one
//! analyze request per submission against the hybrid retrieval backend, and
//! projects the outcome into a presentation the frontends draw as-is.

pub mod config;
pub mod controller;
pub mod error;
pub mod query;
pub mod render;
pub mod transport;
pub mod view;

pub use config::{load_settings, ClientSettings, OverlapPolicy};
pub use controller::{Generation, PendingSearch, SearchController, Settlement};
pub use error::SearchError;
pub use query::QueryStore;
pub use render::{Presentation, ResultCard, SubmitAffordance};
pub use transport::{HttpSearchBackend, SearchBackend};
pub use view::{ResultSet, ViewState};

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod controller_tests;

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod render_tests;

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod transport_tests;

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
