pub mod api;
pub mod form;
pub mod input;
pub mod list;
pub mod movie;
pub mod pipeline;
pub mod upload;
pub mod utils;
pub mod worker;

#[allow(clippy::module_inception)]
pub(crate) mod app;

pub use app::{App, CurrentScreen, InputMode};
