mod dialog;
mod filters;
mod footer;
mod header;
mod loading;
mod main_content;
mod movie_form;

#[allow(clippy::module_inception)]
mod ui;

pub use ui::ui;
