use crate::app::{App, CurrentScreen};
use crate::app::list::DeleteState;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use super::dialog::{render_delete_dialog, render_notice};
use super::filters::render_filters;
use super::footer::render_footer;
use super::header::render_header;
use super::loading::render_loading;
use super::main_content::render_main_content;
use super::movie_form::render_movie_form;

/// Main UI rendering function that orchestrates all UI components
pub fn ui(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.current_screen {
        CurrentScreen::Form => render_movie_form(frame, app, chunks[1]),
        CurrentScreen::List => {
            let content = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(1)])
                .split(chunks[1]);

            render_filters(frame, app, content[0]);
            if app.loading_movies && app.list.movies().is_empty() {
                render_loading(frame, app, content[1]);
            } else {
                render_main_content(frame, app, content[1]);
            }
        }
    }

    render_footer(frame, app, chunks[2]);

    if let DeleteState::ConfirmingDelete(movie) = app.list.delete_state() {
        render_delete_dialog(frame, movie, app.deleting);
    }
    if let Some(notice) = &app.notice {
        render_notice(frame, notice);
    }
}
