use crate::app::{App, CurrentScreen, InputMode};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Text,
    widgets::{Block, Borders, Paragraph},
};

/// Returns the appropriate instruction text based on app state
fn get_instruction_text(app: &App) -> &'static str {
    if app.notice.is_some() {
        return "(Enter/Esc) dismiss";
    }
    match app.current_screen {
        CurrentScreen::List => {
            if app.list.pending_delete().is_some() {
                "(y) to confirm, (n) to cancel"
            } else if app.input_mode == InputMode::Search {
                "Type to filter, (Enter) keep search, (Esc) clear"
            } else if app.loading_movies {
                "Loading movies... (q) to quit"
            } else if app.list.movies().is_empty() {
                "(a) add movie, (r) reload, (q) quit"
            } else {
                "(↑↓/jk) scroll, (/) search, (g) genre, (s) sort, (o) order, (a) add, (e) edit, (d) delete, (r) reload, (q) quit"
            }
        }
        CurrentScreen::Form => {
            if app.submitting || app.form.is_busy() {
                "Saving..."
            } else {
                "(Tab) next field, (←→) choose, (Enter) submit, (Esc) cancel"
            }
        }
    }
}

/// Renders the footer with instructions at the bottom of the screen
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let bottom_block = Block::default().borders(Borders::ALL).style(Style::default());

    let instruction_text = get_instruction_text(app);
    let bottom = Paragraph::new(Text::styled(instruction_text, Style::default())).block(bottom_block);

    frame.render_widget(bottom, area);
}
