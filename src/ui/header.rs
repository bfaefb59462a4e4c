use crate::app::{App, CurrentScreen};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the title bar with the watchlist counts
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title_block = Block::default().borders(Borders::ALL).style(Style::default());

    let subtitle = match app.current_screen {
        CurrentScreen::List => format!(
            "  {} of {} movies",
            app.list.visible().len(),
            app.list.movies().len()
        ),
        CurrentScreen::Form => format!("  {}", app.form.heading()),
    };

    let line = Line::from(vec![
        Span::styled(
            "Movie Watchlist",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Span::styled(subtitle, Style::default().fg(Color::Gray)),
    ]);

    frame.render_widget(Paragraph::new(line).block(title_block), area);
}
