use crate::app::{App, InputMode};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Renders the search box, genre filter and sort controls
pub fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let query = app.list.query();
    let searching = app.input_mode == InputMode::Search;

    let search_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let search_text = match (searching, query.search.is_empty()) {
        (true, _) => format!("{}▏", query.search),
        (false, true) => "Search movies by title...".to_string(),
        (false, false) => query.search.clone(),
    };

    let genre = if query.genre.is_empty() { "All Genres" } else { query.genre.as_str() };
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::styled("/ ", label),
        Span::styled(search_text, search_style),
        Span::styled("   Genre: ", label),
        Span::styled(genre.to_string(), value),
        Span::styled("   Sort: ", label),
        Span::styled(query.sort_by.to_string(), value),
        Span::raw(" "),
        Span::styled(query.sort_order.to_string(), value),
    ]);

    let block = Block::default().title("Filters").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(line).block(block), area);
}
