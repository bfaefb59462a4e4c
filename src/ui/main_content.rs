use crate::app::App;
use crate::app::utils::{format_timestamp, stars};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tui_big_text::{BigText, PixelSize};

/// Renders the movie list or the empty state
pub fn render_main_content(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.list.visible().is_empty() {
        render_empty_state(frame, app, area);
        return;
    }

    let title = format!("Movies ({} - Use ↑↓ or j/k to scroll)", app.list.visible().len());

    let items: Vec<ListItem> = app
        .list
        .visible()
        .iter()
        .map(|movie| {
            let rating_style = if movie.rating.is_some() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let mut details = vec![Span::styled("  ", Style::default())];
            if let Some(genre) = &movie.genre {
                details.push(Span::styled(format!("{genre}  "), Style::default().fg(Color::Cyan)));
            }
            details.push(Span::styled(stars(movie.rating), rating_style));
            details.push(Span::styled(
                format!("  added {}", format_timestamp(&movie.created_at)),
                Style::default().fg(Color::Gray),
            ));
            if movie.poster_url.is_some() {
                details.push(Span::styled("  [poster]", Style::default().fg(Color::DarkGray)));
            }

            ListItem::new(vec![
                Line::from(Span::styled(
                    movie.title.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(details),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_empty_state(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let message = if app.list.query().is_filtered() {
        "No movies found matching your filters"
    } else {
        "No movies in your watchlist yet. Press (a) to add your first movie!"
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Big text
            Constraint::Min(1),    // Message
        ])
        .split(inner);

    let big_text = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD))
        .lines(vec!["EMPTY".into()])
        .alignment(Alignment::Center)
        .build();
    frame.render_widget(big_text, chunks[0]);

    let paragraph = Paragraph::new(Line::from(Span::styled(message, Style::default().fg(Color::Gray))))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, chunks[1]);
}
