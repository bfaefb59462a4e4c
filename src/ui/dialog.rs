use crate::app::movie::Movie;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(row);
    cell
}

/// Renders the delete confirmation on top of the list
pub fn render_delete_dialog(frame: &mut Frame, movie: &Movie, deleting: bool) {
    let area = centered(frame.area(), 60, 8);

    let prompt = if deleting {
        Line::from(Span::styled("Deleting...", Style::default().fg(Color::Gray)))
    } else {
        Line::from(vec![
            Span::styled("(y) Delete", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("(n) Cancel", Style::default().fg(Color::White)),
        ])
    };

    let text = vec![
        Line::from(format!("Are you sure you want to delete \"{}\"?", movie.title)),
        Line::from(Span::styled("This action cannot be undone.", Style::default().fg(Color::Gray))),
        Line::from(""),
        prompt,
    ];

    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Delete Movie")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

/// Renders a blocking error notification
pub fn render_notice(frame: &mut Frame, message: &str) {
    let area = centered(frame.area(), 64, 9);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Press (Enter) or (Esc) to dismiss", Style::default().fg(Color::Gray))),
    ];

    let notice = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Error").borders(Borders::ALL));

    frame.render_widget(Clear, area);
    frame.render_widget(notice, area);
}
