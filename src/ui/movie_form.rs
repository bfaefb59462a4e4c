use crate::app::App;
use crate::app::form::{FormField, MovieForm};
use crate::app::utils::stars;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use ratatui_image::{Resize, StatefulImage, protocol::StatefulProtocol};

/// Renders the add/edit form next to the poster preview
pub fn render_movie_form(frame: &mut Frame, app: &mut App, area: Rect) {
    let outer_block = Block::default()
        .title(app.form.heading())
        .borders(Borders::ALL)
        .style(Style::default());

    let inner_area = outer_block.inner(area);
    frame.render_widget(outer_block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Fields
            Constraint::Percentage(40), // Poster
        ])
        .split(inner_area);

    render_fields(frame, columns[0], &app.form);
    render_poster_section(frame, columns[1], app);
}

fn field_block(form: &MovieForm, field: FormField, title: &'static str) -> Block<'static> {
    let style = if form.focus == field {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default().title(title).borders(Borders::ALL).border_style(style)
}

fn text_value(value: &str, placeholder: &str, focused: bool) -> Line<'static> {
    if focused {
        Line::from(format!("{value}▏"))
    } else if value.is_empty() {
        Line::from(Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(value.to_string())
    }
}

fn render_fields(frame: &mut Frame, area: Rect, form: &MovieForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Genre
            Constraint::Length(3), // Rating
            Constraint::Length(3), // Poster URL
            Constraint::Length(3), // Image file
            Constraint::Length(3), // Submit
            Constraint::Min(0),
        ])
        .split(area);

    let title = text_value(&form.title, "Enter movie title", form.focus == FormField::Title);
    frame.render_widget(
        Paragraph::new(title).block(field_block(form, FormField::Title, "Title *")),
        chunks[0],
    );

    let genre = match &form.genre {
        Some(genre) => Line::from(format!("◀ {genre} ▶")),
        None => Line::from(Span::styled("◀ Select a genre ▶", Style::default().fg(Color::DarkGray))),
    };
    frame.render_widget(
        Paragraph::new(genre).block(field_block(form, FormField::Genre, "Genre (Optional)")),
        chunks[1],
    );

    let rating = match form.rating {
        Some(value) => Line::from(vec![
            Span::styled(stars(Some(value)), Style::default().fg(Color::Yellow)),
            Span::raw(format!("  {value} {}", if value == 1 { "Star" } else { "Stars" })),
        ]),
        None => Line::from(Span::styled("Select a rating (1-5)", Style::default().fg(Color::DarkGray))),
    };
    frame.render_widget(
        Paragraph::new(rating).block(field_block(form, FormField::Rating, "Rating (Optional)")),
        chunks[2],
    );

    let poster_url = text_value(&form.poster_url, "https://...", form.focus == FormField::PosterUrl);
    frame.render_widget(
        Paragraph::new(poster_url).block(field_block(form, FormField::PosterUrl, "Poster URL (Optional)")),
        chunks[3],
    );

    let image_title = if form.image.is_some() { "Poster Image ✓" } else { "Poster Image (Optional)" };
    let image = text_value(&form.image_path, "path/to/poster.jpg", form.focus == FormField::Image);
    frame.render_widget(
        Paragraph::new(image).block(field_block(form, FormField::Image, image_title)),
        chunks[4],
    );

    let button_style = if form.is_busy() {
        Style::default().fg(Color::Gray)
    } else if form.focus == FormField::Submit {
        Style::default().fg(Color::Black).bg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(form.submit_label(), button_style))
            .alignment(Alignment::Center)
            .block(field_block(form, FormField::Submit, "")),
        chunks[5],
    );
}

/// Renders the poster section
fn render_poster_section(frame: &mut Frame, area: Rect, app: &mut App) {
    if let Some(protocol) = &mut app.poster_preview {
        let image = StatefulImage::<StatefulProtocol>::default().resize(Resize::Fit(None));

        let poster_block = Block::default().borders(Borders::ALL).title("Preview");

        let inner_area = poster_block.inner(area);
        frame.render_widget(poster_block, area);
        frame.render_stateful_widget(image, inner_area, protocol);
        return;
    }

    let hint = match (&app.form.image, app.form.poster_url.is_empty()) {
        (Some(image), _) => format!("{} selected", image.file_name),
        (None, false) => "Poster URL will be used as is".to_string(),
        (None, true) => "No poster selected".to_string(),
    };

    let placeholder_text = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::Gray))),
    ];

    let placeholder_paragraph = Paragraph::new(placeholder_text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Preview"));

    frame.render_widget(placeholder_paragraph, area);
}
