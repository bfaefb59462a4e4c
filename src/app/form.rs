use std::path::Path;

use crate::app::api::MovieService;
use crate::app::movie::{GENRE_SUGGESTIONS, MAX_RATING, Movie, MovieDraft};
use crate::app::upload::{ImageFile, ImageUploader};
use crate::error::WatchlistError;

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Add,
    /// Editing keeps the record as loaded so server-owned fields survive the save.
    Edit(Movie),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    Uploading,
    Saving,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Title,
    Genre,
    Rating,
    PosterUrl,
    Image,
    Submit,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        FormField::Title,
        FormField::Genre,
        FormField::Rating,
        FormField::PosterUrl,
        FormField::Image,
        FormField::Submit,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    pub fn is_text(self) -> bool {
        matches!(self, FormField::Title | FormField::PosterUrl | FormField::Image)
    }
}

/// What gets submitted, detached from the widget state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub title: String,
    pub genre: Option<String>,
    pub rating: Option<i32>,
    pub poster_url: Option<String>,
    pub image: Option<ImageFile>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieForm {
    pub mode: FormMode,
    pub title: String,
    pub genre: Option<String>,
    pub rating: Option<i32>,
    pub poster_url: String,
    pub image_path: String,
    pub image: Option<ImageFile>,
    pub focus: FormField,
    pub phase: FormPhase,
}

impl Default for MovieForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Add,
            title: String::new(),
            genre: None,
            rating: None,
            poster_url: String::new(),
            image_path: String::new(),
            image: None,
            focus: FormField::Title,
            phase: FormPhase::Idle,
        }
    }

    pub fn edit(movie: Movie) -> Self {
        Self {
            title: movie.title.clone(),
            genre: movie.genre.clone().filter(|g| !g.is_empty()),
            rating: movie.rating.filter(|r| (1..=MAX_RATING).contains(r)),
            poster_url: movie.poster_url.clone().unwrap_or_default(),
            mode: FormMode::Edit(movie),
            ..Self::new()
        }
    }

    pub fn is_busy(&self) -> bool {
        self.phase != FormPhase::Idle
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add New Movie",
            FormMode::Edit(_) => "Edit Movie",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.phase, &self.mode) {
            (FormPhase::Uploading, _) => "Uploading Image...",
            (FormPhase::Saving, FormMode::Add) => "Creating...",
            (FormPhase::Saving, FormMode::Edit(_)) => "Saving...",
            (FormPhase::Idle, FormMode::Add) => "Add Movie",
            (FormPhase::Idle, FormMode::Edit(_)) => "Save Changes",
        }
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::PosterUrl => Some(&mut self.poster_url),
            FormField::Image => Some(&mut self.image_path),
            _ => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.is_busy() {
            return;
        }
        if self.focus == FormField::Image {
            self.image = None;
        }
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.is_busy() {
            return;
        }
        if self.focus == FormField::Image {
            self.image = None;
        }
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Steps through "no genre", the suggestions, and a custom genre kept from an edited record.
    pub fn cycle_genre(&mut self, forward: bool) {
        if self.is_busy() {
            return;
        }
        let mut options: Vec<Option<String>> = vec![None];
        options.extend(GENRE_SUGGESTIONS.iter().map(|g| Some(g.to_string())));
        if let FormMode::Edit(original) = &self.mode {
            if let Some(custom) = original
                .genre
                .as_ref()
                .filter(|g| !g.is_empty() && !GENRE_SUGGESTIONS.contains(&g.as_str()))
            {
                options.push(Some(custom.clone()));
            }
        }
        let current = options.iter().position(|g| *g == self.genre).unwrap_or(0);
        let len = options.len();
        let next = if forward { (current + 1) % len } else { (current + len - 1) % len };
        self.genre = options.swap_remove(next);
    }

    pub fn cycle_rating(&mut self, forward: bool) {
        if self.is_busy() {
            return;
        }
        let current = self.rating.unwrap_or(0);
        let steps = MAX_RATING + 1;
        let next = if forward { (current + 1) % steps } else { (current + steps - 1) % steps };
        self.rating = (next > 0).then_some(next);
    }

    pub fn set_rating(&mut self, rating: Option<i32>) {
        if !self.is_busy() {
            self.rating = rating.filter(|r| (1..=MAX_RATING).contains(r));
        }
    }

    /// Reads the typed image path; an empty path clears the selection.
    pub fn select_image(&mut self) -> Result<Option<&ImageFile>, WatchlistError> {
        let path = self.image_path.trim();
        if path.is_empty() {
            self.image = None;
            return Ok(None);
        }
        let image = ImageFile::read(Path::new(path))?;
        tracing::debug!(file = %image.file_name, "poster image selected");
        let image = &*self.image.insert(image);
        Ok(Some(image))
    }

    pub fn input(&self) -> FormInput {
        FormInput {
            title: self.title.clone(),
            genre: self.genre.clone(),
            rating: self.rating,
            poster_url: Some(self.poster_url.trim().to_string()),
            image: self.image.clone(),
        }
    }
}

/// Validates, uploads the poster if one was picked, then creates or updates the record.
///
/// Calls are strictly sequential: nothing is written to the service unless the upload succeeded.
pub fn submit(
    service: &dyn MovieService,
    uploader: &dyn ImageUploader,
    mode: &FormMode,
    input: &FormInput,
    mut on_phase: impl FnMut(FormPhase),
) -> Result<Movie, WatchlistError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(WatchlistError::Validation("Title is required".to_string()));
    }
    if let Some(rating) = input.rating.filter(|r| !(1..=MAX_RATING).contains(r)) {
        return Err(WatchlistError::Validation(format!(
            "Rating must be between 1 and {MAX_RATING}, got {rating}"
        )));
    }

    let poster_url = match &input.image {
        Some(image) => {
            on_phase(FormPhase::Uploading);
            Some(uploader.upload(image)?)
        }
        None => input.poster_url.clone(),
    };

    let draft = MovieDraft {
        title: title.to_string(),
        genre: input.genre.clone().filter(|g| !g.is_empty()),
        rating: input.rating,
        poster_url: poster_url.filter(|u| !u.is_empty()),
    };

    on_phase(FormPhase::Saving);
    match mode {
        FormMode::Add => {
            let movie = service.create_movie(&draft).map_err(WatchlistError::persistence("create movie"))?;
            tracing::info!(id = movie.id, title = %movie.title, "movie created");
            Ok(movie)
        }
        FormMode::Edit(original) => {
            service
                .update_movie(original.id, &draft)
                .map_err(WatchlistError::persistence("update movie"))?;
            tracing::info!(id = original.id, title = %draft.title, "movie updated");
            Ok(original.with_draft(&draft))
        }
    }
}
