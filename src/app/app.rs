use std::sync::mpsc;

use ratatui::widgets::ListState;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use throbber_widgets_tui::ThrobberState;

use crate::app::form::{FormMode, FormPhase, MovieForm};
use crate::app::list::MovieList;
use crate::app::movie::Movie;
use crate::app::worker::{Services, WorkerMessage};
use crate::error::WatchlistError;

pub enum CurrentScreen {
    List,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

pub struct App {
    services: Services,
    sender: mpsc::Sender<WorkerMessage>,
    receiver: mpsc::Receiver<WorkerMessage>,
    pub current_screen: CurrentScreen,
    pub input_mode: InputMode,
    pub list: MovieList,
    pub list_state: ListState,
    pub form: MovieForm,
    pub loading_movies: bool,
    pub opening_movie: bool,
    pub submitting: bool,
    pub deleting: bool,
    /// Blocking notification; input waits until it is dismissed.
    pub notice: Option<String>,
    pub picker: Option<Picker>,
    pub poster_preview: Option<StatefulProtocol>,
    pub throbber_state: ThrobberState,
    pub exit: bool,
}

impl App {
    pub fn new(services: Services, picker: Option<Picker>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            services,
            sender,
            receiver,
            current_screen: CurrentScreen::List,
            input_mode: InputMode::Normal,
            list: MovieList::new(),
            list_state: ListState::default(),
            form: MovieForm::new(),
            loading_movies: false,
            opening_movie: false,
            submitting: false,
            deleting: false,
            notice: None,
            picker,
            poster_preview: None,
            throbber_state: ThrobberState::default(),
            exit: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.loading_movies || self.opening_movie || self.submitting || self.deleting
    }

    pub fn reload(&mut self) {
        self.loading_movies = true;
        self.services.spawn_load(self.sender.clone());
    }

    pub fn notify(&mut self, err: WatchlistError) {
        tracing::warn!(error = %err, network = err.is_network(), "flow failed");
        self.notice = Some(err.to_string());
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Applies every message the workers have posted since the last tick.
    pub fn drain_messages(&mut self) {
        while let Ok(message) = self.receiver.try_recv() {
            self.handle_message(message);
        }
    }

    pub fn handle_message(&mut self, message: WorkerMessage) {
        match message {
            WorkerMessage::CatalogLoaded(result) => {
                self.loading_movies = false;
                if let Err(err) = self.list.apply_catalog(result) {
                    self.notify(err);
                }
                self.clamp_selection();
            }
            WorkerMessage::MovieLoaded(result) => {
                self.opening_movie = false;
                match result {
                    Ok(movie) => self.show_form(MovieForm::edit(movie)),
                    Err(err) => self.notify(err),
                }
            }
            WorkerMessage::FormProgress(phase) => {
                self.form.phase = phase;
            }
            WorkerMessage::FormSubmitted(result) => {
                self.submitting = false;
                self.form.phase = FormPhase::Idle;
                match result {
                    Ok(movie) => self.finish_form(movie),
                    Err(err) => self.notify(err),
                }
            }
            WorkerMessage::DeleteFinished(id, result) => {
                self.deleting = false;
                if let Err(err) = self.list.finish_delete(id, result) {
                    self.notify(err);
                }
                self.clamp_selection();
            }
        }
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        self.list_state.selected().and_then(|idx| self.list.visible().get(idx))
    }

    pub fn next_movie(&mut self) {
        let count = self.list.visible().len();
        if count == 0 {
            return;
        }
        let next = self.list_state.selected().map_or(0, |idx| (idx + 1) % count);
        self.list_state.select(Some(next));
    }

    pub fn previous_movie(&mut self) {
        let count = self.list.visible().len();
        if count == 0 {
            return;
        }
        let previous = match self.list_state.selected() {
            Some(0) | None => count - 1,
            Some(idx) => idx - 1,
        };
        self.list_state.select(Some(previous));
    }

    /// Keeps the highlight inside the visible list after it changed.
    pub fn clamp_selection(&mut self) {
        let count = self.list.visible().len();
        if count == 0 {
            self.list_state.select(None);
        } else {
            let idx = self.list_state.selected().unwrap_or(0).min(count - 1);
            self.list_state.select(Some(idx));
        }
    }

    pub fn open_add_form(&mut self) {
        self.show_form(MovieForm::new());
    }

    pub fn open_edit_form(&mut self) {
        let Some(id) = self.selected_movie().map(|m| m.id) else {
            return;
        };
        self.opening_movie = true;
        self.services.spawn_fetch_movie(id, self.sender.clone());
    }

    fn show_form(&mut self, form: MovieForm) {
        self.form = form;
        self.poster_preview = None;
        self.input_mode = InputMode::Normal;
        self.current_screen = CurrentScreen::Form;
    }

    pub fn close_form(&mut self) {
        if self.submitting || self.form.is_busy() {
            return;
        }
        self.form = MovieForm::new();
        self.poster_preview = None;
        self.current_screen = CurrentScreen::List;
    }

    /// Reads the typed image path and rebuilds the preview.
    pub fn select_image(&mut self) {
        self.poster_preview = None;
        let selected = self.form.select_image().map(|image| image.cloned());
        let image = match selected {
            Ok(Some(image)) => image,
            Ok(None) => return,
            Err(err) => return self.notify(err),
        };
        if let Some(picker) = &self.picker {
            match image.decode() {
                Ok(decoded) => self.poster_preview = Some(picker.new_resize_protocol(decoded)),
                Err(err) => tracing::warn!(error = %err, "could not decode poster preview"),
            }
        }
    }

    pub fn submit_form(&mut self) {
        if self.submitting || self.form.is_busy() {
            return;
        }
        if !self.form.image_path.trim().is_empty() && self.form.image.is_none() {
            self.select_image();
            if self.notice.is_some() {
                return;
            }
        }
        self.submitting = true;
        self.services.spawn_submit(self.form.mode.clone(), self.form.input(), self.sender.clone());
    }

    fn finish_form(&mut self, movie: Movie) {
        if let FormMode::Edit(_) = self.form.mode {
            tracing::debug!(id = movie.id, "returning to list after edit");
        }
        self.list.upsert(movie);
        self.form = MovieForm::new();
        self.poster_preview = None;
        self.current_screen = CurrentScreen::List;
        self.clamp_selection();
        self.reload();
    }

    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_movie().map(|m| m.id) {
            self.list.request_delete(id);
        }
    }

    pub fn confirm_delete(&mut self) {
        if self.deleting {
            return;
        }
        if let Some(id) = self.list.pending_delete().map(|m| m.id) {
            self.deleting = true;
            self.services.spawn_delete(id, self.sender.clone());
        }
    }

    pub fn cancel_delete(&mut self) {
        if !self.deleting {
            self.list.cancel_delete();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use image::ImageFormat;

    use super::*;
    use crate::app::form::tests::{Call, FakeService, FakeUploader, movie};
    use crate::app::list::DeleteState;
    use crate::app::upload::ImageFile;

    pub(crate) fn app_with(service: FakeService) -> App {
        app_with_services(Arc::new(service), Arc::new(FakeUploader::failing()))
    }

    fn app_with_services(movies: Arc<FakeService>, uploader: Arc<FakeUploader>) -> App {
        App::new(Services { movies, uploader }, None)
    }

    /// Add form filled in the way a user would before pressing submit.
    fn filled_add_form(app: &mut App, with_image: bool) -> MovieForm {
        app.open_add_form();
        app.form.title = "Dune".into();
        app.form.genre = Some("Sci-Fi".into());
        app.form.rating = Some(5);
        if with_image {
            app.form.image = Some(ImageFile {
                file_name: "dune.png".into(),
                format: ImageFormat::Png,
                bytes: vec![1, 2, 3],
            });
        }
        app.form.clone()
    }

    /// Blocks until one worker message arrives and applies it.
    pub(crate) fn pump(app: &mut App) {
        let message = app.receiver.recv_timeout(Duration::from_secs(5)).expect("worker message");
        app.handle_message(message);
    }

    pub(crate) fn loaded_app(movies: Vec<Movie>) -> App {
        let mut app = app_with(FakeService::with_movies(movies));
        app.reload();
        pump(&mut app);
        app
    }

    #[test]
    fn reload_fills_list_and_selects_first() {
        let app = loaded_app(vec![movie(1, "Dune"), movie(2, "Clue")]);
        assert!(!app.loading_movies);
        assert_eq!(app.list.visible().len(), 2);
        assert_eq!(app.selected_movie().map(|m| m.title.as_str()), Some("Clue"));
    }

    #[test]
    fn failed_reload_shows_notice() {
        let mut app = app_with(FakeService::failing());
        app.reload();
        pump(&mut app);
        assert!(app.notice.as_deref().unwrap_or_default().contains("load movies"));
        assert!(app.list.visible().is_empty());
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn selection_wraps() {
        let mut app = loaded_app(vec![movie(1, "A"), movie(2, "B")]);
        app.previous_movie();
        assert_eq!(app.list_state.selected(), Some(1));
        app.next_movie();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn delete_round_trip_removes_record() {
        let mut app = loaded_app(vec![movie(1, "Alien"), movie(2, "Brazil")]);
        app.request_delete();
        assert!(matches!(app.list.delete_state(), DeleteState::ConfirmingDelete(m) if m.id == 1));

        app.confirm_delete();
        assert!(app.deleting);
        pump(&mut app);

        assert!(!app.deleting);
        assert_eq!(app.list.delete_state(), &DeleteState::Idle);
        let ids: Vec<_> = app.list.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn invalid_submit_keeps_form_open() {
        let mut app = loaded_app(vec![]);
        app.open_add_form();
        app.form.title = "   ".into();
        app.submit_form();
        pump(&mut app);

        assert!(matches!(app.current_screen, CurrentScreen::Form));
        assert_eq!(app.notice.as_deref(), Some("Title is required"));
        assert!(!app.submitting);
        assert_eq!(app.form.title, "   ");
    }

    #[test]
    fn successful_submit_returns_to_list_and_reloads() {
        let mut app = loaded_app(vec![movie(1, "Dune")]);
        app.open_add_form();
        app.form.title = "Clue".into();
        app.submit_form();

        pump(&mut app);
        assert_eq!(app.form.phase, FormPhase::Saving);
        pump(&mut app);
        assert!(matches!(app.current_screen, CurrentScreen::List));
        assert!(app.loading_movies);
        assert!(app.list.movies().iter().any(|m| m.title == "Clue"));

        pump(&mut app);
        assert!(!app.loading_movies);
        assert_eq!(app.list.movies().len(), 2);
    }

    #[test]
    fn edit_opens_prefilled_form() {
        let mut app = loaded_app(vec![movie(4, "Heat")]);
        app.open_edit_form();
        assert!(app.opening_movie);
        pump(&mut app);
        assert!(matches!(app.current_screen, CurrentScreen::Form));
        assert_eq!(app.form.title, "Heat");
        assert!(matches!(app.form.mode, FormMode::Edit(ref m) if m.id == 4));
    }

    #[test]
    fn failed_upload_keeps_form_and_never_creates() {
        let service = Arc::new(FakeService::default());
        let uploader = Arc::new(FakeUploader::failing());
        let mut app = app_with_services(Arc::clone(&service), Arc::clone(&uploader));
        let before = filled_add_form(&mut app, true);

        app.submit_form();
        assert!(app.submitting);
        pump(&mut app);
        assert_eq!(app.form.phase, FormPhase::Uploading);
        pump(&mut app);

        assert!(matches!(app.current_screen, CurrentScreen::Form));
        assert!(!app.submitting);
        assert_eq!(app.form.phase, FormPhase::Idle);
        assert_eq!(app.form.title, "Dune");
        assert_eq!(app.form.rating, Some(5));
        assert_eq!(app.form.image, before.image);
        assert_eq!(app.form, before);
        assert!(app.notice.as_deref().unwrap_or_default().starts_with("Failed to upload image"));
        assert_eq!(*uploader.calls.lock().unwrap(), vec![Call::Upload("dune.png".into())]);
        assert!(!service.calls().iter().any(|call| matches!(call, Call::Create(_))));
    }

    #[test]
    fn failed_save_keeps_form_for_retry() {
        let service = Arc::new(FakeService::failing());
        let mut app = app_with_services(Arc::clone(&service), Arc::new(FakeUploader::failing()));
        let before = filled_add_form(&mut app, false);

        app.submit_form();
        pump(&mut app);
        assert_eq!(app.form.phase, FormPhase::Saving);
        pump(&mut app);

        assert!(matches!(app.current_screen, CurrentScreen::Form));
        assert!(!app.submitting);
        assert_eq!(app.form.phase, FormPhase::Idle);
        assert_eq!(app.form.title, "Dune");
        assert_eq!(app.form.rating, Some(5));
        assert_eq!(app.form.image, None);
        assert_eq!(app.form, before);
        assert!(app.notice.as_deref().unwrap_or_default().contains("create movie"));
        assert!(matches!(service.calls().as_slice(), [Call::Create(draft)] if draft.title == "Dune"));
        assert!(!app.loading_movies);
    }
}
