use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use crate::app::api::MovieService;
use crate::app::form::{self, FormInput, FormMode, FormPhase};
use crate::app::list::{Catalog, MovieList};
use crate::app::movie::{Movie, MovieId};
use crate::app::upload::ImageUploader;
use crate::error::WatchlistError;

/// Results posted back to the UI loop by background threads.
#[derive(Debug)]
pub enum WorkerMessage {
    CatalogLoaded(Result<Catalog, WatchlistError>),
    MovieLoaded(Result<Movie, WatchlistError>),
    FormProgress(FormPhase),
    FormSubmitted(Result<Movie, WatchlistError>),
    DeleteFinished(MovieId, Result<(), WatchlistError>),
}

/// Configured collaborators shared with every worker thread.
#[derive(Clone)]
pub struct Services {
    pub movies: Arc<dyn MovieService>,
    pub uploader: Arc<dyn ImageUploader>,
}

impl Services {
    pub fn spawn_load(&self, sender: Sender<WorkerMessage>) {
        let movies = Arc::clone(&self.movies);
        thread::spawn(move || {
            let result = MovieList::fetch_catalog(movies.as_ref());
            let _ = sender.send(WorkerMessage::CatalogLoaded(result));
        });
    }

    pub fn spawn_fetch_movie(&self, id: MovieId, sender: Sender<WorkerMessage>) {
        let movies = Arc::clone(&self.movies);
        thread::spawn(move || {
            let result = movies.get_movie(id).map_err(WatchlistError::persistence("load movie"));
            let _ = sender.send(WorkerMessage::MovieLoaded(result));
        });
    }

    /// Upload and save run on the same thread, one after the other.
    pub fn spawn_submit(&self, mode: FormMode, input: FormInput, sender: Sender<WorkerMessage>) {
        let services = self.clone();
        thread::spawn(move || {
            let progress = sender.clone();
            let result = form::submit(
                services.movies.as_ref(),
                services.uploader.as_ref(),
                &mode,
                &input,
                |phase| {
                    let _ = progress.send(WorkerMessage::FormProgress(phase));
                },
            );
            let _ = sender.send(WorkerMessage::FormSubmitted(result));
        });
    }

    pub fn spawn_delete(&self, id: MovieId, sender: Sender<WorkerMessage>) {
        let movies = Arc::clone(&self.movies);
        thread::spawn(move || {
            let result = movies.delete_movie(id).map_err(WatchlistError::persistence("delete movie"));
            let _ = sender.send(WorkerMessage::DeleteFinished(id, result));
        });
    }
}
