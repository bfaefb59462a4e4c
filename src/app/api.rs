use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::Serialize;

use crate::app::movie::{Movie, MovieDraft, MovieId};
use crate::app::pipeline::ListQuery;
use crate::error::{ApiError, truncate_body};

/// The remote movie service as the client consumes it.
pub trait MovieService: Send + Sync {
    fn list_movies(&self, query: Option<&ListQuery>) -> Result<Vec<Movie>, ApiError>;
    fn get_movie(&self, id: MovieId) -> Result<Movie, ApiError>;
    fn list_genres(&self) -> Result<Vec<String>, ApiError>;
    fn create_movie(&self, draft: &MovieDraft) -> Result<Movie, ApiError>;
    fn update_movie(&self, id: MovieId, draft: &MovieDraft) -> Result<(), ApiError>;
    fn delete_movie(&self, id: MovieId) -> Result<(), ApiError>;
}

#[derive(Serialize)]
struct MovieUpdate<'a> {
    id: MovieId,
    #[serde(flatten)]
    draft: &'a MovieDraft,
}

/// Blocking JSON client for the movie REST API.
pub struct MovieApi {
    client: Client,
    base_url: String,
}

impl MovieApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("watchlist_tui/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn movies_url(&self, query: Option<&ListQuery>) -> String {
        match query {
            Some(query) => format!("{}/movies?{}", self.base_url, query.to_query_string()),
            None => format!("{}/movies", self.base_url),
        }
    }

    fn movie_url(&self, id: MovieId) -> String {
        format!("{}/movies/{}", self.base_url, id)
    }

    fn genres_url(&self) -> String {
        format!("{}/movies/genres", self.base_url)
    }
}

/// Turns a non-2xx answer into `ApiError::Status`, keeping the body for the message.
fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ApiError::Status { status, body: truncate_body(body) })
}

impl MovieService for MovieApi {
    fn list_movies(&self, query: Option<&ListQuery>) -> Result<Vec<Movie>, ApiError> {
        let url = self.movies_url(query);
        tracing::debug!(%url, "listing movies");
        let movies: Vec<Movie> = check(self.client.get(url).send()?)?.json()?;
        Ok(movies)
    }

    fn get_movie(&self, id: MovieId) -> Result<Movie, ApiError> {
        tracing::debug!(id, "fetching movie");
        Ok(check(self.client.get(self.movie_url(id)).send()?)?.json()?)
    }

    fn list_genres(&self) -> Result<Vec<String>, ApiError> {
        tracing::debug!("listing genres");
        Ok(check(self.client.get(self.genres_url()).send()?)?.json()?)
    }

    fn create_movie(&self, draft: &MovieDraft) -> Result<Movie, ApiError> {
        tracing::debug!(title = %draft.title, "creating movie");
        let response = self.client.post(self.movies_url(None)).json(draft).send()?;
        Ok(check(response)?.json()?)
    }

    fn update_movie(&self, id: MovieId, draft: &MovieDraft) -> Result<(), ApiError> {
        tracing::debug!(id, title = %draft.title, "updating movie");
        let body = MovieUpdate { id, draft };
        check(self.client.put(self.movie_url(id)).json(&body).send()?)?;
        Ok(())
    }

    fn delete_movie(&self, id: MovieId) -> Result<(), ApiError> {
        tracing::debug!(id, "deleting movie");
        check(self.client.delete(self.movie_url(id)).send()?)?;
        Ok(())
    }
}
