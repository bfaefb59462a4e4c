use crate::app::api::MovieService;
use crate::app::movie::{Movie, MovieId};
use crate::app::pipeline::{ListQuery, SortKey, SortOrder, derive};
use crate::error::WatchlistError;

/// Everything one `load` brings back from the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub movies: Vec<Movie>,
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DeleteState {
    #[default]
    Idle,
    ConfirmingDelete(Movie),
}

/// Owns the movie set and the filter/sort inputs; `visible` is always `derive(movies, query)`.
#[derive(Debug, Clone, Default)]
pub struct MovieList {
    movies: Vec<Movie>,
    genres: Vec<String>,
    query: ListQuery,
    visible: Vec<Movie>,
    delete: DeleteState,
}

impl MovieList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn visible(&self) -> &[Movie] {
        &self.visible
    }

    pub fn delete_state(&self) -> &DeleteState {
        &self.delete
    }

    fn refresh(&mut self) {
        self.visible = derive(&self.movies, &self.query);
    }

    /// Fetches movies and genres. Any failure fails the whole load.
    pub fn fetch_catalog(service: &dyn MovieService) -> Result<Catalog, WatchlistError> {
        let movies = service.list_movies(None).map_err(WatchlistError::persistence("load movies"))?;
        let genres = service.list_genres().map_err(WatchlistError::persistence("load genres"))?;
        Ok(Catalog { movies, genres })
    }

    /// Replaces state wholesale on success; a failure leaves the current data in place.
    pub fn apply_catalog(&mut self, result: Result<Catalog, WatchlistError>) -> Result<(), WatchlistError> {
        let catalog = result?;
        tracing::info!(movies = catalog.movies.len(), genres = catalog.genres.len(), "catalog loaded");
        self.movies = catalog.movies;
        self.genres = catalog.genres;
        self.refresh();
        Ok(())
    }

    pub fn load(&mut self, service: &dyn MovieService) -> Result<(), WatchlistError> {
        self.apply_catalog(Self::fetch_catalog(service))
    }

    /// Replaces the record with the same id, or appends it if it is new.
    pub fn upsert(&mut self, movie: Movie) {
        match self.movies.iter_mut().find(|m| m.id == movie.id) {
            Some(existing) => *existing = movie,
            None => self.movies.push(movie),
        }
        self.refresh();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.refresh();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.query.search.push(c);
        self.refresh();
    }

    pub fn pop_search_char(&mut self) {
        self.query.search.pop();
        self.refresh();
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    pub fn set_genre(&mut self, genre: impl Into<String>) {
        self.query.genre = genre.into();
        self.refresh();
    }

    /// Steps the genre filter through "all genres" and the service's genre list.
    pub fn cycle_genre(&mut self) {
        let next = match self.genres.iter().position(|g| *g == self.query.genre) {
            _ if self.query.genre.is_empty() => self.genres.first().cloned(),
            Some(idx) => self.genres.get(idx + 1).cloned(),
            None => None,
        };
        self.set_genre(next.unwrap_or_default());
    }

    pub fn set_sort_by(&mut self, sort_by: SortKey) {
        self.query.sort_by = sort_by;
        self.refresh();
    }

    pub fn toggle_sort_by(&mut self) {
        self.set_sort_by(self.query.sort_by.toggled());
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) {
        self.query.sort_order = sort_order;
        self.refresh();
    }

    pub fn toggle_sort_order(&mut self) {
        self.set_sort_order(self.query.sort_order.toggled());
    }

    /// Opens the confirmation for `id`. Returns false if no such record is loaded.
    pub fn request_delete(&mut self, id: MovieId) -> bool {
        match self.movies.iter().find(|m| m.id == id) {
            Some(movie) => {
                self.delete = DeleteState::ConfirmingDelete(movie.clone());
                true
            }
            None => false,
        }
    }

    pub fn cancel_delete(&mut self) {
        self.delete = DeleteState::Idle;
    }

    pub fn pending_delete(&self) -> Option<&Movie> {
        match &self.delete {
            DeleteState::ConfirmingDelete(movie) => Some(movie),
            DeleteState::Idle => None,
        }
    }

    /// Applies the outcome of a delete call. The dialog closes either way.
    pub fn finish_delete(
        &mut self,
        id: MovieId,
        result: Result<(), WatchlistError>,
    ) -> Result<(), WatchlistError> {
        self.delete = DeleteState::Idle;
        result?;
        self.movies.retain(|m| m.id != id);
        self.refresh();
        tracing::info!(id, "movie deleted");
        Ok(())
    }

    /// Deletes the pending record. Returns the deleted id, or `None` if nothing was pending.
    pub fn confirm_delete(&mut self, service: &dyn MovieService) -> Result<Option<MovieId>, WatchlistError> {
        let Some(id) = self.pending_delete().map(|m| m.id) else {
            return Ok(None);
        };
        let result = service.delete_movie(id).map_err(WatchlistError::persistence("delete movie"));
        self.finish_delete(id, result).map(|()| Some(id))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::app::form::tests::{Call, FakeService, movie};

    fn rated(id: MovieId, title: &str, genre: &str, rating: i32) -> Movie {
        Movie { genre: Some(genre.into()), rating: Some(rating), ..movie(id, title) }
    }

    fn loaded(movies: Vec<Movie>) -> (MovieList, FakeService) {
        let mut service = FakeService::with_movies(movies);
        service.genres = vec!["Comedy".into(), "Sci-Fi".into()];
        let mut list = MovieList::new();
        list.load(&service).unwrap();
        (list, service)
    }

    fn titles(list: &MovieList) -> Vec<&str> {
        list.visible().iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn load_replaces_state_and_derives() {
        let (list, service) = loaded(vec![rated(1, "Dune", "Sci-Fi", 5), rated(2, "Clue", "Comedy", 3)]);
        assert_eq!(service.calls(), vec![Call::List, Call::Genres]);
        assert_eq!(list.genres(), ["Comedy", "Sci-Fi"]);
        assert_eq!(titles(&list), vec!["Clue", "Dune"]);
    }

    #[test]
    fn failed_load_keeps_stale_data() {
        let (mut list, _) = loaded(vec![movie(1, "Dune")]);
        let result = list.load(&FakeService::failing());
        assert_matches!(result, Err(WatchlistError::Persistence { action: "load movies", .. }));
        assert_eq!(titles(&list), vec!["Dune"]);
    }

    #[test]
    fn every_input_change_rederives() {
        let (mut list, _) = loaded(vec![rated(1, "Dune", "Sci-Fi", 5), rated(2, "Clue", "Comedy", 3)]);

        list.set_genre("Sci-Fi");
        assert_eq!(titles(&list), vec!["Dune"]);

        list.set_genre("");
        list.set_sort_by(SortKey::Rating);
        list.set_sort_order(SortOrder::Desc);
        assert_eq!(titles(&list), vec!["Dune", "Clue"]);

        list.push_search_char('C');
        assert_eq!(titles(&list), vec!["Clue"]);
        list.pop_search_char();
        assert_eq!(titles(&list).len(), 2);

        list.upsert(rated(3, "Alien", "Sci-Fi", 4));
        assert_eq!(titles(&list), vec!["Dune", "Alien", "Clue"]);
    }

    #[test]
    fn genre_filter_cycles_back_to_all() {
        let (mut list, _) = loaded(vec![]);
        list.cycle_genre();
        assert_eq!(list.query().genre, "Comedy");
        list.cycle_genre();
        assert_eq!(list.query().genre, "Sci-Fi");
        list.cycle_genre();
        assert_eq!(list.query().genre, "");
    }

    #[test]
    fn delete_removes_only_that_id() {
        let (mut list, service) = loaded(vec![movie(1, "Dune"), movie(2, "Clue"), movie(3, "Heat")]);

        assert!(list.request_delete(2));
        assert_matches!(list.delete_state(), DeleteState::ConfirmingDelete(m) if m.id == 2);

        assert_eq!(list.confirm_delete(&service).unwrap(), Some(2));
        assert_eq!(list.delete_state(), &DeleteState::Idle);
        let ids: Vec<_> = list.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(service.calls(), vec![Call::List, Call::Genres, Call::Delete(2)]);
    }

    #[test]
    fn failed_delete_leaves_set_and_closes_dialog() {
        let (mut list, _) = loaded(vec![movie(1, "Dune"), movie(2, "Clue")]);
        let before = list.movies().to_vec();

        list.request_delete(1);
        let result = list.confirm_delete(&FakeService::failing());

        assert_matches!(result, Err(WatchlistError::Persistence { action: "delete movie", .. }));
        assert_eq!(list.movies(), before.as_slice());
        assert_eq!(list.delete_state(), &DeleteState::Idle);
    }

    #[test]
    fn cancel_and_unknown_ids_stay_idle() {
        let (mut list, service) = loaded(vec![movie(1, "Dune")]);
        assert!(!list.request_delete(99));
        assert_eq!(list.delete_state(), &DeleteState::Idle);

        list.request_delete(1);
        list.cancel_delete();
        assert_eq!(list.delete_state(), &DeleteState::Idle);
        assert_eq!(list.confirm_delete(&service).unwrap(), None);
        assert!(!service.calls().contains(&Call::Delete(1)));
    }
}
