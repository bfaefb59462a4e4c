use std::cmp::Ordering;
use std::fmt;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::app::movie::Movie;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Title,
    Rating,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Rating => "rating",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortKey::Title => SortKey::Rating,
            SortKey::Rating => SortKey::Title,
        }
    }
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search, genre filter and ordering applied to the movie set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub genre: String,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

impl ListQuery {
    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || !self.genre.is_empty()
    }

    /// Query string understood by `GET /movies`, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::with_capacity(4);
        if !self.search.is_empty() {
            params.push(format!("search={}", urlencoding::encode(&self.search)));
        }
        if !self.genre.is_empty() {
            params.push(format!("genre={}", urlencoding::encode(&self.genre)));
        }
        params.push(format!("sortBy={}", self.sort_by));
        params.push(format!("sortOrder={}", self.sort_order));
        params.join("&")
    }
}

/// Produces the visible list: search, then genre, then a stable sort.
pub fn derive(movies: &[Movie], query: &ListQuery) -> Vec<Movie> {
    let needle = query.search.to_lowercase();

    let mut visible: Vec<Movie> = movies
        .iter()
        .filter(|movie| needle.is_empty() || movie.title.to_lowercase().contains(&needle))
        .filter(|movie| query.genre.is_empty() || movie.genre.as_deref() == Some(query.genre.as_str()))
        .cloned()
        .collect();

    visible.sort_by(|a, b| {
        let ordering = match query.sort_by {
            SortKey::Title => collate(&a.title, &b.title),
            SortKey::Rating => a.rating_or_zero().cmp(&b.rating_or_zero()),
        };
        match query.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    visible
}

/// Title ordering: base letters first, ignoring case and accents. Ties
/// put unaccented before accented, then lowercase before uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    fn base(s: &str) -> Vec<char> {
        s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase).collect()
    }
    fn accented(s: &str) -> Vec<char> {
        s.nfd().flat_map(char::to_lowercase).collect()
    }
    base(a)
        .cmp(&base(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        .then_with(|| a.nfd().map(char::is_uppercase).cmp(b.nfd().map(char::is_uppercase)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str, genre: Option<&str>, rating: Option<i32>) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            genre: genre.map(str::to_string),
            rating,
            poster_url: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: None,
        }
    }

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    fn query(sort_by: SortKey, sort_order: SortOrder) -> ListQuery {
        ListQuery { sort_by, sort_order, ..Default::default() }
    }

    fn sample() -> Vec<Movie> {
        vec![
            movie(1, "Dune", Some("Sci-Fi"), Some(5)),
            movie(2, "Clue", Some("Comedy"), Some(3)),
            movie(3, "Alien", Some("Sci-Fi"), None),
            movie(4, "The Matrix", Some("Sci-Fi"), Some(4)),
            movie(5, "Airplane!", Some("comedy"), Some(3)),
            movie(6, "Heat", None, Some(4)),
        ]
    }

    #[test]
    fn genre_filter_is_exact_and_case_sensitive() {
        let q = ListQuery { genre: "Comedy".into(), ..Default::default() };
        let visible = derive(&sample(), &q);
        assert_eq!(titles(&visible), vec!["Clue"]);
        assert!(visible.iter().all(|m| m.genre.as_deref() == Some("Comedy")));
    }

    #[test]
    fn no_filters_keeps_every_record() {
        let movies = sample();
        for q in [query(SortKey::Title, SortOrder::Asc), query(SortKey::Rating, SortOrder::Desc)] {
            let visible = derive(&movies, &q);
            assert_eq!(visible.len(), movies.len());
            let mut ids: Vec<_> = visible.iter().map(|m| m.id).collect();
            ids.sort();
            assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        }
    }

    #[test]
    fn missing_rating_sorts_as_zero() {
        let movies = vec![movie(1, "B", None, Some(3)), movie(2, "A", None, None)];
        let visible = derive(&movies, &query(SortKey::Rating, SortOrder::Asc));
        assert_eq!(titles(&visible), vec!["A", "B"]);
    }

    #[test]
    fn title_sort_ignores_case() {
        let movies = vec![
            movie(1, "Bravo", None, None),
            movie(2, "alpha", None, None),
            movie(3, "Charlie", None, None),
        ];
        let visible = derive(&movies, &query(SortKey::Title, SortOrder::Asc));
        assert_eq!(titles(&visible), vec!["alpha", "Bravo", "Charlie"]);

        let visible = derive(&movies, &query(SortKey::Title, SortOrder::Desc));
        assert_eq!(titles(&visible), vec!["Charlie", "Bravo", "alpha"]);
    }

    #[test]
    fn collate_puts_lowercase_first_on_ties() {
        assert_eq!(collate("heat", "Heat"), Ordering::Less);
        assert_eq!(collate("Heat", "heat"), Ordering::Greater);
        assert_eq!(collate("Heat", "Heat"), Ordering::Equal);
        assert_eq!(collate("a", "B"), Ordering::Less);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let q = ListQuery { search: "mat".into(), ..Default::default() };
        assert_eq!(titles(&derive(&sample(), &q)), vec!["The Matrix"]);

        let q = ListQuery { search: "AIR".into(), ..Default::default() };
        assert_eq!(titles(&derive(&sample(), &q)), vec!["Airplane!"]);
    }

    #[test]
    fn search_and_genre_combine() {
        let q = ListQuery { search: "e".into(), genre: "Sci-Fi".into(), ..Default::default() };
        assert_eq!(titles(&derive(&sample(), &q)), vec!["Alien", "Dune", "The Matrix"]);
    }

    #[test]
    fn rating_ties_keep_input_order_in_both_directions() {
        let movies = vec![
            movie(1, "First", None, Some(3)),
            movie(2, "Top", None, Some(5)),
            movie(3, "Second", None, Some(3)),
        ];
        let asc = derive(&movies, &query(SortKey::Rating, SortOrder::Asc));
        assert_eq!(titles(&asc), vec!["First", "Second", "Top"]);

        let desc = derive(&movies, &query(SortKey::Rating, SortOrder::Desc));
        assert_eq!(titles(&desc), vec!["Top", "First", "Second"]);
    }

    #[test]
    fn derive_is_idempotent() {
        let movies = sample();
        let q = ListQuery { search: "a".into(), sort_by: SortKey::Rating, ..Default::default() };
        assert_eq!(derive(&movies, &q), derive(&movies, &q));
    }

    #[test]
    fn dune_and_clue_end_to_end() {
        let movies = vec![
            movie(1, "Dune", Some("Sci-Fi"), Some(5)),
            movie(2, "Clue", Some("Comedy"), Some(3)),
        ];
        let q = ListQuery { genre: "Sci-Fi".into(), ..Default::default() };
        assert_eq!(titles(&derive(&movies, &q)), vec!["Dune"]);

        let q = query(SortKey::Rating, SortOrder::Desc);
        assert_eq!(titles(&derive(&movies, &q)), vec!["Dune", "Clue"]);
    }

    #[test]
    fn query_string_skips_empty_filters() {
        assert_eq!(ListQuery::default().to_query_string(), "sortBy=title&sortOrder=asc");

        let q = ListQuery {
            search: "star wars".into(),
            genre: "Sci-Fi".into(),
            sort_by: SortKey::Rating,
            sort_order: SortOrder::Desc,
        };
        assert_eq!(q.to_query_string(), "search=star%20wars&genre=Sci-Fi&sortBy=rating&sortOrder=desc");
    }

    #[test]
    fn accented_titles_sort_with_their_base_letter() {
        let movies = vec![
            movie(1, "Zorro", None, None),
            movie(2, "Éclair", None, None),
            movie(3, "Alien", None, None),
        ];
        let visible = derive(&movies, &query(SortKey::Title, SortOrder::Asc));
        assert_eq!(titles(&visible), vec!["Alien", "Éclair", "Zorro"]);

        let visible = derive(&movies, &query(SortKey::Title, SortOrder::Desc));
        assert_eq!(titles(&visible), vec!["Zorro", "Éclair", "Alien"]);
    }

    #[test]
    fn collate_breaks_accent_ties_before_case() {
        assert_eq!(collate("eclair", "éclair"), Ordering::Less);
        assert_eq!(collate("Eclair", "éclair"), Ordering::Less);
        assert_eq!(collate("éclair", "Éclair"), Ordering::Less);
        assert_eq!(collate("Amélie", "Amelie"), Ordering::Greater);
        assert_eq!(collate("Ébène", "Echo"), Ordering::Less);
    }
}
