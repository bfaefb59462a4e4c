use serde::{Deserialize, Serialize};

pub type MovieId = i64;

/// Genres offered by the add/edit form, independent of what the service reports.
pub const GENRE_SUGGESTIONS: [&str; 14] = [
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Fantasy",
    "Horror",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Thriller",
    "Western",
];

pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub poster_url: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of create and update requests. Absent fields are left out of the JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl Movie {
    /// The record as it looks after `draft` has been saved over it.
    pub fn with_draft(&self, draft: &MovieDraft) -> Movie {
        Movie {
            title: draft.title.clone(),
            genre: draft.genre.clone(),
            rating: draft.rating,
            poster_url: draft.poster_url.clone(),
            ..self.clone()
        }
    }

    pub fn rating_or_zero(&self) -> i32 {
        self.rating.unwrap_or(0)
    }
}
