use serde::Deserialize;

/// JSON body accepted by movie create and update. Keys map one-to-one onto
/// movie columns; anything absent is stored as null.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MovieInput {
    pub id: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<i32>,
    pub director_id: Option<i32>,
}

/// Filter parameters of a movie list request.
#[derive(Debug, Default)]
pub struct MovieListQuery {
    director_id: Option<String>,
    genre_id: Option<String>,
}

/// Which subset of movies a list request asks for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MovieFilter {
    All,
    Director(i32),
    Genre(i32),
    /// A filter value that can never match a stored id.
    Unmatchable,
}

impl MovieListQuery {
    /// Keeps the first value of each repeated key; unknown keys are ignored.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "director_id" => &mut query.director_id,
                "genre_id" => &mut query.genre_id,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// `director_id` wins when both are supplied; blank values count as absent.
    pub fn filter(&self) -> MovieFilter {
        if let Some(raw) = non_blank(&self.director_id) {
            return raw.parse().map(MovieFilter::Director).unwrap_or(MovieFilter::Unmatchable);
        }
        if let Some(raw) = non_blank(&self.genre_id) {
            return raw.parse().map(MovieFilter::Genre).unwrap_or(MovieFilter::Unmatchable);
        }
        MovieFilter::All
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
