/// TMDB API response types for deserialization.
///
/// These structures mirror the subset of the "TV season" response that is
/// needed; all other fields are ignored.
use serde::Deserialize;

/// The top-level response from the `/3/tv/{id}/season/{n}` endpoint.
#[derive(Debug, Deserialize)]
pub(super) struct TmdbSeason {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    /// May be null for unaired seasons
    #[serde(default)]
    pub air_date: Option<String>,
    pub season_number: u32,
    #[serde(default)]
    pub episodes: Vec<TmdbEpisode>,
}

/// A single episode inside a TMDB season response.
#[derive(Debug, Deserialize)]
pub(super) struct TmdbEpisode {
    pub episode_number: u32,
    pub season_number: u32,
    /// Episode title (may be null for announced episodes)
    #[serde(default)]
    pub name: Option<String>,
}
