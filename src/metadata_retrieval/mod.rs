/// Data structures and traits for TV season metadata retrieval.
///
/// This module provides structures to represent a single season of a TV show
/// and its episodes, as well as the trait implemented by metadata providers.
mod tmdb;
mod tmdb_types;

pub use tmdb::TmdbProvider;

use thiserror::Error;

/// Errors that can occur during metadata retrieval operations.
#[derive(Debug, Error)]
pub enum MetadataRetrievalError {
    /// Request to the metadata provider failed
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Failed to read or parse the provider's JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The requested show or season was not found
    #[error("Season {season} of show {show_id} not found")]
    SeasonNotFound { show_id: String, season: u32 },
}

/// Represents a single episode of a TV season.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRecord {
    /// The season number this episode belongs to
    pub season_number: u32,
    /// The episode number within the season (1-based)
    pub episode_number: u32,
    /// The raw episode title as delivered by the provider
    pub name: String,
}

/// Represents one season of a TV show as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonRecord {
    /// Provider-side identifier of the season
    pub id: u64,
    /// Season title, e.g. "Season 1"
    pub name: String,
    /// First air date, if known
    pub air_date: Option<String>,
    /// The season number
    pub season_number: u32,
    /// Episodes in provider order
    pub episodes: Vec<EpisodeRecord>,
}

/// Trait for metadata providers that can fetch a season's episode list.
///
/// Implementors of this trait can retrieve episode metadata from sources such
/// as TMDB. Tests substitute in-memory implementations.
pub trait SeasonProvider {
    /// Fetches metadata for one season of a show.
    ///
    /// # Arguments
    ///
    /// * `show_id` - The provider's identifier of the show
    /// * `season` - The season number to retrieve
    fn fetch_season(&self, show_id: &str, season: u32)
    -> Result<SeasonRecord, MetadataRetrievalError>;
}
