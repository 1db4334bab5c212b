/// TMDB metadata provider implementation.
use super::tmdb_types::{TmdbEpisode, TmdbSeason};
use super::{EpisodeRecord, MetadataRetrievalError, SeasonProvider, SeasonRecord};
use crate::config::ApiKey;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org";

/// Metadata provider for the TMDB v3 API.
///
/// This provider fetches season information from https://api.themoviedb.org
/// using the "TV season" endpoint, authenticated with an API key.
pub struct TmdbProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: ApiKey,
}

impl TmdbProvider {
    /// Creates a new TMDB provider using the given credential.
    pub fn new(api_key: ApiKey) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a provider talking to a different host, e.g. a local stub.
    pub fn with_base_url(api_key: ApiKey, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Builds the season endpoint URL without the credential.
    fn season_url(&self, show_id: &str, season: u32) -> String {
        format!("{}/3/tv/{}/season/{}", self.base_url, show_id, season)
    }

    fn convert_episode(episode: TmdbEpisode) -> EpisodeRecord {
        EpisodeRecord {
            season_number: episode.season_number,
            episode_number: episode.episode_number,
            name: episode.name.unwrap_or_default(),
        }
    }

    /// Converts the TMDB wire format to our SeasonRecord, keeping episode order.
    fn convert_season(season: TmdbSeason) -> SeasonRecord {
        SeasonRecord {
            id: season.id,
            name: season.name.unwrap_or_default(),
            air_date: season.air_date.filter(|d| !d.is_empty()),
            season_number: season.season_number,
            episodes: season
                .episodes
                .into_iter()
                .map(Self::convert_episode)
                .collect(),
        }
    }

    /// Decodes a raw response body into a SeasonRecord.
    fn parse_season(body: &str) -> Result<SeasonRecord, MetadataRetrievalError> {
        let season: TmdbSeason = serde_json::from_str(body)
            .map_err(|e| MetadataRetrievalError::ParseError(e.to_string()))?;
        Ok(Self::convert_season(season))
    }
}

impl SeasonProvider for TmdbProvider {
    fn fetch_season(
        &self,
        show_id: &str,
        season: u32,
    ) -> Result<SeasonRecord, MetadataRetrievalError> {
        let url = self.season_url(show_id, season);
        debug!(%url, "requesting season from TMDB");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.expose())])
            .send()
            .map_err(|e| MetadataRetrievalError::RequestError(e.without_url().to_string()))?;

        if response.status() == 404 {
            return Err(MetadataRetrievalError::SeasonNotFound {
                show_id: show_id.to_string(),
                season,
            });
        }

        if !response.status().is_success() {
            return Err(MetadataRetrievalError::RequestError(format!(
                "HTTP {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().map_err(|e| {
            MetadataRetrievalError::RequestError(format!(
                "Failed to read response body: {}",
                e.without_url()
            ))
        })?;

        Self::parse_season(&body)
    }
}
