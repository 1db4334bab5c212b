//! Showrunner - rename and title-tag the video files of a TV season
//!
//! This library fetches a season's episode list from TMDB, derives a display
//! title and a new filename for every episode, writes the title into each
//! file's container metadata and finally renames the file.

mod config;
mod file_operations;
mod formatter;
mod metadata_retrieval;
mod title_writer;

// Re-export error types
pub use config::ConfigError;
pub use file_operations::FileOperationError;
pub use metadata_retrieval::MetadataRetrievalError;
pub use title_writer::TitleWriterError;

pub use config::{API_KEY_VAR, ApiKey, load_env_files};
pub use file_operations::{FileStore, LocalFileStore};
pub use formatter::{
    RenamePlan, display_title, episode_filenames, filename_token, plan_renames, show_token,
    zero_pad,
};
pub use metadata_retrieval::{EpisodeRecord, SeasonProvider, SeasonRecord, TmdbProvider};
pub use title_writer::{MkvPropEditWriter, TitleWriter};

use std::path::PathBuf;
use thiserror::Error;

/// What to rename: the show as named on disk and as known to TMDB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonRequest {
    /// Show name used for the filename prefix, e.g. "My Show"
    pub show_name: String,
    /// TMDB show identifier
    pub show_id: String,
    /// Season number
    pub season: u32,
}

impl SeasonRequest {
    /// Checks that the textual inputs are usable
    pub fn validate(&self) -> Result<(), ShowrunnerError> {
        if self.show_name.trim().is_empty() {
            return Err(ShowrunnerError::InvalidInput("show name must not be empty"));
        }
        if show_token(&self.show_name).is_empty() {
            return Err(ShowrunnerError::InvalidInput(
                "show name must contain at least one filename-safe character",
            ));
        }
        if self.show_id.trim().is_empty() {
            return Err(ShowrunnerError::InvalidInput("show id must not be empty"));
        }
        Ok(())
    }
}

/// Progress event emitted while processing a season
///
/// These events let the caller report progress without the library
/// printing anything itself.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Fetching the season from the metadata provider
    FetchingSeason { show_id: String, season: u32 },

    /// Season data received
    SeasonFetched {
        name: String,
        air_date: Option<String>,
        episode_count: usize,
    },

    /// About to write the title of one episode
    Tagging {
        index: usize,
        total: usize,
        path: PathBuf,
        title: String,
    },

    /// The metadata utility finished successfully
    Tagged { path: PathBuf, output: String },

    /// About to rename one episode
    Renaming { from: String, to: String },

    /// The title produced no filename token, so the name stays as is
    RenameSkipped { filename: String },

    /// All episodes processed
    Complete { episode_count: usize },
}

/// Top-level error type for Showrunner operations
#[derive(Debug, Error)]
pub enum ShowrunnerError {
    /// A required input was empty or malformed
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    /// Error while loading configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error during metadata retrieval
    #[error("Metadata retrieval error: {0}")]
    MetadataRetrieval(#[from] MetadataRetrievalError),

    /// Error while writing the container title
    #[error("Tagging error: {0}")]
    TitleWriter(#[from] TitleWriterError),

    /// Error during file operations
    #[error("File operation error: {0}")]
    FileOperation(#[from] FileOperationError),
}

/// Fetches a season and plans the tag + rename of each of its episodes
///
/// Nothing on disk is touched, which makes this the dry-run entry point.
pub fn plan_season<P, F>(
    provider: &P,
    request: &SeasonRequest,
    progress_callback: &mut F,
) -> Result<Vec<RenamePlan>, ShowrunnerError>
where
    P: SeasonProvider + ?Sized,
    F: FnMut(ProgressEvent),
{
    request.validate()?;

    progress_callback(ProgressEvent::FetchingSeason {
        show_id: request.show_id.clone(),
        season: request.season,
    });

    let season = provider.fetch_season(&request.show_id, request.season)?;

    progress_callback(ProgressEvent::SeasonFetched {
        name: season.name.clone(),
        air_date: season.air_date.clone(),
        episode_count: season.episodes.len(),
    });

    Ok(plan_renames(&season, &request.show_name))
}

/// Tags and renames each planned episode, in order
///
/// The title is written before the rename, since the tagger addresses the
/// file by its current name. The first failure aborts; episodes processed
/// before it stay tagged and renamed.
pub fn apply_plans<W, S, F>(
    writer: &W,
    store: &S,
    plans: &[RenamePlan],
    progress_callback: &mut F,
) -> Result<(), ShowrunnerError>
where
    W: TitleWriter + ?Sized,
    S: FileStore + ?Sized,
    F: FnMut(ProgressEvent),
{
    for (index, plan) in plans.iter().enumerate() {
        let path = store.resolve(&plan.source_filename);

        progress_callback(ProgressEvent::Tagging {
            index,
            total: plans.len(),
            path: path.clone(),
            title: plan.display_title.clone(),
        });
        let output = writer.write_title(&path, &plan.display_title)?;
        progress_callback(ProgressEvent::Tagged { path, output });

        if plan.is_noop() {
            progress_callback(ProgressEvent::RenameSkipped {
                filename: plan.source_filename.clone(),
            });
            continue;
        }

        progress_callback(ProgressEvent::Renaming {
            from: plan.source_filename.clone(),
            to: plan.target_filename.clone(),
        });
        store.rename(&plan.source_filename, &plan.target_filename)?;
    }

    progress_callback(ProgressEvent::Complete {
        episode_count: plans.len(),
    });

    Ok(())
}

/// Runs the whole pipeline: fetch, plan, then tag and rename every episode
///
/// # Examples
///
/// ```no_run
/// use showrunner::{
///     rename_season, ApiKey, LocalFileStore, MkvPropEditWriter, SeasonRequest, TmdbProvider,
/// };
///
/// let provider = TmdbProvider::new(ApiKey::from_env().unwrap());
/// let store = LocalFileStore::current_dir().unwrap();
/// let request = SeasonRequest {
///     show_name: "Breaking Bad".to_string(),
///     show_id: "1396".to_string(),
///     season: 1,
/// };
///
/// let plans = rename_season(
///     &provider,
///     &MkvPropEditWriter::default(),
///     &store,
///     &request,
///     |_| {}, // Ignore all progress events
/// )
/// .unwrap();
/// println!("Renamed {} episode(s)", plans.len());
/// ```
pub fn rename_season<P, W, S, F>(
    provider: &P,
    writer: &W,
    store: &S,
    request: &SeasonRequest,
    mut progress_callback: F,
) -> Result<Vec<RenamePlan>, ShowrunnerError>
where
    P: SeasonProvider + ?Sized,
    W: TitleWriter + ?Sized,
    S: FileStore + ?Sized,
    F: FnMut(ProgressEvent),
{
    let plans = plan_season(provider, request, &mut progress_callback)?;
    apply_plans(writer, store, &plans, &mut progress_callback)?;
    Ok(plans)
}
