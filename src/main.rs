use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use showrunner::{
    ApiKey, LocalFileStore, MkvPropEditWriter, ProgressEvent, RenamePlan, SeasonRequest,
    ShowrunnerError, TmdbProvider, apply_plans, load_env_files, plan_season,
};
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = "\
Files in the current directory must already be named <Show_Name>-S01E01.mkv,
where <Show_Name> is --show-name with spaces replaced by underscores.

The TMDB API key is read from TMDB_KEY, optionally loaded from a .env file.";

/// Rename the episode files of a TV season and tag them with their TMDB titles
#[derive(Debug, Parser)]
#[command(version, about, after_help = AFTER_HELP, arg_required_else_help = true)]
struct Cli {
    /// Show name used as filename prefix, e.g. "My Show"
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    show_name: String,

    /// TMDB show ID
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    show_id: String,

    /// Season number
    #[arg(long)]
    season: u32,

    /// Load environment variables from this file instead of the default locations
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Only print what would be tagged and renamed
    #[arg(long)]
    dry_run: bool,

    /// Path or name of the mkvpropedit binary
    #[arg(long, value_name = "PATH", default_value = "mkvpropedit")]
    mkvpropedit: String,
}

/// Handles progress events and turns them into log lines
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::FetchingSeason { show_id, season } => {
            info!("Fetching season {} of TMDB show {}...", season, show_id);
        }
        ProgressEvent::SeasonFetched {
            name,
            air_date,
            episode_count,
        } => {
            info!(
                "Found {} episode(s) in '{}' (aired {})",
                episode_count,
                name,
                air_date.as_deref().unwrap_or("unknown")
            );
        }
        ProgressEvent::Tagging {
            index,
            total,
            path,
            title,
        } => {
            info!(
                "[{}/{}] [mkvpropedit] {}: title = {}",
                index + 1,
                total,
                path.display(),
                title
            );
        }
        ProgressEvent::Tagged { output, .. } => {
            info!("[mkvpropedit] {}", output);
        }
        ProgressEvent::Renaming { from, to } => {
            info!("[rename] {} -> {}", from, to);
        }
        ProgressEvent::RenameSkipped { filename } => {
            warn!("[rename] {}: title has no usable characters, keeping name", filename);
        }
        ProgressEvent::Complete { episode_count } => {
            info!("Done! Processed {} episode(s).", episode_count);
        }
    }
}

fn print_plans(plans: &[RenamePlan]) {
    println!("\n=== Rename Plan (dry run) ===\n");
    for plan in plans {
        println!("S{:02}E{:02}", plan.season_number, plan.episode_number);
        println!("  Title: {}", plan.display_title);
        println!("  {} -> {}", plan.source_filename, plan.target_filename);
    }
}

fn run(cli: Cli) -> Result<(), ShowrunnerError> {
    for path in load_env_files(cli.env_file.as_deref())? {
        info!("Loaded environment from {}", path.display());
    }

    let request = SeasonRequest {
        show_name: cli.show_name,
        show_id: cli.show_id,
        season: cli.season,
    };
    // Input errors take precedence over a missing credential
    request.validate()?;

    let provider = TmdbProvider::new(ApiKey::from_env()?);
    let plans = plan_season(&provider, &request, &mut handle_progress_event)?;

    if cli.dry_run {
        print_plans(&plans);
        return Ok(());
    }

    let writer = MkvPropEditWriter::new(cli.mkvpropedit);
    let store = LocalFileStore::current_dir()?;
    apply_plans(&writer, &store, &plans, &mut handle_progress_event)
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        process::exit(1);
    }
}
