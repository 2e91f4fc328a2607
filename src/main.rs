// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use lyrictl::app_config::{self, Config, TranslationProvider};
use lyrictl::app_controller::{Controller, LyricsSource};
use lyrictl::errors::TranslationError;
use lyrictl::file_utils::FileManager;
use lyrictl::providers::backend::Session;
use lyrictl::translation::TranslationStatus;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    #[value(name = "mymemory")]
    MyMemory,
    #[value(name = "libretranslate")]
    LibreTranslate,
    Backend,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::MyMemory => TranslationProvider::MyMemory,
            CliTranslationProvider::LibreTranslate => TranslationProvider::LibreTranslate,
            CliTranslationProvider::Backend => TranslationProvider::Backend,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Where to read lyrics from
#[derive(Args, Debug)]
struct InputArgs {
    /// Lyrics text file (reads stdin when neither --file nor --song-id is given)
    #[arg(long, value_name = "PATH", conflicts_with = "song_id")]
    file: Option<PathBuf>,

    /// Song id to fetch lyrics for from the music backend
    #[arg(long)]
    song_id: Option<String>,
}

impl InputArgs {
    fn to_source(&self) -> Result<LyricsSource> {
        if let Some(path) = &self.file {
            return Ok(LyricsSource::File(path.clone()));
        }
        if let Some(song_id) = &self.song_id {
            return Ok(LyricsSource::Song(song_id.clone()));
        }
        Ok(LyricsSource::Text(FileManager::read_lyrics_from(std::io::stdin().lock())?))
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate lyrics into the target language
    Translate {
        #[command(flatten)]
        input: InputArgs,

        /// Target language code (e.g., 'en', 'es', 'fr')
        #[arg(short, long)]
        target: Option<String>,

        /// Source language code; detected from the lyrics when omitted
        #[arg(short, long)]
        source: Option<String>,

        /// Provider chain to use, in order (repeat the flag for fallbacks)
        #[arg(short, long, value_enum)]
        provider: Vec<CliTranslationProvider>,

        /// Print original and translation in two columns
        #[arg(long)]
        side_by_side: bool,

        /// Write the translation to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Print the detected language of the lyrics
    Detect {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show how the lyrics would be split into chunks
    Chunks {
        #[command(flatten)]
        input: InputArgs,

        /// Override the chunk budget in characters
        #[arg(long)]
        max_chars: Option<usize>,
    },

    /// Extract a YouTube video id from a URL, or look one up for a song
    VideoId {
        /// YouTube URL or bare video id
        #[arg(required_unless_present = "song_id")]
        url: Option<String>,

        /// Song id to look up through the music backend
        #[arg(long)]
        song_id: Option<String>,
    },

    /// Generate shell completions for lyrictl
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// lyrictl - translate song lyrics with free machine translation services
#[derive(Parser, Debug)]
#[command(name = "lyrictl")]
#[command(version)]
#[command(about = "Lyrics translation tool")]
#[command(long_about = "lyrictl detects the language of song lyrics and translates them chunk by chunk,
falling back between translation providers when one fails.

EXAMPLES:
    lyrictl translate --file song.txt -t en          # Translate a lyrics file to English
    cat song.txt | lyrictl translate -t fr            # Translate lyrics from stdin
    lyrictl translate --song-id 42 --side-by-side     # Fetch lyrics from the backend
    lyrictl translate -p libretranslate --file s.txt  # Use a single provider
    lyrictl detect --file song.txt                    # Print the detected language
    lyrictl video-id https://youtu.be/dQw4w9WgXcQ     # Extract a YouTube id
    lyrictl completions bash > lyrictl.bash           # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. The backend session token can be passed with
    --token or the LYRICTL_TOKEN environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Bearer token for the music backend
    #[arg(long, env = "LYRICTL_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "lyrictl", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(Path::new(&cli.config_path))?;
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let token = cli.token.clone().or_else(|| config.backend.token.clone());
    let session = token.map(Session::with_token).unwrap_or_default();

    let result = run(cli.command, &mut config, session).await;
    if let Err(e) = &result {
        if let Some(TranslationError::AuthenticationRequired(_)) = e.downcast_ref::<TranslationError>() {
            error!("Not authenticated: log in again and pass a fresh token with --token or LYRICTL_TOKEN");
        }
    }
    result
}

async fn run(command: Commands, config: &mut Config, session: Session) -> Result<()> {
    match command {
        Commands::Translate {
            input,
            target,
            source,
            provider,
            side_by_side,
            output,
            force_overwrite,
        } => {
            if let Some(target) = target {
                config.target_language = target.parse()?;
            }
            if let Some(source) = source {
                config.source_language = Some(source.parse()?);
            }
            if !provider.is_empty() {
                config.translation.provider_order = provider.into_iter().map(Into::into).collect();
            }

            let controller = Controller::with_config(config.clone(), session)?;
            let source = input.to_source()?;
            let lyrics = controller.load_lyrics(&source).await?;
            let target = config.target_language;

            let outcome = controller.translate(&lyrics, target).await?;
            if outcome.status == TranslationStatus::Failed {
                warn!("Showing placeholder; the original lyrics are unchanged");
            }

            let rendered = controller.render(&lyrics, &outcome, side_by_side);
            let output_path = output.or_else(|| match &source {
                LyricsSource::File(path) if !side_by_side => Some(FileManager::generate_output_path(path, target)),
                _ => None,
            });

            match output_path {
                Some(path) => {
                    FileManager::write_to_file(&path, &rendered, force_overwrite)?;
                    info!("Success: {:?}", path);
                }
                None => print!("{}", rendered),
            }
            Ok(())
        }
        Commands::Detect { input } => {
            let controller = Controller::with_config(config.clone(), session)?;
            let lyrics = controller.load_lyrics(&input.to_source()?).await?;
            let language = controller.translation_service()?.detect_language(&lyrics);
            println!("{} ({})", language, language.name());
            Ok(())
        }
        Commands::Chunks { input, max_chars } => {
            if let Some(max_chars) = max_chars {
                config.translation.common.max_chunk_chars = max_chars;
            }
            let controller = Controller::with_config(config.clone(), session)?;
            let lyrics = controller.load_lyrics(&input.to_source()?).await?;
            let budget = config.translation.common.max_chunk_chars;

            for (index, chunk) in controller.plan_chunks(&lyrics)?.iter().enumerate() {
                let marker = if chunk.is_oversized(budget) { " (oversized)" } else { "" };
                println!(
                    "--- chunk {} | lines {}-{} | {} chars{}",
                    index + 1,
                    chunk.lines.start + 1,
                    chunk.lines.end,
                    chunk.char_len(),
                    marker
                );
                println!("{}", chunk.text);
            }
            Ok(())
        }
        Commands::VideoId { url, song_id } => {
            let controller = Controller::with_config(config.clone(), session)?;
            match controller.resolve_video_id(url.as_deref(), song_id.as_deref()).await? {
                Some(id) => {
                    println!("{}", id);
                    info!("Player: {}", id.embed_url());
                    Ok(())
                }
                None => {
                    warn!("No YouTube video id found");
                    Err(anyhow!("not found"))
                }
            }
        }
        Commands::Completions { .. } => Ok(()),
    }
}
