// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use stylecast::app_config::{self, Config};
use stylecast::conversion::{CompletionClient, OutputCleaning};
use stylecast::providers::openai::OpenAI;
use stylecast::providers::Provider;
use stylecast::{server, FileWatcher};

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the conversion endpoint and the front-end
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory with a custom front-end
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Watch a text file and write its styled version back into it
    Watch {
        /// File to watch (reset on start)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Poll interval in milliseconds
        #[arg(short, long)]
        interval_ms: Option<u64>,
    },

    /// Generate shell completions for stylecast
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// stylecast - rewrite text in a historical, character or formal voice
#[derive(Parser, Debug)]
#[command(name = "stylecast")]
#[command(version)]
#[command(about = "AI-powered text style, voice and language conversion")]
#[command(long_about = "stylecast rewrites text in a chosen voice, register or language using a chat completion API.

EXAMPLES:
    stylecast serve                       # Serve POST /convert on 127.0.0.1:5000
    stylecast serve -p 8080               # Use another port
    stylecast watch                       # Watch write_here.txt
    stylecast watch -f notes.txt -i 1000  # Watch another file every second
    stylecast serve --check-connection    # Verify the API key before serving
    stylecast completions bash > stylecast.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. The API key is read from OPENAI_API_KEY (the
    variable name can be changed with provider.api_key_env).")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Model identifier to use
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Send a test completion before starting and fail if it does not succeed
    #[arg(long, global = true)]
    check_connection: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
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
async fn main() {
    // The logger accepts everything; the effective level is set via max_level
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "stylecast", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let check_connection = cli.check_connection;

    match cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
        } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if static_dir.is_some() {
                config.server.static_dir = static_dir;
            }
            config.validate().context("Configuration validation failed")?;
            run_serve(config, check_connection).await
        }
        Commands::Watch { file, interval_ms } => {
            let mut config = config;
            if let Some(file) = file {
                config.watch.file_path = file;
            }
            if let Some(interval_ms) = interval_ms {
                config.watch.check_interval_ms = interval_ms;
            }
            config.validate().context("Configuration validation failed")?;
            run_watch(config, check_connection).await
        }
        Commands::Completions { .. } => Ok(()),
    }
}

fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(model) = &cli.model {
        config.provider.model = model.clone();
    }
    match &cli.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    // A missing credential is fatal before anything starts
    config.resolve_api_key()?;

    Ok(config)
}

async fn build_provider(config: &Config, check_connection: bool) -> Result<Arc<dyn Provider>> {
    let provider = OpenAI::from_config(&config.provider);
    info!("Using model {} at {}", provider.model(), config.provider.endpoint);

    if check_connection {
        provider
            .test_connection()
            .await
            .context("Provider connection check failed")?;
        info!("Provider connection OK");
    }

    Ok(Arc::new(provider))
}

async fn run_serve(config: Config, check_connection: bool) -> Result<()> {
    let cleaning = if config.server.strip_quotes {
        OutputCleaning::StripQuotes
    } else {
        OutputCleaning::Trim
    };
    let provider = build_provider(&config, check_connection).await?;
    let client = CompletionClient::new(provider).with_cleaning(cleaning);
    let router = server::build_router(Arc::new(client), config.server.static_dir.clone());
    server::run_server(router, config.server.bind_addr()?).await
}

async fn run_watch(config: Config, check_connection: bool) -> Result<()> {
    let client = CompletionClient::new(build_provider(&config, check_connection).await?);
    FileWatcher::new(config.watch, client).run().await
}
