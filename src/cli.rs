//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::InvestorError;
use crate::domain::investor::InvestorId;
use crate::domain::loader;
use crate::domain::settings::{
    Backend, DEFAULT_DATA_FILE, DEFAULT_LISTEN, DEFAULT_POOL_SIZE, Settings, default_origins,
    invalid, parse_origins, resolve_path,
};
use crate::domain::store::InvestorStore;
use crate::ports::config_port::ConfigPort;

#[derive(Parser, Debug)]
#[command(name = "investors", about = "Investor commitments API")]
pub struct Cli {
    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

/// Where configuration and investor data come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// CSV file, overriding [data] path
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the CSV and serve the HTTP API
    Serve {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        listen: Option<SocketAddr>,
        /// memory or sqlite
        #[arg(long)]
        backend: Option<Backend>,
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Load the CSV into the SQLite database, replacing its contents
    Import {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Print investor summaries as JSON
    List {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print one investor with its commitments as JSON
    Show {
        id: InvestorId,
        #[command(flatten)]
        source: SourceArgs,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Serve {
            source,
            listen,
            backend,
            db,
        } => resolve_settings(&source, db).and_then(|mut settings| {
            if let Some(listen) = listen {
                settings.listen = listen;
            }
            if let Some(backend) = backend {
                settings.backend = backend;
            }
            run_serve(settings)
        }),
        Command::Import { source, db } => {
            resolve_settings(&source, db).and_then(|settings| run_import(&settings).map(|_| ()))
        }
        Command::List { source } => resolve_settings(&source, None).and_then(|s| run_list(&s)),
        Command::Show { id, source } => {
            resolve_settings(&source, None).and_then(|s| run_show(&s, id))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            (&e).into()
        }
    }
}

/// Load the INI file if one is given. Returns the adapter and the directory
/// relative data paths are resolved against.
pub fn load_config(path: Option<&PathBuf>) -> Result<(FileConfigAdapter, PathBuf), InvestorError> {
    match path {
        Some(path) => {
            tracing::info!("loading config from {}", path.display());
            let adapter =
                FileConfigAdapter::from_file(path).map_err(|e| InvestorError::ConfigParse {
                    file: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            let base_dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((adapter, base_dir))
        }
        None => Ok((FileConfigAdapter::empty(), std::env::current_dir()?)),
    }
}

pub fn build_settings(config: &dyn ConfigPort, base_dir: &Path) -> Result<Settings, InvestorError> {
    let data_file = config
        .get_string("data", "path")
        .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());

    let sqlite_path = config
        .get_string("sqlite", "path")
        .map(|p| resolve_path(base_dir, Path::new(&p)));

    let pool_size = config.get_int("sqlite", "pool_size", DEFAULT_POOL_SIZE as i64);
    if !(1..=i64::from(u32::MAX)).contains(&pool_size) {
        return Err(invalid("sqlite", "pool_size", "must be a positive integer"));
    }

    let listen_str = config
        .get_string("web", "listen")
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
    let listen: SocketAddr = listen_str
        .parse()
        .map_err(|e| invalid("web", "listen", format!("'{listen_str}': {e}")))?;

    let backend = match config.get_string("web", "backend") {
        Some(value) => value
            .parse()
            .map_err(|e: String| invalid("web", "backend", e))?,
        None => Backend::Memory,
    };

    let cors_origins = config
        .get_string("web", "cors_origins")
        .map(|v| parse_origins(&v))
        .unwrap_or_else(default_origins);

    Ok(Settings {
        data_path: resolve_path(base_dir, Path::new(&data_file)),
        sqlite_path,
        pool_size: pool_size as u32,
        listen,
        backend,
        cors_origins,
        cors_allow_credentials: config.get_bool("web", "cors_allow_credentials", true),
    })
}

/// Config file plus command-line overrides. Override paths are used as given.
pub fn resolve_settings(
    source: &SourceArgs,
    db_override: Option<PathBuf>,
) -> Result<Settings, InvestorError> {
    let (config, base_dir) = load_config(source.config.as_ref())?;
    let mut settings = build_settings(&config, &base_dir)?;

    if let Some(data) = &source.data {
        settings.data_path = data.clone();
    }
    if db_override.is_some() {
        settings.sqlite_path = db_override;
    }
    Ok(settings)
}

/// Build the in-memory store from the configured CSV. Fails fast; no partial
/// store is ever returned.
pub fn load_store(settings: &Settings) -> Result<InvestorStore, InvestorError> {
    tracing::info!("loading investors from {}", settings.data_path.display());
    loader::load(&CsvAdapter::new(settings.data_path.clone()))
}

fn run_list(settings: &Settings) -> Result<(), InvestorError> {
    let store = load_store(settings)?;
    let json = serde_json::to_string_pretty(&store.list_summaries()).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

fn run_show(settings: &Settings, id: InvestorId) -> Result<(), InvestorError> {
    let store = load_store(settings)?;
    let investor = store.get_detail(id)?;
    let json = serde_json::to_string_pretty(investor).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

#[cfg(feature = "sqlite")]
fn open_sqlite(
    settings: &Settings,
) -> Result<crate::adapters::sqlite_adapter::SqliteAdapter, InvestorError> {
    use crate::adapters::sqlite_adapter::SqliteAdapter;

    let path = settings
        .sqlite_path
        .as_ref()
        .ok_or_else(|| InvestorError::ConfigMissing {
            section: "sqlite".into(),
            key: "path".into(),
        })?;

    let adapter = SqliteAdapter::open(&path.to_string_lossy(), settings.pool_size)?;
    adapter.initialize_schema()?;
    Ok(adapter)
}

/// Load the CSV through the same loader as the in-memory path and store the
/// result. Returns the number of investors written.
pub fn run_import(settings: &Settings) -> Result<usize, InvestorError> {
    #[cfg(feature = "sqlite")]
    {
        use crate::ports::source_port::SourcePort;

        tracing::info!("importing investors from {}", settings.data_path.display());
        let rows = CsvAdapter::new(settings.data_path.clone()).read_rows()?;
        let investors = loader::build_investors(rows)?;

        let adapter = open_sqlite(settings)?;
        adapter.replace_investors(&investors)?;
        Ok(investors.len())
    }

    #[cfg(not(feature = "sqlite"))]
    {
        let _ = settings;
        Err(invalid("sqlite", "path", "sqlite feature is required for import"))
    }
}

fn run_serve(settings: Settings) -> Result<(), InvestorError> {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, build_router, cors_layer};
        use crate::ports::investor_port::InvestorPort;
        use std::sync::Arc;

        let investors: Arc<dyn InvestorPort + Send + Sync> = match settings.backend {
            Backend::Memory => {
                let store = load_store(&settings)?;
                tracing::info!(investors = store.len(), "investor store ready");
                Arc::new(store)
            }
            #[cfg(feature = "sqlite")]
            Backend::Sqlite => Arc::new(open_sqlite(&settings)?),
            #[cfg(not(feature = "sqlite"))]
            Backend::Sqlite => {
                return Err(invalid("web", "backend", "sqlite feature is not enabled"));
            }
        };

        let cors = cors_layer(&settings.cors_origins, settings.cors_allow_credentials)?;
        let router = build_router(AppState { investors }, cors);
        let addr = settings.listen;

        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!("serving investor API on http://{addr}");
            axum::serve(listener, router).await
        })?;

        Ok(())
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = settings;
        Err(invalid("web", "listen", "web feature is required for serve"))
    }
}
