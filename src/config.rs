use clap::Parser;

/// Employers queried when no `--employer-id` is given.
pub const DEFAULT_EMPLOYER_IDS: [&str; 10] = [
    "80", "1740", "4181", "4219", "1373", "39305", "3388", "15478", "4233", "3809",
];

#[derive(Parser, Debug, Clone)]
#[command(
    name = "vacancy-report",
    about = "Load employer vacancies from hh.ru into Postgres and report on them"
)]
pub struct Config {
    #[command(flatten)]
    pub db: DbConfig,

    /// Run database migrations on startup
    #[arg(long, env = "RUN_MIGRATIONS", default_value = "true")]
    pub run_migrations: bool,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Store connection parameters.
#[derive(clap::Args, Debug, Clone)]
pub struct DbConfig {
    /// Full connection URL; overrides the individual parameters below
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    #[arg(long, env = "DB_NAME", default_value = "headhunter")]
    pub db_name: String,
}

/// Parameters of the listings API fetch.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Vacancy listing endpoint
    #[arg(long, env = "HH_API_URL", default_value = "https://api.hh.ru/vacancies")]
    pub api_url: String,

    /// Employer to fetch vacancies for (repeatable)
    #[arg(long = "employer-id", env = "HH_EMPLOYER_IDS", value_delimiter = ',')]
    pub employer_ids: Vec<String>,

    /// Vacancies per page
    #[arg(long, env = "HH_PER_PAGE", default_value_t = 100)]
    pub per_page: u32,

    /// Number of pages to request
    #[arg(long, env = "HH_PAGES", default_value_t = 20)]
    pub pages: u32,

    #[arg(long, env = "HH_USER_AGENT", default_value = "HH-User-Agent")]
    pub user_agent: String,

    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,
}

impl SourceArgs {
    /// Configured employer ids, falling back to the built-in allowlist.
    pub fn employer_ids(&self) -> Vec<String> {
        if self.employer_ids.is_empty() {
            DEFAULT_EMPLOYER_IDS.iter().map(|id| id.to_string()).collect()
        } else {
            self.employer_ids.clone()
        }
    }
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the schema, optionally recreating the database first
    Setup {
        /// Drop and recreate the configured database
        #[arg(long)]
        recreate: bool,
    },
    /// Fetch vacancies and load them into the database
    Ingest {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the analytical report
    Report {
        /// Also search vacancy names for this keyword (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },
    /// Serve the analytical queries as a JSON API
    Serve {
        /// Listen address
        #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
        listen_addr: String,
    },
    /// Ingest then report (default when no subcommand given)
    Run {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long = "keyword")]
        keywords: Vec<String>,
    },
}

impl Config {
    /// Resolve the command, defaulting to Run if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or_else(default_run)
    }
}

/// Parse `run` with no arguments so env overrides and defaults still apply.
fn default_run() -> Command {
    #[derive(Parser)]
    struct RunOnly {
        #[command(subcommand)]
        command: Command,
    }
    RunOnly::parse_from(["vacancy-report", "run"]).command
}
