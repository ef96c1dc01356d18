use clap::Parser;
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

use vacancy_report::analytics::Analytics;
use vacancy_report::config::{Command, Config, LogFormat, SourceArgs};
use vacancy_report::sources::{HeadHunter, SourceQuery};
use vacancy_report::{db, pipeline, report, routes};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("vacancy_report=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn ingest(pool: &PgPool, source: &SourceArgs) -> anyhow::Result<()> {
    let client = HeadHunter::from_args(source)?;
    let query = SourceQuery {
        employer_ids: source.employer_ids(),
        per_page: source.per_page,
        max_pages: source.pages,
    };

    let summary = pipeline::ingest(&client, &query, pool).await?;
    println!(
        "ingest complete: received={} employers_new={} vacancies_stored={} skipped={}",
        summary.received, summary.employers_created, summary.vacancies_created, summary.skipped
    );
    Ok(())
}

async fn print_report(pool: PgPool, keywords: &[String]) -> anyhow::Result<()> {
    let analytics = Analytics::new(pool);
    let mut stdout = std::io::stdout().lock();
    report::write_report(&mut stdout, &analytics, keywords).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();
    init_tracing(config.log_format);

    let command = config.resolved_command();
    let options = db::connect_options(&config.db)?;

    if let Command::Setup { recreate: true } = command {
        db::recreate_database(&options).await?;
    }

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(options).await?;

    if config.run_migrations || matches!(command, Command::Setup { .. }) {
        tracing::info!("Running database migrations...");
        db::run_migrations(&pool).await?;
        tracing::info!("Migrations complete");
    }

    match command {
        Command::Setup { .. } => {}
        Command::Ingest { source } => ingest(&pool, &source).await?,
        Command::Report { keywords } => print_report(pool, &keywords).await?,
        Command::Serve { listen_addr } => {
            let app = routes::app(Analytics::new(pool));
            let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
            tracing::info!("Listening on {listen_addr}");
            axum::serve(listener, app).await?;
        }
        Command::Run { source, keywords } => {
            ingest(&pool, &source).await?;
            print_report(pool, &keywords).await?;
        }
    }

    Ok(())
}
