use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use diesel_async::pooled_connection::bb8::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use qmigrate::conf::EnvConfigSettings;
use qmigrate::crud::{run_migrations, PgDb};
use qmigrate::error::{MigrationError, Result};
use qmigrate::lookup::InMemorySectionQuestions;
use qmigrate::mapper::QuestionnaireMigrationMapper;
use tracing::{info, warn};

use models::MigrationReport;
use process::{load_section_questions, migrate};

mod models;
mod process;

#[derive(Parser)]
struct CliArgs {
    #[clap(short='c', long, default_value = None)]
    custom_fields: Option<PathBuf>,
    #[clap(short='s', long, default_value = None)]
    surveys: Option<PathBuf>,
    #[clap(short='i', long, default_value = None)]
    instances: Option<PathBuf>,
    /// Section question placements to resolve responses against instead of the database
    #[clap(short='q', long, default_value = None)]
    section_questions: Option<PathBuf>,
    #[clap(short='o', long, default_value = None)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = CliArgs::parse();
    let env_conf = EnvConfigSettings::init();

    let report = match (args.section_questions, env_conf.db_url) {
        (Some(p), _) => {
            let mut mapper = QuestionnaireMigrationMapper::new(load_section_questions(p));
            migrate(&mut mapper, args.custom_fields, args.surveys, args.instances).await?
        }
        (None, Some(db_url)) => {
            if env_conf.run_db_migrations {
                run_migrations(&db_url);
            }
            let config =
                AsyncDieselConnectionManager::<diesel_async::AsyncPgConnection>::new(db_url);
            let pool = Pool::builder().build(config).await.map_err(|e| {
                MigrationError::DbError(format!("pool failed to start with error {e}"))
            })?;
            let db = PgDb::try_from_pool(&pool).await?;
            let mut mapper = QuestionnaireMigrationMapper::new(db);
            migrate(&mut mapper, args.custom_fields, args.surveys, args.instances).await?
        }
        (None, None) => {
            if args.instances.is_some() {
                warn!("Neither --section-questions nor DATABASE_URL is set, survey responses cannot be placed");
            }
            let mut mapper = QuestionnaireMigrationMapper::new(InMemorySectionQuestions::new());
            migrate(&mut mapper, args.custom_fields, args.surveys, args.instances).await?
        }
    };

    write_report(&report, args.output)
}

fn write_report(report: &MigrationReport, output: Option<PathBuf>) -> Result<()> {
    info!(
        "Writing {} question groups and {} question group instances",
        report.question_groups.len(),
        report.question_group_instances.len()
    );
    let mut writer: Box<dyn Write> = match output {
        Some(p) => Box::new(BufWriter::new(File::create(p)?)),
        None => Box::new(stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
