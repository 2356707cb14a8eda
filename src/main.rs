use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod hierarchy;
mod record;
mod render;
mod validation;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "hierarchy-check")]
#[command(about = "Validate an organizational reporting hierarchy", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a CSV of email, full name, role, reports-to (header row first).
    Validate {
        #[arg(long)]
        input: String,

        #[arg(long, value_enum, default_value_t = render::Format::Json)]
        format: render::Format,

        /// Write the report here instead of stdout.
        #[arg(short = 'o', long)]
        out: Option<String>,

        #[arg(long, default_value_t = ',')]
        delimiter: char,

        /// Report emails used on more than one row as dataset errors.
        #[arg(long)]
        flag_duplicates: bool,

        /// Exit with an error unless every record is valid.
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Validate {
            input,
            format,
            out,
            delimiter,
            flag_duplicates,
            strict,
        } => {
            // 1) Read + split.
            let records = record::parse_file(&input, delimiter)?;

            // 2) Validate.
            let options = validation::ValidationOptions {
                flag_duplicate_emails: flag_duplicates,
            };
            let report = validation::validate(&records, &options);

            // 3) Render.
            let rendered = render::render(&report, format)?;
            match &out {
                Some(path) => {
                    std::fs::write(path, rendered)?;
                    eprintln!("Wrote {}", path);
                }
                None => print!("{}", rendered),
            }

            if strict && !report.is_clean() {
                bail!(
                    "hierarchy is invalid: {} invalid records, {} dataset errors",
                    report.invalid_records.len(),
                    report.dataset_errors.len()
                );
            }
        }
    }

    Ok(())
}
