mod collect;
mod discover;
mod emit;
mod error;
mod extract;
mod fetch;
mod normalize;
mod record;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use crate::discover::PageRange;
use crate::emit::OutputMode;
use crate::extract::ExtractionSchema;
use crate::fetch::{HttpFetcher, DEFAULT_ROOT_URL};

#[derive(Parser)]
#[command(name = "upcat_scraper", about = "UPCAT results scraper and exporter")]
struct Cli {
    /// Output mode: `json` writes passers.json, `sql` writes passers.sql
    #[arg(value_enum)]
    mode: OutputMode,

    /// Root URL of the results site
    #[arg(long, default_value = DEFAULT_ROOT_URL)]
    root_url: String,

    /// Fixed inclusive page range START:END; omitted, the page count is
    /// read off the index page
    #[arg(long)]
    pages: Option<PageRange>,

    /// Pack N records into one |-delimited record (json mode only)
    #[arg(long)]
    batch_size: Option<NonZeroUsize>,

    /// Output path; defaults to passers.json / passers.sql
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    if cli.batch_size.is_some() && cli.mode == OutputMode::Sql {
        anyhow::bail!("--batch-size only applies to json mode; sql emits one row per passer");
    }

    let schema = ExtractionSchema::default();
    let fetcher = HttpFetcher::new(&cli.root_url);
    let strategy = cli.pages.clone().unwrap_or(PageRange::FromIndex);

    let pages = discover::discover(&strategy, &fetcher, &schema).await?;
    println!(
        "Scraping pages {}..{} from {}...",
        pages.start(),
        pages.end(),
        cli.root_url
    );

    let records = collect::collect(&fetcher, &schema, pages).await?;
    println!("Scraped {} passer records.", records.len());

    match cli.mode {
        OutputMode::Json => {
            let out = cli.out.unwrap_or_else(|| PathBuf::from("passers.json"));
            let records = match cli.batch_size {
                Some(n) => emit::pack_records(&records, n.get()),
                None => records,
            };
            std::fs::write(&out, emit::json::render(&records)?)?;
            println!("Data in \"{}\".", out.display());
        }
        OutputMode::Sql => {
            let out = cli.out.unwrap_or_else(|| PathBuf::from("passers.sql"));
            let (campuses, courses) = normalize::normalize(&records);
            info!(
                "Normalized {} campuses, {} courses",
                campuses.len(),
                courses.len()
            );
            let stmts = emit::sql::render_statements(&records, &campuses, &courses);
            std::fs::write(&out, emit::sql::render_file(&stmts))?;
            println!("Data in \"{}\".", out.display());
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    Ok(())
}
