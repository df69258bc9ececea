use anyhow::{Context, Result};
use clap::Parser;
use memogrid::{
    Dashboard, EngineConfig, Filters, MockRecordSource, RecordId, SortKey, SortSpec, Status,
};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "memogrid")]
#[command(about = "Load a generated roster and print one page of a query")]
struct Cli {
    /// Free-text search over name, email and department
    #[arg(long)]
    search: Option<String>,

    #[arg(long)]
    department: Option<String>,

    /// active or inactive
    #[arg(long)]
    status: Option<Status>,

    #[arg(long)]
    min_age: Option<u32>,

    #[arg(long)]
    max_age: Option<u32>,

    #[arg(long)]
    min_salary: Option<u64>,

    #[arg(long)]
    max_salary: Option<u64>,

    /// Column to sort by, e.g. name, salary, joinDate
    #[arg(long, default_value_t = SortKey::Name)]
    sort: SortKey,

    #[arg(long)]
    desc: bool,

    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long)]
    page_size: Option<usize>,

    /// Seed for the generated roster
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of records to generate
    #[arg(long)]
    count: Option<usize>,

    /// JSON file with engine settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ids to pin before querying
    #[arg(long)]
    pin: Vec<String>,
}

impl Cli {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                EngineConfig::from_json_str(&json)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => EngineConfig::default(),
        };

        if let Some(count) = self.count {
            config.initial_count = count;
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        config.validate()?;
        Ok(config)
    }

    fn filters(&self) -> Filters {
        let mut filters = Filters::default();
        if let Some(department) = &self.department {
            filters = filters.department(department.clone());
        }
        if let Some(status) = self.status {
            filters = filters.status(status);
        }
        if self.min_age.is_some() || self.max_age.is_some() {
            filters =
                filters.age_range(self.min_age.unwrap_or(0), self.max_age.unwrap_or(u32::MAX));
        }
        if self.min_salary.is_some() || self.max_salary.is_some() {
            filters = filters.salary_range(
                self.min_salary.unwrap_or(0),
                self.max_salary.unwrap_or(u64::MAX),
            );
        }
        filters
    }

    fn sort(&self) -> SortSpec {
        if self.desc {
            SortSpec::desc(self.sort)
        } else {
            SortSpec::asc(self.sort)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.engine_config()?;

    let source = MockRecordSource::new(cli.seed).latency(config.load_latency);
    let dashboard = Dashboard::new(config)?;
    dashboard
        .load_from(&source)
        .await
        .context("initial load")?;

    let mut engine = dashboard.write().await;
    for id in &cli.pin {
        engine
            .toggle_pin(&RecordId::new(id.as_str()))
            .with_context(|| format!("pinning {}", id))?;
    }
    engine.set_filters(cli.filters());
    engine.set_sort(cli.sort());
    if let Some(search) = &cli.search {
        engine.search(search.as_str());
    }

    let window = engine.set_page(cli.page);
    println!(
        "page {}/{} | rows {}-{} of {} (collection {})",
        window.page,
        window.total_pages,
        if window.is_empty() { 0 } else { window.start + 1 },
        window.end,
        window.total_count,
        engine.collection_len(),
    );

    for row in engine.page_rows() {
        let record = row.record;
        println!(
            "{:>6} {} {:<14} {:<24} {:<36} {:>3} {:<12} {:>8} {} {:<8} {}",
            row.index + 1,
            if record.is_pinned { '*' } else { ' ' },
            record.id().as_str(),
            record.name,
            record.email,
            record.age,
            record.department,
            record.salary,
            record.join_date,
            record.status.as_str(),
            record.role.as_str(),
        );
    }

    Ok(())
}
