use clap::Parser;
use generator::catalog::GeneratorConfig;
use report::writer::write_report;
use std::path::PathBuf;
use workflow::config::{CatalogSource, ScenarioConfig};
use workflow::runner::Runner;

mod generator;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Headless replay driver for the attraction explorer")]
struct Args {
    /// Load an interaction script from YAML
    #[arg(long)]
    script: Option<PathBuf>,
    /// Replace the scenario catalog with a JSON catalog file
    #[arg(long, conflicts_with = "generate")]
    catalog: Option<PathBuf>,
    /// Replace the scenario catalog with this many synthetic attractions
    #[arg(long)]
    generate: Option<usize>,
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Search query applied when no script is given
    #[arg(long)]
    query: Option<String>,
    /// Attraction ids or names to select in order when no script is given
    #[arg(long)]
    select: Vec<String>,
    /// Write the JSON report here
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut scenario = if let Some(path) = args.script {
        ScenarioConfig::load(path)?
    } else {
        ScenarioConfig::from_args(args.query, &args.select)
    };
    if let Some(path) = args.catalog {
        scenario.catalog = CatalogSource::File(path);
    } else if let Some(count) = args.generate {
        scenario.catalog = CatalogSource::Generated(GeneratorConfig {
            count,
            seed: args.seed,
            ..Default::default()
        });
    }

    let report = Runner::new(scenario).execute()?;
    println!("{}", report.summary());
    for transition in &report.transitions {
        println!("  #{} @{}ms {:?}", transition.seq, transition.at_ms, transition.intent);
    }

    match args.report {
        Some(path) => write_report(path, &report)?,
        None => println!("{}", serde_json::to_string_pretty(&report.final_state)?),
    }

    Ok(())
}
