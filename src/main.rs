use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

use pet_region_stats::constants;
use pet_region_stats::logging;
use pet_region_stats::{Config, Pipeline, PipelineResult};

#[derive(Parser)]
#[command(name = "pet_region_stats")]
#[command(about = "Regional pet pharmacy and pet registration statistics by district")]
#[command(version = "0.1.0")]
struct Cli {
    /// TOML file overriding the built-in districts, field names and labels
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count active veterinary pharmacies per district
    Pharmacy {
        #[arg(long, default_value = constants::DEFAULT_PHARMACY_INPUT)]
        input: PathBuf,
        #[arg(long, default_value = constants::DEFAULT_PHARMACY_OUTPUT)]
        output: PathBuf,
    },
    /// Sum registered animals per allowed species
    SpeciesTotals {
        #[arg(long, default_value = constants::DEFAULT_PET_COUNT_INPUT)]
        input: PathBuf,
        #[arg(long, default_value = constants::DEFAULT_SPECIES_TOTALS_OUTPUT)]
        output: PathBuf,
    },
    /// Pivot registered animals of one species by district and top breeds
    BreedPivot {
        #[arg(long, default_value = constants::DEFAULT_PET_COUNT_INPUT)]
        input: PathBuf,
        #[arg(long, default_value = constants::DEFAULT_PIVOT_OUTPUT)]
        output: PathBuf,
        /// Species to pivot (defaults to the configured pivot species)
        #[arg(long)]
        species: Option<String>,
    },
}

fn print_summary(result: &PipelineResult) {
    println!("\n📊 {} results:", result.pipeline);
    println!("   Records read: {}", result.stats.records_read);
    println!("   Used: {}", result.stats.records_used);
    println!("   Dropped: {}", result.stats.records_dropped);
    println!("   Output file: {}\n", result.output_file);
    print!("{}", result.table.render_text());
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    let outcome = match cli.command {
        Commands::Pharmacy { input, output } => Pipeline::run_pharmacy(&config, &input, &output),
        Commands::SpeciesTotals { input, output } => {
            Pipeline::run_species_totals(&config, &input, &output)
        }
        Commands::BreedPivot { input, output, species } => {
            let species = species.unwrap_or_else(|| config.pet_counts.pivot_species.clone());
            Pipeline::run_breed_pivot(&config, &input, &output, &species)
        }
    };

    match outcome {
        Ok(result) => {
            print_summary(&result);
            Ok(())
        }
        Err(e) => {
            error!("Pipeline failed: {}", e);
            Err(e).context("pipeline run aborted; no output was written")
        }
    }
}
