use clap::{Args, Parser, Subcommand};
use hm_app::{AppError, AppResult, RunManifest, RunResponse, run_service};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hm-cli")]
#[command(about = "Hydrometer particle-size analysis: sand, silt and clay from settling readings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate size fractions and write the result table
    Run {
        #[command(flatten)]
        inputs: InputArgs,
        /// Output CSV path (overrides the manifest's output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check configuration and column mapping without calculating
    Validate {
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Print the validated configuration as YAML
    ShowConfig {
        #[command(flatten)]
        inputs: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// YAML run manifest listing the input tables
    #[arg(long, conflicts_with_all = ["data", "params", "colnames", "calcset"])]
    manifest: Option<PathBuf>,
    /// Sample data CSV
    #[arg(long, required_unless_present = "manifest")]
    data: Option<PathBuf>,
    /// Parameter table CSV (Parameter, Value)
    #[arg(long, required_unless_present = "manifest")]
    params: Option<PathBuf>,
    /// Column-name mapping CSV (Variable, col_name_in_data)
    #[arg(long, required_unless_present = "manifest")]
    colnames: Option<PathBuf>,
    /// Calculation settings CSV (Setting, Value)
    #[arg(long, required_unless_present = "manifest")]
    calcset: Option<PathBuf>,
}

impl InputArgs {
    fn into_manifest(self) -> AppResult<RunManifest> {
        if let Some(path) = self.manifest {
            return RunManifest::load(&path);
        }
        match (self.data, self.params, self.colnames, self.calcset) {
            (Some(data), Some(parameters), Some(column_names), Some(settings)) => {
                Ok(RunManifest {
                    data,
                    parameters,
                    column_names,
                    settings,
                    output: None,
                })
            }
            _ => Err(AppError::Manifest(
                "either --manifest or all of --data, --params, --colnames, --calcset are required"
                    .to_string(),
            )),
        }
    }
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { inputs, output } => {
            let mut manifest = inputs.into_manifest()?;
            if output.is_some() {
                manifest.output = output;
            }
            cmd_run(&manifest)
        }
        Commands::Validate { inputs } => cmd_validate(&inputs.into_manifest()?),
        Commands::ShowConfig { inputs } => cmd_show_config(&inputs.into_manifest()?),
    }
}

fn cmd_run(manifest: &RunManifest) -> AppResult<()> {
    println!("Processing samples from: {}", manifest.data.display());
    let response = run_service::run(manifest)?;

    match &response.output_path {
        Some(path) => println!("✓ {} samples written to {}", response.rows, path.display()),
        None => print_fractions(&response),
    }
    if response.flagged_2um > 0 || response.flagged_50um > 0 {
        println!(
            "  Boundary handling used: {} rows at 2um, {} rows at 50um",
            response.flagged_2um, response.flagged_50um
        );
    }
    Ok(())
}

fn print_fractions(response: &RunResponse) {
    let table = &response.table;
    let label = table.headers().first().cloned().unwrap_or_default();
    let columns = ["P_sand", "P_silt", "P_clay", "Warning_2um", "Warning_50um"];
    let cols: Vec<_> = columns.iter().map(|c| table.column(c)).collect();

    println!("{label:<16} {:>8} {:>8} {:>8}", "sand %", "silt %", "clay %");
    for row in 0..table.n_rows() {
        let id = table.cell(row, 0).unwrap_or_default();
        let num = |i: usize| {
            cols[i]
                .and_then(|c| c.real(row))
                .map(|v| format!("{v:.1}"))
                .unwrap_or_else(|| "-".to_string())
        };
        println!("{id:<16} {:>8} {:>8} {:>8}", num(0), num(1), num(2));
        for warning in cols[3..].iter().flatten().filter_map(|c| c.get(row)) {
            if !warning.starts_with("Used data") {
                println!("  ! {warning}");
            }
        }
    }
}

fn cmd_validate(manifest: &RunManifest) -> AppResult<()> {
    println!("Validating inputs for: {}", manifest.data.display());
    let config = run_service::validate(manifest)?;
    println!("✓ Configuration is valid");
    println!("  Mapped columns: {}", config.columns.len());
    println!(
        "  Extrapolation handling: {}",
        config.settings.extrapolation_handling
    );
    if let hm_config::ExtrapolationHandling::Unrecognized(value) =
        &config.settings.extrapolation_handling
    {
        println!("  ! '{value}' is not truncate/extrapolate; out-of-range values will be empty");
    }
    Ok(())
}

fn cmd_show_config(manifest: &RunManifest) -> AppResult<()> {
    let config = run_service::validate(manifest)?;
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}
