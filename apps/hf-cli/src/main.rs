use clap::{Parser, Subcommand, ValueEnum};
use hf_app::{AppError, AppResult, CaseReport, Measurement, case_service};
use hf_gas::{EquilibriumGas, InputPair, compute_equilibrium_state};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hf-cli")]
#[command(about = "HyperFlow CLI - hypersonic facility flow rebuilding", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Yaml,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate case file syntax and values
    Validate {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
    },
    /// Evaluate the forward model for a case
    Run {
        /// Path to the case file (YAML or JSON)
        case_path: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Print the equilibrium state for a pair of properties
    State {
        /// Mixture name (air5, nitrogen2)
        #[arg(long, default_value = "air5")]
        mixture: String,
        /// Input pair: pt, ph or ps
        #[arg(long, default_value = "pt")]
        pair: String,
        /// Pressure [Pa]
        first: f64,
        /// Temperature [K], enthalpy [J/kg] or entropy [J/(kg K)]
        second: f64,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the available measurements and their units
    Measurements,
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
        Commands::Validate { case_path } => cmd_validate(&case_path),
        Commands::Run { case_path, format } => cmd_run(&case_path, format),
        Commands::State {
            mixture,
            pair,
            first,
            second,
            json,
        } => cmd_state(&mixture, &pair, first, second, json),
        Commands::Measurements => cmd_measurements(),
    }
}

fn cmd_validate(case_path: &Path) -> AppResult<()> {
    println!("Validating case: {}", case_path.display());
    let case = case_service::load_case(case_path)?;
    println!("✓ Case '{}' is valid", case.name);
    println!(
        "  {} free-stream state(s), {} measurement(s)",
        case.free_stream_states().len(),
        case.measurements.len()
    );
    Ok(())
}

fn cmd_run(case_path: &Path, format: OutputFormat) -> AppResult<()> {
    let report = case_service::run_case_file(case_path)?;
    debug!(points = report.points.len(), "case evaluated");

    match format {
        OutputFormat::Table => print_table(&report),
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::Case(format!("Failed to serialize report: {}", e)))?;
            println!("{text}");
        }
        OutputFormat::Yaml => {
            let text = serde_yaml::to_string(&report)
                .map_err(|e| AppError::Case(format!("Failed to serialize report: {}", e)))?;
            print!("{text}");
        }
    }

    if report.failures() > 0 {
        return Err(AppError::Solver(format!(
            "{} of {} free-stream states failed",
            report.failures(),
            report.points.len()
        )));
    }
    Ok(())
}

fn print_table(report: &CaseReport) {
    println!("Case: {} ({})", report.name, report.mixture);
    for (i, point) in report.points.iter().enumerate() {
        let fs = &point.free_stream;
        println!(
            "\n[{}] T1 = {:.2} K, p1 = {:.2} Pa, M1 = {:.3}",
            i, fs.temperature_k, fs.pressure_pa, fs.mach
        );
        match (&point.values, &point.error) {
            (Some(values), _) => {
                for (m, v) in values {
                    println!("  {:<24} {:>14.6e} {}", m.name(), v, m.unit());
                }
            }
            (None, Some(err)) => println!("  ✗ {}", err),
            (None, None) => println!("  (no result)"),
        }
    }
}

fn cmd_state(mixture: &str, pair: &str, first: f64, second: f64, json: bool) -> AppResult<()> {
    let pair: InputPair = pair
        .parse()
        .map_err(|e: &str| AppError::InvalidInput(e.to_string()))?;
    let gas: EquilibriumGas = case_service::build_gas_model(mixture)?;
    let state = compute_equilibrium_state(&gas, pair, first, second)?;
    let report = state.report();

    if json {
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::Case(format!("Failed to serialize state: {}", e)))?;
        println!("{text}");
        return Ok(());
    }

    println!(
        "Equilibrium {} ({} input) at {} = {}, {} = {}",
        mixture,
        pair.label(),
        pair.first_label(),
        first,
        pair.second_label(),
        second
    );
    println!("  Pressure:        {:.6e} Pa", report.pressure_pa);
    println!("  Temperature:     {:.4} K", report.temperature_k);
    println!("  Density:         {:.6e} kg/m^3", report.density_kg_m3);
    println!("  Enthalpy:        {:.6e} J/kg", report.enthalpy_j_per_kg);
    println!("  Entropy:         {:.6e} J/(kg K)", report.entropy_j_per_kg_k);
    println!("  cp (frozen):     {:.4} J/(kg K)", report.cp_frozen_j_per_kg_k);
    println!("  gamma (frozen):  {:.5}", report.gamma_frozen);
    println!("  a (equilibrium): {:.3} m/s", report.speed_of_sound_m_s);
    println!("  a (frozen):      {:.3} m/s", report.frozen_speed_of_sound_m_s);
    println!("  Viscosity:       {:.6e} Pa s", report.viscosity_pa_s);
    println!("  Molar mass:      {:.6e} kg/mol", report.molar_mass_kg_per_mol);
    println!("  Mole fractions:");
    for (species, x) in &report.mole_fractions {
        println!("    {:<4} {:.6e}", species, x);
    }
    Ok(())
}

fn cmd_measurements() -> AppResult<()> {
    println!("Available measurements:");
    for m in Measurement::ALL {
        println!("  {:<24} [{}]", m.name(), m.unit());
    }
    Ok(())
}
