use clap::{Parser, Subcommand};
use ntp_app::{
    AppResult, RunOptions, SummaryRow, SweepDefinition, SweepParameter, SweepType, WallCheck,
    export, project_service, render_table, run_service, summarize, sweep,
};
use ntp_model::SimulationResult;
use ntp_project::ReactorDef;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ntp-cli")]
#[command(about = "NTP engine steady-state performance estimator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a reactor or study file
    Validate {
        /// Path to the YAML or JSON file
        path: PathBuf,
        /// Treat the file as a multi-reactor study
        #[arg(long)]
        study: bool,
    },
    /// Write the reference reactor definition to a file
    Init {
        /// Output path (.yaml, .yml or .json)
        path: PathBuf,
        /// Reactor name
        #[arg(long, default_value = "NTP-Reference")]
        name: String,
    },
    /// Run a single reactor
    Run {
        /// Path to the reactor file
        path: PathBuf,
        /// Write the full result as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// Write the axial profile as CSV
        #[arg(long)]
        profile_csv: Option<PathBuf>,
        /// Fail when the nozzle has no flow
        #[arg(long)]
        strict: bool,
    },
    /// Run every reactor in a study
    Batch {
        /// Path to the study file
        path: PathBuf,
        /// Write the summary table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Run reactors one after another instead of in parallel
        #[arg(long)]
        serial: bool,
        /// Fail a reactor when its nozzle has no flow
        #[arg(long)]
        strict: bool,
    },
    /// Sweep one parameter of a reactor
    Sweep {
        /// Path to the base reactor file
        path: PathBuf,
        /// total_power, mass_flow, area_exit, inlet_pressure or exit_pressure
        #[arg(long)]
        parameter: SweepParameter,
        /// Start value (SI)
        #[arg(long)]
        start: f64,
        /// End value (SI)
        #[arg(long)]
        end: f64,
        /// Number of points
        #[arg(long, default_value_t = 11)]
        points: usize,
        /// Logarithmic spacing
        #[arg(long)]
        log: bool,
        /// Write the summary table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Run points one after another instead of in parallel
        #[arg(long)]
        serial: bool,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path, study } => cmd_validate(&path, study),
        Commands::Init { path, name } => cmd_init(&path, name),
        Commands::Run {
            path,
            json,
            profile_csv,
            strict,
        } => cmd_run(&path, json.as_deref(), profile_csv.as_deref(), strict),
        Commands::Batch {
            path,
            csv,
            serial,
            strict,
        } => cmd_batch(
            &path,
            csv.as_deref(),
            RunOptions {
                parallel: !serial,
                strict,
            },
        ),
        Commands::Sweep {
            path,
            parameter,
            start,
            end,
            points,
            log,
            csv,
            serial,
        } => {
            let sweep_type = if log {
                SweepType::Logarithmic
            } else {
                SweepType::Linear
            };
            let definition = SweepDefinition::new(parameter, start, end, points, sweep_type)?;
            cmd_sweep(
                &path,
                &definition,
                csv.as_deref(),
                RunOptions {
                    parallel: !serial,
                    strict: false,
                },
            )
        }
    }
}

fn cmd_validate(path: &Path, is_study: bool) -> AppResult<()> {
    println!("Validating: {}", path.display());
    let study = if is_study {
        project_service::load_study(path)?
    } else {
        project_service::single_reactor_study(project_service::load_reactor(path)?)
    };
    project_service::validate_study(&study)?;

    for reactor in project_service::list_reactors(&study) {
        println!(
            "  {} - {:.1} MW, {:.2} kg/s, {} slices, {} shape",
            reactor.name,
            reactor.total_power_w / 1e6,
            reactor.mass_flow_kgps,
            reactor.slice_count,
            reactor.power_shape
        );
    }
    println!("✓ Valid");
    Ok(())
}

fn cmd_init(path: &Path, name: String) -> AppResult<()> {
    project_service::save_reactor(path, &ReactorDef::reference(name))?;
    println!("✓ Wrote reference reactor to {}", path.display());
    Ok(())
}

fn cmd_run(
    path: &Path,
    json: Option<&Path>,
    profile_csv: Option<&Path>,
    strict: bool,
) -> AppResult<()> {
    let reactor = project_service::load_reactor(path)?;
    let options = RunOptions {
        parallel: false,
        strict,
    };
    let result = run_service::run_reactor(&reactor, &options)?;

    print_result(&result, reactor.wall_temperature_limit_k());

    if let Some(out) = json {
        export::save_result_json(out, &result)?;
        println!("✓ Result written to {}", out.display());
    }
    if let Some(out) = profile_csv {
        export::save_profile_csv(out, &result)?;
        println!("✓ Axial profile written to {}", out.display());
    }
    Ok(())
}

fn cmd_batch(path: &Path, csv: Option<&Path>, options: RunOptions) -> AppResult<()> {
    let study = project_service::load_study(path)?;
    println!(
        "Running study '{}' ({} reactors)",
        study.name,
        study.reactors.len()
    );

    let runs = run_service::run_study(&study, &options);
    let rows = summarize(&runs);
    print_rows(&rows, csv)
}

fn cmd_sweep(
    path: &Path,
    definition: &SweepDefinition,
    csv: Option<&Path>,
    options: RunOptions,
) -> AppResult<()> {
    let base = project_service::load_reactor(path)?;
    println!("{} on '{}'", definition, base.reactor_name);

    let runs = sweep::run_sweep(&base, definition, &options);
    let rows: Vec<SummaryRow> = runs.iter().map(|p| SummaryRow::from_run(&p.run)).collect();
    print_rows(&rows, csv)
}

fn print_rows(rows: &[SummaryRow], csv: Option<&Path>) -> AppResult<()> {
    print!("{}", render_table(rows));

    let failed = rows.iter().filter(|r| r.is_error()).count();
    if failed > 0 {
        println!("{} of {} runs failed", failed, rows.len());
    }

    if let Some(out) = csv {
        export::save_summary_csv(out, rows)?;
        println!("✓ Summary written to {}", out.display());
    }
    Ok(())
}

fn print_result(result: &SimulationResult, wall_limit_k: Option<f64>) {
    let nozzle = result.nozzle();
    let thermal = result.thermal();
    let throat = result.throat();

    println!("Reactor: {}", result.reactor_name());
    println!(
        "  Power shape:      {} ({} slices)",
        result.power_shape(),
        thermal.len()
    );
    println!(
        "  Chamber:          T0 = {:.1} K, P0 = {:.3} MPa",
        result.stagnation().temperature_k,
        result.stagnation().pressure_pa / 1e6
    );
    println!(
        "  Max wall temp:    {:.1} K",
        thermal.max_wall_temperature_k()
    );
    if let Some(limit) = wall_limit_k {
        let check = WallCheck::evaluate(result, limit);
        let verdict = if check.within_limit() {
            "ok"
        } else {
            "EXCEEDED"
        };
        println!(
            "  Wall limit:       {:.1} K ({}, margin {:.1} K)",
            limit, verdict, check.margin_k
        );
    }

    println!("  Nozzle:           {}", nozzle.status);
    if let Some(reason) = &nozzle.no_flow_reason {
        println!("  No flow:          {}", reason);
        return;
    }
    println!(
        "  Exit velocity:    {:.1} m/s (Mach {:.3})",
        nozzle.exit_velocity_mps, nozzle.exit_mach
    );
    println!("  Specific impulse: {:.1} s", nozzle.specific_impulse_s);
    println!("  Thrust:           {:.1} kN", nozzle.thrust_n / 1e3);
    if let Some(p_crit) = nozzle.critical_pressure_pa {
        println!("  Critical press.:  {:.3} MPa", p_crit / 1e6);
    }
    println!(
        "  c*:               {:.1} m/s, C_F = {:.3}",
        throat.characteristic_velocity_mps, throat.thrust_coefficient
    );
    if throat.throat_flow_ratio > 1.0 {
        println!(
            "  Throat:           demanded flow is {:.2}x the choked capacity",
            throat.throat_flow_ratio
        );
    }
}
