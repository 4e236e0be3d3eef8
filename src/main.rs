use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use paddock::{
    EngineConfig, PaddockError, SessionReport, normalize_series, project_path,
    telemetry::{load_lap_response, load_session_summary},
    writer::write_json,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Engine config file, defaults to the user's config directory
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the full dashboard report for a lap response
    Report {
        #[arg(short, long)]
        laps: PathBuf,

        #[arg(short, long)]
        summary: Option<PathBuf>,

        /// Narrow the replay, lap time chart and overview to one car
        #[arg(long)]
        car: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Project frames onto the replay track
    Replay {
        #[arg(short, long)]
        laps: PathBuf,

        #[arg(long)]
        car: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Normalize a numeric series into chart space
    Chart {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
    /// Print the effective engine config, or persist it
    Config {
        /// Save to the user's config directory
        #[arg(long, conflicts_with = "output")]
        save: bool,

        /// Write the config to this file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig, PaddockError> {
    let config = match path {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::from_local_file()?.unwrap_or_default(),
    };
    Ok(config)
}

fn report(
    config: &EngineConfig,
    laps: &PathBuf,
    summary: Option<&PathBuf>,
    car: Option<&str>,
    output: Option<&PathBuf>,
) -> Result<(), PaddockError> {
    let lap_response = load_lap_response(laps)?;
    let session_summary = summary.map(|path| load_session_summary(path)).transpose()?;
    let report = SessionReport::build(&lap_response, session_summary.as_ref(), config, car);
    info!(
        "Report for {} at {}: {} cars, {} pace points",
        report.session_id,
        report.track,
        report.cars.len(),
        report.pace.len()
    );
    write_json(&report, output.map(PathBuf::as_path))
}

fn replay(
    config: &EngineConfig,
    laps: &PathBuf,
    car: Option<&str>,
    output: Option<&PathBuf>,
) -> Result<(), PaddockError> {
    let lap_response = load_lap_response(laps)?;
    let path = match car {
        Some(car_id) => project_path(lap_response.frames_for_car(car_id), &config.projection),
        None => project_path(lap_response.frames(), &config.projection),
    };
    write_json(&path, output.map(PathBuf::as_path))
}

fn write_config(
    config: &EngineConfig,
    save: bool,
    output: Option<&PathBuf>,
) -> Result<(), PaddockError> {
    if save {
        config.save()?;
        info!("Saved engine config to {:?}", EngineConfig::default_path());
        return Ok(());
    }
    match output {
        Some(path) => {
            config.save_to(path)?;
            info!("Wrote engine config to {:?}", path);
            Ok(())
        }
        None => write_json(config, None),
    }
}

fn run(cli: &Args) -> Result<(), PaddockError> {
    let config = load_config(cli.config.as_ref())?;
    match &cli.command {
        Commands::Report {
            laps,
            summary,
            car,
            output,
        } => report(&config, laps, summary.as_ref(), car.as_deref(), output.as_ref()),
        Commands::Replay { laps, car, output } => {
            replay(&config, laps, car.as_deref(), output.as_ref())
        }
        Commands::Chart { values } => write_json(&normalize_series(values), None),
        Commands::Config { save, output } => write_config(&config, *save, output.as_ref()),
    }
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let cli = Args::parse();
    if let Err(e) = run(&cli) {
        // logging is only wired up in debug builds
        eprintln!("Error: {}", e.chain());
        std::process::exit(1);
    }
}
