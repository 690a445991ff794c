use std::fs;
use std::process::ExitCode;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand};

use windtrace::wind::{
    compute_wind_profile, compute_wind_rose, vertical_velocity_series, TrajectoryPoint, WindConfig,
};

#[derive(Parser)]
#[command(name = "windtrace")]
#[command(about = "Wind profiling from balloon drift trajectories")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a wind configuration file
    Validate { config: String },
    /// Compute the per-altitude-layer wind profile from a samples file
    Profile {
        samples: String,
        #[command(flatten)]
        input: InputArgs,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Compute the smoothed vertical-velocity series from a samples file
    Vertical {
        samples: String,
        #[command(flatten)]
        input: InputArgs,
        #[arg(long)]
        json: bool,
    },
    /// Count wind vectors into compass sectors and speed classes
    Rose {
        samples: String,
        #[command(flatten)]
        input: InputArgs,
        /// Only include vectors at or above this altitude (meters)
        #[arg(long)]
        min_altitude: Option<f64>,
        /// Only include vectors below this altitude (meters)
        #[arg(long)]
        max_altitude: Option<f64>,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Wind configuration file (YAML); defaults apply when omitted
    #[arg(long)]
    config: Option<String>,
    /// Only use samples newer than this, e.g. "30m" or "2h 15m"
    #[arg(long, value_parser = humantime::parse_duration)]
    recent: Option<Duration>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config } => validate(&config),
        Commands::Profile {
            samples,
            input,
            json,
        } => profile(&samples, &input, json),
        Commands::Vertical {
            samples,
            input,
            json,
        } => vertical(&samples, &input, json),
        Commands::Rose {
            samples,
            input,
            min_altitude,
            max_altitude,
        } => rose(&samples, &input, min_altitude, max_altitude),
    }
}

fn validate(path: &str) -> ExitCode {
    let yaml = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match WindConfig::from_yaml(&yaml) {
        Ok(config) => {
            println!(
                "Config is valid (bin width {} m, min samples {}, smoothing window {})",
                config.bin_width_m, config.min_samples_per_bin, config.smoothing_window
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Invalid config: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn profile(samples_path: &str, input: &InputArgs, json: bool) -> ExitCode {
    let (points, config) = match load_inputs(samples_path, input) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let profile = match compute_wind_profile(&points, &config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Profile error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if json {
        return print_json(&profile);
    }

    if profile.is_empty() {
        println!("No layer reached {} samples", config.min_samples_per_bin);
        return ExitCode::SUCCESS;
    }

    println!(
        "{:>10}  {:>10}  {:>9}  {:>9}  {:>7}",
        "layer (m)", "speed m/s", "dir deg", "disp deg", "samples"
    );
    for estimate in &profile.estimates {
        println!(
            "{:>10}  {:>10.2}  {:>9}  {:>9}  {:>7}",
            format!("{:.0}", estimate.bin_floor),
            estimate.mean_speed,
            format_opt(estimate.mean_direction),
            format_opt(estimate.direction_dispersion),
            estimate.sample_count
        );
    }
    ExitCode::SUCCESS
}

fn vertical(samples_path: &str, input: &InputArgs, json: bool) -> ExitCode {
    let (points, config) = match load_inputs(samples_path, input) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let series = match vertical_velocity_series(&points, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Vertical velocity error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if json {
        return print_json(&series);
    }

    for sample in &series {
        println!(
            "{}  {:>9.1} m  {:>+7.2} m/s",
            sample.timestamp.format("%Y-%m-%d %H:%M:%S"),
            sample.altitude,
            sample.vertical_rate
        );
    }
    ExitCode::SUCCESS
}

fn rose(
    samples_path: &str,
    input: &InputArgs,
    min_altitude: Option<f64>,
    max_altitude: Option<f64>,
) -> ExitCode {
    let (points, config) = match load_inputs(samples_path, input) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    match compute_wind_rose(&points, &config, min_altitude, max_altitude) {
        Ok(rose) => print_json(&rose),
        Err(e) => {
            eprintln!("Wind rose error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_inputs(
    samples_path: &str,
    input: &InputArgs,
) -> Result<(Vec<TrajectoryPoint>, WindConfig), ExitCode> {
    let config = match &input.config {
        Some(path) => {
            let yaml = fs::read_to_string(path).map_err(|e| {
                eprintln!("Error reading config: {}", e);
                ExitCode::FAILURE
            })?;
            WindConfig::from_yaml(&yaml).map_err(|e| {
                eprintln!("Invalid config: {}", e);
                ExitCode::FAILURE
            })?
        }
        None => WindConfig::default(),
    };

    let raw = fs::read_to_string(samples_path).map_err(|e| {
        eprintln!("Error reading samples: {}", e);
        ExitCode::FAILURE
    })?;
    let mut points: Vec<TrajectoryPoint> = serde_json::from_str(&raw).map_err(|e| {
        eprintln!("Invalid samples file: {}", e);
        ExitCode::FAILURE
    })?;

    // The recency window is resolved to a cutoff here, at the boundary; the
    // core itself never consults the clock.
    if let Some(window) = input.recent {
        let window = chrono::Duration::from_std(window).map_err(|e| {
            eprintln!("Invalid recency window: {}", e);
            ExitCode::FAILURE
        })?;
        let cutoff = Utc::now() - window;
        points.retain(|p| p.timestamp >= cutoff);
        log::info!("{} samples within recency window", points.len());
    }

    Ok((points, config))
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn format_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}
