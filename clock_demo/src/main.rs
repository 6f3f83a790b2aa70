use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use clap::Parser;
use seesaw_clock::{Body, ManualClock, SceneLayout, Simulation, SimulationConfig, SystemClock};
use tracing::info;

mod visual;

/// Seesaw ball clock.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Simulated seconds per real second.
    #[arg(long)]
    speed: Option<f64>,
    /// Start the clock at this time of day (HH:MM or HH:MM:SS).
    #[arg(long, value_parser = parse_time_of_day)]
    time: Option<NaiveTime>,
    /// Relaxation passes per frame.
    #[arg(long)]
    iterations: Option<u32>,
    /// Downward pull per frame.
    #[arg(long)]
    gravity: Option<f64>,
    /// JSON file with simulation parameters.
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON file with a replacement clock face.
    #[arg(long)]
    layout: Option<PathBuf>,
    /// Run this many frames without a window and report the final scene.
    #[arg(long)]
    headless: Option<u32>,
    /// Print the built-in layout as JSON and exit.
    #[arg(long)]
    print_layout: bool,
}

fn parse_time_of_day(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|err| format!("expected HH:MM or HH:MM:SS: {err}"))
}

impl Args {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
                SimulationConfig::from_json(&json)?
            }
            None => SimulationConfig::default(),
        };
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(gravity) = self.gravity {
            config.gravity = gravity;
        }
        config.validate()?;
        Ok(config)
    }

    fn layout(&self) -> Result<SceneLayout> {
        match &self.layout {
            Some(path) => {
                let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
                Ok(SceneLayout::from_json(&json)?)
            }
            None => Ok(SceneLayout::clock_face()),
        }
    }

    fn start_date(&self) -> Option<NaiveDateTime> {
        self.time.map(|time| Local::now().date_naive().and_time(time))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if args.print_layout {
        println!("{}", serde_json::to_string_pretty(&SceneLayout::clock_face())?);
        return Ok(());
    }

    let config = args.simulation_config()?;
    let layout = args.layout()?;

    match args.headless {
        Some(frames) => run_headless(config, layout, args.start_date(), frames),
        None => {
            let mut simulation = Simulation::new(config, layout, SystemClock)?;
            if let Some(date) = args.start_date() {
                simulation.set_time(date);
                simulation.reset();
            }
            visual::run(simulation).map_err(|err| anyhow::anyhow!("window error: {err}"))
        }
    }
}

/// Steps a deterministic clock at 60 frames per simulated second.
fn run_headless(config: SimulationConfig, layout: SceneLayout, start: Option<NaiveDateTime>, frames: u32) -> Result<()> {
    let clock = ManualClock::new(start.unwrap_or_else(|| Local::now().naive_local()));
    let mut simulation = Simulation::new(config, layout, clock.clone())?;
    info!(frames, start = %simulation.cur_date(), "running headless");

    for _ in 0..frames {
        clock.advance(Duration::microseconds(16_667));
        simulation.update();
    }

    for (index, body) in simulation.dynamic_bodies().iter().enumerate() {
        if let Body::Seesaw(seesaw) = body {
            let rod = seesaw.s2.position - seesaw.s1.position;
            info!(index, tilt_degrees = rod.y.atan2(rod.x).to_degrees(), "seesaw");
        }
    }
    info!(
        date = %simulation.cur_date(),
        dynamic = simulation.dynamic_bodies().len(),
        "headless run finished"
    );
    Ok(())
}
