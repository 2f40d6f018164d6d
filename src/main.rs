use ambulance_corridor::{
    gazetteer, signal, EngineConfig, EtaLabel, Journey, MotionSimulator, Snapshot, Status,
};
use anyhow::Context;
use clap::Parser;
use chrono::{DateTime, Utc};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "corridor")]
#[command(about = "Headless emergency vehicle route simulation")]
struct Cli {
    /// Pickup location
    #[arg(long, default_value = "MG Road")]
    from: String,

    /// Drop location
    #[arg(long, default_value = "Chord Road Hospital")]
    to: String,

    /// Treat the run as a critical emergency
    #[arg(long)]
    critical: bool,

    /// JSON file overriding the engine parameters
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Print every snapshot as a JSON line
    #[arg(long)]
    json: bool,

    /// Wait out each tick in real time instead of skipping ahead
    #[arg(long)]
    realtime: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => EngineConfig::default(),
    };

    let mut sim = MotionSimulator::new(config);
    sim.configure(&cli.from, &cli.to, cli.critical);

    if gazetteer::resolve_key(&cli.from).is_none() || gazetteer::resolve_key(&cli.to).is_none() {
        log::warn!("unknown location, falling back to the city centre");
    }

    let route = sim.route();
    println!("{} -> {}", cli.from, cli.to);
    println!(
        "Route: {} waypoints, {:.2} km direct, {:.2} km along the path",
        route.len(),
        route.direct_distance_km(),
        route.path_length_km()
    );
    let names = signal::signal_names(&cli.from);
    for signal in sim.signals() {
        println!(
            "  Signal {} at {:.0}%: {} ({:.4}, {:.4})",
            signal.number,
            signal.position * 100.0,
            signal::signal_label(names, signal.number),
            signal.coordinate.lat,
            signal.coordinate.lng
        );
    }

    let journey = Journey::begin(&cli.from, &cli.to, "", cli.critical);
    if cli.json {
        println!("{}", journey.to_json()?);
        sim.subscribe(|snapshot: &Snapshot| match serde_json::to_string(snapshot) {
            Ok(line) => println!("{}", line),
            Err(err) => log::error!("failed to encode snapshot: {}", err),
        });
    } else {
        sim.subscribe(|s: &Snapshot| {
            println!(
                "[{:>2}] {:>5.1}%  {:>4} km/h  {:<8} {:?}",
                s.position_index, s.progress_percent, s.speed_kmh, s.density, s.status
            )
        });
    }

    let wall_start = Instant::now();
    sim.start();
    while let Some(handle) = sim.pending_tick() {
        let dt = handle.due().saturating_sub(sim.now());
        if cli.realtime {
            std::thread::sleep(dt);
        }
        sim.advance(dt);
    }

    let snapshot = sim.snapshot();
    if snapshot.status != Status::Completed {
        anyhow::bail!("simulation ended in state {:?}", snapshot.status);
    }
    let cleared = sim.signal_states().iter().filter(|s| s.cleared).count();
    println!(
        "Arrived after {:.1}s of simulated time ({} of 5 signals cleared)",
        sim.now().as_secs_f64(),
        cleared
    );

    // The displayed estimate does not look at the simulation, only at the clock.
    let elapsed = if cli.realtime {
        wall_start.elapsed()
    } else {
        sim.now()
    };
    let now = chrono::Duration::from_std(elapsed)
        .ok()
        .and_then(|d| journey.start_time.checked_add_signed(d))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let remaining = journey.remaining_minutes(now, sim.config().nominal_journey_minutes);
    println!("Displayed ETA: {}", EtaLabel(remaining));
    Ok(())
}
