//! cafe — a single-counter cafe with a lunch rush and an afternoon peak.
//!
//! Customers arrive as a non-homogeneous Poisson process over a 24-hour day
//! and are served first-come-first-served by one barista.  Five days are
//! simulated with exponential service averaging one minute.
//!
//! Usage: `cafe [config.json]`.  The optional JSON file replaces the default
//! [`SimConfig`]; the arrival profile is fixed.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use qs_arrival::{ThinningProcess, load_profile_reader};
use qs_core::SimConfig;
use qs_engine::{DayOutcome, SimBuilder, SimObserver, SimSummary};
use qs_output::writer::OutputWriter;
use qs_output::{CsvWriter, SimOutputObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:       u64 = 42;
const SIM_DAYS:   u32 = 5;
const OUTPUT_DIR: &str = "output/cafe";

// ── Arrival profile ───────────────────────────────────────────────────────────

// Customers per hour.  The empty-bounds row is the rate outside every window.
const PROFILE_CSV: &str = "\
start,end,rate,first_day,last_day\n\
,,30,,\n\
10.5,11,100,,\n\
11,11.5,75,,\n\
14.5,15,80,,\n\
15,15.5,50,,\n\
";

fn default_config() -> SimConfig {
    SimConfig {
        open_time:         0.0,
        close_time:        24.0,
        num_days:          SIM_DAYS,
        mean_service_time: 1.0 / 60.0,
        seed:              SEED,
    }
}

fn load_config(path: &Path) -> Result<SimConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    customer_rows: usize,
    event_rows:    usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, customer_rows: 0, event_rows: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_day_end(&mut self, outcome: &DayOutcome) {
        self.customer_rows += outcome.customers.len();
        self.event_rows += outcome.events.len();
        info!(day = outcome.day, customers = outcome.arrivals, "day written");
        self.inner.on_day_end(outcome);
    }

    fn on_sim_end(&mut self, summary: &SimSummary) {
        self.inner.on_sim_end(summary);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .init();

    // 1. Config: defaults, or a JSON file given as the first argument.
    let config = match std::env::args_os().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => default_config(),
    };

    println!("=== cafe — single-server counter ===");
    println!(
        "Window: {}–{} h  |  Days: {}  |  Mean service: {:.2} min  |  Seed: {}",
        config.open_time,
        config.close_time,
        config.num_days,
        config.mean_service_time * 60.0,
        config.seed,
    );
    println!();

    // 2. Arrival profile from the embedded CSV.
    let profile = load_profile_reader(Cursor::new(PROFILE_CSV))?;
    println!(
        "Arrival profile: base {} /h, {} peak windows",
        profile.base_rate(),
        profile.segments().len()
    );

    // 3. Build sim.
    let arrivals = ThinningProcess::new(profile, config.open_time, config.close_time)?;
    println!("Thinning bound: {} /h", arrivals.bound());
    println!();
    let mut sim = SimBuilder::new(config.clone(), arrivals).build()?;

    // 4. Set up output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer, &config));

    // 5. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 6. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  customers.csv     : {} rows", obs.customer_rows);
    println!("  occupancy_log.csv : {} rows", obs.event_rows);
    println!();

    let summary = sim.summary();
    println!("Arrivals (Na)            : {}", summary.arrivals);
    println!("Departures (Nd)          : {}", summary.departures);
    println!("Overtime (Tp)            : {:.4} h", summary.overtime);
    println!("Average time in system   : {:.4} h", summary.average_time_in_system);
    println!("Average waiting time     : {:.4} h", summary.average_waiting_time);
    println!("Average queue length     : {:.4}", summary.average_queue_length);
    println!("Device occupancy         : {:.4}", summary.device_occupancy);
    println!();

    // 7. Day-1 customer table.
    println!(
        "{:<6} {:>10} {:>10} {:>10} {:>10}",
        "#", "Arrival", "Wait", "Departure", "In system"
    );
    println!("{}", "-".repeat(50));
    for (i, c) in sim.customers().iter().filter(|c| c.service_day == 1).enumerate() {
        println!(
            "{:<6} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            i + 1,
            c.arrival_time,
            c.wait_time,
            c.departure_time,
            c.time_in_system(),
        );
    }

    Ok(())
}
