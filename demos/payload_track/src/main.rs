//! payload_track — a small fleet of payload carts pushed along a hilly route.
//!
//! Each cart is pushed by a random crowd of up to three players, rolls down
//! slopes when nobody pushes, and stops at the delivery point.  The run
//! writes a CSV trace (`carrier_snapshots.csv`, `carrier_events.csv`,
//! `tick_summaries.csv`) to the output directory.
//!
//! ```text
//! RUST_LOG=debug cargo run -p payload_track -- --carriers 4 --out output/run1
//! ```

mod config;
mod crowd;
mod track;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use pt_core::{CarrierId, Tick};
use pt_engine::{CarrierEvent, MovementEngine, TickReport};
use pt_output::{CsvWriter, OutputWriter, SimOutputObserver};
use pt_sim::{SimBuilder, SimObserver};

use config::DemoConfig;
use crowd::Crowd;
use track::load_track;

#[derive(Parser, Debug)]
#[command(name = "payload_track")]
#[command(about = "Push payload carts along a waypoint track and write a CSV trace")]
struct Args {
    /// TOML run configuration (defaults to the built-in payload_track.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Track CSV with `chain,x,y,z,next_chain` rows (defaults to the built-in route)
    #[arg(long)]
    track: Option<PathBuf>,

    /// Override the number of carriers
    #[arg(long)]
    carriers: Option<usize>,

    /// Override the total number of ticks
    #[arg(long, short = 't')]
    ticks: Option<u64>,

    /// Output directory for the CSV trace
    #[arg(long, short = 'o', default_value = "output/payload_track")]
    out: PathBuf,
}

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    event_rows:    usize,
    deliveries:    Vec<(CarrierId, Tick)>,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, event_rows: 0, deliveries: Vec::new() }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_carrier_event(&mut self, tick: Tick, carrier: CarrierId, event: CarrierEvent) {
        self.event_rows += 1;
        if event == CarrierEvent::ReachedEnd {
            info!(%carrier, %tick, "payload delivered");
            self.deliveries.push((carrier, tick));
        }
        self.inner.on_carrier_event(tick, carrier, event);
    }

    fn on_tick_end(&mut self, tick: Tick, reports: &[TickReport]) {
        self.inner.on_tick_end(tick, reports);
    }

    fn on_snapshot(&mut self, tick: Tick, carriers: &[MovementEngine]) {
        self.snapshot_rows += carriers.len();
        self.inner.on_snapshot(tick, carriers);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // 1. Configuration.
    let mut config = DemoConfig::load(args.config.as_deref())?;
    if let Some(n) = args.carriers {
        config.carriers = n;
    }
    if let Some(t) = args.ticks {
        config.sim.total_ticks = t;
    }

    // 2. Track.
    let graph = load_track(args.track.as_deref())?;
    let total_length: f32 = graph.chains().map(|c| c.total_length()).sum();
    let start = graph
        .chains()
        .next()
        .map(|c| c.id)
        .ok_or_else(|| anyhow::anyhow!("track has no chains"))?;
    info!(
        chains = graph.chain_count(),
        nodes = graph.node_count(),
        length = total_length,
        "track loaded"
    );

    // 3. Sim.
    let mut sim = SimBuilder::new(config.sim.clone(), graph, Crowd { config: config.crowd.clone() })
        .carrier_config(config.carrier.clone())
        .carriers(std::iter::repeat_n(start, config.carriers))
        .build()?;

    // 4. Output.
    let writer = CsvWriter::new(&args.out)?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer, &config.sim));

    // 5. Run.
    let t0 = Instant::now();
    let summary = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!(error = %e, "output error");
    }
    if summary.sink_failures > 0 {
        warn!(failures = summary.sink_failures, "notification sink failures during run");
    }

    // 6. Summary.
    println!(
        "Ran {} ticks ({:.1} s simulated) in {:.3} s{}",
        summary.ticks,
        sim.clock.elapsed_secs(),
        elapsed.as_secs_f64(),
        if summary.stopped_early { ", every payload delivered" } else { "" },
    );
    print_outputs(&args.out, &obs);
    println!();

    println!("{:<8} {:<18} {:<8} {:<8} {:<10}", "Cart", "Motion", "Chain", "Node", "Delivered");
    println!("{}", "-".repeat(56));
    for (i, engine) in sim.engines.iter().enumerate() {
        let carrier = CarrierId(i as u32);
        let delivered = obs
            .deliveries
            .iter()
            .find(|(c, _)| *c == carrier)
            .map(|(_, t)| t.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<8} {:<18} {:<8} {:<8} {:<10}",
            i,
            engine.motion().as_str(),
            sim.graph.chain(engine.state().chain).name,
            engine.state().index,
            delivered,
        );
    }

    Ok(())
}

fn print_outputs<W: OutputWriter>(dir: &Path, obs: &CountingObserver<W>) {
    println!("  {}", dir.display());
    println!("    carrier_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("    carrier_events.csv    : {} rows", obs.event_rows);
}
