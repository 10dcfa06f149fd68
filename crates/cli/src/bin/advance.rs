use std::path::PathBuf;

use anyhow::bail;
use bon_voyage::config;
use bon_voyage::export::journal::{self, ArrivalEntry, Entry, Journal};
use bon_voyage::sim::{ArrivalNotice, HostContext};
use clap::Parser;
use voyage_cli::{Session, init_logging, settings_from};

/// Advance every managed rover in a fleet file through a span of simulated time.
#[derive(Parser, Debug)]
#[command(author, version, about = "Offline rover fleet simulation")]
struct Cli {
    /// Fleet file (TOML or YAML)
    #[arg(long)]
    fleet: PathBuf,

    /// Plugin settings file (TOML or YAML)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Simulated seconds to advance
    #[arg(long)]
    seconds: f64,

    /// Simulated seconds per tick
    #[arg(long, default_value_t = 60.0)]
    step: f64,

    /// Universal time to start from (defaults to the latest rover update)
    #[arg(long)]
    start: Option<f64>,

    /// Where to write the updated fleet (defaults to overwriting --fleet)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Optional JSON journal of every tick
    #[arg(long)]
    journal: Option<PathBuf>,

    /// Drop time acceleration when a rover arrives
    #[arg(long, default_value_t = false)]
    auto_dewarp: bool,

    /// Time-acceleration rate index the run starts at
    #[arg(long, default_value_t = 0)]
    warp: u32,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !(cli.seconds.is_finite() && cli.seconds >= 0.0) {
        bail!("--seconds must be a non-negative number");
    }
    if !(cli.step.is_finite() && cli.step > 0.0) {
        bail!("--step must be positive");
    }

    let mut settings = settings_from(cli.settings.as_deref())?;
    settings.auto_dewarp |= cli.auto_dewarp;
    let mut session = Session::open(&cli.fleet, settings)?;
    session.host.set_warp_rate(cli.warp);

    let start = cli.start.unwrap_or_else(|| session.latest_update());
    let end = start + cli.seconds;
    let mut run = Journal::new(start, cli.step);
    let mut arrivals: Vec<ArrivalNotice> = Vec::new();

    let mut now = start;
    while now < end {
        now = (now + cli.step).min(end);
        session.host.set_time(now);
        session
            .fleet
            .update_all(now, &mut session.host, &mut session.store, &mut arrivals);
        if cli.journal.is_some() {
            run.entries
                .extend(session.fleet.rovers().iter().map(|rover| Entry {
                    time_s: now,
                    vessel_id: rover.vessel_id().to_string(),
                    status: rover.status().to_string(),
                    latitude: rover.position().latitude,
                    longitude: rover.position().longitude,
                    distance_travelled_m: rover.distance_travelled(),
                    remaining_m: rover.remaining(),
                }));
        }
    }
    run.end_ut = now;

    for notice in &arrivals {
        println!("{}\n{}\n", notice.title, notice.message());
    }
    for message in session.host.messages() {
        println!("{message}");
    }
    if session.host.time_warp_rate() != cli.warp {
        println!("time warp rate now {}", session.host.time_warp_rate());
    }

    for summary in session.fleet.summaries(now) {
        println!(
            "{:<24} {:<10} {}",
            summary.vessel_name, summary.body, summary.status
        );
    }

    if let Some(path) = &cli.journal {
        run.arrivals = arrivals
            .iter()
            .map(|notice| ArrivalEntry {
                vessel_name: notice.vessel_name.clone(),
                body: notice.body.clone(),
                latitude: notice.latitude,
                longitude: notice.longitude,
                distance_travelled_m: notice.distance_travelled,
            })
            .collect();
        journal::write_journal(path, &run)?;
    }

    if session.unreadable > 0 {
        eprintln!(
            "[warn] {} unreadable vessel entr{} kept as written",
            session.unreadable,
            if session.unreadable == 1 { "y" } else { "ies" }
        );
    }
    let output = cli.output.as_ref().unwrap_or(&cli.fleet);
    config::save_fleet(output, &session.updated_file())?;
    Ok(())
}
