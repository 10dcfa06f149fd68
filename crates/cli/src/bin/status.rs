use std::io::Write;
use std::path::PathBuf;

use bon_voyage::export::{self, format_period, status};
use clap::Parser;
use voyage_cli::{Session, init_logging, settings_from};

/// Summarize the rovers in a fleet file.
#[derive(Parser, Debug)]
#[command(author, version, about = "Rover fleet status report")]
struct Cli {
    /// Fleet file (TOML or YAML)
    #[arg(long)]
    fleet: PathBuf,

    /// Plugin settings file (TOML or YAML)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Universal time to report idle periods against (defaults to the latest rover update)
    #[arg(long)]
    at: Option<f64>,

    /// Write the report as CSV to this path (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = settings_from(cli.settings.as_deref())?;
    let session = Session::open(&cli.fleet, settings)?;
    let now = cli.at.unwrap_or_else(|| session.latest_update());
    let summaries = session.fleet.summaries(now);

    if let Some(path) = &cli.csv {
        let mut writer = export::writer_for_path(path)?;
        status::write_header(writer.as_mut())?;
        for summary in &summaries {
            status::Record {
                vessel_id: &summary.vessel_id,
                vessel_name: &summary.vessel_name,
                body: &summary.body,
                status: summary.status.label(),
                effective_speed: summary.effective_speed,
                remaining_m: summary.remaining_m,
                idle_for_s: summary.idle_for_s,
            }
            .write_to(writer.as_mut())?;
        }
        writer.flush()?;
        if path.as_os_str() == "-" {
            return Ok(());
        }
    }

    if summaries.is_empty() {
        println!("No rovers under management.");
        return Ok(());
    }
    for summary in &summaries {
        let detail = match (summary.effective_speed, summary.remaining_m, summary.idle_for_s) {
            (Some(speed), Some(remaining), _) => {
                format!("{speed:.2} m/s, {:.1} km left", remaining / 1000.0)
            }
            (_, _, Some(idle)) => format!("idle for {}", format_period(idle)),
            _ => String::new(),
        };
        println!(
            "{:<24} {:<10} {:<28} {}",
            summary.vessel_name, summary.body, summary.status, detail
        );
    }
    Ok(())
}
