//! CLI tool for idisk

#[cfg(feature = "cli")]
use clap::Parser;
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "idisk")]
#[command(about = "List physical disks and their partitions with sizes", long_about = None)]
#[command(version)]
struct Cli {
    /// Unit of measurement: B, K, M, G or T
    #[arg(short, long)]
    unit: Option<String>,

    /// Device number (1-based); shows the partitions of that disk
    #[arg(short, long)]
    device: Option<usize>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Configuration file (defaults to ~/.config/idisk/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[cfg(feature = "cli")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use idisk::{
        display, select_inventory, Config, Measure, OutputFormat, Platform, Printer,
        SystemCommandRunner,
    };

    let cli = Cli::parse();

    env_logger::init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let unit = cli.unit.as_deref().unwrap_or(&config.general.unit);
    let measure: Measure = unit.parse()?;
    let format: OutputFormat = cli.format.parse()?;

    let platform = Platform::current();
    log::debug!("Listing disks on {}", platform);
    let inventory = select_inventory(&platform, Box::new(SystemCommandRunner), &config.commands)?;

    let stdout = std::io::stdout();
    let mut printer = Printer::new(stdout.lock(), measure, format);
    display(inventory.as_ref(), &mut printer, cli.device)?;

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features not enabled. Please compile with --features cli");
    std::process::exit(1);
}
