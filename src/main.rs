//! Darknoise CLI
//!
//! Demonstration binary: runs the harvesting pipeline against a
//! synthetic covered sensor and prints the digest or exports the raw
//! bitstream. A real deployment replaces the mock sensor with the
//! host's capture subsystem.

use clap::Parser;
use darknoise::{
    analysis::{CoverMonitor, SharedThermalFeed, TemperatureStatus},
    batch::{BatchPhase, BatchRunner},
    capture::MockSensor,
    conditioning::{Artifact, OutputMode},
    config::AppConfig,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "darknoise",
    version,
    about = "Randomness from the dark-frame noise of a covered sensor"
)]
struct Cli {
    /// Number of samples in the batch.
    #[arg(short = 'n', long)]
    samples: Option<u32>,

    /// Darkness threshold (mean luminance on the 0-255 scale).
    #[arg(long)]
    threshold: Option<f64>,

    /// Export the corrected bitstream for external test suites
    /// instead of producing a digest.
    #[arg(long)]
    raw: bool,

    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Synthetic sensor frame width.
    #[arg(long, default_value_t = 320)]
    width: u32,

    /// Synthetic sensor frame height.
    #[arg(long, default_value_t = 240)]
    height: u32,

    /// Output path for raw export (defaults to a timestamped file).
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let mut app = match &cli.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => AppConfig::default(),
    };
    if let Some(samples) = cli.samples {
        app.batch.samples = samples;
    }
    if let Some(threshold) = cli.threshold {
        app.batch.darkness_threshold = threshold;
    }
    if cli.raw {
        app.batch.mode = OutputMode::Raw;
    }

    info!("Darknoise v{}", darknoise::VERSION);
    info!("This is a demonstration using synthetic sensor input");

    let mut sensor =
        MockSensor::new(cli.width, cli.height).with_frame_delay(Duration::from_millis(10));

    // Advisory cover check on the preview feed before starting.
    let mut cover = CoverMonitor::new(app.monitor.cover_threshold);
    cover.observe_plane(&sensor.preview_luma());
    if !cover.is_covered() {
        warn!("Lens does not appear covered; samples will likely fail validation");
    }

    // A real host pushes live readings; the demo publishes one ambient value.
    let thermal = SharedThermalFeed::new();
    thermal.publish(250);

    // Ctrl-C abandons the in-flight batch by dropping its future.
    let (cancel_tx, mut cancel_rx) = tokio::sync::mpsc::channel::<()>(1);
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = cancel_tx.try_send(());
    }) {
        warn!("Failed to install Ctrl-C handler: {}", e);
    }

    let mut runner = BatchRunner::new(app.batch.clone());
    let outcome = tokio::select! {
        result = runner.run(&mut sensor, &thermal, |p| match p.phase {
            BatchPhase::Capturing => info!("Capturing sample {} of {}...", p.sample, p.total),
            BatchPhase::Processed => info!("Processed sample {} of {}", p.sample, p.total),
        }) => result,
        _ = cancel_rx.recv() => {
            warn!("Batch cancelled; partial results discarded");
            return;
        }
    };

    let output = match outcome {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Batch failed: {}", e);
            std::process::exit(1);
        }
    };

    if output.temperature == TemperatureStatus::High {
        warn!("High temperature seen during the batch; noise quality may have drifted");
    }

    match &output.artifact {
        Artifact::Digest { hex, .. } => {
            info!(
                "Whitened {} corrected bits from {} samples into a 256-bit digest",
                output.corrected_bits, output.samples
            );
            println!("{}", hex);
        }
        Artifact::Bitstream { bits } => {
            let path = cli.out.unwrap_or_else(|| {
                let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
                PathBuf::from(format!("darknoise_testdata_{}.txt", stamp))
            });
            if let Err(e) = std::fs::write(&path, bits) {
                eprintln!("Failed to write {}: {}", path.display(), e);
                std::process::exit(1);
            }
            info!("Wrote {} corrected bits to {}", bits.len(), path.display());
        }
    }
}
