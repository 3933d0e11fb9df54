//! gasly server and CLI
//!
//! Webcam number scanning over HTTP or from the command line, plus a detour
//! ranking tool backed by the Google Distance Matrix API.
//!
//! # Usage
//!
//! ## Server Mode
//! ```bash
//! gasly-server serve --camera 0 --det-model models/det.onnx --rec-model models/rec.onnx --dict-path models/dict.txt --port 5000
//! ```
//!
//! ## One-shot scan
//! ```bash
//! gasly-server scan --camera pump.jpg --det-model models/det.onnx --rec-model models/rec.onnx --dict-path models/dict.txt
//! ```
//!
//! ## Detour ranking
//! ```bash
//! GOOGLE_MAPS_API_KEY=... gasly-server detour --start "New York, NY" --end "Boston, MA" \
//!     --site "Hartford, CT" --site "Providence, RI" --unit miles
//! ```

mod cli;
mod config;
mod ocr;
mod server;

use clap::{Args, Parser, Subcommand};
use gasly::core::{DetourConfig, ScanConfig, DEFAULT_MIN_CONFIDENCE, DEFAULT_WARMUP_MS};
use gasly::routing::fuel::{DEFAULT_FILL_LITRES, DEFAULT_KM_PER_LITRE};
use gasly::routing::{DistanceUnit, FuelAdvisor, Location, TravelMode};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "gasly-server")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Webcam number scanning and route detour ranking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that captures and scans a frame
#[derive(Args)]
struct CaptureArgs {
    /// Camera index, /dev/videoN device, or path to a still image
    #[arg(long, default_value = "0", env = "GASLY_CAMERA")]
    camera: String,

    /// Path to the text detection model
    #[arg(long = "det-model", env = "GASLY_DET_MODEL")]
    det_model: Option<PathBuf>,

    /// Path to the text recognition model
    #[arg(long = "rec-model", env = "GASLY_REC_MODEL")]
    rec_model: Option<PathBuf>,

    /// Path to the character dictionary
    #[arg(long = "dict-path", env = "GASLY_DICT_PATH")]
    dict_path: Option<PathBuf>,

    /// Spans must score strictly above this to contribute numbers
    #[arg(long = "min-confidence", default_value_t = DEFAULT_MIN_CONFIDENCE, env = "GASLY_MIN_CONFIDENCE")]
    min_confidence: f32,

    /// Milliseconds to wait after opening the camera before capturing
    #[arg(long = "warmup-ms", default_value_t = DEFAULT_WARMUP_MS, env = "GASLY_WARMUP_MS")]
    warmup_ms: u64,
}

impl CaptureArgs {
    fn into_config(self) -> config::CaptureConfig {
        config::CaptureConfig {
            camera: self.camera,
            scan: ScanConfig::new()
                .with_min_confidence(self.min_confidence)
                .with_warmup_ms(self.warmup_ms),
            recognizer: config::RecognizerConfig {
                det_model: self.det_model,
                rec_model: self.rec_model,
                dict_path: self.dict_path,
            },
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Capture one frame and print the numbers found in it
    Scan {
        #[command(flatten)]
        capture: CaptureArgs,

        /// Output format (json, pretty)
        #[arg(long, default_value = "pretty")]
        output: String,
    },
    /// Start the HTTP server
    Serve {
        #[command(flatten)]
        capture: CaptureArgs,

        /// Port to listen on
        #[arg(long, short, default_value = "5000", env = "GASLY_PORT")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0", env = "GASLY_HOST")]
        host: String,
    },
    /// Rank candidate sites by the detour they add between two points
    Detour {
        /// Google Maps API key
        #[arg(long = "api-key", env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Starting location (address or "lat,lng")
        #[arg(long)]
        start: Location,

        /// Ending location (address or "lat,lng")
        #[arg(long)]
        end: Location,

        /// Candidate site; repeat for several
        #[arg(long = "site", required = true)]
        sites: Vec<Location>,

        /// Travel mode (driving, walking, bicycling, transit)
        #[arg(long, default_value = "driving")]
        mode: TravelMode,

        /// Distance unit for the report (km, miles)
        #[arg(long, default_value = "km")]
        unit: DistanceUnit,

        /// Number of sites evaluated at the same time
        #[arg(long, default_value_t = 1, env = "GASLY_DETOUR_CONCURRENCY")]
        concurrency: usize,

        /// Per-request timeout in seconds
        #[arg(long = "timeout-secs", default_value_t = gasly::core::DEFAULT_REQUEST_TIMEOUT_SECS)]
        timeout_secs: u64,

        /// Fuel price at the station on the direct route
        #[arg(long = "path-price", requires = "detour_price")]
        path_price: Option<f64>,

        /// Fuel price at the detour station
        #[arg(long = "detour-price", requires = "path_price")]
        detour_price: Option<f64>,

        /// Litres bought per fill
        #[arg(long = "fill-litres", default_value_t = DEFAULT_FILL_LITRES)]
        fill_litres: f64,

        /// Vehicle fuel economy in km per litre
        #[arg(long = "km-per-litre", default_value_t = DEFAULT_KM_PER_LITRE)]
        km_per_litre: f64,

        /// Output format (json, pretty)
        #[arg(long, default_value = "pretty")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    gasly::utils::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { capture, output } => {
            let config = capture.into_config();
            info!("Scanning from: {}", config.camera);
            cli::run_scan(&config, &output).await?;
        }
        Commands::Serve {
            capture,
            port,
            host,
        } => {
            let config = config::ServerConfig {
                capture: capture.into_config(),
                host,
                port,
            };

            info!("Starting server on {}:{}", config.host, config.port);
            server::run_server(config).await?;
        }
        Commands::Detour {
            api_key,
            start,
            end,
            sites,
            mode,
            unit,
            concurrency,
            timeout_secs,
            path_price,
            detour_price,
            fill_litres,
            km_per_litre,
            output,
        } => {
            let fuel = match (path_price, detour_price) {
                (Some(path), Some(detour)) => Some(
                    FuelAdvisor::new(path, detour)
                        .with_fill_litres(fill_litres)
                        .with_km_per_litre(km_per_litre),
                ),
                _ => None,
            };

            let config = config::DetourRunConfig {
                api_key,
                start,
                end,
                sites,
                mode,
                detour: DetourConfig::new().with_concurrency(concurrency),
                unit,
                timeout: Duration::from_secs(timeout_secs),
                fuel,
            };

            cli::run_detour(&config, &output).await?;
        }
    }

    Ok(())
}
