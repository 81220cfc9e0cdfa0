//! ctgtrace CLI — command-line interface for CTG trace photo analysis.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use ctgtrace::{AnalyzeConfig, Analyzer, FeatureVector, PixelGrid};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "ctgtrace")]
#[command(about = "Heuristic CTG trace photo analysis (Sobel edge pipeline + rule-based diagnosis)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a trace photograph and write a JSON result.
    Analyze(CliAnalyzeArgs),

    /// Print the remote-prediction payload for a trace photograph.
    Features {
        /// Path to the input image.
        #[arg(long)]
        image: PathBuf,
    },

    /// Map a remote prediction code to a diagnosis.
    MapPrediction {
        /// Prediction code returned by the endpoint (1, 2 or 3).
        #[arg(long)]
        code: i64,
    },
}

#[derive(Debug, Clone, Args)]
struct CliAnalyzeArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Path to write the analysis result (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Path to write the normalized edge map (PNG).
    #[arg(long)]
    edge_map: Option<PathBuf>,

    /// Gaussian denoise sigma applied before edge detection.
    #[arg(long)]
    blur_sigma: Option<f32>,

    /// Vertical-difference threshold for deceleration candidates.
    #[arg(long, default_value = "0.1")]
    decel_jump: f32,

    /// Required fall below the previously scanned pixel for a deceleration.
    #[arg(long, default_value = "0.08")]
    decel_drop: f32,

    /// Mean vertical difference below which a row window is low-variability.
    #[arg(long, default_value = "0.012")]
    low_var_threshold: f32,

    /// Number of rows per low-variability window.
    #[arg(long, default_value = "30")]
    segment_rows: usize,
}

impl CliAnalyzeArgs {
    fn to_config(&self) -> AnalyzeConfig {
        let mut config = AnalyzeConfig::default();
        config.features.decel_jump = self.decel_jump;
        config.features.decel_drop = self.decel_drop;
        config.features.low_var_threshold = self.low_var_threshold;
        config.features.segment_rows = self.segment_rows;
        config.blur_sigma = self.blur_sigma;
        config.collect_display_map = self.edge_map.is_some();
        config
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => run_analyze(&args),
        Commands::Features { image } => run_features(&image),
        Commands::MapPrediction { code } => run_map_prediction(code),
    }
}

fn load_grid(path: &PathBuf) -> CliResult<PixelGrid> {
    tracing::info!("Loading image: {}", path.display());
    let img = image::open(path)
        .map_err(|e| -> CliError { format!("failed to open image {}: {}", path.display(), e).into() })?;
    let grid = PixelGrid::from_dynamic(&img);
    tracing::info!(
        "Image size: {}x{} ({} channels)",
        grid.width(),
        grid.height(),
        grid.channels()
    );
    Ok(grid)
}

// ── analyze ────────────────────────────────────────────────────────────────

fn run_analyze(args: &CliAnalyzeArgs) -> CliResult<()> {
    let grid = load_grid(&args.image)?;
    let analyzer = Analyzer::with_config(args.to_config());
    let result = analyzer.analyze(&grid)?;

    println!("Diagnosis: {}", result.diagnosis);

    if let Some(edge_path) = &args.edge_map {
        let display = result
            .display_map
            .as_ref()
            .expect("display map collected when --edge-map is set");
        display.to_gray_image().save(edge_path)?;
        tracing::info!("Edge map written to {}", edge_path.display());
    }

    let json = serde_json::to_string_pretty(&result)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Results written to {}", args.out.display());

    Ok(())
}

// ── features ───────────────────────────────────────────────────────────────

fn run_features(image: &PathBuf) -> CliResult<()> {
    let grid = load_grid(image)?;
    let mut analyzer = Analyzer::new();
    analyzer.config_mut().collect_display_map = false;
    let result = analyzer.analyze(&grid)?;

    let payload: FeatureVector = result.features;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

// ── map-prediction ─────────────────────────────────────────────────────────

fn run_map_prediction(code: i64) -> CliResult<()> {
    let diagnosis = ctgtrace::diagnosis_from_code(code);
    println!("Prediction code: {}", code);
    println!("Diagnosis:       {}", diagnosis);
    Ok(())
}
