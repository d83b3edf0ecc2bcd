use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use routeguide_cli::args::{parse_note, parse_point};
use routeguide_cli::commands::{self, Output};
use routeguide_cli::output::OutputFormat;
use routeguide_cli::{RouteGuideClient, DEFAULT_SERVER};
use routeguide_lib::{Point, Rectangle, RouteNote};

#[derive(Parser, Debug)]
#[command(author, version, about = "Route guide client and dataset utilities")]
struct Cli {
    /// Base URL of the route guide service.
    #[arg(long, global = true, env = "ROUTEGUIDE_SERVER", default_value = DEFAULT_SERVER)]
    server: String,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up the features at one or more points concurrently.
    GetFeature {
        /// Points as LAT,LON in degrees times 1e7. Defaults to a known
        /// feature and an empty location.
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        points: Vec<Point>,
    },
    /// List the features inside a rectangle.
    ListFeatures {
        /// One corner, as LAT,LON.
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        lo: Option<Point>,
        /// The opposite corner, as LAT,LON.
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        hi: Option<Point>,
    },
    /// Record a route and print its summary.
    RecordRoute {
        /// JSON file holding an array of points.
        #[arg(long)]
        points_file: Option<PathBuf>,
        /// A point to visit, as LAT,LON (repeatable, sent after the file's points).
        #[arg(long = "point", value_parser = parse_point, allow_hyphen_values = true)]
        points: Vec<Point>,
    },
    /// Post notes and print the earlier notes at the same locations.
    RouteChat {
        /// A note as LAT,LON:MESSAGE (repeatable).
        #[arg(long = "note", value_parser = parse_note, allow_hyphen_values = true)]
        notes: Vec<RouteNote>,
    },
    /// Load a dataset file locally and report how many features it holds.
    CheckDataset {
        /// Path to the dataset JSON file.
        path: PathBuf,
        /// Also count features inside this rectangle (requires --hi).
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true, requires = "hi")]
        lo: Option<Point>,
        /// Opposite rectangle corner (requires --lo).
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true, requires = "lo")]
        hi: Option<Point>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let output = Output::new(cli.format);

    match cli.command {
        Command::CheckDataset { path, lo, hi } => {
            let rectangle = lo.zip(hi).map(|(lo, hi)| Rectangle::new(lo, hi));
            commands::dataset::run(&path, rectangle, output)
        }
        Command::GetFeature { points } => {
            let client = RouteGuideClient::new(&cli.server)?;
            commands::lookup::run(&client, &points, output).await
        }
        Command::ListFeatures { lo, hi } => {
            let client = RouteGuideClient::new(&cli.server)?;
            let rectangle = Rectangle::new(
                lo.unwrap_or(commands::features::DEFAULT_LO),
                hi.unwrap_or(commands::features::DEFAULT_HI),
            );
            commands::features::run(&client, rectangle, output).await
        }
        Command::RecordRoute {
            points_file,
            points,
        } => {
            let client = RouteGuideClient::new(&cli.server)?;
            commands::route::run(&client, points_file.as_deref(), points, output).await
        }
        Command::RouteChat { notes } => {
            let client = RouteGuideClient::new(&cli.server)?;
            commands::chat::run(&client, notes, output).await
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
