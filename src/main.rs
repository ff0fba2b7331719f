mod config;
mod dataset;
mod disaster;
mod error;
mod export;
mod geo;
mod projector;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::disaster::{Disaster, MarkerAsset, Severity};
use crate::geo::{GeoPoint, PixelPoint};

#[derive(Parser)]
#[command(
    name = "quakemap",
    about = "Geo-reference pre-rendered overlay paths for the disaster map"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a pixel-space path dataset around a map center and export GeoJSON
    Project {
        /// Path dataset (JSON array of [[x, y], [x, y]] segments)
        #[arg(short, long, default_value = config::DEFAULT_DATASET_PATH)]
        dataset: String,

        /// Center latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Center longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Map zoom level
        #[arg(short, long, default_value_t = config::DEFAULT_ZOOM, allow_negative_numbers = true)]
        zoom: i32,

        /// Output GeoJSON file path
        #[arg(short, long, default_value = config::DEFAULT_OVERLAY_PATH)]
        output: String,

        /// Dataset points are stored as [row, col] rather than [x, y]
        #[arg(long)]
        row_col: bool,
    },

    /// Convert one tile pixel to a coordinate, or a coordinate back to a tile pixel
    Locate {
        /// Tile pixel x
        #[arg(short, long, allow_negative_numbers = true)]
        x: Option<f64>,

        /// Tile pixel y
        #[arg(short, long, allow_negative_numbers = true)]
        y: Option<f64>,

        /// Point to place in the tile, as LAT,LON (instead of --x/--y)
        #[arg(long, value_parser = parse_lat_lon, allow_hyphen_values = true)]
        point: Option<GeoPoint>,

        /// Center latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Center longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Map zoom level
        #[arg(short, long, default_value_t = config::DEFAULT_ZOOM, allow_negative_numbers = true)]
        zoom: i32,
    },

    /// Print the absolute Web Mercator pixel of a center coordinate
    Center {
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Map zoom level
        #[arg(short, long, default_value_t = config::DEFAULT_ZOOM, allow_negative_numbers = true)]
        zoom: i32,
    },

    /// Print the marker image for an alert feed disaster code
    Marker {
        /// Feed `type_ID` code (e.g. FLOOD), or ASSEMBLE, ASSEMBLE_DARK, WAYPOINT
        code: String,

        /// Feed `severity_ID`, e.g. WARNING
        #[arg(short, long)]
        severity: Option<String>,
    },
}

fn parse_lat_lon(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{s}'"))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| e.to_string())?;
    let lon = lon.trim().parse::<f64>().map_err(|e| e.to_string())?;
    Ok(GeoPoint::new(lat, lon))
}

fn check_zoom(zoom: i32) {
    if !(config::MIN_ZOOM..=config::MAX_ZOOM).contains(&zoom) {
        warn!(
            "Zoom {zoom} is outside the map's range {}..={}",
            config::MIN_ZOOM,
            config::MAX_ZOOM
        );
    }
}

fn do_project(
    dataset_path: &str,
    row_col: bool,
    center: GeoPoint,
    zoom: i32,
    output: &str,
) -> Result<()> {
    check_zoom(zoom);
    let mut dataset = dataset::PathDataset::load(dataset_path)?;
    if row_col {
        dataset = dataset.transposed();
    }
    if dataset.is_empty() {
        warn!("Dataset {dataset_path} has no segments; the overlay will be empty");
    }
    let segments = match projector::project_path_dataset(&dataset, &center, zoom) {
        Ok(segments) => segments,
        Err(e) => {
            error!(
                "Skipping overlay for ({}, {}) at zoom {zoom}: {e}",
                center.latitude, center.longitude
            );
            return Err(e.into());
        }
    };
    export::export_overlay(&segments, &center, zoom, output)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Project {
            dataset,
            lat,
            lon,
            zoom,
            output,
            row_col,
        } => {
            do_project(&dataset, row_col, GeoPoint::new(lat, lon), zoom, &output)?;
        }

        Commands::Locate {
            x,
            y,
            point,
            lat,
            lon,
            zoom,
        } => {
            check_zoom(zoom);
            let center = GeoPoint::new(lat, lon);
            match (point, x, y) {
                (Some(point), None, None) => {
                    let p = projector::geo_to_pixel(&point, &center, zoom, config::TILE_SIZE)?;
                    println!("{:.6} {:.6}", p.x, p.y);
                }
                (None, Some(x), Some(y)) => {
                    let g = projector::pixel_to_geo_default(&PixelPoint::new(x, y), &center, zoom)?
                        .rounded(config::COORD_PRECISION);
                    println!("{} {}", g.latitude, g.longitude);
                }
                _ => anyhow::bail!("Pass either --x and --y, or --point"),
            }
        }

        Commands::Center { lat, lon, zoom } => {
            check_zoom(zoom);
            let p = projector::geo_to_pixel_center(&GeoPoint::new(lat, lon), zoom)?;
            println!("{:.6} {:.6}", p.x, p.y);
        }

        Commands::Marker { code, severity } => {
            let asset = MarkerAsset::from_name(&code);
            if asset == MarkerAsset::Disaster(Disaster::Fallback)
                && !code.trim().eq_ignore_ascii_case("FALLBACK")
            {
                info!("Unknown disaster code '{code}', using fallback marker");
            }
            if let Some(severity) = severity {
                let severity: Severity = severity.parse()?;
                info!("{code} ({severity:?})");
            }
            println!("{}", asset.file_name());
        }
    }

    Ok(())
}
