/// Side length of the square pixel tile the path dataset was drawn in.
pub const TILE_SIZE: f64 = 400.0;

pub const DEFAULT_ZOOM: i32 = 16;
pub const MIN_ZOOM: i32 = 0;
pub const MAX_ZOOM: i32 = 19;

/// Decimal places kept on projected coordinates (~11 cm on the ground).
pub const COORD_PRECISION: i32 = 6;

pub const DEFAULT_DATASET_PATH: &str = "data/paths.json";
pub const DEFAULT_OVERLAY_PATH: &str = "output/overlay.geojson";
