use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::geo::{PathSegment, PixelPoint, PixelSegment};

/// Pre-rendered overlay paths in tile-pixel space. Loaded once, never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathDataset {
    segments: Vec<PixelSegment>,
}

impl PathDataset {
    pub fn new(segments: Vec<PixelSegment>) -> Self {
        Self { segments }
    }

    /// Parse a JSON array of two-point segments: `[[[x, y], [x, y]], ...]`.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: Vec<[PixelPoint; 2]> =
            serde_json::from_str(s).context("Path dataset must be an array of [[x, y], [x, y]]")?;

        for (i, [start, end]) in raw.iter().enumerate() {
            if !start.is_finite() || !end.is_finite() {
                anyhow::bail!("Segment {i} has a non-finite coordinate");
            }
        }

        Ok(Self::new(
            raw.into_iter()
                .map(|[start, end]| PathSegment::new(start, end))
                .collect(),
        ))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset {}", path.display()))?;
        let dataset = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse dataset {}", path.display()))?;
        info!(
            "Loaded {} path segments from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Copy with `x` and `y` swapped on every point, for datasets stored as
    /// `[row, col]` instead of `[x, y]`.
    pub fn transposed(&self) -> Self {
        let swap = |p: &PixelPoint| PixelPoint::new(p.y, p.x);
        Self::new(
            self.segments
                .iter()
                .map(|seg| PathSegment::new(swap(&seg.start), swap(&seg.end)))
                .collect(),
        )
    }

    pub fn segments(&self) -> &[PixelSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_segments_in_order() {
        let ds = PathDataset::from_json_str("[[[0, 0], [10, 20]], [[5.5, 6], [7, 8.25]]]").unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.segments()[0].end, PixelPoint::new(10.0, 20.0));
        assert_eq!(ds.segments()[1].start, PixelPoint::new(5.5, 6.0));
        assert_eq!(ds.segments()[1].end, PixelPoint::new(7.0, 8.25));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = PathDataset::from_json_str("[]").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_rejects_wrong_arity() {
        assert!(PathDataset::from_json_str("[[[0, 0], [1, 1], [2, 2]]]").is_err());
        assert!(PathDataset::from_json_str("[[[0, 0]]]").is_err());
        assert!(PathDataset::from_json_str("[[[0, 0, 0], [1, 1]]]").is_err());
        assert!(PathDataset::from_json_str("{\"x\": 1}").is_err());
    }

    #[test]
    fn test_transposed_swaps_axes() {
        let ds = PathDataset::from_json_str("[[[10, 20], [30, 40]]]").unwrap();
        let t = ds.transposed();
        assert_eq!(t.segments()[0].start, PixelPoint::new(20.0, 10.0));
        assert_eq!(t.segments()[0].end, PixelPoint::new(40.0, 30.0));
        assert_eq!(ds.segments()[0].start, PixelPoint::new(10.0, 20.0));
        assert_eq!(t.transposed(), ds);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[[[100, 200], [300, 400]]]").unwrap();

        let ds = PathDataset::load(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.segments()[0].start, PixelPoint::new(100.0, 200.0));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PathDataset::load(dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read dataset"));
    }
}
