use std::fmt;
use std::str::FromStr;

use crate::error::FeedError;

/// Hazard categories published in the alert feed's `type_ID` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disaster {
    Flood,
    Wildfire,
    WinterStorm,
    Tornado,
    Volcano,
    Earthquake,
    Storm,
    ExtremeTemperature,
    Biomedical,
    Avalanche,
    Drought,
    Landslide,
    Fallback,
}

impl Disaster {
    pub const ALL: [Disaster; 13] = [
        Self::Flood,
        Self::Wildfire,
        Self::WinterStorm,
        Self::Tornado,
        Self::Volcano,
        Self::Earthquake,
        Self::Storm,
        Self::ExtremeTemperature,
        Self::Biomedical,
        Self::Avalanche,
        Self::Drought,
        Self::Landslide,
        Self::Fallback,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Flood => "FLOOD",
            Self::Wildfire => "WILDFIRE",
            Self::WinterStorm => "WINTERSTORM",
            Self::Tornado => "TORNADO",
            Self::Volcano => "VOLCANO",
            Self::Earthquake => "EARTHQUAKE",
            Self::Storm => "STORM",
            Self::ExtremeTemperature => "EXTREMETEMPERATURE",
            Self::Biomedical => "BIOMEDICAL",
            Self::Avalanche => "AVALANCHE",
            Self::Drought => "DROUGHT",
            Self::Landslide => "LANDSLIDE",
            Self::Fallback => "FALLBACK",
        }
    }

    /// Unknown or empty codes map to [`Disaster::Fallback`].
    pub fn from_feed_code(code: &str) -> Self {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.code().eq_ignore_ascii_case(code))
            .unwrap_or(Self::Fallback)
    }
}

impl fmt::Display for Disaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Information,
    Watch,
    Advisory,
}

impl FromStr for Severity {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WARNING" => Ok(Self::Warning),
            "INFORMATION" => Ok(Self::Information),
            "WATCH" => Ok(Self::Watch),
            "ADVISORY" => Ok(Self::Advisory),
            _ => Err(FeedError::UnknownSeverity(s.trim().to_string())),
        }
    }
}

/// Image shown for a marker on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerAsset {
    Disaster(Disaster),
    Assemble,
    AssembleDark,
    Waypoint,
}

impl MarkerAsset {
    /// Marker keys other than disasters, else the disaster for a feed code.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "ASSEMBLE" => Self::Assemble,
            "ASSEMBLE_DARK" => Self::AssembleDark,
            "WAYPOINT" => Self::Waypoint,
            other => Self::Disaster(Disaster::from_feed_code(other)),
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Disaster(d) => match d {
                Disaster::Flood => "flood.png",
                Disaster::Wildfire => "wildfire.png",
                Disaster::WinterStorm => "winterstorm.png",
                Disaster::Tornado => "tornado.png",
                Disaster::Volcano => "volcano.png",
                Disaster::Earthquake => "earthquake.png",
                Disaster::Storm => "storm.png",
                Disaster::ExtremeTemperature => "extremetemperature.png",
                Disaster::Biomedical => "biomedical.png",
                Disaster::Avalanche => "avalanche.png",
                Disaster::Drought => "drought.png",
                Disaster::Landslide => "landslide.png",
                Disaster::Fallback => "burger.png",
            },
            Self::Assemble => "assemble.png",
            Self::AssembleDark => "assemble-dark.png",
            Self::Waypoint => "waypoint.png",
        }
    }
}

impl From<Disaster> for MarkerAsset {
    fn from(d: Disaster) -> Self {
        Self::Disaster(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(Disaster::from_feed_code("FLOOD"), Disaster::Flood);
        assert_eq!(Disaster::from_feed_code("earthquake"), Disaster::Earthquake);
        assert_eq!(
            Disaster::from_feed_code(" EXTREMETEMPERATURE "),
            Disaster::ExtremeTemperature
        );
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(Disaster::from_feed_code("CYCLONE"), Disaster::Fallback);
        assert_eq!(Disaster::from_feed_code(""), Disaster::Fallback);
        assert_eq!(
            MarkerAsset::from(Disaster::from_feed_code("MARSQUAKE")).file_name(),
            "burger.png"
        );
    }

    #[test]
    fn test_codes_round_trip() {
        for d in Disaster::ALL {
            assert_eq!(Disaster::from_feed_code(&d.to_string()), d);
        }
    }

    #[test]
    fn test_every_disaster_has_distinct_asset() {
        let mut names: Vec<_> = Disaster::ALL
            .iter()
            .map(|d| MarkerAsset::from(*d).file_name())
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Disaster::ALL.len());
        assert_eq!(MarkerAsset::Waypoint.file_name(), "waypoint.png");
        assert_eq!(MarkerAsset::AssembleDark.file_name(), "assemble-dark.png");
    }

    #[test]
    fn test_marker_names() {
        assert_eq!(MarkerAsset::from_name("waypoint"), MarkerAsset::Waypoint);
        assert_eq!(MarkerAsset::from_name("ASSEMBLE"), MarkerAsset::Assemble);
        assert_eq!(MarkerAsset::from_name("assemble_dark"), MarkerAsset::AssembleDark);
        assert_eq!(
            MarkerAsset::from_name("tornado"),
            MarkerAsset::Disaster(Disaster::Tornado)
        );
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!("WATCH".parse::<Severity>().unwrap(), Severity::Watch);
        assert_eq!("advisory".parse::<Severity>().unwrap(), Severity::Advisory);
        assert_eq!(
            "SEVERE".parse::<Severity>(),
            Err(FeedError::UnknownSeverity("SEVERE".to_string()))
        );
    }
}
