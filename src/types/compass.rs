//! Defines the `CompassPoint` enum, mapping the sixteen compass labels used in
//! daily observation files to approximate degree angles.

use std::fmt;

/// Token used by observation files in wind speed and direction fields when no
/// measurable wind was recorded.
pub const CALM_TOKEN: &str = "Calm";

/// One of the sixteen points of the compass rose, in clockwise order starting at north.
///
/// # Examples
///
/// ```
/// use obsplot::CompassPoint;
///
/// assert_eq!(CompassPoint::from_label("SSE"), Some(CompassPoint::SSE));
/// assert_eq!(CompassPoint::SSE.degrees(), 157.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    /// All sixteen points, ordered clockwise from north.
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::NNE,
        CompassPoint::NE,
        CompassPoint::ENE,
        CompassPoint::E,
        CompassPoint::ESE,
        CompassPoint::SE,
        CompassPoint::SSE,
        CompassPoint::S,
        CompassPoint::SSW,
        CompassPoint::SW,
        CompassPoint::WSW,
        CompassPoint::W,
        CompassPoint::WNW,
        CompassPoint::NW,
        CompassPoint::NNW,
    ];

    /// The label as written in observation files.
    pub fn label(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }

    /// Parses a compass label, ignoring surrounding whitespace and case.
    ///
    /// Returns `None` for anything that is not one of the sixteen labels,
    /// including the calm token.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|point| point.label().eq_ignore_ascii_case(label))
    }

    /// Angle in degrees, in steps of 22.5 from north (0) to north-north-west (337.5).
    pub fn degrees(&self) -> f64 {
        (*self as u8) as f64 * 22.5
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A parsed wind direction field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindDirection {
    /// No measurable wind.
    Calm,
    Point(CompassPoint),
}

impl WindDirection {
    /// Parses a direction field. Empty or unrecognised values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        if is_calm(value) {
            return Some(WindDirection::Calm);
        }
        CompassPoint::from_label(value).map(WindDirection::Point)
    }

    /// Angle in degrees. Calm is normalised to zero.
    pub fn degrees(&self) -> f64 {
        match self {
            WindDirection::Calm => 0.0,
            WindDirection::Point(point) => point.degrees(),
        }
    }
}

pub(crate) fn is_calm(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(CALM_TOKEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_points_map_to_increasing_angles() {
        let expected = [
            ("N", 0.0),
            ("NNE", 22.5),
            ("NE", 45.0),
            ("ENE", 67.5),
            ("E", 90.0),
            ("ESE", 112.5),
            ("SE", 135.0),
            ("SSE", 157.5),
            ("S", 180.0),
            ("SSW", 202.5),
            ("SW", 225.0),
            ("WSW", 247.5),
            ("W", 270.0),
            ("WNW", 292.5),
            ("NW", 315.0),
            ("NNW", 337.5),
        ];
        for (label, degrees) in expected {
            let point = CompassPoint::from_label(label).unwrap();
            assert_eq!(point.degrees(), degrees, "angle for {}", label);
            assert_eq!(point.to_string(), label);
        }
    }

    #[test]
    fn test_from_label_is_lenient_about_case_and_whitespace() {
        assert_eq!(CompassPoint::from_label(" wnw "), Some(CompassPoint::WNW));
        assert_eq!(CompassPoint::from_label("Ne"), Some(CompassPoint::NE));
    }

    #[test]
    fn test_unknown_labels_are_rejected() {
        assert_eq!(CompassPoint::from_label(""), None);
        assert_eq!(CompassPoint::from_label("NORTH"), None);
        assert_eq!(CompassPoint::from_label("Calm"), None);
    }

    #[test]
    fn test_wind_direction_handles_calm() {
        assert_eq!(WindDirection::parse("Calm"), Some(WindDirection::Calm));
        assert_eq!(WindDirection::parse(" calm"), Some(WindDirection::Calm));
        assert_eq!(WindDirection::Calm.degrees(), 0.0);
        assert_eq!(
            WindDirection::parse("SW"),
            Some(WindDirection::Point(CompassPoint::SW))
        );
        assert_eq!(WindDirection::parse("  "), None);
    }
}
