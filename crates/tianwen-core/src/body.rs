//! Celestial bodies shown on the dashboard.

use serde::{Deserialize, Serialize};

/// A body the ephemeris can locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

impl Body {
    /// The planets drawn on the ecliptic ring, in display order.
    pub const PLANETS: [Body; 5] = [
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
    ];

    /// English name.
    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
        }
    }

    /// Chinese name.
    pub fn chinese_name(self) -> &'static str {
        match self {
            Body::Sun => "太阳",
            Body::Moon => "月球",
            Body::Mercury => "水星",
            Body::Venus => "金星",
            Body::Mars => "火星",
            Body::Jupiter => "木星",
            Body::Saturn => "土星",
        }
    }

    /// Whether the body orbits the sun on a Keplerian ellipse.
    pub fn is_planet(self) -> bool {
        !matches!(self, Body::Sun | Body::Moon)
    }
}

/// The two bodies that carry an hour-angle dial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Luminary {
    Sun,
    Moon,
}

impl Luminary {
    /// Hour angle reported when the computation fails: the sun sits on the
    /// meridian, the moon opposite it.
    pub fn fallback_hour_angle(self) -> f64 {
        match self {
            Luminary::Sun => 0.0,
            Luminary::Moon => 180.0,
        }
    }
}

impl From<Luminary> for Body {
    fn from(luminary: Luminary) -> Self {
        match luminary {
            Luminary::Sun => Body::Sun,
            Luminary::Moon => Body::Moon,
        }
    }
}
