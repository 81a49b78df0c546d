//! Geographic observer locations.

use serde::{Deserialize, Serialize};

/// A point on the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Geodetic latitude in degrees, north positive.
    pub latitude: f64,
    /// Longitude in degrees, east positive.
    pub longitude: f64,
    /// Height above sea level in metres.
    #[serde(default)]
    pub elevation: f64,
}

impl Observer {
    /// Reference location used when a query omits the observer (Beijing).
    pub const DEFAULT: Observer = Observer::new(39.9042, 116.4074, 0.0);

    /// Create an observer.
    pub const fn new(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
        }
    }

    /// Whether all coordinates are finite and the latitude is on the globe.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.elevation.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Named observer locations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObserverPreset {
    #[default]
    Beijing,
    Shanghai,
    Guangzhou,
    Shenzhen,
    Hangzhou,
    Nanjing,
    Chengdu,
    Xian,
    Wuhan,
    Chongqing,
}

impl ObserverPreset {
    /// Every preset, in menu order.
    pub const ALL: [ObserverPreset; 10] = [
        ObserverPreset::Beijing,
        ObserverPreset::Shanghai,
        ObserverPreset::Guangzhou,
        ObserverPreset::Shenzhen,
        ObserverPreset::Hangzhou,
        ObserverPreset::Nanjing,
        ObserverPreset::Chengdu,
        ObserverPreset::Xian,
        ObserverPreset::Wuhan,
        ObserverPreset::Chongqing,
    ];

    /// The location of this preset.
    pub fn observer(self) -> Observer {
        match self {
            ObserverPreset::Beijing => Observer::new(39.9042, 116.4074, 0.0),
            ObserverPreset::Shanghai => Observer::new(31.2304, 121.4737, 0.0),
            ObserverPreset::Guangzhou => Observer::new(23.1291, 113.2644, 0.0),
            ObserverPreset::Shenzhen => Observer::new(22.5431, 114.0579, 0.0),
            ObserverPreset::Hangzhou => Observer::new(30.2741, 120.1551, 0.0),
            ObserverPreset::Nanjing => Observer::new(32.0603, 118.7969, 0.0),
            ObserverPreset::Chengdu => Observer::new(30.5728, 104.0668, 0.0),
            ObserverPreset::Xian => Observer::new(34.3416, 108.9398, 0.0),
            ObserverPreset::Wuhan => Observer::new(30.5928, 114.3055, 0.0),
            ObserverPreset::Chongqing => Observer::new(29.5630, 106.5516, 0.0),
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ObserverPreset::Beijing => "北京",
            ObserverPreset::Shanghai => "上海",
            ObserverPreset::Guangzhou => "广州",
            ObserverPreset::Shenzhen => "深圳",
            ObserverPreset::Hangzhou => "杭州",
            ObserverPreset::Nanjing => "南京",
            ObserverPreset::Chengdu => "成都",
            ObserverPreset::Xian => "西安",
            ObserverPreset::Wuhan => "武汉",
            ObserverPreset::Chongqing => "重庆",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_beijing() {
        assert_eq!(Observer::default(), ObserverPreset::Beijing.observer());
    }

    #[test]
    fn test_validity() {
        assert!(Observer::DEFAULT.is_valid());
        assert!(!Observer::new(f64::NAN, 0.0, 0.0).is_valid());
        assert!(!Observer::new(91.0, 0.0, 0.0).is_valid());
        assert!(!Observer::new(0.0, f64::INFINITY, 0.0).is_valid());
    }

    #[test]
    fn test_presets_are_valid() {
        assert!(ObserverPreset::ALL.iter().all(|p| p.observer().is_valid()));
    }
}
