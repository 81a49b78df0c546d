//! The sun and naked-eye planets on the ecliptic ring.

use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tianwen_core::{Body, Clock, Derived, IntervalTimer, Observer, SystemClock, normalize_degrees};

use crate::analytic::AnalyticEphemeris;
use crate::coords::Ecliptic;
use crate::ephemeris::Ephemeris;
use crate::error::{AstroError, Result};
use crate::time::AstroTime;

/// Default refresh interval of a [`PlanetTracker`].
pub const DEFAULT_PLANET_REFRESH: Duration = Duration::from_secs(60);

const FALLBACK_POSITION: Ecliptic = Ecliptic {
    longitude: 0.0,
    latitude: 0.0,
    distance: 1.0,
};

/// Bodies drawn on the ecliptic ring, in display order.
pub const ECLIPTIC_BODIES: [Body; 6] = [
    Body::Sun,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
];

/// Display colour and brightness of a body.
fn appearance(body: Body) -> (&'static str, f64) {
    match body {
        Body::Sun => ("#ffcc00", -26.7),
        Body::Moon => ("#F0F0F0", -12.6),
        Body::Mercury => ("#8C7853", -0.5),
        Body::Venus => ("#FFC649", -4.4),
        Body::Mars => ("#CD5C5C", -0.8),
        Body::Jupiter => ("#d4a373", -2.5),
        Body::Saturn => ("#FAD5A5", -0.3),
    }
}

/// A body's place on the ecliptic ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetData {
    pub body: Body,
    pub name: &'static str,
    pub chinese_name: &'static str,
    pub color: &'static str,
    pub magnitude: f64,
    pub ecliptic_longitude: f64,
    pub ecliptic_latitude: f64,
    /// Geocentric distance in AU; 0 for the sun, which sits at the ring centre.
    pub distance: f64,
}

/// Geocentric and heliocentric details of one body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetInfo {
    /// Geocentric distance, AU.
    pub distance: f64,
    pub right_ascension: f64,
    pub declination: f64,
    pub altitude: f64,
    pub azimuth: f64,
    /// Distance from the sun, AU.
    pub heliocentric_distance: f64,
    /// Heliocentric ecliptic longitude.
    pub ecliptic_longitude: f64,
    /// Heliocentric ecliptic latitude.
    pub ecliptic_latitude: f64,
}

/// Geocentric ecliptic position; falls back to `{0, 0, 1 AU}`.
pub fn planet_ecliptic_position<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    body: Body,
    time: DateTime<FixedOffset>,
) -> Derived<Ecliptic, AstroError> {
    Derived::or_fallback(
        ephemeris.geocentric_ecliptic(body, AstroTime::from_datetime(&time)),
        FALLBACK_POSITION,
        "planet ecliptic position",
    )
}

/// The sun and the five planets with their display metadata.
pub fn all_planet_positions<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    time: DateTime<FixedOffset>,
) -> Vec<PlanetData> {
    ECLIPTIC_BODIES
        .iter()
        .map(|&body| {
            let position = planet_ecliptic_position(ephemeris, body, time).into_value();
            let (color, magnitude) = appearance(body);
            PlanetData {
                body,
                name: body.name(),
                chinese_name: body.chinese_name(),
                color,
                magnitude,
                ecliptic_longitude: position.longitude,
                ecliptic_latitude: position.latitude,
                distance: if body == Body::Sun { 0.0 } else { position.distance },
            }
        })
        .collect()
}

/// Ring angle for an ecliptic longitude, in `[0, 360)`.
pub fn ecliptic_to_display_angle(ecliptic_longitude: f64, base_angle: f64) -> f64 {
    normalize_degrees(ecliptic_longitude + base_angle)
}

/// Radius on the ring for a distance in AU, log-scaled between `min_radius`
/// (0.1 AU and closer) and `max_radius` (10 AU).
pub fn display_radius(distance: f64, min_radius: f64, max_radius: f64) -> f64 {
    if distance == 0.0 {
        return min_radius;
    }
    let min_log = 0.1_f64.log10();
    let max_log = 10.0_f64.log10();
    let normalized = ((distance + 0.1).log10() - min_log) / (max_log - min_log);
    min_radius + normalized * (max_radius - min_radius)
}

/// Position details of one body for an observer (default Beijing).
pub fn planet_info<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    body: Body,
    time: DateTime<FixedOffset>,
    observer: Option<&Observer>,
) -> Result<PlanetInfo> {
    let observer = observer.unwrap_or(&Observer::DEFAULT);
    let t = AstroTime::from_datetime(&time);

    let geocentric = ephemeris.geocentric_ecliptic(body, t)?;
    let equatorial = ephemeris.equatorial(body, t, observer)?;
    let horizontal = ephemeris.horizontal(t, observer, &equatorial)?;
    let heliocentric = ephemeris.heliocentric_ecliptic(body, t)?;

    Ok(PlanetInfo {
        distance: geocentric.distance,
        right_ascension: equatorial.right_ascension,
        declination: equatorial.declination,
        altitude: horizontal.altitude,
        azimuth: horizontal.azimuth,
        heliocentric_distance: heliocentric.distance,
        ecliptic_longitude: heliocentric.longitude,
        ecliptic_latitude: heliocentric.latitude,
    })
}

/// Keeps the ecliptic ring positions up to date.
///
/// Positions are computed on construction and then every interval while
/// started, when the owner calls [`poll`](PlanetTracker::poll).
#[derive(Debug)]
pub struct PlanetTracker<E = AnalyticEphemeris, C = SystemClock> {
    ephemeris: E,
    clock: C,
    timer: IntervalTimer,
    planets: Vec<PlanetData>,
}

impl<E: Ephemeris, C: Clock> PlanetTracker<E, C> {
    pub fn new(ephemeris: E, clock: C, interval: Duration) -> Self {
        let planets = all_planet_positions(&ephemeris, clock.wall());
        Self {
            ephemeris,
            clock,
            timer: IntervalTimer::new(interval),
            planets,
        }
    }

    pub fn planets(&self) -> &[PlanetData] {
        &self.planets
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    /// Begin periodic updates; idempotent.
    pub fn start(&mut self) {
        if self.timer.start(self.clock.now()) {
            tracing::debug!(interval = ?self.timer.interval(), "planet tracker started");
        }
    }

    /// Stop periodic updates; idempotent.
    pub fn stop(&mut self) {
        if self.timer.stop() {
            tracing::debug!("planet tracker stopped");
        }
    }

    /// Recompute if the interval has elapsed. Returns whether it did.
    pub fn poll(&mut self) -> bool {
        if self.timer.poll(self.clock.now()) {
            self.update(self.clock.wall());
            true
        } else {
            false
        }
    }

    /// Recompute for an explicit time.
    pub fn update(&mut self, time: DateTime<FixedOffset>) {
        self.planets = all_planet_positions(&self.ephemeris, time);
    }
}

#[cfg(test)]
mod tests {
    use tianwen_core::ManualClock;

    use super::*;

    fn t(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_display_radius() {
        assert_eq!(display_radius(0.0, 30.0, 85.0), 30.0);
        assert!((display_radius(9.9, 30.0, 85.0) - 85.0).abs() < 1e-9);
        let mars = display_radius(1.52, 30.0, 85.0);
        let jupiter = display_radius(5.2, 30.0, 85.0);
        assert!(30.0 < mars && mars < jupiter && jupiter < 85.0);
    }

    #[test]
    fn test_display_angle_wraps() {
        assert_eq!(ecliptic_to_display_angle(350.0, 20.0), 10.0);
        assert_eq!(ecliptic_to_display_angle(10.0, 0.0), 10.0);
        assert_eq!(ecliptic_to_display_angle(10.0, 720.0), 10.0);
    }

    #[test]
    fn test_all_positions() {
        let planets = all_planet_positions(&AnalyticEphemeris, t("2024-01-01T00:00:00+08:00"));
        let bodies: Vec<Body> = planets.iter().map(|p| p.body).collect();
        assert_eq!(bodies, ECLIPTIC_BODIES);

        let sun = &planets[0];
        assert_eq!(sun.distance, 0.0);
        assert_eq!(sun.chinese_name, "太阳");
        // the sun is near the December solstice point
        assert!((sun.ecliptic_longitude - 280.0).abs() < 2.0);

        for p in &planets[1..] {
            assert!((0.0..360.0).contains(&p.ecliptic_longitude));
            assert!(p.distance > 0.2 && p.distance < 11.0, "{}", p.name);
        }
    }

    #[test]
    fn test_planet_info() {
        let info = planet_info(&AnalyticEphemeris, Body::Jupiter, t("2024-01-01T00:00:00+08:00"), None)
            .unwrap();
        assert!((4.9..5.5).contains(&info.heliocentric_distance));
        assert!((3.9..6.5).contains(&info.distance));
    }

    #[test]
    fn test_tracker_schedule() {
        let clock = ManualClock::new(t("2024-01-01T00:00:00+08:00"));
        let mut tracker = PlanetTracker::new(AnalyticEphemeris, clock.clone(), DEFAULT_PLANET_REFRESH);
        let first = tracker.planets()[1].ecliptic_longitude;

        tracker.start();
        tracker.start();
        clock.set_wall(t("2024-03-01T00:00:00+08:00"));
        clock.advance(Duration::from_secs(30));
        assert!(!tracker.poll());
        assert_eq!(tracker.planets()[1].ecliptic_longitude, first);

        clock.advance(Duration::from_secs(30));
        assert!(tracker.poll());
        assert_ne!(tracker.planets()[1].ecliptic_longitude, first);

        tracker.stop();
        assert!(!tracker.is_running());
    }

    #[test]
    fn test_planets_serialize_with_body_ids() {
        let planets = all_planet_positions(&AnalyticEphemeris, t("2024-02-10T12:00:00+08:00"));
        let json = serde_json::to_value(&planets).unwrap();
        let ids: Vec<_> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["body"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, ["sun", "mercury", "venus", "mars", "jupiter", "saturn"]);
        assert_eq!(json[0]["chinese_name"], "太阳");
        assert_eq!(json[0]["distance"], 0.0);
    }
}
