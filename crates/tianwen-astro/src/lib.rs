//! Sun, moon and planet positions turned into dial angles.
//!
//! The [`Ephemeris`] trait is the seam to the astronomy: [`AnalyticEphemeris`]
//! implements it with low-precision series, good enough for a dashboard.
//! On top of it sit the [`AngleModel`]s that place the sun and moon on the
//! dial, moon phase and white-path helpers, the ecliptic ring of planets and
//! the periodic trackers that keep those values fresh.

mod analytic;
mod angles;
mod coords;
mod ephemeris;
mod error;
mod moon;
mod phase;
mod planets;
mod riseset;
mod time;
mod tracker;

pub use analytic::{AnalyticEphemeris, MAX_YEAR, MIN_YEAR};
pub use angles::{AngleModel, AngleStrategy, LunarInfo, PreciseAngles, SimplifiedAngles, SolarInfo};
pub use coords::{
    Ecliptic, Equatorial, Horizontal, KM_PER_AU, ecliptic_to_equatorial, equatorial_to_horizontal,
    topocentric,
};
pub use ephemeris::{Ephemeris, LUNATION_EPOCH_JDE, SYNODIC_MONTH_DAYS};
pub use error::{AstroError, Result};
pub use moon::{
    LUNAR_INCLINATION, MEAN_DISTANCE_KM, MoonApparentPosition, MoonData, MoonPhase, SYNODIC_MONTH,
    WhitePath, WhitePathCoords, ecliptic_to_white_path, moon_apparent_position, moon_data,
    moon_ecliptic_position, moon_phase, moon_phase_chinese_name, white_path_parameters,
};
pub use phase::{MoonPhaseName, moon_phase_emoji, moon_phase_name};
pub use planets::{
    DEFAULT_PLANET_REFRESH, ECLIPTIC_BODIES, PlanetData, PlanetInfo, PlanetTracker,
    all_planet_positions, display_radius, ecliptic_to_display_angle, planet_ecliptic_position,
    planet_info,
};
pub use riseset::{Crossing, HORIZON_ALTITUDE_DEG, search_rise_set};
pub use time::{AstroTime, DAYS_PER_CENTURY, DELTA_T_SECONDS, J2000_JD, UNIX_EPOCH_JD};
pub use tracker::AngleTracker;
