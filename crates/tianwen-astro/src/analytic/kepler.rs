//! Planet positions from mean Keplerian elements.
//!
//! Elements and rates are the JPL "Approximate Positions of the Planets"
//! table for 1800-2050 (Standish), referred to the J2000 ecliptic and
//! equinox. Positions are good to a few arcminutes over that span.

use std::f64::consts::{PI, TAU};

use tianwen_core::{Body, normalize_degrees};

use crate::coords::Ecliptic;

/// `a` (AU), `e`, `I`, `L`, long. perihelion, long. node (°), then their
/// rates per Julian century.
type Elements = [[f64; 6]; 2];

#[rustfmt::skip]
const MERCURY: Elements = [
    [0.387_099_27, 0.205_635_93, 7.004_979_02, 252.250_323_50, 77.457_796_28, 48.330_765_93],
    [0.000_000_37, 0.000_019_06, -0.005_947_49, 149_472.674_111_75, 0.160_476_89, -0.125_340_81],
];
#[rustfmt::skip]
const VENUS: Elements = [
    [0.723_335_66, 0.006_776_72, 3.394_676_05, 181.979_099_50, 131.602_467_18, 76.679_842_55],
    [0.000_003_90, -0.000_041_07, -0.000_788_90, 58_517.815_387_29, 0.002_683_29, -0.277_694_18],
];
#[rustfmt::skip]
const EARTH_MOON_BARYCENTER: Elements = [
    [1.000_002_61, 0.016_711_23, -0.000_015_31, 100.464_571_66, 102.937_681_93, 0.0],
    [0.000_005_62, -0.000_043_92, -0.012_946_68, 35_999.372_449_81, 0.323_273_64, 0.0],
];
#[rustfmt::skip]
const MARS: Elements = [
    [1.523_710_34, 0.093_394_10, 1.849_691_42, -4.553_432_05, -23.943_629_59, 49.559_538_91],
    [0.000_018_47, 0.000_078_82, -0.008_131_31, 19_140.302_684_99, 0.444_410_88, -0.292_573_43],
];
#[rustfmt::skip]
const JUPITER: Elements = [
    [5.202_887_00, 0.048_386_24, 1.304_396_95, 34.396_440_51, 14.728_479_83, 100.473_909_09],
    [-0.000_116_07, -0.000_132_53, -0.001_837_14, 3_034.746_127_75, 0.212_526_68, 0.204_691_06],
];
#[rustfmt::skip]
const SATURN: Elements = [
    [9.536_675_94, 0.053_861_79, 2.485_991_87, 49.954_244_23, 92.598_878_31, 113.662_424_48],
    [-0.001_250_60, -0.000_509_91, 0.001_936_09, 1_222.493_622_01, -0.418_972_16, -0.288_677_94],
];

/// General precession in longitude, degrees per century.
const PRECESSION_DEG_PER_CENTURY: f64 = 1.396_971;

/// Light travel time per AU, in days.
const LIGHT_DAYS_PER_AU: f64 = 0.005_775_518_3;

fn elements(body: Body) -> Option<&'static Elements> {
    match body {
        Body::Mercury => Some(&MERCURY),
        Body::Venus => Some(&VENUS),
        Body::Mars => Some(&MARS),
        Body::Jupiter => Some(&JUPITER),
        Body::Saturn => Some(&SATURN),
        Body::Sun | Body::Moon => None,
    }
}

/// Eccentric anomaly for mean anomaly `m` (radians) by Newton iteration.
fn solve_kepler(m: f64, e: f64) -> f64 {
    let mut ea = if e > 0.8 { PI } else { m };
    for _ in 0..30 {
        let step = (ea - e * ea.sin() - m) / (1.0 - e * ea.cos());
        ea -= step;
        if step.abs() < 1e-12 {
            break;
        }
    }
    ea
}

/// Heliocentric rectangular position, J2000 ecliptic, in AU.
fn heliocentric_j2000(elements: &Elements, t: f64) -> [f64; 3] {
    let [base, rate] = elements;
    let at = |i: usize| base[i] + rate[i] * t;
    let (a, e, incl, mean_lon, peri, node) = (at(0), at(1), at(2), at(3), at(4), at(5));

    let arg_peri = (peri - node).to_radians();
    let mut m = (mean_lon - peri).to_radians() % TAU;
    if m > PI {
        m -= TAU;
    } else if m < -PI {
        m += TAU;
    }
    let ea = solve_kepler(m, e);

    let x_orb = a * (ea.cos() - e);
    let y_orb = a * (1.0 - e * e).sqrt() * ea.sin();

    let (cos_w, sin_w) = (arg_peri.cos(), arg_peri.sin());
    let (cos_om, sin_om) = (node.to_radians().cos(), node.to_radians().sin());
    let (cos_i, sin_i) = (incl.to_radians().cos(), incl.to_radians().sin());

    [
        (cos_w * cos_om - sin_w * sin_om * cos_i) * x_orb
            + (-sin_w * cos_om - cos_w * sin_om * cos_i) * y_orb,
        (cos_w * sin_om + sin_w * cos_om * cos_i) * x_orb
            + (-sin_w * sin_om + cos_w * cos_om * cos_i) * y_orb,
        sin_w * sin_i * x_orb + cos_w * sin_i * y_orb,
    ]
}

/// Move a J2000 ecliptic vector to the mean equinox of date.
fn precess(xyz: [f64; 3], t: f64) -> Ecliptic {
    let mut ecliptic = Ecliptic::from_rectangular(xyz);
    ecliptic.longitude =
        normalize_degrees(ecliptic.longitude + PRECESSION_DEG_PER_CENTURY * t + 0.000_308_6 * t * t);
    ecliptic
}

/// The Earth's heliocentric position, mean equinox of date.
pub(crate) fn earth_heliocentric(t: f64) -> Ecliptic {
    precess(heliocentric_j2000(&EARTH_MOON_BARYCENTER, t), t)
}

/// Heliocentric position of a planet, mean equinox of date.
pub(crate) fn heliocentric(body: Body, t: f64) -> Option<Ecliptic> {
    let elements = elements(body)?;
    Some(precess(heliocentric_j2000(elements, t), t))
}

/// Geocentric position of a planet corrected for light time, mean equinox of date.
pub(crate) fn geocentric(body: Body, t: f64) -> Option<Ecliptic> {
    let elements = elements(body)?;
    let earth = heliocentric_j2000(&EARTH_MOON_BARYCENTER, t);

    let relative = |planet: [f64; 3]| {
        [
            planet[0] - earth[0],
            planet[1] - earth[1],
            planet[2] - earth[2],
        ]
    };

    let first = relative(heliocentric_j2000(elements, t));
    let distance = first.iter().map(|c| c * c).sum::<f64>().sqrt();
    let light_time = distance * LIGHT_DAYS_PER_AU / 36_525.0;
    let retarded = relative(heliocentric_j2000(elements, t - light_time));

    Some(precess(retarded, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytic::sun::sun;

    fn angular_separation(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(360.0);
        d.min(360.0 - d)
    }

    #[test]
    fn test_kepler_solver_satisfies_equation() {
        for &(m, e) in &[(0.5, 0.1), (3.0, 0.2), (-2.0, 0.05), (1.0, 0.9)] {
            let ea = solve_kepler(m, e);
            assert!((ea - e * ea.sin() - m).abs() < 1e-10);
        }
    }

    #[test]
    fn test_earth_opposes_the_sun() {
        for year in [-0.2, 0.0, 0.24, 0.5] {
            let earth = earth_heliocentric(year);
            let sun = sun(year);
            let sep = angular_separation(earth.longitude, sun.longitude + 180.0);
            assert!(sep < 0.05, "{sep}");
            assert!((earth.distance - sun.distance).abs() < 1e-3);
        }
    }

    #[test]
    fn test_inner_planets_stay_near_the_sun() {
        for step in 0..40 {
            let t = f64::from(step) * 0.01;
            let sun = sun(t).longitude;
            let mercury = geocentric(Body::Mercury, t).unwrap().longitude;
            let venus = geocentric(Body::Venus, t).unwrap().longitude;
            assert!(angular_separation(mercury, sun) < 28.5);
            assert!(angular_separation(venus, sun) < 48.5);
        }
    }

    #[test]
    fn test_heliocentric_distances_within_orbit() {
        let cases = [
            (Body::Mercury, 0.30, 0.47),
            (Body::Venus, 0.71, 0.73),
            (Body::Mars, 1.38, 1.67),
            (Body::Jupiter, 4.95, 5.46),
            (Body::Saturn, 9.0, 10.1),
        ];
        for (body, lo, hi) in cases {
            let r = heliocentric(body, 0.25).unwrap().distance;
            assert!((lo..=hi).contains(&r), "{body:?} {r}");
        }
    }

    #[test]
    fn test_luminaries_have_no_elements() {
        assert!(heliocentric(Body::Sun, 0.0).is_none());
        assert!(geocentric(Body::Moon, 0.0).is_none());
    }
}
