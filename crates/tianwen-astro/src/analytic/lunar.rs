//! Geocentric lunar coordinates from the principal ELP-2000/82 terms
//! (Meeus, Astronomical Algorithms, ch. 47).
//!
//! Only terms with amplitude above ~0.002° are kept, which leaves the
//! longitude good to roughly 0.02° and the distance to about 50 km.

use tianwen_core::normalize_degrees;

use crate::coords::{Ecliptic, KM_PER_AU};

/// Multiples of D, M, M', F with longitude (1e-6 °) and distance (1e-3 km)
/// amplitudes.
#[rustfmt::skip]
const LONGITUDE_DISTANCE_TERMS: [(i8, i8, i8, i8, f64, f64); 32] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
    (4, 0, 0, 0, 3_861.0, -11_650.0),
    (2, 0, -3, 0, 3_665.0, 14_403.0),
    (0, 1, -2, 0, -2_689.0, -7_003.0),
    (2, 0, -1, 2, -2_602.0, 0.0),
    (2, -1, -2, 0, 2_390.0, 10_056.0),
    (1, 0, 1, 0, -2_348.0, 6_322.0),
    (2, -2, 0, 0, 2_236.0, -9_884.0),
];

/// Multiples of D, M, M', F with latitude amplitude (1e-6 °).
#[rustfmt::skip]
const LATITUDE_TERMS: [(i8, i8, i8, i8, f64); 20] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
    (2, -1, -1, 1, 2_463.0),
    (2, -1, 0, 1, 2_211.0),
    (2, -1, -1, -1, 2_065.0),
    (0, 1, -1, -1, -1_870.0),
    (4, 0, -1, -1, 1_828.0),
    (0, 1, 0, 1, -1_794.0),
];

/// Mean distance of the moon in km.
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Geometric lunar position, mean equinox of date, at `t` Julian centuries of TT.
pub(crate) fn moon(t: f64) -> Ecliptic {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let lp = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let mp = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let f = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;

    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479_264.290 * t).to_radians();
    let a3 = (313.45 + 481_266.484 * t).to_radians();
    // eccentricity of the Earth's orbit scales every term involving M
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let (lp_r, d_r, m_r, mp_r, f_r) = (
        lp.to_radians(),
        d.to_radians(),
        m.to_radians(),
        mp.to_radians(),
        f.to_radians(),
    );
    let argument = |cd: i8, cm: i8, cmp: i8, cf: i8| {
        f64::from(cd) * d_r + f64::from(cm) * m_r + f64::from(cmp) * mp_r + f64::from(cf) * f_r
    };
    let eccentricity = |cm: i8| match cm.abs() {
        1 => e,
        2 => e * e,
        _ => 1.0,
    };

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &(cd, cm, cmp, cf, l, r) in &LONGITUDE_DISTANCE_TERMS {
        let arg = argument(cd, cm, cmp, cf);
        let scale = eccentricity(cm);
        sum_l += l * scale * arg.sin();
        sum_r += r * scale * arg.cos();
    }

    let mut sum_b = 0.0;
    for &(cd, cm, cmp, cf, b) in &LATITUDE_TERMS {
        sum_b += b * eccentricity(cm) * argument(cd, cm, cmp, cf).sin();
    }

    sum_l += 3958.0 * a1.sin() + 1962.0 * (lp_r - f_r).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * lp_r.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f_r).sin()
        + 175.0 * (a1 + f_r).sin()
        + 127.0 * (lp_r - mp_r).sin()
        - 115.0 * (lp_r + mp_r).sin();

    Ecliptic {
        longitude: normalize_degrees(lp + sum_l / 1e6),
        latitude: sum_b / 1e6,
        distance: (MEAN_DISTANCE_KM + sum_r / 1000.0) / KM_PER_AU,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeus_example() {
        // 1992-04-12 00:00 TD
        let t = (2_448_724.5 - 2_451_545.0) / 36_525.0;
        let m = moon(t);
        assert!((m.longitude - 133.162_655).abs() < 0.05, "{}", m.longitude);
        assert!((m.latitude + 3.229_126).abs() < 0.05, "{}", m.latitude);
        let km = m.distance * KM_PER_AU;
        assert!((km - 368_409.7).abs() < 150.0, "{km}");
    }

    #[test]
    fn test_distance_stays_in_orbit_bounds() {
        for day in 0..60 {
            let t = f64::from(day) / 36_525.0;
            let km = moon(t).distance * KM_PER_AU;
            assert!((350_000.0..=410_000.0).contains(&km), "{km}");
        }
    }
}
