//! Instants of new moon (Meeus, Astronomical Algorithms, ch. 49).

/// Mean new moon of 2000-01-06, lunation 0, as a Julian Ephemeris Date.
pub const LUNATION_EPOCH_JDE: f64 = 2_451_550.097_66;

/// Mean synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_861;

/// Planetary perturbation arguments (°, °/lunation) and amplitudes (days).
#[rustfmt::skip]
const PLANETARY_TERMS: [(f64, f64, f64); 13] = [
    (251.88, 0.016_321, 0.000_165),
    (251.83, 26.651_886, 0.000_164),
    (349.42, 36.412_478, 0.000_126),
    (84.66, 18.206_239, 0.000_110),
    (141.74, 53.303_771, 0.000_062),
    (207.14, 2.453_732, 0.000_060),
    (154.84, 7.306_860, 0.000_056),
    (34.52, 27.261_239, 0.000_047),
    (207.19, 0.121_824, 0.000_042),
    (291.34, 1.844_379, 0.000_040),
    (161.72, 24.198_154, 0.000_037),
    (239.56, 25.513_099, 0.000_035),
    (331.55, 3.592_518, 0.000_023),
];

/// Julian Ephemeris Date of the true new moon of lunation `k`.
///
/// Lunation 0 is the new moon of 2000-01-06; negative values go back in time.
pub(crate) fn new_moon_jde(k: i64) -> f64 {
    let k = k as f64;
    let t = k / 1236.85;
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let mean = LUNATION_EPOCH_JDE + SYNODIC_MONTH_DAYS * k + 0.000_154_37 * t2
        - 0.000_000_150 * t3
        + 0.000_000_000_73 * t4;

    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let m = (2.5534 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3).to_radians();
    let mp = (201.5643 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4)
        .to_radians();
    let f = (160.7108 + 390.670_502_84 * k - 0.001_611_8 * t2 - 0.000_002_27 * t3
        + 0.000_000_011 * t4)
        .to_radians();
    let node = (124.7746 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3).to_radians();

    let correction = -0.407_20 * mp.sin()
        + 0.172_41 * e * m.sin()
        + 0.016_08 * (2.0 * mp).sin()
        + 0.010_39 * (2.0 * f).sin()
        + 0.007_39 * e * (mp - m).sin()
        - 0.005_14 * e * (mp + m).sin()
        + 0.002_08 * e * e * (2.0 * m).sin()
        - 0.001_11 * (mp - 2.0 * f).sin()
        - 0.000_57 * (mp + 2.0 * f).sin()
        + 0.000_56 * e * (2.0 * mp + m).sin()
        - 0.000_42 * (3.0 * mp).sin()
        + 0.000_42 * e * (m + 2.0 * f).sin()
        + 0.000_38 * e * (m - 2.0 * f).sin()
        - 0.000_24 * e * (2.0 * mp - m).sin()
        - 0.000_17 * node.sin()
        - 0.000_07 * (mp + 2.0 * m).sin()
        + 0.000_04 * (2.0 * mp - 2.0 * f).sin()
        + 0.000_04 * (3.0 * m).sin()
        + 0.000_03 * (mp + m - 2.0 * f).sin()
        + 0.000_03 * (2.0 * mp + 2.0 * f).sin()
        - 0.000_03 * (mp + m + 2.0 * f).sin()
        + 0.000_03 * (mp - m + 2.0 * f).sin()
        - 0.000_02 * (mp - m - 2.0 * f).sin()
        - 0.000_02 * (3.0 * mp + m).sin()
        + 0.000_02 * (4.0 * mp).sin();

    let a1 = (299.77 + 0.107_408 * k - 0.009_173 * t2).to_radians();
    let planetary = 0.000_325 * a1.sin()
        + PLANETARY_TERMS
            .iter()
            .map(|&(base, rate, amplitude)| amplitude * (base + rate * k).to_radians().sin())
            .sum::<f64>();

    mean + correction + planetary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meeus_example() {
        // new moon of 1977-02-18 03:37:42 TD
        let jde = new_moon_jde(-283);
        assert!((jde - 2_443_192.651_18).abs() < 1e-3, "{jde}");
    }

    #[test]
    fn test_lunation_zero() {
        // 2000-01-06 18:14 UT
        let jde = new_moon_jde(0);
        assert!((jde - 2_451_550.26).abs() < 0.01, "{jde}");
    }

    #[test]
    fn test_spacing_is_near_mean_month() {
        for k in 280..300 {
            let gap = new_moon_jde(k + 1) - new_moon_jde(k);
            assert!((29.2..29.9).contains(&gap), "{gap}");
        }
    }
}
