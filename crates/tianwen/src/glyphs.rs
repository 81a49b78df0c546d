//! Characters drawn on the sky.

use tianwen_astro::MoonPhaseName;
use tianwen_core::Body;

/// Characters used for the starfield.
pub const STAR_CHARS: &[char] = &['.', '*', '+', '·', '✦', '✧'];

/// Sun frames, cycled by the sun's rotation animation.
pub const SUN_FRAMES: &[char] = &['✶', '✷', '✸', '✹'];

/// Dots tracing the dial.
pub const ORBIT_CHAR: char = '·';

/// Sun frame for a rotation in degrees.
pub fn sun_glyph(rotation: f64) -> char {
    let step = 360.0 / SUN_FRAMES.len() as f64;
    let index = (rotation.rem_euclid(360.0) / step) as usize;
    SUN_FRAMES[index.min(SUN_FRAMES.len() - 1)]
}

/// Single-width moon for a phase fraction.
pub fn moon_glyph(phase: f64) -> char {
    match MoonPhaseName::from_phase(phase) {
        MoonPhaseName::New => '○',
        MoonPhaseName::WaxingCrescent => '☽',
        MoonPhaseName::FirstQuarter | MoonPhaseName::WaxingGibbous => '◑',
        MoonPhaseName::Full => '●',
        MoonPhaseName::WaningGibbous | MoonPhaseName::LastQuarter => '◐',
        MoonPhaseName::WaningCrescent => '☾',
    }
}

/// Astronomical symbol of a body.
pub fn body_glyph(body: Body) -> char {
    match body {
        Body::Sun => '☉',
        Body::Moon => '☽',
        Body::Mercury => '☿',
        Body::Venus => '♀',
        Body::Mars => '♂',
        Body::Jupiter => '♃',
        Body::Saturn => '♄',
    }
}
