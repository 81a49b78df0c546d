//! The sky panel: a starfield behind the hour-angle dial.
//!
//! Everything is drawn into a [`SkyGrid`] of terminal cells first and turned
//! into one [`Line`] per row at the end, so the layout can be tested without
//! a terminal.
//!
//! On the dial, angle 0 is the bottom (local midnight for the sun), 90° the
//! left (east), 180° the top and 270° the right (west).

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tianwen_astro::{PlanetData, display_radius, ecliptic_to_display_angle};
use tianwen_core::Body;

use crate::glyphs::{ORBIT_CHAR, STAR_CHARS, body_glyph, moon_glyph, sun_glyph};
use crate::palette::{body_color, dim, star_color};

/// Seconds of star clock per starfield frame.
const STAR_FRAME_SECONDS: f64 = 0.5;

/// Percent of the dial radius used by the innermost and outermost planet.
const PLANET_RING_MIN: f64 = 30.0;
const PLANET_RING_MAX: f64 = 85.0;

const SUN_COLOR: &str = "#ffcc00";
const MOON_COLOR: &str = "#F0F0F0";

/// Everything the sky panel needs for one frame.
#[derive(Debug, Clone)]
pub struct SkyScene<'a> {
    /// Sun position on the dial, degrees.
    pub sun_angle: f64,
    /// Moon position on the dial, degrees.
    pub moon_angle: f64,
    pub moon_phase: f64,
    pub planets: &'a [PlanetData],
    /// Rotation animation value driving the sun frames.
    pub sun_rotation: f64,
    /// Twinkle animation value, `[0, 1]`.
    pub twinkle: f64,
    /// Orbital animation value that advances the starfield.
    pub star_clock: f64,
    /// Pulse animation value, `[0, 1]`, dimming the moon.
    pub moon_glow: f64,
    pub accent: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

/// A width by height grid of optional characters.
#[derive(Debug, Clone)]
pub struct SkyGrid {
    width: u16,
    height: u16,
    cells: Vec<Option<Cell>>,
}

impl SkyGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; usize::from(width) * usize::from(height)],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u16::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = u16::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Draw a character, silently clipping outside the grid.
    pub fn plot(&mut self, x: i32, y: i32, ch: char, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Some(Cell { ch, color });
        }
    }

    #[cfg(test)]
    pub fn char_at(&self, x: i32, y: i32) -> Option<char> {
        self.index(x, y).and_then(|i| self.cells[i]).map(|cell| cell.ch)
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        let width = usize::from(self.width).max(1);
        self.cells
            .chunks(width)
            .map(|row| {
                let spans: Vec<Span<'static>> = row
                    .iter()
                    .map(|cell| match cell {
                        Some(cell) => {
                            Span::styled(cell.ch.to_string(), Style::new().fg(cell.color))
                        }
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

/// Ellipse that looks round in terminal cells, which are about twice as
/// tall as they are wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dial {
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
}

impl Dial {
    /// The largest dial fitting a `width` by `height` area with a one-cell margin.
    pub fn fit(width: u16, height: u16) -> Self {
        let cx = f64::from(width.saturating_sub(1)) / 2.0;
        let cy = f64::from(height.saturating_sub(1)) / 2.0;
        let ry = (cy - 1.0).max(0.0).min((cx - 2.0).max(0.0) / 2.0);
        Self {
            cx,
            cy,
            rx: ry * 2.0,
            ry,
        }
    }

    /// Cell at `angle` degrees, `scale` times the radius out from the centre.
    pub fn point(&self, angle: f64, scale: f64) -> (i32, i32) {
        let (sin, cos) = angle.to_radians().sin_cos();
        let x = self.cx - self.rx * scale * sin;
        let y = self.cy + self.ry * scale * cos;
        (x.round() as i32, y.round() as i32)
    }

    /// Dots needed to trace the ring without gaps.
    fn ring_steps(&self) -> usize {
        ((self.rx + self.ry) * 4.0).ceil().max(8.0) as usize
    }
}

/// Compose the whole sky for a `width` by `height` area.
pub fn draw_sky(scene: &SkyScene<'_>, width: u16, height: u16) -> SkyGrid {
    let mut grid = SkyGrid::new(width, height);
    draw_starfield(&mut grid, scene);

    let dial = Dial::fit(width, height);
    let steps = dial.ring_steps();
    for i in 0..steps {
        let (x, y) = dial.point(360.0 * i as f64 / steps as f64, 1.0);
        grid.plot(x, y, ORBIT_CHAR, scene.accent);
    }

    for planet in scene.planets.iter().filter(|p| p.body != Body::Sun) {
        let angle = ecliptic_to_display_angle(planet.ecliptic_longitude, 0.0);
        let radius = display_radius(planet.distance, PLANET_RING_MIN, PLANET_RING_MAX) / 100.0;
        let (x, y) = dial.point(angle, radius);
        grid.plot(x, y, body_glyph(planet.body), body_color(planet.color));
    }

    let (x, y) = dial.point(scene.moon_angle, 1.0);
    let moon_color = dim(body_color(MOON_COLOR), 0.6 + 0.4 * scene.moon_glow);
    grid.plot(x, y, moon_glyph(scene.moon_phase), moon_color);

    let (x, y) = dial.point(scene.sun_angle, 1.0);
    grid.plot(x, y, sun_glyph(scene.sun_rotation), body_color(SUN_COLOR));

    grid
}

/// Sparse pseudo-random stars whose pattern steps with the star clock and
/// whose brightness follows the twinkle value.
fn draw_starfield(grid: &mut SkyGrid, scene: &SkyScene<'_>) {
    let frame_num = (scene.star_clock.max(0.0) / STAR_FRAME_SECONDS) as usize;
    for y in 0..grid.height {
        for x in 0..grid.width {
            let seed = (usize::from(x).wrapping_mul(31))
                .wrapping_add(usize::from(y).wrapping_mul(17))
                .wrapping_add(frame_num);

            // about 3% of cells hold a star
            if seed % 100 < 3 {
                let ch = STAR_CHARS[seed % STAR_CHARS.len()];
                let base = (seed % 3) as f64 / 3.0;
                let color = star_color(base + scene.twinkle / 3.0);
                grid.plot(i32::from(x), i32::from(y), ch, color);
            }
        }
    }
}

/// Render the sky panel into `area`.
pub fn render(frame: &mut Frame, area: Rect, scene: &SkyScene<'_>) {
    let grid = draw_sky(scene, area.width, area.height);
    frame.render_widget(Paragraph::new(grid.into_lines()), area);
}
