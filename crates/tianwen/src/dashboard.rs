//! Dashboard state: the animations, the dial trackers and the calendar.
//!
//! Kept free of terminal code so the key bindings can be exercised with a
//! [`ManualClock`](tianwen_core::ManualClock).

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, FixedOffset};
use ratatui::style::Color;
use tianwen_anim::{
    AnimationConfig, AnimationHandle, AnimationKind, AnimationRegistry, SharedRegistry,
    tick_shared, use_animation,
};
use tianwen_astro::{
    AnalyticEphemeris, AngleStrategy, AngleTracker, MoonPhase, MoonPhaseName, PlanetTracker,
    moon_phase,
};
use tianwen_calendar::{
    CalendarModel, CalendarStrategy, ChineseCalendarInfo, solar_term_description,
};
use tianwen_config::Config;
use tianwen_core::{AngleModelKind, Clock, IntervalTimer, Luminary, SystemClock};

use crate::palette::theme_color;
use crate::sky::SkyScene;

pub const STAR_TWINKLE: &str = "stars.twinkle";
pub const STAR_CLOCK: &str = "stars.clock";
pub const SUN_SPIN: &str = "sun.spin";
pub const MOON_GLOW: &str = "moon.glow";

/// Animations owned by the dashboard with their speed at the medium preset.
const ANIMATIONS: [(&str, AnimationKind, f64); 4] = [
    (STAR_TWINKLE, AnimationKind::Twinkle, 1.0),
    (STAR_CLOCK, AnimationKind::Orbital, 1.0),
    (SUN_SPIN, AnimationKind::Rotation, 0.5),
    (MOON_GLOW, AnimationKind::Pulse, 0.8),
];

/// Dial offset per angle model.
///
/// The precise hour angle is 0° at transit, the simplified one is 180° at
/// noon; both are drawn with noon at the top.
fn dial_base(kind: AngleModelKind) -> f64 {
    match kind {
        AngleModelKind::Precise => 180.0,
        AngleModelKind::Simplified => 0.0,
    }
}

/// What the info panel shows for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPanel {
    pub time: DateTime<FixedOffset>,
    pub observer: String,
    pub calendar: ChineseCalendarInfo,
    pub term_description: Option<String>,
    pub moon: MoonPhase,
    pub phase_name: &'static str,
    pub phase_emoji: &'static str,
}

/// Calendar and moon readings, recomputed with the dial angles rather than every frame.
#[derive(Debug, Clone, PartialEq)]
struct Readings {
    calendar: ChineseCalendarInfo,
    term_description: Option<String>,
    moon: MoonPhase,
}

impl Readings {
    fn compute(
        calendar: &CalendarStrategy,
        ephemeris: &AnalyticEphemeris,
        time: DateTime<FixedOffset>,
    ) -> Self {
        let calendar = calendar.calendar_info(time).into_value();
        Self {
            term_description: calendar.solar_term.as_ref().map(solar_term_description),
            calendar,
            moon: moon_phase(ephemeris, time).get(),
        }
    }
}

pub struct Dashboard<C: Clock + Clone = SystemClock> {
    config: Config,
    clock: C,
    ephemeris: AnalyticEphemeris,
    registry: SharedRegistry<C>,
    animations: Vec<(AnimationHandle<C>, f64)>,
    sun: AngleTracker<AngleStrategy, C>,
    moon: AngleTracker<AngleStrategy, C>,
    planets: PlanetTracker<AnalyticEphemeris, C>,
    calendar: CalendarStrategy,
    readings: Readings,
    readings_timer: IntervalTimer,
    paused: bool,
}

impl<C: Clock + Clone> Dashboard<C> {
    pub fn new(config: Config, clock: C) -> Self {
        let registry: SharedRegistry<C> = Rc::new(RefCell::new(AnimationRegistry::new(
            clock.clone(),
            config.oscillator_mode,
        )));

        let multiplier = config.animation_speed.multiplier();
        let animations = ANIMATIONS
            .iter()
            .map(|&(id, kind, speed)| {
                let handle = use_animation(
                    &registry,
                    id,
                    AnimationConfig::new(kind).speed(speed * multiplier),
                );
                handle.start();
                (handle, speed)
            })
            .collect();

        let mut planets =
            PlanetTracker::new(AnalyticEphemeris, clock.clone(), config.planet_refresh());
        planets.start();

        let calendar = CalendarStrategy::from_kind(config.calendar_model);
        let readings = Readings::compute(&calendar, &AnalyticEphemeris, clock.wall());
        let mut readings_timer = IntervalTimer::new(config.angle_refresh());
        readings_timer.start(clock.now());
        let sun = angle_tracker(&config, &clock, Luminary::Sun);
        let moon = angle_tracker(&config, &clock, Luminary::Moon);

        Self {
            config,
            clock,
            ephemeris: AnalyticEphemeris,
            registry,
            animations,
            sun,
            moon,
            planets,
            calendar,
            readings,
            readings_timer,
            paused: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[cfg(test)]
    pub fn registry(&self) -> &SharedRegistry<C> {
        &self.registry
    }

    pub fn sun_angle(&self) -> f64 {
        self.sun.current_angle()
    }

    pub fn moon_angle(&self) -> f64 {
        self.moon.current_angle()
    }

    /// One iteration of the host loop: a registry frame, then any due refresh.
    pub fn tick(&mut self) {
        tick_shared(&self.registry);
        self.sun.poll();
        self.moon.poll();
        self.planets.poll();
        if self.readings_timer.poll(self.clock.now()) {
            self.refresh_readings();
        }
    }

    fn refresh_readings(&mut self) {
        self.readings = Readings::compute(&self.calendar, &self.ephemeris, self.clock.wall());
    }

    pub fn toggle_angle_model(&mut self) {
        self.config.angle_model = self.config.angle_model.toggle();
        self.sun = angle_tracker(&self.config, &self.clock, Luminary::Sun);
        self.moon = angle_tracker(&self.config, &self.clock, Luminary::Moon);
        if self.paused {
            self.sun.stop();
            self.moon.stop();
        }
        tracing::debug!(model = ?self.config.angle_model, "angle model switched");
    }

    pub fn toggle_calendar_model(&mut self) {
        self.config.calendar_model = self.config.calendar_model.toggle();
        self.calendar = CalendarStrategy::from_kind(self.config.calendar_model);
        self.refresh_readings();
        tracing::debug!(model = ?self.config.calendar_model, "calendar model switched");
    }

    /// Freeze or resume every animation and periodic refresh.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        for (handle, _) in &self.animations {
            if self.paused {
                handle.stop();
            } else {
                handle.start();
            }
        }
        if self.paused {
            self.sun.stop();
            self.moon.stop();
            self.planets.stop();
            self.readings_timer.stop();
        } else {
            self.sun.start();
            self.moon.start();
            self.planets.start();
            self.readings_timer.start(self.clock.now());
        }
    }

    pub fn faster(&mut self) {
        self.config.animation_speed = self.config.animation_speed.faster();
        self.apply_speed();
    }

    pub fn slower(&mut self) {
        self.config.animation_speed = self.config.animation_speed.slower();
        self.apply_speed();
    }

    pub fn cycle_color_theme(&mut self) {
        self.config.color_theme = self.config.color_theme.next();
    }

    /// Zero the animations and recompute every position now.
    pub fn reset(&mut self) {
        for (handle, _) in &self.animations {
            handle.reset();
        }
        self.sun.refresh();
        self.moon.refresh();
        self.planets.update(self.clock.wall());
        self.refresh_readings();
    }

    /// Stop the refresh timers, then tear down the animation registry.
    pub fn shutdown(&mut self) {
        self.sun.stop();
        self.moon.stop();
        self.planets.stop();
        self.readings_timer.stop();
        self.registry.borrow_mut().dispose();
    }

    fn apply_speed(&self) {
        let multiplier = self.config.animation_speed.multiplier();
        for (handle, base) in &self.animations {
            handle.set_speed(base * multiplier);
        }
    }

    fn animation(&self, id: &str) -> f64 {
        self.registry.borrow().value(id)
    }

    pub fn accent(&self) -> Color {
        theme_color(self.config.color_theme)
    }

    pub fn scene(&self) -> SkyScene<'_> {
        SkyScene {
            sun_angle: self.sun_angle(),
            moon_angle: self.moon_angle(),
            moon_phase: self.readings.moon.phase,
            planets: self.planets.planets(),
            sun_rotation: self.animation(SUN_SPIN),
            twinkle: self.animation(STAR_TWINKLE),
            star_clock: self.animation(STAR_CLOCK),
            moon_glow: self.animation(MOON_GLOW),
            accent: self.accent(),
        }
    }

    /// Panel contents. The clock is read live; everything else is as of the last refresh.
    pub fn info(&self) -> InfoPanel {
        let Readings {
            calendar,
            term_description,
            moon,
        } = self.readings.clone();
        let phase = MoonPhaseName::from_phase(moon.phase);
        InfoPanel {
            time: self.clock.wall(),
            observer: self.config.observer.label(),
            calendar,
            term_description,
            moon,
            phase_name: phase.chinese_name(),
            phase_emoji: phase.emoji(),
        }
    }
}

fn angle_tracker<C: Clock + Clone>(
    config: &Config,
    clock: &C,
    body: Luminary,
) -> AngleTracker<AngleStrategy, C> {
    let mut tracker = AngleTracker::new(
        AngleStrategy::from_kind(config.angle_model),
        clock.clone(),
        body,
        dial_base(config.angle_model),
        config.angle_refresh(),
        Some(config.observer()),
    );
    tracker.start();
    tracker
}
