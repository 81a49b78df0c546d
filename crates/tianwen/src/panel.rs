//! The info panel beside the sky.

use ratatui::{
    style::{Color, Style, Stylize},
    text::Line,
};
use tianwen_core::{AngleModelKind, AnimationSpeed, CalendarModelKind};

use crate::dashboard::InfoPanel;

fn angle_model_label(kind: AngleModelKind) -> &'static str {
    match kind {
        AngleModelKind::Precise => "精确",
        AngleModelKind::Simplified => "简化",
    }
}

fn calendar_model_label(kind: CalendarModelKind) -> &'static str {
    match kind {
        CalendarModelKind::Astronomical => "天文",
        CalendarModelKind::Approximate => "近似",
    }
}

fn speed_label(speed: AnimationSpeed) -> &'static str {
    match speed {
        AnimationSpeed::Slow => "慢",
        AnimationSpeed::Medium => "中",
        AnimationSpeed::Fast => "快",
    }
}

/// Settings shown under the readings.
#[derive(Debug, Clone, Copy)]
pub struct PanelStatus {
    pub angle_model: AngleModelKind,
    pub calendar_model: CalendarModelKind,
    pub speed: AnimationSpeed,
    pub paused: bool,
}

pub fn info_lines(info: &InfoPanel, status: PanelStatus, accent: Color) -> Vec<Line<'static>> {
    let ganzhi = &info.calendar.ganzhi;
    let label = Style::new().fg(accent);

    let mut lines = vec![
        Line::from(info.time.format("%Y-%m-%d %H:%M:%S").to_string()).style(label.bold()),
        Line::from(format!("{}  {}", info.calendar.solar_date, info.observer)).dark_gray(),
        Line::default(),
        Line::from(info.calendar.lunar_date.clone()).style(label),
        Line::from(format!(
            "{}年 {}月 {}日 {}时",
            ganzhi.year.pillar.full, ganzhi.month.full, ganzhi.day.pillar.full, ganzhi.hour.full
        )),
        Line::from(format!(
            "生肖 {}  五行 {}",
            ganzhi.year.animal, ganzhi.year.element
        )),
        Line::from(
            info.term_description
                .clone()
                .unwrap_or_else(|| "节气未知".to_string()),
        ),
        Line::default(),
        Line::from(format!(
            "{} {}  {:.0}%",
            info.phase_emoji,
            info.phase_name,
            info.moon.illumination * 100.0
        )),
        Line::from(format!("月龄 {:.1} 天", info.moon.age)).dark_gray(),
        Line::default(),
        Line::from(format!(
            "角度 {}  历法 {}  速度 {}",
            angle_model_label(status.angle_model),
            calendar_model_label(status.calendar_model),
            speed_label(status.speed)
        ))
        .dark_gray(),
    ];
    if status.paused {
        lines.push(Line::from("已暂停").style(label));
    }
    lines
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use tianwen_astro::MoonPhase;
    use tianwen_calendar::{ChineseCalendarInfo, GanzhiInfo, SixtyCycle};

    use super::*;

    fn info(term: Option<&str>) -> InfoPanel {
        InfoPanel {
            time: DateTime::parse_from_rfc3339("2024-02-10T12:00:00+08:00").unwrap(),
            observer: "北京".to_string(),
            calendar: ChineseCalendarInfo {
                solar_date: "2024/2/10".to_string(),
                lunar_date: "农历甲辰年正月初一".to_string(),
                solar_term: None,
                ganzhi: GanzhiInfo::from_cycles(
                    SixtyCycle::from_index(40),
                    SixtyCycle::from_index(2),
                    SixtyCycle::from_index(40),
                    SixtyCycle::from_index(4),
                ),
            },
            term_description: term.map(str::to_string),
            moon: MoonPhase::from_angle(0.0),
            phase_name: "新月",
            phase_emoji: "🌑",
        }
    }

    fn status(paused: bool) -> PanelStatus {
        PanelStatus {
            angle_model: AngleModelKind::Precise,
            calendar_model: CalendarModelKind::Approximate,
            speed: AnimationSpeed::Medium,
            paused,
        }
    }

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn test_lines() {
        let lines = text(&info_lines(&info(Some("距离雨水还有9天")), status(false), Color::Yellow));
        assert_eq!(lines[0], "2024-02-10 12:00:00");
        assert_eq!(lines[3], "农历甲辰年正月初一");
        assert_eq!(lines[4], "甲辰年 丙寅月 甲辰日 戊辰时");
        assert_eq!(lines[5], "生肖 龙  五行 木");
        assert_eq!(lines[6], "距离雨水还有9天");
        assert_eq!(lines[8], "🌑 新月  0%");
        assert_eq!(lines.last().unwrap(), "角度 精确  历法 近似  速度 中");
    }

    #[test]
    fn test_paused_and_unknown_term() {
        let lines = text(&info_lines(&info(None), status(true), Color::Yellow));
        assert_eq!(lines[6], "节气未知");
        assert_eq!(lines.last().unwrap(), "已暂停");
    }
}
