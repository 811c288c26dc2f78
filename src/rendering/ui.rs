//! # Heads-Up Display
//!
//! The fixed stat labels and a macroquad side panel that shows them.

use macroquad::prelude::*;

/// The stats shown on the heads-up display, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatLabel {
    Xp,
    Level,
    Health,
    Weapon,
    Damage,
    Enemies,
}

impl StatLabel {
    pub fn all() -> [StatLabel; 6] {
        [
            StatLabel::Xp,
            StatLabel::Level,
            StatLabel::Health,
            StatLabel::Weapon,
            StatLabel::Damage,
            StatLabel::Enemies,
        ]
    }

    /// Visible label text.
    pub fn label(self) -> &'static str {
        match self {
            StatLabel::Xp => "XP",
            StatLabel::Level => "Level",
            StatLabel::Health => "Health",
            StatLabel::Weapon => "Weapon",
            StatLabel::Damage => "Damage",
            StatLabel::Enemies => "Enemies",
        }
    }
}

/// Anything that can show a stat value.
pub trait StatSink {
    fn set_stat(&mut self, label: StatLabel, value: String);
}

/// Side panel listing the current stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudPanel {
    values: Vec<(StatLabel, String)>,
}

impl HudPanel {
    /// Creates a panel with every stat at "0", mirroring an empty game.
    pub fn new() -> Self {
        Self {
            values: StatLabel::all()
                .into_iter()
                .map(|label| (label, "0".to_string()))
                .collect(),
        }
    }

    /// Current text for a stat.
    pub fn value(&self, label: StatLabel) -> Option<&str> {
        self.values
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, value)| value.as_str())
    }

    /// Draws the panel with its top-left corner at (`x`, `y`).
    pub fn render(&self, x: f32, y: f32) {
        let line_height = 20.0;
        let mut line_y = y + line_height;

        draw_text("GLOAM", x, line_y, 24.0, WHITE);
        line_y += line_height * 2.0;

        for (label, value) in &self.values {
            draw_text(&format!("{}: {}", label.label(), value), x, line_y, 18.0, WHITE);
            line_y += line_height;
        }

        line_y += line_height;
        draw_text("Controls:", x, line_y, 18.0, GREEN);
        line_y += line_height;

        for control in [
            "WASD/Arrows: Move",
            "T: Toggle Shadow",
            "R: New level",
            "ESC: Quit",
        ] {
            draw_text(control, x, line_y, 16.0, WHITE);
            line_y += line_height;
        }
    }
}

impl StatSink for HudPanel {
    fn set_stat(&mut self, label: StatLabel, value: String) {
        match self.values.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = value,
            None => self.values.push((label, value)),
        }
    }
}

impl Default for HudPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_display_text() {
        let labels: Vec<_> = StatLabel::all().iter().map(|l| l.label()).collect();
        assert_eq!(labels, ["XP", "Level", "Health", "Weapon", "Damage", "Enemies"]);
    }

    #[test]
    fn test_panel_updates_in_place() {
        let mut panel = HudPanel::new();
        assert_eq!(panel.value(StatLabel::Health), Some("0"));

        panel.set_stat(StatLabel::Health, "85".to_string());
        panel.set_stat(StatLabel::Weapon, "Sword".to_string());

        assert_eq!(panel.value(StatLabel::Health), Some("85"));
        assert_eq!(panel.value(StatLabel::Weapon), Some("Sword"));
        assert_eq!(panel.values.len(), 6);
    }
}
