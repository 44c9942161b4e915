use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::settings::SettingsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Neon,
    White,
    Blue,
    Purple,
    Sunset,
    Ocean,
}

/// Colours used to draw both screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,      // Titles, selected row, self bubble border
    pub secondary: Color,   // Icons, online dot
    pub highlight: Color,   // Read receipts, unread badge
    pub text: Color,
    pub muted: Color,       // Timestamps and previews
    pub self_bubble: Color,
    pub peer_bubble: Color,
}

impl ThemeName {
    pub const ALL: [ThemeName; 6] = [
        ThemeName::Neon,
        ThemeName::White,
        ThemeName::Blue,
        ThemeName::Purple,
        ThemeName::Sunset,
        ThemeName::Ocean,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemeName::Neon => "Neon",
            ThemeName::White => "White",
            ThemeName::Blue => "Blue",
            ThemeName::Purple => "Purple",
            ThemeName::Sunset => "Sunset",
            ThemeName::Ocean => "Ocean",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    /// The next theme in picker order, wrapping from Ocean back to Neon.
    pub fn next(&self) -> ThemeName {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn palette(&self) -> Palette {
        match self {
            ThemeName::Neon => Palette {
                accent: Color::Rgb(255, 16, 240),
                secondary: Color::Rgb(0, 255, 255),
                highlight: Color::Rgb(57, 255, 20),
                text: Color::White,
                muted: Color::Gray,
                self_bubble: Color::Rgb(255, 16, 240),
                peer_bubble: Color::Rgb(0, 255, 255),
            },
            ThemeName::White => Palette {
                accent: Color::Rgb(30, 41, 59),
                secondary: Color::Rgb(71, 85, 105),
                highlight: Color::Rgb(37, 99, 235),
                text: Color::Black,
                muted: Color::DarkGray,
                self_bubble: Color::Rgb(30, 41, 59),
                peer_bubble: Color::Rgb(148, 163, 184),
            },
            ThemeName::Blue => Palette {
                accent: Color::Rgb(59, 130, 246),
                secondary: Color::Rgb(96, 165, 250),
                highlight: Color::Rgb(147, 197, 253),
                text: Color::White,
                muted: Color::Gray,
                self_bubble: Color::Rgb(59, 130, 246),
                peer_bubble: Color::Rgb(30, 64, 175),
            },
            ThemeName::Purple => Palette {
                accent: Color::Rgb(168, 85, 247),
                secondary: Color::Rgb(192, 132, 252),
                highlight: Color::Rgb(236, 72, 153),
                text: Color::White,
                muted: Color::Gray,
                self_bubble: Color::Rgb(168, 85, 247),
                peer_bubble: Color::Rgb(107, 33, 168),
            },
            ThemeName::Sunset => Palette {
                accent: Color::Rgb(249, 115, 22),
                secondary: Color::Rgb(251, 191, 36),
                highlight: Color::Rgb(239, 68, 68),
                text: Color::White,
                muted: Color::Gray,
                self_bubble: Color::Rgb(249, 115, 22),
                peer_bubble: Color::Rgb(190, 18, 60),
            },
            ThemeName::Ocean => Palette {
                accent: Color::Rgb(20, 184, 166),
                secondary: Color::Rgb(45, 212, 191),
                highlight: Color::Rgb(14, 165, 233),
                text: Color::White,
                muted: Color::Gray,
                self_bubble: Color::Rgb(20, 184, 166),
                peer_bubble: Color::Rgb(15, 118, 110),
            },
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ThemeName {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SettingsError::UnknownTheme(wanted.to_string()))
    }
}
