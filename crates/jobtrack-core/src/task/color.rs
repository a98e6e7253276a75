//! Task color tags.
//!
//! Colors are stored on task documents as their palette name. Documents
//! written by older clients may carry names that are no longer in the
//! palette, so every lookup falls back to the default entry instead of
//! surfacing an invalid state.

use serde::{Deserialize, Serialize};

/// A (background, foreground) pair of CSS hex colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    /// Background hex color (e.g., "#FFCDD2").
    pub background: &'static str,
    /// Foreground (text) hex color.
    pub foreground: &'static str,
}

/// A color tag drawn from the fixed task palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskColor {
    #[default]
    Default,
    Red,
    Pink,
    Purple,
    Blue,
    Green,
    Yellow,
}

/// All palette entries, in display order. The first entry is the default.
pub const PALETTE: [TaskColor; 7] = [
    TaskColor::Default,
    TaskColor::Red,
    TaskColor::Pink,
    TaskColor::Purple,
    TaskColor::Blue,
    TaskColor::Green,
    TaskColor::Yellow,
];

impl TaskColor {
    /// The stored palette name for this color.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Red => "Red",
            Self::Pink => "Pink",
            Self::Purple => "Purple",
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
        }
    }

    /// Resolves a stored name to a palette entry.
    ///
    /// Unrecognized names resolve to [`TaskColor::Default`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Red" => Self::Red,
            "Pink" => Self::Pink,
            "Purple" => Self::Purple,
            "Blue" => Self::Blue,
            "Green" => Self::Green,
            "Yellow" => Self::Yellow,
            _ => Self::Default,
        }
    }

    /// The light-mode display pair for this color.
    pub fn light(&self) -> ColorPair {
        match self {
            Self::Default => pair("#FFFFFF", "#000000"),
            Self::Red => pair("#FFCDD2", "#B71C1C"),
            Self::Pink => pair("#F8BBD0", "#880E4F"),
            Self::Purple => pair("#E1BEE7", "#4A148C"),
            Self::Blue => pair("#BBDEFB", "#0E3C68"),
            Self::Green => pair("#C8E6C9", "#1B5E20"),
            Self::Yellow => pair("#FFF9C4", "#F57F17"),
        }
    }

    /// The dark-mode display pair for this color.
    pub fn dark(&self) -> ColorPair {
        match self {
            Self::Default => pair("#333333", "#FFFFFF"),
            Self::Red => pair("#5a2328", "#ffcdd2"),
            Self::Pink => pair("#582438", "#f8bbd0"),
            Self::Purple => pair("#3c2342", "#e1bee7"),
            Self::Blue => pair("#1e3046", "#bbdefb"),
            Self::Green => pair("#243e26", "#c8e6c9"),
            Self::Yellow => pair("#464222", "#fff9c4"),
        }
    }
}

fn pair(background: &'static str, foreground: &'static str) -> ColorPair {
    ColorPair {
        background,
        foreground,
    }
}

impl From<String> for TaskColor {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<TaskColor> for String {
    fn from(color: TaskColor) -> Self {
        color.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_name_round_trip() {
        for color in PALETTE {
            assert_eq!(TaskColor::from_name(color.name()), color);
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        assert_eq!(TaskColor::from_name("Chartreuse"), TaskColor::Default);
        assert_eq!(TaskColor::from_name(""), TaskColor::Default);
    }

    #[test]
    fn test_serde_falls_back_to_default() {
        let color: TaskColor = serde_json::from_str("\"Magenta\"").unwrap();
        assert_eq!(color, TaskColor::Default);

        let color: TaskColor = serde_json::from_str("\"Green\"").unwrap();
        assert_eq!(color, TaskColor::Green);
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"Green\"");
    }

    #[test]
    fn test_default_is_first_palette_entry() {
        assert_eq!(PALETTE[0], TaskColor::default());
        assert_eq!(TaskColor::default().light().background, "#FFFFFF");
        assert_eq!(TaskColor::default().dark().background, "#333333");
    }
}
