//! Terminal output helpers

use colored::{Color, ColoredString, Colorize};
use complyform_core::Tone;

/// Terminal colour of a tone; neutral text is left plain
pub fn color_for(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Red => Some(Color::Red),
        Tone::Yellow => Some(Color::Yellow),
        Tone::Blue => Some(Color::Blue),
        Tone::Purple => Some(Color::Magenta),
        Tone::Green => Some(Color::Green),
        Tone::Neutral => None,
    }
}

/// Colour text the way the desktop client colours the same badge
pub fn paint(text: &str, tone: Tone) -> ColoredString {
    match color_for(tone) {
        Some(color) => text.color(color),
        None => text.normal(),
    }
}

/// Section heading
pub fn heading(text: &str) {
    println!();
    println!("{}", text.bold());
    println!("{}", "─".repeat(text.chars().count()).dimmed());
}

/// Aligned `label: value` line
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<14} {}", format!("{label}:").dimmed(), value);
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Shorten text to a column width
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tone_colors() {
        assert_eq!(color_for(Tone::Red), Some(Color::Red));
        assert_eq!(color_for(Tone::Purple), Some(Color::Magenta));
        assert_eq!(color_for(Tone::Neutral), None);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Bridge", 10), "Bridge");
        assert_eq!(truncate("Bridge Deck Rehabilitation", 8), "Bridge …");
        assert_eq!(truncate("", 3), "");
    }
}
