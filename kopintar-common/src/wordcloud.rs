//! Word cloud sizing and coloring

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordWeight {
    pub text: String,
    #[serde(default)]
    pub value: f64,
}

/// Which cloud a word belongs to; each has its own hue band
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloudKind {
    Masalah,
    Pelatihan,
}

impl CloudKind {
    pub fn hue(&self, index: usize) -> usize {
        match self {
            CloudKind::Masalah => 30 + (index * 15) % 60,
            CloudKind::Pelatihan => 90 + (index * 20) % 80,
        }
    }
}

/// Pixel size, 16..=52
pub fn font_size(value: f64) -> f64 {
    (16.0 + value * 1.3).clamp(16.0, 52.0)
}

pub fn font_weight(value: f64) -> u16 {
    if value > 15.0 {
        700
    } else if value > 8.0 {
        600
    } else {
        500
    }
}

/// Inline CSS for the `index`-th word of a cloud
pub fn word_style(kind: CloudKind, index: usize, value: f64) -> String {
    format!(
        "font-size: {:.1}px; color: hsl({}, 65%, 45%); font-weight: {};",
        font_size(value),
        kind.hue(index),
        font_weight(value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_is_clamped() {
        assert_eq!(font_size(0.0), 16.0);
        assert!((font_size(10.0) - 29.0).abs() < 1e-9);
        assert_eq!(font_size(100.0), 52.0);
        assert_eq!(font_size(-5.0), 16.0);
    }

    #[test]
    fn test_font_weight_steps() {
        assert_eq!(font_weight(16.0), 700);
        assert_eq!(font_weight(15.0), 600);
        assert_eq!(font_weight(8.0), 500);
    }

    #[test]
    fn test_hue_bands() {
        assert_eq!(CloudKind::Masalah.hue(0), 30);
        assert_eq!(CloudKind::Masalah.hue(4), 30);
        assert_eq!(CloudKind::Pelatihan.hue(3), 150);
        assert_eq!(CloudKind::Pelatihan.hue(4), 90);
    }

    #[test]
    fn test_word_style() {
        assert_eq!(
            word_style(CloudKind::Masalah, 1, 10.0),
            "font-size: 29.0px; color: hsl(45, 65%, 45%); font-weight: 600;"
        );
    }
}
