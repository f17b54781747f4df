//! Text width measurement.
//!
//! Truncation and wrapping in the layout engine need the rendered width of a
//! string. [`TextMeasure`] abstracts that capability so the planner can run
//! against real font data, a cheap heuristic, or a fixed-width mock in tests.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

pub trait TextMeasure {
    /// Rendered width of a single line of `text` in pixels.
    fn text_width(&self, text: &str, font_size: f32, font_family: &str) -> f32;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn text_width(&self, text: &str, font_size: f32, font_family: &str) -> f32 {
        (**self).text_width(text, font_size, font_family)
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for Box<T> {
    fn text_width(&self, text: &str, font_size: f32, font_family: &str) -> f32 {
        (**self).text_width(text, font_size, font_family)
    }
}

/// Per-character width estimate, calibrated for common sans-serif faces.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMetrics;

impl TextMeasure for HeuristicMetrics {
    fn text_width(&self, text: &str, font_size: f32, _font_family: &str) -> f32 {
        text.chars().map(char_width_factor).sum::<f32>() * font_size
    }
}

fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' | '.' | ',' | ':' | ';' | '|' | '!' | '\'' | '(' | ')' | '[' | ']' => 0.31,
        'i' | 'j' | 'l' | 'I' => 0.25,
        'f' | 't' | 'r' | '1' | '-' => 0.36,
        'm' | 'w' | 'M' | 'W' | '@' | '%' | '&' | '#' => 0.9,
        'A'..='Z' => 0.68,
        '0'..='9' => 0.6,
        'a'..='z' => 0.56,
        _ if ch.is_ascii() => 0.57,
        // CJK and other wide scripts
        _ => 1.0,
    }
}

/// Measures with system fonts located through fontdb, falling back to
/// [`HeuristicMetrics`] when no face can be resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontMetrics;

impl TextMeasure for FontMetrics {
    fn text_width(&self, text: &str, font_size: f32, font_family: &str) -> f32 {
        if text.is_empty() || font_size <= 0.0 {
            return 0.0;
        }
        let measured = FONT_CACHE
            .lock()
            .ok()
            .and_then(|mut cache| cache.measure(text, font_size, font_family));
        measured.unwrap_or_else(|| HeuristicMetrics.text_width(text, font_size, font_family))
    }
}

/// Font-backed measurement unless `fast` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMetrics {
    pub fast: bool,
}

impl SystemMetrics {
    pub fn new(fast: bool) -> Self {
        Self { fast }
    }
}

impl TextMeasure for SystemMetrics {
    fn text_width(&self, text: &str, font_size: f32, font_family: &str) -> f32 {
        if self.fast {
            HeuristicMetrics.text_width(text, font_size, font_family)
        } else {
            FontMetrics.text_width(text, font_size, font_family)
        }
    }
}

static FONT_CACHE: Lazy<Mutex<FontCache>> = Lazy::new(|| Mutex::new(FontCache::default()));

#[derive(Default)]
struct FontCache {
    db: Option<Database>,
    faces: HashMap<String, Option<LoadedFace>>,
}

impl FontCache {
    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = font_family.trim().to_string();
        if !self.faces.contains_key(&key) {
            let face = self.load_face(font_family);
            if face.is_none() {
                tracing::warn!(font_family, "no usable font face, using heuristic widths");
            }
            self.faces.insert(key.clone(), face);
        }
        let face = self.faces.get_mut(&key)?.as_mut()?;
        Some(face.width(text, font_size))
    }

    fn load_face(&mut self, font_family: &str) -> Option<LoadedFace> {
        let db = self.db.get_or_insert_with(|| {
            let mut db = Database::new();
            db.load_system_fonts();
            db
        });

        let names: Vec<String> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|part| !part.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "monospace" | "ui-monospace" => Family::Monospace,
                "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => {
                    Family::SansSerif
                }
                _ => Family::Name(name.as_str()),
            })
            .collect();
        families.push(Family::SansSerif);

        let id = db.query(&Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        })?;
        db.with_face_data(id, |data, index| {
            let face = Face::parse(data, index).ok()?;
            Some(LoadedFace {
                data: data.to_vec(),
                index,
                units_per_em: face.units_per_em().max(1) as f32,
                advances: HashMap::new(),
            })
        })
        .flatten()
    }
}

struct LoadedFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: f32,
    /// Horizontal advance in font units; `None` when the face lacks the glyph.
    advances: HashMap<char, Option<u16>>,
}

impl LoadedFace {
    fn width(&mut self, text: &str, font_size: f32) -> f32 {
        let missing: Vec<char> = text
            .chars()
            .filter(|ch| !self.advances.contains_key(ch))
            .collect();
        if !missing.is_empty() {
            let face = Face::parse(&self.data, self.index).ok();
            for ch in missing {
                let advance = face.as_ref().and_then(|face| {
                    let glyph = face.glyph_index(ch)?;
                    face.glyph_hor_advance(glyph)
                });
                self.advances.insert(ch, advance);
            }
        }

        let scale = font_size / self.units_per_em;
        text.chars()
            .filter(|ch| *ch != '\n')
            .map(|ch| match self.advances.get(&ch).copied().flatten() {
                Some(advance) => advance as f32 * scale,
                None => char_width_factor(ch) * font_size,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_width_scales_with_font_size() {
        let w11 = HeuristicMetrics.text_width("Hello", 11.0, "sans-serif");
        let w22 = HeuristicMetrics.text_width("Hello", 22.0, "sans-serif");
        assert!((w22 - w11 * 2.0).abs() < 0.01);
    }

    #[test]
    fn heuristic_distinguishes_narrow_and_wide_glyphs() {
        let narrow = HeuristicMetrics.text_width("iiii", 12.0, "sans-serif");
        let wide = HeuristicMetrics.text_width("WWWW", 12.0, "sans-serif");
        assert!(wide > narrow * 2.0);
        assert_eq!(HeuristicMetrics.text_width("", 12.0, "sans-serif"), 0.0);
    }

    #[test]
    fn font_metrics_always_produces_a_width() {
        let width = FontMetrics.text_width("Go Live", 8.0, "no-such-font, sans-serif");
        assert!(width > 0.0);
        assert_eq!(FontMetrics.text_width("", 8.0, "sans-serif"), 0.0);
    }

    #[test]
    fn fast_system_metrics_match_heuristic() {
        let text = "CLM Model - Core (KPT) Wave 1";
        assert_eq!(
            SystemMetrics::new(true).text_width(text, 11.0, "sans-serif"),
            HeuristicMetrics.text_width(text, 11.0, "sans-serif")
        );
    }
}
