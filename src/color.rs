use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Subject → Color32
// ---------------------------------------------------------------------------

/// Assigns palette colours to subjects in column order, so both charts and
/// the subject list agree on a subject's colour.
#[derive(Debug, Clone, Default)]
pub struct SubjectColors {
    mapping: BTreeMap<String, Color32>,
}

impl SubjectColors {
    pub fn new<'a>(subjects: impl ExactSizeIterator<Item = &'a str>) -> Self {
        let palette = generate_palette(subjects.len());
        let mapping = subjects
            .zip(palette)
            .map(|(name, c)| (name.to_string(), c))
            .collect();
        SubjectColors { mapping }
    }

    pub fn color_for(&self, subject: &str) -> Color32 {
        self.mapping
            .get(subject)
            .copied()
            .unwrap_or(Color32::LIGHT_BLUE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn colours_follow_subject_order() {
        let names = ["Person_1", "Person_2", "Person_3"];
        let colors = SubjectColors::new(names.iter().copied());
        let palette = generate_palette(3);
        for (name, expected) in names.iter().zip(palette) {
            assert_eq!(colors.color_for(name), expected);
        }
        assert_eq!(colors.color_for("unknown"), Color32::LIGHT_BLUE);
    }
}
