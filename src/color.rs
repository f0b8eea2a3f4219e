use anyhow::{Context, Result};
use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format::<u8>()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Named colours
// ---------------------------------------------------------------------------

/// Look up a CSS/SVG colour keyword such as `"orange"`.
pub fn named(name: &str) -> Result<Srgb<u8>> {
    palette::named::from_str(name).with_context(|| format!("unknown colour name '{name}'"))
}

/// Convert to the renderer's colour type.
pub fn to_plotters(c: Srgb<u8>) -> RGBColor {
    RGBColor(c.red, c.green, c.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_entries() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for i in 0..colors.len() {
            for j in (i + 1)..colors.len() {
                assert_ne!(colors[i], colors[j]);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn named_colours_resolve() {
        assert_eq!(named("orange").unwrap(), Srgb::new(255, 165, 0));
        assert_eq!(named("green").unwrap(), Srgb::new(0, 128, 0));
        assert!(named("not-a-colour").is_err());
    }

    #[test]
    fn plotters_conversion_keeps_channels() {
        let c = to_plotters(Srgb::new(1, 2, 3));
        assert_eq!((c.0, c.1, c.2), (1, 2, 3));
    }
}
