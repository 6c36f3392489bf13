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
            // Offset so the first hue lands on green.
            let hue = 140.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.55, 0.45);
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
// Chart style colours
// ---------------------------------------------------------------------------

/// Parse a `#RRGGBB` / `#RRGGBBAA` colour, falling back to grey.
pub fn parse_hex(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or_else(|_| {
        log::warn!("invalid colour '{hex}', using grey");
        Color32::GRAY
    })
}

/// `n` colours for a series: the style's own colours first, then generated
/// ones when the chart has more categories than the style lists.
///
/// Single-colour styles are repeated rather than extended.
pub fn series_colors(style_colors: &[&str], n: usize) -> Vec<Color32> {
    let mut colors: Vec<Color32> = style_colors.iter().map(|c| parse_hex(c)).collect();
    match colors.len() {
        0 => generate_palette(n),
        1 => vec![colors[0]; n],
        len if len >= n => {
            colors.truncate(n);
            colors
        }
        len => {
            colors.extend(generate_palette(n).into_iter().skip(len));
            colors
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn hex_with_alpha() {
        let c = parse_hex("#73CE99");
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x73, 0xCE, 0x99, 0xFF));
        assert_ne!(parse_hex("#407E60B8").a(), 0xFF);
        assert_eq!(parse_hex("not a colour"), Color32::GRAY);
    }

    #[test]
    fn series_colors_extend_multi_colour_styles() {
        let colors = series_colors(&["#AEEAC4EA", "#08843ED6"], 3);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], parse_hex("#AEEAC4EA"));
        assert_eq!(colors[1], parse_hex("#08843ED6"));

        let single = series_colors(&["#2A87468A"], 4);
        assert!(single.iter().all(|c| *c == single[0]));

        assert_eq!(series_colors(&["#AEEAC4EA", "#08843ED6"], 1).len(), 1);
    }
}
