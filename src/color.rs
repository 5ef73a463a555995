use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting at `hue_offset` degrees.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (hue_offset + (i as f32 / n as f32) * 360.0) % 360.0;
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
// Scatter roles → Color32
// ---------------------------------------------------------------------------

/// Colours for the three kinds of marks on the scatter plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotColors {
    pub point: Color32,
    pub neighbor: Color32,
    pub query: Color32,
    pub axis: Color32,
}

impl Default for PlotColors {
    fn default() -> Self {
        // Blue points; the other marks sit a third of the hue wheel away.
        let hues = generate_palette(3, 210.0);
        PlotColors {
            point: hues[0],
            neighbor: hues[1],
            query: hues[2],
            axis: Color32::GRAY,
        }
    }
}
