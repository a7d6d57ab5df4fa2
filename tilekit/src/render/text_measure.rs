//! Text metrics used for label placement.

use crate::theme::style::TextStyle;

/// Measures text as it will be rendered. Implementations must return the same values for the
/// same input so that label placement is reproducible.
pub trait TextMeasure: Send {
    fn text_width(&self, text: &str, style: &TextStyle) -> f32;
    fn font_height(&self, style: &TextStyle) -> f32;
    fn font_descent(&self, style: &TextStyle) -> f32;
}

/// Every character advances by a fixed fraction of the font size.
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthMeasure {
    pub advance: f32,
}

impl Default for FixedWidthMeasure {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasure for FixedWidthMeasure {
    fn text_width(&self, text: &str, style: &TextStyle) -> f32 {
        text.chars().count() as f32 * style.font_size * self.advance
    }

    fn font_height(&self, style: &TextStyle) -> f32 {
        style.font_size * 1.2
    }

    fn font_descent(&self, style: &TextStyle) -> f32 {
        style.font_size * 0.2
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{
        render::text_measure::{FixedWidthMeasure, TextMeasure},
        theme::style::TextStyle,
    };

    #[test]
    fn test_fixed_width() {
        let mut style = TextStyle::new("name");
        style.font_size = 10.0;
        let measure = FixedWidthMeasure::default();

        assert_relative_eq!(measure.text_width("Straße", &style), 36.0);
        assert_relative_eq!(measure.font_height(&style), 12.0);
    }
}
