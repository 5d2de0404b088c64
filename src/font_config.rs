// src/font_config.rs

// Font styles for plot rendering. Sizes are in points so that text keeps the
// same physical size whatever DPI the figure is rendered at.

use plotters::style::{FontDesc, FontStyle as PlottersFontStyle, IntoFont};

use crate::constants::{
    FONT_SIZE_ANNOTATION, FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND,
    FONT_SIZE_MAIN_TITLE, FONT_SIZE_MESSAGE, FONT_SIZE_TICK_LABEL,
};

/// Font family name for default system fonts.
pub const FONT_FAMILY_SYSTEM: &str = "sans-serif";

/// Font family, size in points and weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontStyle {
    pub family: &'static str,
    pub size_pt: f64,
    pub bold: bool,
}

impl FontStyle {
    /// Pixel size at `dpi`, never below 1.
    pub fn px(&self, dpi: u32) -> f64 {
        (self.size_pt * dpi as f64 / 72.0).max(1.0)
    }

    /// Plotters font description at `dpi`.
    pub fn at(&self, dpi: u32) -> FontDesc<'static> {
        let font = (self.family, self.px(dpi)).into_font();
        if self.bold {
            font.style(PlottersFontStyle::Bold)
        } else {
            font
        }
    }
}

pub const FONT_MAIN_TITLE: FontStyle = FontStyle {
    family: FONT_FAMILY_SYSTEM,
    size_pt: FONT_SIZE_MAIN_TITLE,
    bold: true,
};

pub const FONT_CHART_TITLE: FontStyle = FontStyle {
    family: FONT_FAMILY_SYSTEM,
    size_pt: FONT_SIZE_CHART_TITLE,
    bold: true,
};

pub const FONT_AXIS_LABEL: FontStyle = FontStyle {
    family: FONT_FAMILY_SYSTEM,
    size_pt: FONT_SIZE_AXIS_LABEL,
    bold: false,
};

pub const FONT_TICK_LABEL: FontStyle = FontStyle {
    family: FONT_FAMILY_SYSTEM,
    size_pt: FONT_SIZE_TICK_LABEL,
    bold: false,
};

pub const FONT_LEGEND: FontStyle = FontStyle {
    family: FONT_FAMILY_SYSTEM,
    size_pt: FONT_SIZE_LEGEND,
    bold: false,
};

pub const FONT_ANNOTATION: FontStyle = FontStyle {
    family: FONT_FAMILY_SYSTEM,
    size_pt: FONT_SIZE_ANNOTATION,
    bold: false,
};

pub const FONT_MESSAGE: FontStyle = FontStyle {
    family: FONT_FAMILY_SYSTEM,
    size_pt: FONT_SIZE_MESSAGE,
    bold: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_to_pixel_conversion() {
        assert_eq!(FONT_AXIS_LABEL.px(72), 10.0);
        assert_eq!(FONT_AXIS_LABEL.px(144), 20.0);
        assert!(FONT_MAIN_TITLE.px(300) > FONT_ANNOTATION.px(300));
    }
}

// src/font_config.rs
