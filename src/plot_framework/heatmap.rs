// src/plot_framework/heatmap.rs

use ndarray::Array2;
use ndarray_stats::QuantileExt;
use plotters::chart::ChartBuilder;
use plotters::element::Rectangle;
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, RGBColor};

use std::error::Error;

use super::line::format_linear_tick;
use super::{draw_text_lines, split_title, valid_range, ColorScale, Colormap, PlotArea, Theme};
use crate::constants::{CHART_MARGIN_PX, COLORBAR_WIDTH_PX, X_LABEL_AREA_PX, Y_LABEL_AREA_PX};
use crate::font_config::{FONT_ANNOTATION, FONT_AXIS_LABEL, FONT_CHART_TITLE, FONT_TICK_LABEL};

/// Matrix drawn as coloured cells; row 0 is at the top.
#[derive(Debug, Clone)]
pub struct HeatmapPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub values: Array2<f64>,
    pub colormap: Colormap,
    /// Colour limits; the data range when `None`.
    pub value_range: Option<(f64, f64)>,
    /// Print each value in its cell.
    pub annotate: bool,
    pub colorbar_label: Option<String>,
}

impl HeatmapPanel {
    pub fn new(title: &str, values: Array2<f64>, colormap: Colormap) -> Self {
        let (rows, cols) = values.dim();
        Self {
            title: title.to_string(),
            x_label: String::new(),
            y_label: String::new(),
            row_labels: (0..rows).map(|r| r.to_string()).collect(),
            col_labels: (0..cols).map(|c| c.to_string()).collect(),
            values,
            colormap,
            value_range: None,
            annotate: false,
            colorbar_label: None,
        }
    }

    pub fn axis_labels(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self
    }

    pub fn tick_labels(mut self, rows: Vec<String>, cols: Vec<String>) -> Self {
        self.row_labels = rows;
        self.col_labels = cols;
        self
    }

    pub fn value_range(mut self, range: (f64, f64)) -> Self {
        self.value_range = Some(range);
        self
    }

    pub fn annotate(mut self) -> Self {
        self.annotate = true;
        self
    }

    pub fn colorbar(mut self, label: &str) -> Self {
        self.colorbar_label = Some(label.to_string());
        self
    }

    /// Colour limits actually used.
    pub fn color_limits(&self) -> (f64, f64) {
        if let Some(range) = self.value_range {
            return range;
        }
        let lo = self.values.min().ok().copied().unwrap_or(0.0);
        let hi = self.values.max().ok().copied().unwrap_or(1.0);
        if hi > lo {
            (lo, hi)
        } else {
            (lo, lo + 1.0)
        }
    }

    pub(super) fn unavailable_reason(&self) -> Option<&'static str> {
        if self.values.is_empty() {
            Some("No data points")
        } else if !valid_range(self.color_limits()) {
            Some("Invalid ranges")
        } else {
            None
        }
    }
}

/// Black or white, whichever reads better on `background`.
pub(super) fn contrasting_text(background: RGBColor) -> RGBColor {
    let RGBColor(r, g, b) = background;
    let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    if luminance < 128.0 {
        WHITE
    } else {
        BLACK
    }
}

pub(super) fn draw_heatmap_panel(
    area: &PlotArea,
    panel: &HeatmapPanel,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    let body = split_title(area, &panel.title, FONT_CHART_TITLE, theme)?;
    let limits = panel.color_limits();
    let scale = ColorScale::new(
        panel.colormap,
        limits,
        panel.colorbar_label.as_deref().unwrap_or(""),
    );
    let main = match &panel.colorbar_label {
        Some(_) => {
            let width = body.get_pixel_range().0.len() as u32;
            let (main, bar) = body.split_horizontally(width.saturating_sub(theme.px(COLORBAR_WIDTH_PX)));
            draw_colorbar(&bar, &scale, theme)?;
            main
        }
        None => body,
    };

    let (rows, cols) = panel.values.dim();
    let mut chart = ChartBuilder::on(&main)
        .margin(theme.px(CHART_MARGIN_PX))
        .x_label_area_size(theme.px(X_LABEL_AREA_PX))
        .y_label_area_size(theme.px(Y_LABEL_AREA_PX))
        .build_cartesian_2d(0.0..cols as f64, 0.0..rows as f64)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(0)
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .axis_desc_style(FONT_AXIS_LABEL.at(theme.dpi))
        .draw()?;

    let mut cells = Vec::with_capacity(rows * cols);
    for ((r, c), &v) in panel.values.indexed_iter() {
        let top = (rows - r) as f64;
        let color = scale.color(v);
        cells.push(Rectangle::new(
            [(c as f64, top - 1.0), (c as f64 + 1.0, top)],
            color.filled(),
        ));
    }
    chart.draw_series(cells)?;

    let base = main.get_base_pixel();
    let to_area = |p: (i32, i32)| (p.0 - base.0, p.1 - base.1);

    if panel.annotate {
        for ((r, c), &v) in panel.values.indexed_iter() {
            let centre = to_area(chart.backend_coord(&(c as f64 + 0.5, (rows - r) as f64 - 0.5)));
            let style = FONT_ANNOTATION
                .at(theme.dpi)
                .color(&contrasting_text(scale.color(v)))
                .pos(Pos::new(HPos::Center, VPos::Center));
            main.draw(&plotters::element::Text::new(format!("{v:.2}"), centre, style))?;
        }
    }

    let tick_row = theme.line_height(FONT_TICK_LABEL);
    let gap = theme.px(4.0) as i32;
    let col_style = FONT_TICK_LABEL
        .at(theme.dpi)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    let col_step = label_step(cols);
    for (c, label) in panel.col_labels.iter().enumerate().take(cols).step_by(col_step) {
        let (x, y) = to_area(chart.backend_coord(&(c as f64 + 0.5, 0.0)));
        draw_text_lines(&main, label, (x, y + gap), &col_style, tick_row)?;
    }
    let row_style = FONT_TICK_LABEL
        .at(theme.dpi)
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    let row_step = label_step(rows);
    for (r, label) in panel.row_labels.iter().enumerate().take(rows).step_by(row_step) {
        let (x, y) = to_area(chart.backend_coord(&(0.0, (rows - r) as f64 - 0.5)));
        draw_text_lines(&main, label, (x - gap, y), &row_style, tick_row)?;
    }
    Ok(())
}

/// Show every label up to 20 cells, then thin them out.
fn label_step(n: usize) -> usize {
    n.div_ceil(20).max(1)
}

/// Vertical colour scale with labelled ticks.
pub(super) fn draw_colorbar(
    area: &PlotArea,
    scale: &ColorScale,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    const STEPS: usize = 100;
    let (lo, hi) = scale.range;
    let mut chart = ChartBuilder::on(area)
        .margin_top(theme.px(CHART_MARGIN_PX * 2.0))
        .margin_bottom(theme.px(CHART_MARGIN_PX))
        .x_label_area_size(theme.px(X_LABEL_AREA_PX))
        .right_y_label_area_size(theme.px(COLORBAR_WIDTH_PX * 0.7))
        .build_cartesian_2d(0.0..1.0, lo..hi)?;

    let span = hi - lo;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(6)
        .y_desc(scale.label.as_str())
        .y_label_formatter(&|v| format_linear_tick(*v, span))
        .label_style(FONT_TICK_LABEL.at(theme.dpi))
        .axis_desc_style(FONT_AXIS_LABEL.at(theme.dpi))
        .draw()?;

    let step = span / STEPS as f64;
    chart.draw_series((0..STEPS).map(|i| {
        let v0 = lo + i as f64 * step;
        Rectangle::new([(0.0, v0), (1.0, v0 + step)], scale.color(v0 + step / 2.0).filled())
    }))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(0.0, lo), (1.0, hi)],
        BLACK.stroke_width(1),
    )))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_color_limits_default_to_data_range() {
        let panel = HeatmapPanel::new("t", array![[0.2, 0.4], [0.1, 0.9]], Colormap::YlOrRd);
        assert_eq!(panel.color_limits(), (0.1, 0.9));
        let fixed = panel.clone().value_range((0.0, 1.0));
        assert_eq!(fixed.color_limits(), (0.0, 1.0));
    }

    #[test]
    fn test_constant_matrix_gets_nonempty_limits() {
        let panel = HeatmapPanel::new("t", Array2::from_elem((2, 2), 0.5), Colormap::Viridis);
        assert_eq!(panel.color_limits(), (0.5, 1.5));
        assert_eq!(panel.unavailable_reason(), None);
    }

    #[test]
    fn test_default_tick_labels_are_indices() {
        let panel = HeatmapPanel::new("t", Array2::zeros((3, 2)), Colormap::Viridis);
        assert_eq!(panel.row_labels, vec!["0", "1", "2"]);
        assert_eq!(panel.col_labels, vec!["0", "1"]);
    }

    #[test]
    fn test_text_contrast() {
        assert_eq!(contrasting_text(RGBColor(0, 0, 0)), WHITE);
        assert_eq!(contrasting_text(RGBColor(255, 255, 200)), BLACK);
    }

    #[test]
    fn test_label_step() {
        assert_eq!(label_step(16), 1);
        assert_eq!(label_step(50), 3);
    }
}

// src/plot_framework/heatmap.rs
