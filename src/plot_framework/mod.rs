// src/plot_framework/mod.rs

//! Panel-based drawing on the plotters bitmap backend.
//!
//! A figure is a grid of [`Panel`]s. Each figure module builds plain panel
//! descriptions and hands them to [`draw_panel_grid`], which owns the PNG
//! file, the optional figure title and the per-panel "Data Unavailable"
//! fallback.

mod bar;
mod heatmap;
mod legend;
mod line;
mod scatter;
mod three_d;

use plotters::backend::BitMapBackend;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::Text;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{RGBColor, TextStyle};
use tracing::{debug, info};

use std::error::Error;
use std::fs;
use std::path::Path;

use crate::constants::{LAYOUT_REFERENCE_DPI, MAIN_TITLE_AREA_PX, MARKER_SIZE};
use crate::font_config::{FontStyle, FONT_MAIN_TITLE, FONT_MESSAGE};

pub use bar::BarPanel;
pub use heatmap::HeatmapPanel;
pub use legend::{LegendEntry, LegendGlyph, LegendGroup, LegendPanel};
pub use line::{Annotation, Band, LinePanel, ReferenceLine, SecondaryAxis, TextAnchor};
pub use scatter::{radius_from_area, ScatterPanel, ScatterPoint, ViolinPanel};
pub use three_d::{Axes3d, Point3, Scatter3dPanel, SurfacePanel, View};

pub type PlotArea<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Multiplicative padding for a log axis: one fifth of a decade on each side.
pub fn calculate_log_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let lo = min_val.min(max_val).max(f64::MIN_POSITIVE);
    let hi = max_val.max(min_val).max(lo);
    let pad = 10f64.powf(0.2);
    (lo / pad, hi * pad)
}

/// Pixel size of a figure of `size_in` inches at `dpi`.
pub fn figure_pixels(size_in: (f64, f64), dpi: u32) -> (u32, u32) {
    let scale = dpi as f64;
    (
        (size_in.0 * scale).round().max(1.0) as u32,
        (size_in.1 * scale).round().max(1.0) as u32,
    )
}

/// Tick label for values spanning several decades: `1k`, `10M`, `0.08`.
pub fn format_tick(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, "G")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "k")
    } else {
        (value, "")
    };
    let text = if scaled.fract().abs() < 1e-9 {
        format!("{scaled:.0}")
    } else if scaled.abs() >= 10.0 {
        format!("{scaled:.1}")
    } else {
        let s = format!("{scaled:.3}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    };
    format!("{text}{suffix}")
}

/// Linear map of `value` from one interval onto another.
pub fn rescale(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let span = from.1 - from.0;
    if span.abs() < f64::EPSILON {
        return to.0;
    }
    to.0 + (value - from.0) / span * (to.1 - to.0)
}

/// Sizing of every drawn element for one output resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub dpi: u32,
}

impl Theme {
    pub fn new(dpi: u32) -> Self {
        Self { dpi: dpi.max(1) }
    }

    /// Layout pixels tuned at the reference DPI, scaled to this DPI.
    pub fn px(&self, layout_px: f64) -> u32 {
        (layout_px * self.dpi as f64 / LAYOUT_REFERENCE_DPI).round() as u32
    }

    /// Stroke width in pixels for a width in points; at least one pixel.
    pub fn stroke(&self, pt: f64) -> u32 {
        ((pt * self.dpi as f64 / 72.0).round() as u32).max(1)
    }

    /// Radius in pixels for a marker size in points.
    pub fn marker_radius(&self, pt: f64) -> i32 {
        ((pt * self.dpi as f64 / 72.0).round() as i32).max(1)
    }

    /// Signed pixel distance for a distance in points.
    pub fn points_to_px(&self, pt: f64) -> i32 {
        (pt * self.dpi as f64 / 72.0).round() as i32
    }

    pub fn default_marker_radius(&self) -> i32 {
        self.marker_radius(MARKER_SIZE)
    }

    pub fn text(&self, font: FontStyle) -> TextStyle<'static> {
        font.at(self.dpi).color(&BLACK)
    }

    pub fn line_height(&self, font: FontStyle) -> i32 {
        (font.px(self.dpi) * 1.25).round() as i32
    }
}

/// Stroke pattern of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    None,
}

impl LineStyle {
    /// Dash and gap lengths as fractions of the plot diagonal.
    pub fn pattern(self) -> Option<(f64, f64)> {
        match self {
            LineStyle::Dashed => Some((0.025, 0.012)),
            LineStyle::Dotted => Some((0.005, 0.01)),
            LineStyle::Solid | LineStyle::None => None,
        }
    }
}

/// Point marker shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    TriangleUp,
    TriangleDown,
    TriangleLeft,
    Diamond,
    Cross,
    Plus,
    Hexagon,
}

impl Marker {
    /// Marker cycle used when every model gets its own shape.
    pub const CYCLE: [Marker; 9] = [
        Marker::Circle,
        Marker::Square,
        Marker::TriangleDown,
        Marker::TriangleUp,
        Marker::TriangleLeft,
        Marker::Diamond,
        Marker::Cross,
        Marker::Plus,
        Marker::Hexagon,
    ];

    /// Outline in pixel offsets around the marker centre for radius `r`.
    pub fn vertices(self, r: i32) -> Vec<(i32, i32)> {
        let r = r as f64;
        let polar = |n: usize, phase: f64, radius: f64| -> Vec<(f64, f64)> {
            (0..n)
                .map(|i| {
                    let a = phase + i as f64 * std::f64::consts::TAU / n as f64;
                    (radius * a.cos(), radius * a.sin())
                })
                .collect()
        };
        let arm = r / 3.0;
        let plus = vec![
            (-arm, -r),
            (arm, -r),
            (arm, -arm),
            (r, -arm),
            (r, arm),
            (arm, arm),
            (arm, r),
            (-arm, r),
            (-arm, arm),
            (-r, arm),
            (-r, -arm),
            (-arm, -arm),
        ];
        let outline: Vec<(f64, f64)> = match self {
            Marker::Circle => polar(16, 0.0, r),
            Marker::Square => {
                let h = r * 0.85;
                vec![(-h, -h), (h, -h), (h, h), (-h, h)]
            }
            // Pixel y grows downwards.
            Marker::TriangleUp => polar(3, -std::f64::consts::FRAC_PI_2, r),
            Marker::TriangleDown => polar(3, std::f64::consts::FRAC_PI_2, r),
            Marker::TriangleLeft => polar(3, std::f64::consts::PI, r),
            Marker::Diamond => vec![(0.0, -r), (r * 0.7, 0.0), (0.0, r), (-r * 0.7, 0.0)],
            Marker::Hexagon => polar(6, -std::f64::consts::FRAC_PI_2, r),
            Marker::Plus => plus,
            Marker::Cross => {
                let (s, c) = std::f64::consts::FRAC_PI_4.sin_cos();
                plus.into_iter()
                    .map(|(x, y)| (x * c - y * s, x * s + y * c))
                    .collect()
            }
        };
        outline
            .into_iter()
            .map(|(x, y)| (x.round() as i32, y.round() as i32))
            .collect()
    }
}

/// Continuous colour maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colormap {
    Viridis,
    YlOrRd,
}

impl Colormap {
    /// Colour at `t` in `[0, 1]`; out-of-range input is clamped.
    pub fn at(self, t: f64) -> RGBColor {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let color = match self {
            Colormap::Viridis => colorous::VIRIDIS.eval_continuous(t),
            Colormap::YlOrRd => colorous::YELLOW_ORANGE_RED.eval_continuous(t),
        };
        RGBColor(color.r, color.g, color.b)
    }
}

/// Map `value` within `[min, max]` onto `colormap`.
pub fn map_value_to_color(value: f64, min: f64, max: f64, colormap: Colormap) -> RGBColor {
    if !value.is_finite() || !min.is_finite() || !max.is_finite() {
        return RGBColor(0, 0, 0);
    }
    let span = (max - min).abs().max(1e-9);
    let t = ((value.clamp(min.min(max), max.max(min)) - min) / span).clamp(0.0, 1.0);
    colormap.at(t)
}

/// Colour scale shared by colour-mapped points and their colorbar.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    pub colormap: Colormap,
    pub range: (f64, f64),
    pub label: String,
}

impl ColorScale {
    pub fn new(colormap: Colormap, range: (f64, f64), label: &str) -> Self {
        Self {
            colormap,
            range,
            label: label.to_string(),
        }
    }

    pub fn color(&self, value: f64) -> RGBColor {
        map_value_to_color(value, self.range.0, self.range.1, self.colormap)
    }
}

/// How a point gets its colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointFill {
    Solid(RGBColor),
    /// Value looked up in the panel's colour scale.
    Mapped(f64),
}

/// Axis scaling of the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log,
}

/// Where a panel places its series legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
    Hidden,
}

impl LegendPosition {
    fn to_plotters(self) -> Option<plotters::chart::SeriesLabelPosition> {
        use plotters::chart::SeriesLabelPosition;
        match self {
            LegendPosition::UpperLeft => Some(SeriesLabelPosition::UpperLeft),
            LegendPosition::UpperRight => Some(SeriesLabelPosition::UpperRight),
            LegendPosition::LowerLeft => Some(SeriesLabelPosition::LowerLeft),
            LegendPosition::LowerRight => Some(SeriesLabelPosition::LowerRight),
            LegendPosition::Hidden => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlotSeries {
    pub data: Vec<(f64, f64)>,
    pub label: String,
    pub color: RGBColor,
    /// Stroke width in points.
    pub stroke_width: f64,
    pub line: LineStyle,
    pub marker: Option<Marker>,
}

impl PlotSeries {
    pub fn new(data: Vec<(f64, f64)>, label: &str, color: RGBColor) -> Self {
        Self {
            data,
            label: label.to_string(),
            color,
            stroke_width: crate::constants::LINE_WIDTH_PLOT,
            line: LineStyle::Solid,
            marker: None,
        }
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn line(mut self, line: LineStyle) -> Self {
        self.line = line;
        self
    }

    pub fn stroke_width(mut self, pt: f64) -> Self {
        self.stroke_width = pt;
        self
    }

    fn glyph(&self) -> LegendGlyph {
        match (self.line, self.marker) {
            (LineStyle::None, Some(m)) => LegendGlyph::Marker(m),
            (line, Some(m)) => LegendGlyph::LineMarker(line, m),
            (line, None) => LegendGlyph::Line(line),
        }
    }
}

/// One cell of a figure grid.
#[derive(Debug, Clone)]
pub enum Panel {
    Line(LinePanel),
    Bar(BarPanel),
    Heatmap(HeatmapPanel),
    Scatter(ScatterPanel),
    Violin(ViolinPanel),
    Surface(SurfacePanel),
    Scatter3d(Scatter3dPanel),
    Legend(LegendPanel),
}

impl Panel {
    pub fn title(&self) -> &str {
        match self {
            Panel::Line(p) => &p.title,
            Panel::Bar(p) => &p.title,
            Panel::Heatmap(p) => &p.title,
            Panel::Scatter(p) => &p.title,
            Panel::Violin(p) => &p.title,
            Panel::Surface(p) => &p.title,
            Panel::Scatter3d(p) => &p.title,
            Panel::Legend(p) => &p.title,
        }
    }

    /// Reason the panel cannot be drawn, if any.
    pub fn unavailable_reason(&self) -> Option<&'static str> {
        match self {
            Panel::Line(p) => p.unavailable_reason(),
            Panel::Bar(p) => p.unavailable_reason(),
            Panel::Heatmap(p) => p.unavailable_reason(),
            Panel::Scatter(p) => p.unavailable_reason(),
            Panel::Violin(p) => p.unavailable_reason(),
            Panel::Surface(p) => p.unavailable_reason(),
            Panel::Scatter3d(p) => p.unavailable_reason(),
            Panel::Legend(p) => p.unavailable_reason(),
        }
    }
}

pub(crate) fn valid_range(range: (f64, f64)) -> bool {
    range.0.is_finite() && range.1.is_finite() && range.1 > range.0
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &PlotArea,
    panel_name: &str,
    reason: &str,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (x_range.end - x_range.start, y_range.end - y_range.start);
    let message = if panel_name.is_empty() {
        format!("Data Unavailable:\n{reason}")
    } else {
        format!("{} Data Unavailable:\n{reason}", panel_name.replace('\n', " "))
    };
    let style = FONT_MESSAGE
        .at(theme.dpi)
        .color(&RED)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let line_height = theme.line_height(FONT_MESSAGE);
    let lines: Vec<&str> = message.lines().collect();
    let top = height / 2 - (lines.len() as i32 - 1) * line_height / 2;
    for (i, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.to_string(),
            (width / 2, top + i as i32 * line_height),
            style.clone(),
        ))?;
    }
    Ok(())
}

/// Draw `text` line by line, each line anchored at `pos`.
pub(crate) fn draw_text_lines(
    area: &PlotArea,
    text: &str,
    origin: (i32, i32),
    style: &TextStyle,
    line_height: i32,
) -> Result<(), Box<dyn Error>> {
    for (i, line) in text.lines().enumerate() {
        area.draw(&Text::new(
            line.to_string(),
            (origin.0, origin.1 + i as i32 * line_height),
            style.clone(),
        ))?;
    }
    Ok(())
}

/// Split off a title strip sized for the number of title lines and draw the
/// title centred in it. Returns the remaining area.
pub(crate) fn split_title<'a>(
    area: &PlotArea<'a>,
    title: &str,
    font: FontStyle,
    theme: &Theme,
) -> Result<PlotArea<'a>, Box<dyn Error>> {
    let n_lines = title.lines().count() as i32;
    if n_lines == 0 {
        return Ok(area.margin(theme.px(8.0), 0, 0, 0));
    }
    let line_height = theme.line_height(font);
    let strip = line_height * n_lines + theme.px(8.0) as i32;
    let (head, body) = area.split_vertically(strip);
    let width = head.get_pixel_range().0.len() as i32;
    let style = font
        .at(theme.dpi)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    draw_text_lines(&head, title, (width / 2, theme.px(4.0) as i32), &style, line_height)?;
    Ok(body)
}

/// Draw one panel into its area, or the unavailable message if its data
/// cannot be drawn.
pub fn draw_panel(area: &PlotArea, panel: &Panel, theme: &Theme) -> Result<bool, Box<dyn Error>> {
    if let Some(reason) = panel.unavailable_reason() {
        draw_unavailable_message(area, panel.title(), reason, theme)?;
        return Ok(false);
    }
    match panel {
        Panel::Line(p) => line::draw_line_panel(area, p, theme)?,
        Panel::Bar(p) => bar::draw_bar_panel(area, p, theme)?,
        Panel::Heatmap(p) => heatmap::draw_heatmap_panel(area, p, theme)?,
        Panel::Scatter(p) => scatter::draw_scatter_panel(area, p, theme)?,
        Panel::Violin(p) => scatter::draw_violin_panel(area, p, theme)?,
        Panel::Surface(p) => three_d::draw_surface_panel(area, p, theme)?,
        Panel::Scatter3d(p) => three_d::draw_scatter3d_panel(area, p, theme)?,
        Panel::Legend(p) => legend::draw_legend_panel(area, p, theme)?,
    }
    Ok(true)
}

/// Render a `rows x cols` grid of panels into a PNG of `size_in` inches.
///
/// `get_panel` is called once per cell in row-major order; `None` draws the
/// unavailable message in that cell. The parent directory of `output` is
/// created when missing.
pub fn draw_panel_grid<F>(
    output: &Path,
    title: Option<&str>,
    grid: (usize, usize),
    size_in: (f64, f64),
    dpi: u32,
    mut get_panel: F,
) -> Result<(), Box<dyn Error>>
where
    F: FnMut(usize) -> Option<Panel>,
{
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let theme = Theme::new(dpi);
    let root_area = BitMapBackend::new(output, figure_pixels(size_in, dpi)).into_drawing_area();
    root_area.fill(&WHITE)?;

    let body = match title {
        Some(text) => {
            let n_lines = text.lines().count().max(1) as u32;
            let strip = theme.px(MAIN_TITLE_AREA_PX) * n_lines;
            let (head, body) = root_area.split_vertically(strip);
            let width = head.get_pixel_range().0.len() as i32;
            let style = FONT_MAIN_TITLE
                .at(dpi)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top));
            draw_text_lines(
                &head,
                text,
                (width / 2, theme.px(8.0) as i32),
                &style,
                theme.line_height(FONT_MAIN_TITLE),
            )?;
            body
        }
        None => root_area.margin(0, 0, 0, 0),
    };

    let (rows, cols) = (grid.0.max(1), grid.1.max(1));
    let sub_plot_areas = body.split_evenly((rows, cols));
    let mut drawn = 0usize;
    for (index, area) in sub_plot_areas.iter().enumerate() {
        match get_panel(index) {
            Some(panel) => {
                if draw_panel(area, &panel, &theme)? {
                    drawn += 1;
                } else {
                    debug!(panel = index, title = panel.title(), "panel has no drawable data");
                }
            }
            None => {
                draw_unavailable_message(area, "", "Calculation/Data Extraction Failed", &theme)?;
            }
        }
    }

    root_area.present()?;
    if drawn > 0 {
        info!(output = %output.display(), panels = drawn, "figure saved");
    } else {
        info!(output = %output.display(), "figure saved with placeholder messages only");
    }
    Ok(())
}

/// Single-panel figure.
pub fn draw_single_panel(
    output: &Path,
    size_in: (f64, f64),
    dpi: u32,
    panel: Panel,
) -> Result<(), Box<dyn Error>> {
    let mut panel = Some(panel);
    draw_panel_grid(output, None, (1, 1), size_in, dpi, move |_| panel.take())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_range_pads_fifteen_percent() {
        let (lo, hi) = calculate_range(0.0, 1.0);
        assert!((lo + 0.15).abs() < 1e-12);
        assert!((hi - 1.15).abs() < 1e-12);
        assert_eq!(calculate_range(2.0, 2.0), (1.5, 2.5));
        assert_eq!(calculate_range(1.0, 0.0), calculate_range(0.0, 1.0));
    }

    #[test]
    fn test_log_range_stays_positive() {
        let (lo, hi) = calculate_log_range(82.0, 7000.0);
        assert!(lo > 0.0 && lo < 82.0);
        assert!(hi > 7000.0);
    }

    #[test]
    fn test_figure_pixels() {
        assert_eq!(figure_pixels((15.0, 5.0), 300), (4500, 1500));
        assert_eq!(figure_pixels((6.4, 4.8), 100), (640, 480));
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(1000.0), "1k");
        assert_eq!(format_tick(1_000_000_000.0), "1G");
        assert_eq!(format_tick(20_000_000.0), "20M");
        assert_eq!(format_tick(0.082), "0.082");
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(7.0), "7");
    }

    #[test]
    fn test_rescale() {
        assert_eq!(rescale(0.5, (0.0, 1.0), (0.0, 10.0)), 5.0);
        assert_eq!(rescale(0.3, (0.0, 0.6), (0.0, 0.5)), 0.25);
        assert_eq!(rescale(3.0, (1.0, 1.0), (2.0, 4.0)), 2.0);
    }

    #[test]
    fn test_theme_scaling() {
        let theme = Theme::new(300);
        assert_eq!(theme.px(10.0), 30);
        assert_eq!(theme.stroke(0.1), 1);
        assert_eq!(Theme::new(72).stroke(2.0), 2);
    }

    #[test]
    fn test_marker_outlines() {
        for marker in Marker::CYCLE {
            let v = marker.vertices(10);
            assert!(v.len() >= 3, "{marker:?}");
            assert!(v.iter().all(|&(x, y)| x.abs() <= 10 && y.abs() <= 10), "{marker:?}");
        }
        // Apex of an upward triangle is above the centre in pixel space.
        let up = Marker::TriangleUp.vertices(10);
        assert_eq!(up[0], (0, -10));
    }

    #[test]
    fn test_colormap_endpoints() {
        assert_eq!(map_value_to_color(f64::NAN, 0.0, 1.0, Colormap::Viridis), RGBColor(0, 0, 0));
        assert_eq!(
            map_value_to_color(-5.0, 0.0, 1.0, Colormap::Viridis),
            Colormap::Viridis.at(0.0)
        );
        assert_eq!(
            map_value_to_color(5.0, 0.0, 1.0, Colormap::YlOrRd),
            Colormap::YlOrRd.at(1.0)
        );
    }
}

// src/plot_framework/mod.rs
