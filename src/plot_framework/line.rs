// src/plot_framework/line.rs

use plotters::chart::{ChartBuilder, ChartContext};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{AsRangedCoord, Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::element::{Circle, EmptyElement, PathElement, Polygon, Rectangle};
use plotters::prelude::{BitMapBackend, IntoLogRange};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, RGBColor};

use std::error::Error;

use super::legend::glyph_parts;
use super::{
    draw_text_lines, format_tick, rescale, split_title, valid_range, AxisScale, LegendGlyph,
    LegendPosition, LineStyle, PlotArea, PlotSeries, Theme,
};
use crate::constants::{
    CHART_MARGIN_PX, COLOR_GRID, LEGEND_SWATCH_PX, X_LABEL_AREA_PX, Y_LABEL_AREA_PX,
};
use crate::font_config::{
    FONT_ANNOTATION, FONT_AXIS_LABEL, FONT_CHART_TITLE, FONT_LEGEND, FONT_TICK_LABEL,
};

/// Shaded region between a lower and an upper curve: `(x, lower, upper)`.
#[derive(Debug, Clone)]
pub struct Band {
    pub points: Vec<(f64, f64, f64)>,
    pub color: RGBColor,
    pub opacity: f64,
    pub label: String,
}

impl Band {
    pub fn new(points: Vec<(f64, f64, f64)>, color: RGBColor, opacity: f64) -> Self {
        Self {
            points,
            color,
            opacity,
            label: String::new(),
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Closed outline: upper curve left to right, then lower curve back.
    pub fn outline(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|&(x, _, hi)| (x, hi))
            .chain(self.points.iter().rev().map(|&(x, lo, _)| (x, lo)))
            .collect()
    }
}

/// Full-height vertical line (on line panels) or full-width horizontal line
/// (on bar panels).
#[derive(Debug, Clone)]
pub struct ReferenceLine {
    pub value: f64,
    pub color: RGBColor,
    pub line: LineStyle,
    pub label: String,
}

impl ReferenceLine {
    pub fn new(value: f64, color: RGBColor, line: LineStyle) -> Self {
        Self {
            value,
            color,
            line,
            label: String::new(),
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }
}

/// Placement of annotation text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextAnchor {
    /// Offset in points from the target, y up.
    Offset(i32, i32),
    /// Data coordinates.
    Data(f64, f64),
}

#[derive(Debug, Clone)]
pub struct Annotation {
    pub text: String,
    pub target: (f64, f64),
    pub anchor: TextAnchor,
    pub arrow: bool,
    pub color: RGBColor,
}

impl Annotation {
    /// Label next to a point.
    pub fn label(text: &str, target: (f64, f64), offset: (i32, i32)) -> Self {
        Self {
            text: text.to_string(),
            target,
            anchor: TextAnchor::Offset(offset.0, offset.1),
            arrow: false,
            color: BLACK,
        }
    }

    /// Text at `text_at` with an arrow pointing to `target`.
    pub fn arrow(text: &str, target: (f64, f64), text_at: (f64, f64)) -> Self {
        Self {
            text: text.to_string(),
            target,
            anchor: TextAnchor::Data(text_at.0, text_at.1),
            arrow: true,
            color: BLACK,
        }
    }

    /// Text centred at a data point, no arrow.
    pub fn text(text: &str, at: (f64, f64)) -> Self {
        Self {
            text: text.to_string(),
            target: at,
            anchor: TextAnchor::Data(at.0, at.1),
            arrow: false,
            color: BLACK,
        }
    }

    pub fn color(mut self, color: RGBColor) -> Self {
        self.color = color;
        self
    }
}

/// Right-hand y axis with its own range and series.
#[derive(Debug, Clone)]
pub struct SecondaryAxis {
    pub label: String,
    pub range: (f64, f64),
    pub series: Vec<PlotSeries>,
}

#[derive(Debug, Clone)]
pub struct LinePanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_scale: AxisScale,
    pub series: Vec<PlotSeries>,
    pub bands: Vec<Band>,
    pub vlines: Vec<ReferenceLine>,
    pub annotations: Vec<Annotation>,
    pub secondary: Option<SecondaryAxis>,
    pub legend: LegendPosition,
}

impl LinePanel {
    pub fn new(
        title: &str,
        x_label: &str,
        y_label: &str,
        x_range: (f64, f64),
        y_range: (f64, f64),
    ) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x_range,
            y_range,
            x_scale: AxisScale::Linear,
            series: Vec::new(),
            bands: Vec::new(),
            vlines: Vec::new(),
            annotations: Vec::new(),
            secondary: None,
            legend: LegendPosition::UpperLeft,
        }
    }

    pub fn log_x(mut self) -> Self {
        self.x_scale = AxisScale::Log;
        self
    }

    pub fn series(mut self, series: PlotSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn band(mut self, band: Band) -> Self {
        self.bands.push(band);
        self
    }

    pub fn vline(mut self, line: ReferenceLine) -> Self {
        self.vlines.push(line);
        self
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn secondary(mut self, label: &str, range: (f64, f64), series: Vec<PlotSeries>) -> Self {
        self.secondary = Some(SecondaryAxis {
            label: label.to_string(),
            range,
            series,
        });
        self
    }

    pub fn legend(mut self, position: LegendPosition) -> Self {
        self.legend = position;
        self
    }

    pub(super) fn unavailable_reason(&self) -> Option<&'static str> {
        let secondary_data = self
            .secondary
            .as_ref()
            .is_some_and(|s| s.series.iter().any(|s| !s.data.is_empty()));
        let has_data = self.series.iter().any(|s| !s.data.is_empty())
            || !self.bands.is_empty()
            || secondary_data;
        let log_ok = self.x_scale == AxisScale::Linear || self.x_range.0 > 0.0;
        if !has_data {
            Some("No data points")
        } else if !valid_range(self.x_range) || !valid_range(self.y_range) || !log_ok {
            Some("Invalid ranges")
        } else if self
            .secondary
            .as_ref()
            .is_some_and(|s| !valid_range(s.range))
        {
            Some("Invalid ranges")
        } else {
            None
        }
    }
}

/// Split a polyline into dashes of `pattern = (dash, gap)`, measured as
/// fractions of the unit square the axes span. With `log_x` distances along
/// x are measured in decades.
pub fn dash_segments(
    points: &[(f64, f64)],
    x_range: (f64, f64),
    y_range: (f64, f64),
    log_x: bool,
    pattern: (f64, f64),
) -> Vec<Vec<(f64, f64)>> {
    let fx = |x: f64| {
        if log_x {
            x.max(f64::MIN_POSITIVE).log10()
        } else {
            x
        }
    };
    let x_span = (fx(x_range.1) - fx(x_range.0)).abs().max(1e-12);
    let y_span = (y_range.1 - y_range.0).abs().max(1e-12);
    let lerp_x = |a: f64, b: f64, s: f64| {
        if log_x {
            10f64.powf(fx(a) + s * (fx(b) - fx(a)))
        } else {
            a + s * (b - a)
        }
    };
    let dash = pattern.0.max(1e-4);
    let gap = pattern.1.max(1e-4);

    let mut dashes = Vec::new();
    let mut current: Vec<(f64, f64)> = points.first().copied().into_iter().collect();
    let mut on = true;
    let mut remaining = dash;

    for w in points.windows(2) {
        let (p, q) = (w[0], w[1]);
        let dx = (fx(q.0) - fx(p.0)) / x_span;
        let dy = (q.1 - p.1) / y_span;
        let len = (dx * dx + dy * dy).sqrt();
        if !len.is_finite() || len == 0.0 {
            continue;
        }
        let mut t = 0.0;
        // Stop short of rounding residue so it cannot start a zero-length dash.
        while len - t > 1e-12 {
            let step = remaining.min(len - t);
            t += step;
            remaining -= step;
            let s = t / len;
            let point = (lerp_x(p.0, q.0, s), p.1 + s * (q.1 - p.1));
            if on {
                current.push(point);
            }
            if remaining <= 1e-12 {
                if on {
                    if current.len() >= 2 {
                        dashes.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                    remaining = gap;
                } else {
                    current.push(point);
                    remaining = dash;
                }
                on = !on;
            }
        }
    }
    if on && current.len() >= 2 {
        dashes.push(current);
    }
    dashes
}

/// Tick label for a linear axis spanning `span`.
pub(crate) fn format_linear_tick(value: f64, span: f64) -> String {
    if span <= 0.5 {
        format!("{value:.2}")
    } else if span <= 5.0 {
        format!("{value:.1}")
    } else {
        format_tick(value)
    }
}

pub(super) fn draw_line_panel(
    area: &PlotArea,
    panel: &LinePanel,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    let (x0, x1) = panel.x_range;
    match panel.x_scale {
        AxisScale::Linear => draw_line_chart(area, panel, theme, || x0..x1),
        AxisScale::Log => draw_line_chart(area, panel, theme, || (x0..x1).log_scale()),
    }
}

fn draw_line_chart<XS, F>(
    area: &PlotArea,
    panel: &LinePanel,
    theme: &Theme,
    make_x: F,
) -> Result<(), Box<dyn Error>>
where
    XS: AsRangedCoord<Value = f64>,
    XS::CoordDescType: ValueFormatter<f64>,
    F: Fn() -> XS,
{
    let body = split_title(area, &panel.title, FONT_CHART_TITLE, theme)?;
    let mut builder = ChartBuilder::on(&body);
    builder
        .margin(theme.px(CHART_MARGIN_PX))
        .x_label_area_size(theme.px(X_LABEL_AREA_PX))
        .y_label_area_size(theme.px(Y_LABEL_AREA_PX));
    if panel.secondary.is_some() {
        builder.right_y_label_area_size(theme.px(Y_LABEL_AREA_PX));
    }
    let mut chart = builder.build_cartesian_2d(make_x(), panel.y_range.0..panel.y_range.1)?;

    let log_x = panel.x_scale == AxisScale::Log;
    let x_span = panel.x_range.1 - panel.x_range.0;
    let y_span = panel.y_range.1 - panel.y_range.0;
    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .x_labels(if log_x { 12 } else { 8 })
        .y_labels(8)
        .x_label_formatter(&|x| {
            if log_x {
                format_tick(*x)
            } else {
                format_linear_tick(*x, x_span)
            }
        })
        .y_label_formatter(&|y| format_linear_tick(*y, y_span))
        .light_line_style(WHITE.mix(0.7))
        .bold_line_style(COLOR_GRID.mix(0.6))
        .label_style(FONT_TICK_LABEL.at(theme.dpi))
        .axis_desc_style(FONT_AXIS_LABEL.at(theme.dpi))
        .draw()?;

    match &panel.secondary {
        Some(secondary) => {
            let s_span = secondary.range.1 - secondary.range.0;
            let mut dual =
                chart.set_secondary_coord(make_x(), secondary.range.0..secondary.range.1);
            dual.configure_secondary_axes()
                .y_desc(secondary.label.as_str())
                .y_labels(8)
                .y_label_formatter(&|y| format_linear_tick(*y, s_span))
                .label_style(FONT_TICK_LABEL.at(theme.dpi))
                .axis_desc_style(FONT_AXIS_LABEL.at(theme.dpi))
                .draw()?;
            draw_line_content(&body, &mut *dual, panel, theme)
        }
        None => draw_line_content(&body, &mut chart, panel, theme),
    }
}

/// Secondary-axis series expressed in primary y coordinates.
fn map_to_primary(series: &PlotSeries, from: (f64, f64), to: (f64, f64)) -> PlotSeries {
    let mut mapped = series.clone();
    mapped.data = series
        .data
        .iter()
        .map(|&(x, y)| (x, rescale(y, from, to)))
        .collect();
    mapped
}

fn draw_line_content<'a, X>(
    area: &PlotArea,
    chart: &mut ChartContext<'a, BitMapBackend<'a>, Cartesian2d<X, RangedCoordf64>>,
    panel: &LinePanel,
    theme: &Theme,
) -> Result<(), Box<dyn Error>>
where
    X: Ranged<ValueType = f64>,
{
    let log_x = panel.x_scale == AxisScale::Log;
    let swatch = theme.px(LEGEND_SWATCH_PX) as i32;
    let mut legend_series_count = 0;

    for band in &panel.bands {
        if band.points.len() < 2 {
            continue;
        }
        let fill = band.color.mix(band.opacity);
        let anno = chart.draw_series(std::iter::once(Polygon::new(band.outline(), fill.filled())))?;
        if !band.label.is_empty() {
            anno.label(band.label.as_str()).legend(move |(x, y)| {
                Rectangle::new([(x, y - swatch / 3), (x + swatch, y + swatch / 3)], fill.filled())
            });
            legend_series_count += 1;
        }
    }

    for vline in &panel.vlines {
        let path = vec![(vline.value, panel.y_range.0), (vline.value, panel.y_range.1)];
        let as_series = PlotSeries::new(path, &vline.label, vline.color)
            .line(vline.line)
            .stroke_width(crate::constants::LINE_WIDTH_THIN);
        if draw_series_with_legend(chart, &as_series, panel, log_x, theme)? {
            legend_series_count += 1;
        }
    }

    let mut all_series: Vec<PlotSeries> = panel.series.clone();
    if let Some(secondary) = &panel.secondary {
        all_series.extend(
            secondary
                .series
                .iter()
                .map(|s| map_to_primary(s, secondary.range, panel.y_range)),
        );
    }
    for s in &all_series {
        if draw_series_with_legend(chart, s, panel, log_x, theme)? {
            legend_series_count += 1;
        }
    }

    draw_annotations(area, chart, &panel.annotations, theme)?;

    if let Some(position) = panel.legend.to_plotters() {
        if legend_series_count > 0 {
            chart
                .configure_series_labels()
                .position(position)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .legend_area_size(swatch * 2)
                .label_font(FONT_LEGEND.at(theme.dpi))
                .draw()?;
        }
    }
    Ok(())
}

/// Draw one series (line, dashes and markers) and register its legend entry.
/// Returns whether a legend entry was added.
fn draw_series_with_legend<'a, X>(
    chart: &mut ChartContext<'a, BitMapBackend<'a>, Cartesian2d<X, RangedCoordf64>>,
    s: &PlotSeries,
    panel: &LinePanel,
    log_x: bool,
    theme: &Theme,
) -> Result<bool, Box<dyn Error>>
where
    X: Ranged<ValueType = f64>,
{
    let stroke = theme.stroke(s.stroke_width);
    let style = s.color.stroke_width(stroke);
    if s.data.len() >= 2 {
        match (s.line, s.line.pattern()) {
            (LineStyle::None, _) => {}
            (_, None) => {
                chart.draw_series(LineSeries::new(s.data.iter().copied(), style))?;
            }
            (_, Some(pattern)) => {
                let dashes = dash_segments(&s.data, panel.x_range, panel.y_range, log_x, pattern);
                chart.draw_series(dashes.into_iter().map(|d| PathElement::new(d, style)))?;
            }
        }
    }
    if let Some(marker) = s.marker {
        let outline = marker.vertices(theme.default_marker_radius());
        let fill = s.color.filled();
        chart.draw_series(
            s.data
                .iter()
                .map(|&p| EmptyElement::at(p) + Polygon::new(outline.clone(), fill)),
        )?;
    }

    if s.label.is_empty() {
        return Ok(false);
    }
    let anchor = s
        .data
        .first()
        .copied()
        .unwrap_or((panel.x_range.0, panel.y_range.0));
    let glyph: LegendGlyph = s.glyph();
    let parts = glyph_parts(glyph, s.color, theme);
    chart
        .draw_series(std::iter::once(Circle::new(anchor, 0, s.color.filled())))?
        .label(s.label.as_str())
        .legend(move |(x, y)| {
            EmptyElement::at((x, y))
                + PathElement::new(parts.line.clone(), parts.line_style)
                + Polygon::new(parts.outline.clone(), parts.fill)
        });
    Ok(true)
}

/// Draw text annotations (and arrows) in pixel space over a chart.
pub(super) fn draw_annotations<X>(
    area: &PlotArea,
    chart: &ChartContext<'_, BitMapBackend<'_>, Cartesian2d<X, RangedCoordf64>>,
    annotations: &[Annotation],
    theme: &Theme,
) -> Result<(), Box<dyn Error>>
where
    X: Ranged<ValueType = f64>,
{
    let base = area.get_base_pixel();
    let line_height = theme.line_height(FONT_ANNOTATION);
    for a in annotations {
        let target = chart.backend_coord(&a.target);
        let target = (target.0 - base.0, target.1 - base.1);
        let (text_at, pos) = match a.anchor {
            TextAnchor::Offset(dx, dy) => (
                (
                    target.0 + theme.points_to_px(dx as f64),
                    target.1 - theme.points_to_px(dy as f64),
                ),
                Pos::new(HPos::Left, VPos::Center),
            ),
            TextAnchor::Data(x, y) => {
                let p = chart.backend_coord(&(x, y));
                ((p.0 - base.0, p.1 - base.1), Pos::new(HPos::Center, VPos::Center))
            }
        };
        if a.arrow {
            draw_arrow(area, text_at, target, a.color, theme)?;
        }
        let n_lines = a.text.lines().count().max(1) as i32;
        let top = text_at.1 - (n_lines - 1) * line_height / 2;
        let style = FONT_ANNOTATION.at(theme.dpi).color(&a.color).pos(pos);
        draw_text_lines(area, &a.text, (text_at.0, top), &style, line_height)?;
    }
    Ok(())
}

/// Straight arrow from `from` to `to` in pixel space, head at `to`.
fn draw_arrow(
    area: &PlotArea,
    from: (i32, i32),
    to: (i32, i32),
    color: RGBColor,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    let (dx, dy) = ((to.0 - from.0) as f64, (to.1 - from.1) as f64);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1.0 {
        return Ok(());
    }
    let (ux, uy) = (dx / len, dy / len);
    let head = theme.px(8.0) as f64;
    // Leave room around the text.
    let start_gap = (theme.px(12.0) as f64).min(len / 3.0);
    let start = (
        (from.0 as f64 + ux * start_gap).round() as i32,
        (from.1 as f64 + uy * start_gap).round() as i32,
    );
    let base = (to.0 as f64 - ux * head, to.1 as f64 - uy * head);
    let (px, py) = (-uy * head / 2.0, ux * head / 2.0);
    area.draw(&PathElement::new(
        vec![start, (base.0.round() as i32, base.1.round() as i32)],
        color.stroke_width(theme.stroke(crate::constants::LINE_WIDTH_THIN)),
    ))?;
    area.draw(&Polygon::new(
        vec![
            to,
            ((base.0 + px).round() as i32, (base.1 + py).round() as i32),
            ((base.0 - px).round() as i32, (base.1 - py).round() as i32),
        ],
        color.filled(),
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot_framework::{draw_single_panel, Panel};
    use plotters::style::colors::BLUE;

    #[test]
    fn test_dash_segments_on_straight_line() {
        let dashes = dash_segments(&[(0.0, 0.0), (1.0, 0.0)], (0.0, 1.0), (0.0, 1.0), false, (0.1, 0.1));
        assert_eq!(dashes.len(), 5);
        let first = &dashes[0];
        assert!((first[0].0 - 0.0).abs() < 1e-9);
        assert!((first[first.len() - 1].0 - 0.1).abs() < 1e-9);
        assert!((dashes[1][0].0 - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_dash_segments_follow_log_axis() {
        // One decade per unit: the first dash ends at 10^0.1 of the start.
        let dashes = dash_segments(&[(1.0, 0.0), (10.0, 0.0)], (1.0, 10.0), (0.0, 1.0), true, (0.1, 0.1));
        assert_eq!(dashes.len(), 5);
        let end = dashes[0].last().map(|p| p.0).unwrap_or(0.0);
        assert!((end - 10f64.powf(0.1)).abs() < 1e-9);
    }

    #[test]
    fn test_dash_segments_have_no_rounding_residue() {
        let dashes = dash_segments(&[(0.0, 0.0), (1.0, 0.0)], (0.0, 1.0), (0.0, 1.0), false, (0.1, 0.1));
        for dash in &dashes {
            let span = dash[dash.len() - 1].0 - dash[0].0;
            assert!(span > 0.05, "dash of length {span}");
        }
        let last = dashes.last().map(|d| d[d.len() - 1].0).unwrap_or(0.0);
        assert!((last - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_legended_panel_renders_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("line.png");
        let panel = LinePanel::new("Line", "x", "y", (0.0, 1.0), (0.0, 1.0))
            .series(PlotSeries::new(vec![(0.0, 0.1), (1.0, 0.9)], "solid", BLUE))
            .series(
                PlotSeries::new(vec![(0.0, 0.9), (1.0, 0.1)], "dashed", BLUE)
                    .line(LineStyle::Dashed),
            )
            .legend(LegendPosition::UpperRight);
        draw_single_panel(&path, (4.0, 3.0), 60, Panel::Line(panel)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_dash_segments_degenerate_input() {
        assert!(dash_segments(&[], (0.0, 1.0), (0.0, 1.0), false, (0.1, 0.1)).is_empty());
        assert!(dash_segments(&[(0.5, 0.5)], (0.0, 1.0), (0.0, 1.0), false, (0.1, 0.1)).is_empty());
    }

    #[test]
    fn test_band_outline_is_closed_loop() {
        let band = Band::new(vec![(0.0, 0.1, 0.3), (1.0, 0.2, 0.4)], BLUE, 0.2);
        assert_eq!(band.outline(), vec![(0.0, 0.3), (1.0, 0.4), (1.0, 0.2), (0.0, 0.1)]);
    }

    #[test]
    fn test_secondary_mapping() {
        let s = PlotSeries::new(vec![(1.0, 0.6), (2.0, 0.0)], "u", BLUE);
        let mapped = map_to_primary(&s, (0.0, 0.6), (0.0, 0.5));
        assert_eq!(mapped.data, vec![(1.0, 0.5), (2.0, 0.0)]);
    }

    #[test]
    fn test_unavailable_reasons() {
        let empty = LinePanel::new("t", "x", "y", (0.0, 1.0), (0.0, 1.0));
        assert_eq!(empty.unavailable_reason(), Some("No data points"));
        let bad_log = LinePanel::new("t", "x", "y", (0.0, 1.0), (0.0, 1.0))
            .log_x()
            .series(PlotSeries::new(vec![(0.5, 0.5)], "", BLUE));
        assert_eq!(bad_log.unavailable_reason(), Some("Invalid ranges"));
        let ok = LinePanel::new("t", "x", "y", (0.1, 1.0), (0.0, 1.0))
            .log_x()
            .series(PlotSeries::new(vec![(0.5, 0.5)], "", BLUE));
        assert_eq!(ok.unavailable_reason(), None);
    }

    #[test]
    fn test_linear_tick_precision() {
        assert_eq!(format_linear_tick(0.25, 0.5), "0.25");
        assert_eq!(format_linear_tick(0.2, 1.0), "0.2");
        assert_eq!(format_linear_tick(2000.0, 5000.0), "2k");
    }
}

// src/plot_framework/line.rs
