// src/plot_framework/scatter.rs

use plotters::chart::{ChartBuilder, ChartContext};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{AsRangedCoord, Ranged, ValueFormatter};
use plotters::coord::types::RangedCoordf64;
use plotters::element::{EmptyElement, PathElement, Polygon};
use plotters::prelude::{BitMapBackend, IntoLogRange};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, RGBColor};

use std::error::Error;

use super::heatmap::draw_colorbar;
use super::legend::draw_legend_groups;
use super::line::{draw_annotations, format_linear_tick};
use super::{
    calculate_range, draw_text_lines, format_tick, split_title, valid_range, Annotation,
    AxisScale, ColorScale, LegendGroup, LineStyle, Marker, PlotArea, PlotSeries, PointFill, Theme,
};
use crate::constants::{
    CATEGORY_LABEL_AREA_PX, CHART_MARGIN_PX, COLORBAR_WIDTH_PX, COLOR_GRID, LINE_WIDTH_PLOT,
    LINE_WIDTH_THIN, MARKER_SIZE, X_LABEL_AREA_PX, Y_LABEL_AREA_PX,
};
use crate::data_analysis::distribution::gaussian_kde;
use crate::font_config::{FONT_AXIS_LABEL, FONT_CHART_TITLE, FONT_TICK_LABEL};

/// Marker radius in points for a marker area given in square points.
pub fn radius_from_area(area_pt2: f64) -> f64 {
    area_pt2.max(0.0).sqrt() / 2.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Marker radius in points.
    pub size: f64,
    pub fill: PointFill,
    pub marker: Marker,
    pub opacity: f64,
}

impl ScatterPoint {
    pub fn new(x: f64, y: f64, fill: PointFill) -> Self {
        Self {
            x,
            y,
            size: MARKER_SIZE,
            fill,
            marker: Marker::Circle,
            opacity: 1.0,
        }
    }

    pub fn size(mut self, radius_pt: f64) -> Self {
        self.size = radius_pt;
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Free-standing points with per-point size, shape and colour.
#[derive(Debug, Clone)]
pub struct ScatterPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub x_scale: AxisScale,
    pub points: Vec<ScatterPoint>,
    /// Lines drawn under the points.
    pub series: Vec<PlotSeries>,
    pub color_scale: Option<ColorScale>,
    pub show_colorbar: bool,
    /// Legend boxes drawn in a strip to the right of the chart.
    pub legend_groups: Vec<LegendGroup>,
    pub annotations: Vec<Annotation>,
}

impl ScatterPanel {
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
            points: Vec::new(),
            series: Vec::new(),
            color_scale: None,
            show_colorbar: false,
            legend_groups: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn log_x(mut self) -> Self {
        self.x_scale = AxisScale::Log;
        self
    }

    pub fn point(mut self, point: ScatterPoint) -> Self {
        self.points.push(point);
        self
    }

    pub fn points(mut self, points: impl IntoIterator<Item = ScatterPoint>) -> Self {
        self.points.extend(points);
        self
    }

    pub fn series(mut self, series: PlotSeries) -> Self {
        self.series.push(series);
        self
    }

    /// Colour scale for [`PointFill::Mapped`] points; `colorbar` also draws it.
    pub fn color_scale(mut self, scale: ColorScale, colorbar: bool) -> Self {
        self.color_scale = Some(scale);
        self.show_colorbar = colorbar;
        self
    }

    pub fn legend_group(mut self, group: LegendGroup) -> Self {
        self.legend_groups.push(group);
        self
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    fn point_color(&self, fill: PointFill) -> RGBColor {
        match (fill, &self.color_scale) {
            (PointFill::Solid(c), _) => c,
            (PointFill::Mapped(v), Some(scale)) => scale.color(v),
            (PointFill::Mapped(_), None) => BLACK,
        }
    }

    pub(super) fn unavailable_reason(&self) -> Option<&'static str> {
        let log_ok = self.x_scale == AxisScale::Linear || self.x_range.0 > 0.0;
        if self.points.is_empty() && self.series.iter().all(|s| s.data.is_empty()) {
            Some("No data points")
        } else if !valid_range(self.x_range) || !valid_range(self.y_range) || !log_ok {
            Some("Invalid ranges")
        } else if self
            .color_scale
            .as_ref()
            .is_some_and(|s| !valid_range(s.range))
        {
            Some("Invalid ranges")
        } else {
            None
        }
    }
}

pub(super) fn draw_scatter_panel(
    area: &PlotArea,
    panel: &ScatterPanel,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    let body = split_title(area, &panel.title, FONT_CHART_TITLE, theme)?;
    let mut main = body;
    if !panel.legend_groups.is_empty() {
        let width = main.get_pixel_range().0.len() as u32;
        let (chart_area, legend_area) = main.split_horizontally(width * 7 / 10);
        draw_legend_groups(&legend_area, &panel.legend_groups, theme, false)?;
        main = chart_area;
    }
    if let (Some(scale), true) = (&panel.color_scale, panel.show_colorbar) {
        let width = main.get_pixel_range().0.len() as u32;
        let (chart_area, bar) = main.split_horizontally(width.saturating_sub(theme.px(COLORBAR_WIDTH_PX)));
        draw_colorbar(&bar, scale, theme)?;
        main = chart_area;
    }

    let (x0, x1) = panel.x_range;
    match panel.x_scale {
        AxisScale::Linear => draw_scatter_chart(&main, panel, theme, || x0..x1),
        AxisScale::Log => draw_scatter_chart(&main, panel, theme, || (x0..x1).log_scale()),
    }
}

fn draw_scatter_chart<XS, F>(
    area: &PlotArea,
    panel: &ScatterPanel,
    theme: &Theme,
    make_x: F,
) -> Result<(), Box<dyn Error>>
where
    XS: AsRangedCoord<Value = f64>,
    XS::CoordDescType: ValueFormatter<f64>,
    F: Fn() -> XS,
{
    let mut chart = ChartBuilder::on(area)
        .margin(theme.px(CHART_MARGIN_PX))
        .x_label_area_size(theme.px(X_LABEL_AREA_PX))
        .y_label_area_size(theme.px(Y_LABEL_AREA_PX))
        .build_cartesian_2d(make_x(), panel.y_range.0..panel.y_range.1)?;

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

    draw_scatter_content(area, &mut chart, panel, theme)
}

fn draw_scatter_content<X>(
    area: &PlotArea,
    chart: &mut ChartContext<'_, BitMapBackend<'_>, Cartesian2d<X, RangedCoordf64>>,
    panel: &ScatterPanel,
    theme: &Theme,
) -> Result<(), Box<dyn Error>>
where
    X: Ranged<ValueType = f64>,
{
    for s in panel.series.iter().filter(|s| s.line != LineStyle::None) {
        let style = s.color.stroke_width(theme.stroke(s.stroke_width));
        chart.draw_series(LineSeries::new(s.data.iter().copied(), style))?;
    }

    chart.draw_series(panel.points.iter().map(|p| {
        let outline = p.marker.vertices(theme.marker_radius(p.size));
        let color = panel.point_color(p.fill);
        EmptyElement::at((p.x, p.y)) + Polygon::new(outline, color.mix(p.opacity).filled())
    }))?;

    draw_annotations(area, chart, &panel.annotations, theme)
}

/// Kernel-density outlines of several samples side by side.
#[derive(Debug, Clone)]
pub struct ViolinPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub samples: Vec<Vec<f64>>,
    pub colors: Vec<RGBColor>,
    pub opacity: f64,
    /// Full violin width in category units.
    pub width: f64,
    pub y_range: Option<(f64, f64)>,
}

impl ViolinPanel {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            categories: Vec::new(),
            samples: Vec::new(),
            colors: Vec::new(),
            opacity: 0.6,
            width: 0.8,
            y_range: None,
        }
    }

    pub fn violin(mut self, category: &str, samples: Vec<f64>, color: RGBColor) -> Self {
        self.categories.push(category.to_string());
        self.samples.push(samples);
        self.colors.push(color);
        self
    }

    pub fn y_range(mut self, range: (f64, f64)) -> Self {
        self.y_range = Some(range);
        self
    }

    /// Vertical extent: the given range, or the padded sample range.
    pub fn effective_y_range(&self) -> (f64, f64) {
        if let Some(range) = self.y_range {
            return range;
        }
        let finite = self.samples.iter().flatten().filter(|v| v.is_finite());
        let (lo, hi) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
        if lo.is_finite() {
            calculate_range(lo, hi)
        } else {
            (0.0, 1.0)
        }
    }

    /// Closed outline of violin `index` centred on `x = index`, or `None`
    /// when the sample has no spread.
    pub fn outline(&self, index: usize) -> Option<Vec<(f64, f64)>> {
        let data: Vec<f64> = self
            .samples
            .get(index)?
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        let kde = gaussian_kde(&data, 100);
        let (first, last) = (kde.first()?, kde.last()?);
        if last.0 <= first.0 {
            return None;
        }
        let peak = kde.iter().map(|&(_, d)| d).fold(0.0, f64::max);
        if peak <= 0.0 {
            return None;
        }
        let half = self.width / 2.0;
        let center = index as f64;
        let right = kde.iter().map(|&(y, d)| (center + d / peak * half, y));
        let left = kde.iter().rev().map(|&(y, d)| (center - d / peak * half, y));
        Some(right.chain(left).collect())
    }

    pub(super) fn unavailable_reason(&self) -> Option<&'static str> {
        if self.samples.iter().all(|s| s.is_empty()) {
            Some("No data points")
        } else if !valid_range(self.effective_y_range()) {
            Some("Invalid ranges")
        } else {
            None
        }
    }
}

fn mean_and_extrema(data: &[f64]) -> Option<(f64, f64, f64)> {
    let finite: Vec<f64> = data.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    let mean = finite.iter().sum::<f64>() / finite.len() as f64;
    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some((mean, lo, hi))
}

pub(super) fn draw_violin_panel(
    area: &PlotArea,
    panel: &ViolinPanel,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    let body = split_title(area, &panel.title, FONT_CHART_TITLE, theme)?;
    let n = panel.categories.len();
    let y_range = panel.effective_y_range();
    let mut chart = ChartBuilder::on(&body)
        .margin(theme.px(CHART_MARGIN_PX))
        .x_label_area_size(theme.px(CATEGORY_LABEL_AREA_PX))
        .y_label_area_size(theme.px(Y_LABEL_AREA_PX))
        .build_cartesian_2d(-0.5..n as f64 - 0.5, y_range.0..y_range.1)?;

    let y_span = y_range.1 - y_range.0;
    chart
        .configure_mesh()
        .x_labels(0)
        .y_labels(8)
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .y_label_formatter(&|y| format_linear_tick(*y, y_span))
        .light_line_style(WHITE.mix(0.7))
        .bold_line_style(COLOR_GRID.mix(0.6))
        .label_style(FONT_TICK_LABEL.at(theme.dpi))
        .axis_desc_style(FONT_AXIS_LABEL.at(theme.dpi))
        .draw()?;

    let whisker = panel.width / 4.0;
    let stats_color = panel.colors.first().copied().unwrap_or(BLACK);
    let stats_style = stats_color.stroke_width(theme.stroke(LINE_WIDTH_THIN));
    for (i, data) in panel.samples.iter().enumerate() {
        let color = panel.colors.get(i).copied().unwrap_or(BLACK);
        if let Some(outline) = panel.outline(i) {
            chart.draw_series(std::iter::once(Polygon::new(
                outline.clone(),
                color.mix(panel.opacity).filled(),
            )))?;
            chart.draw_series(std::iter::once(PathElement::new(
                outline,
                color.stroke_width(theme.stroke(LINE_WIDTH_THIN)),
            )))?;
        }
        let Some((mean, lo, hi)) = mean_and_extrema(data) else {
            continue;
        };
        let x = i as f64;
        let lines = [
            vec![(x, lo), (x, hi)],
            vec![(x - whisker, lo), (x + whisker, lo)],
            vec![(x - whisker, hi), (x + whisker, hi)],
        ];
        chart.draw_series(lines.into_iter().map(|l| PathElement::new(l, stats_style)))?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x - whisker, mean), (x + whisker, mean)],
            stats_color.stroke_width(theme.stroke(LINE_WIDTH_PLOT)),
        )))?;
    }

    let base = body.get_base_pixel();
    let tick_style = FONT_TICK_LABEL
        .at(theme.dpi)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, category) in panel.categories.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(i as f64, y_range.0));
        draw_text_lines(
            &body,
            category,
            (x - base.0, y - base.1 + theme.px(4.0) as i32),
            &tick_style,
            theme.line_height(FONT_TICK_LABEL),
        )?;
    }
    Ok(())
}


// src/plot_framework/scatter.rs
