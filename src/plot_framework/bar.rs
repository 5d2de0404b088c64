// src/plot_framework/bar.rs

use plotters::chart::ChartBuilder;
use plotters::element::{PathElement, Rectangle, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, RGBColor};

use std::error::Error;

use super::line::{dash_segments, format_linear_tick};
use super::{
    draw_text_lines, split_title, valid_range, LegendPosition, LineStyle, PlotArea, PlotSeries,
    ReferenceLine, Theme,
};
use crate::constants::{
    CATEGORY_LABEL_AREA_PX, CHART_MARGIN_PX, COLOR_GRID, LEGEND_SWATCH_PX, LINE_WIDTH_THIN,
    Y_LABEL_AREA_PX,
};
use crate::font_config::{
    FONT_ANNOTATION, FONT_AXIS_LABEL, FONT_CHART_TITLE, FONT_LEGEND, FONT_TICK_LABEL,
};

/// One coloured bar per category.
#[derive(Debug, Clone)]
pub struct BarGroup {
    pub label: String,
    pub color: RGBColor,
    pub opacity: f64,
    pub values: Vec<f64>,
}

/// Grouped bar chart over named categories. Category `i` sits at x = i.
#[derive(Debug, Clone)]
pub struct BarPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub groups: Vec<BarGroup>,
    /// Width of one bar in category units.
    pub bar_width: f64,
    pub y_range: (f64, f64),
    pub value_labels: bool,
    /// Lines drawn in category coordinates over the bars.
    pub overlays: Vec<PlotSeries>,
    pub hlines: Vec<ReferenceLine>,
    pub note: Option<String>,
    pub legend: LegendPosition,
    /// Alternate category labels between two rows.
    pub stagger_labels: bool,
}

impl BarPanel {
    pub fn new(title: &str, x_label: &str, y_label: &str, categories: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            categories,
            groups: Vec::new(),
            bar_width: 0.35,
            y_range: (0.0, 1.0),
            value_labels: false,
            overlays: Vec::new(),
            hlines: Vec::new(),
            note: None,
            legend: LegendPosition::UpperLeft,
            stagger_labels: false,
        }
    }

    pub fn group(mut self, label: &str, color: RGBColor, values: Vec<f64>) -> Self {
        self.groups.push(BarGroup {
            label: label.to_string(),
            color,
            opacity: 1.0,
            values,
        });
        self
    }

    /// Opacity applied to every group added so far.
    pub fn opacity(mut self, opacity: f64) -> Self {
        for g in &mut self.groups {
            g.opacity = opacity;
        }
        self
    }

    pub fn bar_width(mut self, width: f64) -> Self {
        self.bar_width = width;
        self
    }

    pub fn y_range(mut self, range: (f64, f64)) -> Self {
        self.y_range = range;
        self
    }

    pub fn value_labels(mut self) -> Self {
        self.value_labels = true;
        self
    }

    pub fn overlay(mut self, series: PlotSeries) -> Self {
        self.overlays.push(series);
        self
    }

    pub fn hline(mut self, line: ReferenceLine) -> Self {
        self.hlines.push(line);
        self
    }

    pub fn note(mut self, note: &str) -> Self {
        self.note = Some(note.to_string());
        self
    }

    pub fn legend(mut self, position: LegendPosition) -> Self {
        self.legend = position;
        self
    }

    pub fn stagger_labels(mut self) -> Self {
        self.stagger_labels = true;
        self
    }

    /// Centre of bar `group` within category `category`.
    pub fn bar_center(&self, category: usize, group: usize) -> f64 {
        let n = self.groups.len().max(1) as f64;
        category as f64 + (group as f64 - (n - 1.0) / 2.0) * self.bar_width
    }

    /// Largest bar value, or `None` without bars.
    pub fn max_value(&self) -> Option<f64> {
        self.groups
            .iter()
            .flat_map(|g| g.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
    }

    pub(super) fn unavailable_reason(&self) -> Option<&'static str> {
        if self.categories.is_empty() || self.groups.iter().all(|g| g.values.is_empty()) {
            Some("No data points")
        } else if !valid_range(self.y_range) {
            Some("Invalid ranges")
        } else {
            None
        }
    }
}

pub(super) fn draw_bar_panel(
    area: &PlotArea,
    panel: &BarPanel,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    let body = split_title(area, &panel.title, FONT_CHART_TITLE, theme)?;
    let n = panel.categories.len();
    let x_range = (-0.5, n as f64 - 0.5);
    let label_rows = if panel.stagger_labels { 2.0 } else { 1.0 };
    let mut chart = ChartBuilder::on(&body)
        .margin(theme.px(CHART_MARGIN_PX))
        .x_label_area_size(theme.px(CATEGORY_LABEL_AREA_PX * (0.6 + 0.4 * label_rows)))
        .y_label_area_size(theme.px(Y_LABEL_AREA_PX))
        .build_cartesian_2d(x_range.0..x_range.1, panel.y_range.0..panel.y_range.1)?;

    let y_span = panel.y_range.1 - panel.y_range.0;
    chart
        .configure_mesh()
        .disable_x_mesh()
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

    let swatch = theme.px(LEGEND_SWATCH_PX) as i32;
    let base_value = 0f64.clamp(panel.y_range.0, panel.y_range.1);
    let mut legend_series_count = 0;
    for (g, group) in panel.groups.iter().enumerate() {
        let fill = group.color.mix(group.opacity);
        let half = panel.bar_width / 2.0;
        let bars: Vec<Rectangle<(f64, f64)>> = group
            .values
            .iter()
            .enumerate()
            .take(n)
            .filter(|(_, v)| v.is_finite())
            .map(|(i, &v)| {
                let xc = panel.bar_center(i, g);
                Rectangle::new([(xc - half, base_value), (xc + half, v)], fill.filled())
            })
            .collect();
        let anno = chart.draw_series(bars)?;
        if !group.label.is_empty() {
            anno.label(group.label.as_str()).legend(move |(x, y)| {
                Rectangle::new([(x, y - swatch / 3), (x + swatch, y + swatch / 3)], fill.filled())
            });
            legend_series_count += 1;
        }
    }

    for line in &panel.hlines {
        let points = vec![(x_range.0, line.value), (x_range.1, line.value)];
        let style = line.color.stroke_width(theme.stroke(LINE_WIDTH_THIN));
        let anno = match line.line.pattern() {
            Some(pattern) => {
                let dashes = dash_segments(&points, x_range, panel.y_range, false, pattern);
                chart.draw_series(dashes.into_iter().map(|d| PathElement::new(d, style)))?
            }
            None => chart.draw_series(LineSeries::new(points, style))?,
        };
        if !line.label.is_empty() {
            let color = line.color;
            anno.label(line.label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + swatch, y)], color.stroke_width(2))
            });
            legend_series_count += 1;
        }
    }

    for s in &panel.overlays {
        let style = s.color.stroke_width(theme.stroke(s.stroke_width));
        match s.line.pattern() {
            Some(pattern) => {
                let dashes = dash_segments(&s.data, x_range, panel.y_range, false, pattern);
                chart.draw_series(dashes.into_iter().map(|d| PathElement::new(d, style)))?;
            }
            None if s.line != LineStyle::None => {
                chart.draw_series(LineSeries::new(s.data.iter().copied(), style))?;
            }
            None => {}
        }
    }

    let base = body.get_base_pixel();
    let to_area = |p: (i32, i32)| (p.0 - base.0, p.1 - base.1);

    let tick_style = FONT_TICK_LABEL
        .at(theme.dpi)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    let tick_row = theme.line_height(FONT_TICK_LABEL);
    for (i, category) in panel.categories.iter().enumerate() {
        let (x, y) = to_area(chart.backend_coord(&(i as f64, panel.y_range.0)));
        let row = if panel.stagger_labels && i % 2 == 1 { tick_row } else { 0 };
        draw_text_lines(
            &body,
            category,
            (x, y + theme.px(4.0) as i32 + row),
            &tick_style,
            tick_row,
        )?;
    }

    if panel.value_labels {
        let value_style = FONT_ANNOTATION
            .at(theme.dpi)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        for (g, group) in panel.groups.iter().enumerate() {
            for (i, &v) in group.values.iter().enumerate().take(n) {
                if !v.is_finite() {
                    continue;
                }
                let (x, y) = to_area(chart.backend_coord(&(panel.bar_center(i, g), v)));
                body.draw(&Text::new(
                    format!("{v:.2}"),
                    (x, y - theme.px(2.0) as i32),
                    value_style.clone(),
                ))?;
            }
        }
    }

    if let Some(note) = &panel.note {
        let (x, y) = to_area(chart.backend_coord(&(x_range.0, panel.y_range.1)));
        let style = FONT_ANNOTATION
            .at(theme.dpi)
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Top));
        draw_text_lines(
            &body,
            note,
            (x + theme.px(6.0) as i32, y + theme.px(6.0) as i32),
            &style,
            theme.line_height(FONT_ANNOTATION),
        )?;
    }

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

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::style::colors::{BLUE, RED};

    fn two_group_panel() -> BarPanel {
        BarPanel::new("t", "x", "y", vec!["a".into(), "b".into()])
            .group("acc", BLUE, vec![0.2, 0.4])
            .group("ucs", RED, vec![0.1, 0.35])
    }

    #[test]
    fn test_grouped_bar_positions_are_symmetric() {
        let panel = two_group_panel();
        assert!((panel.bar_center(0, 0) + 0.175).abs() < 1e-12);
        assert!((panel.bar_center(0, 1) - 0.175).abs() < 1e-12);
        assert!((panel.bar_center(1, 0) - 0.825).abs() < 1e-12);
    }

    #[test]
    fn test_single_group_is_centred() {
        let panel = BarPanel::new("t", "x", "y", vec!["a".into()]).group("v", BLUE, vec![1.0]);
        assert_eq!(panel.bar_center(0, 0), 0.0);
    }

    #[test]
    fn test_max_value_and_availability() {
        let panel = two_group_panel();
        assert_eq!(panel.max_value(), Some(0.4));
        assert_eq!(panel.unavailable_reason(), None);
        let empty = BarPanel::new("t", "x", "y", Vec::new());
        assert_eq!(empty.max_value(), None);
        assert_eq!(empty.unavailable_reason(), Some("No data points"));
    }

    #[test]
    fn test_opacity_applies_to_existing_groups() {
        let panel = two_group_panel().opacity(0.8);
        assert!(panel.groups.iter().all(|g| g.opacity == 0.8));
    }
}

// src/plot_framework/bar.rs
