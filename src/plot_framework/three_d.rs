// src/plot_framework/three_d.rs

use ndarray::Array2;
use plotters::chart::{ChartBuilder, ChartContext};
use plotters::coord::ranged3d::Cartesian3d;
use plotters::coord::types::RangedCoordf64;
use plotters::element::{EmptyElement, Polygon, Text};
use plotters::prelude::BitMapBackend;
use plotters::style::colors::BLACK;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::Color;

use std::error::Error;

use super::heatmap::draw_colorbar;
use super::legend::draw_legend_groups;
use super::line::format_linear_tick;
use super::{
    format_tick, split_title, valid_range, ColorScale, Colormap, LegendGroup, PlotArea,
    PointFill, Theme,
};
use crate::constants::{CHART_MARGIN_PX, COLORBAR_WIDTH_PX, MARKER_SIZE};
use crate::font_config::{FONT_AXIS_LABEL, FONT_CHART_TITLE, FONT_TICK_LABEL};

type Chart3d<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian3d<RangedCoordf64, RangedCoordf64, RangedCoordf64>>;

/// Camera angles in radians; pitch tilts the view down onto the x-y plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub yaw: f64,
    pub pitch: f64,
}

impl View {
    /// Elevation and azimuth in degrees.
    pub fn from_degrees(elevation: f64, azimuth: f64) -> Self {
        Self {
            yaw: azimuth.to_radians(),
            pitch: elevation.to_radians(),
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::from_degrees(30.0, 45.0)
    }
}

/// Axis titles and ranges shared by the 3D panels. `z` is the vertical axis.
#[derive(Debug, Clone)]
pub struct Axes3d {
    pub labels: [String; 3],
    pub ranges: [(f64, f64); 3],
}

impl Axes3d {
    pub fn new(labels: [&str; 3], ranges: [(f64, f64); 3]) -> Self {
        Self {
            labels: labels.map(str::to_string),
            ranges,
        }
    }

    fn valid(&self) -> bool {
        self.ranges.iter().all(|&r| valid_range(r))
    }
}

/// Surface `z = values[iy, ix]` over the grid `xs` by `ys`.
#[derive(Debug, Clone)]
pub struct SurfacePanel {
    pub title: String,
    pub axes: Axes3d,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub values: Array2<f64>,
    pub scale: ColorScale,
    pub opacity: f64,
    pub show_colorbar: bool,
    pub view: View,
}

impl SurfacePanel {
    pub fn new(
        title: &str,
        axes: Axes3d,
        xs: Vec<f64>,
        ys: Vec<f64>,
        values: Array2<f64>,
        scale: ColorScale,
    ) -> Self {
        Self {
            title: title.to_string(),
            axes,
            xs,
            ys,
            values,
            scale,
            opacity: 0.8,
            show_colorbar: true,
            view: View::default(),
        }
    }

    pub fn view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    /// Quads of the surface with the value used to colour each one.
    pub fn quads(&self) -> Vec<([(f64, f64, f64); 4], f64)> {
        let (ny, nx) = self.values.dim();
        if ny != self.ys.len() || nx != self.xs.len() {
            return Vec::new();
        }
        let mut quads = Vec::with_capacity(nx.saturating_sub(1) * ny.saturating_sub(1));
        for iy in 0..ny.saturating_sub(1) {
            for ix in 0..nx.saturating_sub(1) {
                let corner = |dy: usize, dx: usize| {
                    (self.xs[ix + dx], self.ys[iy + dy], self.values[[iy + dy, ix + dx]])
                };
                let corners = [corner(0, 0), corner(0, 1), corner(1, 1), corner(1, 0)];
                let mean = corners.iter().map(|c| c.2).sum::<f64>() / 4.0;
                quads.push((corners, mean));
            }
        }
        quads
    }

    pub(super) fn unavailable_reason(&self) -> Option<&'static str> {
        if self.quads().is_empty() {
            Some("No data points")
        } else if !self.axes.valid() || !valid_range(self.scale.range) {
            Some("Invalid ranges")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub fill: PointFill,
    /// Marker radius in points.
    pub size: f64,
    pub opacity: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64, fill: PointFill) -> Self {
        Self {
            x,
            y,
            z,
            fill,
            size: MARKER_SIZE,
            opacity: 1.0,
        }
    }

    pub fn size(mut self, radius_pt: f64) -> Self {
        self.size = radius_pt;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Scatter3dPanel {
    pub title: String,
    pub axes: Axes3d,
    pub points: Vec<Point3>,
    pub color_scale: Option<ColorScale>,
    pub show_colorbar: bool,
    pub legend_groups: Vec<LegendGroup>,
    pub view: View,
}

impl Scatter3dPanel {
    pub fn new(title: &str, axes: Axes3d) -> Self {
        Self {
            title: title.to_string(),
            axes,
            points: Vec::new(),
            color_scale: None,
            show_colorbar: false,
            legend_groups: Vec::new(),
            view: View::default(),
        }
    }

    pub fn points(mut self, points: impl IntoIterator<Item = Point3>) -> Self {
        self.points.extend(points);
        self
    }

    pub fn color_scale(mut self, scale: ColorScale, colorbar: bool) -> Self {
        self.color_scale = Some(scale);
        self.show_colorbar = colorbar;
        self
    }

    pub fn legend_group(mut self, group: LegendGroup) -> Self {
        self.legend_groups.push(group);
        self
    }

    pub fn view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    pub(super) fn unavailable_reason(&self) -> Option<&'static str> {
        if self.points.is_empty() {
            Some("No data points")
        } else if !self.axes.valid() {
            Some("Invalid ranges")
        } else {
            None
        }
    }
}

/// Data `(x, y, z)` with `z` up, in plotters' `(x, vertical, depth)` order.
fn to_plotters(p: (f64, f64, f64)) -> (f64, f64, f64) {
    (p.0, p.2, p.1)
}

/// Split off the colorbar strip when there is one.
fn with_colorbar<'a>(
    body: PlotArea<'a>,
    scale: Option<&ColorScale>,
    theme: &Theme,
) -> Result<PlotArea<'a>, Box<dyn Error>> {
    match scale {
        Some(scale) => {
            let width = body.get_pixel_range().0.len() as u32;
            let (main, bar) = body.split_horizontally(width.saturating_sub(theme.px(COLORBAR_WIDTH_PX)));
            draw_colorbar(&bar.margin(theme.px(40.0), theme.px(40.0), 0, 0), scale, theme)?;
            Ok(main)
        }
        None => Ok(body),
    }
}

fn build_chart<'a, 'b>(
    area: &'a PlotArea<'b>,
    axes: &Axes3d,
    view: View,
    theme: &Theme,
) -> Result<Chart3d<'a, 'b>, Box<dyn Error>> {
    let [x, y, z] = axes.ranges;
    let mut chart = ChartBuilder::on(area)
        .margin(theme.px(CHART_MARGIN_PX * 3.0))
        .build_cartesian_3d(x.0..x.1, z.0..z.1, y.0..y.1)?;
    chart.with_projection(|mut pb| {
        pb.yaw = view.yaw;
        pb.pitch = view.pitch;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    let spans = [x.1 - x.0, y.1 - y.0, z.1 - z.0];
    let tick = |v: f64, span: f64| {
        if v.abs() >= 1e3 {
            format_tick(v)
        } else {
            format_linear_tick(v, span)
        }
    };
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.1))
        .max_light_lines(3)
        .label_style(FONT_TICK_LABEL.at(theme.dpi))
        .x_formatter(&|v| tick(*v, spans[0]))
        .y_formatter(&|v| tick(*v, spans[2]))
        .z_formatter(&|v| tick(*v, spans[1]))
        .draw()?;

    // Axis titles sit just outside the low edges of the box.
    let style = FONT_AXIS_LABEL
        .at(theme.dpi)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let pad = 0.25;
    let titles = [
        ((x.0 + x.1) / 2.0, y.0 - pad * spans[1], z.0),
        (x.1 + pad * spans[0], (y.0 + y.1) / 2.0, z.0),
        (x.0 - pad * spans[0], y.0, (z.0 + z.1) / 2.0),
    ];
    for (label, at) in axes.labels.iter().zip(titles) {
        chart.draw_series(std::iter::once(Text::new(
            label.clone(),
            to_plotters(at),
            style.clone(),
        )))?;
    }
    Ok(chart)
}

/// Indices of `points` ordered far to near, so nearer elements paint over.
fn far_to_near(chart: &Chart3d<'_, '_>, points: &[(f64, f64, f64)]) -> Vec<usize> {
    let coord = chart.as_coord_spec();
    let mut order: Vec<(usize, i32)> = points
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let (x, y, z) = to_plotters(p);
            (i, coord.projected_depth(&x, &y, &z))
        })
        .collect();
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.into_iter().map(|(i, _)| i).collect()
}

pub(super) fn draw_surface_panel(
    area: &PlotArea,
    panel: &SurfacePanel,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    let body = split_title(area, &panel.title, FONT_CHART_TITLE, theme)?;
    let scale = panel.show_colorbar.then_some(&panel.scale);
    let main = with_colorbar(body, scale, theme)?;
    let mut chart = build_chart(&main, &panel.axes, panel.view, theme)?;

    let quads = panel.quads();
    let centres: Vec<(f64, f64, f64)> = quads
        .iter()
        .map(|(c, _)| {
            let n = c.len() as f64;
            (
                c.iter().map(|p| p.0).sum::<f64>() / n,
                c.iter().map(|p| p.1).sum::<f64>() / n,
                c.iter().map(|p| p.2).sum::<f64>() / n,
            )
        })
        .collect();
    let order = far_to_near(&chart, &centres);
    chart.draw_series(order.into_iter().map(|i| {
        let (corners, value) = &quads[i];
        let fill = panel.scale.color(*value).mix(panel.opacity).filled();
        Polygon::new(corners.iter().map(|&c| to_plotters(c)).collect::<Vec<_>>(), fill)
    }))?;
    Ok(())
}

pub(super) fn draw_scatter3d_panel(
    area: &PlotArea,
    panel: &Scatter3dPanel,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    let body = split_title(area, &panel.title, FONT_CHART_TITLE, theme)?;
    let scale = panel.color_scale.as_ref().filter(|_| panel.show_colorbar);
    let main = with_colorbar(body, scale, theme)?;
    let mut chart = build_chart(&main, &panel.axes, panel.view, theme)?;

    let positions: Vec<(f64, f64, f64)> = panel.points.iter().map(|p| (p.x, p.y, p.z)).collect();
    let order = far_to_near(&chart, &positions);
    chart.draw_series(order.into_iter().map(|i| {
        let p = panel.points[i];
        let color = match (p.fill, &panel.color_scale) {
            (PointFill::Solid(c), _) => c,
            (PointFill::Mapped(v), Some(scale)) => scale.color(v),
            (PointFill::Mapped(v), None) => Colormap::Viridis.at(v),
        };
        let outline = super::Marker::Circle.vertices(theme.marker_radius(p.size));
        EmptyElement::at(to_plotters((p.x, p.y, p.z)))
            + Polygon::new(outline, color.mix(p.opacity).filled())
    }))?;

    if !panel.legend_groups.is_empty() {
        let width = main.get_pixel_range().0.len() as u32;
        let (_, corner) = main.split_horizontally(width * 7 / 10);
        draw_legend_groups(&corner, &panel.legend_groups, theme, false)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn axes() -> Axes3d {
        Axes3d::new(["x", "y", "z"], [(0.0, 1.0), (0.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_surface_quads_cover_grid() {
        let panel = SurfacePanel::new(
            "s",
            axes(),
            vec![0.0, 1.0, 2.0],
            vec![0.0, 1.0],
            array![[0.0, 0.2, 0.4], [0.6, 0.8, 1.0]],
            ColorScale::new(Colormap::Viridis, (0.0, 1.0), "v"),
        );
        let quads = panel.quads();
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[0].0[0], (0.0, 0.0, 0.0));
        assert_eq!(quads[0].0[2], (1.0, 1.0, 0.8));
        assert!((quads[0].1 - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_mismatched_surface_is_unavailable() {
        let panel = SurfacePanel::new(
            "s",
            axes(),
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            array![[0.0, 0.2, 0.4], [0.6, 0.8, 1.0]],
            ColorScale::new(Colormap::Viridis, (0.0, 1.0), "v"),
        );
        assert_eq!(panel.unavailable_reason(), Some("No data points"));
    }

    #[test]
    fn test_scatter3d_availability() {
        let empty = Scatter3dPanel::new("p", axes());
        assert_eq!(empty.unavailable_reason(), Some("No data points"));
        let flat = Scatter3dPanel::new(
            "p",
            Axes3d::new(["x", "y", "z"], [(0.0, 1.0), (1.0, 1.0), (0.0, 1.0)]),
        )
        .points([Point3::new(0.5, 0.5, 0.5, PointFill::Mapped(0.5))]);
        assert_eq!(flat.unavailable_reason(), Some("Invalid ranges"));
    }

    #[test]
    fn test_vertical_axis_is_data_z() {
        assert_eq!(to_plotters((1.0, 2.0, 3.0)), (1.0, 3.0, 2.0));
        let view = View::from_degrees(90.0, 180.0);
        assert!((view.pitch - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((view.yaw - std::f64::consts::PI).abs() < 1e-12);
    }
}

// src/plot_framework/three_d.rs
