// src/plot_framework/legend.rs

use plotters::element::{EmptyElement, PathElement, Polygon, Rectangle};
use plotters::style::colors::{BLACK, TRANSPARENT, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, RGBColor, ShapeStyle};

use std::error::Error;

use super::{split_title, LineStyle, Marker, PlotArea, Theme};
use crate::constants::{LEGEND_SWATCH_PX, LINE_WIDTH_LEGEND};
use crate::font_config::{FONT_CHART_TITLE, FONT_LEGEND};

/// What a legend entry shows next to its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendGlyph {
    Line(LineStyle),
    Marker(Marker),
    LineMarker(LineStyle, Marker),
    /// Filled rectangle, for bars and shaded regions.
    Patch,
}

#[derive(Debug, Clone)]
pub struct LegendEntry {
    pub label: String,
    pub color: RGBColor,
    pub glyph: LegendGlyph,
}

impl LegendEntry {
    pub fn new(label: &str, color: RGBColor, glyph: LegendGlyph) -> Self {
        Self {
            label: label.to_string(),
            color,
            glyph,
        }
    }
}

/// Titled block of legend entries.
#[derive(Debug, Clone)]
pub struct LegendGroup {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

impl LegendGroup {
    pub fn new(title: &str, entries: Vec<LegendEntry>) -> Self {
        Self {
            title: title.to_string(),
            entries,
        }
    }
}

/// A panel that only holds legends.
#[derive(Debug, Clone)]
pub struct LegendPanel {
    pub title: String,
    pub groups: Vec<LegendGroup>,
}

impl LegendPanel {
    pub fn new(title: &str, groups: Vec<LegendGroup>) -> Self {
        Self {
            title: title.to_string(),
            groups,
        }
    }

    pub(super) fn unavailable_reason(&self) -> Option<&'static str> {
        if self.groups.iter().all(|g| g.entries.is_empty()) {
            Some("No legend entries")
        } else {
            None
        }
    }
}

/// Pixel geometry of a legend glyph relative to its left-middle point.
#[derive(Debug, Clone)]
pub(super) struct GlyphParts {
    pub line: Vec<(i32, i32)>,
    pub line_style: ShapeStyle,
    pub outline: Vec<(i32, i32)>,
    pub fill: ShapeStyle,
}

pub(super) fn glyph_parts(glyph: LegendGlyph, color: RGBColor, theme: &Theme) -> GlyphParts {
    let width = theme.px(LEGEND_SWATCH_PX) as i32;
    let radius = theme.default_marker_radius();
    let line_style = color.stroke_width(theme.stroke(LINE_WIDTH_LEGEND));
    let hidden = TRANSPARENT.stroke_width(0);
    let centred = |m: Marker| -> Vec<(i32, i32)> {
        m.vertices(radius)
            .into_iter()
            .map(|(x, y)| (x + width / 2, y))
            .collect()
    };
    match glyph {
        LegendGlyph::Line(_) => GlyphParts {
            line: vec![(0, 0), (width, 0)],
            line_style,
            outline: Vec::new(),
            fill: hidden,
        },
        LegendGlyph::Marker(m) => GlyphParts {
            line: Vec::new(),
            line_style: hidden,
            outline: centred(m),
            fill: color.filled(),
        },
        LegendGlyph::LineMarker(_, m) => GlyphParts {
            line: vec![(0, 0), (width, 0)],
            line_style,
            outline: centred(m),
            fill: color.filled(),
        },
        LegendGlyph::Patch => {
            let h = width / 3;
            GlyphParts {
                line: Vec::new(),
                line_style: hidden,
                outline: vec![(0, -h), (width, -h), (width, h), (0, h)],
                fill: color.filled(),
            }
        }
    }
}

pub(super) fn draw_legend_panel(
    area: &PlotArea,
    panel: &LegendPanel,
    theme: &Theme,
) -> Result<(), Box<dyn Error>> {
    let body = split_title(area, &panel.title, FONT_CHART_TITLE, theme)?;
    draw_legend_groups(&body, &panel.groups, theme, true)
}

/// Stack legend boxes from the top of `area`; `centred` places the stack in
/// the horizontal middle instead of the left edge.
pub(super) fn draw_legend_groups(
    area: &PlotArea,
    groups: &[LegendGroup],
    theme: &Theme,
    centred: bool,
) -> Result<(), Box<dyn Error>> {
    let text_style = FONT_LEGEND.at(theme.dpi).color(&BLACK);
    let title_style = FONT_LEGEND
        .at(theme.dpi)
        .style(plotters::style::FontStyle::Bold)
        .color(&BLACK);
    let row = theme.line_height(FONT_LEGEND) + theme.px(4.0) as i32;
    let swatch = theme.px(LEGEND_SWATCH_PX) as i32;
    let pad = theme.px(6.0) as i32;
    let area_width = area.get_pixel_range().0.len() as i32;
    let fallback_char = (theme.line_height(FONT_LEGEND) / 2).max(1) as u32;

    let mut top = pad;
    for group in groups.iter().filter(|g| !g.entries.is_empty()) {
        let label_width = group
            .entries
            .iter()
            .map(|e| {
                area.estimate_text_size(&e.label, &text_style)
                    .map(|(w, _)| w)
                    .unwrap_or(e.label.len() as u32 * fallback_char)
            })
            .max()
            .unwrap_or(0) as i32;
        let title_width = area
            .estimate_text_size(&group.title, &title_style)
            .map(|(w, _)| w)
            .unwrap_or(group.title.len() as u32 * fallback_char) as i32;
        let box_width = (swatch * 2 + label_width).max(title_width) + pad * 2;
        let title_rows = if group.title.is_empty() { 0 } else { 1 };
        let box_height = (group.entries.len() as i32 + title_rows) * row + pad * 2;
        let left = if centred {
            ((area_width - box_width) / 2).max(0)
        } else {
            pad
        };

        area.draw(&Rectangle::new(
            [(left, top), (left + box_width, top + box_height)],
            WHITE.mix(0.8).filled(),
        ))?;
        area.draw(&Rectangle::new(
            [(left, top), (left + box_width, top + box_height)],
            BLACK.stroke_width(1),
        ))?;

        let mut y = top + pad + row / 2;
        if title_rows == 1 {
            area.draw(&plotters::element::Text::new(
                group.title.clone(),
                (left + box_width / 2, y),
                title_style.pos(Pos::new(HPos::Center, VPos::Center)),
            ))?;
            y += row;
        }
        for entry in &group.entries {
            let parts = glyph_parts(entry.glyph, entry.color, theme);
            area.draw(
                &(EmptyElement::at((left + pad, y))
                    + PathElement::new(parts.line, parts.line_style)
                    + Polygon::new(parts.outline, parts.fill)),
            )?;
            area.draw(&plotters::element::Text::new(
                entry.label.clone(),
                (left + pad + swatch * 2, y),
                text_style.pos(Pos::new(HPos::Left, VPos::Center)),
            ))?;
            y += row;
        }
        top += box_height + pad * 2;
    }
    Ok(())
}


// src/plot_framework/legend.rs
