// src/plot_functions/plot_attention_patterns.rs

use ndarray::Array2;
use tracing::debug;

use std::error::Error;

use crate::constants::{
    ATTENTION_EVOLUTION_FRAMES, ATTENTION_MATRIX_SIZE, FIGSIZE_ATTENTION_FRAME,
    FIGSIZE_ROW_OF_THREE,
};
use crate::data_analysis::synthetic::{
    attention_evolution_frame, attention_matrix, AttentionPattern,
};
use crate::figures::RenderContext;
use crate::plot_framework::{draw_panel_grid, draw_single_panel, Colormap, HeatmapPanel, Panel};

const STAGES: [(AttentionPattern, &str); 3] = [
    (AttentionPattern::Scattered, "(A) Pre-emergence\nScattered Attention"),
    (AttentionPattern::Transitional, "(B) Transitional\nFocusing Patterns"),
    (AttentionPattern::Structured, "(C) Post-emergence\nStructured Attention"),
];

fn attention_panel(title: &str, weights: Array2<f64>) -> HeatmapPanel {
    HeatmapPanel::new(title, weights, Colormap::YlOrRd)
        .axis_labels("Token Position", "Token Position")
        .value_range((0.0, 1.0))
}

/// Blend weight of evolution frame `index`, 0 for the first and 1 for the last.
fn frame_weight(index: usize, frames: usize) -> f64 {
    if frames <= 1 {
        1.0
    } else {
        index as f64 / (frames - 1) as f64
    }
}

/// Attention before, during and after emergence side by side, then frames
/// blending scattered into structured attention.
pub fn plot_attention_patterns(ctx: &RenderContext) -> Result<(), Box<dyn Error>> {
    let mut rng = ctx.rng();

    let mut panels: Vec<Option<Panel>> = STAGES
        .iter()
        .enumerate()
        .map(|(i, &(pattern, title))| {
            let weights = attention_matrix(&mut rng, pattern, ATTENTION_MATRIX_SIZE);
            let panel = attention_panel(title, weights);
            // One shared colorbar, on the right of the last stage.
            let panel = if i + 1 == STAGES.len() {
                panel.colorbar("Attention Weight")
            } else {
                panel
            };
            Some(Panel::Heatmap(panel))
        })
        .collect();
    draw_panel_grid(
        &ctx.output("attention_patterns.png"),
        None,
        (1, STAGES.len()),
        FIGSIZE_ROW_OF_THREE,
        ctx.dpi,
        |index| panels.get_mut(index).and_then(Option::take),
    )?;

    for i in 0..ATTENTION_EVOLUTION_FRAMES {
        let weight = frame_weight(i, ATTENTION_EVOLUTION_FRAMES);
        let weights = attention_evolution_frame(&mut rng, weight, ATTENTION_MATRIX_SIZE);
        let panel = HeatmapPanel::new(
            &format!("Attention Evolution: {:.0}%", weight * 100.0),
            weights,
            Colormap::YlOrRd,
        )
        .colorbar("");
        let path = ctx.output(&format!("attention_evolution_{i:02}.png"));
        draw_single_panel(&path, FIGSIZE_ATTENTION_FRAME, ctx.dpi, Panel::Heatmap(panel))?;
        debug!(frame = i, weight, path = %path.display(), "saved attention frame");
    }
    Ok(())
}


// src/plot_functions/plot_attention_patterns.rs
