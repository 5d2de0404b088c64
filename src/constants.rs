// src/constants.rs

use plotters::style::RGBColor;

// Output resolution. Pixel size of a figure is figsize (inches) x DPI.
pub const DEFAULT_DPI: u32 = 300;
// Reference DPI the pixel-based layout constants below are tuned for.
pub const LAYOUT_REFERENCE_DPI: f64 = 100.0;

// Metric defaults.
pub const DEFAULT_ALPHA: f64 = 0.3;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_CALIBRATION_BINS: usize = 10;
pub const DEFAULT_EMERGENCE_THRESHOLD: f64 = 0.5;
pub const DEFAULT_RESULTS_DIR: &str = "results/figures";

// Figure sizes in inches (width, height).
pub const FIGSIZE_DEFAULT: (f64, f64) = (6.4, 4.8);
pub const FIGSIZE_SMALL: (f64, f64) = (6.0, 4.0);
pub const FIGSIZE_SMALL_WIDE: (f64, f64) = (8.0, 4.0);
pub const FIGSIZE_SQUARE_ISH: (f64, f64) = (7.0, 5.0);
pub const FIGSIZE_EXAMPLE: (f64, f64) = (8.0, 6.0);
pub const FIGSIZE_MEDIUM: (f64, f64) = (10.0, 6.0);
pub const FIGSIZE_TALL_3D: (f64, f64) = (10.0, 8.0);
pub const FIGSIZE_MANIFOLD: (f64, f64) = (12.0, 8.0);
pub const FIGSIZE_ROW_OF_THREE: (f64, f64) = (15.0, 5.0);
pub const FIGSIZE_TASK_GRID: (f64, f64) = (15.0, 10.0);
pub const FIGSIZE_COLUMN_OF_THREE: (f64, f64) = (12.0, 15.0);
pub const FIGSIZE_BAR_GRID: (f64, f64) = (16.0, 8.0);
pub const FIGSIZE_ROW_OF_FIVE: (f64, f64) = (20.0, 6.0);
pub const FIGSIZE_ATTENTION_FRAME: (f64, f64) = (6.0, 6.0);

// Font sizes in points; converted to pixels with the output DPI.
pub const FONT_SIZE_MAIN_TITLE: f64 = 14.0;
pub const FONT_SIZE_CHART_TITLE: f64 = 12.0;
pub const FONT_SIZE_AXIS_LABEL: f64 = 10.0;
pub const FONT_SIZE_TICK_LABEL: f64 = 9.0;
pub const FONT_SIZE_LEGEND: f64 = 9.0;
pub const FONT_SIZE_ANNOTATION: f64 = 8.0;
pub const FONT_SIZE_MESSAGE: f64 = 11.0;

// Stroke widths in points.
pub const LINE_WIDTH_PLOT: f64 = 1.5;
pub const LINE_WIDTH_THIN: f64 = 1.0;
pub const LINE_WIDTH_LEGEND: f64 = 1.5;
// Marker radius in points.
pub const MARKER_SIZE: f64 = 3.0;

// Layout in pixels at LAYOUT_REFERENCE_DPI.
pub const CHART_MARGIN_PX: f64 = 10.0;
pub const X_LABEL_AREA_PX: f64 = 45.0;
pub const Y_LABEL_AREA_PX: f64 = 55.0;
pub const CATEGORY_LABEL_AREA_PX: f64 = 70.0;
pub const COLORBAR_WIDTH_PX: f64 = 70.0;
pub const MAIN_TITLE_AREA_PX: f64 = 35.0;
pub const LEGEND_SWATCH_PX: f64 = 18.0;

// Matplotlib "tab10" cycle.
pub const TAB10: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

// --- Named colors ---
pub const COLOR_SKYBLUE: RGBColor = RGBColor(135, 206, 235);
pub const COLOR_SALMON: RGBColor = RGBColor(250, 128, 114);
pub const COLOR_FLAT_BLUE: RGBColor = RGBColor(0x34, 0x98, 0xdb);
pub const COLOR_FLAT_GREEN: RGBColor = RGBColor(0x2e, 0xcc, 0x71);
pub const COLOR_FLAT_RED: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);
pub const COLOR_MATERIAL_BLUE: RGBColor = RGBColor(0x21, 0x96, 0xf3);
pub const COLOR_MATERIAL_RED: RGBColor = RGBColor(0xf4, 0x43, 0x36);
pub const COLOR_MATERIAL_GREEN: RGBColor = RGBColor(0x4c, 0xaf, 0x50);
pub const COLOR_MATERIAL_AMBER: RGBColor = RGBColor(0xff, 0xc1, 0x07);
pub const COLOR_MATERIAL_PURPLE: RGBColor = RGBColor(0x9c, 0x27, 0xb0);
pub const COLOR_MATERIAL_DEEP_ORANGE: RGBColor = RGBColor(0xff, 0x57, 0x22);
pub const COLOR_BASIC_BLUE: RGBColor = RGBColor(0, 0, 255);
pub const COLOR_BASIC_GREEN: RGBColor = RGBColor(0, 128, 0);
pub const COLOR_BASIC_RED: RGBColor = RGBColor(255, 0, 0);
pub const COLOR_BASIC_PURPLE: RGBColor = RGBColor(128, 0, 128);
pub const COLOR_BASIC_ORANGE: RGBColor = RGBColor(255, 165, 0);
pub const COLOR_GRAY: RGBColor = RGBColor(128, 128, 128);
pub const COLOR_GRID: RGBColor = RGBColor(200, 200, 200);

// Accuracy and UCS pair used by the bar and Table 1 figures.
pub const COLOR_ACCURACY: RGBColor = COLOR_FLAT_GREEN;
pub const COLOR_UCS: RGBColor = COLOR_FLAT_RED;

// Per-dataset colours of the parameter legend figure, in benchmark order.
pub const DATASET_COLORS: [RGBColor; 5] = [
    COLOR_BASIC_BLUE,
    COLOR_BASIC_GREEN,
    COLOR_BASIC_RED,
    COLOR_BASIC_PURPLE,
    COLOR_BASIC_ORANGE,
];

// Synthetic data sizes.
pub const CALIBRATION_SAMPLE_COUNT: usize = 1000;
pub const CONFORMAL_PATTERN_REPEATS: usize = 100;
pub const CONFORMAL_BAND_POINTS: usize = 100;
pub const ATTENTION_MATRIX_SIZE: usize = 16;
pub const ATTENTION_EVOLUTION_FRAMES: usize = 10;
pub const MANIFOLD_GRID_RESOLUTION: usize = 50;
pub const MANIFOLD_MONTE_CARLO_SAMPLES: usize = 10;
pub const SCALING_RELATION_MODELS: usize = 10;
pub const CURVE_POINTS: usize = 100;
pub const DETAIL_CURVE_POINTS: usize = 1000;

// Half-width of the shaded band around performance curves.
pub const PERFORMANCE_BAND_HALF_WIDTH: f64 = 0.05;

// src/constants.rs
