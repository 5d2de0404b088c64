// tests/registry_integration_test.rs

use std::fs;
use std::path::{Path, PathBuf};

use ucs_figures::config::FigureConfig;
use ucs_figures::figures::{find_figure, output_paths, RenderContext, FIGURES};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_figure() {
        let ids: Vec<&str> = FIGURES.iter().map(|f| f.id).collect();
        assert_eq!(ids.len(), 19);
        for id in [
            "bar-chart-all-datasets",
            "calibration-analysis",
            "capability-manifold",
            "attention-patterns",
            "emergent-dashboard",
        ] {
            assert!(find_figure(id).is_ok(), "{id} registered");
        }
    }

    #[test]
    fn test_result_figures_live_under_results_dir() {
        let config = FigureConfig {
            output_dir: PathBuf::from("out"),
            results_dir: PathBuf::from("per_dataset"),
            ..FigureConfig::default()
        };
        let ctx = RenderContext::new(&config, Vec::new());
        let figure = find_figure("pilot-analysis").unwrap();
        let paths = output_paths(figure, &ctx);
        assert_eq!(paths.len(), 4);
        assert!(paths.iter().all(|p| p.starts_with(Path::new("out/per_dataset"))));

        // Without records there are no per-dataset files to list.
        let scaling = find_figure("dataset-scaling").unwrap();
        assert!(output_paths(scaling, &ctx).is_empty());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ucs-figures.toml");
        fs::write(&path, "seed = 7\noutput_dir = \"figs\"\nemergence_threshold = 0.4\n").unwrap();
        let config = FigureConfig::load_or_default(&path);
        assert_eq!(config.seed, 7);
        assert_eq!(config.output_dir, PathBuf::from("figs"));
        assert_eq!(config.emergence_threshold, 0.4);
        assert_eq!(config.alpha, 0.3);
        assert_eq!(config.dpi, 300);
    }
}

// tests/registry_integration_test.rs
