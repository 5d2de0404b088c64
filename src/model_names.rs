// src/model_names.rs

use tracing::warn;

/// Short display name of a model identifier: the organisation prefix is
/// dropped and the GPT-2 family gets its usual capitalisation.
pub fn display_name(model: &str) -> String {
    let base = model.rsplit('/').next().unwrap_or(model);
    match base {
        "gpt2" => "GPT2".to_string(),
        "gpt2-medium" => "GPT2-Medium".to_string(),
        "gpt2-large" => "GPT2-Large".to_string(),
        "gpt2-xl" => "GPT2-XL".to_string(),
        other => other.to_string(),
    }
}

/// File-name stem for a dataset: lowercase ASCII letters, digits and `_`.
pub fn file_stem(dataset: &str) -> String {
    dataset
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// One file stem per dataset, in the same order. Names that reduce to the
/// same stem get `_2`, `_3`, ... appended so their files do not overwrite
/// each other.
pub fn dataset_file_stems(datasets: &[String]) -> Vec<String> {
    let mut used: Vec<String> = Vec::with_capacity(datasets.len());
    for dataset in datasets {
        let base = file_stem(dataset);
        let mut stem = base.clone();
        let mut n = 1;
        while used.contains(&stem) {
            n += 1;
            stem = format!("{base}_{n}");
        }
        if n > 1 {
            warn!(dataset = %dataset, stem = %stem, "file stem collides with another dataset");
        }
        used.push(stem);
    }
    used
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("meta-llama/Llama-2-7b-hf"), "Llama-2-7b-hf");
        assert_eq!(display_name("gpt2-xl"), "GPT2-XL");
        assert_eq!(display_name("DistilGPT2"), "DistilGPT2");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("mmlu_10k"), "mmlu_10k");
        assert_eq!(file_stem("My Data/Set"), "my_data_set");
    }

    #[test]
    fn test_colliding_stems_are_made_unique() {
        let datasets: Vec<String> = ["a b", "a_b", "A-B", "mmlu_10k"]
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(dataset_file_stems(&datasets), vec!["a_b", "a_b_2", "a_b_3", "mmlu_10k"]);
    }
}

// src/model_names.rs
