//! Result file naming.
//!
//! A result file name is the list of `key=value` fragments identifying a
//! combination, joined with `&`, with package prefixes such as `meta.` removed
//! so the names stay readable:
//!
//! ```text
//! ensemble=(OzaBag -s 100)&file=covtypeNorm.arff&class_index=55.csv
//! ensemble=(OnlineSIRUOS -s 100 -n bayes.NaiveBayes)&stream=SEAGenerator&imb_ratio=0.9;0.1.csv
//! ```

use crate::dataset::DatasetSpec;

/// Prefixes removed from result names by default
pub const DEFAULT_STRIP_PREFIXES: [&str; 6] = [
    "meta.",
    "generators.",
    "functions.",
    "trees.",
    "moa.",
    "classifiers.",
];

pub const RESULT_EXTENSION: &str = "csv";

/// Build the result file name for one combination.
pub fn result_file_name(
    ensemble: &str,
    dataset: &DatasetSpec,
    imb_ratio: Option<&str>,
    strip_prefixes: &[String],
) -> String {
    let mut fragments = vec![format!("ensemble={ensemble}")];
    match dataset {
        DatasetSpec::Arff { class_index, .. } => {
            fragments.push(format!("file={}", dataset.label()));
            fragments.push(format!("class_index={class_index}"));
        }
        DatasetSpec::Generator { descriptor } => {
            fragments.push(format!("stream={descriptor}"));
        }
    }
    if let Some(ratio) = imb_ratio {
        fragments.push(format!("imb_ratio={ratio}"));
    }

    let mut name = format!("{}.{RESULT_EXTENSION}", fragments.join("&"));
    for prefix in strip_prefixes.iter().filter(|p| !p.is_empty()) {
        name = name.replace(prefix.as_str(), "");
    }
    name.replace(['/', '\\'], "_")
}
