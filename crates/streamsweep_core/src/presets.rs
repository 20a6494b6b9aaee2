//! Built-in sweep definitions.
//!
//! - `arff`: real-world ARFF streams against the full ensemble catalog
//! - `imbalanced`: synthetic generators wrapped in `ImbalancedStream`, one run per ratio
//! - `drift`: synthetic generators through a cascade of concept drifts with
//!   worsening imbalance

use std::fmt;
use std::str::FromStr;

use crate::config::SweepConfig;
use crate::dataset::DatasetSpec;
use crate::template::CommandTemplate;

/// Passed as `-j` to ensembles that train members in parallel; -1 uses every core
const ENSEMBLE_THREADS: i32 = -1;

const ARFF_TEMPLATE: &str = "java -Xms{heap}g -Xmx{heap}g -cp moa-experiments.jar moa.DoTask \
\"EvaluatePrequential -l {ensemble} -s (ArffFileStream -f {stream} -c {class_index}) \
-e (WindowClassificationPerformanceEvaluator -w {width} -o -p -r -f) \
-f {sample_freq} -q {sample_freq}\"";

const IMBALANCED_TEMPLATE: &str = "java -Xms{heap}g -Xmx{heap}g -cp moa-experiments.jar moa.DoTask \
\"EvaluatePrequential -l {ensemble} -s (ImbalancedStream -s {stream} -c {imb_ratio}) \
-e (WindowClassificationPerformanceEvaluator -w 10000 -o -p -r -f) \
-i {instances} -f 10000 -q 10000\"";

const DRIFT_TEMPLATE: &str = "java -Xms{heap}g -Xmx{heap}g -cp moa-experiments.jar moa.DoTask \
\"EvaluatePrequential -l {ensemble} \
-s (ConceptDriftStream -s (ImbalancedStream -s {stream} -c 0.5;0.5) \
-d (ConceptDriftStream -s (ImbalancedStream -s {stream} -c 0.7;0.3) \
-d (ConceptDriftStream -s (ImbalancedStream -s {stream} -c 0.8;0.2) \
-d (ConceptDriftStream -s (ImbalancedStream -s {stream} -c 0.9;0.1) \
-d (ImbalancedStream -s {stream} -c 0.995;0.005) -p 800000) -p 600000) -p 400000) -p 200000) \
-e (WindowClassificationPerformanceEvaluator -w 10000 -o -p -r -f) \
-i {instances} -f 10000 -q 10000\"";

const ARFF_STREAMS: [(u32, &str); 61] = [
    (17, "streams/bank-marketing.arff"),
    (14, "streams/bike_sharing.arff"),
    (13, "streams/BNG_bridges-1vsAll.arff"),
    (13, "streams/BNG_bridges.arff"),
    (20, "streams/BNG_hepatitis.arff"),
    (19, "streams/BNG_lymph.arff"),
    (14, "streams/BNG_wine.arff"),
    (18, "streams/BNG_zoo.arff"),
    (8, "streams/bpam.arff"),
    (10, "streams/breast.cancer.arff"),
    (42, "streams/census.arff"),
    (7, "streams/chess.arff"),
    (43, "streams/connect-4.arff"),
    (55, "streams/covertype.arff"),
    (55, "streams/covertypeSorted.arff"),
    (73, "streams/covPokElec.arff"),
    (55, "streams/covtypeNorm-1-2vsAll.arff"),
    (55, "streams/covtypeNorm.arff"),
    (31, "streams/creditcardfraud.arff"),
    (177, "streams/CSDS1.arff"),
    (36, "streams/CSDS2.arff"),
    (151, "streams/CSDS3.arff"),
    (4, "streams/dataset-colors-rgb-hsl-hsv-CD.arff"),
    (4, "streams/dataset-rgbcolorsCD.arff"),
    (24, "streams/earthquake.arff"),
    (4, "streams/export_rgb_hsl_CD_optimized.arff"),
    (11, "streams/giveMeLoanKaggle.arff"),
    (6, "streams/IntelLabSensors-1-2-3-4-5-6-7-8-9vsAll.arff"),
    (6, "streams/IntelLabSensors-1-2-3-4-5vsAll.arff"),
    (6, "streams/IntelLabSensors-1-2-3vsAll.arff"),
    (6, "streams/IntelLabSensors-1vsAll.arff"),
    (6, "streams/IntelLabSensors.arff"),
    (1559, "streams/internet_ads.arff"),
    (481, "streams/kdd98.arff"),
    (42, "streams/kdd99.arff"),
    (42, "streams/kdd99_binary.arff"),
    (15, "streams/kyoto.arff"),
    (17, "streams/letterRecognition.arff"),
    (1, "streams/lung-cancer.arff"),
    (119, "streams/nomao.arff"),
    (22, "streams/outdoor.arff"),
    (11, "streams/poker-lsn-1-2vsAll.arff"),
    (11, "streams/poker-lsn.arff"),
    (11, "streams/pokerhand.arff"),
    (11, "streams/pokerhand1M.arff"),
    (3, "streams/powersupply.arff"),
    (31, "streams/pozzolo_credit_card.arff"),
    (18, "streams/primary.tumor.arff"),
    (28, "streams/rialto.arff"),
    (371, "streams/santander.arff"),
    (6, "streams/sensor.arff"),
    (6, "streams/sensorStream.arff"),
    (10, "streams/shuttle.arff"),
    (10, "streams/shuttle_tst_trn_comma_separeted.arff"),
    (30, "streams/sick.arff"),
    (10883, "streams/spam"),
    (500, "streams/spam_corpus.arff"),
    (123, "streams/speeddating.arff"),
    (12, "streams/wineRed.arff"),
    (12, "streams/wineRed100instancias.arff"),
    (12, "streams/wineWhite.arff"),
];

const GENERATORS: [&str; 4] = [
    "generators.AgrawalGenerator",
    "generators.SEAGenerator",
    "generators.AssetNegotiationGenerator",
    "(generators.RandomTreeGenerator -r 1 -i 1)",
];

const IMBALANCE_RATIOS: [&str; 7] = [
    "0.5;0.5",
    "0.7;0.3",
    "0.8;0.2",
    "0.9;0.1",
    "0.95;0.05",
    "0.99;0.01",
    "0.995;0.005",
];

fn full_ensemble_catalog() -> Vec<String> {
    let j = ENSEMBLE_THREADS;
    vec![
        "bayes.NaiveBayes".into(),
        "trees.HoeffdingTree".into(),
        format!(
            "(meta.AdaptiveRandomForest -j {j} -x (ADWINChangeDetector -a 0.001) -p (ADWINChangeDetector -a 0.01))"
        ),
        format!(
            "(meta.AdaptiveRandomForestRE -j {j} -x (ADWINChangeDetector -a 0.001) -p (ADWINChangeDetector -a 0.01))"
        ),
        "(meta.KUE -n 100)".into(),
        "(meta.OzaBag -s 100)".into(),
        "(meta.OzaBoost -s 100)".into(),
        "(meta.OzaBagAdwin -s 100)".into(),
        "(meta.LeveragingBag -s 100)".into(),
        "(meta.LearnNSE -e 100)".into(),
        format!(
            "(meta.CSARF -j {j} -x (ADWINChangeDetector -a 0.001) -p (ADWINChangeDetector -a 0.01))"
        ),
        "(meta.OnlineAdaC2 -l trees.HoeffdingTree -s 100)".into(),
        "(meta.OnlineCSB2 -l trees.HoeffdingTree -s 100)".into(),
        "(meta.OnlineUnderOverBagging -l trees.HoeffdingTree -s 100)".into(),
    ]
}

fn siruos_ensembles() -> Vec<String> {
    vec![
        "(meta.OnlineSIRUOS -s 100 -n (meta.AdaptiveRandomForest -s 100))".into(),
        "(meta.OnlineSIRUOS -s 100 -n (meta.OzaBag -s 100))".into(),
        "(meta.OnlineSIRUOS -s 100 -n bayes.NaiveBayes)".into(),
    ]
}

fn generator_datasets() -> Vec<DatasetSpec> {
    GENERATORS.into_iter().map(DatasetSpec::generator).collect()
}

/// Named built-in sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Arff,
    Imbalanced,
    Drift,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Arff, Preset::Imbalanced, Preset::Drift];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Arff => "arff",
            Preset::Imbalanced => "imbalanced",
            Preset::Drift => "drift",
        }
    }

    pub fn config(self) -> SweepConfig {
        // The templates are compile-time constants covered by tests below.
        let parse = |source: &str| match CommandTemplate::parse(source) {
            Ok(template) => template,
            Err(e) => unreachable!("built-in template is invalid: {e}"),
        };

        match self {
            Preset::Arff => SweepConfig::new(
                parse(ARFF_TEMPLATE),
                ARFF_STREAMS
                    .into_iter()
                    .map(|(class_index, path)| DatasetSpec::arff(path, class_index))
                    .collect(),
                full_ensemble_catalog(),
            )
            .with_nodes(1, 0),
            Preset::Imbalanced => {
                let mut config = SweepConfig::new(
                    parse(IMBALANCED_TEMPLATE),
                    generator_datasets(),
                    siruos_ensembles(),
                )
                .with_nodes(4, 0)
                .with_imbalance_ratios(IMBALANCE_RATIOS.into_iter().map(String::from).collect());
                config.heap_gb = 32;
                config
            }
            Preset::Drift => {
                let mut config = SweepConfig::new(
                    parse(DRIFT_TEMPLATE),
                    generator_datasets(),
                    siruos_ensembles(),
                )
                .with_nodes(4, 0);
                config.heap_gb = 32;
                config
            }
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = Preset::ALL.iter().map(|p| p.name()).collect();
                format!("unknown preset {s:?} (expected one of: {})", names.join(", "))
            })
    }
}
