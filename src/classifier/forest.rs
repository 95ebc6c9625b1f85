use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;

use super::Classifier;
use crate::models::FeatureRecord;

/// Random-forest model loaded from the JSON artifact written by the offline
/// training job. Read-only once loaded.
///
/// Probability is the mean of per-tree leaf fractions; the hard label is the
/// majority class, with an exact 0.5 tie going to benign.
#[derive(Debug, Deserialize)]
pub struct ForestModel {
    /// Column count the model was trained on; checked against
    /// [`FeatureRecord::FIELD_COUNT`] at load.
    n_features: usize,
    trees: Vec<Tree>,
}

#[derive(Debug, Deserialize)]
struct Tree {
    nodes: Vec<Node>,
}

/// Flat node array; `left`/`right` index into it. A leaf carries the
/// fraction of phishing samples that reached it during training.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        phishing: f64,
    },
}

impl ForestModel {
    /// Load and validate a model file. A missing, malformed, or
    /// schema-mismatched file is a startup error, not a per-request one.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read model file {}", path.display()))?;
        let model: ForestModel = serde_json::from_str(&content)
            .with_context(|| format!("malformed model file {}", path.display()))?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.n_features != FeatureRecord::FIELD_COUNT {
            bail!(
                "model was trained on {} features, this build extracts {}",
                self.n_features,
                FeatureRecord::FIELD_COUNT
            );
        }
        if self.trees.is_empty() {
            bail!("model contains no trees");
        }
        for (i, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                bail!("tree {} is empty", i);
            }
            for node in &tree.nodes {
                if let Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } = node
                {
                    if *feature >= self.n_features {
                        bail!("tree {} splits on unknown feature {}", i, feature);
                    }
                    if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                        bail!("tree {} has an out-of-range child index", i);
                    }
                }
            }
        }
        Ok(())
    }

    /// Mean phishing fraction across all trees.
    fn proba(&self, record: &FeatureRecord) -> Result<f64> {
        let sample = record.to_vector();
        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.proba(&sample)?;
        }
        Ok(sum / self.trees.len() as f64)
    }
}

impl Tree {
    fn proba(&self, sample: &[f64]) -> Result<f64> {
        let mut idx = 0;
        // Index validity is checked at load; the hop bound catches a cycle
        // in a hand-edited file.
        for _ in 0..self.nodes.len() {
            match &self.nodes[idx] {
                Node::Leaf { phishing } => return Ok(*phishing),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = sample
                        .get(*feature)
                        .copied()
                        .ok_or_else(|| anyhow!("record has no feature column {}", feature))?;
                    idx = if value <= *threshold { *left } else { *right };
                }
            }
        }
        Err(anyhow!("tree walk did not reach a leaf"))
    }
}

impl Classifier for ForestModel {
    fn predict(&self, record: &FeatureRecord) -> Result<u8> {
        // Exact tie goes to benign
        Ok(u8::from(self.proba(record)? > 0.5))
    }

    fn predict_proba(&self, record: &FeatureRecord) -> Result<f64> {
        self.proba(record)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    // One tree splitting on is_ip_address (column 4), one on contains_https
    // (column 1).
    const MODEL: &str = r#"{
        "n_features": 5,
        "trees": [
            {"nodes": [
                {"feature": 4, "threshold": 0.5, "left": 1, "right": 2},
                {"phishing": 0.2},
                {"phishing": 0.9}
            ]},
            {"nodes": [
                {"feature": 1, "threshold": 0.5, "left": 1, "right": 2},
                {"phishing": 0.8},
                {"phishing": 0.1}
            ]}
        ]
    }"#;

    fn record(contains_https: u8, is_ip_address: bool) -> FeatureRecord {
        FeatureRecord {
            url_length: 20,
            contains_https,
            domain_age_days: 100,
            special_char_count: 3,
            is_ip_address,
        }
    }

    fn model() -> ForestModel {
        let model: ForestModel = serde_json::from_str(MODEL).unwrap();
        model.validate().unwrap();
        model
    }

    #[test]
    fn test_proba_is_mean_of_trees() {
        let m = model();
        // ip host, no https: (0.9 + 0.8) / 2
        let p = m.predict_proba(&record(0, true)).unwrap();
        assert!((p - 0.85).abs() < 1e-9);
        assert_eq!(m.predict(&record(0, true)).unwrap(), 1);
    }

    #[test]
    fn test_benign_path() {
        let m = model();
        // https, no ip host: (0.2 + 0.1) / 2
        let p = m.predict_proba(&record(1, false)).unwrap();
        assert!((p - 0.15).abs() < 1e-9);
        assert_eq!(m.predict(&record(1, false)).unwrap(), 0);
    }

    #[test]
    fn test_exact_tie_is_benign() {
        let json = r#"{"n_features": 5, "trees": [{"nodes": [{"phishing": 0.5}]}]}"#;
        let m: ForestModel = serde_json::from_str(json).unwrap();
        assert_eq!(m.predict(&record(0, false)).unwrap(), 0);
    }

    #[test]
    fn test_load_rejects_feature_count_mismatch() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, r#"{{"n_features": 3, "trees": [{{"nodes": [{{"phishing": 1.0}}]}}]}}"#)
            .unwrap();
        assert!(ForestModel::load(f.path()).is_err());
    }

    #[test]
    fn test_load_rejects_out_of_range_child() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"n_features": 5, "trees": [{{"nodes": [
                {{"feature": 0, "threshold": 1.0, "left": 1, "right": 9}},
                {{"phishing": 0.0}}
            ]}}]}}"#
        )
        .unwrap();
        assert!(ForestModel::load(f.path()).is_err());
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "not a model").unwrap();
        assert!(ForestModel::load(f.path()).is_err());
    }

    #[test]
    fn test_cycle_is_an_error_not_a_hang() {
        let json = r#"{"n_features": 5, "trees": [{"nodes": [
            {"feature": 0, "threshold": 1e9, "left": 0, "right": 0}
        ]}]}"#;
        let m: ForestModel = serde_json::from_str(json).unwrap();
        assert!(m.predict(&record(0, false)).is_err());
    }
}
