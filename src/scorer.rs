//! Feature assembly and risk scoring.
//!
//! [`Scorer::score`] is the single entry point every front-end uses: URL in,
//! [`UrlReport`] out. The classifier rides behind an `Arc` so concurrent
//! requests share one read-only model.

use std::sync::Arc;

use crate::classifier::Classifier;
use crate::features;
use crate::lookup::DomainAgeResolver;
use crate::models::{FeatureRecord, RiskLabel, UrlReport, Verdict};

/// The failures a caller can actually see. Lookup degradation is absorbed
/// before this layer; only a missing URL or a classifier fault surfaces.
#[derive(Debug)]
pub enum ScoreError {
    /// No URL supplied.
    MissingInput,
    /// The classifier rejected the record or failed internally.
    Classifier(anyhow::Error),
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::MissingInput => write!(f, "no URL provided"),
            ScoreError::Classifier(e) => write!(f, "scoring failed: {}", e),
        }
    }
}

impl std::error::Error for ScoreError {}

/// Scoring pipeline: lexical features plus registration age in, verdict out.
pub struct Scorer {
    classifier: Arc<dyn Classifier>,
    /// `None` in offline mode; `domain_age_days` is then the same 0 a
    /// failed lookup degrades to.
    resolver: Option<DomainAgeResolver>,
}

impl Scorer {
    pub fn new(classifier: Arc<dyn Classifier>, resolver: Option<DomainAgeResolver>) -> Self {
        Self {
            classifier,
            resolver,
        }
    }

    /// Score one URL end to end.
    pub async fn score(&self, url: &str) -> Result<UrlReport, ScoreError> {
        if url.is_empty() {
            return Err(ScoreError::MissingInput);
        }

        let features = self.assemble(url).await;
        let verdict = self.classify(&features)?;

        Ok(UrlReport {
            url: url.to_string(),
            verdict,
            features,
        })
    }

    /// Build the five-field record in its fixed order. The registration
    /// lookup is the only call here that can take real time, and it
    /// degrades to 0 on any failure instead of aborting the request.
    async fn assemble(&self, url: &str) -> FeatureRecord {
        let domain_age_days = match &self.resolver {
            Some(resolver) => resolver.resolve(url).await,
            None => 0,
        };

        FeatureRecord {
            url_length: features::url_length(url),
            contains_https: features::contains_https(url),
            domain_age_days,
            special_char_count: features::special_char_count(url),
            is_ip_address: features::is_ip_address(url),
        }
    }

    /// Turn the classifier's decision into a verdict. The binary call is
    /// the model's own decision boundary; confidence is reported alongside
    /// and never overrides the label.
    fn classify(&self, record: &FeatureRecord) -> Result<Verdict, ScoreError> {
        let class = self
            .classifier
            .predict(record)
            .map_err(ScoreError::Classifier)?;
        let proba = self
            .classifier
            .predict_proba(record)
            .map_err(ScoreError::Classifier)?;

        let label = if class == 1 {
            RiskLabel::Phishing
        } else {
            RiskLabel::Benign
        };
        let confidence = (proba * 10_000.0).round() / 100.0;

        Ok(Verdict { label, confidence })
    }
}
