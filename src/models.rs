use serde::{Deserialize, Serialize};

/// Fixed-schema feature summary of a URL, the classifier's input.
///
/// The model is trained on these five columns in this exact order; field set
/// and order never vary. [`FeatureRecord::to_vector`] is the single place the
/// struct is flattened into that column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub url_length: u32,
    /// 0/1 rather than bool — the column is numeric in the training data.
    pub contains_https: u8,
    pub domain_age_days: u32,
    pub special_char_count: u32,
    pub is_ip_address: bool,
}

impl FeatureRecord {
    /// Number of columns the classifier expects.
    pub const FIELD_COUNT: usize = 5;

    /// Flatten into the column order the model was trained on:
    /// `[url_length, contains_https, domain_age_days, special_char_count, is_ip_address]`.
    pub fn to_vector(&self) -> [f64; Self::FIELD_COUNT] {
        [
            f64::from(self.url_length),
            f64::from(self.contains_https),
            f64::from(self.domain_age_days),
            f64::from(self.special_char_count),
            f64::from(u8::from(self.is_ip_address)),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLabel {
    Benign,
    Phishing,
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLabel::Benign => write!(f, "benign"),
            RiskLabel::Phishing => write!(f, "phishing"),
        }
    }
}

/// Final risk call for one URL. Built per request, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub label: RiskLabel,
    /// Phishing-class probability as a percentage, rounded to 2 decimals.
    pub confidence: f64,
}

impl Verdict {
    pub fn message(&self) -> &'static str {
        match self.label {
            RiskLabel::Phishing => "Warning: this may be a phishing URL",
            RiskLabel::Benign => "This URL appears safe",
        }
    }
}

/// One scored URL as handed to the report layer: verdict plus the feature
/// values it was derived from.
#[derive(Debug, Clone, Serialize)]
pub struct UrlReport {
    pub url: String,
    pub verdict: Verdict,
    pub features: FeatureRecord,
}
