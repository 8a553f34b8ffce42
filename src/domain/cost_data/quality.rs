use serde::{Deserialize, Serialize};

/// How trustworthy a cached record is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    /// Returned by a live provider
    Verified,
    /// Produced by a deterministic estimator
    Estimated,
    /// Flagged as out of date by an external collaborator
    Outdated,
}

impl DataQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataQuality::Verified => "verified",
            DataQuality::Estimated => "estimated",
            DataQuality::Outdated => "outdated",
        }
    }
}

impl std::fmt::Display for DataQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
