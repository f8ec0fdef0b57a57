use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Route the classifier service serves predictions on.
pub const PREDICT_PATH: &str = "predict";

/// Row-major tiers of every cell; serialized as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridSnapshot(pub Vec<u8>);

impl GridSnapshot {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    pub prediction: serde_json::Value,
}

/// Render-ready label returned by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionLabel(pub String);

impl PredictionLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PredictionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("prediction field is {kind}, expected a string, number or boolean")]
pub struct UnsupportedLabel {
    pub kind: &'static str,
}

impl TryFrom<PredictResponse> for PredictionLabel {
    type Error = UnsupportedLabel;

    fn try_from(value: PredictResponse) -> Result<Self, Self::Error> {
        match value.prediction {
            serde_json::Value::String(text) => Ok(Self(text)),
            serde_json::Value::Number(number) => Ok(Self(number.to_string())),
            serde_json::Value::Bool(flag) => Ok(Self(flag.to_string())),
            serde_json::Value::Null => Err(UnsupportedLabel { kind: "null" }),
            serde_json::Value::Array(_) => Err(UnsupportedLabel { kind: "an array" }),
            serde_json::Value::Object(_) => Err(UnsupportedLabel { kind: "an object" }),
        }
    }
}
