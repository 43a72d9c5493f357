use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::scanner::ScanError;

/// Body sent to the scanning service. Only constructed through [`ScanRequest::new`],
/// which guarantees the url is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanRequest {
    url: String,
}

impl ScanRequest {
    pub fn new(input: &str) -> Result<Self, ScanError> {
        let url = input.trim();
        if url.is_empty() {
            return Err(ScanError::Validation);
        }
        Ok(Self { url: url.to_string() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Verdict returned by the scanning service.
///
/// Only `is_phishing` is strictly required. Every other field is decoded
/// leniently: absent, null or wrongly typed values fall back to defaults
/// instead of failing the scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanVerdict {
    pub is_phishing: bool,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub risk_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_features")]
    pub features: UrlFeatures,
    #[serde(default, deserialize_with = "lenient_reasons")]
    pub reasons: Option<Vec<String>>,
}

/// Supporting evidence measured by the service. Counts are signed on the
/// wire so an out-of-range value decodes and gets clamped instead of
/// failing the whole scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlFeatures {
    #[serde(deserialize_with = "lenient_count")]
    pub url_length: i64,
    #[serde(deserialize_with = "lenient_count")]
    pub domain_length: i64,
    #[serde(deserialize_with = "lenient_count")]
    pub num_dots: i64,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_https: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub has_suspicious_port: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_url_shortener: bool,

    // Only reported for phishing verdicts.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_count"
    )]
    pub phishing_keywords_count: Option<i64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_bool"
    )]
    pub brand_impersonation: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_bool"
    )]
    pub has_typosquatting: Option<bool>,
}

// Lenient field decoders. Each reads whatever JSON value is present and
// keeps it only when it has a usable shape.

fn as_count(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|n| n.is_finite()).map(|n| n as i64))
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Value::deserialize(d)?.as_f64().unwrap_or_default())
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Value::deserialize(d)?.as_str().map(str::to_string))
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(Value::deserialize(d)?.as_bool().unwrap_or_default())
}

fn lenient_opt_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(Value::deserialize(d)?.as_bool())
}

fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    Ok(as_count(&Value::deserialize(d)?).unwrap_or_default())
}

fn lenient_opt_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    Ok(as_count(&Value::deserialize(d)?))
}

fn lenient_features<'de, D: Deserializer<'de>>(d: D) -> Result<UrlFeatures, D::Error> {
    let value = Value::deserialize(d)?;
    if !value.is_object() {
        return Ok(UrlFeatures::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// A bare string counts as a single reason; non-string entries are dropped.
fn lenient_reasons<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
    let reasons = match Value::deserialize(d)? {
        Value::String(reason) => Some(vec![reason]),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(reason) => Some(reason),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    };
    Ok(reasons)
}

impl ScanVerdict {
    /// Lists fields outside their documented range, for logging.
    pub fn out_of_range_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if !(0.0..=1.0).contains(&self.confidence) {
            fields.push("confidence");
        }
        let f = &self.features;
        if f.url_length < 0 {
            fields.push("url_length");
        }
        if f.domain_length < 0 {
            fields.push("domain_length");
        }
        if f.num_dots < 0 {
            fields.push("num_dots");
        }
        if f.phishing_keywords_count.is_some_and(|n| n < 0) {
            fields.push("phishing_keywords_count");
        }
        fields
    }
}
