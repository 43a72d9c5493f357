use serde::{Deserialize, Serialize};

use crate::domain::UrlFeatures;

pub const URL_LENGTH_WARN: i64 = 100;
pub const DOMAIN_LENGTH_WARN: i64 = 30;
pub const NUM_DOTS_WARN: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
    Unknown,
}

impl Tier {
    /// Case-insensitive and total: anything outside high/medium/low,
    /// including a missing value, is `Unknown`.
    pub fn normalize(risk_level: Option<&str>) -> Self {
        match risk_level.map(str::to_lowercase).as_deref() {
            Some("high") => Self::High,
            Some("medium") => Self::Medium,
            Some("low") => Self::Low,
            _ => Self::Unknown,
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Self::High => "bg-destructive/20 text-destructive border-destructive/50",
            Self::Medium => "bg-yellow-500/20 text-yellow-500 border-yellow-500/50",
            Self::Low => "bg-green-500/20 text-green-500 border-green-500/50",
            Self::Unknown => "bg-muted text-muted-foreground border-muted",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::High => Tone::Danger,
            Self::Medium => Tone::Warning,
            Self::Low => Tone::Safe,
            Self::Unknown => Tone::Muted,
        }
    }
}

/// Color family shared by cards, badges and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Safe,
    Warning,
    Danger,
    Muted,
    Accent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    AlertTriangle,
    CheckCircle,
    Lock,
    Globe,
    Shield,
}

/// Header icon, title and card styling picked together for a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Treatment {
    pub icon: Icon,
    pub tone: Tone,
    pub title: &'static str,
    pub card_class: &'static str,
}

const DESTRUCTIVE: Treatment = Treatment {
    icon: Icon::AlertTriangle,
    tone: Tone::Danger,
    title: "High Risk - Phishing Detected",
    card_class: "border-destructive/50 bg-destructive/5",
};

const SUSPICIOUS: Treatment = Treatment {
    icon: Icon::AlertTriangle,
    tone: Tone::Warning,
    title: "Suspicious URL Detected",
    card_class: "border-yellow-500/50 bg-yellow-500/5",
};

const SAFE: Treatment = Treatment {
    icon: Icon::CheckCircle,
    tone: Tone::Safe,
    title: "URL Appears Safe",
    card_class: "border-green-500/50 bg-green-500/5",
};

pub fn treatment(is_phishing: bool, tier: Tier) -> &'static Treatment {
    match (is_phishing, tier) {
        (true, Tier::High) => &DESTRUCTIVE,
        (true, Tier::Medium | Tier::Low | Tier::Unknown) => &SUSPICIOUS,
        (false, _) => &SAFE,
    }
}

/// Per-feature color signal. Never feeds back into the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hint {
    Safe,
    Warn,
    Danger,
}

impl Hint {
    pub fn class(self) -> &'static str {
        match self {
            Self::Safe => "text-green-400",
            Self::Warn => "text-yellow-400",
            Self::Danger => "text-destructive",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::Safe => Tone::Safe,
            Self::Warn => Tone::Warning,
            Self::Danger => Tone::Danger,
        }
    }

    fn when(flag: bool, hint: Hint) -> Self {
        if flag {
            hint
        } else {
            Self::Safe
        }
    }
}

/// Threshold hints for the always-present features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureHints {
    pub protocol: Hint,
    pub url_length: Hint,
    pub domain_length: Hint,
    pub num_dots: Hint,
    pub url_shortener: Hint,
    pub suspicious_port: Hint,
}

impl FeatureHints {
    pub fn of(f: &UrlFeatures) -> Self {
        Self {
            protocol: Hint::when(!f.is_https, Hint::Warn),
            url_length: Hint::when(f.url_length > URL_LENGTH_WARN, Hint::Warn),
            domain_length: Hint::when(f.domain_length > DOMAIN_LENGTH_WARN, Hint::Warn),
            num_dots: Hint::when(f.num_dots > NUM_DOTS_WARN, Hint::Warn),
            url_shortener: Hint::when(f.is_url_shortener, Hint::Warn),
            suspicious_port: Hint::when(f.has_suspicious_port, Hint::Danger),
        }
    }
}

/// Hints for the extended block reported with phishing verdicts. Absent
/// values count as zero/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedHints {
    pub phishing_keywords: Hint,
    pub brand_impersonation: Hint,
    pub typosquatting: Hint,
}

impl ExtendedHints {
    pub fn of(f: &UrlFeatures) -> Self {
        Self {
            phishing_keywords: Hint::when(
                f.phishing_keywords_count.unwrap_or(0) > 0,
                Hint::Danger,
            ),
            brand_impersonation: Hint::when(f.brand_impersonation.unwrap_or(false), Hint::Danger),
            typosquatting: Hint::when(f.has_typosquatting.unwrap_or(false), Hint::Danger),
        }
    }
}
