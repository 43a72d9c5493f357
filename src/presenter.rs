//! Turns a [`ScanVerdict`] into a rendering-agnostic presentation model.
//!
//! Everything here is a pure function of the verdict: the same verdict always
//! yields the same model. Out-of-range numbers are clamped (confidence into
//! `[0, 1]`, counts to `>= 0`) before they reach the model.

use serde::Serialize;

use crate::domain::{ScanVerdict, UrlFeatures};
use crate::risk::{treatment, ExtendedHints, FeatureHints, Hint, Icon, Tier, Tone};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationModel {
    pub is_phishing: bool,
    pub tier: Tier,
    pub title: &'static str,
    pub icon: Icon,
    pub tone: Tone,
    pub card_class: &'static str,
    pub message: String,
    pub confidence_pct: u8,
    pub confidence_label: String,
    pub badge_class: &'static str,
    pub risk_label: String,
    pub reasons: Option<Vec<String>>,
    pub features: Vec<FeatureRow>,
    pub extended_features: Option<Vec<FeatureRow>>,
    pub recommendations: &'static [Recommendation],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub label: &'static str,
    pub value: String,
    pub hint: Hint,
    pub class: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
}

impl FeatureRow {
    fn new(label: &'static str, value: String, hint: Hint) -> Self {
        Self {
            label,
            value,
            hint,
            class: hint.class(),
            icon: None,
        }
    }

    fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub icon: Icon,
    pub tone: Tone,
    pub text: &'static str,
}

pub const DANGER_RECOMMENDATIONS: [Recommendation; 4] = [
    Recommendation {
        icon: Icon::AlertTriangle,
        tone: Tone::Danger,
        text: "Do not enter personal information on this website",
    },
    Recommendation {
        icon: Icon::AlertTriangle,
        tone: Tone::Danger,
        text: "Close this tab immediately if you haven't already",
    },
    Recommendation {
        icon: Icon::AlertTriangle,
        tone: Tone::Danger,
        text: "Report this URL to your security team or browser",
    },
    Recommendation {
        icon: Icon::AlertTriangle,
        tone: Tone::Danger,
        text: "If you've entered information, change passwords immediately",
    },
];

pub const SAFE_RECOMMENDATIONS: [Recommendation; 4] = [
    Recommendation {
        icon: Icon::CheckCircle,
        tone: Tone::Safe,
        text: "URL appears to be legitimate",
    },
    Recommendation {
        icon: Icon::Globe,
        tone: Tone::Accent,
        text: "Always verify the domain before entering sensitive data",
    },
    Recommendation {
        icon: Icon::Shield,
        tone: Tone::Accent,
        text: "Look for HTTPS encryption on login pages",
    },
    Recommendation {
        icon: Icon::Lock,
        tone: Tone::Accent,
        text: "Be cautious of unexpected emails or links",
    },
];

pub fn recommendations(is_phishing: bool) -> &'static [Recommendation] {
    if is_phishing {
        &DANGER_RECOMMENDATIONS
    } else {
        &SAFE_RECOMMENDATIONS
    }
}

pub fn confidence_pct(confidence: f64) -> u8 {
    // NaN clamps to itself, so catch it before the cast.
    if confidence.is_nan() {
        return 0;
    }
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "Yes" } else { "No" };
    text.to_string()
}

fn count(n: i64) -> String {
    n.max(0).to_string()
}

fn risk_label(risk_level: Option<&str>) -> String {
    match risk_level {
        Some(raw) if !raw.is_empty() => raw.to_uppercase(),
        _ => "UNKNOWN".to_string(),
    }
}

fn feature_rows(f: &UrlFeatures) -> Vec<FeatureRow> {
    let hints = FeatureHints::of(f);
    let protocol_icon = if f.is_https { Icon::Lock } else { Icon::AlertTriangle };
    vec![
        FeatureRow::new(
            "Protocol",
            if f.is_https { "HTTPS" } else { "HTTP" }.to_string(),
            hints.protocol,
        )
        .with_icon(protocol_icon),
        FeatureRow::new("URL Length", count(f.url_length), hints.url_length),
        FeatureRow::new("Domain Length", count(f.domain_length), hints.domain_length),
        FeatureRow::new("Subdomains", count(f.num_dots), hints.num_dots),
        FeatureRow::new("URL Shortener", yes_no(f.is_url_shortener), hints.url_shortener),
        FeatureRow::new(
            "Suspicious Port",
            yes_no(f.has_suspicious_port),
            hints.suspicious_port,
        ),
    ]
}

fn extended_rows(f: &UrlFeatures) -> Vec<FeatureRow> {
    let hints = ExtendedHints::of(f);
    vec![
        FeatureRow::new(
            "Phishing Keywords",
            count(f.phishing_keywords_count.unwrap_or(0)),
            hints.phishing_keywords,
        ),
        FeatureRow::new(
            "Brand Impersonation",
            yes_no(f.brand_impersonation.unwrap_or(false)),
            hints.brand_impersonation,
        ),
        FeatureRow::new(
            "Typosquatting",
            yes_no(f.has_typosquatting.unwrap_or(false)),
            hints.typosquatting,
        ),
    ]
}

pub fn present(verdict: &ScanVerdict) -> PresentationModel {
    let tier = Tier::normalize(verdict.risk_level.as_deref());
    let t = treatment(verdict.is_phishing, tier);
    let pct = confidence_pct(verdict.confidence);

    let reasons = verdict
        .reasons
        .as_ref()
        .filter(|r| !r.is_empty())
        .cloned();

    PresentationModel {
        is_phishing: verdict.is_phishing,
        tier,
        title: t.title,
        icon: t.icon,
        tone: t.tone,
        card_class: t.card_class,
        message: verdict.message.clone().unwrap_or_default(),
        confidence_pct: pct,
        confidence_label: format!("{pct}% confidence"),
        badge_class: tier.badge_class(),
        risk_label: risk_label(verdict.risk_level.as_deref()),
        reasons,
        features: feature_rows(&verdict.features),
        extended_features: verdict
            .is_phishing
            .then(|| extended_rows(&verdict.features)),
        recommendations: recommendations(verdict.is_phishing),
    }
}
