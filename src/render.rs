use std::fmt::Write as _;

use crossterm::style::{style, Color, Stylize};
use serde_json::{json, Value};

use crate::presenter::{FeatureRow, PresentationModel};
use crate::risk::{Icon, Tone};
use crate::state::{ScanFailure, ViewState};

const LABEL_WIDTH: usize = 20;

fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::AlertTriangle => "⚠",
        Icon::CheckCircle => "✔",
        Icon::Lock => "🔒",
        Icon::Globe => "🌐",
        Icon::Shield => "🛡",
    }
}

fn color(tone: Tone) -> Color {
    match tone {
        Tone::Safe => Color::Green,
        Tone::Warning => Color::Yellow,
        Tone::Danger => Color::Red,
        Tone::Muted => Color::Grey,
        Tone::Accent => Color::Cyan,
    }
}

/// Plain-text terminal renderer. Color is optional so output stays clean
/// when piped.
pub struct TextRenderer {
    color: bool,
}

impl TextRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        style(text).with(color(tone)).to_string()
    }

    fn heading(&self, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        style(text).bold().to_string()
    }

    pub fn render(&self, state: &ViewState) -> String {
        match state {
            ViewState::Idle => String::new(),
            ViewState::Scanning { url } => format!("Scanning {url} ...\n"),
            ViewState::Resolved { model, .. } => self.render_model(model),
            ViewState::Failed(failure) => self.render_failure(failure),
        }
    }

    pub fn render_failure(&self, failure: &ScanFailure) -> String {
        format!("{}\n", self.paint(&failure.message, Tone::Danger))
    }

    fn render_row(&self, out: &mut String, row: &FeatureRow) {
        let value = match row.icon {
            Some(icon) => format!("{} {}", glyph(icon), row.value),
            None => row.value.clone(),
        };
        let _ = writeln!(
            out,
            "  {:<width$}{}",
            row.label,
            self.paint(&value, row.hint.tone()),
            width = LABEL_WIDTH
        );
    }

    pub fn render_model(&self, model: &PresentationModel) -> String {
        let mut out = String::new();

        let header = format!("{} {}", glyph(model.icon), model.title);
        let _ = writeln!(
            out,
            "{}  [{}]",
            self.paint(&header, model.tone),
            self.paint(&model.confidence_label, model.tier.tone())
        );
        if !model.message.is_empty() {
            let _ = writeln!(out, "  {}", model.message);
        }
        out.push('\n');

        // Pad before styling so escape codes don't count toward the width.
        let risk_heading = format!("{:<width$}", "Risk Level", width = LABEL_WIDTH);
        let _ = writeln!(
            out,
            "{}  {}",
            self.heading(&risk_heading),
            self.paint(&model.risk_label, model.tier.tone())
        );

        if let Some(reasons) = &model.reasons {
            out.push('\n');
            let _ = writeln!(out, "{}", self.heading("Detection Reasons"));
            for reason in reasons {
                let marker = self.paint(glyph(Icon::AlertTriangle), Tone::Warning);
                let _ = writeln!(out, "  {marker} {reason}");
            }
        }

        out.push('\n');
        let _ = writeln!(out, "{}", self.heading("URL Analysis"));
        for row in &model.features {
            self.render_row(&mut out, row);
        }
        if let Some(extended) = &model.extended_features {
            let _ = writeln!(out, "  {}", "-".repeat(LABEL_WIDTH + 8));
            for row in extended {
                self.render_row(&mut out, row);
            }
        }

        out.push('\n');
        let _ = writeln!(out, "{}", self.heading("Recommendations"));
        for rec in model.recommendations {
            let _ = writeln!(out, "  {} {}", self.paint(glyph(rec.icon), rec.tone), rec.text);
        }

        out
    }
}

pub fn to_json(state: &ViewState) -> Value {
    match state {
        ViewState::Idle => json!({ "status": "idle" }),
        ViewState::Scanning { url } => json!({ "status": "scanning", "url": url }),
        ViewState::Resolved { verdict, model } => json!({
            "status": "resolved",
            "verdict": verdict,
            "presentation": model.as_ref(),
        }),
        ViewState::Failed(failure) => json!({
            "status": "failed",
            "kind": failure.kind,
            "status_code": failure.status,
            "message": failure.message,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ScanVerdict;
    use crate::presenter::present;
    use crate::scanner::ScanError;

    fn strip_escapes(text: &str) -> String {
        let mut out = String::new();
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\u{1b}' {
                // CSI sequences end at the first ASCII letter.
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn resolved(value: Value) -> ViewState {
        let verdict: ScanVerdict = serde_json::from_value(value).expect("verdict");
        let model = Box::new(present(&verdict));
        ViewState::Resolved { verdict, model }
    }

    #[test]
    fn safe_report_without_color() {
        let state = resolved(json!({
            "is_phishing": false,
            "confidence": 0.97,
            "risk_level": "low",
            "message": "Looks safe",
            "features": { "url_length": 19, "domain_length": 11, "num_dots": 1, "is_https": true }
        }));
        let text = TextRenderer::new(false).render(&state);

        assert!(text.starts_with("✔ URL Appears Safe  [97% confidence]\n"));
        assert!(text.contains("  Looks safe\n"));
        assert!(text.contains("LOW"));
        assert!(text.contains("🔒 HTTPS"));
        assert!(text.contains("URL appears to be legitimate"));
        assert!(!text.contains("Detection Reasons"));
        assert!(!text.contains("Phishing Keywords"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn phishing_report_lists_reasons_in_order() {
        let state = resolved(json!({
            "is_phishing": true,
            "confidence": 0.88,
            "risk_level": "high",
            "reasons": ["first reason", "second reason"],
            "features": { "has_suspicious_port": true }
        }));
        let text = TextRenderer::new(false).render(&state);

        assert!(text.starts_with("⚠ High Risk - Phishing Detected"));
        let first = text.find("first reason").expect("first");
        let second = text.find("second reason").expect("second");
        assert!(first < second);
        assert!(text.contains("Phishing Keywords"));
        assert!(text.contains("Do not enter personal information on this website"));
    }

    #[test]
    fn styled_output_uses_escape_codes() {
        let state = resolved(json!({ "is_phishing": false, "risk_level": "low" }));
        let text = TextRenderer::new(true).render(&state);
        assert!(text.contains('\u{1b}'));
        assert!(text.contains("URL Appears Safe"));
    }

    #[test]
    fn risk_level_is_aligned_with_and_without_color() {
        let state = resolved(json!({ "is_phishing": false, "risk_level": "low" }));
        let padded = format!("{:<20}", "Risk Level");

        let plain = TextRenderer::new(false).render(&state);
        assert!(plain.contains(&format!("{padded}  LOW")));

        let styled = strip_escapes(&TextRenderer::new(true).render(&state));
        assert!(styled.contains(&format!("{padded}  LOW")));
    }

    #[test]
    fn scanning_state_renders_progress_line() {
        let state = ViewState::Scanning {
            url: "https://example.com".into(),
        };
        assert_eq!(
            TextRenderer::new(false).render(&state),
            "Scanning https://example.com ...\n"
        );
    }

    #[test]
    fn failure_text_carries_the_message() {
        let failure = ScanFailure::from_error(&ScanError::Transport(500), "http://x/predict");
        let text = TextRenderer::new(false).render(&ViewState::Failed(failure));
        assert!(text.starts_with("Failed to scan URL: server returned 500."));
        assert!(text.contains("http://x/predict"));
    }

    #[test]
    fn failure_json() {
        let failure = ScanFailure::from_error(&ScanError::Transport(503), "http://x/predict");
        let value = to_json(&ViewState::Failed(failure));
        assert_eq!(value["status"], "failed");
        assert_eq!(value["kind"], "transport");
        assert_eq!(value["status_code"], 503);
    }

    #[test]
    fn resolved_json_carries_presentation() {
        let state = resolved(json!({ "is_phishing": true, "risk_level": "Medium" }));
        let value = to_json(&state);
        assert_eq!(value["status"], "resolved");
        assert_eq!(value["presentation"]["title"], "Suspicious URL Detected");
        assert_eq!(value["presentation"]["tier"], "medium");
        assert_eq!(value["presentation"]["extended_features"][0]["value"], "0");
        assert_eq!(value["verdict"]["risk_level"], "Medium");
    }
}
