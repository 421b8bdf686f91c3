//! Flat SVG status badge for the worst risk in a batch.

use slipcheck_core::{RiskAssessment, RiskLevel};

const LABEL: &str = "slippage risk";
const LABEL_WIDTH: usize = 86;
/// Approximate advance of one 11px Verdana glyph.
const CHAR_WIDTH: usize = 7;
const PADDING: usize = 10;

fn color(risk: Option<RiskAssessment>) -> &'static str {
    match risk.map(|r| r.level) {
        Some(RiskLevel::Low) => "#4c1",
        Some(RiskLevel::Medium) => "#dfb317",
        Some(RiskLevel::High) => "#e05d44",
        None => "#9f9f9f",
    }
}

fn value_text(risk: Option<RiskAssessment>) -> String {
    match risk {
        Some(r) => format!("{} {}", r.level, r.score),
        None => "n/a".to_string(),
    }
}

/// Render the badge. `None` (nothing decoded) renders a grey `n/a`.
pub fn render(risk: Option<RiskAssessment>) -> String {
    let value = value_text(risk);
    let value_width = value.len() * CHAR_WIDTH + PADDING;
    let width = LABEL_WIDTH + value_width;
    let label_x = LABEL_WIDTH / 2;
    let value_x = LABEL_WIDTH + value_width / 2;
    let fill = color(risk);

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="20" role="img" aria-label="{LABEL}: {value}">
  <title>{LABEL}: {value}</title>
  <rect width="{LABEL_WIDTH}" height="20" fill="#555"/>
  <rect x="{LABEL_WIDTH}" width="{value_width}" height="20" fill="{fill}"/>
  <g fill="#fff" text-anchor="middle" font-family="Verdana,Geneva,DejaVu Sans,sans-serif" font-size="11">
    <text x="{label_x}" y="14">{LABEL}</text>
    <text x="{value_x}" y="14">{value}</text>
  </g>
</svg>
"##
    )
}
