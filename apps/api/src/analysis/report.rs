//! Dashboard view data and the downloadable plain-text report.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::models::AnalysisResult;

const LEARNING_SEARCH_PREFIX: &str = "https://www.google.com/search?q=free+course+tutorial+";

/// Colour band for the match-score badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Green,
    Amber,
    Red,
}

impl ScoreBand {
    /// ≥80 green, ≥50 amber, anything lower red.
    pub fn for_score(score: u8) -> Self {
        if score >= 80 {
            ScoreBand::Green
        } else if score >= 50 {
            ScoreBand::Amber
        } else {
            ScoreBand::Red
        }
    }

    pub fn hex_color(self) -> &'static str {
        match self {
            ScoreBand::Green => "#4caf50",
            ScoreBand::Amber => "#ff9800",
            ScoreBand::Red => "#f44336",
        }
    }
}

/// A missing keyword paired with a search link for free learning material.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordLink {
    pub keyword: String,
    pub url: String,
}

/// Everything the dashboard needs beyond the raw `AnalysisResult`.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub score_band: ScoreBand,
    pub score_color: &'static str,
    pub keyword_links: Vec<KeywordLink>,
}

impl DashboardView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let score_band = ScoreBand::for_score(result.match_percentage);
        DashboardView {
            score_band,
            score_color: score_band.hex_color(),
            keyword_links: result
                .missing_keywords
                .iter()
                .map(|k| KeywordLink {
                    keyword: k.clone(),
                    url: learning_link(k),
                })
                .collect(),
        }
    }
}

/// Search link for a keyword. Spaces become `+`; nothing else is escaped.
pub fn learning_link(keyword: &str) -> String {
    format!("{LEARNING_SEARCH_PREFIX}{}", keyword.replace(' ', "+"))
}

/// Plain-text report with fixed section headers, suitable for `ATS_Report.txt`.
pub fn render_text_report(result: &AnalysisResult, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str("SMART ATS REPORT\n");
    out.push_str("================\n");
    out.push_str(&format!(
        "Generated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    out.push_str(&format!("Match Score: {}%\n\n", result.match_percentage));

    out.push_str("Profile Summary:\n");
    out.push_str(&result.profile_summary);
    out.push_str("\n\n");

    out.push_str("Missing Keywords:\n");
    if result.missing_keywords.is_empty() {
        out.push_str("None");
    } else {
        out.push_str(&result.missing_keywords.join(", "));
    }
    out.push_str("\n\n");

    out.push_str("Actionable Tips:\n");
    for tip in &result.actionable_tips {
        out.push_str(&format!("- {tip}\n"));
    }
    out.push('\n');

    out.push_str("Interview Questions:\n");
    for (i, question) in result.interview_questions.iter().enumerate() {
        out.push_str(&format!("{}. {question}\n", i + 1));
    }

    out
}
