//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::models::{
    AnalysisRequest, AnalysisResult, CompanyType, ConfigurationOptions, ExperienceLevel,
    TargetRegion, MAX_MATCH_PERCENTAGE,
};
use crate::analysis::pipeline::run_analysis;
use crate::analysis::report::{render_text_report, DashboardView};
use crate::document::extract_pdf_text;
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub result: AnalysisResult,
    pub dashboard: DashboardView,
    pub report_text: String,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub experience_level: Vec<&'static str>,
    pub target_region: Vec<&'static str>,
    pub target_company: Vec<&'static str>,
}

/// Raw multipart fields, before validation.
#[derive(Default)]
struct AnalyzeForm {
    job_description: Option<String>,
    resume: Option<Bytes>,
    experience_level: Option<String>,
    target_region: Option<String>,
    target_company: Option<String>,
}

impl AnalyzeForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = AnalyzeForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume" => {
                    form.resume = Some(field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("Could not read resume upload: {e}"))
                    })?)
                }
                "job_description" | "experience_level" | "target_region" | "target_company" => {
                    let value = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Could not read field '{name}': {e}"))
                    })?;
                    let slot = match name.as_str() {
                        "job_description" => &mut form.job_description,
                        "experience_level" => &mut form.experience_level,
                        "target_region" => &mut form.target_region,
                        _ => &mut form.target_company,
                    };
                    *slot = Some(value);
                }
                // Unknown fields are ignored
                _ => {}
            }
        }

        Ok(form)
    }

    fn configuration(&self) -> Result<ConfigurationOptions, AppError> {
        Ok(ConfigurationOptions {
            experience_level: parse_option::<ExperienceLevel>(&self.experience_level)?,
            target_region: parse_option::<TargetRegion>(&self.target_region)?,
            target_company: parse_option::<CompanyType>(&self.target_company)?,
        })
    }
}

/// Blank or absent selector → `None`; otherwise the label must name a variant.
fn parse_option<T>(raw: &Option<String>) -> Result<Option<T>, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::Validation(e.to_string())),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Multipart upload of a JD and a resume PDF. Extracts the resume text, asks the
/// model for an analysis, and returns the parsed result with dashboard data.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let form = AnalyzeForm::read(multipart).await?;

    let job_description = form
        .job_description
        .as_deref()
        .map(str::trim)
        .filter(|jd| !jd.is_empty())
        .map(String::from);
    // Browsers send an empty file part when no file was chosen
    let resume = form.resume.clone().filter(|bytes| !bytes.is_empty());
    let (Some(job_description_text), Some(resume)) = (job_description, resume) else {
        return Err(AppError::Validation(
            "Please upload both Resume and JD.".to_string(),
        ));
    };
    let configuration = form.configuration()?;

    let llm = state
        .llm
        .clone()
        .ok_or(AppError::MissingConfiguration("GEMINI_API_KEY"))?;

    let analysis_id = Uuid::new_v4();
    info!(
        %analysis_id,
        resume_bytes = resume.len(),
        jd_chars = job_description_text.len(),
        ?configuration,
        "Starting analysis"
    );

    let resume_text = extract_pdf_text(resume).await?;

    let request = AnalysisRequest {
        resume_text,
        job_description_text,
        configuration,
    };
    let result = run_analysis(llm.as_ref(), &request).await?;

    info!(%analysis_id, match_percentage = result.match_percentage, "Analysis complete");

    Ok(Json(AnalyzeResponse {
        analysis_id,
        dashboard: DashboardView::from_result(&result),
        report_text: render_text_report(&result, Utc::now()),
        result,
    }))
}

/// POST /api/v1/report
///
/// Renders a previously returned result as a downloadable text file.
/// The result comes from the client, so the 0..=100 score range is checked again.
pub async fn handle_report(
    Json(result): Json<AnalysisResult>,
) -> Result<impl IntoResponse, AppError> {
    if result.match_percentage > MAX_MATCH_PERCENTAGE {
        return Err(AppError::Validation(format!(
            "match_percentage must be between 0 and {MAX_MATCH_PERCENTAGE}, got {}",
            result.match_percentage
        )));
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"ATS_Report.txt\"",
            ),
        ],
        render_text_report(&result, Utc::now()),
    ))
}

/// GET /api/v1/options
///
/// Declared selector values, for populating the UI.
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        experience_level: ExperienceLevel::ALL.iter().map(|v| v.label()).collect(),
        target_region: TargetRegion::ALL.iter().map(|v| v.label()).collect(),
        target_company: CompanyType::ALL.iter().map(|v| v.label()).collect(),
    })
}
