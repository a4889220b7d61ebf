//! Prompt construction for resume analysis.
//!
//! The fragment tables below are the only configuration-dependent part of the
//! prompt. Each is an exhaustive `match`, so adding a variant without a
//! fragment does not compile.

use crate::analysis::models::{
    AnalysisRequest, CompanyType, ConfigurationOptions, ExperienceLevel, TargetRegion,
};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Persona given to the model as its system instruction.
pub const ANALYSIS_SYSTEM_PERSONA: &str = "You are a Career Coach & Technical Recruiter. \
    Analyze the Resume against the Job Description (JD).";

/// Literal example of the reply shape. Field names must match `AnalysisResult`.
pub const OUTPUT_SCHEMA_EXAMPLE: &str = r#"{
    "match_percentage": 0,
    "missing_keywords": ["keyword1", "keyword2"],
    "profile_summary": "...",
    "actionable_tips": ["tip1", "tip2"],
    "interview_questions": [
        "Question 1 based on JD requirements?",
        "Question 2 based on Resume gaps?",
        "Question 3 technical deep dive?"
    ]
}"#;

/// Instructions that apply regardless of configuration.
const BASE_INSTRUCTIONS: &[&str] = &[
    "Score match_percentage from 0 to 100 based on how well the resume satisfies the JD. Be strict and honest.",
    "List in missing_keywords the skills, tools and keywords from the JD that the resume does not show.",
    "Write profile_summary as a short, direct assessment of the candidate for this role.",
    "Give 3 to 5 actionable_tips that would most improve the resume for this JD.",
    "Give 3 to 5 interview_questions: one based on JD requirements, one based on resume gaps, and a technical deep dive.",
];

/// Full system instruction: persona followed by the JSON-only rules.
pub fn system_instruction() -> String {
    format!("{ANALYSIS_SYSTEM_PERSONA} {JSON_ONLY_SYSTEM}")
}

pub fn experience_fragment(level: ExperienceLevel) -> &'static str {
    match level {
        ExperienceLevel::Fresher => {
            "lenient on work history, strict on projects/internships/core concepts"
        }
        ExperienceLevel::MidLevel => {
            "expect 2-5 years of hands-on delivery; look for feature ownership and measurable impact"
        }
        ExperienceLevel::Senior => {
            "strict on leadership, system design, mentoring and business impact at scale"
        }
    }
}

pub fn region_fragment(region: TargetRegion) -> &'static str {
    match region {
        TargetRegion::India => {
            "concise professional summary, technical skills listed prominently, academic scores for recent graduates"
        }
        TargetRegion::Usa => {
            "no photos, no personal details, reverse-chronological order, action verbs"
        }
        TargetRegion::Europe => {
            "Europass-compatible structure, language proficiency levels (CEFR), at most two pages"
        }
        TargetRegion::Global => {
            "clean single-column ATS-friendly layout, universally understood terminology, no region-specific conventions"
        }
    }
}

pub fn company_fragment(company: CompanyType) -> &'static str {
    match company {
        CompanyType::BigTech => {
            "emphasize data structures & algorithms, scalability and quantified impact"
        }
        CompanyType::Startup => {
            "value versatility, end-to-end ownership, shipping speed and full-stack breadth"
        }
        CompanyType::ServiceConsulting => {
            "value client communication, domain certifications and delivery across multiple projects"
        }
    }
}

/// Role-framing sentence naming whichever dimensions are set.
fn role_framing(options: &ConfigurationOptions) -> String {
    let company = options
        .target_company
        .map(|c| format!("{} companies", c.label()))
        .unwrap_or_else(|| "a hiring company".to_string());
    let region = options
        .target_region
        .map(|r| match r {
            TargetRegion::Global => "the global market".to_string(),
            other => other.label().to_string(),
        })
        .unwrap_or_else(|| "any region".to_string());
    let candidate = options
        .experience_level
        .map(|l| format!("a {} candidate", l.label()))
        .unwrap_or_else(|| "a candidate".to_string());

    format!(
        "Act as an experienced Technical Recruiter hiring for {company} in {region}, screening {candidate}."
    )
}

/// Numbered instruction list: fixed items first, then one per configured dimension.
fn instruction_list(options: &ConfigurationOptions) -> Vec<String> {
    let mut items: Vec<String> = BASE_INSTRUCTIONS.iter().map(|s| s.to_string()).collect();

    if let Some(level) = options.experience_level {
        items.push(format!(
            "Experience level is {}: {}.",
            level.label(),
            experience_fragment(level)
        ));
    }
    if let Some(region) = options.target_region {
        items.push(format!(
            "Judge formatting by {} standards: {}.",
            region.label(),
            region_fragment(region)
        ));
    }
    if let Some(company) = options.target_company {
        items.push(format!(
            "Target company type is {}: {}.",
            company.label(),
            company_fragment(company)
        ));
    }

    items
}

/// Renders the full analysis prompt. Resume and JD texts are embedded verbatim.
pub fn build_analysis_prompt(request: &AnalysisRequest) -> String {
    let instructions = instruction_list(&request.configuration)
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{framing}\n\n\
         RESUME:\n{resume}\n\
         ---\n\
         JOB DESCRIPTION:\n{jd}\n\n\
         INSTRUCTIONS:\n{instructions}\n\n\
         Output purely in this JSON format:\n{schema}",
        framing = role_framing(&request.configuration),
        resume = request.resume_text,
        jd = request.job_description_text,
        schema = OUTPUT_SCHEMA_EXAMPLE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(configuration: ConfigurationOptions) -> AnalysisRequest {
        AnalysisRequest {
            resume_text: "Built a Rust {parser} at Acme".to_string(),
            job_description_text: "Senior Rust Engineer, Kafka required".to_string(),
            configuration,
        }
    }

    #[test]
    fn test_every_variant_has_a_non_empty_fragment() {
        for level in ExperienceLevel::ALL {
            assert!(!experience_fragment(level).trim().is_empty(), "{level:?}");
        }
        for region in TargetRegion::ALL {
            assert!(!region_fragment(region).trim().is_empty(), "{region:?}");
        }
        for company in CompanyType::ALL {
            assert!(!company_fragment(company).trim().is_empty(), "{company:?}");
        }
    }

    #[test]
    fn test_known_fragments_are_exact() {
        assert_eq!(
            region_fragment(TargetRegion::Usa),
            "no photos, no personal details, reverse-chronological order, action verbs"
        );
        assert_eq!(
            experience_fragment(ExperienceLevel::Fresher),
            "lenient on work history, strict on projects/internships/core concepts"
        );
    }

    #[test]
    fn test_prompt_embeds_texts_verbatim_and_schema() {
        let prompt = build_analysis_prompt(&request(ConfigurationOptions::default()));
        assert!(prompt.contains("Built a Rust {parser} at Acme"));
        assert!(prompt.contains("Senior Rust Engineer, Kafka required"));
        for field in [
            "match_percentage",
            "missing_keywords",
            "profile_summary",
            "actionable_tips",
            "interview_questions",
        ] {
            assert!(prompt.contains(field), "schema field {field} missing");
        }
    }

    #[test]
    fn test_unset_dimensions_add_no_instructions() {
        let prompt = build_analysis_prompt(&request(ConfigurationOptions::default()));
        assert!(prompt.contains("screening a candidate"));
        assert!(prompt.contains(&format!("{}. ", BASE_INSTRUCTIONS.len())));
        assert!(!prompt.contains(&format!("{}. ", BASE_INSTRUCTIONS.len() + 1)));
    }

    #[test]
    fn test_configured_dimensions_select_fragments() {
        let prompt = build_analysis_prompt(&request(ConfigurationOptions {
            experience_level: Some(ExperienceLevel::Fresher),
            target_region: Some(TargetRegion::Usa),
            target_company: Some(CompanyType::Startup),
        }));

        assert!(prompt.contains(
            "hiring for Startup companies in USA, screening a Fresher candidate"
        ));
        assert!(prompt.contains(region_fragment(TargetRegion::Usa)));
        assert!(prompt.contains(experience_fragment(ExperienceLevel::Fresher)));
        assert!(prompt.contains(company_fragment(CompanyType::Startup)));
        assert!(!prompt.contains(region_fragment(TargetRegion::Europe)));
        assert!(prompt.contains(&format!("{}. ", BASE_INSTRUCTIONS.len() + 3)));
    }

    #[test]
    fn test_system_instruction_demands_json() {
        let system = system_instruction();
        assert!(system.starts_with("You are a Career Coach"));
        assert!(system.contains("valid JSON only"));
    }
}
