//! Request and result types for a single resume analysis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Candidate seniority the recruiter should screen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Fresher,
    #[serde(rename = "Mid-Level")]
    MidLevel,
    Senior,
}

/// Hiring market whose resume conventions apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRegion {
    India,
    #[serde(rename = "USA")]
    Usa,
    Europe,
    Global,
}

/// Kind of employer the resume is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanyType {
    #[serde(rename = "FAANG/BigTech")]
    BigTech,
    Startup,
    #[serde(rename = "Service/Consulting")]
    ServiceConsulting,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 3] = [Self::Fresher, Self::MidLevel, Self::Senior];

    pub fn label(self) -> &'static str {
        match self {
            Self::Fresher => "Fresher",
            Self::MidLevel => "Mid-Level",
            Self::Senior => "Senior",
        }
    }
}

impl TargetRegion {
    pub const ALL: [TargetRegion; 4] = [Self::India, Self::Usa, Self::Europe, Self::Global];

    pub fn label(self) -> &'static str {
        match self {
            Self::India => "India",
            Self::Usa => "USA",
            Self::Europe => "Europe",
            Self::Global => "Global",
        }
    }
}

impl CompanyType {
    pub const ALL: [CompanyType; 3] = [Self::BigTech, Self::Startup, Self::ServiceConsulting];

    pub fn label(self) -> &'static str {
        match self {
            Self::BigTech => "FAANG/BigTech",
            Self::Startup => "Startup",
            Self::ServiceConsulting => "Service/Consulting",
        }
    }
}

/// Error for a selector value that names no declared variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.field, self.value)
    }
}

impl std::error::Error for UnknownOption {}

/// Case-insensitive label lookup shared by the three selector enums.
fn lookup<T: Copy>(
    field: &'static str,
    raw: &str,
    all: &[T],
    label: fn(T) -> &'static str,
) -> Result<T, UnknownOption> {
    let wanted = raw.trim();
    all.iter()
        .copied()
        .find(|v| label(*v).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| UnknownOption {
            field,
            value: wanted.to_string(),
        })
}

impl FromStr for ExperienceLevel {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("experience_level", s, &Self::ALL, Self::label)
    }
}

impl FromStr for TargetRegion {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("target_region", s, &Self::ALL, Self::label)
    }
}

impl FromStr for CompanyType {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup("target_company", s, &Self::ALL, Self::label)
    }
}

/// Screening options chosen by the user. Every dimension is independent and optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationOptions {
    pub experience_level: Option<ExperienceLevel>,
    pub target_region: Option<TargetRegion>,
    pub target_company: Option<CompanyType>,
}

/// Everything needed to build one prompt. Built per analysis and never mutated.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description_text: String,
    pub configuration: ConfigurationOptions,
}

/// Upper bound of `AnalysisResult::match_percentage`.
pub const MAX_MATCH_PERCENTAGE: u8 = 100;

/// Typed outcome of one analysis, as handed to the dashboard.
///
/// Produced only by `analysis::parser`, which fills defaults for anything the
/// model left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub match_percentage: u8, // 0..=100
    pub missing_keywords: Vec<String>,
    pub profile_summary: String,
    pub actionable_tips: Vec<String>,
    pub interview_questions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_parse_back_to_variants() {
        for level in ExperienceLevel::ALL {
            assert_eq!(level.label().parse::<ExperienceLevel>().unwrap(), level);
        }
        for region in TargetRegion::ALL {
            assert_eq!(region.label().parse::<TargetRegion>().unwrap(), region);
        }
        for company in CompanyType::ALL {
            assert_eq!(company.label().parse::<CompanyType>().unwrap(), company);
        }
    }

    #[test]
    fn test_label_lookup_ignores_case_and_padding() {
        assert_eq!(
            " mid-level ".parse::<ExperienceLevel>().unwrap(),
            ExperienceLevel::MidLevel
        );
        assert_eq!("usa".parse::<TargetRegion>().unwrap(), TargetRegion::Usa);
        assert_eq!(
            "faang/bigtech".parse::<CompanyType>().unwrap(),
            CompanyType::BigTech
        );
    }

    #[test]
    fn test_unknown_label_names_the_field() {
        let err = "Antarctica".parse::<TargetRegion>().unwrap_err();
        assert_eq!(err.field, "target_region");
        assert_eq!(err.to_string(), "unknown target_region 'Antarctica'");
    }

    #[test]
    fn test_serde_uses_display_labels() {
        let options = ConfigurationOptions {
            experience_level: Some(ExperienceLevel::MidLevel),
            target_region: Some(TargetRegion::Usa),
            target_company: Some(CompanyType::ServiceConsulting),
        };
        let json = serde_json::to_value(options).unwrap();
        assert_eq!(json["experience_level"], "Mid-Level");
        assert_eq!(json["target_region"], "USA");
        assert_eq!(json["target_company"], "Service/Consulting");
    }

    #[test]
    fn test_default_configuration_sets_nothing() {
        let options = ConfigurationOptions::default();
        assert!(options.experience_level.is_none());
        assert!(options.target_region.is_none());
        assert!(options.target_company.is_none());
    }
}
