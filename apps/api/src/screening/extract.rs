//! Deterministic feature extraction from redacted resume and JD text.
//!
//! Extraction is intentionally naive — a fixed skill-token list and a
//! years-of-experience regex — because the downstream score must be
//! reproducible and auditable, never inferred by the model.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Skill tokens recognized in resumes and job descriptions.
pub const SKILL_TOKENS: &[&str] = &[
    "python",
    "java",
    "sql",
    "javascript",
    "react",
    "node",
    "c++",
    "rust",
    "pytorch",
    "tensorflow",
    "nlp",
    "kubernetes",
    "docker",
    "aws",
];

/// Qualification tokens counted toward required-qualification coverage.
pub const QUALIFICATION_TOKENS: &[&str] = &[
    "bachelor",
    "master",
    "phd",
    "degree",
    "certification",
    "certified",
];

// "5 years", "5+ years", "five-ish formats are out of scope"
static YEARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*\+?\s*years?").unwrap());

/// Features pulled from a resume.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeFeatures {
    pub skills: Vec<String>,
    pub years_experience: u32,
    pub qualifications: Vec<String>,
}

/// Requirements pulled from a job description.
#[derive(Debug, Clone, Serialize)]
pub struct JdRequirements {
    pub required_skills: Vec<String>,
    pub required_years: u32,
    pub required_qualifications: Vec<String>,
}

pub fn extract_resume(text: &str) -> ResumeFeatures {
    let lower = text.to_lowercase();
    ResumeFeatures {
        skills: matching_tokens(&lower, SKILL_TOKENS),
        years_experience: first_years(&lower),
        qualifications: matching_tokens(&lower, QUALIFICATION_TOKENS),
    }
}

pub fn extract_jd(text: &str) -> JdRequirements {
    let lower = text.to_lowercase();
    JdRequirements {
        required_skills: matching_tokens(&lower, SKILL_TOKENS),
        required_years: first_years(&lower),
        required_qualifications: matching_tokens(&lower, QUALIFICATION_TOKENS),
    }
}

fn matching_tokens(lower: &str, tokens: &[&str]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| lower.contains(*t))
        .map(|t| t.to_string())
        .collect()
}

fn first_years(lower: &str) -> u32 {
    YEARS_RE
        .captures(lower)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}
