//! Role Fit Score — the explainable scoring formula behind TalentScout.
//!
//! The score is computed from deterministic features only and is
//! bit-for-bit reproducible. The same computation feeds the model prompt as
//! context and serves, unchanged, as the fallback: the model is asked to
//! elaborate on a score it can never invent.
//!
//! Formula: 0.6 × skill overlap + 0.3 × experience match +
//! 0.1 × qualification coverage, scaled to [0, 100].

use serde::Serialize;

use crate::screening::extract::{JdRequirements, ResumeFeatures};

pub const SKILL_WEIGHT: f64 = 0.6;
pub const EXPERIENCE_WEIGHT: f64 = 0.3;
pub const QUALIFICATION_WEIGHT: f64 = 0.1;

/// Required-skill coverage at or above this is high confidence.
pub const HIGH_COVERAGE_THRESHOLD: f64 = 0.75;
/// Coverage at or above this (but below high) is medium confidence.
pub const MEDIUM_COVERAGE_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

/// The computed score with its fractional sub-scores, kept for the audit
/// trail and for templated explanations.
#[derive(Debug, Clone, Serialize)]
pub struct FitScore {
    /// Final score in [0, 100].
    pub score: u32,
    pub confidence: Confidence,
    /// Fraction of required skills present in the resume, in [0, 1].
    pub skill_overlap: f64,
    /// min(1, years / required years), in [0, 1].
    pub experience_match: f64,
    /// Fraction of required qualifications present, in [0, 1].
    pub qualification_coverage: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Computes the Role Fit Score. Total over all inputs: empty resume and JD
/// produce the defined floor for each sub-score, never an error.
pub fn compute_fit(features: &ResumeFeatures, requirements: &JdRequirements) -> FitScore {
    let (skill_overlap, matched_skills, missing_skills) =
        skill_overlap(&features.skills, &requirements.required_skills);

    let experience_match = if requirements.required_years == 0 {
        1.0
    } else {
        (features.years_experience as f64 / requirements.required_years as f64).min(1.0)
    };

    let qualification_coverage = if requirements.required_qualifications.is_empty() {
        1.0
    } else {
        let matched = requirements
            .required_qualifications
            .iter()
            .filter(|q| features.qualifications.contains(q))
            .count();
        matched as f64 / requirements.required_qualifications.len() as f64
    };

    let weighted = SKILL_WEIGHT * skill_overlap
        + EXPERIENCE_WEIGHT * experience_match
        + QUALIFICATION_WEIGHT * qualification_coverage;
    let score = (weighted * 100.0).round() as u32;

    FitScore {
        score,
        confidence: confidence_from_coverage(skill_overlap),
        skill_overlap,
        experience_match,
        qualification_coverage,
        matched_skills,
        missing_skills,
    }
}

// Returns (overlap ratio, matched, missing). No required skills counts as
// full overlap.
fn skill_overlap(resume: &[String], required: &[String]) -> (f64, Vec<String>, Vec<String>) {
    if required.is_empty() {
        return (1.0, vec![], vec![]);
    }
    let (matched, missing): (Vec<String>, Vec<String>) = required
        .iter()
        .cloned()
        .partition(|skill| resume.contains(skill));
    let ratio = matched.len() as f64 / required.len() as f64;
    (ratio, matched, missing)
}

/// Confidence is a function of required-skill coverage alone.
fn confidence_from_coverage(coverage: f64) -> Confidence {
    if coverage >= HIGH_COVERAGE_THRESHOLD {
        Confidence::High
    } else if coverage >= MEDIUM_COVERAGE_THRESHOLD {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Templated explanation strings for the fallback path, derived from which
/// scoring criteria matched. Always non-empty.
pub fn templated_explanations(fit: &FitScore, requirements: &JdRequirements) -> Vec<String> {
    let mut lines = vec![format!(
        "Computed role-fit score {} from weighted criteria: skill overlap {:.2}, experience match {:.2}, qualification coverage {:.2}.",
        fit.score, fit.skill_overlap, fit.experience_match, fit.qualification_coverage
    )];

    if !fit.matched_skills.is_empty() {
        lines.push(format!(
            "Matched {}/{} required skills: {}.",
            fit.matched_skills.len(),
            requirements.required_skills.len(),
            fit.matched_skills.join(", ")
        ));
    }
    if !fit.missing_skills.is_empty() {
        lines.push(format!(
            "Missing required skills: {}.",
            fit.missing_skills.join(", ")
        ));
    }
    if requirements.required_years > 0 {
        lines.push(format!(
            "Experience requirement: {} years required, experience match {:.2}.",
            requirements.required_years, fit.experience_match
        ));
    }
    lines
}
