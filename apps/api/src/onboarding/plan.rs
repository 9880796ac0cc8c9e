//! Deterministic fallback plan for the Onboarder agent.
//!
//! Templated 30/60/90-day actions parameterized by role and department
//! only. Schema-valid by construction: every phase is non-empty.

use crate::onboarding::{CandidateProfile, OnboardingPlan};

pub fn templated_plan(profile: &CandidateProfile) -> OnboardingPlan {
    let role = profile.role.trim();
    let department = profile.department.trim();

    OnboardingPlan {
        day_30: vec![
            "Complete IT setup, account provisioning, and security training.".to_string(),
            format!("Meet the {department} team and shadow a senior {role}."),
            format!("Review the {department} team's current goals and processes."),
        ],
        day_60: vec![
            format!("Own a first scoped task as {role} with a designated mentor."),
            format!("Present early observations to the {department} lead."),
        ],
        day_90: vec![
            format!("Deliver independently on {role} responsibilities."),
            "Agree on goals for the next quarter with your manager.".to_string(),
        ],
    }
}
