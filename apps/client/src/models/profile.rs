//! Resume analysis result model — the typed boundary for AI responses.
//!
//! Both AI backends (backend proxy and direct Gemini) must produce this
//! exact camelCase shape; parsing failures surface as typed errors instead
//! of an untyped map leaking into callers.

use serde::{Deserialize, Serialize};

/// Structured result of one resume analysis. Produced once per call and
/// held by the caller; never persisted client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub name: String,
    pub role: String,
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub summary: String,
    pub ideal_job_persona: String,
    pub salary_range: String,
    pub market_demand: String,
    pub radar_data: Vec<RadarAxis>,
    pub interview_questions: Vec<String>,
    pub optimization_suggestions: Vec<String>,
    pub skill_gaps: Vec<SkillGap>,
    pub agent_feedbacks: Vec<AgentFeedback>,
    pub career_path: Vec<CareerStep>,
}

/// One named axis of the six-axis competency radar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarAxis {
    pub subject: String,
    /// 0 – 100
    pub score: f64,
}

/// A missing or weak skill relative to the target role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    pub skill: String,
    pub priority: String,
    pub suggestion: String,
}

/// Per-agent review score from the simulated interview panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentFeedback {
    pub agent: String,
    /// 0 – 100
    pub score: u32,
    pub comment: String,
}

/// One step of the suggested career path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerStep {
    pub title: String,
    pub timeframe: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_from_camel_case() {
        let json = r#"{
            "name": "Jane Doe",
            "role": "Backend Engineer",
            "skills": ["Rust", "PostgreSQL"],
            "experienceYears": 6,
            "summary": "Systems engineer with storage focus.",
            "idealJobPersona": "Infra-heavy product team",
            "salaryRange": "$140k - $170k",
            "marketDemand": "High",
            "radarData": [
                {"subject": "Technical Depth", "score": 88.0},
                {"subject": "Communication", "score": 72.0}
            ],
            "interviewQuestions": ["Describe a production incident you owned."],
            "optimizationSuggestions": ["Quantify the latency win on the cache project."],
            "skillGaps": [
                {"skill": "Kubernetes", "priority": "medium", "suggestion": "Run a side project on a managed cluster."}
            ],
            "agentFeedbacks": [
                {"agent": "Tech Screener", "score": 85, "comment": "Strong fundamentals."}
            ],
            "careerPath": [
                {"title": "Staff Engineer", "timeframe": "2-3 years", "description": "Own a cross-team platform area."}
            ]
        }"#;

        let profile: CandidateProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.experience_years, 6);
        assert_eq!(profile.radar_data.len(), 2);
        assert_eq!(profile.radar_data[0].subject, "Technical Depth");
        assert_eq!(profile.skill_gaps[0].skill, "Kubernetes");
        assert_eq!(profile.agent_feedbacks[0].score, 85);
        assert_eq!(profile.career_path[0].title, "Staff Engineer");
    }

    #[test]
    fn test_profile_serializes_back_to_camel_case_keys() {
        let profile = CandidateProfile {
            name: "Jane Doe".to_string(),
            role: "Backend Engineer".to_string(),
            skills: vec![],
            experience_years: 6,
            summary: String::new(),
            ideal_job_persona: String::new(),
            salary_range: String::new(),
            market_demand: "High".to_string(),
            radar_data: vec![],
            interview_questions: vec![],
            optimization_suggestions: vec![],
            skill_gaps: vec![],
            agent_feedbacks: vec![],
            career_path: vec![],
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert!(value.get("experienceYears").is_some());
        assert!(value.get("idealJobPersona").is_some());
        assert!(value.get("experience_years").is_none());
    }

    #[test]
    fn test_missing_field_is_a_parse_error() {
        // No defaults: a response missing schema fields must fail fast.
        let json = r#"{"name": "Jane Doe"}"#;
        assert!(serde_json::from_str::<CandidateProfile>(json).is_err());
    }
}
