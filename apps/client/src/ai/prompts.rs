//! Prompt constants and the fixed response schema for the direct AI path.
//! The backend proxy carries its own prompts server-side; these are only
//! used when the fallback runs.

use serde_json::{json, Value};

/// System instruction for resume analysis on the direct path.
pub const RESUME_ANALYSIS_SYSTEM: &str = "You are a senior technical recruiter and career \
    analyst for a talent-matching platform. You evaluate resumes honestly and concretely. \
    You MUST respond with valid JSON matching the requested schema. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Analysis prompt. `{resume_text}` is replaced with the raw resume.
pub const RESUME_ANALYSIS_PROMPT_TEMPLATE: &str = "Analyze the following resume. \
    Extract the candidate's name, current or target role, skills, and total years of \
    experience. Score the six competency axes (Technical Depth, System Design, \
    Communication, Leadership, Product Sense, Learning Velocity) from 0 to 100. \
    Write a short professional summary and an ideal-job persona. Estimate a realistic \
    salary range and current market demand. Produce likely interview questions, resume \
    optimization suggestions, skill gaps with remediation suggestions, feedback from \
    three reviewer agents (Tech Screener, Hiring Manager, Culture Interviewer), and a \
    three-step career path.\n\nResume:\n{resume_text}";

/// System instruction for the interview-simulation chat on the direct path.
pub const CHAT_SYSTEM: &str = "You are an experienced interviewer running a realistic \
    mock interview for a candidate on a talent-matching platform. Ask one question at a \
    time, follow up on weak answers, and keep responses under 120 words. Stay in \
    character as the interviewer; do not evaluate until asked.";

/// Fixed response schema for resume analysis, in the generative-AI API's
/// OpenAPI-subset form. The field list is the contract `CandidateProfile`
/// deserializes against; the two must change together.
pub fn resume_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": {"type": "STRING"},
            "role": {"type": "STRING"},
            "skills": {"type": "ARRAY", "items": {"type": "STRING"}},
            "experienceYears": {"type": "INTEGER"},
            "summary": {"type": "STRING"},
            "idealJobPersona": {"type": "STRING"},
            "salaryRange": {"type": "STRING"},
            "marketDemand": {"type": "STRING"},
            "radarData": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "subject": {"type": "STRING"},
                        "score": {"type": "NUMBER"}
                    },
                    "required": ["subject", "score"]
                }
            },
            "interviewQuestions": {"type": "ARRAY", "items": {"type": "STRING"}},
            "optimizationSuggestions": {"type": "ARRAY", "items": {"type": "STRING"}},
            "skillGaps": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "skill": {"type": "STRING"},
                        "priority": {"type": "STRING"},
                        "suggestion": {"type": "STRING"}
                    },
                    "required": ["skill", "priority", "suggestion"]
                }
            },
            "agentFeedbacks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "agent": {"type": "STRING"},
                        "score": {"type": "INTEGER"},
                        "comment": {"type": "STRING"}
                    },
                    "required": ["agent", "score", "comment"]
                }
            },
            "careerPath": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": {"type": "STRING"},
                        "timeframe": {"type": "STRING"},
                        "description": {"type": "STRING"}
                    },
                    "required": ["title", "timeframe", "description"]
                }
            }
        },
        "required": [
            "name", "role", "skills", "experienceYears", "summary",
            "idealJobPersona", "salaryRange", "marketDemand", "radarData",
            "interviewQuestions", "optimizationSuggestions", "skillGaps",
            "agentFeedbacks", "careerPath"
        ]
    })
}
