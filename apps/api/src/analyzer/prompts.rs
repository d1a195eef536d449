// All LLM prompt constants for the job requirement analyzer.

/// System prompt for JD analysis. Enforces JSON-only output.
pub const JD_ANALYZE_SYSTEM: &str =
    "You are an expert technical recruiter analyzing job postings. \
    Extract structured hiring requirements from a job description. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// JD analysis prompt template. Replace `{title}`, `{location}`,
/// `{remote}`, and `{jd_text}` before sending.
pub const JD_ANALYZE_PROMPT_TEMPLATE: &str = r#"Analyze the following job posting and extract structured hiring requirements.

Return a JSON object with this EXACT schema (no extra fields):
{
  "must_have_skills": ["python", "sql"],
  "nice_to_have_skills": ["docker"],
  "role_keywords": ["backend", "api", "microservices"],
  "years_exp_min": 3,
  "years_exp_max": 5,
  "required_degree_level": "BACHELOR",
  "preferred_degree_levels": ["MASTER"],
  "required_fields_of_study": ["computer science"],
  "preferred_fields_of_study": ["software engineering"],
  "weights": {
    "skill_weight": 0.4,
    "experience_weight": 0.25,
    "keyword_weight": 0.15,
    "education_weight": 0.2
  },
  "summary": "One-paragraph summary of the role.",
  "responsibilities": ["Design and ship backend services"],
  "red_flags": ["No mention of testing culture"],
  "languages": ["English"]
}

Rules:
- Skills and keywords must be lowercase single tokens or short phrases.
- MUST-HAVE skills are explicit hard requirements ("required", "must have", minimum years attached).
- NICE-TO-HAVE skills are phrased as "preferred", "bonus", "nice to have", "a plus".
- Degree levels are one of: DIPLOMA, BACHELOR, MASTER, PHD. Use null when the posting is silent.
- years_exp_min / years_exp_max are integers or null.
- Leave any field you cannot determine as null or an empty array. Never invent requirements.

JOB TITLE: {title}
LOCATION: {location}
REMOTE: {remote}

JOB DESCRIPTION:
{jd_text}"#;
