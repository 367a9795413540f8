// All prompt constants for the Match Scorer.

/// Experience-relevance rating prompt. Replace `{requirements}`,
/// `{description}`, `{experience}` before sending. The reply is parsed
/// as a bare number and clamped to [0, 30].
pub const EXPERIENCE_PROMPT_TEMPLATE: &str = r#"You are an expert recruiter analyzing candidate experience fit.

Job Requirements:
{requirements}

Job Description:
{description}

Candidate Experience:
{experience}

Rate the experience relevance on a scale of 0-30 (where 30 is perfect match).
Consider:
- Years of relevant experience
- Matching technologies/domains
- Similar project types
- Comparable company sizes/industries

Return ONLY a number between 0 and 30."#;

/// Match-explanation prompt. Replace `{job_title}`, `{company}`,
/// `{score}`, `{matching_skills}`, `{keywords}`, `{band}` before
/// sending.
pub const EXPLANATION_PROMPT_TEMPLATE: &str = r#"You are a career advisor explaining job match quality.

Job Title: {job_title}
Company: {company}
Match Score: {score}/100

Matching Skills: {matching_skills}
Keyword Matches: {keywords}

Write a concise 2-3 sentence explanation of why this is a {band} match.
Focus on strengths and potential fit. Be encouraging but honest.

Strong matches should emphasize strong alignment.
Medium matches should note partial fit and growth opportunities.
Weak matches should be diplomatic about gaps."#;
