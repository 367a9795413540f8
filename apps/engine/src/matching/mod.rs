//! Match Scorer — rates a resume against a job posting 0-100 from four
//! weighted sub-scores and explains the result.
//!
//! Skills overlap, keyword alignment, and level fit are deterministic
//! rules. Experience relevance and the explanation text are
//! model-assisted with deterministic fallbacks, so a scoring call never
//! fails and nothing is memoized across calls.

pub mod keywords;
pub mod level;
pub mod prompts;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::{CompletionParams, CompletionProvider};
use crate::matching::keywords::extract_keywords;
use crate::matching::level::{infer_candidate_level, infer_job_level, level_fit_multiplier};
use crate::models::{JobPosting, ResumeProfile};

// ────────────────────────────────────────────────────────────────────────────
// Rubric constants
// ────────────────────────────────────────────────────────────────────────────

const SKILLS_WEIGHT: f64 = 40.0;
const EXPERIENCE_WEIGHT_MAX: f64 = 30.0;
/// Midpoint fallback when the experience rating is unavailable.
const EXPERIENCE_DEFAULT: f64 = 15.0;
const KEYWORD_WEIGHT: f64 = 20.0;
const LEVEL_WEIGHT: f64 = 10.0;

/// How many resume bullets the explanation may cite.
const RELEVANT_EXPERIENCE_LIMIT: usize = 3;

/// Concurrency window for batch scoring, sized to respect external
/// completion rate limits.
const SCORING_BATCH_SIZE: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// A 0-100 compatibility rating between one resume and one job posting,
/// created fresh on every scoring call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub job_id: String,
    pub user_id: String,
    pub score: u32,
    pub explanation: MatchExplanation,
    pub calculated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchExplanation {
    pub matching_skills: Vec<String>,
    pub relevant_experience: Vec<String>,
    pub keyword_alignment: Vec<String>,
    pub overall_reason: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MatchEngine {
    llm: Arc<dyn CompletionProvider>,
}

impl MatchEngine {
    pub fn new(llm: Arc<dyn CompletionProvider>) -> Self {
        Self { llm }
    }

    /// Scores one resume against one job posting.
    pub async fn calculate_match_score(
        &self,
        resume: &ResumeProfile,
        job: &JobPosting,
    ) -> MatchScore {
        let resume_skills: HashSet<String> =
            resume.skills.iter().map(|s| s.to_lowercase()).collect();
        let resume_keywords: HashSet<String> =
            resume.keywords.iter().map(|k| k.to_lowercase()).collect();

        // 1. Skills overlap (weight 40)
        let matching_skills: Vec<String> = job
            .skills
            .iter()
            .filter(|skill| resume_skills.contains(&skill.to_lowercase()))
            .cloned()
            .collect();
        let skills_score =
            matching_skills.len() as f64 / job.skills.len().max(1) as f64 * SKILLS_WEIGHT;

        // 2. Experience relevance (weight 30, model-assisted)
        let experience_score = self
            .experience_relevance(&resume.experience, &job.requirements, &job.description)
            .await;

        // 3. Keyword alignment (weight 20)
        let job_text = format!("{} {}", job.description, job.requirements.join(" "));
        let job_keywords = extract_keywords(&job_text);
        let resume_text = resume.extracted_text.to_lowercase();
        let keyword_matches: Vec<String> = job_keywords
            .iter()
            .filter(|kw| resume_keywords.contains(**kw) || resume_text.contains(**kw))
            .map(|kw| kw.to_string())
            .collect();
        let keyword_score =
            keyword_matches.len() as f64 / job_keywords.len().max(1) as f64 * KEYWORD_WEIGHT;

        // 4. Level fit (weight 10)
        let job_level = infer_job_level(&job.title);
        let candidate_level = infer_candidate_level(&resume.extracted_text);
        let level_score = level_fit_multiplier(job_level, candidate_level) * LEVEL_WEIGHT;

        let score = total_score(skills_score, experience_score, keyword_score, level_score);

        let overall_reason = self
            .explanation(job, &matching_skills, &keyword_matches, score)
            .await;

        MatchScore {
            job_id: job.id.clone(),
            user_id: resume.user_id.clone(),
            score,
            explanation: MatchExplanation {
                relevant_experience: find_relevant_experience(&resume.experience, job),
                matching_skills,
                keyword_alignment: keyword_matches,
                overall_reason,
            },
            calculated_at: Utc::now(),
        }
    }

    /// Model-assisted 0-30 rating of experience fit. Any capability
    /// error or unparsable reply falls back to the midpoint rather than
    /// failing the whole score.
    async fn experience_relevance(
        &self,
        experience: &[String],
        requirements: &[String],
        description: &str,
    ) -> f64 {
        let prompt = prompts::EXPERIENCE_PROMPT_TEMPLATE
            .replace("{requirements}", &requirements.join("\n"))
            .replace("{description}", description)
            .replace("{experience}", &experience.join("\n"));

        match self
            .llm
            .complete(&prompt, CompletionParams { temperature: 0.3 })
            .await
        {
            Ok(reply) => match parse_leading_f64(&reply) {
                Some(rating) => rating.clamp(0.0, EXPERIENCE_WEIGHT_MAX),
                None => {
                    warn!("experience relevance reply was not a number, using midpoint");
                    EXPERIENCE_DEFAULT
                }
            },
            Err(e) => {
                warn!("experience relevance call failed, using midpoint: {e}");
                EXPERIENCE_DEFAULT
            }
        }
    }

    /// Model-assisted 2-3 sentence explanation, tone calibrated to the
    /// score band. Falls back to a fixed template on any failure.
    async fn explanation(
        &self,
        job: &JobPosting,
        matching_skills: &[String],
        keyword_matches: &[String],
        score: u32,
    ) -> String {
        let matching = if matching_skills.is_empty() {
            "None directly listed".to_string()
        } else {
            matching_skills.join(", ")
        };
        let keywords = if keyword_matches.is_empty() {
            "Limited overlap".to_string()
        } else {
            keyword_matches.join(", ")
        };

        let prompt = prompts::EXPLANATION_PROMPT_TEMPLATE
            .replace("{job_title}", &job.title)
            .replace("{company}", &job.company)
            .replace("{score}", &score.to_string())
            .replace("{matching_skills}", &matching)
            .replace("{keywords}", &keywords)
            .replace("{band}", score_band(score));

        match self
            .llm
            .complete(&prompt, CompletionParams { temperature: 0.3 })
            .await
        {
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                warn!("explanation call failed, using templated fallback: {e}");
                default_explanation(score, matching_skills.len(), &job.title)
            }
        }
    }
}

/// Scores many jobs against one resume with a bounded concurrency
/// window, preserving input order. Each (resume, job) pair is scored
/// independently; the window keeps concurrent completion calls within
/// external rate limits.
pub async fn score_jobs(
    engine: &MatchEngine,
    resume: &ResumeProfile,
    jobs: &[JobPosting],
) -> Vec<MatchScore> {
    let mut matches = Vec::with_capacity(jobs.len());
    for batch in jobs.chunks(SCORING_BATCH_SIZE) {
        let batch_scores = join_all(
            batch
                .iter()
                .map(|job| engine.calculate_match_score(resume, job)),
        )
        .await;
        matches.extend(batch_scores);
    }
    matches
}

// ────────────────────────────────────────────────────────────────────────────
// Deterministic helpers
// ────────────────────────────────────────────────────────────────────────────

/// Sums the four sub-scores, rounds to the nearest integer, and clamps
/// the ceiling at 100. Every term is non-negative, so the floor is 0.
fn total_score(skills: f64, experience: f64, keywords: f64, level: f64) -> u32 {
    ((skills + experience + keywords + level).round() as u32).min(100)
}

/// Qualitative band used to calibrate the explanation tone.
fn score_band(score: u32) -> &'static str {
    if score > 70 {
        "strong"
    } else if score > 40 {
        "medium"
    } else {
        "weak"
    }
}

/// Deterministic explanation used when the model call fails.
fn default_explanation(score: u32, skill_matches: usize, job_title: &str) -> String {
    if score > 70 {
        format!("Strong match for {job_title}! You have {skill_matches} matching skills and relevant experience.")
    } else if score > 40 {
        format!("Moderate fit for {job_title}. You meet some requirements, with {skill_matches} matching skills.")
    } else {
        format!("This {job_title} role has different requirements, with limited skill overlap. Consider it for growth opportunities.")
    }
}

/// First (not best) three resume bullets that mention any job skill or
/// any keyword extracted from the job text, original order preserved.
pub fn find_relevant_experience(experience: &[String], job: &JobPosting) -> Vec<String> {
    let job_text = format!("{} {}", job.description, job.requirements.join(" ")).to_lowercase();
    let job_keywords = extract_keywords(&job_text);
    let job_skills: Vec<String> = job.skills.iter().map(|s| s.to_lowercase()).collect();

    experience
        .iter()
        .filter(|bullet| {
            let lower = bullet.to_lowercase();
            job_skills.iter().any(|skill| lower.contains(skill))
                || job_keywords.iter().any(|kw| lower.contains(kw))
        })
        .take(RELEVANT_EXPERIENCE_LIMIT)
        .cloned()
        .collect()
}

/// Parses the leading float from a model reply, tolerating trailing
/// prose after the number but nothing before it.
fn parse_leading_f64(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let end = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(trimmed.len());
    trimmed[..end].parse::<f64>().ok()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
