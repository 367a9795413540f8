//! Seniority inference — ordinal 1-5 levels for jobs (from title
//! markers) and candidates (from years of experience), plus the
//! ordinal-distance fit multiplier.

use std::sync::OnceLock;

use regex::Regex;

/// Years cap when falling back to counting dash bullets as a proxy.
const PROXY_YEARS_CAP: usize = 15;

/// Infers job seniority from title substrings. Unmarked titles default
/// to mid-level. Intern/junior markers are checked first, so a title
/// like "Senior Engineering Intern" reads as an internship.
pub fn infer_job_level(title: &str) -> u8 {
    let title = title.to_lowercase();

    if title.contains("intern") || title.contains("junior") {
        return 1;
    }
    if title.contains("senior") || title.contains("lead") {
        return 3;
    }
    if title.contains("staff") || title.contains("principal") {
        return 4;
    }
    if title.contains("director") || title.contains("vp") {
        return 5;
    }

    2
}

/// Infers candidate seniority from the years of experience found in the
/// resume text.
pub fn infer_candidate_level(resume_text: &str) -> u8 {
    match extract_years_of_experience(resume_text) {
        0..=1 => 1,
        2..=4 => 2,
        5..=7 => 3,
        8..=11 => 4,
        _ => 5,
    }
}

/// Ordinal-distance fit multiplier: same level 1.0, off by one 0.7, off
/// by two 0.4, anything further 0.2.
pub fn level_fit_multiplier(job_level: u8, candidate_level: u8) -> f64 {
    match job_level.abs_diff(candidate_level) {
        0 => 1.0,
        1 => 0.7,
        2 => 0.4,
        _ => 0.2,
    }
}

fn years_patterns() -> &'static [Regex; 2] {
    static PATTERNS: OnceLock<[Regex; 2]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            Regex::new(r"(?i)(\d+)\+?\s*years?\s*of\s*experience").expect("valid regex"),
            Regex::new(r"(?i)experience:\s*(\d+)\+?\s*years?").expect("valid regex"),
        ]
    })
}

/// Extracts years of experience from resume text: tries the two explicit
/// patterns in order, then counts dash-prefixed lines as a rough proxy,
/// capped at 15.
pub fn extract_years_of_experience(text: &str) -> usize {
    for pattern in years_patterns() {
        if let Some(caps) = pattern.captures(text) {
            if let Ok(years) = caps[1].parse::<usize>() {
                return years;
            }
        }
    }

    text.matches("\n-").count().min(PROXY_YEARS_CAP)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_level_markers() {
        assert_eq!(infer_job_level("Junior Developer"), 1);
        assert_eq!(infer_job_level("Software Engineering Intern"), 1);
        assert_eq!(infer_job_level("Software Engineer"), 2);
        assert_eq!(infer_job_level("Senior Backend Engineer"), 3);
        assert_eq!(infer_job_level("Tech Lead"), 3);
        assert_eq!(infer_job_level("Staff Engineer"), 4);
        assert_eq!(infer_job_level("Principal Architect"), 4);
        assert_eq!(infer_job_level("Director of Engineering"), 5);
        assert_eq!(infer_job_level("VP Engineering"), 5);
    }

    #[test]
    fn test_job_level_intern_marker_wins() {
        assert_eq!(infer_job_level("Senior Engineering Intern"), 1);
    }

    #[test]
    fn test_job_level_case_insensitive() {
        assert_eq!(infer_job_level("SENIOR ENGINEER"), 3);
    }

    #[test]
    fn test_candidate_level_boundaries() {
        assert_eq!(infer_candidate_level("1+ years of experience"), 1);
        assert_eq!(infer_candidate_level("2 years of experience"), 2);
        assert_eq!(infer_candidate_level("4 years of experience"), 2);
        assert_eq!(infer_candidate_level("5 years of experience"), 3);
        assert_eq!(infer_candidate_level("7 years of experience"), 3);
        assert_eq!(infer_candidate_level("8 years of experience"), 4);
        assert_eq!(infer_candidate_level("11 years of experience"), 4);
        assert_eq!(infer_candidate_level("12 years of experience"), 5);
    }

    #[test]
    fn test_level_fit_multiplier_distances() {
        assert!((level_fit_multiplier(3, 3) - 1.0).abs() < f64::EPSILON);
        assert!((level_fit_multiplier(3, 2) - 0.7).abs() < f64::EPSILON);
        assert!((level_fit_multiplier(1, 3) - 0.4).abs() < f64::EPSILON);
        assert!((level_fit_multiplier(1, 5) - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_same_level_scores_full_weight() {
        // multiplier 1.0 scaled by the level weight of 10
        assert!((level_fit_multiplier(2, 2) * 10.0 - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_years_pattern_of_experience() {
        assert_eq!(extract_years_of_experience("I have 6+ years of experience"), 6);
        assert_eq!(extract_years_of_experience("10 Years Of Experience in ops"), 10);
    }

    #[test]
    fn test_years_pattern_experience_colon() {
        assert_eq!(extract_years_of_experience("Experience: 9+ years"), 9);
    }

    #[test]
    fn test_years_fallback_counts_dash_lines() {
        let text = "Summary\n- built a thing\n- shipped another\n- mentored folks";
        assert_eq!(extract_years_of_experience(text), 3);
    }

    #[test]
    fn test_years_fallback_capped_at_15() {
        let text: String = (0..40).map(|_| "\n- bullet").collect();
        assert_eq!(extract_years_of_experience(&text), 15);
    }

    #[test]
    fn test_years_no_signal_is_zero() {
        assert_eq!(extract_years_of_experience("short bio, no bullets"), 0);
    }
}
