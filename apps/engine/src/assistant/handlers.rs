//! Intent handlers — exactly one runs per turn. Each returns only the
//! fields it changed; the pipeline driver merges them into the turn.

use serde_json::{Map, Value};
use tracing::warn;

use crate::assistant::filters::{
    normalize_job_type, normalize_match_score, normalize_work_mode, string_list,
};
use crate::assistant::intent::Intent;
use crate::assistant::prompts::CHAT_PROMPT_TEMPLATE;
use crate::assistant::TurnState;
use crate::llm_client::{CompletionParams, CompletionProvider};
use crate::models::FilterUpdate;

/// Fallback reply when the general-chat completion fails.
const CHAT_FALLBACK: &str = "I'm here to help! Try asking me to search for jobs, update filters, or answer questions about the platform.";

const HELP_MATCHING: &str = "Job matching uses AI to analyze your resume against each job posting. We score jobs 0-100 based on:\n\
\u{2022} Skills overlap (40%)\n\
\u{2022} Experience relevance (30%)\n\
\u{2022} Keyword alignment (20%)\n\
\u{2022} Job level fit (10%)\n\n\
Green badges (>70) are strong matches, yellow (40-70) are moderate, and gray (<40) are lower fits.";

const HELP_FILTERS: &str = "You can filter jobs by role, skills, date posted, job type, work mode, location, and match score. Just tell me what you're looking for and I'll update the filters for you! Try \"show only remote jobs\" or \"high match scores only\".";

const HELP_APPLICATIONS: &str = "When you click Apply, you'll be directed to the job posting. When you return, we'll ask if you applied. Your applications are tracked with statuses: Applied \u{2192} Interview \u{2192} Offer/Rejected. View your timeline in the Applications dashboard.";

const HELP_RESUME: &str = "Upload your resume (PDF or TXT) to enable AI matching. We extract your skills and experience to score each job. You can replace your resume anytime, and all match scores will update automatically.";

const HELP_GENERAL: &str = "I'm your AI job search assistant! I can:\n\
\u{2022} Search for jobs using natural language\n\
\u{2022} Update filters (e.g., \"show remote only\", \"high matches\")\n\
\u{2022} Answer questions about features\n\
\u{2022} Help you find the best opportunities\n\n\
What would you like to do?";

/// `search_jobs`: maps free-text parameters into a filter patch and a
/// short acknowledgement.
pub(crate) fn search_jobs(intent: &Intent) -> TurnState {
    let params = &intent.parameters;
    let mut update = FilterUpdate::default();

    if let Some(role) = non_empty_str(params, "role") {
        update.role = Some(role.to_string());
    }
    if let Some(skills) = params.get("skills").filter(|v| !v.is_null()) {
        update.skills = Some(string_list(skills));
    }
    if let Some(location) = non_empty_str(params, "location") {
        update.location = Some(location.to_string());
    }
    if truthy(params.get("remote")) {
        update.work_mode = Some(vec!["remote".to_string()]);
    }

    let role = non_empty_str(params, "role").unwrap_or("jobs");
    TurnState {
        response: Some(format!("Searching for {role}...")),
        filter_update: Some(update),
    }
}

/// `update_filters`: normalizes each present parameter through the fixed
/// keyword rules, or resets everything on a clear action. Produces no
/// reply text of its own; the summary line is rendered downstream.
pub(crate) fn update_filters(intent: &Intent) -> TurnState {
    let params = &intent.parameters;

    if wants_clear(params) {
        return TurnState {
            response: Some("All filters cleared!".to_string()),
            filter_update: Some(FilterUpdate::cleared()),
        };
    }

    let mut update = FilterUpdate::default();

    if let Some(value) = params.get("workMode").filter(|v| !v.is_null()) {
        update.work_mode = Some(
            string_list(value)
                .iter()
                .map(|m| normalize_work_mode(m))
                .collect(),
        );
    }
    if let Some(score) = non_empty_str(params, "matchScore") {
        update.match_score = Some(normalize_match_score(score));
    }
    if let Some(value) = params.get("jobType").filter(|v| !v.is_null()) {
        update.job_type = Some(
            string_list(value)
                .iter()
                .map(|t| normalize_job_type(t))
                .collect(),
        );
    }
    if let Some(value) = params.get("skills").filter(|v| !v.is_null()) {
        update.skills = Some(string_list(value));
    }
    if let Some(location) = non_empty_str(params, "location") {
        update.location = Some(location.to_string());
    }

    TurnState {
        response: None,
        filter_update: Some(update),
    }
}

/// `help`: deterministic keyword-matched FAQ. Topics are tested in fixed
/// priority order; no model call.
pub(crate) fn help(message: &str) -> TurnState {
    let question = message.to_lowercase();

    let reply = if question.contains("match") || question.contains("score") {
        HELP_MATCHING
    } else if question.contains("filter") {
        HELP_FILTERS
    } else if question.contains("apply") || question.contains("track") {
        HELP_APPLICATIONS
    } else if question.contains("resume") {
        HELP_RESUME
    } else {
        HELP_GENERAL
    };

    TurnState {
        response: Some(reply.to_string()),
        filter_update: None,
    }
}

/// `general_chat`: brief friendly reply via the completion capability,
/// fixed fallback on any error.
pub(crate) async fn general_chat(llm: &dyn CompletionProvider, message: &str) -> TurnState {
    let prompt = CHAT_PROMPT_TEMPLATE.replace("{message}", message);

    let response = match llm
        .complete(&prompt, CompletionParams { temperature: 0.7 })
        .await
    {
        Ok(reply) => reply.trim().to_string(),
        Err(e) => {
            warn!("general chat completion failed, using fallback reply: {e}");
            CHAT_FALLBACK.to_string()
        }
    };

    TurnState {
        response: Some(response),
        filter_update: None,
    }
}

fn wants_clear(params: &Map<String, Value>) -> bool {
    params.get("action").and_then(Value::as_str) == Some("clear")
        || params.get("clear").and_then(Value::as_bool) == Some(true)
}

fn non_empty_str<'a>(params: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Loose truthiness for flags the classifier may return as a bool, a
/// string, or a number.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty() && s.as_str() != "false",
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::intent::IntentKind;
    use crate::llm_client::CompletionError;
    use crate::models::{DatePosted, MatchScoreBand};
    use async_trait::async_trait;
    use serde_json::json;

    fn make_intent(kind: IntentKind, params: Value) -> Intent {
        let parameters = match params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Intent {
            kind,
            parameters,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_search_jobs_builds_filter_and_response() {
        let intent = make_intent(
            IntentKind::SearchJobs,
            json!({"role": "frontend", "skills": ["React"], "location": "Berlin", "remote": true}),
        );
        let turn = search_jobs(&intent);

        assert_eq!(turn.response.as_deref(), Some("Searching for frontend..."));
        let update = turn.filter_update.unwrap();
        assert_eq!(update.role.as_deref(), Some("frontend"));
        assert_eq!(update.skills, Some(vec!["React".to_string()]));
        assert_eq!(update.location.as_deref(), Some("Berlin"));
        assert_eq!(update.work_mode, Some(vec!["remote".to_string()]));
    }

    #[test]
    fn test_search_jobs_coerces_scalar_skills() {
        let intent = make_intent(IntentKind::SearchJobs, json!({"skills": "Python"}));
        let turn = search_jobs(&intent);
        let update = turn.filter_update.unwrap();
        assert_eq!(update.skills, Some(vec!["Python".to_string()]));
    }

    #[test]
    fn test_search_jobs_without_role_defaults_response() {
        let intent = make_intent(IntentKind::SearchJobs, json!({}));
        let turn = search_jobs(&intent);
        assert_eq!(turn.response.as_deref(), Some("Searching for jobs..."));
    }

    #[test]
    fn test_search_jobs_remote_flag_not_set_for_false() {
        let intent = make_intent(IntentKind::SearchJobs, json!({"remote": false}));
        let turn = search_jobs(&intent);
        assert!(turn.filter_update.unwrap().work_mode.is_none());
    }

    #[test]
    fn test_update_filters_clear_action_resets_everything() {
        // Other parameters present alongside the clear action are ignored
        let intent = make_intent(
            IntentKind::UpdateFilters,
            json!({"action": "clear", "workMode": "remote"}),
        );
        let turn = update_filters(&intent);

        assert_eq!(turn.response.as_deref(), Some("All filters cleared!"));
        let update = turn.filter_update.unwrap();
        assert_eq!(update.role.as_deref(), Some(""));
        assert_eq!(update.skills, Some(vec![]));
        assert_eq!(update.date_posted, Some(DatePosted::Anytime));
        assert_eq!(update.job_type, Some(vec![]));
        assert_eq!(update.work_mode, Some(vec![]));
        assert_eq!(update.location.as_deref(), Some(""));
        assert_eq!(update.match_score, Some(MatchScoreBand::All));
    }

    #[test]
    fn test_update_filters_clear_flag_variant() {
        let intent = make_intent(IntentKind::UpdateFilters, json!({"clear": true}));
        let turn = update_filters(&intent);
        assert_eq!(turn.response.as_deref(), Some("All filters cleared!"));
    }

    #[test]
    fn test_update_filters_normalizes_tokens() {
        let intent = make_intent(
            IntentKind::UpdateFilters,
            json!({
                "workMode": ["working from home remotely", "office"],
                "jobType": "full time",
                "matchScore": "best ones"
            }),
        );
        let update = update_filters(&intent).filter_update.unwrap();

        assert_eq!(
            update.work_mode,
            Some(vec!["remote".to_string(), "onsite".to_string()])
        );
        assert_eq!(update.job_type, Some(vec!["full-time".to_string()]));
        assert_eq!(update.match_score, Some(MatchScoreBand::High));
    }

    #[test]
    fn test_update_filters_passes_unknown_tokens_through() {
        let intent = make_intent(
            IntentKind::UpdateFilters,
            json!({"workMode": ["asteroid"], "jobType": ["gig"]}),
        );
        let update = update_filters(&intent).filter_update.unwrap();
        assert_eq!(update.work_mode, Some(vec!["asteroid".to_string()]));
        assert_eq!(update.job_type, Some(vec!["gig".to_string()]));
    }

    #[test]
    fn test_update_filters_no_params_yields_empty_update_and_no_response() {
        let intent = make_intent(IntentKind::UpdateFilters, json!({}));
        let turn = update_filters(&intent);
        assert!(turn.response.is_none());
        assert!(turn.filter_update.unwrap().is_empty());
    }

    #[test]
    fn test_help_matching_topic() {
        let turn = help("How does the match score work?");
        assert!(turn.response.unwrap().contains("Skills overlap (40%)"));
    }

    #[test]
    fn test_help_priority_match_beats_filter() {
        // Both topics present: match/score wins the fixed priority order
        let turn = help("can I filter by match score?");
        assert!(turn.response.unwrap().contains("Skills overlap (40%)"));
    }

    #[test]
    fn test_help_filter_topic() {
        let turn = help("what filters are there?");
        assert!(turn.response.unwrap().contains("work mode"));
    }

    #[test]
    fn test_help_apply_and_resume_topics() {
        let turn = help("how do I track an application?");
        assert!(turn.response.unwrap().contains("Applications dashboard"));

        let turn = help("can I replace my resume?");
        assert!(turn.response.unwrap().contains("Upload your resume"));
    }

    #[test]
    fn test_help_generic_fallback() {
        let turn = help("hello there");
        assert!(turn.response.unwrap().contains("job search assistant"));
    }

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(
            &self,
            _prompt: &str,
            _params: CompletionParams,
        ) -> Result<String, CompletionError> {
            Err(CompletionError::EmptyContent)
        }
    }

    #[tokio::test]
    async fn test_general_chat_fallback_on_error() {
        let turn = general_chat(&FailingProvider, "hi").await;
        assert_eq!(turn.response.as_deref(), Some(CHAT_FALLBACK));
        assert!(turn.filter_update.is_none());
    }
}
