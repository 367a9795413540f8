// All prompt constants for the Intent Router.

/// Intent classification prompt. Replace `{message}` before sending.
/// The reply must be strict JSON; the caller strips stray code fences
/// before parsing and falls back to general chat on anything unusable.
pub const INTENT_PROMPT_TEMPLATE: &str = r#"Analyze the user's message and determine their intent.

User message: "{message}"

Classify into ONE of these intents:
1. search_jobs - User wants to find/search for jobs (e.g., "show me frontend jobs", "find remote positions")
2. update_filters - User wants to change active filters (e.g., "show only remote", "filter by high match", "clear filters")
3. help - User has questions about the platform (e.g., "how does matching work?", "what features do you have?")
4. general_chat - General conversation or unclear intent

Extract parameters based on intent:
- For search_jobs: {role, skills, location, remote}
- For update_filters: {workMode, matchScore, jobType, skills, location, action}

Respond ONLY with valid JSON in this format:
{
  "type": "intent_type",
  "parameters": {},
  "confidence": 0.0-1.0
}

Do NOT include any text outside the JSON object.
Do NOT use markdown code fences."#;

/// General-chat prompt. Replace `{message}` before sending.
pub const CHAT_PROMPT_TEMPLATE: &str = r#"You are a helpful AI assistant for a job tracking platform.

User: {message}

Provide a brief, friendly response. If the user's intent is unclear, ask clarifying questions or suggest what you can help with.
Keep responses under 3 sentences."#;
