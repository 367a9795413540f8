use serde::{Deserialize, Serialize};

/// A candidate's extracted resume profile. Immutable input to scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeProfile {
    pub user_id: String,
    pub extracted_text: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub keywords: Vec<String>,
}
