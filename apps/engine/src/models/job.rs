use serde::{Deserialize, Serialize};

/// A job posting as supplied by the caller, fully resolved. Immutable
/// input to scoring; the engines perform no lookup or I/O of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
}
