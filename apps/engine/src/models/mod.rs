pub mod conversation;
pub mod job;
pub mod resume;

pub use conversation::{
    ConversationState, DatePosted, FilterUpdate, MatchScoreBand, Message, Role,
};
pub use job::JobPosting;
pub use resume::ResumeProfile;
