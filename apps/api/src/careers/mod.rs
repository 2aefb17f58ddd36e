// Career matching (embedding similarity against a fixed catalog) and
// LLM-generated career-path recommendations.

pub mod catalog;
pub mod embedding;
pub mod matcher;
pub mod paths;
pub mod prompts;
