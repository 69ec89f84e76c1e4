// Prompt constants for per-experience description completion.
// Reuses the plain-text fragment from llm_client::prompts.

/// System prompt for description completion.
pub const DESCRIPTION_SYSTEM: &str = "You are an expert resume writer. \
    You write short, factual, first-person-free descriptions of a job role. \
    Never invent employers, numbers, or technologies that were not given.";

/// Description prompt template. Replace `{position}` and `{company}` before sending.
pub const DESCRIPTION_PROMPT_TEMPLATE: &str = "Write a professional description, two to \
three sentences long, of the work typically done as a {position} at {company}. \
Use active verbs and keep it suitable for the experience section of a resume.";
