// Text generation for the resume: templated summary and per-experience
// descriptions. The only remote call (description completion) goes through
// llm_client and always has a local fallback.

pub mod description;
pub mod prompts;
pub mod summary;
