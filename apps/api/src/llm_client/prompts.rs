// Cross-cutting prompt fragments shared by every completion call.
// Feature-specific prompts live next to the feature (see generation/prompts.rs).

/// Appended to every system prompt: the answer goes straight onto a resume.
pub const PLAIN_TEXT_INSTRUCTION: &str = "Respond with the requested text only. \
    Do NOT add headings, bullet markers, quotes, markdown, or explanations.";
