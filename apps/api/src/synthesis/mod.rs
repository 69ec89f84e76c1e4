// Resume synthesis: intake of a completed form, then the two generators
// (templated summary and PDF document) behind HTTP handlers.

pub mod handlers;
pub mod intake;
