// Request orchestration for the resume API.
// Handlers own HTTP intake and response shaping; the pipeline owns stage sequencing.

pub mod handlers;
pub mod pipeline;
