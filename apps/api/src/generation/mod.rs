// Portfolio text generation: prompt construction and the per-request provider pipeline.
// All provider calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
