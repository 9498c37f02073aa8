//! Generation pipeline: one "about" prompt, then one prompt per project, in order.
//!
//! Calls are sequential and the first failure aborts the request; there is no
//! partial result and no fallback to the other provider.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::generation::prompts::{
    about_prompt, project_prompt, ABOUT_MAX_TOKENS, PROJECT_MAX_TOKENS,
};
use crate::llm_client::{LlmClient, LlmError, Provider, TextProvider};
use crate::portfolio::models::Project;

pub const NO_PROVIDER_MESSAGE: &str =
    "No AI API key configured. Please set OPENAI_API_KEY or GEMINI_API_KEY in .env file";

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub about: String,
    /// Aligned by position with `GenerateRequest::projects`.
    pub project_descriptions: Vec<String>,
}

/// Resolves the backend for `provider` and runs the full prompt sequence against it.
pub async fn generate_descriptions(
    llm: &LlmClient,
    provider: &Provider,
    request: &GenerateRequest,
) -> Result<GenerateResponse, AppError> {
    let backend = llm
        .text_provider(provider)
        .ok_or_else(|| AppError::Configuration(NO_PROVIDER_MESSAGE.to_string()))?;

    info!(
        provider = provider.label(),
        projects = request.projects.len(),
        "Generating portfolio descriptions"
    );

    run_prompts(backend.as_ref(), request)
        .await
        .map_err(|e| AppError::Provider(format!("{} API error: {e}", backend.name())))
}

async fn run_prompts(
    backend: &dyn TextProvider,
    request: &GenerateRequest,
) -> Result<GenerateResponse, LlmError> {
    let about = backend
        .complete(
            &about_prompt(&request.name, &request.title, &request.skills),
            ABOUT_MAX_TOKENS,
        )
        .await?
        .trim()
        .to_string();

    let mut project_descriptions = Vec::with_capacity(request.projects.len());
    for (index, project) in request.projects.iter().enumerate() {
        debug!(index, project = %project.name, "Generating project description");
        let description = backend
            .complete(
                &project_prompt(&project.name, &project.technologies),
                PROJECT_MAX_TOKENS,
            )
            .await?;
        project_descriptions.push(description.trim().to_string());
    }

    Ok(GenerateResponse {
        about,
        project_descriptions,
    })
}
