use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Process-wide configuration, read once at startup. Every remote credential
/// and endpoint lives here; nothing else reads the environment ad hoc.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm_endpoint: String,
    #[serde(skip_serializing)]
    pub llm_api_key: String,
    pub model: String,
    pub timeout_secs: u64,
    pub github_owner: String,
    pub github_repo: String,
    pub github_branch: String,
    #[serde(skip_serializing)]
    pub github_token: String,
    pub pages_base_url: String,
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{name} must be set in the environment"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_owner = required("GITHUB_USERNAME")?;
        let github_repo = required("GITHUB_REPO")?;
        let pages_base_url = env::var("GITHUB_PAGES_BASE_URL")
            .unwrap_or_else(|_| format!("https://{github_owner}.github.io/{github_repo}"));

        Ok(Self {
            llm_endpoint: required("LLM_API_ENDPOINT")?,
            llm_api_key: required("LLM_API_KEY")?,
            model: env::var("PAGESMITH_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
            timeout_secs: 300,
            github_token: required("GITHUB_TOKEN")?,
            github_branch: env::var("GITHUB_BRANCH").unwrap_or_else(|_| "main".into()),
            github_owner,
            github_repo,
            pages_base_url,
        })
    }
}
