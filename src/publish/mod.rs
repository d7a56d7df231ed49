use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use std::sync::LazyLock;

use crate::config::Config;
use crate::errors::AppError;

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-z0-9]+").expect("static pattern"));

/// Normalizes a free-text description into a URL/filename-safe token.
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let slug = NON_ALNUM.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "app".into()
    } else {
        slug.to_string()
    }
}

fn filename_at(description: &str, ts: DateTime<Utc>) -> String {
    format!("{}-{}.html", slugify(description), ts.format("%Y%m%d-%H%M%S"))
}

/// Slug plus a UTC timestamp at second resolution. Two publishes of the same
/// description within the same second would collide; anything further apart
/// cannot.
pub fn generate_filename(description: &str) -> String {
    filename_at(description, Utc::now())
}

#[derive(Debug, Clone, Serialize)]
pub struct PublishRecord {
    pub repo_url: String,
    pub pages_url: String,
    pub filename: String,
    pub path: String,
}

/// Writes a generated document as a brand-new file in the configured GitHub
/// repository via the contents API. Never reads an existing file or its SHA,
/// so it can never overwrite prior artifacts or the site's index.
pub struct GithubPublisher {
    client: Client,
    owner: String,
    repo: String,
    branch: String,
    token: String,
    pages_base_url: String,
}

impl GithubPublisher {
    pub fn new(cfg: &Config) -> Self {
        Self {
            client: Client::new(),
            owner: cfg.github_owner.clone(),
            repo: cfg.github_repo.clone(),
            branch: cfg.github_branch.clone(),
            token: cfg.github_token.clone(),
            pages_base_url: cfg.pages_base_url.clone(),
        }
    }

    pub async fn publish(&self, document: &str, description: &str) -> Result<PublishRecord, AppError> {
        let filename = generate_filename(description);
        let path = format!("generated/{filename}");
        let contents_url = format!(
            "https://api.github.com/repos/{}/{}/contents/{}",
            self.owner, self.repo, path
        );

        let payload = json!({
            "message": format!("chore: deploy generated app {filename}"),
            "content": STANDARD.encode(document.as_bytes()),
            "branch": self.branch,
        });

        tracing::info!(%path, branch = %self.branch, "publishing generated document");

        let resp = self
            .client
            .put(&contents_url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            // The GitHub API rejects requests without a User-Agent.
            .header("User-Agent", "pagesmith")
            .json(&payload)
            .send()
            .await
            .map_err(anyhow::Error::from)?;

        let status = resp.status();
        let body = resp.text().await.map_err(anyhow::Error::from)?;

        // The contents API answers 201 for a new file, 200 for an update; we
        // only ever create, but accept both like the API documents.
        if status != reqwest::StatusCode::OK && status != reqwest::StatusCode::CREATED {
            return Err(AppError::Publish { status: status.as_u16(), body });
        }

        Ok(PublishRecord {
            repo_url: format!("https://github.com/{}/{}", self.owner, self.repo),
            pages_url: format!("{}/generated/{}", self.pages_base_url, filename),
            filename,
            path,
        })
    }
}
