use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use thiserror::Error;

static CONTENT_DIR: Dir = include_dir!("src/content");

const PORTFOLIO_FILE: &str = "portfolio.json";
const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content file not found: {0}")]
    Missing(&'static str),
    #[error("content file is not utf-8: {0}")]
    Encoding(&'static str),
    #[error("unable to deserialize content: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExternalLink {
    pub label: String,
    pub url: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub years: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub role: String,
    pub organization: String,
    #[serde(default)]
    pub logo: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Project {
    pub title: String,
    pub tech: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl Project {
    /// The long description split on blank lines, trimmed, empties dropped.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.long_description
            .as_deref()
            .map(|text| {
                text.split("\n\n")
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn image_or_placeholder(&self) -> &str {
        if self.image.is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            &self.image
        }
    }
}

/// Everything the page displays. Loaded once and never mutated.
#[derive(Deserialize, Clone, Debug)]
pub struct Portfolio {
    pub name: String,
    pub greeting: String,
    pub roles: Vec<String>,
    pub tagline: String,
    #[serde(default)]
    pub portrait: Option<String>,
    pub about: Vec<String>,
    pub education: Vec<Education>,
    pub experience: Vec<Job>,
    pub projects: Vec<Project>,
    pub links: Vec<ExternalLink>,
}

impl Portfolio {
    /// The portfolio bundled into the binary.
    pub fn embedded() -> Result<Self, ContentError> {
        let file = CONTENT_DIR
            .get_file(PORTFOLIO_FILE)
            .ok_or(ContentError::Missing(PORTFOLIO_FILE))?;
        let text = file
            .contents_utf8()
            .ok_or(ContentError::Encoding(PORTFOLIO_FILE))?;
        Self::from_json(text)
    }

    pub fn from_json(text: &str) -> Result<Self, ContentError> {
        Ok(from_str(text)?)
    }

    pub fn link(&self, label: &str) -> Option<&ExternalLink> {
        self.links
            .iter()
            .find(|l| l.label.eq_ignore_ascii_case(label))
    }
}
