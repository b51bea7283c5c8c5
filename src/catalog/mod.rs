// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use inflector::Inflector as _;
use log::debug;
use serde::Deserialize;

use crate::{
    error::Result,
    latency::{self, Latency},
};

static BUILTIN_DOMAINS: &str = include_str!("domains.json");

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Colour of the badge the difficulty is shown in.
    pub(crate) const fn badge_color(self) -> &'static str {
        match self {
            Self::Beginner => "green",
            Self::Intermediate => "blue",
            Self::Advanced => "purple",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_title_case())
    }
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Icon {
    Code,
    Brain,
    Shield,
    Smartphone,
    BarChart,
    #[serde(other)]
    Unknown,
}

impl Icon {
    pub(crate) const fn glyph(self) -> &'static str {
        match self {
            Self::Brain => "🧠",
            Self::Shield => "🛡",
            Self::Smartphone => "📱",
            Self::BarChart => "📊",
            Self::Code | Self::Unknown => "💻",
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Project {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) difficulty: Difficulty,
    pub(crate) time_estimate: String,
    #[serde(default)]
    pub(crate) source_link: Option<String>,
    #[serde(default)]
    pub(crate) code_snippet: Option<String>,
    pub(crate) tags: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub(crate) struct Domain {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) icon: Icon,
    pub(crate) color: String,
    pub(crate) projects: Vec<Project>,
}

impl Domain {
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }

    /// "1 project", "3 projects".
    pub(crate) fn project_count_label(&self) -> String {
        match self.projects.len() {
            1 => "1 project".to_owned(),
            n => format!("{n} projects"),
        }
    }
}

/// Keeps the domains whose name or description contains `term`, ignoring
/// case. An empty term keeps everything.
pub(crate) fn filter_domains<'domains>(
    domains: &'domains [Domain],
    term: &str,
) -> Vec<&'domains Domain> {
    let needle = term.to_lowercase();
    domains.iter().filter(|d| d.matches(&needle)).collect()
}

/// Read-only access to the catalog. Absence is a normal outcome, not an
/// error.
#[async_trait]
pub(crate) trait Catalog: Send + Sync {
    async fn list_domains(&self) -> Vec<Domain>;
    async fn get_domain(&self, id: &str) -> Option<Domain>;
    async fn get_project(&self, domain_id: &str, project_id: &str) -> Option<Project>;
}

pub(crate) struct StaticCatalog {
    domains: Arc<[Domain]>,
    latency: Latency,
}

impl StaticCatalog {
    pub(crate) fn new(domains: Vec<Domain>, latency: Latency) -> Self {
        Self {
            domains: domains.into(),
            latency,
        }
    }

    /// The catalog that ships with the binary.
    pub(crate) fn builtin(latency: Latency) -> Result<Self> {
        let domains: Vec<Domain> = serde_json::from_str(BUILTIN_DOMAINS)?;
        debug!("Loaded {} built-in domains", domains.len());
        Ok(Self::new(domains, latency))
    }

    fn find_domain(&self, id: &str) -> Option<&Domain> {
        self.domains.iter().find(|d| d.id == id)
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn list_domains(&self) -> Vec<Domain> {
        latency::simulate(self.latency.list_domains).await;
        self.domains.to_vec()
    }

    async fn get_domain(&self, id: &str) -> Option<Domain> {
        latency::simulate(self.latency.get_domain).await;
        self.find_domain(id).cloned()
    }

    async fn get_project(&self, domain_id: &str, project_id: &str) -> Option<Project> {
        latency::simulate(self.latency.get_project).await;
        self.find_domain(domain_id)?
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
    }
}
