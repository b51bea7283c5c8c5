// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use log::info;
use tabled::{settings::Style, Table, Tabled};

use crate::{
    catalog::{Catalog, Domain, Project},
    navigation::{Navigator, Route},
};

use super::{Load, Mount, UnmountHandle, ViewState};

const VISIBLE_TAGS: usize = 3;

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Difficulty")]
    difficulty: String,
    #[tabled(rename = "Time")]
    time_estimate: String,
    #[tabled(rename = "Tags")]
    tags: String,
    #[tabled(rename = "Source")]
    source: String,
}

impl From<&Project> for Row {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            title: project.title.clone(),
            difficulty: project.difficulty.to_string(),
            time_estimate: project.time_estimate.clone(),
            tags: summarize_tags(&project.tags),
            source: project.source_link.clone().unwrap_or_default(),
        }
    }
}

fn summarize_tags(tags: &[String]) -> String {
    let shown = tags
        .iter()
        .take(VISIBLE_TAGS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    match tags.len().saturating_sub(VISIBLE_TAGS) {
        0 => shown,
        hidden => format!("{shown} +{hidden} more"),
    }
}

/// One domain and the projects it contains.
#[derive(Debug)]
pub(crate) struct DomainView {
    domain_id: String,
    state: ViewState<Domain>,
    mount: Mount,
}

impl DomainView {
    pub(crate) fn new<S: Into<String>>(domain_id: S) -> Self {
        Self {
            domain_id: domain_id.into(),
            state: ViewState::Idle,
            mount: Mount::default(),
        }
    }

    #[cfg(test)]
    pub(crate) const fn state(&self) -> &ViewState<Domain> {
        &self.state
    }

    pub(crate) fn unmount_handle(&self) -> UnmountHandle {
        self.mount.handle()
    }

    /// Fetches the domain. A domain that does not exist sends the navigator
    /// back to the dashboard.
    pub(crate) async fn load(&mut self, catalog: &dyn Catalog, navigator: &Navigator) -> Load {
        self.state = ViewState::Loading;
        match self.mount.settle(catalog.get_domain(&self.domain_id)).await {
            Some(Some(domain)) => {
                self.state = ViewState::Populated(domain);
                Load::Applied
            }
            Some(None) => {
                info!("Domain {} does not exist", self.domain_id);
                self.state = ViewState::NotFound;
                let _ = navigator.navigate(Route::Dashboard);
                Load::Applied
            }
            None => Load::Discarded,
        }
    }

    pub(crate) fn render(&self) -> String {
        let back = "< Back to Domains";
        let body = match self.state {
            ViewState::Idle | ViewState::Loading => "Loading projects...".to_owned(),
            ViewState::Empty | ViewState::NotFound => {
                format!("Domain {} was not found.", self.domain_id)
            }
            ViewState::Populated(ref domain) => {
                let heading = format!(
                    "{} {} ({})\n{}\n{}",
                    domain.icon.glyph(),
                    domain.name,
                    domain.color,
                    domain.description,
                    domain.project_count_label(),
                );
                let table = Table::new(domain.projects.iter().map(Row::from))
                    .with(Style::rounded())
                    .to_string();
                format!("{heading}\n\n{table}")
            }
        };
        format!("{back}\n\n{body}")
    }
}
