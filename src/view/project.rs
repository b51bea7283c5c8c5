// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write as _;

use log::info;

use crate::{
    catalog::{Catalog, Domain, Project},
    navigation::{Navigator, Route},
    notification::{Notification, Notifier},
};

use super::{Load, Mount, UnmountHandle, ViewState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ProjectPage {
    pub(crate) domain: Option<Domain>,
    pub(crate) project: Project,
}

impl ProjectPage {
    pub(crate) fn back_label(&self) -> String {
        let target = self.domain.as_ref().map_or("Projects", |d| d.name.as_str());
        format!("Back to {target}")
    }
}

/// The details of a single project idea.
#[derive(Debug)]
pub(crate) struct ProjectView {
    domain_id: String,
    project_id: String,
    state: ViewState<ProjectPage>,
    mount: Mount,
}

impl ProjectView {
    pub(crate) fn new<D: Into<String>, P: Into<String>>(domain_id: D, project_id: P) -> Self {
        Self {
            domain_id: domain_id.into(),
            project_id: project_id.into(),
            state: ViewState::Idle,
            mount: Mount::default(),
        }
    }

    #[cfg(test)]
    pub(crate) const fn state(&self) -> &ViewState<ProjectPage> {
        &self.state
    }

    pub(crate) fn unmount_handle(&self) -> UnmountHandle {
        self.mount.handle()
    }

    /// Fetches the domain and the project side by side. A project that does
    /// not exist sends the navigator back to its domain.
    pub(crate) async fn load(&mut self, catalog: &dyn Catalog, navigator: &Navigator) -> Load {
        self.state = ViewState::Loading;
        let both = async {
            tokio::join!(
                catalog.get_domain(&self.domain_id),
                catalog.get_project(&self.domain_id, &self.project_id),
            )
        };
        match self.mount.settle(both).await {
            Some((domain, Some(project))) => {
                self.state = ViewState::Populated(ProjectPage { domain, project });
                Load::Applied
            }
            Some((_, None)) => {
                info!(
                    "Project {} does not exist in domain {}",
                    self.project_id, self.domain_id
                );
                self.state = ViewState::NotFound;
                let _ = navigator.navigate(Route::domain(self.domain_id.clone()));
                Load::Applied
            }
            None => Load::Discarded,
        }
    }

    /// Hands out the code snippet, if there is one, and tells the user it
    /// was copied.
    pub(crate) fn copy_code(&self, notifier: &dyn Notifier) -> Option<&str> {
        let snippet = self.state.populated()?.project.code_snippet.as_deref()?;
        notifier.notify(Notification::normal(
            "Code copied!",
            "The code snippet has been copied to your clipboard.",
        ));
        Some(snippet)
    }

    pub(crate) fn render(&self) -> String {
        let page = match self.state {
            ViewState::Idle | ViewState::Loading => return "Loading project...".to_owned(),
            ViewState::Empty | ViewState::NotFound => {
                return format!(
                    "Project {} was not found in {}.",
                    self.project_id, self.domain_id
                )
            }
            ViewState::Populated(ref page) => page,
        };
        let project = &page.project;

        let mut out = format!("< {}\n\n{}\n", page.back_label(), project.title);
        _ = writeln!(
            out,
            "Difficulty: {} [{}]   Time: {}",
            project.difficulty,
            project.difficulty.badge_color(),
            project.time_estimate
        );
        _ = writeln!(out, "Tags: {}", project.tags.join(", "));
        _ = writeln!(out, "\n{}", project.description);
        if let Some(ref link) = project.source_link {
            _ = writeln!(out, "\nSource: {link}");
        }
        if let Some(ref snippet) = project.code_snippet {
            _ = writeln!(out, "\nCode snippet:\n{snippet}");
        }
        out
    }
}
