// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use tabled::{settings::Style, Table, Tabled};

use crate::catalog::{filter_domains, Catalog, Domain};

use super::{Load, Mount, UnmountHandle, ViewState};

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "")]
    icon: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Domain")]
    name: String,
    #[tabled(rename = "Projects")]
    projects: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl From<&Domain> for Row {
    fn from(domain: &Domain) -> Self {
        Self {
            icon: domain.icon.glyph(),
            id: domain.id.clone(),
            name: domain.name.clone(),
            projects: domain.project_count_label(),
            description: domain.description.clone(),
        }
    }
}

/// Lists every domain, narrowed down by a search term.
#[derive(Debug, Default)]
pub(crate) struct Dashboard {
    domains: Option<Vec<Domain>>,
    search: String,
    state: ViewState<Vec<Domain>>,
    mount: Mount,
}

impl Dashboard {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) const fn state(&self) -> &ViewState<Vec<Domain>> {
        &self.state
    }

    pub(crate) fn unmount_handle(&self) -> UnmountHandle {
        self.mount.handle()
    }

    pub(crate) async fn load(&mut self, catalog: &dyn Catalog) -> Load {
        self.state = ViewState::Loading;
        match self.mount.settle(catalog.list_domains()).await {
            Some(domains) => {
                self.domains = Some(domains);
                self.refresh();
                Load::Applied
            }
            None => Load::Discarded,
        }
    }

    /// Re-applies the filter straight away; nothing is fetched again.
    pub(crate) fn set_search<S: Into<String>>(&mut self, term: S) {
        self.search = term.into();
        self.refresh();
    }

    fn refresh(&mut self) {
        let Some(ref domains) = self.domains else {
            return;
        };
        let visible = filter_domains(domains, &self.search)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>();
        self.state = if visible.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Populated(visible)
        };
    }

    pub(crate) fn render(&self) -> String {
        let heading = "Explore different domains and find your next coding project";
        let body = match self.state {
            ViewState::Idle | ViewState::Loading => "Loading domains...".to_owned(),
            ViewState::Empty | ViewState::NotFound => {
                "No domains found matching your search.".to_owned()
            }
            ViewState::Populated(ref domains) => Table::new(domains.iter().map(Row::from))
                .with(Style::rounded())
                .to_string(),
        };
        format!("{heading}\n\n{body}")
    }
}

#[cfg(test)]
mod tests {
    use crate::{catalog::StaticCatalog, latency::Latency};

    use super::*;

    fn names(state: &ViewState<Vec<Domain>>) -> Vec<&str> {
        state
            .populated()
            .map(|domains| domains.iter().map(|d| d.name.as_str()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn loads_then_filters_on_every_keystroke() {
        let catalog = StaticCatalog::builtin(Latency::instant()).unwrap();
        let mut dashboard = Dashboard::new();
        assert_eq!(*dashboard.state(), ViewState::Idle);

        assert_eq!(dashboard.load(&catalog).await, Load::Applied);
        assert_eq!(names(dashboard.state()).len(), 5);

        for (term, expected) in [
            ("s", 5),
            ("se", 2),
            ("sec", 1),
            ("secu", 1),
            ("SECUR", 1),
        ] {
            dashboard.set_search(term);
            assert_eq!(names(dashboard.state()).len(), expected, "term {term:?}");
        }
        assert_eq!(names(dashboard.state()), ["Cybersecurity"]);

        dashboard.set_search("");
        assert_eq!(
            names(dashboard.state()),
            [
                "Machine Learning",
                "Web Development",
                "Cybersecurity",
                "Mobile Development",
                "Data Science"
            ]
        );
    }

    #[tokio::test]
    async fn unmatched_search_is_empty() {
        let catalog = StaticCatalog::builtin(Latency::instant()).unwrap();
        let mut dashboard = Dashboard::new();
        dashboard.set_search("zzz");

        let _ = dashboard.load(&catalog).await;

        assert_eq!(*dashboard.state(), ViewState::Empty);
        assert!(dashboard
            .render()
            .contains("No domains found matching your search."));
    }

    #[tokio::test]
    async fn render_lists_project_counts() {
        let catalog = StaticCatalog::builtin(Latency::instant()).unwrap();
        let mut dashboard = Dashboard::new();
        let _ = dashboard.load(&catalog).await;

        let rendered = dashboard.render();

        assert!(rendered.contains("Mobile Development"));
        assert!(rendered.contains("3 projects"));
    }

    #[tokio::test(start_paused = true)]
    async fn unmounted_dashboard_discards_late_results() {
        let catalog = StaticCatalog::builtin(Latency::default()).unwrap();
        let mut dashboard = Dashboard::new();
        let handle = dashboard.unmount_handle();

        let unmount = tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            handle.unmount();
        });
        let load = dashboard.load(&catalog).await;
        unmount.await.unwrap();

        assert_eq!(load, Load::Discarded);
        assert_eq!(*dashboard.state(), ViewState::Loading);
    }
}
