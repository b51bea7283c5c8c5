// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::error;

use crate::{
    app::{App, Page},
    error::{self, Result},
    navigation::Route,
};

/// Go to a page by its path, e.g. /domain/web-development.
#[derive(Debug, Parser)]
pub(crate) struct Open {
    /// The path to open.
    #[clap()]
    path: String,
}

#[async_trait]
impl super::Command for Open {
    async fn execute(self, app: &App) -> Result<()> {
        let page = app.open(Route::parse(&self.path), None).await;
        println!("{}", app.render(&page));
        Ok(())
    }
}

/// List the domains, optionally filtered by a search term.
#[derive(Debug, Parser)]
pub(crate) struct Dashboard {
    /// Only show domains whose name or description contains this text.
    #[arg(long, short)]
    search: Option<String>,
}

#[async_trait]
impl super::Command for Dashboard {
    async fn execute(self, app: &App) -> Result<()> {
        let page = app.open(Route::Dashboard, self.search.as_deref()).await;
        println!("{}", app.render(&page));
        Ok(())
    }
}

/// Show the project ideas of a domain.
#[derive(Debug, Parser)]
pub(crate) struct Domain {
    /// The identifier of the domain, as shown on the dashboard.
    #[clap()]
    domain_id: String,
}

#[async_trait]
impl super::Command for Domain {
    async fn execute(self, app: &App) -> Result<()> {
        let page = app.open(Route::domain(self.domain_id), None).await;
        println!("{}", app.render(&page));
        Ok(())
    }
}

/// Show a project idea in detail.
#[derive(Debug, Parser)]
pub(crate) struct Project {
    /// Print only the code snippet of the project, ready to be piped
    /// elsewhere.
    #[arg(long)]
    copy_code: bool,

    /// The identifier of the domain the project belongs to.
    #[clap()]
    domain_id: String,

    /// The identifier of the project within its domain.
    #[clap()]
    project_id: String,
}

#[async_trait]
impl super::Command for Project {
    async fn execute(self, app: &App) -> Result<()> {
        let route = Route::project(self.domain_id, self.project_id);
        let page = app.open(route.clone(), None).await;

        if !self.copy_code {
            println!("{}", app.render(&page));
            return Ok(());
        }

        let snippet = match page {
            Page::Project(ref view) => view.copy_code(app.notifier()),
            Page::Login
            | Page::Signup
            | Page::Dashboard(_)
            | Page::Domain(_)
            | Page::NotFound { .. } => None,
        };
        if let Some(code) = snippet {
            println!("{code}");
            Ok(())
        } else {
            error!("There is no code snippet to copy at {}", route);
            Err(error::Error::Command)
        }
    }
}
