// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{app::App, error::Result, password};

/// Log in with an existing account.
#[derive(Debug, Parser)]
pub(crate) struct Login {
    /// The password. You will be asked for it if it is not given here.
    #[arg(long, short)]
    password: Option<String>,

    /// The email address of the account.
    #[clap()]
    email: String,
}

#[async_trait]
impl super::Command for Login {
    async fn execute(self, app: &App) -> Result<()> {
        let password = password::obtain(self.password).await?;
        let _ = app.session().login(&self.email, &password).await?;
        Ok(())
    }
}

/// Create a new account and log in with it.
#[derive(Debug, Parser)]
pub(crate) struct Signup {
    /// The password. You will be asked for it if it is not given here.
    #[arg(long, short)]
    password: Option<String>,

    /// The email address for the new account.
    #[clap()]
    email: String,

    /// The name to greet you with.
    #[clap()]
    name: String,
}

#[async_trait]
impl super::Command for Signup {
    async fn execute(self, app: &App) -> Result<()> {
        let password = password::obtain(self.password).await?;
        let _ = app
            .session()
            .signup(&self.email, &password, &self.name)
            .await?;
        Ok(())
    }
}

/// Forget the logged-in account.
#[derive(Debug, Parser)]
pub(crate) struct Logout {}

#[async_trait]
impl super::Command for Logout {
    async fn execute(self, app: &App) -> Result<()> {
        app.session().logout().await;
        Ok(())
    }
}

/// Show who is logged in.
#[derive(Debug, Parser)]
pub(crate) struct Whoami {}

#[async_trait]
impl super::Command for Whoami {
    async fn execute(self, app: &App) -> Result<()> {
        match app.session().snapshot().user() {
            Some(user) => println!("{} <{}> (id {})", user.name, user.email, user.id),
            None => println!("Not logged in"),
        }
        Ok(())
    }
}
