// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;

use crate::{app::App, error::Result};

pub(crate) mod auth;
pub(crate) mod browse;

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, app: &App) -> Result<()>;
}
