// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use directories::ProjectDirs;
use inflector::Inflector;
use once_cell::sync::Lazy;

pub(crate) static APP_ID: Lazy<String> =
    Lazy::new(|| option_env!("CARGO_PKG_NAME").unwrap_or("ideaboard").to_owned());
pub(crate) static APP_DISPLAY_NAME: Lazy<String> = Lazy::new(|| APP_ID.to_title_case());

pub(crate) static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("com", "NoahFontes", &APP_DISPLAY_NAME));

/// Name of the durable slot that remembers who is logged in.
pub(crate) const SESSION_SLOT: &str = "user";
