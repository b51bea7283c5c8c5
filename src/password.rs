// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use secrecy::SecretString;
use tokio::task;

use crate::error::Result;

/// Uses the password given on the command line, or asks for one on the
/// terminal without echoing it.
pub(crate) async fn obtain(given: Option<String>) -> Result<SecretString> {
    if let Some(password) = given {
        return Ok(SecretString::new(password));
    }

    Ok(task::spawn_blocking(|| rpassword::prompt_password("Password: ").map(SecretString::new))
        .await??)
}
