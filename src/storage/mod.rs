// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

mod file;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

pub(crate) use file::File;
pub(crate) use memory::Memory;

pub(crate) trait IsPersistent {
    fn is_persistent(&self) -> bool;
}

impl<T: IsPersistent + ?Sized> IsPersistent for Box<T> {
    fn is_persistent(&self) -> bool {
        (**self).is_persistent()
    }
}

/// A single named slot holding one serialized record.
#[async_trait]
pub(crate) trait Storage<T>: Send + Sync + IsPersistent {
    fn slot(&self) -> &str;
    async fn get(&mut self) -> Result<Option<T>>;
    async fn update(&mut self, data: &T) -> Result<()>;
    /// Removing an empty slot succeeds.
    async fn clear(&mut self) -> Result<()>;
}

#[async_trait]
impl<Tn: Sync, T: Storage<Tn> + ?Sized> Storage<Tn> for Box<T> {
    fn slot(&self) -> &str {
        (**self).slot()
    }

    async fn get(&mut self) -> Result<Option<Tn>> {
        (**self).get().await
    }

    async fn update(&mut self, data: &Tn) -> Result<()> {
        (**self).update(data).await
    }

    async fn clear(&mut self) -> Result<()> {
        (**self).clear().await
    }
}

fn encode<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string(data)?)
}

// Anything that does not deserialize into the expected shape is reported as
// malformed rather than as a generic JSON error so callers can discard it.
fn decode<T: for<'de> Deserialize<'de>>(slot: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| {
        error::Storage::Malformed {
            slot: slot.to_owned(),
            reason: e.to_string(),
        }
        .into()
    })
}
