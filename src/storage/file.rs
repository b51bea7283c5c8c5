// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{error::Result, metadata};

use super::{decode, encode, IsPersistent, Storage};

/// Keeps the serialized record in a JSON file.
pub(crate) struct File {
    slot: String,
    path: PathBuf,
}

impl File {
    /// Places the slot in the per-user data directory, if there is one.
    pub(crate) fn new(slot: &str) -> Option<Self> {
        metadata::PROJECT_DIRS
            .as_ref()
            .map(|dirs| Self::at(slot, dirs.data_dir().join(format!("{slot}.json"))))
    }

    pub(crate) fn at<P: AsRef<Path>>(slot: &str, path: P) -> Self {
        Self {
            slot: slot.to_owned(),
            path: path.as_ref().to_owned(),
        }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl IsPersistent for File {
    fn is_persistent(&self) -> bool {
        true
    }
}

#[async_trait]
impl<T: Send + Serialize + Sync + for<'de> Deserialize<'de>> Storage<T> for File {
    fn slot(&self) -> &str {
        &self.slot
    }

    async fn get(&mut self) -> Result<Option<T>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(decode(&self.slot, &raw)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&mut self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, encode(data)?)?;
        debug!("Wrote slot {} to {}", self.slot, self.path.display());
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
