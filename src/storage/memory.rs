// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{marker::PhantomData, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::Result;

use super::{decode, encode, IsPersistent, Storage};

/// Keeps the serialized record in process memory. Clones share the same slot.
pub(crate) struct Memory<T> {
    slot: String,
    raw: Arc<RwLock<Option<String>>>,
    _data: PhantomData<fn() -> T>,
}

impl<T> Memory<T> {
    pub(crate) fn new<S: Into<String>>(slot: S) -> Self {
        Self {
            slot: slot.into(),
            raw: Arc::new(RwLock::new(None)),
            _data: PhantomData,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_raw<S: Into<String>>(slot: S, raw: &str) -> Self {
        let memory = Self::new(slot);
        *memory.raw.try_write().unwrap() = Some(raw.to_owned());
        memory
    }

    #[cfg(test)]
    pub(crate) async fn raw(&self) -> Option<String> {
        self.raw.read().await.clone()
    }
}

impl<T> Clone for Memory<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
            raw: Arc::clone(&self.raw),
            _data: PhantomData,
        }
    }
}

impl<T> IsPersistent for Memory<T> {
    fn is_persistent(&self) -> bool {
        false
    }
}

#[async_trait]
impl<T: Send + Serialize + Sync + for<'de> Deserialize<'de>> Storage<T> for Memory<T> {
    fn slot(&self) -> &str {
        &self.slot
    }

    async fn get(&mut self) -> Result<Option<T>> {
        let guard = self.raw.read().await;
        guard.as_deref().map(|raw| decode(&self.slot, raw)).transpose()
    }

    async fn update(&mut self, data: &T) -> Result<()> {
        let encoded = encode(data)?;
        *self.raw.write().await = Some(encoded);
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        *self.raw.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use crate::error::{self, Error};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        value: u32,
    }

    #[tokio::test]
    async fn clones_share_the_slot() -> Result<()> {
        let mut writer = Memory::<Record>::new("record");
        let mut reader = writer.clone();

        writer.update(&Record { value: 7 }).await?;
        assert_eq!(reader.get().await?, Some(Record { value: 7 }));

        reader.clear().await?;
        assert_eq!(writer.get().await?, None);
        assert_eq!(writer.raw().await, None);
        Ok(())
    }

    #[tokio::test]
    async fn garbage_is_malformed() {
        let mut memory = Memory::<Record>::with_raw("record", "{not json");

        assert!(matches!(
            memory.get().await,
            Err(Error::Storage(error::Storage::Malformed { ref slot, .. })) if slot == "record"
        ));
    }
}
