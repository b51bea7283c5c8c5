// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#[cfg(test)]
use std::sync::Mutex;

use log::{info, warn};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Severity {
    Normal,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Notification {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) severity: Severity,
}

impl Notification {
    pub(crate) fn normal<T: Into<String>, D: Into<String>>(title: T, description: D) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Normal,
        }
    }

    pub(crate) fn destructive<T: Into<String>, D: Into<String>>(title: T, description: D) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }
}

/// Fire-and-forget delivery of a user-facing message.
pub(crate) trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<T: Notifier + ?Sized> Notifier for std::sync::Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

pub(crate) struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Normal => info!("Notification: {}", notification.title),
            Severity::Destructive => warn!("Notification: {}", notification.title),
        }
        eprintln!("{}: {}", notification.title, notification.description);
    }
}

/// Keeps every notification it receives so callers can inspect them later.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct Recorder {
    received: Mutex<Vec<Notification>>,
}

#[cfg(test)]
impl Recorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn take(&self) -> Vec<Notification> {
        self.received
            .lock()
            .map(|mut received| std::mem::take(&mut *received))
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl Notifier for Recorder {
    fn notify(&self, notification: Notification) {
        if let Ok(mut received) = self.received.lock() {
            received.push(notification);
        }
    }
}
