// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Connectivity state as reported by the platform

/// Network state snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connectivity {
    /// Whether a network interface is up
    pub connected: bool,
    /// Whether the internet was actually reachable; `None` until probed
    pub reachable: Option<bool>,
}

impl Connectivity {
    pub fn online() -> Self {
        Self {
            connected: true,
            reachable: Some(true),
        }
    }

    pub fn offline() -> Self {
        Self {
            connected: false,
            reachable: Some(false),
        }
    }

    /// Online means connected and not known-unreachable.
    ///
    /// Unknown reachability counts as online: a delivery attempt is
    /// how we find out.
    pub fn is_online(&self) -> bool {
        self.connected && self.reachable != Some(false)
    }
}

impl Default for Connectivity {
    /// Offline until the platform reports otherwise
    fn default() -> Self {
        Self::offline()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
