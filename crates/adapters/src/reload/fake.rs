// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake reloader for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::Reloader;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts reload requests instead of restarting.
#[derive(Clone, Default)]
pub struct FakeReloader {
    reloads: Arc<AtomicUsize>,
}

impl FakeReloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }
}

impl Reloader for FakeReloader {
    fn reload(&self) {
        self.reloads.fetch_add(1, Ordering::SeqCst);
    }
}
