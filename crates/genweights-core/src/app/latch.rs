//! OneShot - 「最初の 1 回だけ」を保証するラッチ
//!
//! 複数のワーカーが同時に `claim()` しても、成功するのはちょうど 1 つだけです。

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug)]
pub struct OneShot {
    armed: AtomicBool,
}

impl OneShot {
    /// A latch whose first `claim()` succeeds.
    pub fn new() -> Self {
        Self::armed(true)
    }

    /// `armed(false)` never fires.
    pub fn armed(armed: bool) -> Self {
        Self {
            armed: AtomicBool::new(armed),
        }
    }

    /// Returns true for exactly one caller, and only if the latch was armed.
    pub fn claim(&self) -> bool {
        self.armed.swap(false, Ordering::AcqRel)
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }
}

impl Default for OneShot {
    fn default() -> Self {
        Self::new()
    }
}
