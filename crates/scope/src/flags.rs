//! Process-wide activity flags consulted by dispatch fast paths.
//!
//! `ACTIVE_SCOPES` counts activation scopes open on any thread. The
//! `CATEGORIES_EXIST` flag mirrors "counter is nonzero" as a single boolean
//! load; it is a hint and may lag the counter briefly under contention.
//! `DISPATCH_EPOCH` advances on every scope enter and exit so call-site caches
//! can detect that a decision made under other scopes is stale.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

static ACTIVE_SCOPES: AtomicUsize = AtomicUsize::new(0);
static CATEGORIES_EXIST: AtomicBool = AtomicBool::new(false);
static DISPATCH_EPOCH: AtomicU64 = AtomicU64::new(0);

/// Records a scope opening on some thread.
pub(crate) fn scope_entered() {
	ACTIVE_SCOPES.fetch_add(1, Ordering::AcqRel);
	CATEGORIES_EXIST.store(true, Ordering::Release);
	invalidate_call_sites();
}

/// Records a scope closing on some thread.
///
/// # Panics
///
/// Panics if no scope is open anywhere.
pub(crate) fn scope_exited() {
	let prev = ACTIVE_SCOPES.fetch_sub(1, Ordering::AcqRel);
	assert!(prev > 0, "scope exit without a matching enter");
	invalidate_call_sites();
	if prev == 1 {
		// Re-read so an enter racing with this exit keeps the flag raised.
		CATEGORIES_EXIST.store(ACTIVE_SCOPES.load(Ordering::Acquire) > 0, Ordering::Release);
	}
}

/// Number of activation scopes currently open across all threads.
#[inline]
pub fn active_scopes() -> usize {
	ACTIVE_SCOPES.load(Ordering::Acquire)
}

/// Exact "any scope open anywhere" check.
#[inline]
pub fn has_category_in_any_thread() -> bool {
	active_scopes() > 0
}

/// Single-load hint that categories may be in use somewhere.
#[inline]
pub fn categories_exist() -> bool {
	CATEGORIES_EXIST.load(Ordering::Acquire)
}

/// Current dispatch epoch. Cached dispatch decisions tagged with an older
/// epoch must be recomputed.
#[inline]
pub fn dispatch_epoch() -> u64 {
	DISPATCH_EPOCH.load(Ordering::Acquire)
}

/// Advances the dispatch epoch.
pub fn invalidate_call_sites() {
	DISPATCH_EPOCH.fetch_add(1, Ordering::AcqRel);
}
