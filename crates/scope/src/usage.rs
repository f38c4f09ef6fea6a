//! Process-wide usage counters, one per override name.
//!
//! # Role
//!
//! Each counter holds the number of live bindings for its name. Counters are
//! created lazily on first use and never removed, so a name maps to the same
//! `Arc<AtomicUsize>` for the life of the process.
//!
//! # Concurrency
//!
//! - **Reads:** wait-free load of the current map snapshot.
//! - **Inserts:** compare-and-swap retry loop. A losing writer re-reads the
//!   published map and adopts the winner's counter, so concurrent first use of
//!   a name never yields two counters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap;

type CounterMap = FxHashMap<Box<str>, Arc<AtomicUsize>>;

/// Name-keyed map of shared usage counters.
pub struct UsageCounters {
	map: ArcSwap<CounterMap>,
}

impl UsageCounters {
	pub fn new() -> Self {
		Self {
			map: ArcSwap::from_pointee(CounterMap::default()),
		}
	}

	/// Returns the counter for `name`, creating it if absent.
	pub fn counter(&self, name: &str) -> Arc<AtomicUsize> {
		loop {
			let current = self.map.load_full();
			if let Some(counter) = current.get(name) {
				return Arc::clone(counter);
			}

			let counter = Arc::new(AtomicUsize::new(0));
			let mut next = CounterMap::clone(&current);
			next.insert(Box::from(name), Arc::clone(&counter));

			let prev = self.map.compare_and_swap(&current, Arc::new(next));
			if Arc::ptr_eq(&prev, &current) {
				return counter;
			}
		}
	}

	/// Current binding count for `name`; zero for names never used.
	pub fn count(&self, name: &str) -> usize {
		self.map
			.load()
			.get(name)
			.map_or(0, |counter| counter.load(Ordering::Acquire))
	}

	/// Number of distinct names that have a counter.
	pub fn len(&self) -> usize {
		self.map.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl Default for UsageCounters {
	fn default() -> Self {
		Self::new()
	}
}

static USAGE: LazyLock<UsageCounters> = LazyLock::new(UsageCounters::new);

/// The process-wide counter table.
pub fn counters() -> &'static UsageCounters {
	&USAGE
}

/// Current binding count for `name` across all threads.
pub fn usage_count(name: &str) -> usize {
	USAGE.count(name)
}
