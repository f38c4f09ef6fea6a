//! Per-thread scope state.
//!
//! # Role
//!
//! Owns the name -> [`CandidateList`] map, the nesting level and the property
//! accessor indexes for one thread. Nothing here is shared: the owning thread
//! is the only reader and writer, so no locking is involved.
//!
//! # Invariants
//!
//! - Every [`ScopeState::open_level`] is paired with exactly one
//!   [`ScopeState::close_level`]; a close at level 0 panics.
//! - After `close_level` every name is bound to the list it had before the
//!   matching `open_level`, and every usage counter is back to its prior value.
//! - Property accessor entries recorded at a level are removed when that level
//!   closes.

use std::collections::hash_map::Entry;
use std::sync::Arc;

use mixin_types::{CategoryDesc, MemberDesc};
use rustc_hash::FxHashMap;

use crate::candidate::{Candidate, CandidateList};
use crate::config::{AccessorKind, Settings};
use crate::{flags, usage};

/// Property name -> accessor member name, layered by nesting level.
#[derive(Debug, Default)]
struct AccessorIndex {
	entries: FxHashMap<Box<str>, Vec<(usize, &'static str)>>,
}

impl AccessorIndex {
	fn record(&mut self, property: String, level: usize, accessor: &'static str) {
		let layers = self.entries.entry(property.into_boxed_str()).or_default();
		match layers.last_mut() {
			Some((top, name)) if *top == level => *name = accessor,
			_ => layers.push((level, accessor)),
		}
	}

	fn get(&self, property: &str) -> Option<&'static str> {
		self.entries
			.get(property)
			.and_then(|layers| layers.last())
			.map(|&(_, accessor)| accessor)
	}

	fn pop_level(&mut self, level: usize) {
		self.entries.retain(|_, layers| {
			if layers.last().is_some_and(|&(top, _)| top == level) {
				layers.pop();
			}
			!layers.is_empty()
		});
	}
}

/// Scope stack for one thread.
#[derive(Debug, Default)]
pub struct ScopeState {
	level: usize,
	lists: FxHashMap<Box<str>, Arc<CandidateList>>,
	getters: AccessorIndex,
	setters: AccessorIndex,
	settings: Arc<Settings>,
}

impl ScopeState {
	pub fn new() -> Self {
		Self {
			settings: crate::config::current(),
			..Self::default()
		}
	}

	/// Current nesting depth; 0 when no scope is open.
	pub fn level(&self) -> usize {
		self.level
	}

	/// Opens a nesting level and raises the global activity flags.
	pub fn open_level(&mut self) -> usize {
		flags::scope_entered();
		self.level += 1;
		if self.level == 1 {
			self.settings = crate::config::current();
		}
		tracing::trace!(level = self.level, "category scope opened");
		self.level
	}

	/// Registers every eligible member of `category` and its ancestors at the
	/// current level, least-derived ancestor first. Returns the number of
	/// candidates added.
	///
	/// # Panics
	///
	/// Panics if no level is open.
	pub fn apply(&mut self, category: &'static CategoryDesc) -> usize {
		assert!(self.level > 0, "category applied outside an open scope");
		let mut added = 0;
		for declaring in category.lineage() {
			for member in declaring.eligible_members() {
				if let Some(candidate) = Candidate::new(declaring, member) {
					self.bind(candidate);
					self.index_accessor(member);
					added += 1;
				}
			}
		}
		tracing::debug!(
			category = category.name,
			level = self.level,
			added,
			"category applied"
		);
		added
	}

	fn bind(&mut self, candidate: Candidate) {
		let level = self.level;
		let list = match self.lists.entry(Box::from(candidate.name())) {
			Entry::Occupied(mut occupied) => {
				if occupied.get().level() != level {
					let previous = Arc::clone(occupied.get());
					occupied.insert(Arc::new(CandidateList::extend(previous, level)));
				}
				occupied.into_mut()
			}
			Entry::Vacant(vacant) => {
				let counter = usage::counters().counter(candidate.name());
				vacant.insert(Arc::new(CandidateList::fresh(candidate.name(), level, counter)))
			}
		};
		Arc::make_mut(list).push(candidate);
		tracing::trace!(?candidate, level, "candidate bound");
	}

	fn index_accessor(&mut self, member: &'static MemberDesc) {
		let Some((kind, property)) = self.settings.accessor(member.name, member.arity) else {
			return;
		};
		match kind {
			AccessorKind::Getter => self.getters.record(property, self.level, member.name),
			AccessorKind::Setter => self.setters.record(property, self.level, member.name),
		}
	}

	/// Pops every binding introduced at the current level and lowers the
	/// global activity flags. Returns the new level.
	///
	/// # Panics
	///
	/// Panics if no level is open.
	pub fn close_level(&mut self) -> usize {
		assert!(self.level > 0, "scope exit without a matching enter");
		let level = self.level;

		self.lists.retain(|_, list| {
			if list.level() != level {
				return true;
			}
			match list.unwind() {
				Some(previous) => {
					*list = previous;
					true
				}
				None => false,
			}
		});
		self.getters.pop_level(level);
		self.setters.pop_level(level);

		self.level -= 1;
		flags::scope_exited();
		tracing::trace!(level = self.level, "category scope closed");
		self.level
	}

	/// Candidates for `name`, most specific first; `None` outside any scope.
	pub fn candidates(&self, name: &str) -> Option<Arc<CandidateList>> {
		if self.level == 0 {
			return None;
		}
		self.lists.get(name).cloned()
	}

	/// Getter member name for `property`; `None` outside any scope.
	pub fn property_getter(&self, property: &str) -> Option<&'static str> {
		if self.level == 0 {
			return None;
		}
		self.getters.get(property)
	}

	/// Setter member name for `property`; `None` outside any scope.
	pub fn property_setter(&self, property: &str) -> Option<&'static str> {
		if self.level == 0 {
			return None;
		}
		self.setters.get(property)
	}

	/// Number of names with at least one visible candidate.
	pub fn bound_names(&self) -> usize {
		self.lists.len()
	}
}
