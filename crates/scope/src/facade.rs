//! Thread-local lifecycle and public entry points.
//!
//! Each thread owns at most one [`ScopeState`], created on its first
//! activation and dropped as soon as its nesting level returns to zero. The
//! level is mirrored in a const-initialized `Cell` so the current-thread
//! predicate never touches the state slot.

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::sync::Arc;

use mixin_types::{CategoryDesc, TypeDesc};

use crate::candidate::{Candidate, CandidateList};
use crate::flags;
use crate::state::ScopeState;

thread_local! {
	static LEVEL: Cell<usize> = const { Cell::new(0) };
	static STATE: RefCell<Option<ScopeState>> = const { RefCell::new(None) };
}

/// Closes the level it opened when dropped, including during unwinding.
struct ScopeGuard {
	_not_send: PhantomData<*const ()>,
}

impl ScopeGuard {
	fn open() -> Self {
		let level = with_state(ScopeState::open_level);
		LEVEL.with(|cell| cell.set(level));
		Self {
			_not_send: PhantomData,
		}
	}

	fn apply(&self, category: &'static CategoryDesc) {
		with_state(|state| state.apply(category));
	}
}

impl Drop for ScopeGuard {
	fn drop(&mut self) {
		let level = STATE.with(|slot| {
			let mut slot = slot.borrow_mut();
			let Some(state) = slot.as_mut() else {
				unreachable!("scope guard outlived its thread state");
			};
			let level = state.close_level();
			if level == 0 {
				*slot = None;
			}
			level
		});
		LEVEL.with(|cell| cell.set(level));
	}
}

fn with_state<R>(f: impl FnOnce(&mut ScopeState) -> R) -> R {
	STATE.with(|slot| f(slot.borrow_mut().get_or_insert_with(ScopeState::new)))
}

fn read_state<R>(f: impl FnOnce(&ScopeState) -> Option<R>) -> Option<R> {
	if LEVEL.with(Cell::get) == 0 {
		return None;
	}
	STATE.with(|slot| slot.borrow().as_ref().and_then(f))
}

/// Runs `body` with `category` active on this thread and returns its result.
///
/// Candidates contributed by the category are visible to lookups made on
/// this thread until `body` returns or unwinds.
pub fn activate<R>(category: &'static CategoryDesc, body: impl FnOnce() -> R) -> R {
	activate_all(&[category], body)
}

/// Runs `body` with every category in `categories` active, applied in order.
///
/// An empty slice opens and closes a scope with nothing registered.
pub fn activate_all<R>(categories: &[&'static CategoryDesc], body: impl FnOnce() -> R) -> R {
	let guard = ScopeGuard::open();
	for &category in categories {
		guard.apply(category);
	}
	let result = body();
	drop(guard);
	result
}

/// True if this thread is inside at least one activation scope.
///
/// Performs no allocation and never creates thread state.
#[inline]
pub fn has_category_in_current_thread() -> bool {
	flags::has_category_in_any_thread() && LEVEL.with(Cell::get) != 0
}

/// Nesting depth of activation scopes on this thread.
#[inline]
pub fn current_level() -> usize {
	LEVEL.with(Cell::get)
}

/// Candidates visible on this thread for `name`, most specific first.
pub fn candidates(name: &str) -> Option<Arc<CandidateList>> {
	read_state(|state| state.candidates(name))
}

/// Most specific visible candidate for `name` whose host type accepts
/// `receiver`.
pub fn resolve(name: &str, receiver: &TypeDesc) -> Option<Candidate> {
	candidates(name)?.resolve(receiver)
}

/// Getter member name registered for `property` on this thread.
pub fn property_getter(property: &str) -> Option<&'static str> {
	read_state(|state| state.property_getter(property))
}

/// Setter member name registered for `property` on this thread.
pub fn property_setter(property: &str) -> Option<&'static str> {
	read_state(|state| state.property_setter(property))
}

/// True if this thread currently holds scope state.
pub fn has_thread_state() -> bool {
	STATE.with(|slot| slot.borrow().is_some())
}

#[cfg(test)]
mod tests;
