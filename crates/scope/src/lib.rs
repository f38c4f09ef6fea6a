#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Thread-scoped category override registry.
//!
//! # Purpose
//!
//! Lets a program attach members of a category type to existing host types for
//! the dynamic extent of a closure on the calling thread. Overrides are
//! invisible before entry, after exit and on every other thread.
//!
//! # Mental Model
//!
//! 1. **Activation:** [`activate`] / [`activate_all`] open a nesting level on
//!    this thread's [`state::ScopeState`] and bind every eligible member of the
//!    given categories, ancestor categories first.
//! 2. **Lookup:** [`candidates`] returns the [`CandidateList`] for a name,
//!    most specific host type first; [`resolve`] picks the first candidate
//!    applicable to a receiver type.
//! 3. **Exit:** when the closure returns or unwinds, the level is popped. Each
//!    name falls back to the list it had before, in O(1).
//! 4. **Fast path:** [`has_category_in_any_thread`] and
//!    [`has_category_in_current_thread`] let dispatch code skip the registry
//!    with a single atomic load or thread-local read.
//!
//! # Invariants
//!
//! - Must restore every name's visibility and usage count on scope exit.
//!   - Enforced in: [`state::ScopeState::close_level`], [`CandidateList::unwind`].
//!   - Tested by: `state::tests::nested_levels_shadow_and_restore`, `tests/nesting.rs`.
//!   - Failure symptom: overrides leak out of their scope.
//!
//! - Must run exit on every path out of the body, panics included.
//!   - Enforced in: `facade::ScopeGuard::drop`.
//!   - Tested by: `facade::tests::panic_in_body_still_unwinds`.
//!   - Failure symptom: a failed body leaves its overrides active.
//!
//! - Must order candidates most specific host type first, independent of
//!   registration order.
//!   - Enforced in: [`specificity::insertion_index`].
//!   - Tested by: `specificity::tests::descendant_wins_regardless_of_registration_order`.
//!   - Failure symptom: a general override shadows a specific one.
//!
//! - Must keep scope state private to its thread.
//!   - Enforced in: the `STATE` thread-local in `facade`.
//!   - Tested by: `facade::tests::scopes_do_not_cross_threads`, `tests/threads.rs`.
//!   - Failure symptom: one thread's overrides change dispatch on another.
//!
//! # Concurrency
//!
//! Scope state is thread-local and unlocked. Shared state is limited to the
//! atomics in [`flags`] and the counters in [`usage`], published lock-free.

mod candidate;
pub mod config;
mod error;
mod facade;
pub mod flags;
pub mod specificity;
pub mod state;
pub mod usage;

pub use candidate::{Candidate, CandidateList};
pub use config::{AccessorKind, Settings};
pub use error::{ConfigError, InvokeError};
pub use facade::{
	activate, activate_all, candidates, current_level, has_category_in_current_thread,
	has_thread_state, property_getter, property_setter, resolve,
};
pub use flags::{active_scopes, dispatch_epoch, has_category_in_any_thread};
pub use usage::usage_count;
