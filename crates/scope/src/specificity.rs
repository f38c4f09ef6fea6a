//! Host-type specificity ordering.
//!
//! The ordering is partial: candidates whose host types are equal or
//! unrelated compare `Equal`. Since that relation is not transitive, lists are
//! never handed to a general-purpose sort. [`insertion_index`] places each new
//! candidate directly, which keeps lists ordered and stable.

use std::cmp::Ordering;

use mixin_types::TypeDesc;

use crate::candidate::Candidate;

/// Orders host types most specific first.
///
/// `Less` when `a` is a strict descendant of `b`, `Greater` when it is a strict
/// ancestor, `Equal` otherwise.
pub fn compare_hosts(a: &TypeDesc, b: &TypeDesc) -> Ordering {
	if b.is_strict_ancestor_of(a) {
		Ordering::Less
	} else if a.is_strict_ancestor_of(b) {
		Ordering::Greater
	} else {
		Ordering::Equal
	}
}

/// Orders candidates for the same name by their host types.
pub fn compare(a: &Candidate, b: &Candidate) -> Ordering {
	compare_hosts(a.host(), b.host())
}

/// Position at which `incoming` is inserted into an ordered list.
///
/// That is the first entry `incoming` is strictly more specific than, or the
/// end of the list. Entries comparing `Equal` keep registration order.
pub fn insertion_index(list: &[Candidate], incoming: &Candidate) -> usize {
	list.iter()
		.position(|existing| compare(incoming, existing) == Ordering::Less)
		.unwrap_or(list.len())
}

/// Returns true if no entry is preceded by one of its host type's ancestors.
pub fn is_ordered(list: &[Candidate]) -> bool {
	list.iter().enumerate().all(|(i, earlier)| {
		list[i + 1..]
			.iter()
			.all(|later| compare(later, earlier) != Ordering::Less)
	})
}
