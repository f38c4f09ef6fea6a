//! Candidates and the level-tagged lists that hold them.
//!
//! # Invariants
//!
//! - A list created at level `n` starts as a copy of the list visible at the
//!   enclosing level (its `previous`), so lookups never walk the chain.
//! - Copying `previous` does not touch the usage counter; only [`CandidateList::push`]
//!   increments it. The counter therefore tracks the length of the deepest
//!   list on the chain.
//! - Entries stay ordered by [`crate::specificity::compare`] after every push.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mixin_types::{CategoryDesc, InvokeError, MemberDesc, TypeDesc, Value};

use crate::specificity;

/// One overridable behavior contributed by an active category.
#[derive(Clone, Copy)]
pub struct Candidate {
	category: &'static CategoryDesc,
	member: &'static MemberDesc,
	host: &'static TypeDesc,
}

impl Candidate {
	/// Wraps `member`; `None` if it declares no host type.
	pub fn new(category: &'static CategoryDesc, member: &'static MemberDesc) -> Option<Self> {
		Some(Self {
			category,
			member,
			host: member.host?,
		})
	}

	pub fn name(&self) -> &'static str {
		self.member.name
	}

	/// The type this candidate extends.
	pub fn host(&self) -> &'static TypeDesc {
		self.host
	}

	/// The category that declared the member.
	pub fn category(&self) -> &'static CategoryDesc {
		self.category
	}

	pub fn member(&self) -> &'static MemberDesc {
		self.member
	}

	/// Scope-dependent visibility rules out caching resolved candidates.
	pub fn is_cacheable(&self) -> bool {
		false
	}

	/// Calls the member with `args[0]` as the receiver.
	pub fn invoke(&self, args: &[Value]) -> Result<Value, InvokeError> {
		(self.member.invoke)(args)
	}
}

impl PartialEq for Candidate {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.member, other.member)
			&& self.category == other.category
			&& self.host == other.host
	}
}

impl Eq for Candidate {}

impl std::fmt::Debug for Candidate {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}({})", self.category.name, self.member.name, self.host.name)
	}
}

/// Ordered candidates for one name, as visible at one nesting level.
#[derive(Clone)]
pub struct CandidateList {
	name: Box<str>,
	level: usize,
	previous: Option<Arc<CandidateList>>,
	entries: Vec<Candidate>,
	usage: Arc<AtomicUsize>,
}

impl CandidateList {
	/// Starts an empty list for a name not visible at any enclosing level.
	pub fn fresh(name: &str, level: usize, usage: Arc<AtomicUsize>) -> Self {
		Self {
			name: Box::from(name),
			level,
			previous: None,
			entries: Vec::new(),
			usage,
		}
	}

	/// Starts a list at `level` seeded with `previous`'s entries.
	pub fn extend(previous: Arc<CandidateList>, level: usize) -> Self {
		debug_assert!(level > previous.level);
		Self {
			name: previous.name.clone(),
			level,
			entries: previous.entries.clone(),
			usage: Arc::clone(&previous.usage),
			previous: Some(previous),
		}
	}

	/// Inserts `candidate` at its specificity position and counts the binding.
	pub fn push(&mut self, candidate: Candidate) {
		self.usage.fetch_add(1, Ordering::AcqRel);
		let at = specificity::insertion_index(&self.entries, &candidate);
		self.entries.insert(at, candidate);
		debug_assert!(specificity::is_ordered(&self.entries));
	}

	/// Releases this level's bindings and returns the list to restore, if any.
	pub(crate) fn unwind(&self) -> Option<Arc<CandidateList>> {
		let restored = self.previous.as_ref().map_or(0, |p| p.len());
		self.usage.fetch_sub(self.len() - restored, Ordering::AcqRel);
		self.previous.clone()
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Nesting level that created this list.
	pub fn level(&self) -> usize {
		self.level
	}

	/// The list visible before this level pushed.
	pub fn previous(&self) -> Option<&Arc<CandidateList>> {
		self.previous.as_ref()
	}

	pub fn candidates(&self) -> &[Candidate] {
		&self.entries
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
		self.entries.iter()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// First candidate whose host type accepts `receiver`.
	pub fn resolve(&self, receiver: &TypeDesc) -> Option<Candidate> {
		self.entries
			.iter()
			.find(|c| c.host().is_assignable_from(receiver))
			.copied()
	}
}

impl std::fmt::Debug for CandidateList {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CandidateList")
			.field("name", &self.name)
			.field("level", &self.level)
			.field("entries", &self.entries)
			.finish_non_exhaustive()
	}
}

impl<'a> IntoIterator for &'a CandidateList {
	type Item = &'a Candidate;
	type IntoIter = std::slice::Iter<'a, Candidate>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}
