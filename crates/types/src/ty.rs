use std::hash::{Hash, Hasher};

/// A statically declared host type.
///
/// Types form a single-parent hierarchy. There is no universal root
/// descriptor; a type without a parent is the top of its chain.
pub struct TypeDesc {
	pub name: &'static str,
	pub parent: Option<&'static TypeDesc>,
}

impl TypeDesc {
	/// Declares a type with no parent.
	pub const fn root(name: &'static str) -> Self {
		Self { name, parent: None }
	}

	/// Declares a type deriving from `parent`.
	pub const fn extends(name: &'static str, parent: &'static TypeDesc) -> Self {
		Self {
			name,
			parent: Some(parent),
		}
	}

	/// Walks the ancestor chain from this type (inclusive) to the top.
	pub fn ancestors(&'static self) -> Ancestors {
		Ancestors { next: Some(self) }
	}

	/// Returns true if `self` appears in `other`'s parent chain.
	pub fn is_strict_ancestor_of(&self, other: &TypeDesc) -> bool {
		let mut cursor = other.parent;
		while let Some(ty) = cursor {
			if std::ptr::eq(ty, self) {
				return true;
			}
			cursor = ty.parent;
		}
		false
	}

	/// Returns true if a value of type `other` can stand where `self` is declared.
	pub fn is_assignable_from(&self, other: &TypeDesc) -> bool {
		std::ptr::eq(self, other) || self.is_strict_ancestor_of(other)
	}

	/// Number of ancestors above this type.
	pub fn depth(&self) -> usize {
		let mut depth = 0;
		let mut cursor = self.parent;
		while let Some(ty) = cursor {
			depth += 1;
			cursor = ty.parent;
		}
		depth
	}
}

impl PartialEq for TypeDesc {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self, other)
	}
}

impl Eq for TypeDesc {}

impl Hash for TypeDesc {
	fn hash<H: Hasher>(&self, state: &mut H) {
		std::ptr::hash(self, state);
	}
}

impl std::fmt::Debug for TypeDesc {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name)
	}
}

impl std::fmt::Display for TypeDesc {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name)
	}
}

/// Iterator returned by [`TypeDesc::ancestors`], most specific first.
#[derive(Clone)]
pub struct Ancestors {
	next: Option<&'static TypeDesc>,
}

impl Iterator for Ancestors {
	type Item = &'static TypeDesc;

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.next?;
		self.next = current.parent;
		Some(current)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	static NUMBER: TypeDesc = TypeDesc::root("Number");
	static INTEGER: TypeDesc = TypeDesc::extends("Integer", &NUMBER);
	static SMALL: TypeDesc = TypeDesc::extends("Small", &INTEGER);
	static TEXT: TypeDesc = TypeDesc::root("Text");

	#[test]
	fn ancestors_walk_most_specific_first() {
		let names: Vec<_> = SMALL.ancestors().map(|t| t.name).collect();
		assert_eq!(names, ["Small", "Integer", "Number"]);
		assert_eq!(SMALL.depth(), 2);
		assert_eq!(NUMBER.depth(), 0);
	}

	#[test]
	fn strict_ancestor_excludes_self_and_unrelated() {
		assert!(NUMBER.is_strict_ancestor_of(&SMALL));
		assert!(INTEGER.is_strict_ancestor_of(&SMALL));
		assert!(!SMALL.is_strict_ancestor_of(&NUMBER));
		assert!(!NUMBER.is_strict_ancestor_of(&NUMBER));
		assert!(!TEXT.is_strict_ancestor_of(&INTEGER));
	}

	#[test]
	fn assignability_includes_self() {
		assert!(INTEGER.is_assignable_from(&INTEGER));
		assert!(NUMBER.is_assignable_from(&INTEGER));
		assert!(!INTEGER.is_assignable_from(&NUMBER));
		assert!(!TEXT.is_assignable_from(&NUMBER));
	}

	#[test]
	fn identity_is_by_address() {
		static OTHER_NUMBER: TypeDesc = TypeDesc::root("Number");
		assert_eq!(&NUMBER, &NUMBER);
		assert_ne!(&NUMBER, &OTHER_NUMBER);
	}
}
