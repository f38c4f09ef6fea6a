use crate::{InvokeError, TypeDesc, Value};

/// Invocation handle of a member. `args[0]` is the receiver.
pub type Invoker = fn(&[Value]) -> Result<Value, InvokeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
	Public,
	Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
	/// Callable without an instance of the category.
	Static,
	Instance,
}

/// One member declared on a category type.
#[derive(Clone, Copy)]
pub struct MemberDesc {
	pub name: &'static str,
	pub visibility: Visibility,
	pub kind: MemberKind,
	/// Declared type of the first parameter. `None` for parameterless members.
	pub host: Option<&'static TypeDesc>,
	/// Parameters after the host parameter.
	pub arity: usize,
	pub deprecated: bool,
	pub invoke: Invoker,
}

impl MemberDesc {
	/// A public static member extending `host` with no further parameters.
	pub const fn extension(name: &'static str, host: &'static TypeDesc, invoke: Invoker) -> Self {
		Self {
			name,
			visibility: Visibility::Public,
			kind: MemberKind::Static,
			host: Some(host),
			arity: 0,
			deprecated: false,
			invoke,
		}
	}

	/// A public static member taking no parameters at all.
	pub const fn parameterless(name: &'static str, invoke: Invoker) -> Self {
		Self {
			name,
			visibility: Visibility::Public,
			kind: MemberKind::Static,
			host: None,
			arity: 0,
			deprecated: false,
			invoke,
		}
	}

	pub const fn with_arity(self, arity: usize) -> Self {
		Self { arity, ..self }
	}

	pub const fn private(self) -> Self {
		Self {
			visibility: Visibility::Private,
			..self
		}
	}

	pub const fn instance(self) -> Self {
		Self {
			kind: MemberKind::Instance,
			..self
		}
	}

	pub const fn deprecated(self) -> Self {
		Self {
			deprecated: true,
			..self
		}
	}

	/// Public, static, takes a host parameter and is not deprecated.
	pub fn is_eligible(&self) -> bool {
		self.visibility == Visibility::Public
			&& self.kind == MemberKind::Static
			&& self.host.is_some()
			&& !self.deprecated
	}
}

impl std::fmt::Debug for MemberDesc {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MemberDesc")
			.field("name", &self.name)
			.field("host", &self.host)
			.field("arity", &self.arity)
			.finish_non_exhaustive()
	}
}

/// A category type: a named bundle of members, optionally deriving from
/// another category whose members it inherits.
pub struct CategoryDesc {
	pub name: &'static str,
	pub parent: Option<&'static CategoryDesc>,
	pub members: &'static [MemberDesc],
}

impl CategoryDesc {
	pub const fn new(name: &'static str, members: &'static [MemberDesc]) -> Self {
		Self {
			name,
			parent: None,
			members,
		}
	}

	pub const fn extends(
		name: &'static str,
		parent: &'static CategoryDesc,
		members: &'static [MemberDesc],
	) -> Self {
		Self {
			name,
			parent: Some(parent),
			members,
		}
	}

	/// The category chain from the least-derived ancestor down to `self`.
	pub fn lineage(&'static self) -> Vec<&'static CategoryDesc> {
		let mut chain = Vec::new();
		let mut cursor = Some(self);
		while let Some(category) = cursor {
			chain.push(category);
			cursor = category.parent;
		}
		chain.reverse();
		chain
	}

	/// Members declared directly on this category that may become candidates.
	pub fn eligible_members(&self) -> impl Iterator<Item = &'static MemberDesc> + use<> {
		let members: &'static [MemberDesc] = self.members;
		members.iter().filter(|m| m.is_eligible())
	}
}

impl PartialEq for CategoryDesc {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self, other)
	}
}

impl Eq for CategoryDesc {}

impl std::fmt::Debug for CategoryDesc {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	static NUMBER: TypeDesc = TypeDesc::root("Number");

	fn noop(_: &[Value]) -> Result<Value, InvokeError> {
		Ok(Value::unit())
	}

	static BASE: CategoryDesc =
		CategoryDesc::new("Base", &[MemberDesc::extension("base", &NUMBER, noop)]);
	static MIDDLE: CategoryDesc = CategoryDesc::extends(
		"Middle",
		&BASE,
		&[
			MemberDesc::extension("middle", &NUMBER, noop),
			MemberDesc::extension("hidden", &NUMBER, noop).private(),
		],
	);
	static LEAF: CategoryDesc = CategoryDesc::extends("Leaf", &MIDDLE, &[]);

	#[test]
	fn lineage_starts_at_least_derived() {
		let names: Vec<_> = LEAF.lineage().iter().map(|c| c.name).collect();
		assert_eq!(names, ["Base", "Middle", "Leaf"]);
		assert_eq!(BASE.lineage().len(), 1);
	}

	#[test]
	fn eligible_members_skip_private() {
		let names: Vec<_> = MIDDLE.eligible_members().map(|m| m.name).collect();
		assert_eq!(names, ["middle"]);
	}

	#[rstest]
	#[case::public_static(MemberDesc::extension("m", &NUMBER, noop), true)]
	#[case::private(MemberDesc::extension("m", &NUMBER, noop).private(), false)]
	#[case::instance(MemberDesc::extension("m", &NUMBER, noop).instance(), false)]
	#[case::deprecated(MemberDesc::extension("m", &NUMBER, noop).deprecated(), false)]
	#[case::no_host(MemberDesc::parameterless("m", noop), false)]
	#[case::with_params(MemberDesc::extension("m", &NUMBER, noop).with_arity(2), true)]
	fn eligibility(#[case] member: MemberDesc, #[case] eligible: bool) {
		assert_eq!(member.is_eligible(), eligible);
	}
}
