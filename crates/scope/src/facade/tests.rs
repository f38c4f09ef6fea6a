use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread;

use mixin_types::{CategoryDesc, InvokeError, MemberDesc, TypeDesc, Value, arg};
use pretty_assertions::assert_eq;

use super::*;

static NUMBER: TypeDesc = TypeDesc::root("Number");
static INTEGER: TypeDesc = TypeDesc::extends("Integer", &NUMBER);
static TEXT: TypeDesc = TypeDesc::root("Text");

fn number_foo(args: &[Value]) -> Result<Value, InvokeError> {
	let n = arg::<i64>(args, 0)?;
	Ok(Value::new(format!("number:{n}")))
}

fn integer_foo(args: &[Value]) -> Result<Value, InvokeError> {
	let n = arg::<i64>(args, 0)?;
	Ok(Value::new(format!("integer:{n}")))
}

fn get_label(_: &[Value]) -> Result<Value, InvokeError> {
	Ok(Value::new("label"))
}

static A: CategoryDesc = CategoryDesc::new(
	"A",
	&[
		MemberDesc::extension("fc_foo", &NUMBER, number_foo),
		MemberDesc::extension("getFc_label", &NUMBER, get_label),
	],
);
static B: CategoryDesc =
	CategoryDesc::new("B", &[MemberDesc::extension("fc_foo", &INTEGER, integer_foo)]);

fn listing(name: &str) -> Vec<String> {
	candidates(name)
		.map(|list| list.iter().map(|c| format!("{c:?}")).collect())
		.unwrap_or_default()
}

#[test]
fn nested_activation_scenario() {
	assert!(listing("fc_foo").is_empty());

	activate(&A, || {
		assert_eq!(listing("fc_foo"), ["A.fc_foo(Number)"]);
		activate(&B, || {
			assert_eq!(listing("fc_foo"), ["B.fc_foo(Integer)", "A.fc_foo(Number)"]);
			assert_eq!(current_level(), 2);
		});
		assert_eq!(listing("fc_foo"), ["A.fc_foo(Number)"]);
		assert_eq!(current_level(), 1);
	});

	assert!(listing("fc_foo").is_empty());
	assert_eq!(current_level(), 0);
}

#[test]
fn activate_all_registers_in_order() {
	activate_all(&[&B, &A], || {
		assert_eq!(listing("fc_foo"), ["B.fc_foo(Integer)", "A.fc_foo(Number)"]);
		assert_eq!(current_level(), 1);
	});
}

#[test]
fn empty_activation_is_a_noop_scope() {
	let value = activate_all(&[], || {
		assert!(has_category_in_current_thread());
		assert!(candidates("fc_foo").is_none());
		7
	});
	assert_eq!(value, 7);
	assert!(!has_category_in_current_thread());
	assert!(!has_thread_state());
}

#[test]
fn body_result_passes_through_unchanged() {
	let out: Result<u8, &str> = activate(&A, || Err("boom"));
	assert_eq!(out, Err("boom"));
	assert!(candidates("fc_foo").is_none());
	assert!(!has_thread_state());
}

/// Must unwind the scope when the body panics.
///
/// * Enforced in: `ScopeGuard::drop`
/// * Failure symptom: overrides leak out of a scope abandoned by a panic.
#[test]
fn panic_in_body_still_unwinds() {
	let caught = catch_unwind(AssertUnwindSafe(|| {
		activate(&A, || {
			activate(&B, || {
				if current_level() == 2 {
					panic!("body failed");
				}
			})
		})
	}));
	assert!(caught.is_err());
	assert_eq!(current_level(), 0);
	assert!(candidates("fc_foo").is_none());
	assert!(!has_thread_state());
}

#[test]
fn resolve_prefers_specific_host_and_invokes() {
	activate_all(&[&A, &B], || {
		let specific = resolve("fc_foo", &INTEGER).unwrap();
		assert_eq!(specific.category().name, "B");
		let out = specific.invoke(&[Value::new(3_i64)]).unwrap();
		assert_eq!(out.downcast_ref::<String>().unwrap(), "integer:3");

		let general = resolve("fc_foo", &NUMBER).unwrap();
		assert_eq!(general.category().name, "A");
		assert!(resolve("fc_foo", &TEXT).is_none());
		assert!(resolve("fc_missing", &NUMBER).is_none());
	});
	assert!(resolve("fc_foo", &INTEGER).is_none());
}

#[test]
fn property_getter_visible_only_inside_scope() {
	assert_eq!(property_getter("fc_label"), None);
	activate(&A, || {
		assert_eq!(property_getter("fc_label"), Some("getFc_label"));
		assert_eq!(property_setter("fc_label"), None);
	});
	assert_eq!(property_getter("fc_label"), None);
}

/// Must keep one thread's scopes invisible to every other thread.
///
/// * Enforced in: `STATE` thread-local ownership
/// * Failure symptom: overrides from one thread change dispatch on another.
#[test]
fn scopes_do_not_cross_threads() {
	activate(&A, || {
		let observed = thread::spawn(|| {
			(
				candidates("fc_foo").is_none(),
				current_level(),
				has_category_in_current_thread(),
				flags::has_category_in_any_thread(),
			)
		})
		.join()
		.unwrap();
		assert_eq!(observed, (true, 0, false, true));
		assert_eq!(listing("fc_foo"), ["A.fc_foo(Number)"]);
	});
}

#[test]
fn state_is_dropped_after_outermost_exit() {
	assert!(!has_thread_state());
	activate(&A, || {
		assert!(has_thread_state());
		assert!(has_category_in_current_thread());
	});
	assert!(!has_thread_state());
	assert!(!has_category_in_current_thread());
}
