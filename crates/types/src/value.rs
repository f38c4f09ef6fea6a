use std::any::Any;
use std::sync::Arc;

use crate::InvokeError;

/// Type-erased argument or result passed through member handles.
#[derive(Clone)]
pub struct Value(Arc<dyn Any + Send + Sync>);

impl Value {
	pub fn new<T: Any + Send + Sync>(value: T) -> Self {
		Self(Arc::new(value))
	}

	/// The unit value, returned by members with nothing to report.
	pub fn unit() -> Self {
		Self::new(())
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.0.downcast_ref::<T>()
	}

	pub fn is<T: Any>(&self) -> bool {
		self.0.is::<T>()
	}
}

impl std::fmt::Debug for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("Value(..)")
	}
}

/// Reads argument `index` as a `T`.
pub fn arg<T: Any>(args: &[Value], index: usize) -> Result<&T, InvokeError> {
	let value = args.get(index).ok_or(InvokeError::MissingArgument { index })?;
	value.downcast_ref::<T>().ok_or(InvokeError::ArgumentType {
		index,
		expected: std::any::type_name::<T>(),
	})
}
