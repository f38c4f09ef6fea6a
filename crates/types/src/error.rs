/// Errors raised while invoking a member handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvokeError {
	/// Fewer arguments than the member reads.
	#[error("missing argument {index}")]
	MissingArgument { index: usize },
	/// An argument holds a value of another type.
	#[error("argument {index} is not a {expected}")]
	ArgumentType {
		index: usize,
		expected: &'static str,
	},
	/// The member itself reported a failure.
	#[error("{0}")]
	Failed(String),
}
