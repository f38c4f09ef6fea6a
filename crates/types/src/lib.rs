//! Descriptors consumed by the scoped category registry.
//!
//! The registry never inspects Rust types directly. Host types, categories and
//! their members are declared as `static` descriptors:
//!
//! - [`TypeDesc`] - a host type with an optional parent, giving an ancestor chain.
//! - [`CategoryDesc`] - a category type with an optional parent category and a
//!   table of [`MemberDesc`]s.
//! - [`MemberDesc`] - one static member: name, declared host type, arity and an
//!   invocation handle taking [`Value`] arguments.
//!
//! Descriptor identity is address identity: two descriptors are the same type
//! only if they are the same `static`.

mod category;
mod error;
mod ty;
mod value;

pub use category::{CategoryDesc, Invoker, MemberDesc, MemberKind, Visibility};
pub use error::InvokeError;
pub use ty::{Ancestors, TypeDesc};
pub use value::{Value, arg};
