//! Query entry points
//!
//! [`Reflects`] binds a [`TypeRuntime`] and starts queries from a type,
//! a type name, a value, or explicit lists of descriptors.

use tracing::debug;

use crate::descriptor::{AnnotationRef, MemberRef, TypeRef};
use crate::error::{ReflectError, Result};
use crate::query::{AnnotationSequence, MemberSequence, TypeSequence};
use crate::runtime::{AnnotationId, MemberId, TypeId, TypeRuntime};

/// Query entry point over one runtime
#[derive(Clone, Copy)]
pub struct Reflects<'r> {
    runtime: &'r dyn TypeRuntime,
}

impl<'r> Reflects<'r> {
    /// Bind a runtime
    pub fn new(runtime: &'r dyn TypeRuntime) -> Self {
        Self { runtime }
    }

    /// Start from a type handle
    pub fn on_type(&self, id: TypeId) -> TypeRef<'r> {
        TypeRef::new(self.runtime, id)
    }

    /// Start from a qualified type name
    pub fn on_type_named(&self, name: &str) -> Result<TypeRef<'r>> {
        match self.runtime.lookup(name) {
            Some(id) => Ok(self.on_type(id)),
            None => {
                debug!(name, "type lookup failed");
                Err(ReflectError::TypeNotFound {
                    name: name.to_string(),
                })
            }
        }
    }

    /// Start from the runtime type of `value`
    ///
    /// The value's Rust type name is resolved through the runtime, so the
    /// type must have been registered under `std::any::type_name::<T>()`.
    pub fn on_object<T: ?Sized>(&self, value: &T) -> Result<TypeRef<'r>> {
        self.on_type_named(std::any::type_name_of_val(value))
    }

    /// Start from a list of types
    pub fn on_types(&self, ids: impl IntoIterator<Item = TypeId>) -> TypeSequence<'r> {
        ids.into_iter().map(|id| self.on_type(id)).collect()
    }

    /// Start from a method or field
    pub fn on_member(&self, id: MemberId) -> MemberRef<'r> {
        MemberRef::new(self.runtime, id)
    }

    /// Start from a list of methods or fields
    pub fn on_members(&self, ids: impl IntoIterator<Item = MemberId>) -> MemberSequence<'r> {
        ids.into_iter().map(|id| self.on_member(id)).collect()
    }

    /// Start from a list of annotations
    pub fn on_annotations(&self, ids: impl IntoIterator<Item = AnnotationId>) -> AnnotationSequence<'r> {
        ids.into_iter()
            .map(|id| AnnotationRef::new(self.runtime, id))
            .collect()
    }

    /// Package-level introspection is not implemented
    pub fn on_package(&self, name: &str) -> Result<TypeSequence<'r>> {
        debug!(name, "package introspection requested");
        Err(ReflectError::unsupported("package introspection"))
    }
}
