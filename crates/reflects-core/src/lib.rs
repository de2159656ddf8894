//! Reflects
//!
//! Fluent queries over a runtime's type graph: superclass chains,
//! interface closures, methods, fields and annotations, with composable
//! filters and transforms.
//!
//! ```ignore
//! let registry = load_registry(Path::new("types.toml"))?;
//! let reflects = registry.reflects();
//!
//! let deprecated = registry.get("Deprecated").unwrap();
//! let methods = reflects
//!     .on_type_named("app.Service")?
//!     .methods()
//!     .filter(and(public_member(), not(root_member())))
//!     .filter_annotated(deprecated);
//! ```

#![warn(missing_docs)]

pub mod annotations;
pub mod descriptor;
pub mod error;
pub mod functions;
pub mod manifest;
pub mod members;
pub mod ordered_set;
pub mod predicates;
pub mod query;
pub mod reflects;
pub mod registry;
pub mod runtime;
pub mod walker;

pub use descriptor::{Annotatable, AnnotationRef, MemberRef, Named, TypeRef};
pub use error::{ReflectError, Result};
pub use manifest::{load_registry, ManifestError, TypeManifest};
pub use members::MemberFlags;
pub use ordered_set::OrderedSet;
pub use query::{
    AnnotationSequence, HasAnnotations, HasFields, HasMethods, MemberSequence, QueryCollection,
    TypeSequence,
};
pub use reflects::Reflects;
pub use registry::{AnnotationSpec, MemberSpec, TypeRegistry};
pub use runtime::{
    AnnotationDef, AnnotationId, MemberDef, MemberId, MemberKind, Modifiers, TypeDef, TypeId,
    TypeKind, TypeRuntime, Visibility,
};
