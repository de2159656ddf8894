//! Type manifests (types.toml / types.json)
//!
//! A manifest describes a type graph declaratively and builds a
//! [`TypeRegistry`] from it. Types may reference types declared later in
//! the same manifest.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::ReflectError;
use crate::registry::{AnnotationSpec, MemberSpec, TypeRegistry};
use crate::runtime::{Modifiers, TypeId, TypeKind, Visibility};

/// Errors that can occur while loading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("Failed to read manifest file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse TOML manifest: {0}")]
    Toml(#[from] toml::de::Error),

    /// Failed to parse JSON
    #[error("Failed to parse JSON manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither .toml nor .json
    #[error("Unsupported manifest format: {0}")]
    UnsupportedFormat(String),

    /// A type name that no entry declares
    #[error("Unknown type '{name}' referenced by {referenced_by}")]
    UnknownType {
        /// Missing name
        name: String,
        /// Entry that referenced it
        referenced_by: String,
    },

    /// The registry rejected the graph
    #[error(transparent)]
    Registry(#[from] ReflectError),
}

/// Declarative description of a type graph
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TypeManifest {
    /// Universal base class; classes without a superclass extend it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Type entries, in registration order
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

/// One type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeEntry {
    /// Qualified name
    pub name: String,

    /// Kind (defaults to class)
    #[serde(default)]
    pub kind: TypeKind,

    /// Superclass name (classes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<String>,

    /// Implemented (or, for interfaces, extended) interfaces
    #[serde(default)]
    pub interfaces: Vec<String>,

    /// Annotations on the type
    #[serde(default)]
    pub annotations: Vec<AnnotationEntry>,

    /// Declared methods
    #[serde(default)]
    pub methods: Vec<MemberEntry>,

    /// Declared fields
    #[serde(default)]
    pub fields: Vec<MemberEntry>,
}

/// One method or field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemberEntry {
    /// Member name
    pub name: String,

    /// Visibility (defaults to package)
    #[serde(default)]
    pub visibility: Visibility,

    /// Static member
    #[serde(default, rename = "static")]
    pub is_static: bool,

    /// Final member
    #[serde(default, rename = "final")]
    pub is_final: bool,

    /// Abstract member
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    /// Return type (methods, omitted for void) or declared type (fields)
    #[serde(default, rename = "type", alias = "returns", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    /// Parameter type names
    #[serde(default)]
    pub params: Vec<String>,

    /// Annotations on the member
    #[serde(default)]
    pub annotations: Vec<AnnotationEntry>,
}

/// One attached annotation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnotationEntry {
    /// Annotation type name
    #[serde(rename = "type")]
    pub annotation_type: String,

    /// Named values
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl MemberEntry {
    fn modifiers(&self) -> Modifiers {
        Modifiers {
            visibility: self.visibility,
            is_static: self.is_static,
            is_final: self.is_final,
            is_abstract: self.is_abstract,
        }
    }
}

impl TypeManifest {
    /// Load a manifest, choosing the format from the file extension
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(ManifestError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Parse a TOML manifest
    pub fn from_toml_str(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse a JSON manifest
    pub fn from_json_str(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Build the registry the manifest describes
    pub fn build(&self) -> Result<TypeRegistry, ManifestError> {
        let mut registry = TypeRegistry::new();

        // Pass 1: declare every type so references can point forward
        let mut ids = Vec::with_capacity(self.types.len());
        for entry in &self.types {
            ids.push(registry.add_type(&entry.name, entry.kind)?);
        }

        // The root may not extend anything; every other parentless class
        // extends the root once it is set.
        if let Some(name) = &self.root {
            let id = resolve(&registry, name, "root")?;
            if let Some(superclass) = self
                .types
                .iter()
                .find(|entry| &entry.name == name)
                .and_then(|entry| entry.superclass.as_ref())
            {
                return Err(ReflectError::InvalidSuperclass {
                    name: name.clone(),
                    superclass: superclass.clone(),
                }
                .into());
            }
            registry.set_root(id)?;
        }

        // Pass 2: hierarchy links
        for (entry, &id) in self.types.iter().zip(&ids) {
            if let Some(name) = &entry.superclass {
                let parent = resolve(&registry, name, &entry.name)?;
                registry.set_superclass(id, parent)?;
            }
            for name in &entry.interfaces {
                let interface = resolve(&registry, name, &entry.name)?;
                registry.implement(id, interface)?;
            }
        }

        // Pass 3: annotations and members
        for (entry, &id) in self.types.iter().zip(&ids) {
            for annotation in &entry.annotations {
                let spec = annotation_spec(&registry, annotation, &entry.name)?;
                registry.annotate_type(id, spec)?;
            }
            for method in &entry.methods {
                let owner = format!("{}.{}", entry.name, method.name);
                let spec = member_spec(&registry, method, &owner)?;
                let member = registry.add_method(id, spec);
                for annotation in &method.annotations {
                    let spec = annotation_spec(&registry, annotation, &owner)?;
                    registry.annotate_member(member, spec)?;
                }
            }
            for field in &entry.fields {
                let owner = format!("{}.{}", entry.name, field.name);
                let spec = member_spec(&registry, field, &owner)?;
                let member = registry.add_field(id, spec);
                for annotation in &field.annotations {
                    let spec = annotation_spec(&registry, annotation, &owner)?;
                    registry.annotate_member(member, spec)?;
                }
            }
        }

        debug!(types = registry.len(), "built registry from manifest");
        Ok(registry)
    }
}

/// Load and build a manifest file in one step
pub fn load_registry(path: &Path) -> Result<TypeRegistry, ManifestError> {
    TypeManifest::from_file(path)?.build()
}

fn resolve(registry: &TypeRegistry, name: &str, referenced_by: &str) -> Result<TypeId, ManifestError> {
    registry.get(name).ok_or_else(|| ManifestError::UnknownType {
        name: name.to_string(),
        referenced_by: referenced_by.to_string(),
    })
}

fn member_spec(registry: &TypeRegistry, entry: &MemberEntry, owner: &str) -> Result<MemberSpec, ManifestError> {
    let mut spec = MemberSpec::new(entry.name.clone(), entry.modifiers());
    if let Some(name) = &entry.value_type {
        spec = spec.returns(resolve(registry, name, owner)?);
    }
    let params = entry
        .params
        .iter()
        .map(|name| resolve(registry, name, owner))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(spec.params(params))
}

fn annotation_spec(
    registry: &TypeRegistry,
    entry: &AnnotationEntry,
    owner: &str,
) -> Result<AnnotationSpec, ManifestError> {
    let annotation_type = resolve(registry, &entry.annotation_type, owner)?;
    Ok(AnnotationSpec {
        annotation_type,
        values: entry.values.clone(),
    })
}
