//! Class model data structures
//!
//! The class model is produced outside of this crate (by whatever tool reads
//! the compiled code base) and handed over as JSON. The verifier only queries
//! it and never mutates a [`TypeRef`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};

use crate::error::{ModulithError, Result};

/// An annotation on a type or a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Simple or fully qualified annotation name
    pub name: String,

    /// Annotation attributes rendered as strings
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Whether this annotation is the given marker, either by exact name or
    /// as the simple name of a qualified annotation.
    pub fn is(&self, marker: &str) -> bool {
        self.name == marker
            || (self.name.len() > marker.len()
                && self.name.ends_with(marker)
                && self.name.as_bytes()[self.name.len() - marker.len() - 1] == b'.')
    }

    /// Returns the first non-empty attribute among the given keys
    pub fn attribute(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.attributes.get(*key))
            .map(String::as_str)
            .find(|value| !value.is_empty())
    }
}

/// A declared field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    pub name: String,

    /// Fully qualified name of the field type
    #[serde(rename = "type")]
    pub type_name: String,
}

/// A declared method or constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRef {
    pub name: String,

    /// Parameter types in declaration order
    #[serde(default)]
    pub parameters: Vec<String>,

    /// Return type; absent for constructors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,

    #[serde(default)]
    pub constructor: bool,
}

/// A dependency the model reports irrespective of fields and signatures
/// (inheritance, static access, annotations on members, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectDependency {
    pub target: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Package level metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,

    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// A compiled type. Identity is the fully qualified name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,

    /// Owning package; derived from the name when left empty
    #[serde(default)]
    pub package: String,

    /// Source file the type was compiled from, used for locations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default)]
    pub annotations: Vec<Annotation>,

    #[serde(default)]
    pub fields: Vec<FieldRef>,

    #[serde(default)]
    pub methods: Vec<MethodRef>,

    #[serde(default)]
    pub dependencies: Vec<DirectDependency>,
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl TypeRef {
    /// Create a type whose package is derived from its name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            package: package_of(&name).to_string(),
            name,
            source: None,
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.fields.push(FieldRef {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    pub fn with_method(
        mut self,
        name: impl Into<String>,
        parameters: &[&str],
        return_type: impl Into<String>,
    ) -> Self {
        self.methods.push(MethodRef {
            name: name.into(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            return_type: Some(return_type.into()),
            constructor: false,
        });
        self
    }

    pub fn with_constructor(mut self, parameters: &[&str]) -> Self {
        self.methods.push(MethodRef {
            name: "<init>".to_string(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            return_type: None,
            constructor: true,
        });
        self
    }

    pub fn with_dependency(mut self, target: impl Into<String>, description: Option<&str>) -> Self {
        self.dependencies.push(DirectDependency {
            target: target.into(),
            description: description.map(str::to_string),
        });
        self
    }

    /// Name without the package prefix
    pub fn simple_name(&self) -> &str {
        if self.package.is_empty() {
            &self.name
        } else {
            self.name
                .strip_prefix(self.package.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(&self.name)
        }
    }

    /// Location used in provenance descriptions
    pub fn location(&self) -> String {
        match &self.source {
            Some(source) => format!("({})", source),
            None => format!("({})", self.name),
        }
    }

    pub fn is_annotated_with(&self, marker: &str) -> bool {
        self.annotations.iter().any(|a| a.is(marker))
    }

    /// Name with every segment of `base_package` abbreviated to its first
    /// character except the last one, e.g. `c.a.a.booking.BookingService`
    pub fn abbreviated_name(&self, base_package: &str) -> String {
        let Some(rest) = self
            .name
            .strip_prefix(base_package)
            .filter(|rest| rest.starts_with('.'))
        else {
            return self.name.clone();
        };

        let mut segments: Vec<String> = base_package.split('.').map(str::to_string).collect();
        let last = segments.len().saturating_sub(1);
        for segment in segments.iter_mut().take(last) {
            if let Some(first) = segment.chars().next() {
                *segment = first.to_string();
            }
        }

        format!("{}{}", segments.join("."), rest)
    }
}

/// Package part of a fully qualified type name
pub fn package_of(type_name: &str) -> &str {
    type_name.rfind('.').map(|i| &type_name[..i]).unwrap_or("")
}

/// Last segment of a package name
pub fn local_name(package: &str) -> &str {
    package.rsplit('.').next().unwrap_or(package)
}

/// Whether `package` equals `base` or is nested below it
pub fn is_same_or_sub_package(package: &str, base: &str) -> bool {
    if base.is_empty() {
        return true;
    }

    package == base
        || (package.len() > base.len()
            && package.starts_with(base)
            && package.as_bytes()[base.len()] == b'.')
}

/// Serialized form of the class model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassModelData {
    #[serde(default)]
    pub packages: Vec<PackageInfo>,

    #[serde(default)]
    pub types: Vec<TypeRef>,
}

impl ClassModelData {
    /// Append another model part
    pub fn extend(&mut self, other: ClassModelData) {
        self.packages.extend(other.packages);
        self.types.extend(other.types);
    }
}

/// The queryable, validated class model
#[derive(Debug, Clone, Default)]
pub struct ClassModel {
    types: Vec<TypeRef>,
    packages: HashMap<String, PackageInfo>,
    index: HashMap<String, usize>,
}

impl ClassModel {
    /// Build a model from its serialized parts, validating type identity
    pub fn new(data: ClassModelData) -> Result<Self> {
        let mut index = HashMap::with_capacity(data.types.len());
        let mut types = Vec::with_capacity(data.types.len());

        for mut type_ref in data.types {
            if type_ref.name.trim().is_empty() {
                return Err(ModulithError::malformed_model("<unnamed>", "type without a name"));
            }

            if type_ref.package.is_empty() {
                type_ref.package = package_of(&type_ref.name).to_string();
            } else if !is_same_or_sub_package(package_of(&type_ref.name), &type_ref.package) {
                return Err(ModulithError::malformed_model(
                    &type_ref.name,
                    format!("type is not located in its declared package {}", type_ref.package),
                ));
            }

            if index.insert(type_ref.name.clone(), types.len()).is_some() {
                return Err(ModulithError::malformed_model(&type_ref.name, "type declared more than once"));
            }

            types.push(type_ref);
        }

        let mut packages: HashMap<String, PackageInfo> = HashMap::new();
        for info in data.packages {
            packages
                .entry(info.name.clone())
                .and_modify(|existing| existing.annotations.extend(info.annotations.clone()))
                .or_insert(info);
        }

        Ok(Self { types, packages, index })
    }

    /// Convenience constructor for in-memory models
    pub fn from_types(types: Vec<TypeRef>) -> Result<Self> {
        Self::new(ClassModelData {
            packages: Vec::new(),
            types,
        })
    }

    /// Add package metadata, merging annotations of repeated packages
    pub fn with_package(mut self, info: PackageInfo) -> Self {
        self.packages
            .entry(info.name.clone())
            .and_modify(|existing| existing.annotations.extend(info.annotations.clone()))
            .or_insert(info);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeRef> {
        self.index.get(name).map(|&i| &self.types[i])
    }

    pub fn types(&self) -> &[TypeRef] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Package-level annotations of the given package
    pub fn package_annotations(&self, package: &str) -> &[Annotation] {
        self.packages
            .get(package)
            .map(|info| info.annotations.as_slice())
            .unwrap_or(&[])
    }

    /// Whether any type lives in the package or below it
    pub fn has_package(&self, package: &str) -> bool {
        self.packages.contains_key(package)
            || self
                .types
                .iter()
                .any(|t| is_same_or_sub_package(&t.package, package))
    }

    /// All package names known from types and package metadata
    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.types
            .iter()
            .map(|t| t.package.as_str())
            .chain(self.packages.keys().map(String::as_str))
    }
}
