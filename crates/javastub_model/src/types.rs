// javastub_model/types - Type declarations, visibility and type parameters
use serde::{Deserialize, Serialize};

use crate::members::{Constructor, Field, Member, Method};

/// Value stored in every `deprecated` attribute when no `@Deprecated`
/// annotation was present. Downstream formatting relies on it never being empty.
pub const NOT_DEPRECATED: &str = "not deprecated";

/// Superclass recorded for classes declared without an `extends` clause.
pub const DEFAULT_SUPERCLASS: &str = "java.lang.Object";

/// Superclass recorded for enum declarations.
pub const ENUM_SUPERCLASS: &str = "java.lang.Enum";

/// Access level of a type or member. Package-private is modelled as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            _ => None,
        }
    }
}

/// Returns true unless `deprecated` holds the [`NOT_DEPRECATED`] sentinel.
pub fn is_deprecated(deprecated: &str) -> bool {
    deprecated != NOT_DEPRECATED
}

/// Generic type parameter declared on a type or method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    /// Upper bounds as written (`extends A & B`), in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<String>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    /// Builds a parameter from its declaration text, e.g. `T extends java.lang.Comparable<T>`.
    pub fn from_declaration(text: &str) -> Self {
        let trimmed = text.trim();
        match trimmed.split_once(" extends ") {
            Some((name, bounds)) => Self {
                name: name.trim().to_string(),
                bounds: bounds
                    .split(" & ")
                    .map(str::trim)
                    .filter(|bound| !bound.is_empty())
                    .map(str::to_string)
                    .collect(),
            },
            None => Self::new(trimmed),
        }
    }
}

/// Class/interface distinction. Enums and annotation types are folded into
/// `Class` and `Interface` respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    Class { extends: String },
    Interface,
}

/// A class or interface declaration.
///
/// `name` is the simple name at parse time. Nested types are flattened by the
/// importer, after which `name` is the dotted path from the outermost type
/// (`Outer.Inner`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JavaType {
    #[serde(flatten)]
    pub kind: TypeKind,
    pub name: String,
    pub visibility: Option<Visibility>,
    pub is_abstract: bool,
    pub is_static: bool,
    pub is_final: bool,
    pub deprecated: String,
    pub type_parameters: Vec<TypeParameter>,
    /// Implemented interfaces; for interfaces, the extended interfaces too.
    pub implements: Vec<String>,
    pub members: Vec<Member>,
}

impl JavaType {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            visibility: None,
            is_abstract: false,
            is_static: false,
            is_final: false,
            deprecated: NOT_DEPRECATED.to_string(),
            type_parameters: Vec::new(),
            implements: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(
            TypeKind::Class {
                extends: DEFAULT_SUPERCLASS.to_string(),
            },
            name,
        )
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    pub fn is_class(&self) -> bool {
        matches!(self.kind, TypeKind::Class { .. })
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface)
    }

    /// Superclass of a class; `None` for interfaces.
    pub fn extends(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Class { extends } => Some(extends),
            TypeKind::Interface => None,
        }
    }

    /// Element name used for this type in the XML output.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            TypeKind::Class { .. } => "class",
            TypeKind::Interface => "interface",
        }
    }

    pub fn is_deprecated(&self) -> bool {
        is_deprecated(&self.deprecated)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.members.iter().filter_map(|member| match member {
            Member::Field(field) => Some(field),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.members.iter().filter_map(|member| match member {
            Member::Method(method) => Some(method),
            _ => None,
        })
    }

    pub fn constructors(&self) -> impl Iterator<Item = &Constructor> {
        self.members.iter().filter_map(|member| match member {
            Member::Constructor(constructor) => Some(constructor),
            _ => None,
        })
    }

    pub fn nested_types(&self) -> impl Iterator<Item = &JavaType> {
        self.members.iter().filter_map(|member| match member {
            Member::NestedType(nested) => Some(nested.as_ref()),
            _ => None,
        })
    }

    /// True while a direct member is still an unflattened nested type.
    pub fn has_nested_types(&self) -> bool {
        self.members.iter().any(Member::is_nested_type)
    }
}
