// javastub_model/members - Fields, methods, constructors and their parts
use serde::{Deserialize, Serialize};

use crate::types::{is_deprecated, JavaType, TypeParameter, Visibility, NOT_DEPRECATED};

/// A member of a type body.
///
/// `NestedType` only exists between parsing and normalization: the importer
/// lifts every nested type into its package and removes the placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum Member {
    Field(Field),
    Method(Method),
    Constructor(Constructor),
    NestedType(Box<JavaType>),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Field(field) => &field.name,
            Member::Method(method) => &method.base.name,
            Member::Constructor(constructor) => &constructor.base.name,
            Member::NestedType(nested) => &nested.name,
        }
    }

    pub fn is_nested_type(&self) -> bool {
        matches!(self, Member::NestedType(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    /// Initializer exactly as written in the source; never evaluated.
    pub value: Option<String>,
    pub is_static: bool,
    pub is_final: bool,
    pub is_volatile: bool,
    pub is_transient: bool,
    pub visibility: Option<Visibility>,
    pub deprecated: String,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            value: None,
            is_static: false,
            is_final: false,
            is_volatile: false,
            is_transient: false,
            visibility: None,
            deprecated: NOT_DEPRECATED.to_string(),
        }
    }

    pub fn is_deprecated(&self) -> bool {
        is_deprecated(&self.deprecated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, parameter_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_type: parameter_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExceptionType {
    #[serde(rename = "type")]
    pub exception_type: String,
}

impl ExceptionType {
    pub fn new(exception_type: impl Into<String>) -> Self {
        Self {
            exception_type: exception_type.into(),
        }
    }

    /// Simple name of the exception (`IOException` for `java.io.IOException`).
    pub fn simple_name(&self) -> &str {
        let erased = self
            .exception_type
            .split('<')
            .next()
            .unwrap_or(&self.exception_type);
        erased.rsplit('.').next().unwrap_or(erased)
    }
}

/// Attributes shared by methods and constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodBase {
    pub name: String,
    pub visibility: Option<Visibility>,
    pub is_static: bool,
    pub is_final: bool,
    pub parameters: Vec<Parameter>,
    pub exceptions: Vec<ExceptionType>,
    pub type_parameters: Vec<TypeParameter>,
    pub deprecated: String,
    pub is_synthetic: bool,
}

impl MethodBase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: None,
            is_static: false,
            is_final: false,
            parameters: Vec::new(),
            exceptions: Vec::new(),
            type_parameters: Vec::new(),
            deprecated: NOT_DEPRECATED.to_string(),
            is_synthetic: false,
        }
    }

    pub fn is_deprecated(&self) -> bool {
        is_deprecated(&self.deprecated)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    #[serde(flatten)]
    pub base: MethodBase,
    pub return_type: String,
    pub is_abstract: bool,
    pub is_native: bool,
    pub is_synchronized: bool,
}

impl Method {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            base: MethodBase::new(name),
            return_type: return_type.into(),
            is_abstract: false,
            is_native: false,
            is_synchronized: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constructor {
    #[serde(flatten)]
    pub base: MethodBase,
    /// Simple type name after parsing; `package.Outer.Inner` after normalization.
    pub enclosing_type_name: String,
}

impl Constructor {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            enclosing_type_name: name.clone(),
            base: MethodBase::new(name),
        }
    }
}
