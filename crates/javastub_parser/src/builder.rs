// javastub_parser/builder - Semantic actions turning parsed pieces into API model nodes
//! The grammar hands over small intermediate records (a declaration header and
//! the tail that follows it); the functions here decide flags, visibility,
//! deprecation and type parameters and produce [`javastub_model`] nodes.

use javastub_model::{
    Constructor, ExceptionType, Field, JavaType, Member, Method, MethodBase, Package, Parameter,
    TypeKind, TypeParameter, Visibility, DEFAULT_SUPERCLASS, ENUM_SUPERCLASS, NOT_DEPRECATED,
};

/// Annotation names recognised as the deprecation marker.
const DEPRECATED_ANNOTATIONS: [&str; 2] = ["Deprecated", "java.lang.Deprecated"];

/// Value stored in `deprecated` for a declaration carrying the marker.
const DEPRECATED: &str = "Deprecated";

/// Result of parsing one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileUnit {
    /// The file's package holding its top-level types; unnamed when no
    /// `package` declaration is present.
    pub package: Package,
    pub imports: Vec<String>,
}

/// Annotations and the flat modifier list in front of a declaration.
///
/// `modifiers` holds modifier keywords and the declaration text of every
/// argument of a leading `<...>` list, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclHeader {
    pub annotations: Vec<String>,
    pub modifiers: Vec<String>,
}

impl DeclHeader {
    pub fn has(&self, keyword: &str) -> bool {
        self.modifiers
            .iter()
            .any(|modifier| !is_type_parameter_entry(modifier) && modifier == keyword)
    }

    /// First `public`/`protected` modifier.
    pub fn visibility(&self) -> Option<Visibility> {
        self.modifiers
            .iter()
            .find_map(|modifier| Visibility::from_keyword(modifier))
    }

    pub fn deprecated(&self) -> String {
        deprecation(&self.annotations)
    }

    /// Entries of the modifier list classified as generic parameter declarations.
    pub fn type_parameters(&self) -> Vec<TypeParameter> {
        self.modifiers
            .iter()
            .filter(|entry| is_type_parameter_entry(entry))
            .map(|entry| TypeParameter::from_declaration(entry))
            .collect()
    }
}

/// Classifies one entry of the flat modifier list.
///
/// Only entries containing `.`, `<` or `>` count as generic parameter
/// declarations. A bare `T` from `<T>` does not and is kept as a modifier.
pub fn is_type_parameter_entry(entry: &str) -> bool {
    entry.contains(|c: char| matches!(c, '.' | '<' | '>'))
}

/// Deprecation value for a declaration with the given annotation names.
pub fn deprecation(annotations: &[String]) -> String {
    if annotations
        .iter()
        .any(|name| DEPRECATED_ANNOTATIONS.contains(&name.as_str()))
    {
        DEPRECATED.to_string()
    } else {
        NOT_DEPRECATED.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKeyword {
    Class,
    Interface,
    AnnotationType,
    Enum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstant {
    pub annotations: Vec<String>,
    pub name: String,
}

/// Everything after the header of a type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeTail {
    pub keyword: TypeKeyword,
    pub name: String,
    pub type_parameters: Vec<String>,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    pub constants: Vec<EnumConstant>,
    pub members: Vec<Member>,
}

/// Name, parameters and `throws` list of a method or constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct CallableTail {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub exceptions: Vec<ExceptionType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldTail {
    pub field_type: String,
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberTail {
    NestedType(TypeTail),
    Constructor(CallableTail),
    Method {
        return_type: String,
        callable: CallableTail,
    },
    Field(FieldTail),
    Initializer,
}

pub fn compile_unit(
    package: Option<String>,
    imports: Vec<String>,
    types: Vec<JavaType>,
) -> CompileUnit {
    let mut package = Package::new(package.unwrap_or_default());
    package.types = types;
    CompileUnit { package, imports }
}

pub fn type_declaration(header: DeclHeader, tail: TypeTail) -> JavaType {
    let TypeTail {
        keyword,
        name,
        type_parameters,
        extends,
        implements,
        constants,
        members,
    } = tail;

    let (kind, implements) = match keyword {
        TypeKeyword::Class => {
            let superclass = extends
                .into_iter()
                .next()
                .unwrap_or_else(|| DEFAULT_SUPERCLASS.to_string());
            (TypeKind::Class { extends: superclass }, implements)
        }
        TypeKeyword::Enum => (
            TypeKind::Class {
                extends: ENUM_SUPERCLASS.to_string(),
            },
            implements,
        ),
        TypeKeyword::Interface | TypeKeyword::AnnotationType => {
            let mut all = extends;
            all.extend(implements);
            (TypeKind::Interface, all)
        }
    };

    let mut ty = JavaType::new(kind, name);
    ty.visibility = header.visibility();
    ty.is_abstract = header.has("abstract");
    ty.is_static = header.has("static");
    ty.is_final = header.has("final");
    ty.deprecated = header.deprecated();
    ty.type_parameters = header.type_parameters();
    ty.type_parameters.extend(
        type_parameters
            .iter()
            .map(|declaration| TypeParameter::from_declaration(declaration)),
    );
    ty.implements = implements;
    ty.members = constants
        .into_iter()
        .map(|constant| Member::Field(enum_constant_field(&ty.name, constant)))
        .chain(members)
        .collect();
    ty
}

fn enum_constant_field(enum_name: &str, constant: EnumConstant) -> Field {
    let mut field = Field::new(constant.name, enum_name);
    field.is_static = true;
    field.is_final = true;
    field.visibility = Some(Visibility::Public);
    field.deprecated = deprecation(&constant.annotations);
    field
}

/// Builds the member for one body entry. Initializer blocks produce nothing.
pub fn member(header: DeclHeader, tail: MemberTail) -> Option<Member> {
    let member = match tail {
        MemberTail::NestedType(tail) => {
            Member::NestedType(Box::new(type_declaration(header, tail)))
        }
        MemberTail::Constructor(callable) => {
            let mut constructor = Constructor::new(callable.name.clone());
            constructor.base = method_base(&header, callable);
            Member::Constructor(constructor)
        }
        MemberTail::Method {
            return_type,
            callable,
        } => Member::Method(Method {
            base: method_base(&header, callable),
            return_type,
            is_abstract: header.has("abstract"),
            is_native: header.has("native"),
            is_synchronized: header.has("synchronized"),
        }),
        MemberTail::Field(tail) => {
            let mut field = Field::new(tail.name, tail.field_type);
            field.value = tail.value;
            field.is_static = header.has("static");
            field.is_final = header.has("final");
            field.is_volatile = header.has("volatile");
            field.is_transient = header.has("transient");
            field.visibility = header.visibility();
            field.deprecated = header.deprecated();
            Member::Field(field)
        }
        MemberTail::Initializer => return None,
    };
    Some(member)
}

fn method_base(header: &DeclHeader, callable: CallableTail) -> MethodBase {
    let mut base = MethodBase::new(callable.name);
    base.visibility = header.visibility();
    base.is_static = header.has("static");
    base.is_final = header.has("final");
    base.parameters = callable.parameters;
    base.exceptions = callable.exceptions;
    base.type_parameters = header.type_parameters();
    base.deprecated = header.deprecated();
    base
}
