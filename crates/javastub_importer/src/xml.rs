// javastub_importer/xml - API description as XML
//! Writes a normalized [`ApiRoot`] as an `<api>` document.
//!
//! Attribute values are written exactly as stored in the model. Booleans are
//! `true`/`false`, and an absent visibility is an empty string.

use javastub_model::{
    ApiRoot, Constructor, Field, JavaType, Member, Method, MethodBase, Package, TypeKind,
    TypeParameter, Visibility,
};
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::Writer;
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiXmlError {
    #[error("Failed to write API XML: {0}")]
    Writer(#[from] quick_xml::Error),
    #[error("API XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Element and attribute selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlDetail {
    /// Every type, member and attribute.
    Full,
    /// `api/package/class|interface/constructor|method/parameter`, keeping only
    /// methods and constructors with at least one parameter.
    ParametersOnly,
}

type XmlWriter = Writer<Cursor<Vec<u8>>>;

pub struct ApiXmlWriter {
    detail: XmlDetail,
}

impl ApiXmlWriter {
    pub fn new(detail: XmlDetail) -> Self {
        Self { detail }
    }

    pub fn write(&self, api: &ApiRoot) -> Result<String, ApiXmlError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        write_element(
            &mut writer,
            BytesStart::new("api"),
            !api.packages.is_empty(),
            |writer| {
                for package in &api.packages {
                    self.write_package(writer, package)?;
                }
                Ok(())
            },
        )?;

        let bytes = writer.into_inner().into_inner();
        let mut xml = String::from_utf8(bytes)?;
        if !xml.ends_with('\n') {
            xml.push('\n');
        }
        Ok(xml)
    }

    fn write_package(&self, writer: &mut XmlWriter, package: &Package) -> Result<(), ApiXmlError> {
        let mut start = BytesStart::new("package");
        start.push_attribute(("name", package.name.as_str()));
        write_element(writer, start, !package.types.is_empty(), |writer| {
            for ty in &package.types {
                self.write_type(writer, ty)?;
            }
            Ok(())
        })
    }

    fn write_type(&self, writer: &mut XmlWriter, ty: &JavaType) -> Result<(), ApiXmlError> {
        match self.detail {
            XmlDetail::Full => write_type_full(writer, ty),
            XmlDetail::ParametersOnly => write_type_parameters_only(writer, ty),
        }
    }
}

fn write_element<F>(
    writer: &mut XmlWriter,
    start: BytesStart<'_>,
    has_children: bool,
    children: F,
) -> Result<(), ApiXmlError>
where
    F: FnOnce(&mut XmlWriter) -> Result<(), ApiXmlError>,
{
    if !has_children {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    children(writer)?;
    writer.write_event(Event::End(end))?;
    Ok(())
}

fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn visibility(value: Option<Visibility>) -> &'static str {
    value.map(Visibility::as_str).unwrap_or("")
}

fn write_type_full(writer: &mut XmlWriter, ty: &JavaType) -> Result<(), ApiXmlError> {
    let mut start = BytesStart::new(ty.kind_name());
    start.push_attribute(("name", ty.name.as_str()));
    if let TypeKind::Class { extends } = &ty.kind {
        start.push_attribute(("extends", extends.as_str()));
    }
    start.push_attribute(("abstract", flag(ty.is_abstract)));
    start.push_attribute(("static", flag(ty.is_static)));
    start.push_attribute(("final", flag(ty.is_final)));
    start.push_attribute(("visibility", visibility(ty.visibility)));
    start.push_attribute(("deprecated", ty.deprecated.as_str()));

    let has_children =
        !ty.type_parameters.is_empty() || !ty.implements.is_empty() || !ty.members.is_empty();
    write_element(writer, start, has_children, |writer| {
        write_type_parameters(writer, &ty.type_parameters)?;
        for interface in &ty.implements {
            let mut implements = BytesStart::new("implements");
            implements.push_attribute(("name", interface.as_str()));
            writer.write_event(Event::Empty(implements))?;
        }
        for member in &ty.members {
            match member {
                Member::Constructor(constructor) => write_constructor(writer, constructor)?,
                Member::Method(method) => write_method(writer, method)?,
                Member::Field(field) => write_field(writer, field)?,
                // Flattened away before output; nothing to write for a stray one.
                Member::NestedType(_) => {}
            }
        }
        Ok(())
    })
}

fn write_type_parameters(
    writer: &mut XmlWriter,
    parameters: &[TypeParameter],
) -> Result<(), ApiXmlError> {
    if parameters.is_empty() {
        return Ok(());
    }
    write_element(writer, BytesStart::new("typeParameters"), true, |writer| {
        for parameter in parameters {
            let mut start = BytesStart::new("typeParameter");
            start.push_attribute(("name", parameter.name.as_str()));
            write_element(writer, start, !parameter.bounds.is_empty(), |writer| {
                for bound in &parameter.bounds {
                    let mut start = BytesStart::new("bound");
                    start.push_attribute(("type", bound.as_str()));
                    writer.write_event(Event::Empty(start))?;
                }
                Ok(())
            })?;
        }
        Ok(())
    })
}

fn push_base_attributes(start: &mut BytesStart<'_>, base: &MethodBase) {
    start.push_attribute(("static", flag(base.is_static)));
    start.push_attribute(("final", flag(base.is_final)));
    start.push_attribute(("visibility", visibility(base.visibility)));
    start.push_attribute(("deprecated", base.deprecated.as_str()));
}

fn write_base_children(writer: &mut XmlWriter, base: &MethodBase) -> Result<(), ApiXmlError> {
    write_type_parameters(writer, &base.type_parameters)?;
    for parameter in &base.parameters {
        let mut start = BytesStart::new("parameter");
        start.push_attribute(("name", parameter.name.as_str()));
        start.push_attribute(("type", parameter.parameter_type.as_str()));
        writer.write_event(Event::Empty(start))?;
    }
    for exception in &base.exceptions {
        let mut start = BytesStart::new("exception");
        start.push_attribute(("name", exception.simple_name()));
        start.push_attribute(("type", exception.exception_type.as_str()));
        writer.write_event(Event::Empty(start))?;
    }
    Ok(())
}

fn has_base_children(base: &MethodBase) -> bool {
    !base.type_parameters.is_empty() || !base.parameters.is_empty() || !base.exceptions.is_empty()
}

fn write_constructor(writer: &mut XmlWriter, constructor: &Constructor) -> Result<(), ApiXmlError> {
    let base = &constructor.base;
    let mut start = BytesStart::new("constructor");
    start.push_attribute(("name", base.name.as_str()));
    start.push_attribute(("type", constructor.enclosing_type_name.as_str()));
    push_base_attributes(&mut start, base);
    write_element(writer, start, has_base_children(base), |writer| {
        write_base_children(writer, base)
    })
}

fn write_method(writer: &mut XmlWriter, method: &Method) -> Result<(), ApiXmlError> {
    let base = &method.base;
    let mut start = BytesStart::new("method");
    start.push_attribute(("name", base.name.as_str()));
    start.push_attribute(("return", method.return_type.as_str()));
    start.push_attribute(("abstract", flag(method.is_abstract)));
    start.push_attribute(("native", flag(method.is_native)));
    start.push_attribute(("synchronized", flag(method.is_synchronized)));
    push_base_attributes(&mut start, base);
    write_element(writer, start, has_base_children(base), |writer| {
        write_base_children(writer, base)
    })
}

fn write_field(writer: &mut XmlWriter, field: &Field) -> Result<(), ApiXmlError> {
    let mut start = BytesStart::new("field");
    start.push_attribute(("name", field.name.as_str()));
    start.push_attribute(("type", field.field_type.as_str()));
    start.push_attribute(("static", flag(field.is_static)));
    start.push_attribute(("final", flag(field.is_final)));
    start.push_attribute(("volatile", flag(field.is_volatile)));
    start.push_attribute(("transient", flag(field.is_transient)));
    if let Some(value) = &field.value {
        start.push_attribute(("value", value.as_str()));
    }
    start.push_attribute(("visibility", visibility(field.visibility)));
    start.push_attribute(("deprecated", field.deprecated.as_str()));
    writer.write_event(Event::Empty(start))?;
    Ok(())
}

fn write_type_parameters_only(writer: &mut XmlWriter, ty: &JavaType) -> Result<(), ApiXmlError> {
    let callables: Vec<(&'static str, &MethodBase)> = ty
        .members
        .iter()
        .filter_map(|member| match member {
            Member::Constructor(constructor) => Some(("constructor", &constructor.base)),
            Member::Method(method) => Some(("method", &method.base)),
            Member::Field(_) | Member::NestedType(_) => None,
        })
        .filter(|(_, base)| !base.parameters.is_empty())
        .collect();

    let mut start = BytesStart::new(ty.kind_name());
    start.push_attribute(("name", ty.name.as_str()));
    write_element(writer, start, !callables.is_empty(), |writer| {
        for (element, base) in &callables {
            let mut start = BytesStart::new(*element);
            start.push_attribute(("name", base.name.as_str()));
            write_element(writer, start, true, |writer| {
                for parameter in &base.parameters {
                    let mut start = BytesStart::new("parameter");
                    start.push_attribute(("name", parameter.name.as_str()));
                    start.push_attribute(("type", parameter.parameter_type.as_str()));
                    writer.write_event(Event::Empty(start))?;
                }
                Ok(())
            })?;
        }
        Ok(())
    })
}
