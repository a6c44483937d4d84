use chumsky::error::Simple;
use chumsky::prelude::*;
use chumsky::Parser as ChumskyParser;
use javastub_lexer::{Token, TokenType};
use javastub_model::{ExceptionType, JavaType, Member, Parameter};

use super::annotations::{annotation, annotations};
use super::bodies::{block, enum_constant_tail, import_target, method_terminator, noise_until};
use super::tokens::{
    dotted_identifier, identifier, keyword_at_interface, keyword_class, keyword_enum,
    keyword_extends, keyword_final, keyword_implements, keyword_import, keyword_interface,
    keyword_package, keyword_static, keyword_throws, modifier_keyword, token_assign, token_comma,
    token_eof, token_left_brace, token_left_paren, token_right_brace, token_right_paren,
    token_semicolon,
};
use super::types::{generic_list, type_ref};
use crate::builder::{
    self, CallableTail, CompileUnit, DeclHeader, EnumConstant, FieldTail, MemberTail,
    TypeKeyword, TypeTail,
};

#[derive(Debug, Clone)]
enum HeaderItem {
    Annotation(String),
    Modifiers(Vec<String>),
}

/// Annotations, modifier keywords and leading generic lists in any order.
pub fn header() -> impl ChumskyParser<Token, DeclHeader, Error = Simple<Token>> + Clone {
    choice((
        annotation().map(HeaderItem::Annotation),
        modifier_keyword().map(|keyword| HeaderItem::Modifiers(vec![keyword])),
        generic_list().map(HeaderItem::Modifiers),
    ))
    .repeated()
    .map(|items| {
        items
            .into_iter()
            .fold(DeclHeader::default(), |mut header, item| {
                match item {
                    HeaderItem::Annotation(name) => header.annotations.push(name),
                    HeaderItem::Modifiers(entries) => header.modifiers.extend(entries),
                }
                header
            })
    })
}

fn type_list() -> impl ChumskyParser<Token, Vec<String>, Error = Simple<Token>> + Clone {
    type_ref().separated_by(token_comma()).at_least(1)
}

fn clause<K>(keyword: K) -> impl ChumskyParser<Token, Vec<String>, Error = Simple<Token>> + Clone
where
    K: ChumskyParser<Token, Token, Error = Simple<Token>> + Clone,
{
    keyword
        .ignore_then(type_list())
        .or_not()
        .map(Option::unwrap_or_default)
}

/// Declaration of a class, interface, annotation type or enum after its header.
fn type_tail<M>(member: M) -> impl ChumskyParser<Token, TypeTail, Error = Simple<Token>> + Clone
where
    M: ChumskyParser<Token, Option<Member>, Error = Simple<Token>> + Clone,
{
    let body = member
        .clone()
        .repeated()
        .delimited_by(token_left_brace(), token_right_brace())
        .map(|members| members.into_iter().flatten().collect::<Vec<_>>());

    let keyword = choice((
        keyword_class().to(TypeKeyword::Class),
        keyword_interface().to(TypeKeyword::Interface),
        keyword_at_interface().to(TypeKeyword::AnnotationType),
    ));

    let class_or_interface = keyword
        .then(identifier())
        .then(generic_list().or_not().map(Option::unwrap_or_default))
        .then(clause(keyword_extends()))
        .then(clause(keyword_implements()))
        .then(body)
        .map(
            |(((((keyword, name), type_parameters), extends), implements), members)| TypeTail {
                keyword,
                name,
                type_parameters,
                extends,
                implements,
                constants: Vec::new(),
                members,
            },
        );

    let constant = annotations()
        .then(identifier())
        .then_ignore(enum_constant_tail())
        .map(|(annotations, name)| EnumConstant { annotations, name });

    let enum_body = constant
        .separated_by(token_comma())
        .allow_trailing()
        .then(
            token_semicolon()
                .ignore_then(member.repeated())
                .or_not()
                .map(|members| {
                    members
                        .unwrap_or_default()
                        .into_iter()
                        .flatten()
                        .collect::<Vec<_>>()
                }),
        )
        .delimited_by(token_left_brace(), token_right_brace());

    let enumeration = keyword_enum()
        .ignore_then(identifier())
        .then(clause(keyword_implements()))
        .then(enum_body)
        .map(|((name, implements), (constants, members))| TypeTail {
            keyword: TypeKeyword::Enum,
            name,
            type_parameters: Vec::new(),
            extends: Vec::new(),
            implements,
            constants,
            members,
        });

    choice((class_or_interface, enumeration))
}

fn parameter() -> impl ChumskyParser<Token, Parameter, Error = Simple<Token>> + Clone {
    choice((annotation().ignored(), keyword_final().ignored()))
        .repeated()
        .ignore_then(type_ref())
        .then(identifier())
        .map(|(parameter_type, name)| Parameter::new(name, parameter_type))
}

/// `name(params) throws X, Y` followed by its body or terminator.
fn callable() -> impl ChumskyParser<Token, CallableTail, Error = Simple<Token>> + Clone {
    let parameters = parameter()
        .separated_by(token_comma())
        .delimited_by(token_left_paren(), token_right_paren());
    let exceptions = clause(keyword_throws())
        .map(|types| types.into_iter().map(ExceptionType::new).collect::<Vec<_>>());

    identifier()
        .then(parameters)
        .then(exceptions)
        .then_ignore(method_terminator())
        .map(|((name, parameters), exceptions)| CallableTail {
            name,
            parameters,
            exceptions,
        })
}

/// Raw text of a literal initializer.
fn literal() -> impl ChumskyParser<Token, String, Error = Simple<Token>> + Clone {
    filter_map(|span, token: Token| match token.token_type {
        TokenType::String(_)
        | TokenType::Character(_)
        | TokenType::Number(_)
        | TokenType::Null
        | TokenType::True
        | TokenType::False => Ok(token.lexeme),
        _ => Err(Simple::expected_input_found(span, Vec::new(), Some(token))),
    })
    .labelled("literal")
}

/// `;` or `= initializer;`. Initializers other than a single literal are
/// consumed and leave the value absent.
fn field_initializer() -> impl ChumskyParser<Token, Option<String>, Error = Simple<Token>> + Clone {
    let expression = noise_until(|token_type| matches!(token_type, TokenType::Semicolon))
        .at_least(1)
        .to(None::<String>);
    let value = choice((
        literal().map(Some).then_ignore(token_semicolon()),
        expression.then_ignore(token_semicolon()),
    ));

    choice((token_semicolon().to(None::<String>), token_assign().ignore_then(value)))
}

/// One body entry. Yields `None` for initializer blocks and stray `;`.
pub fn member() -> impl ChumskyParser<Token, Option<Member>, Error = Simple<Token>> + Clone {
    recursive(|member| {
        let constructor = callable().map(MemberTail::Constructor);
        let method = type_ref()
            .then(callable())
            .map(|(return_type, callable)| MemberTail::Method {
                return_type,
                callable,
            });
        let field = type_ref()
            .then(identifier())
            .then(field_initializer())
            .map(|((field_type, name), value)| {
                MemberTail::Field(FieldTail {
                    field_type,
                    name,
                    value,
                })
            });

        let declaration = header()
            .then(choice((
                type_tail(member).map(MemberTail::NestedType),
                constructor,
                method,
                field,
                block().to(MemberTail::Initializer),
            )))
            .map(|(header, tail)| builder::member(header, tail));

        choice((token_semicolon().to(None), declaration))
    })
    .boxed()
}

pub fn type_declaration() -> impl ChumskyParser<Token, JavaType, Error = Simple<Token>> + Clone {
    header()
        .then(type_tail(member()))
        .map(|(header, tail)| builder::type_declaration(header, tail))
}

/// Package declaration, imports and top-level types of one file, through end of input.
pub fn compile_unit() -> impl ChumskyParser<Token, CompileUnit, Error = Simple<Token>> + Clone {
    let package = annotations()
        .ignore_then(keyword_package())
        .ignore_then(dotted_identifier())
        .then_ignore(token_semicolon())
        .or_not();
    let import = keyword_import()
        .ignore_then(keyword_static().or_not())
        .ignore_then(import_target())
        .then_ignore(token_semicolon());

    package
        .then(import.repeated())
        .then(
            type_declaration()
                .then_ignore(token_semicolon().repeated())
                .repeated(),
        )
        .then_ignore(token_eof())
        .map(|((package, imports), types)| builder::compile_unit(package, imports, types))
}
