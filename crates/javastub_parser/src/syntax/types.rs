use chumsky::error::Simple;
use chumsky::prelude::*;
use chumsky::Parser as ChumskyParser;
use javastub_lexer::Token;

use super::tokens::{
    dotted_identifier, keyword_extends, keyword_super, token_ampersand, token_comma,
    token_ellipsis, token_greater, token_left_bracket, token_less, token_question,
    token_right_bracket,
};

/// A type reference rendered back to its declaration text.
///
/// Covers dotted names, generic arguments, array brackets and the vararg
/// ellipsis: `java.util.Map<K, ? extends V>[]`, `java.lang.Object...`.
pub fn type_ref() -> impl ChumskyParser<Token, String, Error = Simple<Token>> + Clone {
    recursive(|ty| {
        let suffix = choice((
            token_left_bracket()
                .then(token_right_bracket())
                .to("[]"),
            token_ellipsis().to("..."),
        ));

        dotted_identifier()
            .then(type_arguments(ty).or_not())
            .map(|(name, arguments)| match arguments {
                Some(arguments) => format!("{name}<{}>", arguments.join(", ")),
                None => name,
            })
            .then(suffix.repeated())
            .map(|(base, suffixes)| {
                suffixes
                    .into_iter()
                    .fold(base, |rendered, suffix| rendered + suffix)
            })
    })
    .boxed()
}

/// `<...>` list; each argument is returned as its declaration text.
///
/// Arguments may be wildcards (`?`, `? extends T`, `? super T`) or bounded
/// parameters (`T extends A & B`).
pub fn type_arguments<P>(
    ty: P,
) -> impl ChumskyParser<Token, Vec<String>, Error = Simple<Token>> + Clone
where
    P: ChumskyParser<Token, String, Error = Simple<Token>> + Clone,
{
    let head = choice((token_question().to("?".to_string()), ty.clone()));
    let bound = choice((
        keyword_extends()
            .ignore_then(
                ty.clone()
                    .separated_by(token_ampersand())
                    .at_least(1),
            )
            .map(|bounds| format!(" extends {}", bounds.join(" & "))),
        keyword_super()
            .ignore_then(ty)
            .map(|bound| format!(" super {bound}")),
    ));

    head.then(bound.or_not())
        .map(|(head, bound)| match bound {
            Some(bound) => head + &bound,
            None => head,
        })
        .separated_by(token_comma())
        .at_least(1)
        .delimited_by(token_less(), token_greater())
}

/// Generic argument list parsed with a fresh [`type_ref`].
pub fn generic_list() -> impl ChumskyParser<Token, Vec<String>, Error = Simple<Token>> + Clone {
    type_arguments(type_ref())
}
