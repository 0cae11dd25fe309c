#![allow(clippy::needless_return)]

use proc_macro2::{Delimiter, Ident, TokenStream, TokenTree};
use proc_macro_error::{abort, abort_call_site, proc_macro_error};
use quote::quote;

/// Turns `Kind` or `Kind("text")` entries into token constructors.
fn token_list(input: TokenStream) -> TokenStream {
    let mut i = input.into_iter().peekable();
    let mut tokens = Vec::new();

    while let Some(tt) = i.next() {
        let TokenTree::Ident(kind) = tt else {
            abort!(tt, "expected token kind");
        };

        let text = match i.peek() {
            Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Parenthesis => {
                let text = match syn::parse2::<syn::LitStr>(g.stream()) {
                    Ok(text) => text,
                    Err(e) => abort!(g, "token text must be a string literal: {}", e),
                };
                i.next();
                Some(text)
            }
            _ => None,
        };

        tokens.push(match text {
            Some(text) => quote!(Token::new(TokenKind::#kind, #text)),
            None => quote!(Token::punct(TokenKind::#kind)),
        });

        match i.next() {
            None => break,
            Some(TokenTree::Punct(p)) if p.as_char() == ',' => {}
            Some(tt) => abort!(tt, "expected comma between tokens"),
        }
    }

    return quote!(vec![#(#tokens),*]);
}

/// Expects a `[...]` group of tokens.
fn bracketed_tokens(tt: TokenTree) -> TokenStream {
    let TokenTree::Group(g) = tt else {
        abort!(tt, "first value must be a bracketed token list");
    };
    if g.delimiter() != Delimiter::Bracket {
        abort!(g, "token list must be delimited by brackets");
    }
    return token_list(g.stream());
}

fn expect_comma(tt: Option<TokenTree>, msg: &str) {
    match tt {
        Some(TokenTree::Punct(p)) if p.as_char() == ',' => {}
        Some(tt) => abort!(tt, "expected comma"),
        None => abort_call_site!(msg),
    }
}

/// `ident` or `ident(args)` naming a `parse_*` production.
fn production(
    i: &mut std::iter::Peekable<proc_macro2::token_stream::IntoIter>,
) -> (Ident, TokenStream) {
    let tt = i
        .next()
        .unwrap_or_else(|| abort_call_site!("must pass token list and ident for parsing func"));
    let TokenTree::Ident(id) = tt else {
        abort!(tt, "expected ident");
    };

    let args = match i.peek() {
        Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Parenthesis => {
            let stream = g.stream();
            i.next();
            stream
        }
        Some(TokenTree::Group(g)) => abort!(
            g,
            "when including arguments for parse func, must be parenthesis delimited group"
        ),
        _ => quote!(),
    };

    let fun = Ident::new(&format!("parse_{}", id), id.span());
    return (fun, args);
}

/// `tokens![ClassSelector("x"), BraceStart, BraceEnd]`
///
/// Expects `Token` and `TokenKind` in scope.
#[proc_macro_error]
#[proc_macro]
pub fn tokens(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    return token_list(proc_macro2::TokenStream::from(input)).into();
}

/// `assert_parse_node!([tokens...], production(args))`, evaluates to the node.
#[proc_macro_error]
#[proc_macro]
pub fn assert_parse_node(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let mut i = proc_macro2::TokenStream::from(input).into_iter().peekable();

    let tt = i
        .next()
        .unwrap_or_else(|| abort_call_site!("must pass token list and ident for parsing func"));
    let tokens = bracketed_tokens(tt);
    expect_comma(i.next(), "must pass token list and ident seperated by comma");

    let (fun, args) = production(&mut i);
    if let Some(tt) = i.next() {
        abort!(tt, "unexpected trailing input");
    }

    return quote!(assert_node(#tokens, |parser: &mut Parser| parser.#fun(#args))).into();
}

/// `assert_parse_error!([tokens...], production(args), ErrorKind)`, evaluates
/// to the error.
#[proc_macro_error]
#[proc_macro]
pub fn assert_parse_error(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let mut i = proc_macro2::TokenStream::from(input).into_iter().peekable();

    let tt = i
        .next()
        .unwrap_or_else(|| abort_call_site!("must pass token list, parse ident, and error ident"));
    let tokens = bracketed_tokens(tt);
    expect_comma(i.next(), "must pass token list and ident seperated by comma");

    let (fun, args) = production(&mut i);
    expect_comma(
        i.next(),
        "must pass comma-seperated token list, parsing func ident, error ident",
    );

    let tt = i
        .next()
        .unwrap_or_else(|| abort_call_site!("expected 3rd argument for error ident"));
    let TokenTree::Ident(error_ident) = tt else {
        abort!(tt, "expected error ident");
    };
    if let Some(tt) = i.next() {
        abort!(tt, "unexpected trailing input");
    }

    return quote!(assert_error(
        #tokens,
        |parser: &mut Parser| parser.#fun(#args),
        ParseErrorKind::#error_ident
    ))
    .into();
}
