//! Component-value tokens
//!
//! Validators work on an owned token tree rather than on the borrowed
//! `cssparser` tokens, so that values can be stored untouched while a
//! `var()` substitution is pending and replayed later.

use cssparser::{ParseError, Parser, ParserInput, Token as CssToken};
use serde::Serialize;
use std::fmt::{self, Write};

/// A number with its integer form, when it was written as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Numeric {
    pub value: f32,
    pub int_value: Option<i32>,
}

impl Numeric {
    pub fn new(value: f32) -> Self {
        let int_value = if value.fract() == 0.0 && value.abs() < i32::MAX as f32 {
            Some(value as i32)
        } else {
            None
        };
        Self { value, int_value }
    }

    pub fn float(value: f32) -> Self {
        Self {
            value,
            int_value: None,
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.int_value {
            Some(i) => write!(f, "{}", i),
            None => write!(f, "{}", self.value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Token {
    Ident(String),
    String(String),
    Number(Numeric),
    /// Value is expressed in percents: `20%` is stored as `20`.
    Percentage(Numeric),
    Dimension { value: Numeric, unit: String },
    Hash(String),
    Function { name: String, args: Vec<Token> },
    Url(String),
    Literal(String),
    Whitespace,
    SquareBracketsBlock(Vec<Token>),
    ParenthesesBlock(Vec<Token>),
    CurlyBracketsBlock(Vec<Token>),
    ParseError(String),
}

impl Token {
    pub fn ident(name: impl Into<String>) -> Self {
        Token::Ident(name.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Token::Literal(value.into())
    }

    pub fn number(value: f32) -> Self {
        Token::Number(Numeric::new(value))
    }

    pub fn percentage(value: f32) -> Self {
        Token::Percentage(Numeric::new(value))
    }

    pub fn dimension(value: f32, unit: &str) -> Self {
        Token::Dimension {
            value: Numeric::new(value),
            unit: unit.to_ascii_lowercase(),
        }
    }

    pub fn function(name: &str, args: Vec<Token>) -> Self {
        Token::Function {
            name: name.to_ascii_lowercase(),
            args,
        }
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Token::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Lowercased identifier value.
    pub fn keyword(&self) -> Option<String> {
        self.as_ident().map(str::to_ascii_lowercase)
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Token::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Numeric> {
        match self {
            Token::Number(numeric) => Some(*numeric),
            _ => None,
        }
    }

    /// Integer value of a number token written without a fractional part.
    pub fn as_int(&self) -> Option<i32> {
        self.as_number().and_then(|n| n.int_value)
    }

    pub fn is_literal(&self, value: &str) -> bool {
        matches!(self, Token::Literal(v) if v == value)
    }

    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace)
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Token::Ident(name) if name.eq_ignore_ascii_case(keyword))
    }

    pub fn function_name(&self) -> Option<&str> {
        match self {
            Token::Function { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => cssparser::serialize_identifier(name, f),
            Token::String(value) => cssparser::serialize_string(value, f),
            Token::Number(numeric) => write!(f, "{}", numeric),
            Token::Percentage(numeric) => write!(f, "{}%", numeric),
            Token::Dimension { value, unit } => write!(f, "{}{}", value, unit),
            Token::Hash(value) => write!(f, "#{}", value),
            Token::Function { name, args } => {
                write!(f, "{}(", name)?;
                write_tokens(f, args)?;
                f.write_char(')')
            }
            Token::Url(url) => {
                f.write_str("url(")?;
                cssparser::serialize_string(url, f)?;
                f.write_char(')')
            }
            Token::Literal(value) => f.write_str(value),
            Token::Whitespace => f.write_char(' '),
            Token::SquareBracketsBlock(inner) => {
                f.write_char('[')?;
                write_tokens(f, inner)?;
                f.write_char(']')
            }
            Token::ParenthesesBlock(inner) => {
                f.write_char('(')?;
                write_tokens(f, inner)?;
                f.write_char(')')
            }
            Token::CurlyBracketsBlock(inner) => {
                f.write_char('{')?;
                write_tokens(f, inner)?;
                f.write_char('}')
            }
            Token::ParseError(_) => Ok(()),
        }
    }
}

fn write_tokens(f: &mut fmt::Formatter<'_>, tokens: &[Token]) -> fmt::Result {
    for token in tokens {
        write!(f, "{}", token)?;
    }
    Ok(())
}

/// Serializes tokens back to CSS text, for log messages.
pub fn serialize(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}

/// Tokenizes a CSS component value list.
pub fn tokenize(css: &str) -> Vec<Token> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    collect_tokens(&mut parser)
}

fn collect_tokens(parser: &mut Parser<'_, '_>) -> Vec<Token> {
    let mut tokens = Vec::new();
    loop {
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        let converted = match token {
            CssToken::Ident(name) => Token::Ident(name.to_string()),
            CssToken::AtKeyword(name) => Token::Literal(format!("@{}", name)),
            CssToken::Hash(value) | CssToken::IDHash(value) => Token::Hash(value.to_string()),
            CssToken::QuotedString(value) => Token::String(value.to_string()),
            CssToken::UnquotedUrl(url) => Token::Url(url.to_string()),
            CssToken::Delim(c) => Token::Literal(c.to_string()),
            CssToken::Number {
                value, int_value, ..
            } => Token::Number(Numeric { value, int_value }),
            CssToken::Percentage {
                unit_value,
                int_value,
                ..
            } => Token::Percentage(Numeric {
                value: int_value.map_or(unit_value * 100.0, |i| i as f32),
                int_value,
            }),
            CssToken::Dimension {
                value,
                int_value,
                unit,
                ..
            } => Token::Dimension {
                value: Numeric { value, int_value },
                unit: unit.to_ascii_lowercase(),
            },
            CssToken::WhiteSpace(_) => Token::Whitespace,
            CssToken::Comment(_) => continue,
            CssToken::Colon => Token::literal(":"),
            CssToken::Semicolon => Token::literal(";"),
            CssToken::Comma => Token::literal(","),
            CssToken::IncludeMatch => Token::literal("~="),
            CssToken::DashMatch => Token::literal("|="),
            CssToken::PrefixMatch => Token::literal("^="),
            CssToken::SuffixMatch => Token::literal("$="),
            CssToken::SubstringMatch => Token::literal("*="),
            CssToken::CDO => Token::literal("<!--"),
            CssToken::CDC => Token::literal("-->"),
            CssToken::Function(name) => Token::Function {
                name: name.to_ascii_lowercase(),
                args: collect_nested(parser),
            },
            CssToken::ParenthesisBlock => Token::ParenthesesBlock(collect_nested(parser)),
            CssToken::SquareBracketBlock => Token::SquareBracketsBlock(collect_nested(parser)),
            CssToken::CurlyBracketBlock => Token::CurlyBracketsBlock(collect_nested(parser)),
            CssToken::BadUrl(_) => Token::ParseError("bad-url".to_string()),
            CssToken::BadString(_) => Token::ParseError("bad-string".to_string()),
            CssToken::CloseParenthesis
            | CssToken::CloseSquareBracket
            | CssToken::CloseCurlyBracket => Token::ParseError("unmatched closing bracket".to_string()),
        };
        tokens.push(converted);
    }
    tokens
}

fn collect_nested(parser: &mut Parser<'_, '_>) -> Vec<Token> {
    parser
        .parse_nested_block(|nested| Ok::<_, ParseError<'_, ()>>(collect_tokens(nested)))
        .unwrap_or_default()
}

pub fn remove_whitespace(tokens: &[Token]) -> Vec<Token> {
    tokens.iter().filter(|t| !t.is_whitespace()).cloned().collect()
}

/// Splits on a literal delimiter. Always returns at least one (possibly empty) part.
pub fn split_on_literal(tokens: &[Token], delimiter: &str) -> Vec<Vec<Token>> {
    let mut parts = Vec::new();
    let mut current = Vec::new();
    for token in tokens {
        if token.is_literal(delimiter) {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(token.clone());
        }
    }
    parts.push(current);
    parts
}

pub fn split_on_comma(tokens: &[Token]) -> Vec<Vec<Token>> {
    split_on_literal(tokens, ",")
}

/// Returns the lowercase name and arguments of a function token.
///
/// Whitespace is dropped and commas between arguments are optional, but
/// two commas in a row, a trailing comma or an invalid nested function
/// make the whole function invalid.
pub fn parse_function(token: &Token) -> Option<(&str, Vec<Token>)> {
    let (name, args) = match token {
        Token::Function { name, args } => (name, args),
        _ => return None,
    };
    let mut arguments = Vec::new();
    let mut last_is_comma = false;
    for arg in args.iter().filter(|t| !t.is_whitespace()) {
        let is_comma = arg.is_literal(",");
        if is_comma {
            if last_is_comma {
                return None;
            }
            last_is_comma = true;
            continue;
        }
        last_is_comma = false;
        if matches!(arg, Token::Function { .. }) {
            parse_function(arg)?;
        }
        arguments.push(arg.clone());
    }
    if last_is_comma {
        return None;
    }
    Some((name.as_str(), arguments))
}

/// True when the token is, or contains, a `var(--name)` reference.
pub fn has_var(token: &Token) -> bool {
    match token {
        Token::Function { name, args } => {
            if name == "var" {
                let first = args.iter().find(|t| !t.is_whitespace());
                if let Some(Token::Ident(ident)) = first {
                    if ident.starts_with("--") {
                        return true;
                    }
                }
            }
            args.iter().any(has_var)
        }
        Token::SquareBracketsBlock(inner)
        | Token::ParenthesesBlock(inner)
        | Token::CurlyBracketsBlock(inner) => inner.iter().any(has_var),
        _ => false,
    }
}

pub fn tokens_have_var(tokens: &[Token]) -> bool {
    tokens.iter().any(has_var)
}

/// One `name: value [!important]` entry of a declaration block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawDeclaration {
    pub name: String,
    pub value: Vec<Token>,
    pub important: bool,
}

impl RawDeclaration {
    pub fn new(name: impl Into<String>, css_value: &str) -> Self {
        Self {
            name: name.into(),
            value: tokenize(css_value),
            important: false,
        }
    }
}

/// Parses the content of a declaration block (without braces).
///
/// Malformed entries are logged and skipped.
pub fn parse_declaration_list(css: &str) -> Vec<RawDeclaration> {
    let tokens = tokenize(css);
    let mut declarations = Vec::new();
    for chunk in split_on_literal(&tokens, ";") {
        let mut rest = chunk.iter().skip_while(|t| t.is_whitespace());
        let name = match rest.next() {
            None => continue,
            Some(Token::Ident(name)) => name.clone(),
            Some(other) => {
                log::warn!(
                    "Ignored declaration starting with `{}`, expected a property name.",
                    other
                );
                continue;
            }
        };
        let mut rest = rest.skip_while(|t| t.is_whitespace());
        if !matches!(rest.next(), Some(t) if t.is_literal(":")) {
            log::warn!("Ignored declaration `{}`, expected ':' after the name.", name);
            continue;
        }
        let mut value: Vec<Token> = rest.cloned().collect();
        let important = strip_important(&mut value);
        declarations.push(RawDeclaration {
            name,
            value,
            important,
        });
    }
    declarations
}

fn strip_important(value: &mut Vec<Token>) -> bool {
    let significant: Vec<usize> = value
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.is_whitespace())
        .map(|(i, _)| i)
        .collect();
    if let [.., bang, last] = significant.as_slice() {
        if value[*last].is_keyword("important") && value[*bang].is_literal("!") {
            value.truncate(*bang);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_dimensions() {
        let tokens = remove_whitespace(&tokenize("1em -2PX 20% 3"));
        assert_eq!(tokens[0], Token::dimension(1.0, "em"));
        assert_eq!(tokens[1], Token::dimension(-2.0, "px"));
        assert_eq!(tokens[2], Token::percentage(20.0));
        assert_eq!(tokens[3].as_int(), Some(3));
    }

    #[test]
    fn test_tokenize_functions() {
        let tokens = tokenize("URL(foo.png) Rgb(1, 2, 3) url(\"bar\")");
        assert_eq!(tokens[0], Token::Url("foo.png".to_string()));
        match &tokens[2] {
            Token::Function { name, args } => {
                assert_eq!(name, "rgb");
                assert_eq!(remove_whitespace(args).len(), 5);
            }
            _ => panic!("Expected function token"),
        }
        assert_eq!(tokens[4].function_name(), Some("url"));
    }

    #[test]
    fn test_comments_skipped() {
        let tokens = remove_whitespace(&tokenize("a /* comment */ b"));
        assert_eq!(tokens, vec![Token::ident("a"), Token::ident("b")]);
    }

    #[test]
    fn test_parse_function_commas() {
        let ok = &tokenize("counter(a, decimal)")[0];
        let (name, args) = parse_function(ok).unwrap();
        assert_eq!(name, "counter");
        assert_eq!(args, vec![Token::ident("a"), Token::ident("decimal")]);

        assert!(parse_function(&tokenize("f(a,,b)")[0]).is_none());
        assert!(parse_function(&tokenize("f(a,)")[0]).is_none());
        assert!(parse_function(&tokenize("f(g(a,,b))")[0]).is_none());
        assert!(parse_function(&Token::ident("f")).is_none());
    }

    #[test]
    fn test_has_var() {
        assert!(tokens_have_var(&tokenize("1px var(--x)")));
        assert!(tokens_have_var(&tokenize("calc(1px + var(--x, 2px))")));
        assert!(!tokens_have_var(&tokenize("var(x)")));
        assert!(!tokens_have_var(&tokenize("1px solid red")));
    }

    #[test]
    fn test_split_on_comma() {
        let parts = split_on_comma(&remove_whitespace(&tokenize("a b, c")));
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].len(), 2);
        assert_eq!(parts[1], vec![Token::ident("c")]);
    }

    #[test]
    fn test_declaration_list() {
        let declarations =
            parse_declaration_list("color: red; margin : 1em !important;; --Custom: x ;");
        assert_eq!(declarations.len(), 3);
        assert_eq!(declarations[0].name, "color");
        assert!(!declarations[0].important);
        assert_eq!(declarations[1].name, "margin");
        assert!(declarations[1].important);
        assert_eq!(remove_whitespace(&declarations[1].value), vec![Token::dimension(1.0, "em")]);
        assert_eq!(declarations[2].name, "--Custom");
    }

    #[test]
    fn test_declaration_list_skips_malformed() {
        let declarations = parse_declaration_list("12px: a; color red; width: 1px");
        assert_eq!(declarations.len(), 1);
        assert_eq!(declarations[0].name, "width");
    }

    #[test]
    fn test_serialize() {
        let tokens = tokenize("1px solid \"a b\" rgb(1,2,3)");
        assert_eq!(serialize(&tokens), "1px solid \"a b\" rgb(1,2,3)");
    }
}
