// FILE: src/validation/content.rs

use super::helpers::{
    check_attr_function, get_custom_ident, get_keyword, get_single_keyword, get_url,
    split_on_optional_comma,
};
use super::images::get_image;
use crate::core::values::{
    ContentItem, CounterStyle, CssProperty, KeywordOr, NamedContent, QuotePairs,
};
use crate::error::{Result, ValidationError};
use crate::tokens::{parse_function, remove_whitespace, split_on_comma, Token};

const SYMBOLS_SYSTEMS: &[&str] = &["cyclic", "numeric", "alphabetic", "symbolic", "fixed"];

/// Parses a `<counter-style>`: a name, a literal string or `symbols()`.
pub fn list_style_type(tokens: &[Token]) -> Option<CounterStyle> {
    let token = match tokens {
        [token] => token,
        _ => return None,
    };
    match token {
        Token::Ident(name) => Some(CounterStyle::Name { name: name.clone() }),
        Token::String(value) => Some(CounterStyle::Literal {
            value: value.clone(),
        }),
        Token::Function { name, args } if name == "symbols" => {
            let args = remove_whitespace(args);
            let mut args = args.as_slice();
            let mut system = "symbolic".to_string();
            if let Some(Token::Ident(ident)) = args.first() {
                if !SYMBOLS_SYSTEMS.contains(&ident.as_str()) {
                    return None;
                }
                system = ident.clone();
                args = &args[1..];
            }
            let symbols = args
                .iter()
                .map(|arg| arg.as_string().map(str::to_string))
                .collect::<Option<Vec<_>>>()?;
            let minimum = if matches!(system.as_str(), "alphabetic" | "numeric") {
                2
            } else {
                1
            };
            if symbols.len() < minimum {
                return None;
            }
            Some(CounterStyle::Symbols { system, symbols })
        }
        _ => None,
    }
}

/// Parses a `<string>`: a literal, `attr()`, `counter()`, `counters()`,
/// `content()` or `string()`.
pub fn get_string(token: &Token) -> Option<ContentItem> {
    match token {
        Token::String(value) => Some(ContentItem::string(value)),
        Token::Function { name, .. } => match name.as_str() {
            "attr" => check_attr_function(token, Some("string")).map(ContentItem::Attr),
            "counter" | "counters" => check_counter_function(token),
            "content" => check_content_function(token),
            "string" => check_string_or_element_function("string", token),
            _ => None,
        },
        _ => None,
    }
}

fn check_counter_function(token: &Token) -> Option<ContentItem> {
    let (name, args) = parse_function(token)?;
    let valid_count = match name {
        "counter" => matches!(args.len(), 1 | 2),
        "counters" => matches!(args.len(), 2 | 3),
        _ => false,
    };
    if !valid_count {
        return None;
    }
    let mut rest = args.iter();
    let counter_name = rest.next()?.as_ident()?.to_string();
    let separator = if name == "counters" {
        Some(rest.next()?.as_string()?.to_string())
    } else {
        None
    };
    let style = match rest.next() {
        Some(style) => list_style_type(std::slice::from_ref(style))?,
        None => CounterStyle::name("decimal"),
    };
    Some(match separator {
        None => ContentItem::Counter {
            name: counter_name,
            style,
        },
        Some(separator) => ContentItem::Counters {
            name: counter_name,
            separator,
            style,
        },
    })
}

fn check_content_function(token: &Token) -> Option<ContentItem> {
    let (name, args) = parse_function(token)?;
    if name != "content" {
        return None;
    }
    match args.as_slice() {
        [] => Some(ContentItem::content("text")),
        [part] => {
            let part = get_keyword(part)?;
            match part.as_str() {
                "text" | "before" | "after" | "first-letter" | "marker" => {
                    Some(ContentItem::content(&part))
                }
                _ => None,
            }
        }
        _ => None,
    }
}

fn check_string_or_element_function(kind: &str, token: &Token) -> Option<ContentItem> {
    let (name, args) = parse_function(token)?;
    if name != kind || !matches!(args.len(), 1 | 2) {
        return None;
    }
    let custom_ident = args[0].as_ident()?.to_string();
    let keyword = match args.get(1) {
        Some(arg) => {
            let keyword = get_keyword(arg)?;
            if !matches!(keyword.as_str(), "first" | "start" | "last" | "first-except") {
                return None;
            }
            keyword
        }
        None => "first".to_string(),
    };
    Some(if kind == "string" {
        ContentItem::StringRef {
            name: custom_ident,
            keyword,
        }
    } else {
        ContentItem::Element {
            name: custom_ident,
            keyword,
        }
    })
}

fn get_quote(token: &Token) -> Option<ContentItem> {
    let (open, insert) = match get_keyword(token)?.as_str() {
        "open-quote" => (true, true),
        "close-quote" => (false, true),
        "no-open-quote" => (true, false),
        "no-close-quote" => (false, false),
        _ => return None,
    };
    Some(ContentItem::Quote { open, insert })
}

fn get_target(token: &Token, base_url: &str) -> Result<Option<ContentItem>> {
    let (name, args) = match parse_function(token) {
        Some(parsed) => parsed,
        None => return Ok(None),
    };
    let args = match split_on_optional_comma(&args) {
        Some(args) if !args.is_empty() => args,
        _ => return Ok(None),
    };
    let count_ok = match name {
        "target-counter" => matches!(args.len(), 2 | 3),
        "target-counters" => matches!(args.len(), 3 | 4),
        "target-text" => matches!(args.len(), 1 | 2),
        _ => false,
    };
    if !count_ok {
        return Ok(None);
    }

    let link = match get_string(&args[0]) {
        Some(link) => link,
        None => match get_url(&args[0], base_url)? {
            Some(target) => ContentItem::Url { target },
            None => return Ok(None),
        },
    };
    let link = Box::new(link);
    let mut rest = args[1..].iter();

    if name == "target-text" {
        let keyword = match rest.next() {
            Some(arg) => match get_keyword(arg) {
                Some(k) if matches!(k.as_str(), "content" | "before" | "after" | "first-letter") => k,
                _ => return Ok(None),
            },
            None => "content".to_string(),
        };
        return Ok(Some(ContentItem::TargetText { link, keyword }));
    }

    let counter = match rest.next().and_then(Token::as_ident) {
        Some(counter) => counter.to_string(),
        None => return Ok(None),
    };
    let separator = if name == "target-counters" {
        match rest.next().and_then(get_string) {
            Some(separator) => Some(Box::new(separator)),
            None => return Ok(None),
        }
    } else {
        None
    };
    let style = match rest.next() {
        Some(arg) => match get_keyword(arg) {
            Some(style) => style,
            None => return Ok(None),
        },
        None => "decimal".to_string(),
    };
    Ok(Some(match separator {
        None => ContentItem::TargetCounter {
            link,
            counter,
            style,
        },
        Some(separator) => ContentItem::TargetCounters {
            link,
            counter,
            separator,
            style,
        },
    }))
}

fn get_leader(token: &Token) -> Option<ContentItem> {
    let (name, args) = parse_function(token)?;
    if name != "leader" {
        return None;
    }
    let value = match args.as_slice() {
        [Token::Ident(style)] => match style.as_str() {
            "dotted" => ".",
            "solid" => "_",
            "space" => " ",
            _ => return None,
        }
        .to_string(),
        [Token::String(value)] => value.clone(),
        _ => return None,
    };
    Some(ContentItem::Leader { value })
}

/// Parses one item of a `<content-list>`.
pub fn get_content_list_token(token: &Token, base_url: &str) -> Result<Option<ContentItem>> {
    if let Some(string) = get_string(token) {
        return Ok(Some(string));
    }
    if token.is_keyword("contents") {
        return Ok(Some(ContentItem::content("text")));
    }
    if let Some(target) = get_url(token, base_url)? {
        return Ok(Some(ContentItem::Url { target }));
    }
    if let Some(quote) = get_quote(token) {
        return Ok(Some(quote));
    }
    if let Some(target) = get_target(token, base_url)? {
        return Ok(Some(target));
    }
    Ok(get_leader(token).or_else(|| check_string_or_element_function("element", token)))
}

pub fn get_content_list(tokens: &[Token], base_url: &str) -> Result<Option<Vec<ContentItem>>> {
    let mut items = Vec::with_capacity(tokens.len());
    for token in tokens {
        match get_content_list_token(token, base_url)? {
            Some(item) => items.push(item),
            None => return Ok(None),
        }
    }
    Ok(Some(items))
}

/// `content`: leading `<image> ,` fallbacks and a trailing `/ "alt"` text
/// are accepted and dropped.
pub fn content(tokens: &[Token], base_url: &str) -> Result<Option<CssProperty>> {
    let mut tokens = tokens;
    while tokens.len() >= 2 && tokens[1].is_literal(",") {
        let fallback = &tokens[0];
        tokens = &tokens[2..];
        if get_image(fallback, base_url)?.is_none() && get_url(fallback, base_url)?.is_none() {
            return Ok(None);
        }
    }
    if tokens.is_empty() {
        return Ok(None);
    }
    if let [head @ .., slash, Token::String(_)] = tokens {
        if !head.is_empty() && slash.is_literal("/") {
            tokens = head;
        }
    }

    if let Some(keyword) = get_single_keyword(tokens) {
        if keyword == "normal" || keyword == "none" {
            return Ok(Some(CssProperty::Content(KeywordOr::Keyword(keyword))));
        }
    }
    Ok(get_content_list(tokens, base_url)?
        .map(|items| CssProperty::Content(KeywordOr::Values(items))))
}

pub fn bookmark_label(tokens: &[Token], base_url: &str) -> Result<Option<CssProperty>> {
    Ok(get_content_list(tokens, base_url)?.map(CssProperty::ContentList))
}

/// `string-set`: `none` or a comma list of `<custom-ident> <content-list>`.
pub fn string_set(tokens: &[Token], base_url: &str) -> Result<Option<CssProperty>> {
    if get_single_keyword(tokens).as_deref() == Some("none") {
        return Ok(Some(CssProperty::StringSet(KeywordOr::keyword("none"))));
    }
    let mut sets = Vec::new();
    for part in split_on_comma(tokens) {
        let part = remove_whitespace(&part);
        if part.len() < 2 {
            return Ok(None);
        }
        let name = match get_custom_ident(&part[0]) {
            Some(name) => name,
            None => return Ok(None),
        };
        match get_content_list(&part[1..], base_url)? {
            Some(content) => sets.push(NamedContent { name, content }),
            None => return Ok(None),
        }
    }
    Ok(Some(CssProperty::StringSet(KeywordOr::Values(sets))))
}

pub fn quotes(tokens: &[Token]) -> Option<CssProperty> {
    if let Some(keyword) = get_single_keyword(tokens) {
        if keyword == "auto" || keyword == "none" {
            return Some(CssProperty::Quotes(KeywordOr::Keyword(keyword)));
        }
    }
    if tokens.is_empty() || tokens.len() % 2 != 0 {
        return None;
    }
    let mut pairs = QuotePairs {
        open: Vec::new(),
        close: Vec::new(),
    };
    for chunk in tokens.chunks(2) {
        pairs.open.push(chunk[0].as_string()?.to_string());
        pairs.close.push(chunk[1].as_string()?.to_string());
    }
    Some(CssProperty::Quotes(KeywordOr::Values(pairs)))
}

/// `counter-increment`, `counter-reset` and `counter-set`: `none` or
/// `<custom-ident> <integer>?` pairs, the integer defaulting to `default_value`.
pub fn counters(tokens: &[Token], default_value: i32) -> Result<Option<CssProperty>> {
    if get_single_keyword(tokens).as_deref() == Some("none") {
        return Ok(Some(CssProperty::Counters(KeywordOr::Values(Vec::new()))));
    }
    if tokens.is_empty() {
        return Err(ValidationError::invalid("got an empty token list"));
    }
    let mut results = Vec::new();
    let mut iter = tokens.iter().peekable();
    while let Some(token) = iter.next() {
        let name = match token.as_ident() {
            Some(name) => name,
            None => return Ok(None),
        };
        if matches!(name, "none" | "initial" | "inherit") {
            return Err(ValidationError::invalid(format!(
                "invalid counter name: {}",
                name
            )));
        }
        let value = match iter.peek().and_then(|t| t.as_int()) {
            Some(value) => {
                iter.next();
                value
            }
            None => default_value,
        };
        results.push((name.to_string(), value));
    }
    Ok(Some(CssProperty::Counters(KeywordOr::Values(results))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::values::Reference;
    use crate::tokens::tokenize;

    const BASE: &str = "https://example.org/";

    fn tokens(css: &str) -> Vec<Token> {
        remove_whitespace(&tokenize(css))
    }

    #[test]
    fn test_list_style_type() {
        assert_eq!(list_style_type(&tokens("disc")), Some(CounterStyle::name("disc")));
        assert_eq!(
            list_style_type(&tokens("\"-\"")),
            Some(CounterStyle::Literal {
                value: "-".to_string()
            })
        );
        assert_eq!(
            list_style_type(&tokens("symbols(cyclic \"*\" \"+\")")),
            Some(CounterStyle::Symbols {
                system: "cyclic".to_string(),
                symbols: vec!["*".to_string(), "+".to_string()]
            })
        );
        assert!(list_style_type(&tokens("symbols(\"*\")")).is_some());
        assert!(list_style_type(&tokens("symbols(numeric \"0\")")).is_none());
        assert!(list_style_type(&tokens("symbols(other \"0\")")).is_none());
        assert!(list_style_type(&tokens("symbols()")).is_none());
    }

    #[test]
    fn test_counter_functions() {
        assert_eq!(
            get_string(&tokens("counter(chapter)")[0]),
            Some(ContentItem::Counter {
                name: "chapter".to_string(),
                style: CounterStyle::name("decimal")
            })
        );
        assert_eq!(
            get_string(&tokens("counters(item, \".\", upper-roman)")[0]),
            Some(ContentItem::Counters {
                name: "item".to_string(),
                separator: ".".to_string(),
                style: CounterStyle::name("upper-roman")
            })
        );
        assert!(get_string(&tokens("counters(item)")[0]).is_none());
        assert!(get_string(&tokens("counter(item, 3)")[0]).is_none());
    }

    #[test]
    fn test_content_list_items() {
        let items = get_content_list(
            &tokens("\"a\" attr(title) content(before) string(h1, last) open-quote leader(dotted) contents"),
            BASE,
        )
        .unwrap()
        .unwrap();
        assert_eq!(items.len(), 7);
        assert_eq!(items[2], ContentItem::content("before"));
        assert_eq!(
            items[3],
            ContentItem::StringRef {
                name: "h1".to_string(),
                keyword: "last".to_string()
            }
        );
        assert_eq!(items[4], ContentItem::Quote { open: true, insert: true });
        assert_eq!(items[5], ContentItem::Leader { value: ".".to_string() });
        assert_eq!(items[6], ContentItem::content("text"));

        assert_eq!(get_content_list(&tokens("\"a\" 3px"), BASE).unwrap(), None);
    }

    #[test]
    fn test_targets() {
        let item = get_content_list_token(
            &tokens("target-counter(attr(href url), page)")[0],
            BASE,
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            item,
            ContentItem::TargetCounter {
                link: Box::new(ContentItem::Url {
                    target: Reference::Attr("href".to_string())
                }),
                counter: "page".to_string(),
                style: "decimal".to_string()
            }
        );
        let item = get_content_list_token(&tokens("target-text(\"#intro\", before)")[0], BASE)
            .unwrap()
            .unwrap();
        assert!(matches!(item, ContentItem::TargetText { ref keyword, .. } if keyword == "before"));
        assert_eq!(
            get_content_list_token(&tokens("target-counters(url(#a), page)")[0], BASE).unwrap(),
            None
        );
    }

    #[test]
    fn test_content_property() {
        assert_eq!(
            content(&tokens("normal"), BASE).unwrap(),
            Some(CssProperty::Content(KeywordOr::keyword("normal")))
        );
        assert_eq!(
            content(&tokens("url(a.png), \"x\" / \"alt\""), BASE).unwrap(),
            Some(CssProperty::Content(KeywordOr::Values(vec![ContentItem::string("x")])))
        );
        assert_eq!(content(&tokens("3px"), BASE).unwrap(), None);
        assert_eq!(content(&tokens("\"a\", \"b\""), BASE).unwrap(), None);
    }

    #[test]
    fn test_string_set() {
        match string_set(&tokens("header content(), footer \"x\" counter(page)"), BASE).unwrap() {
            Some(CssProperty::StringSet(KeywordOr::Values(sets))) => {
                assert_eq!(sets.len(), 2);
                assert_eq!(sets[0].name, "header");
                assert_eq!(sets[1].content.len(), 2);
            }
            other => panic!("Expected string set, got {:?}", other),
        }
        assert_eq!(string_set(&tokens("header"), BASE).unwrap(), None);
    }

    #[test]
    fn test_quotes() {
        assert_eq!(
            quotes(&tokens("\"«\" \"»\" \"'\" \"'\"")),
            Some(CssProperty::Quotes(KeywordOr::Values(QuotePairs {
                open: vec!["«".to_string(), "'".to_string()],
                close: vec!["»".to_string(), "'".to_string()],
            })))
        );
        assert!(quotes(&tokens("\"«\"")).is_none());
        assert!(quotes(&tokens("none")).is_some());
    }

    #[test]
    fn test_counters() {
        assert_eq!(
            counters(&tokens("foo bar 2 baz"), 1).unwrap(),
            Some(CssProperty::Counters(KeywordOr::Values(vec![
                ("foo".to_string(), 1),
                ("bar".to_string(), 2),
                ("baz".to_string(), 1),
            ])))
        );
        assert_eq!(
            counters(&tokens("none"), 0).unwrap(),
            Some(CssProperty::Counters(KeywordOr::Values(vec![])))
        );
        assert!(counters(&tokens("foo none"), 0).is_err());
        assert_eq!(counters(&tokens("foo 1.5"), 0).unwrap(), None);
        assert_eq!(counters(&tokens("3"), 0).unwrap(), None);
    }
}
