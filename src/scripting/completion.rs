//! Completion target extraction and candidate filtering

/// Rhai keywords offered when completing a bare identifier
pub const KEYWORDS: &[&str] = &[
    "break", "catch", "const", "continue", "do", "else", "export", "false", "fn", "for", "global",
    "if", "import", "in", "let", "loop", "private", "return", "switch", "this", "throw", "true",
    "try", "until", "while",
];

/// What precedes the partial identifier being completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier<'a> {
    None,
    /// `name.` - complete a property of the value bound to `name`
    Property(&'a str),
    /// `a::b::` - complete a member of a namespace path
    Namespace(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target<'a> {
    pub qualifier: Qualifier<'a>,
    pub partial: &'a str,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split off the trailing identifier and what qualifies it
pub fn parse_target(text: &str) -> Target<'_> {
    let partial_start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_ident_char(*c))
        .last()
        .map_or(text.len(), |(i, _)| i);
    let partial = &text[partial_start..];
    let head = &text[..partial_start];

    if let Some(owner) = head.strip_suffix('.') {
        let name = trailing_ident(owner);
        if !name.is_empty() {
            return Target {
                qualifier: Qualifier::Property(name),
                partial,
            };
        }
    }

    if let Some(mut rest) = head.strip_suffix("::") {
        let mut start = rest.len();
        loop {
            let name = trailing_ident(rest);
            if name.is_empty() {
                break;
            }
            start = rest.len() - name.len();
            match rest[..start].strip_suffix("::") {
                Some(outer) => rest = outer,
                None => break,
            }
        }
        let path_end = head.len() - 2;
        // `start` is relative to the last `rest`, which is a prefix of `head`
        if start < path_end {
            return Target {
                qualifier: Qualifier::Namespace(&head[start..path_end]),
                partial,
            };
        }
    }

    Target {
        qualifier: Qualifier::None,
        partial,
    }
}

fn trailing_ident(text: &str) -> &str {
    let start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_ident_char(*c))
        .last()
        .map_or(text.len(), |(i, _)| i);
    &text[start..]
}

/// Names starting with `partial`, sorted and without duplicates.
/// Names starting with `__` are internal and never offered.
pub fn filter<I, S>(partial: &str, names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut matches: Vec<String> = names
        .into_iter()
        .filter(|name| {
            let name = name.as_ref();
            name.starts_with(partial) && !name.starts_with("__")
        })
        .map(|name| name.as_ref().to_string())
        .collect();
    matches.sort();
    matches.dedup();
    matches
}

/// Longest prefix shared by every candidate
pub fn common_prefix(candidates: &[String]) -> &str {
    let Some(first) = candidates.first() else {
        return "";
    };
    let mut len = first.len();
    for other in &candidates[1..] {
        len = first
            .char_indices()
            .zip(other.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map_or(0, |((i, a), _)| i + a.len_utf8())
            .min(len);
    }
    &first[..len]
}
