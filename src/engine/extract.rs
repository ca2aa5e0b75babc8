//! Directive recognition on a cleaned line.

use crate::{KeywordSet, STRUCTURAL_KEYWORDS};

/// A recognised directive and its argument tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Name as written in the source (two-word names joined by one space).
    pub name: String,
    /// Name as matched against the keyword set; upper case unless matching is case-sensitive.
    pub key: String,
    pub arguments: Vec<&'a str>,
}

impl Directive<'_> {
    /// Arguments joined by single spaces.
    pub fn argument_text(&self) -> String {
        self.arguments.join(" ")
    }
}

/// Extract the directive from `clean` (comment removed, trimmed), if it names one in `recognised`.
///
/// Two-word names are tried on the first two tokens before the first token alone.
/// With `case_sensitive`, a token only matches when written exactly as the keyword set stores it;
/// INCLUDE, BEGIN and END match in any case.
pub fn extract_directive<'a>(
    clean: &'a str,
    recognised: &KeywordSet,
    marker: char,
    case_sensitive: bool,
) -> Option<Directive<'a>> {
    let rest = clean.strip_prefix(marker)?;
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    let lookup = |name: &str| {
        let upper = name.to_uppercase();
        let key = if case_sensitive && !STRUCTURAL_KEYWORDS.contains(&upper.as_str()) {
            name.to_string()
        } else {
            upper
        };
        recognised.contains(&key).then_some(key)
    };

    if let [first, second, ..] = tokens.as_slice() {
        let name = format!("{first} {second}");
        if let Some(key) = lookup(&name) {
            return Some(Directive {
                name,
                key,
                arguments: tokens[2..].to_vec(),
            });
        }
    }

    let first = *tokens.first()?;
    let key = lookup(first)?;
    Some(Directive {
        name: first.to_string(),
        key,
        arguments: tokens[1..].to_vec(),
    })
}
