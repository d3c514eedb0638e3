use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

/// Named text filters, each a plain `&str -> String` function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTransform {
    Identity,
    Lowercase,
    CountChars,
    CountLines,
    Order,
    CountWords,
}

impl TextTransform {
    pub const ALL: [TextTransform; 6] = [
        TextTransform::Identity,
        TextTransform::Lowercase,
        TextTransform::CountChars,
        TextTransform::CountLines,
        TextTransform::Order,
        TextTransform::CountWords,
    ];

    /// Name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            TextTransform::Identity => "identity",
            TextTransform::Lowercase => "lowercase",
            TextTransform::CountChars => "count-chars",
            TextTransform::CountLines => "count-lines",
            TextTransform::Order => "order",
            TextTransform::CountWords => "count-words",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TextTransform::Identity => "No modifications",
            TextTransform::Lowercase => "Convert to lowercase",
            TextTransform::CountChars => "Count the number of chars",
            TextTransform::CountLines => "Count the number of lines",
            TextTransform::Order => "List all the words in alphabetical order",
            TextTransform::CountWords => "Write the count for each word",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CatalogError> {
        Self::ALL
            .into_iter()
            .find(|transform| transform.name() == name)
            .ok_or_else(|| CatalogError::UnknownTransform(name.to_string()))
    }

    pub fn apply(self, text: &str) -> String {
        (self.function())(text)
    }

    fn function(self) -> fn(&str) -> String {
        match self {
            TextTransform::Identity => str::to_string,
            TextTransform::Lowercase => lowercase,
            TextTransform::CountChars => count_chars,
            TextTransform::CountLines => count_lines,
            TextTransform::Order => order,
            TextTransform::CountWords => count_words,
        }
    }
}

impl fmt::Display for TextTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl FromStr for TextTransform {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '!' | '.' | '_' | ',' | '\'' | '@' | '?')
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|word| !word.is_empty())
}

fn lowercase(text: &str) -> String {
    words(text)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn count_chars(text: &str) -> String {
    text.chars().count().to_string()
}

fn count_lines(text: &str) -> String {
    text.lines().count().to_string()
}

fn order(text: &str) -> String {
    let mut sorted: Vec<&str> = words(text).collect();
    sorted.sort_by_cached_key(|word| word.to_lowercase());
    format!("[{}]", sorted.join(", "))
}

fn count_words(text: &str) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for word in words(text) {
        *counts.entry(word).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(word, count)| format!("{}->{}", word, count))
        .collect::<Vec<_>>()
        .join("\n")
}
