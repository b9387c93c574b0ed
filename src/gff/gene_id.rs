//! Gene identifier extraction from the attribute column.

use regex::Regex;

use crate::error::Error;

/// Pulls a gene identifier out of free-text GFF/GTF attributes.
pub trait GeneIdExtractor {
    fn extract(&self, attributes: &str) -> Option<String>;
}

/// Attribute keys tried in order by [`AttributeKeyExtractor`].
const DEFAULT_KEYS: [&str; 3] = ["gene_id", "ID", "Name"];

/// Looks up well-known attribute keys, accepting both GFF3 (`key=value`)
/// and GTF (`key "value"`) syntax.
#[derive(Debug, Clone)]
pub struct AttributeKeyExtractor {
    keys: Vec<String>,
}

impl Default for AttributeKeyExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_KEYS)
    }
}

impl AttributeKeyExtractor {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    fn lookup<'a>(attributes: &'a str, key: &str) -> Option<&'a str> {
        attributes
            .split(';')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .find_map(|pair| {
                let (k, v) = match pair.find('=') {
                    Some(pos) => (&pair[..pos], &pair[pos + 1..]),
                    None => pair.split_once(char::is_whitespace)?,
                };
                (k.trim() == key).then(|| v.trim().trim_matches('"'))
            })
            .filter(|v| !v.is_empty())
    }
}

impl GeneIdExtractor for AttributeKeyExtractor {
    fn extract(&self, attributes: &str) -> Option<String> {
        self.keys.iter().find_map(|key| {
            let value = Self::lookup(attributes, key)?;
            // Multi-valued attributes: the first value names the gene
            let value = value.split(',').next().unwrap_or(value);
            let value = if key == "ID" {
                value
                    .strip_prefix("gene:")
                    .or_else(|| value.strip_prefix("gene-"))
                    .unwrap_or(value)
            } else {
                value
            };
            Some(value.to_string())
        })
    }
}

/// Matches a regular expression against the raw attribute text.
///
/// The first capture group is the identifier when the pattern has one,
/// otherwise the whole match is.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    regex: Regex,
}

impl PatternExtractor {
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let regex = Regex::new(pattern)
            .map_err(|e| Error::Validation(format!("invalid gene pattern '{pattern}': {e}")))?;
        Ok(Self { regex })
    }
}

impl GeneIdExtractor for PatternExtractor {
    fn extract(&self, attributes: &str) -> Option<String> {
        let caps = self.regex.captures(attributes)?;
        caps.get(1)
            .or_else(|| caps.get(0))
            .map(|m| m.as_str().to_string())
    }
}
