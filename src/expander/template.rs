//! Title templates
//!
//! A template is a title string with `{name}` placeholders, parsed once
//! at construction. Doubled braces escape literals. What a placeholder
//! resolves to depends on the expansion axis, so rendering takes a
//! caller-supplied lookup.

#![allow(dead_code)]

use super::error::ExpandError;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed title template
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TitleTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl TitleTemplate {
    /// Parse a template, validating placeholder syntax up front
    pub fn parse(raw: impl Into<String>) -> Result<Self, ExpandError> {
        let raw = raw.into();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => {
                                return Err(ExpandError::InvalidTemplate {
                                    template: raw,
                                    reason: "unclosed placeholder".to_string(),
                                })
                            }
                        }
                    }
                    if name.is_empty() {
                        return Err(ExpandError::InvalidTemplate {
                            template: raw,
                            reason: "empty placeholder".to_string(),
                        });
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(name));
                }
                '}' => {
                    return Err(ExpandError::InvalidTemplate {
                        template: raw,
                        reason: "unmatched '}'".to_string(),
                    })
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { raw, segments })
    }

    /// The original template text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in appearance order
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn has_placeholders(&self) -> bool {
        self.placeholders().next().is_some()
    }

    /// Substitute placeholders through `lookup`. Returns the name of the
    /// first placeholder the lookup cannot resolve; the caller maps that
    /// to the axis-appropriate error.
    pub fn render<F>(&self, mut lookup: F) -> Result<String, String>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut title = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => title.push_str(text),
                Segment::Placeholder(name) => match lookup(name) {
                    Some(value) => title.push_str(&value),
                    None => return Err(name.clone()),
                },
            }
        }
        Ok(title)
    }
}
