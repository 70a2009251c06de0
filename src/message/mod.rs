mod grammar;

use std::fmt;

/// Placeholder substituted with the rule's display name.
pub const PROPERTY_NAME: &str = "PropertyName";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A failure message template such as `"'{PropertyName}' must contain a value."`.
///
/// Parsed once when the validator or message override is attached; rendering
/// a failure only walks the pre-split segments. Parsing is total: braces
/// that do not form a `{Name}` placeholder are kept as text, and `{{` / `}}`
/// render as single braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    segments: Vec<Segment>,
}

impl MessageTemplate {
    #[must_use]
    pub fn parse(input: &str) -> Self {
        use winnow::Parser;
        let segments = grammar::segments
            .parse(input)
            .unwrap_or_else(|_| vec![Segment::Literal(input.to_owned())]);
        Self { segments }
    }

    /// Names of the placeholders referenced by this template, in order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Render with `{PropertyName}` bound to `property_name` and other
    /// placeholders looked up in `args`. Unknown placeholders render verbatim.
    #[must_use]
    pub fn render(&self, property_name: &str, args: &MessageArgs) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) if name == PROPERTY_NAME => out.push_str(property_name),
                Segment::Placeholder(name) => match args.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                },
            }
        }
        out
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    write!(f, "{}", text.replace('{', "{{").replace('}', "}}"))?;
                }
                Segment::Placeholder(name) => write!(f, "{{{name}}}")?,
            }
        }
        Ok(())
    }
}

/// Values a validator contributes to its failure message, keyed by placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageArgs {
    values: Vec<(&'static str, String)>,
}

impl MessageArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, placeholder: &'static str, value: impl fmt::Display) -> Self {
        self.values.push((placeholder, value.to_string()));
        self
    }

    #[must_use]
    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| *key == placeholder)
            .map(|(_, value)| value.as_str())
    }
}
