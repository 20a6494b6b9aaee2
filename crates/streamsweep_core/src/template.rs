//! Command templates with `{name}` placeholders.
//!
//! Templates are parsed once into literal and placeholder segments, then
//! rendered in a single pass from a value map. Substituted values are copied
//! verbatim and never scanned again, so an ensemble string that happens to
//! contain `{stream}` stays as written. `{{` and `}}` produce literal braces.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;

/// Every value a command template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    Ensemble,
    Stream,
    ClassIndex,
    Instances,
    Width,
    SampleFreq,
    ImbRatio,
    Heap,
}

impl Placeholder {
    pub const ALL: [Placeholder; 8] = [
        Placeholder::Ensemble,
        Placeholder::Stream,
        Placeholder::ClassIndex,
        Placeholder::Instances,
        Placeholder::Width,
        Placeholder::SampleFreq,
        Placeholder::ImbRatio,
        Placeholder::Heap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Placeholder::Ensemble => "ensemble",
            Placeholder::Stream => "stream",
            Placeholder::ClassIndex => "class_index",
            Placeholder::Instances => "instances",
            Placeholder::Width => "width",
            Placeholder::SampleFreq => "sample_freq",
            Placeholder::ImbRatio => "imb_ratio",
            Placeholder::Heap => "heap",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Placeholder),
}

/// Values for one rendering of a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateValues {
    values: BTreeMap<Placeholder, String>,
}

impl TemplateValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, placeholder: Placeholder, value: impl ToString) -> &mut Self {
        self.values.insert(placeholder, value.to_string());
        self
    }

    pub fn with(mut self, placeholder: Placeholder, value: impl ToString) -> Self {
        self.set(placeholder, value);
        self
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.values.get(&placeholder).map(String::as_str)
    }
}

/// A parsed command template.
///
/// Serializes as its source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommandTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl CommandTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if chars.peek().is_some_and(|&(_, next)| next == '{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek().is_some_and(|&(_, next)| next == '}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        name.push(inner);
                    }
                    if !closed {
                        return Err(TemplateError::Unterminated { offset });
                    }
                    let placeholder = Placeholder::from_name(name.trim())
                        .ok_or_else(|| TemplateError::UnknownPlaceholder(name.clone()))?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot(placeholder));
                }
                '}' => return Err(TemplateError::UnmatchedClose { offset }),
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholders referenced by this template, in first-use order.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut seen = Vec::new();
        for segment in &self.segments {
            if let Segment::Slot(p) = segment
                && !seen.contains(p)
            {
                seen.push(*p);
            }
        }
        seen
    }

    pub fn uses(&self, placeholder: Placeholder) -> bool {
        self.segments
            .iter()
            .any(|segment| *segment == Segment::Slot(placeholder))
    }

    pub fn render(&self, values: &TemplateValues) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len() + 64);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(p) => {
                    let value = values.get(*p).ok_or(TemplateError::MissingValue(p.name()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

impl TryFrom<String> for CommandTemplate {
    type Error = TemplateError;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        CommandTemplate::parse(&source)
    }
}

impl From<CommandTemplate> for String {
    fn from(template: CommandTemplate) -> Self {
        template.source
    }
}

impl std::str::FromStr for CommandTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandTemplate::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_every_occurrence() {
        let template =
            CommandTemplate::parse("run -l {ensemble} -f {sample_freq} -q {sample_freq}").unwrap();
        let values = TemplateValues::new()
            .with(Placeholder::Ensemble, "bayes.NaiveBayes")
            .with(Placeholder::SampleFreq, 42);

        assert_eq!(
            template.render(&values).unwrap(),
            "run -l bayes.NaiveBayes -f 42 -q 42"
        );
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let template = CommandTemplate::parse("-l {ensemble} -s {stream}").unwrap();
        let values = TemplateValues::new()
            .with(Placeholder::Ensemble, "weird{stream}")
            .with(Placeholder::Stream, "s.arff");

        assert_eq!(template.render(&values).unwrap(), "-l weird{stream} -s s.arff");
    }

    #[test]
    fn test_escaped_braces() {
        let template = CommandTemplate::parse("echo {{literal}} {heap}").unwrap();
        let values = TemplateValues::new().with(Placeholder::Heap, 8);
        assert_eq!(template.render(&values).unwrap(), "echo {literal} 8");
    }

    #[test]
    fn test_unknown_placeholder_is_rejected() {
        assert_eq!(
            CommandTemplate::parse("-x {bogus}"),
            Err(TemplateError::UnknownPlaceholder("bogus".into()))
        );
    }

    #[test]
    fn test_unterminated_and_unmatched() {
        assert_eq!(
            CommandTemplate::parse("abc {ensemble"),
            Err(TemplateError::Unterminated { offset: 4 })
        );
        assert_eq!(
            CommandTemplate::parse("abc } def"),
            Err(TemplateError::UnmatchedClose { offset: 4 })
        );
    }

    #[test]
    fn test_missing_value() {
        let template = CommandTemplate::parse("-c {class_index}").unwrap();
        assert_eq!(
            template.render(&TemplateValues::new()),
            Err(TemplateError::MissingValue("class_index"))
        );
    }

    #[test]
    fn test_placeholders_in_first_use_order() {
        let template = CommandTemplate::parse("{stream} {ensemble} {stream} {heap}").unwrap();
        assert_eq!(
            template.placeholders(),
            vec![Placeholder::Stream, Placeholder::Ensemble, Placeholder::Heap]
        );
        assert!(template.uses(Placeholder::Heap));
        assert!(!template.uses(Placeholder::ImbRatio));
    }

    #[test]
    fn test_serializes_as_source_text() {
        let template = CommandTemplate::parse("java {heap}").unwrap();
        let text: String = template.clone().into();
        assert_eq!(text, "java {heap}");
        assert_eq!(CommandTemplate::try_from(text).unwrap(), template);
    }
}
