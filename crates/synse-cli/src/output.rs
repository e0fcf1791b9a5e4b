//! Formatter engine shared by every command.
//!
//! A command supplies a handler that shapes its domain value into zero or more
//! records; the engine accumulates those records and renders them once, as
//! tab-aligned text, a JSON array, or a YAML sequence.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::{Map, Value};
use synse_config::OutputFormat;
use thiserror::Error;

/// Extra spaces between aligned pretty-mode columns.
const COLUMN_PADDING: usize = 3;

/// Failures raised while shaping or rendering formatter output.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A handler could not shape the value it was given.
    #[error("formatter could not handle value: {0}")]
    Handler(String),
    /// The pretty-mode template is malformed.
    #[error("invalid output template '{template}': {reason}")]
    Template {
        /// Template text.
        template: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// The template references a field the record does not have.
    #[error("output template references unknown field '{field}'")]
    UnknownField {
        /// Missing field name.
        field: String,
    },
    /// A record did not serialize to a map of named fields.
    #[error("formatter record must serialize to an object with named fields")]
    NotARecord,
    /// JSON serialization failed.
    #[error("failed to format JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML serialization failed.
    #[error("failed to format YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The destination rejected the output.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Handler shaping one domain value into formatter records.
pub type Handler<T, R> = Box<dyn Fn(&T) -> Result<Vec<R>, FormatError>>;

/// Literal templates available to a formatter, per output mode.
#[derive(Debug, Clone, Copy)]
pub struct Formats {
    /// Tab-separated cells with `{field}` placeholders.
    pub pretty: &'static str,
}

/// Accumulates records for one command invocation and renders them on `write`.
pub struct Formatter<'w, T, R> {
    out: &'w mut dyn Write,
    mode: OutputFormat,
    formats: Formats,
    header: Option<R>,
    handler: Handler<T, R>,
    records: Vec<R>,
}

impl<'w, T, R: Serialize> Formatter<'w, T, R> {
    /// Formatter writing to `out` in `mode` with `handler` installed.
    pub fn new<F>(out: &'w mut dyn Write, mode: OutputFormat, formats: Formats, handler: F) -> Self
    where
        F: Fn(&T) -> Result<Vec<R>, FormatError> + 'static,
    {
        Self {
            out,
            mode,
            formats,
            header: None,
            handler: Box::new(handler),
            records: Vec::new(),
        }
    }

    /// Replace the handler used by subsequent `add` calls.
    pub fn set_handler<F>(&mut self, handler: F)
    where
        F: Fn(&T) -> Result<Vec<R>, FormatError> + 'static,
    {
        self.handler = Box::new(handler);
    }

    /// Install the header row rendered in pretty mode.
    pub fn set_header(&mut self, header: R) {
        self.header = Some(header);
    }

    /// Active output mode.
    #[must_use]
    pub const fn mode(&self) -> OutputFormat {
        self.mode
    }

    /// Records accumulated so far.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Shape `value` through the handler and append the resulting records.
    ///
    /// # Errors
    ///
    /// Returns the handler's error; nothing is appended in that case.
    pub fn add(&mut self, value: &T) -> Result<(), FormatError> {
        let produced = (self.handler)(value)?;
        self.records.extend(produced);
        Ok(())
    }

    /// Render every accumulated record in the active mode.
    ///
    /// # Errors
    ///
    /// Returns template, serialization, or I/O errors.
    pub fn write(&mut self) -> Result<(), FormatError> {
        match self.mode {
            OutputFormat::Pretty => self.write_pretty(),
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *self.out, &self.records)?;
                writeln!(self.out)?;
                Ok(())
            }
            OutputFormat::Yaml => {
                serde_yaml::to_writer(&mut *self.out, &self.records)?;
                Ok(())
            }
        }?;
        self.out.flush()?;
        Ok(())
    }

    fn write_pretty(&mut self) -> Result<(), FormatError> {
        let template = Template::parse(self.formats.pretty)?;
        let mut lines = Vec::with_capacity(self.records.len() + 1);
        for record in self.header.iter().chain(self.records.iter()) {
            lines.push(template.render(&record_fields(record)?)?);
        }
        let aligned = align_columns(&lines);
        self.out.write_all(aligned.as_bytes())?;
        Ok(())
    }
}

fn record_fields<R: Serialize>(record: &R) -> Result<Map<String, Value>, FormatError> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(FormatError::NotARecord),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// Parsed pretty-mode template.
#[derive(Debug)]
struct Template {
    segments: Vec<Segment>,
}

impl Template {
    fn parse(text: &str) -> Result<Self, FormatError> {
        let invalid = |reason| FormatError::Template {
            template: text.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut rest = text;
        while let Some(open) = rest.find(['{', '}']) {
            if rest[open..].starts_with('}') {
                return Err(invalid("unmatched '}'"));
            }
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| invalid("unterminated placeholder"))?;
            let name = after[..close].trim();
            if name.is_empty() || name.contains('{') {
                return Err(invalid("empty or nested placeholder"));
            }
            segments.push(Segment::Field(name.to_string()));
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }
        Ok(Self { segments })
    }

    fn render(&self, fields: &Map<String, Value>) -> Result<String, FormatError> {
        let mut line = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Field(name) => {
                    let value = fields.get(name).ok_or_else(|| FormatError::UnknownField {
                        field: name.clone(),
                    })?;
                    line.push_str(&display_value(value));
                }
            }
        }
        Ok(line)
    }
}

/// Text shown for a field value in pretty mode.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

/// Align tab-separated cells into columns.
///
/// Every tab-terminated cell is padded to the widest cell of its column across
/// all lines; the final cell of each line is written as-is.
fn align_columns(lines: &[String]) -> String {
    let rows: Vec<Vec<&str>> = lines.iter().map(|line| line.split('\t').collect()).collect();

    let mut widths: Vec<usize> = Vec::new();
    for cells in &rows {
        for (index, cell) in cells.iter().enumerate().take(cells.len().saturating_sub(1)) {
            let width = cell.chars().count();
            if index == widths.len() {
                widths.push(width);
            } else if widths[index] < width {
                widths[index] = width;
            }
        }
    }

    let mut out = String::new();
    for cells in &rows {
        let last = cells.len().saturating_sub(1);
        for (index, cell) in cells.iter().enumerate() {
            out.push_str(cell);
            if index < last {
                let pad = widths[index] - cell.chars().count() + COLUMN_PADDING;
                out.extend(std::iter::repeat_n(' ', pad));
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Row {
        name: String,
        value: String,
    }

    fn row(name: &str, value: &str) -> Row {
        Row {
            name: name.into(),
            value: value.into(),
        }
    }

    const FORMATS: Formats = Formats {
        pretty: "{name}\t{value}",
    };

    fn split_pairs(input: &Vec<(String, String)>) -> Result<Vec<Row>, FormatError> {
        Ok(input.iter().map(|(name, value)| row(name, value)).collect())
    }

    fn render(mode: OutputFormat, inputs: &[Vec<(String, String)>], header: Option<Row>) -> String {
        let mut buf = Vec::new();
        {
            let mut formatter = Formatter::new(&mut buf, mode, FORMATS, split_pairs);
            if let Some(header) = header {
                formatter.set_header(header);
            }
            for input in inputs {
                formatter.add(input).expect("handler accepts input");
            }
            formatter.write().expect("render succeeds");
        }
        String::from_utf8(buf).expect("utf8 output")
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn pretty_aligns_columns_across_all_rows() {
        let output = render(
            OutputFormat::Pretty,
            &[pairs(&[("a", "1"), ("longer-name", "2")])],
            Some(row("NAME", "VALUE")),
        );
        assert_eq!(
            output,
            "NAME          VALUE\na             1\nlonger-name   2\n"
        );
    }

    #[test]
    fn pretty_without_header_renders_only_records() {
        let output = render(OutputFormat::Pretty, &[pairs(&[("x", "y")])], None);
        assert_eq!(output, "x   y\n");
    }

    #[test]
    fn json_preserves_add_order_and_omits_header() {
        let output = render(
            OutputFormat::Json,
            &[
                pairs(&[("first", "1")]),
                Vec::new(),
                pairs(&[("second", "2"), ("third", "3")]),
            ],
            Some(row("NAME", "VALUE")),
        );
        let decoded: Vec<Row> = serde_json::from_str(&output).expect("valid JSON array");
        assert_eq!(
            decoded,
            vec![row("first", "1"), row("second", "2"), row("third", "3")]
        );
        assert!(output.ends_with("]\n"));
    }

    #[test]
    fn json_renders_empty_array_without_records() {
        let output = render(OutputFormat::Json, &[], None);
        assert_eq!(output, "[]\n");
    }

    #[test]
    fn yaml_uses_record_field_names() {
        let output = render(OutputFormat::Yaml, &[pairs(&[("fan", "running")])], None);
        assert_eq!(output, "- name: fan\n  value: running\n");
        let decoded: Vec<Row> = serde_yaml::from_str(&output).expect("valid YAML");
        assert_eq!(decoded, vec![row("fan", "running")]);
    }

    #[test]
    fn handler_errors_surface_and_leave_records_untouched() {
        let mut buf = Vec::new();
        let mut formatter = Formatter::new(&mut buf, OutputFormat::Json, FORMATS, |input: &u8| {
            if *input == 0 {
                Err(FormatError::Handler("zero is not a device".into()))
            } else {
                Ok(vec![row("n", &input.to_string())])
            }
        });

        formatter.add(&1).expect("one is accepted");
        let err = formatter.add(&0).expect_err("zero is rejected");
        assert!(matches!(err, FormatError::Handler(_)));
        assert_eq!(formatter.records(), [row("n", "1")]);
    }

    #[test]
    fn set_handler_replaces_shaping() {
        let mut buf = Vec::new();
        let mut formatter =
            Formatter::new(&mut buf, OutputFormat::Pretty, FORMATS, |_: &u8| Ok(Vec::new()));
        formatter.set_handler(|input: &u8| Ok(vec![row("n", &input.to_string())]));
        formatter.add(&7).expect("handler accepts input");
        assert_eq!(formatter.records().len(), 1);
        assert_eq!(formatter.mode(), OutputFormat::Pretty);
    }

    #[test]
    fn unknown_template_field_is_reported() {
        let mut buf = Vec::new();
        let formats = Formats {
            pretty: "{name}\t{missing}",
        };
        let mut formatter = Formatter::new(&mut buf, OutputFormat::Pretty, formats, split_pairs);
        formatter
            .add(&pairs(&[("a", "b")]))
            .expect("handler accepts input");
        let err = formatter.write().expect_err("missing field");
        assert!(matches!(err, FormatError::UnknownField { field } if field == "missing"));
    }

    #[test]
    fn template_parse_rejects_malformed_placeholders() {
        for text in ["{name", "name}", "{}", "{a{b}"] {
            assert!(
                matches!(Template::parse(text), Err(FormatError::Template { .. })),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn template_parse_keeps_literals() {
        let template = Template::parse("id={id}\t{kind} ok").expect("valid template");
        assert_eq!(
            template.segments,
            vec![
                Segment::Literal("id=".into()),
                Segment::Field("id".into()),
                Segment::Literal("\t".into()),
                Segment::Field("kind".into()),
                Segment::Literal(" ok".into()),
            ]
        );
    }

    #[test]
    fn display_value_flattens_scalars_and_lists() {
        assert_eq!(display_value(&Value::Null), "");
        assert_eq!(display_value(&serde_json::json!(20.5)), "20.5");
        assert_eq!(display_value(&serde_json::json!(true)), "true");
        assert_eq!(display_value(&serde_json::json!(["a", 1])), "a,1");
        assert_eq!(display_value(&serde_json::json!({"k": "v"})), r#"{"k":"v"}"#);
    }

    #[test]
    fn align_columns_handles_ragged_rows() {
        let lines = vec!["a\tbb\tc".to_string(), "dddd".to_string(), "e\tf".to_string()];
        assert_eq!(align_columns(&lines), "a   bb   c\ndddd\ne   f\n");
    }

    #[test]
    fn non_object_records_are_rejected() {
        let mut buf = Vec::new();
        let mut formatter =
            Formatter::new(&mut buf, OutputFormat::Pretty, FORMATS, |n: &u8| Ok(vec![*n]));
        formatter.add(&3).expect("handler accepts input");
        assert!(matches!(formatter.write(), Err(FormatError::NotARecord)));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_reports_destination_failures() {
        let mut out = FailingWriter;
        let mut formatter = Formatter::new(&mut out, OutputFormat::Pretty, FORMATS, split_pairs);
        formatter
            .add(&pairs(&[("a", "b")]))
            .expect("handler accepts input");
        assert!(matches!(formatter.write(), Err(FormatError::Io(_))));
    }
}
