//! Conversion of plain-text `go doc` output into a Discord message.
//!
//! `go doc` prints declarations flush left and prose indented by four
//! spaces. The formatter walks the output line by line, fencing the
//! declarations as Go code and collapsing wrapped prose into paragraphs,
//! then appends a link to the symbol on pkg.go.dev.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use strum::Display;

/// Discord's message limit in bytes.
pub const MESSAGE_LIMIT: usize = 2000;

const DOCS_BASE_URL: &str = "https://pkg.go.dev/";
const FENCE_OPEN: &str = "```go\n";
const FENCE_CLOSE: &str = "```";
const INDENT: &str = "    ";
const TOO_LONG_PREFIX: &str = "That documentation is too long to send! See: ";

static IMPORT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"// import "(.+)""#).expect("valid regex"));

/// Which kind of segment the formatter is currently writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ParserState {
    CodeBlock,
    Text,
}

/// The only structural signal in `go doc` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Starts with four spaces
    Indented,
    /// Empty line
    Blank,
    /// Anything else
    Flush,
}

impl LineKind {
    pub fn classify(line: &str) -> Self {
        if line.starts_with(INDENT) {
            LineKind::Indented
        } else if line.is_empty() {
            LineKind::Blank
        } else {
            LineKind::Flush
        }
    }
}

/// Output produced by a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission<'a> {
    /// Line copied as-is inside a code fence
    Code(&'a str),
    /// Close the open fence and start a paragraph
    CloseFenceThenProse(&'a str),
    /// Open a fence and copy the line into it
    OpenFenceThenCode(&'a str),
    /// Continue the current paragraph
    Prose(&'a str),
    /// End the current paragraph
    ParagraphBreak,
}

impl Emission<'_> {
    fn write_to(self, message: &mut String) {
        match self {
            Emission::Code(line) => {
                message.push_str(line);
                message.push('\n');
            }
            Emission::CloseFenceThenProse(line) => {
                message.push_str(FENCE_CLOSE);
                message.push('\n');
                push_prose(message, line);
            }
            Emission::OpenFenceThenCode(line) => {
                message.push_str(FENCE_OPEN);
                message.push_str(line);
                message.push('\n');
            }
            Emission::Prose(line) => push_prose(message, line),
            Emission::ParagraphBreak => message.push_str("\n\n"),
        }
    }
}

fn push_prose(message: &mut String, line: &str) {
    message.push_str(line.trim_matches(' '));
    message.push(' ');
}

/// Next state and output for a line read in `state`.
pub fn transition(state: ParserState, line: &str) -> (ParserState, Emission<'_>) {
    match (state, LineKind::classify(line)) {
        (ParserState::CodeBlock, LineKind::Indented) => {
            (ParserState::Text, Emission::CloseFenceThenProse(line))
        }
        (ParserState::CodeBlock, LineKind::Blank | LineKind::Flush) => {
            (ParserState::CodeBlock, Emission::Code(line))
        }
        (ParserState::Text, LineKind::Flush) => {
            (ParserState::CodeBlock, Emission::OpenFenceThenCode(line))
        }
        (ParserState::Text, LineKind::Blank) => (ParserState::Text, Emission::ParagraphBreak),
        (ParserState::Text, LineKind::Indented) => (ParserState::Text, Emission::Prose(line)),
    }
}

/// Single-pass builder for the message body.
#[derive(Debug)]
pub struct DocFormatter {
    state: ParserState,
    message: String,
}

impl Default for DocFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocFormatter {
    /// Start a message with an open Go code fence.
    pub fn new() -> Self {
        Self {
            state: ParserState::CodeBlock,
            message: String::from(FENCE_OPEN),
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// The message written so far, before end-of-input normalization.
    pub fn as_str(&self) -> &str {
        &self.message
    }

    pub fn push_line(&mut self, line: &str) {
        let (next, emission) = transition(self.state, line);
        emission.write_to(&mut self.message);
        self.state = next;
    }

    /// Close any open fence and normalize trailing whitespace.
    pub fn finish(mut self) -> String {
        if self.state == ParserState::CodeBlock {
            self.message.push_str(FENCE_CLOSE);
        }

        let trimmed_len = self.message.trim_end_matches([' ', '\n']).len();
        self.message.truncate(trimmed_len);
        self.message.push('\n');

        // Blank line between trailing prose and the link.
        if self.state == ParserState::Text {
            self.message.push('\n');
        }

        self.message
    }
}

/// Format `go doc` output for `symbol` as a Discord message.
///
/// Falls back to a short message holding only the link when the result
/// would not fit in [`MESSAGE_LIMIT`] bytes.
pub fn format_message(symbol: &str, output: &str) -> String {
    let mut formatter = DocFormatter::new();
    for line in output.split('\n') {
        formatter.push_line(line);
    }
    let final_state = formatter.state();
    let message = formatter.finish();

    let link = build_link(symbol, import_path(&message));

    if message.len() + link.len() > MESSAGE_LIMIT {
        debug!(
            "Documentation for '{}' is {} bytes with link, sending link only",
            symbol,
            message.len() + link.len()
        );
        return format!("{TOO_LONG_PREFIX}{link}");
    }

    debug!(
        "Formatted documentation for '{}' ({} bytes, ended in {})",
        symbol,
        message.len() + link.len(),
        final_state
    );
    message + &link
}

/// The package import path announced by `go doc`, if any.
pub fn import_path(message: &str) -> Option<&str> {
    IMPORT_PATTERN
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|path| path.as_str())
}

/// Build the pkg.go.dev link for `symbol`, wrapped in angle brackets so
/// Discord does not embed a preview.
pub fn build_link(symbol: &str, import_path: Option<&str>) -> String {
    let mut parts = symbol.split('.');

    let mut link = format!("<{DOCS_BASE_URL}");
    let package = parts.next().unwrap_or_default();
    link.push_str(import_path.unwrap_or(package));

    if let Some(name) = parts.next() {
        link.push('#');
        link.push_str(&title_case(name));
    }
    if let Some(member) = parts.next() {
        link.push('.');
        link.push_str(&title_case(member));
    }

    link.push('>');
    link
}

/// Capitalize the first letter of every word in `input`.
///
/// ASCII letters, digits and `_` continue a word, as do non-ASCII letters
/// and digits; other ASCII characters and whitespace separate words.
/// Letters are uppercased with [`char::to_uppercase`], not titlecased, so
/// a single character may expand (`ß` becomes `SS`) and digraphs take
/// their uppercase form (`ǆ` becomes `Ǆ`, not `ǅ`).
pub fn title_case(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut prev = ' ';
    for c in input.chars() {
        if is_word_separator(prev) {
            output.extend(c.to_uppercase());
        } else {
            output.push(c);
        }
        prev = c;
    }
    output
}

fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphabetic() || c.is_numeric() {
        return false;
    }
    c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fence_counts(message: &str) -> (usize, usize) {
        let opens = message.matches("```go").count();
        let all = message.matches("```").count();
        (opens, all - opens)
    }

    #[test]
    fn classifies_lines() {
        assert_eq!(LineKind::classify("    prose"), LineKind::Indented);
        assert_eq!(LineKind::classify("    "), LineKind::Indented);
        assert_eq!(LineKind::classify(""), LineKind::Blank);
        assert_eq!(LineKind::classify("   three spaces"), LineKind::Flush);
        assert_eq!(LineKind::classify("\tfield int"), LineKind::Flush);
        assert_eq!(LineKind::classify("func New() error"), LineKind::Flush);
    }

    #[test]
    fn transitions() {
        use ParserState::{CodeBlock, Text};

        assert_eq!(
            transition(CodeBlock, "    prose"),
            (Text, Emission::CloseFenceThenProse("    prose"))
        );
        assert_eq!(transition(CodeBlock, ""), (CodeBlock, Emission::Code("")));
        assert_eq!(
            transition(CodeBlock, "type T int"),
            (CodeBlock, Emission::Code("type T int"))
        );
        assert_eq!(
            transition(Text, "func F()"),
            (CodeBlock, Emission::OpenFenceThenCode("func F()"))
        );
        assert_eq!(transition(Text, ""), (Text, Emission::ParagraphBreak));
        assert_eq!(
            transition(Text, "    more"),
            (Text, Emission::Prose("    more"))
        );
    }

    #[test]
    fn collapses_wrapped_prose_into_paragraphs() {
        let mut formatter = DocFormatter::new();
        for line in ["    one", "    two", "", "    three"] {
            formatter.push_line(line);
        }
        assert_eq!(formatter.state(), ParserState::Text);
        let prose = formatter
            .as_str()
            .strip_prefix("```go\n```\n")
            .expect("fence opened then closed");
        assert_eq!(prose, "one two \n\nthree ");
    }

    #[test]
    fn empty_input_yields_empty_fence_and_link() {
        assert_eq!(
            format_message("fmt", ""),
            "```go\n\n```\n<https://pkg.go.dev/fmt>"
        );
    }

    #[test]
    fn declaration_then_prose() {
        let output = "func New(text string) error\n    New returns an error that formats as the given text.\n    Each call to New returns a distinct error value.\n";
        assert_eq!(
            format_message("errors.New", output),
            "```go\nfunc New(text string) error\n```\nNew returns an error that formats as the given text. Each call to New returns a distinct error value.\n\n<https://pkg.go.dev/errors#New>"
        );
    }

    #[test]
    fn package_scenario() {
        let output = "func New(text string) error\n\n    New returns an error...\n";
        let message = format_message("errors", output);
        assert!(message.starts_with("```go\nfunc New(text string) error\n"));
        assert_eq!(
            message,
            "```go\nfunc New(text string) error\n\n```\nNew returns an error...\n\n<https://pkg.go.dev/errors>"
        );
    }

    #[test]
    fn flush_lines_are_fenced_verbatim() {
        let output = "func New(text string) error\n\nNew returns an error...";
        assert_eq!(
            format_message("errors", output),
            "```go\nfunc New(text string) error\n\nNew returns an error...\n```\n<https://pkg.go.dev/errors>"
        );
    }

    #[test]
    fn code_after_prose_reopens_fence() {
        let output = "type Stringer interface {\n\tString() string\n}\n    Stringer is implemented by any value.\n\nfunc (Stringer) String() string\n";
        let message = format_message("fmt.Stringer", output);
        assert_eq!(
            message,
            "```go\ntype Stringer interface {\n\tString() string\n}\n```\nStringer is implemented by any value. \n\n```go\nfunc (Stringer) String() string\n\n```\n<https://pkg.go.dev/fmt#Stringer>"
        );
    }

    #[test]
    fn link_uses_import_path() {
        let output = "package fmt // import \"fmt\"\n\ntype Stringer interface{ String() string }\n";
        let message = format_message("fmt.Stringer.String", output);
        assert!(message.ends_with("\n<https://pkg.go.dev/fmt#Stringer.String>"));

        let output = "package yaml // import \"gopkg.in/yaml.v3\"\n";
        let message = format_message("yaml.node.kind", output);
        assert!(message.ends_with("<https://pkg.go.dev/gopkg.in/yaml.v3#Node.Kind>"));
    }

    #[test]
    fn link_falls_back_to_first_segment() {
        assert_eq!(build_link("strings", None), "<https://pkg.go.dev/strings>");
        assert_eq!(
            build_link("strings.builder", None),
            "<https://pkg.go.dev/strings#Builder>"
        );
        assert_eq!(
            build_link("fmt.Stringer.String", Some("fmt")),
            "<https://pkg.go.dev/fmt#Stringer.String>"
        );
        assert_eq!(
            build_link("a.b.c.d", None),
            "<https://pkg.go.dev/a#B.C>"
        );
        assert_eq!(build_link("", None), "<https://pkg.go.dev/>");
    }

    #[test]
    fn import_marker_is_found_anywhere() {
        assert_eq!(
            import_path("```go\npackage http // import \"net/http\"\n```\n"),
            Some("net/http")
        );
        assert_eq!(import_path("```go\npackage main\n```\n"), None);
    }

    #[test]
    fn title_case_capitalizes_every_word() {
        assert_eq!(title_case("stringer"), "Stringer");
        assert_eq!(title_case("Stringer"), "Stringer");
        assert_eq!(title_case("readAll"), "ReadAll");
        assert_eq!(title_case("new_thing"), "New_thing");
        assert_eq!(title_case("foo-bar"), "Foo-Bar");
        assert_eq!(title_case("v2beta"), "V2beta");
        assert_eq!(title_case("émile"), "Émile");
        assert_eq!(title_case("straße"), "Straße");
        assert_eq!(title_case("ßig"), "SSig");
        assert_eq!(title_case("ǆungla"), "Ǆungla");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn fences_are_balanced() {
        let inputs = [
            "",
            "func F()",
            "    prose only",
            "func F()\n    doc\nfunc G()\n    doc\n\n    more\n",
            "type T struct{}\n\n    T is a type.\n\nfunc (T) M()\n",
        ];
        for input in inputs {
            let message = format_message("pkg", input);
            let (opens, closes) = fence_counts(&message);
            assert_eq!(opens, closes, "unbalanced fences for {input:?}: {message:?}");
        }
    }

    #[test]
    fn output_has_no_indented_lines() {
        let inputs = [
            "func F()\n    doc line\n        deeper indent\n\n    more\n",
            "    leading prose\nfunc G()\n",
        ];
        for input in inputs {
            let message = format_message("pkg", input);
            for line in message.split('\n') {
                assert_ne!(
                    LineKind::classify(line),
                    LineKind::Indented,
                    "indented line {line:?} in {message:?}"
                );
            }
        }
    }

    #[test]
    fn text_state_adds_blank_line_before_link() {
        assert!(format_message("pkg", "    prose").ends_with("prose\n\n<https://pkg.go.dev/pkg>"));
        assert!(format_message("pkg", "func F()").ends_with("```\n<https://pkg.go.dev/pkg>"));
    }

    #[test]
    fn oversized_documentation_sends_link_only() {
        let output = "func F()\n".repeat(300);
        let message = format_message("big", &output);
        assert_eq!(
            message,
            "That documentation is too long to send! See: <https://pkg.go.dev/big>"
        );
        assert!(message.len() <= MESSAGE_LIMIT);
    }

    #[test]
    fn limit_is_inclusive() {
        // Body is the line plus 11 bytes of fencing; the link is 22 bytes.
        let fits = "x".repeat(MESSAGE_LIMIT - 33);
        let message = format_message("a", &fits);
        assert_eq!(message.len(), MESSAGE_LIMIT);
        assert!(message.starts_with("```go\n"));

        let too_long = "x".repeat(MESSAGE_LIMIT - 32);
        assert!(format_message("a", &too_long).starts_with(TOO_LONG_PREFIX));
    }
}
