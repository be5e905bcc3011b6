//! Winnow-based parser for the relation text DSL.
//!
//! Grammar:
//! ```text
//! relation   = line*
//! line       = WS? content? WS? comment? (NEWLINE | EOF)
//! content    = list (WS? arrow WS? list)?
//! list       = IDENT (WS? "," WS? IDENT)*
//! arrow      = "-"+ ">"
//! comment    = "//" REST_OF_LINE
//! IDENT      = [A-Za-z0-9_]+
//! ```
//!
//! The first content line is the attribute universe. After it, a line with
//! an arrow is a functional dependency and any other content line is a
//! decomposition part. Identifiers are upper-cased.

use fdnorm_core::{AttributeSet, FunctionalDependency, RelationDescription};
use winnow::ascii::{line_ending, till_line_ending};
use winnow::combinator::{alt, cut_err, eof, opt, separated};
use winnow::prelude::*;
use winnow::token::{literal, take_while};
use winnow::ModalResult;

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// A parse error with human-readable location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    fn at(input: &str, offset: usize, message: String) -> Self {
        let (line, column) = offset_to_line_col(input, offset);
        Self {
            message,
            line,
            column,
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Parse a relation DSL string.
///
/// Only the syntax is checked here. Whether dependencies and parts stay
/// inside the attribute universe is decided when the description is turned
/// into a `Schema`.
///
/// # Errors
///
/// Returns a [`ParseError`] with line/column information when a line does
/// not conform to the grammar, when a dependency appears before the
/// attribute line, or when the input has no attribute line at all.
pub fn parse_relation(input: &str) -> Result<RelationDescription<String>, ParseError> {
    let mut stream: &str = input;
    let mut relation: Option<RelationDescription<String>> = None;

    while !stream.is_empty() {
        let line_start = input.len() - stream.len();
        let content = line.parse_next(&mut stream).map_err(|e| {
            let consumed = input.len().saturating_sub(stream.len());
            ParseError::at(input, consumed, e.to_string())
        })?;

        match (content, &mut relation) {
            (None, _) => {}
            (Some(Content::List(part)), Some(relation)) => relation.decomposition.push(part),
            (Some(Content::Dependency(dependency)), Some(relation)) => {
                relation.dependencies.push(dependency);
            }
            (Some(Content::List(attributes)), slot @ None) => {
                *slot = Some(RelationDescription::new(attributes));
            }
            (Some(Content::Dependency(_)), None) => {
                return Err(ParseError::at(
                    input,
                    line_start,
                    "dependency found before the attribute line".to_string(),
                ));
            }
        }
    }

    relation.ok_or_else(|| ParseError::at(input, input.len(), "missing attribute line".to_string()))
}

// ---------------------------------------------------------------------------
// Line/column helper
// ---------------------------------------------------------------------------

/// Convert a byte offset into the original input to 1-based (line, column).
fn offset_to_line_col(input: &str, offset: usize) -> (usize, usize) {
    let safe_offset = offset.min(input.len());
    let prefix = &input[..safe_offset];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = prefix
        .rfind('\n')
        .map_or_else(|| prefix.len() + 1, |pos| prefix.len() - pos);
    (line, column)
}

// ---------------------------------------------------------------------------
// Whitespace helpers
// ---------------------------------------------------------------------------

/// Optional inline whitespace: spaces and tabs only.
fn opt_inline_ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c == ' ' || c == '\t')
        .void()
        .parse_next(input)
}

// ---------------------------------------------------------------------------
// Leaf parsers
// ---------------------------------------------------------------------------

/// An attribute name, upper-cased.
fn attribute(input: &mut &str) -> ModalResult<String> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_')
        .map(str::to_ascii_uppercase)
        .parse_next(input)
}

/// `"-"+ ">"`
fn arrow(input: &mut &str) -> ModalResult<()> {
    take_while(1.., '-').parse_next(input)?;
    literal(">").void().parse_next(input)
}

fn comment(input: &mut &str) -> ModalResult<()> {
    literal("//").parse_next(input)?;
    till_line_ending.void().parse_next(input)
}

fn comma(input: &mut &str) -> ModalResult<()> {
    opt_inline_ws.parse_next(input)?;
    literal(",").parse_next(input)?;
    opt_inline_ws.parse_next(input)
}

// ---------------------------------------------------------------------------
// Line parsers
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum Content {
    List(AttributeSet<String>),
    Dependency(FunctionalDependency<String>),
}

/// `IDENT ("," IDENT)*`
fn attribute_list(input: &mut &str) -> ModalResult<AttributeSet<String>> {
    let attributes: Vec<String> = separated(1.., attribute, comma).parse_next(input)?;
    Ok(attributes.into())
}

/// An attribute list, optionally followed by an arrow and a dependent list.
/// Once the arrow is seen the dependent list is mandatory.
fn content(input: &mut &str) -> ModalResult<Content> {
    let left = attribute_list.parse_next(input)?;
    opt_inline_ws.parse_next(input)?;
    if opt(arrow).parse_next(input)?.is_none() {
        return Ok(Content::List(left));
    }
    opt_inline_ws.parse_next(input)?;
    let right = cut_err(attribute_list).parse_next(input)?;
    Ok(Content::Dependency(FunctionalDependency::new(left, right)))
}

/// One line of input, including its terminator. Blank and comment-only
/// lines produce `None`.
fn line(input: &mut &str) -> ModalResult<Option<Content>> {
    opt_inline_ws.parse_next(input)?;
    let content = opt(content).parse_next(input)?;
    opt_inline_ws.parse_next(input)?;
    opt(comment).parse_next(input)?;
    alt((line_ending.void(), eof.void())).parse_next(input)?;
    Ok(content)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use fdnorm_core::schema::display::format_relation;
    use fdnorm_core::Schema;

    use super::*;

    fn set(attributes: &[&str]) -> AttributeSet<String> {
        attributes.iter().map(ToString::to_string).collect()
    }

    fn fd(determinant: &[&str], dependent: &[&str]) -> FunctionalDependency<String> {
        FunctionalDependency::new(set(determinant), set(dependent))
    }

    // -----------------------------------------------------------------------
    // Happy-path tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_attributes_only() {
        let relation = parse_relation("A, B, C\n").expect("should parse");
        assert_eq!(relation.attributes, set(&["A", "B", "C"]));
        assert!(relation.dependencies.is_empty());
        assert!(relation.decomposition.is_empty());
    }

    #[test]
    fn test_dependencies_and_parts() {
        let input = "A, B, C, D\nA -> B, C\nB, C -> D\nA, B\nC, D\n";
        let relation = parse_relation(input).expect("should parse");
        assert_eq!(
            relation.dependencies,
            vec![fd(&["A"], &["B", "C"]), fd(&["B", "C"], &["D"])]
        );
        assert_eq!(relation.decomposition, vec![set(&["A", "B"]), set(&["C", "D"])]);
    }

    #[test]
    fn test_case_is_normalised() {
        let relation = parse_relation("emp_id, Name\nemp_id -> name\n").expect("should parse");
        assert_eq!(relation.attributes, set(&["EMP_ID", "NAME"]));
        assert_eq!(relation.dependencies, vec![fd(&["EMP_ID"], &["NAME"])]);
    }

    #[test]
    fn test_whitespace_and_arrow_variants() {
        let input = "  A ,B,\tC  \nA-->B\nB   ->C\nA--------->C\n";
        let relation = parse_relation(input).expect("should parse");
        assert_eq!(relation.attributes, set(&["A", "B", "C"]));
        assert_eq!(
            relation.dependencies,
            vec![fd(&["A"], &["B"]), fd(&["B"], &["C"]), fd(&["A"], &["C"])]
        );
    }

    #[test]
    fn test_comments_blank_lines_and_crlf() {
        let input = "// universe\r\n\r\nA, B // trailing\r\n\r\nA -> B\r\n// end";
        let relation = parse_relation(input).expect("should parse");
        assert_eq!(relation.attributes, set(&["A", "B"]));
        assert_eq!(relation.dependencies, vec![fd(&["A"], &["B"])]);
    }

    #[test]
    fn test_no_trailing_newline() {
        let relation = parse_relation("A, B\nA -> B").expect("should parse");
        assert_eq!(relation.dependencies.len(), 1);
    }

    #[test]
    fn test_parsed_relation_builds_schema() {
        let relation = parse_relation("A, B, C\nA -> B\nB -> C\nA, B\nB, C\n").expect("should parse");
        let schema = Schema::try_from(relation).expect("valid schema");
        assert!(schema.check_lossless_join().lossless);
    }

    #[test]
    fn test_round_trip_through_formatter() {
        let input = "// sample\nd, c, b, a\na --> c, b\nb, c -> d\na, b\nc, d\n";
        let relation = parse_relation(input).expect("should parse");
        let formatted = format_relation(&relation);
        assert_eq!(formatted, "A, B, C, D\nA -> B, C\nB, C -> D\nA, B\nC, D\n");
        assert_eq!(parse_relation(&formatted).expect("should reparse"), relation);
    }

    // -----------------------------------------------------------------------
    // Error tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_missing_dependent() {
        let err = parse_relation("A, B\nA ->\n").expect_err("should fail");
        assert_eq!((err.line, err.column), (2, 5));
    }

    #[test]
    fn test_unexpected_character() {
        let err = parse_relation("A, B\nA; B\n").expect_err("should fail");
        assert_eq!((err.line, err.column), (2, 2));
        assert!(err.to_string().starts_with("parse error at line 2, column 2"));
    }

    #[test]
    fn test_trailing_comma() {
        let err = parse_relation("A, B,\n").expect_err("should fail");
        assert_eq!((err.line, err.column), (1, 5));
    }

    #[test]
    fn test_dependency_before_attributes() {
        let err = parse_relation("// header\nA -> B\nA, B\n").expect_err("should fail");
        assert_eq!((err.line, err.column), (2, 1));
        assert_eq!(err.message, "dependency found before the attribute line");
    }

    #[test]
    fn test_empty_input() {
        let err = parse_relation("// nothing here\n\n").expect_err("should fail");
        assert_eq!(err.message, "missing attribute line");
        assert_eq!(err.line, 3);
    }

    #[test]
    fn test_offset_to_line_col() {
        assert_eq!(offset_to_line_col("hello\nworld\n", 0), (1, 1));
        assert_eq!(offset_to_line_col("hello\nworld\n", 8), (2, 3));
    }
}
