//! fdnorm CLI -- normalise relation schemas and verify decompositions.

use std::path::{Path, PathBuf};
use std::{fmt, fs, io};

use clap::{Parser, Subcommand};
use fdnorm_core::RelationDescription;
use fdnorm_parser::{parse_relation, ParseError};
use fdnorm_testgen::generator::GeneratedRelation;
use serde::Deserialize;

#[derive(Debug, Parser)]
#[command(
    name = "fdnorm",
    about = "BCNF decomposition and lossless-join checking for relation schemas"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Minimise the dependencies, find a key and decompose into BCNF
    Decompose(DecomposeArgs),
    /// Check the decomposition given in each input for the lossless-join property
    Verify(VerifyArgs),
    /// Format relation (.fd) files
    Fmt(FmtArgs),
    /// Generate random relations as JSON documents
    Generate(GenerateArgs),
    /// Print the JSON Schema for the relation input format to stdout
    Schema,
}

#[derive(Debug, Parser)]
pub struct DecomposeArgs {
    /// Input files (.fd text or .json) or directories containing them
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Also run the lossless-join check on the result
    #[arg(long)]
    pub verbose: bool,
    /// Output results as JSON (one object per file)
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Input files (.fd text or .json) or directories containing them
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Print the final tableau for every file
    #[arg(long)]
    pub verbose: bool,
    /// Output results as JSON (one object per file)
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct FmtArgs {
    /// Input files or directories to format. Comments are not preserved.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
    /// Check formatting without modifying files (exit 1 if unformatted)
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Number of relations to generate
    #[arg(long)]
    pub n_relation: u64,
    /// Number of attributes per relation
    #[arg(long)]
    pub n_attribute: u64,
    /// Number of functional dependencies per relation
    #[arg(long)]
    pub n_dependency: u64,
    /// Largest determinant size
    #[arg(long, default_value_t = 2)]
    pub max_determinant: u64,
    /// Number of decomposition parts per relation
    #[arg(long, default_value_t = 0)]
    pub n_part: u64,
    /// Output directory for generated relation files
    #[arg(long)]
    pub output_dir: PathBuf,
}

/// Extension of text DSL files.
pub const TEXT_EXTENSION: &str = "fd";
/// Extension of JSON relation documents.
pub const JSON_EXTENSION: &str = "json";

/// Failure to turn an input file into a relation description.
#[derive(Debug, derive_more::From)]
pub enum LoadError {
    Io(io::Error),
    Parse(ParseError),
    Json(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "invalid JSON document: {e}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// JSON inputs are either plain relation documents or the output of
/// `fdnorm generate`.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonInput {
    Generated(GeneratedRelation),
    Plain(RelationDescription<String>),
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == JSON_EXTENSION)
}

/// Expand `paths` into the list of input files.
///
/// Files are kept as given. Directories are replaced by their `.fd` and
/// `.json` entries, sorted by path.
///
/// # Errors
///
/// Returns the I/O error of the first path that cannot be read.
pub fn collect_inputs(paths: &[PathBuf]) -> io::Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)?
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|p| {
                    p.is_file()
                        && p.extension()
                            .is_some_and(|ext| ext == TEXT_EXTENSION || ext == JSON_EXTENSION)
                })
                .collect();
            entries.sort();
            inputs.extend(entries);
        } else {
            fs::metadata(path)?;
            inputs.push(path.clone());
        }
    }
    Ok(inputs)
}

/// Parse `source` as JSON if `path` has a `.json` extension and as the text
/// DSL otherwise.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] or [`LoadError::Json`] on malformed input.
pub fn parse_source(path: &Path, source: &str) -> Result<RelationDescription<String>, LoadError> {
    if is_json(path) {
        Ok(match serde_json::from_str(source)? {
            JsonInput::Generated(generated) => generated.into_data(),
            JsonInput::Plain(relation) => relation,
        })
    } else {
        Ok(parse_relation(source)?)
    }
}

/// Read and parse one input file.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be read or parsed.
pub fn load_relation(path: &Path) -> Result<RelationDescription<String>, LoadError> {
    let source = fs::read_to_string(path)?;
    let relation = parse_source(path, &source)?;
    tracing::debug!(
        path = %path.display(),
        attributes = relation.attributes.len(),
        dependencies = relation.dependencies.len(),
        parts = relation.decomposition.len(),
        "relation loaded"
    );
    Ok(relation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_source() {
        let relation = parse_source(Path::new("r.fd"), "A, B\nA -> B\n").unwrap();
        assert_eq!(relation.dependencies.len(), 1);
    }

    #[test]
    fn test_parse_plain_json_source() {
        let source = r#"{
            "attributes": ["A", "B", "C"],
            "dependencies": [{"determinant": ["A"], "dependent": ["B"]}],
            "decomposition": [["A", "B"], ["A", "C"]]
        }"#;
        let relation = parse_source(Path::new("r.json"), source).unwrap();
        assert_eq!(relation.attributes.len(), 3);
        assert_eq!(relation.decomposition.len(), 2);
    }

    #[test]
    fn test_parse_json_without_optional_fields() {
        let relation = parse_source(Path::new("r.json"), r#"{"attributes": ["A"]}"#).unwrap();
        assert!(relation.dependencies.is_empty());
    }

    #[test]
    fn test_parse_generated_json_source() {
        let generated = &fdnorm_testgen::generator::generate_mult_relations(1, 4, 3, 2, 2)[0];
        let source = serde_json::to_string(generated).unwrap();
        let relation = parse_source(Path::new("0.json"), &source).unwrap();
        assert_eq!(&relation, generated.get_data());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_source(Path::new("r.fd"), "A ->\n"),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            parse_source(Path::new("r.json"), "{"),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn test_app_parses_commands() {
        let app = App::try_parse_from(["fdnorm", "verify", "a.fd", "dir", "--json"]).unwrap();
        let Command::Verify(args) = app.command else {
            panic!("expected verify");
        };
        assert_eq!(args.paths, [PathBuf::from("a.fd"), PathBuf::from("dir")]);
        assert!(args.json && !args.verbose);

        let app = App::try_parse_from([
            "fdnorm",
            "generate",
            "--n-relation",
            "2",
            "--n-attribute",
            "5",
            "--n-dependency",
            "4",
            "--output-dir",
            "out",
        ])
        .unwrap();
        let Command::Generate(args) = app.command else {
            panic!("expected generate");
        };
        assert_eq!((args.max_determinant, args.n_part), (2, 0));
    }
}
