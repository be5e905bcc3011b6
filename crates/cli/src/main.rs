use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::Parser;
use fdnorm_cli::{collect_inputs, load_relation, parse_source, App, Command};
use fdnorm_core::schema::display::format_relation;
use fdnorm_core::{RelationDescription, Schema};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app = App::parse();
    match &app.command {
        Command::Decompose(args) => decompose(args),
        Command::Verify(args) => verify(args),
        Command::Fmt(args) => fmt(args),
        Command::Generate(args) => generate(args),
        Command::Schema => schema(),
    }
}

fn inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let inputs = collect_inputs(paths).unwrap_or_else(|e| {
        eprintln!("Failed to read inputs: {e}");
        process::exit(1);
    });
    if inputs.is_empty() {
        eprintln!("No .fd or .json files found");
        process::exit(1);
    }
    inputs
}

/// Load and validate one input, printing the failure if there is one.
fn load_schema(path: &Path, json: bool) -> Option<Schema<String>> {
    let filename = path.display().to_string();
    let result = load_relation(path)
        .map_err(|e| e.to_string())
        .and_then(|relation| Schema::try_from(relation).map_err(|e| e.to_string()));
    match result {
        Ok(schema) => Some(schema),
        Err(error) => {
            if json {
                let result = serde_json::json!({
                    "file": filename,
                    "ok": false,
                    "error": error,
                });
                println!("{result}");
            } else {
                eprintln!("{filename}: {error}");
            }
            None
        }
    }
}

fn decompose(args: &fdnorm_cli::DecomposeArgs) {
    let mut any_failed = false;

    for path in inputs(&args.paths) {
        let filename = path.display().to_string();
        let Some(mut schema) = load_schema(&path, args.json) else {
            any_failed = true;
            continue;
        };
        let parts = schema.decompose_bcnf().clone();
        let lossless = args.verbose.then(|| schema.check_lossless_join().lossless);

        if args.json {
            let result = serde_json::json!({
                "file": filename,
                "ok": true,
                "attributes": schema.attributes(),
                "key": schema.key(),
                "dependencies": schema.dependencies(),
                "decomposition": parts,
                "lossless": lossless,
            });
            println!("{result}");
        } else {
            println!("== {filename}");
            print!("{schema}");
            println!("BCNF decomposition:");
            for part in &parts {
                println!("  {part}");
            }
            if let Some(lossless) = lossless {
                println!("Lossless join: {}", if lossless { "yes" } else { "no" });
            }
        }
    }

    if any_failed {
        process::exit(1);
    }
}

fn verify(args: &fdnorm_cli::VerifyArgs) {
    let mut any_failed = false;

    for path in inputs(&args.paths) {
        let filename = path.display().to_string();
        let Some(schema) = load_schema(&path, args.json) else {
            any_failed = true;
            continue;
        };
        let result = schema.check_lossless_join();
        any_failed |= !result.lossless;

        if args.json {
            let mut output = serde_json::json!({
                "file": filename,
                "ok": true,
                "lossless": result.lossless,
                "row": result.row,
                "passes": result.passes,
            });
            if args.verbose {
                output["tableau"] = serde_json::json!(result.tableau);
            }
            println!("{output}");
        } else {
            let verdict = if result.lossless { "SATISFIES LJ" } else { "FAILS LJ" };
            println!("{filename}: {verdict}");
            if args.verbose {
                print!("{}", result.tableau);
            }
        }
    }

    if any_failed {
        process::exit(1);
    }
}

fn fmt(args: &fdnorm_cli::FmtArgs) {
    let mut any_unformatted = false;

    for path in inputs(&args.paths) {
        if path.extension().is_some_and(|ext| ext == fdnorm_cli::JSON_EXTENSION) {
            continue;
        }
        let filename = path.display().to_string();
        let source = fs::read_to_string(&path).unwrap_or_else(|e| {
            eprintln!("Failed to read {filename}: {e}");
            process::exit(1);
        });
        let relation = parse_source(&path, &source).unwrap_or_else(|e| {
            eprintln!("{filename}: {e}");
            process::exit(1);
        });
        let formatted = format_relation(&relation);
        if formatted == source {
            continue;
        }

        if args.check {
            println!("{filename}: not formatted");
            any_unformatted = true;
        } else {
            fs::write(&path, formatted).unwrap_or_else(|e| {
                eprintln!("Failed to write {filename}: {e}");
                process::exit(1);
            });
            println!("{filename}: formatted");
        }
    }

    if any_unformatted {
        process::exit(1);
    }
}

fn generate(args: &fdnorm_cli::GenerateArgs) {
    fs::create_dir_all(&args.output_dir).unwrap_or_else(|e| {
        eprintln!("Failed to create output directory: {e}");
        process::exit(1);
    });

    let relations = fdnorm_testgen::generator::generate_mult_relations(
        args.n_relation,
        args.n_attribute,
        args.n_dependency,
        args.max_determinant,
        args.n_part,
    );

    for relation in &relations {
        let path = args.output_dir.join(format!("{}.json", relation.get_id()));
        let file = fs::File::create(&path).unwrap_or_else(|e| {
            eprintln!("Failed to create {}: {e}", path.display());
            process::exit(1);
        });
        serde_json::to_writer_pretty(file, relation).unwrap_or_else(|e| {
            eprintln!("Failed to write {}: {e}", path.display());
            process::exit(1);
        });
    }

    println!(
        "Generated {} relations to {}",
        relations.len(),
        args.output_dir.display()
    );
}

fn schema() {
    let schema = schemars::schema_for!(RelationDescription<String>);
    let rendered = serde_json::to_string_pretty(&schema).unwrap_or_else(|e| {
        eprintln!("Failed to render schema: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}
