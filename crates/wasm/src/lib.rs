//! wasm library for fdnorm
//! compiled binary is uploaded as github action artifact

#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use fdnorm_core::schema::display::format_relation;
use fdnorm_core::{RelationDescription, Schema};
use wasm_bindgen::prelude::*;

fn error_json(error: &str) -> String {
    serde_json::json!({"ok": false, "error": error}).to_string()
}

/// Parse `input` as the text DSL (`"text"`) or a JSON document (`"json"`)
/// and validate it.
fn load(input: &str, format: &str) -> Result<Schema<String>, String> {
    let relation: RelationDescription<String> = match format {
        "text" => fdnorm_parser::parse_relation(input).map_err(|e| e.to_string())?,
        "json" => serde_json::from_str(input).map_err(|e| e.to_string())?,
        _ => return Err("unknown input format".to_string()),
    };
    Schema::try_from(relation).map_err(|e| e.to_string())
}

/// Minimise the dependencies, find a key and decompose into BCNF.
///
/// Returns a JSON string:
/// - On success: `{"ok":true,"attributes":[...],"key":[...],"dependencies":[...],
///   "decomposition":[[...],...],"report":"...","text":"..."}` where `text` is
///   the normalised relation in the text DSL.
/// - On invalid input: `{"ok":false,"error":"<description>"}`
#[must_use]
#[wasm_bindgen]
pub fn decompose(input: &str, format: &str) -> String {
    let mut schema = match load(input, format) {
        Ok(schema) => schema,
        Err(e) => return error_json(&e),
    };
    schema.decompose_bcnf();
    serde_json::json!({
        "ok": true,
        "attributes": schema.attributes(),
        "key": schema.key(),
        "dependencies": schema.dependencies(),
        "decomposition": schema.parts(),
        "report": schema.to_string(),
        "text": format_relation(&schema.to_description()),
    })
    .to_string()
}

/// Run the chase on the decomposition given in the input.
///
/// On success: `{"ok":true,"lossless":bool,"row":n|null,"passes":n,
/// "tableau":{...},"rendered":"..."}`. On invalid input:
/// `{"ok":false,"error":"<description>"}`.
#[must_use]
#[wasm_bindgen]
pub fn check_lossless_join(input: &str, format: &str) -> String {
    let schema = match load(input, format) {
        Ok(schema) => schema,
        Err(e) => return error_json(&e),
    };
    let result = schema.check_lossless_join();
    serde_json::json!({
        "ok": true,
        "lossless": result.lossless,
        "row": result.row,
        "passes": result.passes,
        "rendered": result.tableau.to_string(),
        "tableau": result.tableau,
    })
    .to_string()
}

/// Tokenize the text DSL for syntax highlighting.
///
/// Returns `{"ok":true,"tokens":[{"kind":"Ident","start":0,"end":1,"text":"A"},...]}`.
#[must_use]
#[wasm_bindgen]
pub fn tokenize(input: &str) -> String {
    let tokens: Vec<serde_json::Value> = fdnorm_parser::tokenize_with_text(input)
        .into_iter()
        .map(|(token, text)| {
            serde_json::json!({
                "kind": token.kind,
                "start": token.span.start,
                "end": token.span.end,
                "text": text,
            })
        })
        .collect();
    serde_json::json!({"ok": true, "tokens": tokens}).to_string()
}
