//! Evaluator for `transform` steps: deterministic mapping of prior steps'
//! bindings to a string output, no LLM involved (§4.16).
//!
//! Syntax mirrors the teacher's `${namespace.field}` template interpolation
//! (`runbook::template::interpolate`), narrowed to the two namespaces a
//! workflow step can reference: `args.<name>` and `<step>.output` /
//! `<step>.structured_data`.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::run_store::StepBinding;

fn var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        #[allow(clippy::expect_used)]
        Regex::new(r"\$\{([a-zA-Z_][a-zA-Z0-9_]*)\.([a-zA-Z_][a-zA-Z0-9_]*)\}").expect("static template pattern")
    })
}

/// Substitute every `${step.output}` / `${step.structured_data}` /
/// `${args.name}` placeholder in `expr` against `bindings` and `args`.
/// Unknown placeholders are left as-is, matching the teacher's
/// "unknown template variables are left alone" interpolation rule.
pub fn evaluate(expr: &str, bindings: &HashMap<String, StepBinding>, args: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut last = 0;
    for caps in var_pattern().captures_iter(expr) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&expr[last..whole.start()]);
        let namespace = &caps[1];
        let field = &caps[2];
        let resolved = if namespace == "args" {
            args.get(field).cloned()
        } else {
            bindings.get(namespace).and_then(|b| match field {
                "output" => Some(b.output.clone()),
                "structured_data" => b.structured_data.clone(),
                _ => None,
            })
        };
        match resolved {
            Some(value) => out.push_str(&value),
            None => out.push_str(whole.as_str()),
        }
        last = whole.end();
    }
    out.push_str(&expr[last..]);
    out
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
