use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Matches `{{ env.VAR }}` and `{{ env.VAR | default("fallback") }}`
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*env\.([A-Za-z0-9_]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
        .expect("must be valid regex")
});

/// Expand `{{ env.VAR }}` placeholders in a raw TOML string
///
/// A `| default("fallback")` clause supplies a value when the variable is
/// unset; without one, an unset variable is an error. TOML comment lines
/// pass through unchanged.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut missing: Option<String> = None;

    let expanded: Vec<String> = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_owned();
            }

            PLACEHOLDER_RE
                .replace_all(line, |caps: &Captures| {
                    let var = &caps[1];
                    match std::env::var(var) {
                        Ok(value) => value,
                        Err(_) => match caps.get(2) {
                            Some(default) => default.as_str().to_owned(),
                            None => {
                                missing.get_or_insert_with(|| var.to_owned());
                                String::new()
                            }
                        },
                    }
                })
                .into_owned()
        })
        .collect();

    match missing {
        Some(var) => Err(format!("environment variable not found: `{var}`")),
        None => Ok(expanded.join("\n")),
    }
}
