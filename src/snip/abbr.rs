//! # Abbreviations
//!
//! A snippet may declare `# abbr: gs gst` to have its body registered with an
//! abbreviation expander (zsh-abbr). Registration happens in the shell: this
//! module only produces the `abbr add` lines for the integration to `eval`.

use crate::model::Snippet;
use std::collections::HashSet;

/// One key to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abbreviation {
    pub key: String,
    pub name: String,
    pub expansion: String,
}

/// Keys declared by `snippets`, in snippet order.
///
/// A key claimed by an earlier snippet is reported in `skipped` and not
/// registered twice. Multi-line bodies cannot be expanded inline and are
/// skipped too.
pub fn collect(snippets: &[Snippet]) -> (Vec<Abbreviation>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut abbreviations = Vec::new();
    let mut skipped = Vec::new();

    for snippet in snippets {
        for key in snippet.header.abbr_keys() {
            if snippet.body.contains('\n') {
                skipped.push(format!(
                    "{}: '{}' has a multi-line body",
                    key, snippet.name
                ));
                continue;
            }
            if !seen.insert(key.to_string()) {
                skipped.push(format!("{}: already used, ignored for '{}'", key, snippet.name));
                continue;
            }
            abbreviations.push(Abbreviation {
                key: key.to_string(),
                name: snippet.name.clone(),
                expansion: snippet.body.clone(),
            });
        }
    }
    (abbreviations, skipped)
}

/// Shell command registering one abbreviation for the current session.
pub fn registration_command(abbr: &Abbreviation) -> String {
    let pair = format!("{}={}", abbr.key, abbr.expansion);
    format!("abbr add --session --quiet {}", shell_words::quote(&pair))
}
