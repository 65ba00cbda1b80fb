//! Deployment script patching
//!
//! Rewrites four fields inside the freshly staged deployment script:
//! the application version assignment, the install invocation's file path
//! argument, and the two Active Setup registry key fragments (WOW6432Node and
//! native branches).
//!
//! Each substitution anchors on structural shape — keyword plus argument name
//! plus quoted value — never on the value previously present, so re-running
//! against an already patched script re-matches and yields the same text.
//! The four patterns are independent: a miss on one never blocks the others,
//! and every miss is reported rather than swallowed. A silently unpatched
//! field ships a stale version or identifier into production, which is far
//! harder to detect than a visible warning here.
//!
//! Replacement values are inserted through closure replacers, so `$` and
//! brace characters in a product code are taken literally.

use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::Result;

static APP_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?P<head>.*?\$appVersion\s*=\s*')(?P<old>[^'\r\n]*)(?P<tail>')")
        .expect("valid pattern")
});

static INSTALL_FILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(?P<head>.*?Start-ADTMsiProcess\b.*?-FilePath\s+')(?P<old>[^'\r\n]*)(?P<tail>')",
    )
    .expect("valid pattern")
});

static ACTIVE_SETUP_X86: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(?P<head>.*?SOFTWARE\\WOW6432Node\\Microsoft\\Active Setup\\Installed Components\\)\{(?P<old>[^}\r\n]*)\}",
    )
    .expect("valid pattern")
});

static ACTIVE_SETUP_NATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^(?P<head>.*?SOFTWARE\\Microsoft\\Active Setup\\Installed Components\\)\{(?P<old>[^}\r\n]*)\}",
    )
    .expect("valid pattern")
});

/// The four patched fields, in application order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchField {
    /// Quoted value of the `$appVersion = '…'` assignment
    AppVersion,
    /// Quoted `-FilePath '…'` argument of the `Start-ADTMsiProcess` line
    InstallFile,
    /// `{…}` segment of the WOW6432Node Active Setup component key
    ActiveSetupX86,
    /// `{…}` segment of the native Active Setup component key
    ActiveSetupNative,
}

impl PatchField {
    /// All fields in application order
    pub const ALL: [PatchField; 4] = [
        PatchField::AppVersion,
        PatchField::InstallFile,
        PatchField::ActiveSetupX86,
        PatchField::ActiveSetupNative,
    ];

    /// Operator-facing label
    pub fn label(self) -> &'static str {
        match self {
            PatchField::AppVersion => "application version",
            PatchField::InstallFile => "install file path",
            PatchField::ActiveSetupX86 => "Active Setup key (WOW6432Node)",
            PatchField::ActiveSetupNative => "Active Setup key (native)",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            PatchField::AppVersion => &APP_VERSION,
            PatchField::InstallFile => &INSTALL_FILE,
            PatchField::ActiveSetupX86 => &ACTIVE_SETUP_X86,
            PatchField::ActiveSetupNative => &ACTIVE_SETUP_NATIVE,
        }
    }
}

impl std::fmt::Display for PatchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one pattern-anchored substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Anchor matched and the text changed
    Applied,
    /// Anchor matched but the value was already current
    Unchanged,
    /// Anchor did not match; probable template drift
    NoMatch,
}

/// Per-pattern results of one patch run
#[derive(Debug, Clone)]
pub struct PatchReport {
    pub results: Vec<(PatchField, PatchOutcome)>,
    /// Whether the script file was written back
    pub wrote: bool,
}

impl PatchReport {
    /// Fields whose anchor did not match
    pub fn unmatched(&self) -> impl Iterator<Item = PatchField> + '_ {
        self.results
            .iter()
            .filter(|(_, o)| *o == PatchOutcome::NoMatch)
            .map(|(f, _)| *f)
    }
}

/// Patches a deployment script with derived deployment values
pub struct ScriptPatcher {
    version: String,
    artifact_name: String,
    product_code: String,
}

impl ScriptPatcher {
    pub fn new(
        version: impl Into<String>,
        artifact_name: impl Into<String>,
        product_code: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            artifact_name: artifact_name.into(),
            product_code: product_code.into(),
        }
    }

    /// Patch a script file in place
    ///
    /// The file is written back in one pass iff at least one substitution
    /// changed the text; otherwise it is left untouched.
    pub fn patch_file(&self, script: &Path) -> Result<PatchReport> {
        let text = std::fs::read_to_string(script)
            .map_err(|e| crate::error::read_failed(script, &e))?;

        let (patched, results) = self.apply(&text);
        let wrote = results
            .iter()
            .any(|(_, outcome)| *outcome == PatchOutcome::Applied);
        if wrote {
            std::fs::write(script, patched).map_err(|e| crate::error::write_failed(script, &e))?;
        }

        Ok(PatchReport { results, wrote })
    }

    /// Apply all four substitutions to a script text
    pub fn apply(&self, text: &str) -> (String, Vec<(PatchField, PatchOutcome)>) {
        let mut current = text.to_string();
        let mut results = Vec::with_capacity(PatchField::ALL.len());
        for field in PatchField::ALL {
            let (next, outcome) = self.apply_one(field, &current);
            current = next;
            results.push((field, outcome));
        }
        (current, results)
    }

    fn apply_one(&self, field: PatchField, text: &str) -> (String, PatchOutcome) {
        let re = field.pattern();
        if !re.is_match(text) {
            return (text.to_string(), PatchOutcome::NoMatch);
        }

        let value = self.value_for(field);
        let replaced = re.replace_all(text, |caps: &Captures| {
            let head = caps.name("head").map_or("", |m| m.as_str());
            let tail = caps.name("tail").map_or("", |m| m.as_str());
            format!("{head}{value}{tail}")
        });

        if replaced.as_ref() == text {
            (text.to_string(), PatchOutcome::Unchanged)
        } else {
            (replaced.into_owned(), PatchOutcome::Applied)
        }
    }

    /// Replacement value for a field
    ///
    /// The registry fragments embed the identifier in braced form; the
    /// patterns consume the old braces, so braces are reattached here.
    fn value_for(&self, field: PatchField) -> String {
        match field {
            PatchField::AppVersion => self.version.clone(),
            PatchField::InstallFile => self.artifact_name.clone(),
            PatchField::ActiveSetupX86 | PatchField::ActiveSetupNative => {
                braced(&self.product_code)
            }
        }
    }
}

/// Normalize a product identifier to brace-delimited form
fn braced(product_code: &str) -> String {
    if product_code.starts_with('{') && product_code.ends_with('}') {
        product_code.to_string()
    } else {
        format!("{{{product_code}}}")
    }
}
