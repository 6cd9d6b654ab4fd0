//! Resolution of a user-supplied location argument into the canonical
//! absolute path that is stored on, or matched against, the PATH.

use std::borrow::Cow;
use std::env;
use std::path::{Component, Path, PathBuf};

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{Context, ErrorKind, Fallible};

/// Matches `%VAR%`, `${VAR}` and `$VAR` environment references.
static ENV_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%([^%]+)%|\$\{([^}]+)\}|\$(\w+)").expect("regex is valid"));

/// Resolves a raw location argument to the absolute path used for
/// comparison and storage.
///
/// Resolution order matches the persisted-PATH conventions: the shell
/// quote artifact is dealt with first, then `~` and environment-variable
/// references are expanded, then the result is absolutized lexically (the
/// target may legitimately not exist when adding with `--force`). A
/// target naming an existing file resolves to its containing directory.
///
/// # Errors
///
/// Returns `UnparseablePath` for quote patterns other than the known
/// artifact, and propagates home-directory and current-directory lookup
/// failures.
pub fn resolve_target(raw: &str) -> Fallible<PathBuf> {
    let cleaned = strip_quote_artifact(raw)?;
    let home_expanded = expand_home(cleaned)?;
    let expanded = expand_env(&home_expanded);
    let absolute = absolutize(Path::new(expanded.as_ref()))?;

    if absolute.is_file() {
        info!(
            "'{}' is a file; using its parent directory instead.",
            absolute.display()
        );
        return absolute
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| ErrorKind::ContainingDir { path: absolute.clone() }.into());
    }
    Ok(absolute)
}

/// Handles the stray quotation mark CMD and PowerShell 5 deliver for a
/// quoted path ending in a backslash: `".\my path\"` arrives as
/// `.\my path"`. Exactly one quote, at the end of the argument, is that
/// artifact and is stripped; any other quote pattern is rejected outright
/// rather than repaired heuristically.
fn strip_quote_artifact(raw: &str) -> Fallible<&str> {
    if !raw.contains('"') {
        return Ok(raw);
    }
    if raw.matches('"').count() == 1 {
        if let Some(stripped) = raw.strip_suffix('"') {
            debug!("Stripped the CMD/Powershell 5 trailing-quote artifact from '{raw}'");
            return Ok(stripped);
        }
    }
    Err(ErrorKind::UnparseablePath { raw: raw.to_owned() }.into())
}

/// Expands a leading `~` to the home directory.
fn expand_home(raw: &str) -> Fallible<Cow<'_, str>> {
    if raw != "~" && !raw.starts_with("~/") && !raw.starts_with("~\\") {
        return Ok(Cow::Borrowed(raw));
    }
    let home = dirs::home_dir().ok_or(ErrorKind::NoHomeDir)?;
    let rest = raw[1..].trim_start_matches(['/', '\\']);
    let expanded = if rest.is_empty() {
        home
    } else {
        home.join(rest)
    };
    Ok(Cow::Owned(expanded.to_string_lossy().into_owned()))
}

/// Expands environment-variable references, leaving unknown variables
/// untouched.
fn expand_env(raw: &str) -> Cow<'_, str> {
    ENV_REFERENCE.replace_all(raw, |caps: &Captures<'_>| {
        let name = caps
            .get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map_or("", |m| m.as_str());
        env::var(name).unwrap_or_else(|_| caps[0].to_owned())
    })
}

/// Lexically absolutizes `path` against the current directory, collapsing
/// `.` and `..` segments without touching the filesystem.
fn absolutize(path: &Path) -> Fallible<PathBuf> {
    if path.is_absolute() {
        return Ok(clean(path));
    }
    let base = env::current_dir().with_context(|| ErrorKind::CurrentDir)?;
    Ok(clean(&base.join(path)))
}

fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `..` above the root is dropped, as in lexical absolutization
            Component::ParentDir => {
                cleaned.pop();
            }
            _ => cleaned.push(component.as_os_str()),
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs::File;
    use std::path::Path;

    use super::{clean, expand_env, expand_home, resolve_target, strip_quote_artifact};
    use crate::error::ErrorKind;

    #[test]
    fn quote_free_arguments_pass_through() {
        assert_eq!(
            strip_quote_artifact("C:\\tools").expect("Should parse"),
            "C:\\tools"
        );
    }

    #[test]
    fn single_trailing_quote_is_stripped() {
        assert_eq!(
            strip_quote_artifact("C:\\my tools\"").expect("Should parse"),
            "C:\\my tools"
        );
    }

    #[test]
    fn other_quote_patterns_are_rejected() {
        for raw in ["C:\\\"my\" tools", "\"C:\\tools\"", "C:\\to\"ols"] {
            let err = strip_quote_artifact(raw).expect_err("Should have been rejected");
            assert!(matches!(err.kind(), ErrorKind::UnparseablePath { .. }));
        }
    }

    #[test]
    fn environment_references_are_expanded() {
        let path = env::var("PATH").expect("PATH should be set in the test environment");
        assert_eq!(expand_env("%PATH%"), path);
        assert_eq!(expand_env("$PATH"), path);
        assert_eq!(expand_env("${PATH}"), path);
    }

    #[test]
    fn unknown_variables_are_left_untouched() {
        assert_eq!(
            expand_env("%PATHMAN_SURELY_NOT_SET%"),
            "%PATHMAN_SURELY_NOT_SET%"
        );
    }

    #[test]
    fn tilde_expands_to_the_home_directory() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(
            expand_home("~").expect("Should expand").as_ref(),
            home.to_string_lossy()
        );
        assert_eq!(
            expand_home("~/tools").expect("Should expand").as_ref(),
            home.join("tools").to_string_lossy()
        );
    }

    #[test]
    fn tilde_in_the_middle_is_not_expanded() {
        assert_eq!(
            expand_home("C:\\~tools").expect("Should pass through").as_ref(),
            "C:\\~tools"
        );
    }

    #[test]
    fn clean_collapses_relative_segments() {
        assert_eq!(clean(Path::new("/a/./b/../c")), Path::new("/a/c"));
        assert_eq!(clean(Path::new("/a/b/..")), Path::new("/a"));
        assert_eq!(clean(Path::new("/..")), Path::new("/"));
    }

    #[test]
    fn relative_targets_resolve_under_the_current_directory() {
        let resolved = resolve_target("some-relative-dir").expect("Should resolve");
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some-relative-dir"));
    }

    #[test]
    fn file_targets_resolve_to_their_containing_directory() {
        let root = tempfile::tempdir().expect("Could not create temporary directory");
        let file = root.path().join("tool.exe");
        File::create(&file).expect("Could not create file");

        // resolution is lexical, so the parent comes back exactly as given
        let resolved =
            resolve_target(&file.display().to_string()).expect("Should resolve");
        assert_eq!(resolved, root.path());
    }
}
