//! Orchestration of a single PATH modification against live machine state:
//! resolve the target, apply the guards and the engine operation, persist
//! the result through PowerShell.

use std::path::Path;

use log::{debug, info};

use crate::error::{ErrorKind, ExitCode, Fallible};
use crate::path_list::PathList;
use crate::refresh;
use crate::resolve::resolve_target;
use crate::scope::Scope;
use crate::session::Session;

/// Which transformation to apply to the PATH.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Op {
    Append,
    Prepend,
    Remove,
}

/// Options for one modification, built once from the parsed command line
/// and passed explicitly through the pipeline.
pub struct ModifyOptions {
    pub op: Op,
    pub location: String,
    pub scope: Scope,
    pub force: bool,
    pub dry_run: bool,
}

/// Resolves the target, transforms the persisted PATH, and writes it back
/// (or prints the write command in dry-run mode).
///
/// # Errors
///
/// Returns the guard errors (`LocationNotFound`, `AlreadyOnPath`,
/// `NotOnPath`), resolution errors, and PowerShell invocation errors.
pub fn modify_path(session: &Session, options: &ModifyOptions) -> Fallible<ExitCode> {
    let target = resolve_target(&options.location)?;

    if options.op != Op::Remove {
        if !options.force && !target.exists() {
            return Err(ErrorKind::LocationNotFound { target }.into());
        }
        info!(
            "Adding '{}' to the {} PATH...",
            target.display(),
            options.scope
        );
    }

    let shell = session.shell()?;
    let current = shell.read_path(options.scope)?;
    debug!("Current {} PATH: {current}", options.scope);

    let mut list = PathList::parse(&current);
    for entry in apply(&mut list, options, &target)? {
        info!("Removing '{entry}' from the {} PATH", options.scope);
    }
    let updated = list.serialize();

    if options.dry_run {
        info!("This is the command we would run:\n");
        println!("{}", shell.render_write_command(options.scope, &updated));
        return Ok(ExitCode::Success);
    }

    shell.write_path(options.scope, &updated)?;
    info!("PATH updated persistently.");
    refresh::print_refresh_hint();
    Ok(ExitCode::Success)
}

/// Applies the already-present guard and the engine operation to an
/// in-memory list, returning the removed entries (empty for additions).
fn apply(list: &mut PathList, options: &ModifyOptions, target: &Path) -> Fallible<Vec<String>> {
    let target_text = target.to_string_lossy();
    match options.op {
        Op::Append | Op::Prepend => {
            if !options.force && list.contains(&target_text) {
                return Err(ErrorKind::AlreadyOnPath {
                    target: target.to_owned(),
                }
                .into());
            }
            if options.op == Op::Prepend {
                list.prepend(&target_text);
            } else {
                list.append(&target_text);
            }
            Ok(Vec::new())
        }
        Op::Remove => list.remove(target, options.scope),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{ModifyOptions, Op, apply};
    use crate::error::ErrorKind;
    use crate::path_list::PathList;
    use crate::scope::Scope;

    fn options(op: Op, location: &str, force: bool) -> ModifyOptions {
        ModifyOptions {
            op,
            location: location.to_owned(),
            scope: Scope::User,
            force,
            dry_run: false,
        }
    }

    #[test]
    fn adding_an_existing_entry_fails_without_force() {
        let mut list = PathList::parse("C:\\A;C:\\B");
        let err = apply(
            &mut list,
            &options(Op::Append, "C:\\A", false),
            Path::new("C:\\A"),
        )
        .expect_err("The duplicate should have been rejected");

        assert!(matches!(err.kind(), ErrorKind::AlreadyOnPath { .. }));
        assert_eq!(list.serialize(), "C:\\A;C:\\B");
    }

    #[test]
    fn force_allows_a_duplicate_entry() {
        let mut list = PathList::parse("C:\\A;C:\\B");
        apply(
            &mut list,
            &options(Op::Append, "C:\\A", true),
            Path::new("C:\\A"),
        )
        .expect("Force should bypass the duplicate guard");

        assert_eq!(list.serialize(), "C:\\A;C:\\B;C:\\A");
    }

    #[test]
    fn prepend_moves_the_target_to_the_front() {
        let mut list = PathList::parse("C:\\A;C:\\B");
        apply(
            &mut list,
            &options(Op::Prepend, "C:\\C", false),
            Path::new("C:\\C"),
        )
        .expect("Prepend should succeed");

        assert_eq!(list.serialize(), "C:\\C;C:\\A;C:\\B");
    }

    #[test]
    fn removing_a_missing_entry_fails_and_keeps_the_list() {
        let mut list = PathList::parse("C:\\A;C:\\B");
        let err = apply(
            &mut list,
            &options(Op::Remove, "C:\\Z", false),
            Path::new("C:\\Z"),
        )
        .expect_err("Nothing should have matched");

        assert!(matches!(err.kind(), ErrorKind::NotOnPath { .. }));
        assert_eq!(list.serialize(), "C:\\A;C:\\B");
    }

    #[test]
    fn removal_reports_every_removed_entry() {
        let mut list = PathList::parse("C:\\A;C:\\B;C:\\A");
        let removed = apply(
            &mut list,
            &options(Op::Remove, "C:\\A", false),
            Path::new("C:\\A"),
        )
        .expect("Matches should have been removed");

        assert_eq!(removed.len(), 2);
        assert_eq!(list.serialize(), "C:\\B");
    }
}
