//! Filesystem traversal for candidate Java launchers.
//!
//! The walk is deliberately forgiving: discovery is best-effort, so a
//! permission error on one entry must never sink a whole scan. Only a
//! root-level read failure aborts that root, and even then the remaining
//! roots still proceed.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Installation;

use super::verify;

/// Directory names never descended into. System directories and dependency
/// caches are both enormous and guaranteed not to hold a JDK root.
const IGNORED_DIRS: &[&str] = &[
    "Windows",
    "ProgramData",
    "$Recycle.Bin",
    "System Volume Information",
    ".git",
    "node_modules",
];

/// An unverified hit: a launcher-shaped file inside a `bin` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path to the launcher executable itself.
    pub executable: PathBuf,

    /// Parent of the `bin` directory; the installation root.
    pub install_root: PathBuf,
}

/// Scan the given roots for verified Java installations.
///
/// Each candidate is verified in discovery order via a blocking child
/// process; failures drop the candidate silently. An empty result is a
/// valid, non-error outcome.
pub fn scan(roots: &[PathBuf]) -> Vec<Installation> {
    let mut installations = Vec::new();

    for candidate in collect_candidates(roots) {
        match verify::verify(&candidate.executable, &candidate.install_root) {
            Ok(inst) => {
                tracing::debug!(root = %candidate.install_root.display(), version = %inst.version, "verified installation");
                installations.push(inst);
            }
            Err(err) => {
                tracing::debug!(
                    executable = %candidate.executable.display(),
                    error = %err,
                    "dropping candidate"
                );
            }
        }
    }

    installations
}

/// Walk the roots and collect deduplicated, unverified candidates.
///
/// Nonexistent roots are skipped silently. Deduplication is by install root:
/// the first launcher found under a root wins and later hits for the same
/// root are dropped without re-verification.
pub fn collect_candidates(roots: &[PathBuf]) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut seen_roots: HashSet<PathBuf> = HashSet::new();

    for root in roots {
        if !root.exists() {
            tracing::debug!(root = %root.display(), "scan root does not exist, skipping");
            continue;
        }

        if let Err(err) = walk_dir(root, &mut candidates, &mut seen_roots) {
            tracing::warn!(root = %root.display(), error = %err, "aborting scan root");
        }
    }

    candidates
}

/// Depth-first walk of a single directory.
///
/// Returns `Err` only when the directory itself cannot be read; that error
/// aborts the current root when it surfaces at the top of the recursion and
/// is swallowed everywhere below it.
fn walk_dir(
    dir: &Path,
    candidates: &mut Vec<Candidate>,
    seen_roots: &mut HashSet<PathBuf>,
) -> std::io::Result<()> {
    let entries = fs::read_dir(dir)?;

    for entry in entries {
        let Ok(entry) = entry else {
            continue;
        };

        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            let name = entry.file_name();
            if is_ignored_dir(&name.to_string_lossy()) {
                continue;
            }
            // Errors below the root are per-entry errors: swallow and go on.
            let _ = walk_dir(&path, candidates, seen_roots);
            continue;
        }

        if !file_type.is_file() {
            continue;
        }

        if !is_launcher_name(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let Some(bin_dir) = path.parent() else {
            continue;
        };
        let in_bin = bin_dir
            .file_name()
            .map(|n| n.to_string_lossy().eq_ignore_ascii_case("bin"))
            .unwrap_or(false);
        if !in_bin {
            continue;
        }

        let Some(install_root) = bin_dir.parent() else {
            continue;
        };
        let install_root = install_root.to_path_buf();
        if seen_roots.insert(install_root.clone()) {
            candidates.push(Candidate {
                executable: path,
                install_root,
            });
        }
    }

    Ok(())
}

fn is_ignored_dir(name: &str) -> bool {
    IGNORED_DIRS.iter().any(|ignored| *ignored == name)
}

fn is_launcher_name(name: &str) -> bool {
    name.eq_ignore_ascii_case("java") || name.eq_ignore_ascii_case("java.exe")
}

/// Default scan roots for the current platform, used when the `scan`
/// command receives no explicit paths.
pub fn default_scan_roots() -> Vec<PathBuf> {
    if cfg!(target_os = "windows") {
        vec![
            PathBuf::from(r"C:\Program Files\Java"),
            PathBuf::from(r"C:\Program Files (x86)\Java"),
        ]
    } else {
        vec![
            PathBuf::from("/usr/lib/jvm"),
            PathBuf::from("/usr/java"),
            PathBuf::from("/Library/Java/JavaVirtualMachines"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Lay out `<base>/<root_name>/bin/java` and return the install root.
    fn make_install(base: &Path, root_name: &str) -> PathBuf {
        let root = base.join(root_name);
        let bin = root.join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("java"), b"").unwrap();
        root
    }

    #[test]
    fn finds_launcher_under_bin() {
        let temp = TempDir::new().unwrap();
        let root = make_install(temp.path(), "jdk-17");

        let candidates = collect_candidates(&[temp.path().to_path_buf()]);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].install_root, root);
        assert_eq!(candidates[0].executable, root.join("bin").join("java"));
    }

    #[test]
    fn launcher_outside_bin_is_not_a_candidate() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("jdk-17").join("lib");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("java"), b"").unwrap();

        let candidates = collect_candidates(&[temp.path().to_path_buf()]);
        assert!(candidates.is_empty());
    }

    #[test]
    fn launcher_name_matches_case_insensitively() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("jdk").join("BIN");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("Java.exe"), b"").unwrap();

        let candidates = collect_candidates(&[temp.path().to_path_buf()]);
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn unrelated_files_in_bin_are_skipped() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("jdk").join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("javac"), b"").unwrap();
        fs::write(bin.join("javadoc"), b"").unwrap();

        let candidates = collect_candidates(&[temp.path().to_path_buf()]);
        assert!(candidates.is_empty());
    }

    #[test]
    fn nonexistent_root_is_skipped_silently() {
        let temp = TempDir::new().unwrap();
        let root = make_install(temp.path(), "jdk-11");

        let roots = vec![
            PathBuf::from("/definitely/not/a/real/path"),
            temp.path().to_path_buf(),
        ];
        let candidates = collect_candidates(&roots);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].install_root, root);
    }

    #[test]
    fn ignored_directories_are_pruned_subtree_wide() {
        let temp = TempDir::new().unwrap();
        // A launcher nested below an ignored directory must never be seen.
        let hidden = temp
            .path()
            .join("node_modules")
            .join("some-package")
            .join("jdk")
            .join("bin");
        fs::create_dir_all(&hidden).unwrap();
        fs::write(hidden.join("java"), b"").unwrap();

        let git = temp.path().join(".git").join("objects").join("bin");
        fs::create_dir_all(&git).unwrap();
        fs::write(git.join("java"), b"").unwrap();

        make_install(temp.path(), "jdk-17");

        let candidates = collect_candidates(&[temp.path().to_path_buf()]);
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].install_root.ends_with("jdk-17"));
    }

    #[test]
    fn duplicate_launchers_under_one_root_yield_one_candidate() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("jdk-17");
        let bin = root.join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("java"), b"").unwrap();
        fs::write(bin.join("java.exe"), b"").unwrap();

        let candidates = collect_candidates(&[temp.path().to_path_buf()]);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].install_root, root);
    }

    #[test]
    fn multiple_roots_accumulate_in_discovery_order() {
        let temp_a = TempDir::new().unwrap();
        let temp_b = TempDir::new().unwrap();
        let root_a = make_install(temp_a.path(), "jdk-8");
        let root_b = make_install(temp_b.path(), "jdk-17");

        let candidates = collect_candidates(&[
            temp_a.path().to_path_buf(),
            temp_b.path().to_path_buf(),
        ]);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].install_root, root_a);
        assert_eq!(candidates[1].install_root, root_b);
    }

    #[test]
    fn empty_tree_scans_to_empty_result() {
        let temp = TempDir::new().unwrap();
        let installations = scan(&[temp.path().to_path_buf()]);
        assert!(installations.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn scan_verifies_candidates_end_to_end() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let root = temp.path().join("zulu-11");
        let bin = root.join("bin");
        fs::create_dir_all(&bin).unwrap();
        let exe = bin.join("java");
        fs::write(
            &exe,
            "#!/bin/sh\necho 'openjdk version \"11.0.14\" 2022-01-18 Zulu11.54+23-CA' 1>&2\n",
        )
        .unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();

        // A broken candidate alongside must be dropped, not fatal.
        let broken_bin = temp.path().join("corrupt").join("bin");
        fs::create_dir_all(&broken_bin).unwrap();
        fs::write(broken_bin.join("java"), b"not a program").unwrap();

        let installations = scan(&[temp.path().to_path_buf()]);
        assert_eq!(installations.len(), 1);
        assert_eq!(installations[0].version, "11.0.14");
        assert_eq!(installations[0].path, root);
    }
}
