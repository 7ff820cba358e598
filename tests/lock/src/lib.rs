//! Shared worlds, digest helpers and fixture-spawning helpers for the lock
//! tests and the cross-process fixture binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use sha2::{Digest, Sha256};

/// Domain prefix for visited-sequence digests.
pub const DOMAIN_TRAVERSAL_SEQUENCE: &[u8] = b"FORAGE::TRAVERSAL_SEQUENCE::V1\0";

/// Domain prefix for policy digests.
pub const DOMAIN_EXPLORE_POLICY: &[u8] = b"FORAGE::EXPLORE_POLICY::V1\0";

/// `"sha256:" || hex(sha256(domain || data))`.
#[must_use]
pub fn canonical_digest(domain: &[u8], data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}

/// Digest of a visited sequence, rendered as compact JSON.
///
/// # Panics
///
/// Panics if the sequence cannot be rendered as JSON (test-only invariant).
#[must_use]
pub fn sequence_digest<T: serde::Serialize>(sequence: &[T]) -> String {
    let bytes = serde_json::to_vec(sequence).expect("sequence serializes");
    canonical_digest(DOMAIN_TRAVERSAL_SEQUENCE, &bytes)
}

/// `n -> [n + 1, n + 2]`: the canonical branching space.
#[must_use]
pub fn fork(n: &u64) -> Option<Vec<u64>> {
    Some(vec![n + 1, n + 2])
}

/// A cell of the square lattice world.
pub type Cell = (i32, i32);

/// Side length of the lattice world.
pub const LATTICE_SIDE: i32 = 6;

/// Goal cell of the lattice world (opposite corner from the origin).
pub const LATTICE_GOAL: Cell = (LATTICE_SIDE - 1, LATTICE_SIDE - 1);

/// Four-neighborhood of `cell`, clipped to the lattice, in a fixed order.
///
/// The goal is terminal: it returns the "no expansion" marker.
#[must_use]
pub fn lattice_neighbors(cell: &Cell) -> Option<Vec<Cell>> {
    if *cell == LATTICE_GOAL {
        return None;
    }
    let (x, y) = *cell;
    let neighbors = [(x + 1, y), (x, y + 1), (x - 1, y), (x, y - 1)]
        .into_iter()
        .filter(|&(nx, ny)| (0..LATTICE_SIDE).contains(&nx) && (0..LATTICE_SIDE).contains(&ny))
        .collect();
    Some(neighbors)
}

/// Manhattan distance to the lattice goal (best-first priority).
#[must_use]
pub fn distance_to_goal(cell: &Cell) -> i32 {
    (LATTICE_GOAL.0 - cell.0).abs() + (LATTICE_GOAL.1 - cell.1).abs()
}

/// Workspace root (lock-tests lives at `tests/lock/`).
///
/// # Panics
///
/// Panics if the manifest directory is not two levels below the root.
#[must_use]
pub fn workspace_root() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(Path::parent)
        .expect("lock-tests lives two levels below the workspace root")
}

/// Path of a binary built next to the running test executable.
///
/// # Panics
///
/// Panics if the test executable path cannot be resolved.
#[must_use]
pub fn sibling_binary(name: &str) -> PathBuf {
    let exe = std::env::current_exe().expect("can resolve test binary path");
    // target/<profile>/deps/<test> -> target/<profile>/<name>
    let profile_dir = exe
        .parent()
        .and_then(Path::parent)
        .expect("test binary lives under target/<profile>/deps");
    profile_dir.join(name)
}

/// Run a fixture binary in `work_dir` with a scrubbed locale, apply
/// `env_overrides`, and return its stdout.
///
/// # Panics
///
/// Panics if the binary cannot be spawned, exits unsuccessfully, or prints
/// non-UTF-8 output.
#[must_use]
pub fn run_fixture(name: &str, work_dir: &Path, env_overrides: &[(&str, &str)]) -> String {
    let bin = sibling_binary(name);

    let mut command = Command::new(&bin);
    command.current_dir(work_dir);
    for key in ["LC_ALL", "LC_COLLATE", "LANG", "LANGUAGE", "RUST_LOG"] {
        command.env_remove(key);
    }
    command.envs(env_overrides.iter().copied());

    let output = command.output().unwrap_or_else(|e| {
        panic!(
            "failed to spawn {} in {} with {env_overrides:?}: {e}",
            bin.display(),
            work_dir.display()
        )
    });
    assert!(
        output.status.success(),
        "{name} exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("fixture stdout is UTF-8")
}

/// Value of the `key=value` line for `key` in fixture output.
#[must_use]
pub fn output_value<'a>(output: &'a str, key: &str) -> Option<&'a str> {
    output
        .lines()
        .find_map(|line| line.strip_prefix(key)?.strip_prefix('='))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_has_algorithm_prefix() {
        let digest = sequence_digest(&[1u64, 2, 3]);
        assert!(digest.starts_with("sha256:"));
        assert_eq!(digest.len(), "sha256:".len() + 64);
    }

    #[test]
    fn digest_is_domain_separated() {
        let data = b"[1,2,3]";
        assert_ne!(
            canonical_digest(DOMAIN_TRAVERSAL_SEQUENCE, data),
            canonical_digest(DOMAIN_EXPLORE_POLICY, data)
        );
    }

    #[test]
    fn output_value_matches_whole_keys() {
        let output = "bfs_digest=sha256:ab\nbfs_stats={}\n";
        assert_eq!(output_value(output, "bfs_digest"), Some("sha256:ab"));
        assert_eq!(output_value(output, "bfs_stats"), Some("{}"));
        assert_eq!(output_value(output, "bfs"), None);
    }

    #[test]
    fn lattice_corner_has_two_neighbors() {
        assert_eq!(lattice_neighbors(&(0, 0)), Some(vec![(1, 0), (0, 1)]));
        assert_eq!(lattice_neighbors(&LATTICE_GOAL), None);
    }
}
