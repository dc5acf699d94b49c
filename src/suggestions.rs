//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Errors should tell users what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dirsig::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Signature already exists: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::signature_exists(path));
//! ```

use std::path::Path;

/// Generate an error for when a signature file is already present.
pub fn signature_exists(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Signature already exists: {path}\n\n\
         hint: Use --force to replace it with a new identifier\n\
         hint: Replacing a signature removes the directory from its current group",
        path = path.display()
    )
}

/// Generate an error for a signature target that is not a directory.
pub fn not_a_directory(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Not a directory: {path}\n\n\
         hint: Signatures are placed inside an existing directory; create it first",
        path = path.display()
    )
}

/// Generate an error for a signature that could not be written.
pub fn signature_write_failed(path: &Path, error: &crate::error::Error) -> anyhow::Error {
    anyhow::anyhow!(
        "Unable to create signature in {path}\n\
         error: {error}\n\n\
         hint: Check that the directory is writable and not on a read-only mount",
        path = path.display()
    )
}

/// Generate an error for an identifier that is not a valid UUID.
pub fn invalid_uuid(input: &str, error: &uuid::Error) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid group identifier: {input}\n\
         error: {error}\n\n\
         hint: Identifiers look like 11111111-1111-4111-8111-111111111111\n\
         hint: Run 'dirsig find' to list the identifiers of all reachable groups"
    )
}

/// Build the hint shown when a requested group has no reachable members.
///
/// If one of the groups that *were* found has a nearly identical identifier,
/// it is suggested as a likely typo.
pub fn group_not_found(uuid: &str, depth: usize, found: &[String]) -> String {
    let candidates: Vec<&str> = found.iter().map(String::as_str).collect();
    let did_you_mean = find_similar(uuid, &candidates)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    format!(
        "Could not find any members of group {uuid}{did_you_mean}\n\
         hint: Try increasing the maximum search depth (currently {depth}) with --depth"
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    // Two rolling rows are enough; identifiers are short
    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0usize; b_len + 1];

    for i in 1..=a_len {
        curr[0] = i;
        for j in 1..=b_len {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}
