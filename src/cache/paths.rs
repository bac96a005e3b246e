// Cache path utilities.
// Resolves the on-disk cache directory and maps cache keys to file names.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/folio on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "folio").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// File name holding the entry for a cache key.
pub fn key_file_name(key: &str) -> String {
    format!("{}.json", sanitize_name(key))
}

/// Sanitize a name for use in filesystem paths.
/// Escapes problematic characters (and `%` itself) as `%XX`, so distinct
/// names never share a file.
fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' | '%' => {
                out.push_str(&format!("%{:02X}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("github_repos_someone"), "github_repos_someone");
        assert_eq!(sanitize_name("with/slash"), "with%2Fslash");
        assert_eq!(sanitize_name("../escape"), "%2E%2E%2Fescape");
    }

    #[test]
    fn test_similar_accounts_get_distinct_files() {
        assert_ne!(key_file_name("github_user_a.b"), key_file_name("github_user_a_b"));
        assert_ne!(key_file_name("github_user_a%2Eb"), key_file_name("github_user_a.b"));
    }

    #[test]
    fn test_key_file_name() {
        assert_eq!(key_file_name("github_user_a"), "github_user_a.json");
    }
}
