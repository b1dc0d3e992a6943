use std::path::PathBuf;

/// The per-user data directory: `~/.gaan`.
pub fn gaan_home() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".gaan"))
}

/// Expand a leading `~` to the home directory.
///
/// Paths without a tilde, or with no resolvable home directory, are
/// returned as given.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\"))
    };

    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_tilde_prefix() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/.gaan/catalog.json"), home.join(".gaan/catalog.json"));
            assert_eq!(expand_home("~"), home);
        }
    }

    #[test]
    fn leaves_other_paths_alone() {
        assert_eq!(expand_home("/tmp/catalog.json"), PathBuf::from("/tmp/catalog.json"));
        assert_eq!(expand_home("relative/~/x"), PathBuf::from("relative/~/x"));
    }
}
