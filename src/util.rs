use std::path::PathBuf;

/// Expands a leading `~` in a path to the user's home directory.
/// Also normalizes path separators for the current OS.
pub fn expand_tilde(path: &str) -> String {
    let result = if path.starts_with("~/") || path == "~" {
        if let Some(home) = dirs::home_dir() {
            let rest = path.strip_prefix("~/").unwrap_or("");
            home.join(rest).to_string_lossy().to_string()
        } else {
            path.to_string()
        }
    } else {
        path.to_string()
    };
    if cfg!(windows) {
        result.replace('/', "\\")
    } else {
        result
    }
}

/// Resolve the console's data directory.
///
/// An explicit override (CLI flag or `ACC_CONSOLE_HOME`) wins, otherwise
/// `~/.acc-console` is used.
pub fn console_home(override_dir: Option<&str>) -> Option<PathBuf> {
    match override_dir {
        Some(dir) => Some(PathBuf::from(expand_tilde(dir))),
        None => dirs::home_dir().map(|h| h.join(".acc-console")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_tilde_paths_are_untouched() {
        if cfg!(windows) {
            return;
        }
        assert_eq!(expand_tilde("/srv/acc/cfg"), "/srv/acc/cfg");
        assert_eq!(expand_tilde("cfg/~x"), "cfg/~x");
    }

    #[test]
    fn explicit_home_overrides_default() {
        let home = console_home(Some("/tmp/acc-home")).unwrap();
        assert_eq!(home, PathBuf::from(expand_tilde("/tmp/acc-home")));
    }
}
