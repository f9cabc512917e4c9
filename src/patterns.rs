//! File selection predicates: rotated-log detection and protection matching.

/// Marker that identifies a log file name
pub const LOG_MARKER: &str = ".log";

/// Minimum number of characters after the first `.log` for a name to count
/// as a rotated archive (`app.log.1` qualifies, `app.log` does not)
pub const MIN_ROTATION_SUFFIX_LEN: usize = 2;

/// Check if a file name looks like a rotated log file.
///
/// The name must contain `.log`, and the text following its *first*
/// occurrence must be at least [`MIN_ROTATION_SUFFIX_LEN`] characters long.
/// The active log (`server.log`) never qualifies.
pub fn is_log_eligible(file_name: &str) -> bool {
    match file_name.split_once(LOG_MARKER) {
        Some((_, suffix)) => suffix.chars().count() >= MIN_ROTATION_SUFFIX_LEN,
        None => false,
    }
}

/// Check if a file is exempt from deletion.
///
/// A protected item protects a file when it equals the file's base name, or
/// when it appears anywhere in the path of the directory containing the file.
/// Matching is case-sensitive and unanchored, so `"Web"` protects everything
/// under `/var/log/WebClient` as well as `/var/log/Webhooks`.
pub fn is_protected(file_name: &str, containing_dir: &str, protected_items: &[String]) -> bool {
    protected_items
        .iter()
        .any(|item| matches_name(file_name, item) || matches_directory(containing_dir, item))
}

fn matches_name(file_name: &str, item: &str) -> bool {
    file_name == item
}

fn matches_directory(containing_dir: &str, item: &str) -> bool {
    containing_dir.contains(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_active_log_is_not_eligible() {
        assert!(!is_log_eligible("server.log"));
    }

    #[test]
    fn test_rotated_logs_are_eligible() {
        assert!(is_log_eligible("server.log.1"));
        assert!(is_log_eligible("server.log.2024"));
        assert!(is_log_eligible("app.log.20240101"));
        assert!(is_log_eligible("test_log_3.log.20222"));
    }

    #[test]
    fn test_one_character_suffix_is_not_eligible() {
        assert!(!is_log_eligible("server.log1"));
        assert!(!is_log_eligible("server.log."));
        assert!(!is_log_eligible("server.logs"));
    }

    #[test]
    fn test_two_character_suffix_without_dot_is_eligible() {
        assert!(is_log_eligible("server.log42"));
        assert!(is_log_eligible("server.logxy"));
    }

    #[test]
    fn test_names_without_marker_are_not_eligible() {
        assert!(!is_log_eligible("README.md"));
        assert!(!is_log_eligible("server_log.1"));
        assert!(!is_log_eligible("server.LOG.1"));
        assert!(!is_log_eligible(""));
    }

    #[test]
    fn test_suffix_is_measured_after_first_marker() {
        // Suffix after the first ".log" is ".log", four characters
        assert!(is_log_eligible("a.log.log"));
        // Suffix after the first ".log" is "x"
        assert!(!is_log_eligible("audit.logx"));
    }

    #[test]
    fn test_suffix_length_counts_characters_not_bytes() {
        assert!(!is_log_eligible("server.logä"));
        assert!(is_log_eligible("server.log.ä"));
    }

    #[test]
    fn test_marker_can_appear_mid_name() {
        assert!(is_log_eligible("x.login.txt"));
    }

    #[test]
    fn test_no_protected_items_protects_nothing() {
        assert!(!is_protected("server.log.1", "/var/log", &[]));
    }

    #[test]
    fn test_exact_name_is_protected() {
        let protected = items(&["app.log.20200101"]);
        assert!(is_protected("app.log.20200101", "/var/log", &protected));
        assert!(is_protected("app.log.20200101", "/var/log/sub", &protected));
    }

    #[test]
    fn test_name_match_is_exact() {
        let protected = items(&["app.log"]);
        assert!(!is_protected("app.log.1", "/var/log", &protected));
        assert!(!is_protected("myapp.log", "/var/log", &protected));
    }

    #[test]
    fn test_directory_fragment_is_protected() {
        let protected = items(&["YatuWebClient"]);
        assert!(is_protected(
            "test_log_1.log.20222",
            "/opt/wildfly/standalone/log/YatuWebClient",
            &protected
        ));
        assert!(!is_protected(
            "test_log_1.log.20222",
            "/opt/wildfly/standalone/log",
            &protected
        ));
    }

    #[test]
    fn test_directory_fragment_is_unanchored() {
        let protected = items(&["Web"]);
        assert!(is_protected("a.log.1", "/var/log/Webhooks", &protected));
        assert!(is_protected("a.log.1", "/srv/WebApp/log", &protected));
    }

    #[test]
    fn test_directory_fragment_is_case_sensitive() {
        let protected = items(&["webclient"]);
        assert!(!is_protected("a.log.1", "/var/log/WebClient", &protected));
    }

    #[test]
    fn test_trailing_separator_does_not_match_directory_without_it() {
        let protected = items(&["YatuWebClient/"]);
        assert!(!is_protected(
            "a.log.1",
            "/opt/wildfly/standalone/log/YatuWebClient",
            &protected
        ));
    }

    #[test]
    fn test_any_item_is_enough() {
        let protected = items(&["server.log", "audit.log", "sub"]);
        assert!(is_protected("audit.log", "/var/log", &protected));
        assert!(is_protected("x.log.1", "/var/log/sub", &protected));
        assert!(!is_protected("x.log.1", "/var/log/other", &protected));
    }

    #[test]
    fn test_fragment_matches_root_path_too() {
        // The root's own path is part of every containing directory
        let protected = items(&["standalone"]);
        assert!(is_protected("x.log.1", "/opt/wildfly/standalone/log", &protected));
    }
}
