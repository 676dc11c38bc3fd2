pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Unique scratch path under the system temp directory.
pub fn temp_path(label: &str, seed: u64) -> std::path::PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!(
        "platetour-{label}-{seed}-{}-{nanos}.json",
        std::process::id()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_drops_empty() {
        assert_eq!(split_csv(" smoke, ,tour,"), vec!["smoke", "tour"]);
        assert!(split_csv("").is_empty());
    }

    #[test]
    fn temp_paths_differ_per_call_label() {
        assert_ne!(temp_path("a", 1), temp_path("b", 1));
    }
}
