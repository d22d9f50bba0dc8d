/// Insert `pattern` between the stem and extension of `original`, leaving
/// any directory prefix untouched. Applying the same pattern twice is a
/// no-op: a stem that already contains the pattern is returned as-is.
pub fn apply_pattern(original: &str, pattern: &str) -> String {
    let base_start = original.rfind(['/', '\\']).map_or(0, |i| i + 1);
    let (prefix, base) = original.split_at(base_start);

    let (stem, extension) = split_extension(base);
    if stem.contains(pattern) {
        return format!("{prefix}{stem}{extension}");
    }

    format!("{prefix}{stem}{pattern}{extension}")
}

// Names consisting only of leading dots (".hidden") have no extension.
fn split_extension(base: &str) -> (&str, &str) {
    match base.rfind('.') {
        Some(idx) if base[..idx].chars().any(|c| c != '.') => base.split_at(idx),
        _ => (base, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_inserted_before_extension() {
        assert_eq!(apply_pattern("clip.mp4", "_180_LR"), "clip_180_LR.mp4");
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(apply_pattern("clip", "_LR"), "clip_LR");
    }

    #[test]
    fn test_idempotence() {
        let once = apply_pattern("clip.mp4", "_LR");
        let twice = apply_pattern(&once, "_LR");
        assert_eq!(once, "clip_LR.mp4");
        assert_eq!(twice, once);
    }

    #[test]
    fn test_pattern_already_in_stem() {
        assert_eq!(apply_pattern("clip_LR.mp4", "_LR"), "clip_LR.mp4");
    }

    #[test]
    fn test_directory_prefix_preserved() {
        assert_eq!(apply_pattern("sub/dir/clip.mp4", "_LR"), "sub/dir/clip_LR.mp4");
    }

    #[test]
    fn test_windows_prefix_preserved() {
        assert_eq!(apply_pattern("sub\\clip.mp4", "_TB"), "sub\\clip_TB.mp4");
    }

    #[test]
    fn test_pattern_in_directory_does_not_count() {
        // Only the stem matters; a match in the directory prefix must not
        // suppress the rename.
        assert_eq!(apply_pattern("_LR/clip.mp4", "_LR"), "_LR/clip_LR.mp4");
    }

    #[test]
    fn test_only_last_dot_splits_extension() {
        assert_eq!(apply_pattern("clip.v2.mp4", "_LR"), "clip.v2_LR.mp4");
    }

    #[test]
    fn test_hidden_file_has_no_extension() {
        assert_eq!(apply_pattern(".hidden", "_LR"), ".hidden_LR");
    }

    #[test]
    fn test_empty_pattern_is_a_no_op() {
        assert_eq!(apply_pattern("clip.mp4", ""), "clip.mp4");
    }
}
