// src/utils.rs

/// Last segment of a path as stored by the backend, which may use either
/// separator.
pub fn file_name_from_path(path: &str) -> &str {
    path.rsplit(['/', '\\'])
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
}

pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_path() {
        assert_eq!(file_name_from_path("/srv/app/uploads/auth.log"), "auth.log");
        assert_eq!(file_name_from_path(r"C:\uploads\secure.txt"), "secure.txt");
        assert_eq!(file_name_from_path("plain.log"), "plain.log");
        assert_eq!(file_name_from_path("/srv/uploads/"), "uploads");
        assert_eq!(file_name_from_path(""), "");
    }

    #[test]
    fn test_truncate_preview() {
        assert_eq!(truncate_preview("short", 10), "short");
        assert_eq!(truncate_preview("abcdefghij", 10), "abcdefghij");
        assert_eq!(truncate_preview("abcdefghijk", 10), "abcdefghij...");
        assert_eq!(truncate_preview("héllo wörld", 5), "héllo...");
    }
}
