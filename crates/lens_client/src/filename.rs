const FALLBACK_NAME: &str = "report.xlsx";
const MAX_NAME_CHARS: usize = 120;

/// Local save name for a report. Only the final path segment of the server's
/// filename is kept, and characters the filesystem rejects are replaced.
pub fn local_report_filename(save_as: &str) -> String {
    let last_segment = save_as.rsplit(['/', '\\']).next().unwrap_or(save_as);
    let cleaned: String = last_segment
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let trimmed = cleaned.trim_matches(&['_', ' ', '.'][..]);
    if trimmed.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    let mut name: String = trimmed.chars().take(MAX_NAME_CHARS).collect();
    let stem_len = name.find('.').unwrap_or(name.len());
    if is_reserved_windows_name(&name[..stem_len]) {
        name.insert(stem_len, '_');
    }
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}
