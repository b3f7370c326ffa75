//! Whitespace normalization for generated source.
//!
//! Pure text transformation, no semantic change: line endings become
//! `\n`, trailing whitespace is stripped per line, runs of three or
//! more newlines collapse to two, and output ends with exactly one
//! newline. Idempotent by construction.

/// Normalize whitespace and line endings of generated source.
pub fn format_source(source: &str) -> String {
    let unified = source.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines: Vec<&str> = unified.split('\n').map(str::trim_end).collect();

    // Drop trailing blank lines; the single final newline is added below.
    while lines.last() == Some(&"") {
        lines.pop();
    }

    let mut out = String::with_capacity(unified.len());
    let mut blank_run = 0usize;
    for line in lines {
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    if out.is_empty() {
        out.push('\n');
    }
    out
}
