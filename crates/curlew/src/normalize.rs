//! Output normalization.
//!
//! Applied once to the rendered text: every run that starts at a newline,
//! contains at least one more newline, and continues through any whitespace
//! after it is replaced by a single newline. Then the whole result is
//! trimmed.
//!
//! This deliberately loses blank lines: two or more consecutive blank or
//! whitespace-only lines always collapse to one line break, and the
//! indentation of the line following such a run is dropped. With CRLF line
//! endings the `\r` before the first `\n` of a run is kept and the rest of
//! the run collapses to `\n`.

/// Collapse runs of blank lines and trim the result.
pub fn normalize(output: &str) -> String {
    let mut result = String::with_capacity(output.len());
    let mut rest = output;

    while let Some(newline) = rest.find('\n') {
        result.push_str(&rest[..newline]);
        result.push('\n');

        let run = &rest[newline..];
        let run_len = run
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(run.len());
        rest = if run[1..run_len].contains('\n') {
            &run[run_len..]
        } else {
            &run[1..]
        };
    }
    result.push_str(rest);

    result.trim().to_string()
}
