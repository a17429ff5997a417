//! Extraction of binding affinities from docking output
//!
//! Vina reports its result table inside free-form console output. Result rows
//! start with a mode number and carry the affinity as the second
//! whitespace-separated field:
//!
//! ```text
//!    1       -7.2      0.000      0.000
//! ```
//!
//! The acceptance rule is a best-effort lexical filter, kept as an explicit
//! predicate so it can be tested apart from the aggregation.

/// Does this line look like a result row? True when the trimmed line starts
/// with an ASCII digit.
pub fn is_result_line(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
}

/// Parse the affinity out of one result row.
///
/// Returns `None` unless the line passes [`is_result_line`], has at least two
/// whitespace-separated tokens, and the second token parses as a float.
pub fn parse_result_line(line: &str) -> Option<f64> {
    if !is_result_line(line) {
        return None;
    }
    line.split_whitespace().nth(1)?.parse::<f64>().ok()
}

/// Best (minimum) affinity across all result rows of a combined log, in
/// kcal/mol. Lower is more favorable. `None` when no row yields a value.
pub fn best_affinity(log: &str) -> Option<f64> {
    log.lines().filter_map(parse_result_line).reduce(f64::min)
}
