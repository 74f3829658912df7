/// Rounds `part`/`total` to the nearest integer percentage, half-up.
/// Returns 0 for a zero total.
pub fn pct(part: usize, total: usize) -> i64 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as i64
}
