/// Splits a record into whitespace-delimited tokens.
///
/// Lazy and restartable. Runs of whitespace count as one separator and
/// empty fragments are discarded, so no token is ever the empty string.
pub fn tokenize(record: &str) -> impl Iterator<Item = &str> {
    record.split_whitespace()
}
