use super::tokenizer::tokenize;
use crate::engine::types::KeyValue;

/// The map-stage logic: emits one `("<prev> <curr>", 1)` pair for every
/// adjacent token pair in the record, in record order.
///
/// Records with zero or one token emit nothing. The preceding-token state
/// lives inside the returned iterator, so a pair can never span two
/// records. Each emitted pair is an owned value; no buffer is reused
/// between emissions.
pub fn extract_bigrams(record: &str) -> impl Iterator<Item = KeyValue> + '_ {
    let mut tokens = tokenize(record);
    let mut previous = tokens.next();

    std::iter::from_fn(move || {
        let current = tokens.next()?;
        let preceding = previous.replace(current)?;
        Some((format!("{} {}", preceding, current), 1))
    })
}
