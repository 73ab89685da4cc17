use crate::engine::types::Count;

/// Sums all counts observed for one key.
///
/// Used unchanged as both the combine stage (per-worker partial sums) and
/// the reduce stage (global sums): addition is associative and commutative,
/// and a partial sum produced by one invocation is a valid input to the
/// next. Counts are `u64`, wide enough that corpus-scale totals cannot
/// overflow.
pub fn sum_counts<I>(counts: I) -> Count
where
    I: IntoIterator<Item = Count>,
{
    counts.into_iter().sum()
}
