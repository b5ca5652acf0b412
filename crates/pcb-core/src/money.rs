//! Currency arithmetic helpers shared by the allocator and summaries.

/// Ratios this close to a whole number of chunks count as that whole number.
const CHUNK_EPSILON: f64 = 1e-9;

/// Rounds to whole cents.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds `value` up to the next multiple of `chunk`; a non-positive chunk leaves it unchanged.
pub fn round_up_to_chunk(value: f64, chunk: f64) -> f64 {
    if chunk <= 0.0 || !chunk.is_finite() {
        return value;
    }
    let steps = value / chunk;
    let whole = steps.round();
    let steps = if (steps - whole).abs() < CHUNK_EPSILON {
        whole
    } else {
        steps.ceil()
    };
    steps * chunk
}
