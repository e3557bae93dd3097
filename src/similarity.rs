/// Cosine of the angle between two vectors, accumulated in `f64`.
///
/// Returns NaN when either vector is all zeros or the lengths differ; callers
/// exclude such pairs instead of feeding NaN into a correlation.
pub fn cosine_similarity(u: &[f32], v: &[f32]) -> f64 {
    if u.len() != v.len() {
        return f64::NAN;
    }

    let mut dot = 0.0f64;
    let mut norm_u = 0.0f64;
    let mut norm_v = 0.0f64;
    for (&a, &b) in u.iter().zip(v.iter()) {
        let (a, b) = (a as f64, b as f64);
        dot += a * b;
        norm_u += a * a;
        norm_v += b * b;
    }

    dot / (norm_u.sqrt() * norm_v.sqrt())
}
