//! Cosine similarity on the `[0, 1]` scale.
//!
//! Raw cosine lies in `[-1, 1]`; the retriever reports `(cos + 1) / 2` so
//! that every signal entering fusion shares the `[0, 1]` range. Orthogonal
//! vectors therefore score 0.5.

/// Cosine similarity in `[-1, 1]`, or `None` for zero-norm or mismatched inputs.
pub fn cosine(a: &[f32], b: &[f32]) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    let denom = na.sqrt() * nb.sqrt();
    if denom <= f64::EPSILON || !denom.is_finite() {
        return None;
    }
    let cos = dot / denom;
    cos.is_finite().then(|| cos.clamp(-1.0, 1.0))
}

/// Map a cosine in `[-1, 1]` onto `[0, 1]`.
pub fn to_unit_interval(cos: f64) -> f64 {
    ((cos + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Cosine similarity mapped onto `[0, 1]`.
pub fn unit_cosine(a: &[f32], b: &[f32]) -> Option<f64> {
    cosine(a, b).map(to_unit_interval)
}

/// L2-normalize in place. Zero vectors are left untouched.
pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
