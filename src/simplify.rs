/// Fixed-stride subsampling: every `step`th element starting at index 0,
/// order preserved. Lossy and irreversible by design; the stride is a
/// configuration constant for a generation run, not derived from the
/// data. A stride of 0 is treated as 1.
pub fn stride<T: Clone>(points: &[T], step: usize) -> Vec<T> {
    points.iter().step_by(step.max(1)).cloned().collect()
}
