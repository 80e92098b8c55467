/// Values kept alive for a grace period after their owner let go of them.
/// Used for JS callbacks that may still be invoked by an in-flight request.
pub struct Retired<T> {
    entries: Vec<(f64, T)>,
    grace_ms: f64,
}

impl<T> Retired<T> {
    pub fn new(grace_ms: f64) -> Self {
        Self {
            entries: Vec::new(),
            grace_ms,
        }
    }

    pub fn retire(&mut self, value: T, now_ms: f64) {
        self.entries.push((now_ms, value));
    }

    /// Drop everything retired at least `grace_ms` before `now_ms`.
    /// Returns how many values were released.
    pub fn prune(&mut self, now_ms: f64) -> usize {
        let before = self.entries.len();
        let grace = self.grace_ms;
        self.entries.retain(|(at, _)| now_ms - at < grace);
        before - self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
