/// Running rating accumulator for one laptop.
///
/// `count` and `sum` always change together; the average is derived.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rating {
    pub count: u32,
    pub sum: f64,
}

impl Rating {
    pub fn new(count: u32, sum: f64) -> Self {
        Self { count, sum }
    }

    /// Fold one more score into the accumulator.
    pub fn record(&mut self, score: f64) {
        self.count += 1;
        self.sum += score;
    }

    /// Mean score, zero when nothing has been rated yet.
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}
