use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 每次请求之后的等待时长
pub trait Pacer {
    fn next_delay(&mut self) -> Duration;
}

/// 在 [min, max] 闭区间内均匀随机取值
pub struct RandomPacer<R: Rng = StdRng> {
    min_secs: f64,
    max_secs: f64,
    rng: R,
}

impl RandomPacer {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self::with_rng(min, max, StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomPacer<R> {
    pub fn with_rng(min: Duration, max: Duration, rng: R) -> Self {
        let (min_secs, max_secs) = (min.as_secs_f64(), max.as_secs_f64());
        Self {
            min_secs: min_secs.min(max_secs),
            max_secs: min_secs.max(max_secs),
            rng,
        }
    }
}

impl<R: Rng> Pacer for RandomPacer<R> {
    fn next_delay(&mut self) -> Duration {
        Duration::from_secs_f64(self.rng.random_range(self.min_secs..=self.max_secs))
    }
}

/// 固定等待时长，Duration::ZERO 即不等待
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPacer(pub Duration);

impl Pacer for FixedPacer {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}
