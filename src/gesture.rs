use std::time::{Duration, Instant};

/// Speed in px/s below which a release is a plain drag end, not a fling.
pub const MIN_FLING_VELOCITY: f64 = 50.0;

/// Only motion this close to the release contributes to the velocity.
const SAMPLE_WINDOW: Duration = Duration::from_millis(100);

const MAX_SAMPLES: usize = 16;

#[derive(Clone, Copy)]
struct Sample {
    at: Instant,
    x:  f64,
    y:  f64,
}

/// Recognizes flings from raw pointer samples. Tracks the tail end of a
/// drag in a fixed-size buffer and reports the release velocity when it
/// clears [`MIN_FLING_VELOCITY`].
pub struct FlingDetector {
    samples: Vec<Sample>,
}
impl FlingDetector {
    pub fn new() -> Self {
        Self {
            samples: Vec::with_capacity(MAX_SAMPLES),
        }
    }

    /// Start tracking a new gesture at the press position.
    pub fn begin(&mut self, x: f64, y: f64) {
        self.begin_at(Instant::now(), x, y);
    }

    /// Record a pointer move.
    pub fn record(&mut self, x: f64, y: f64) {
        self.record_at(Instant::now(), x, y);
    }

    /// End the gesture, returning the release velocity in px/s if it
    /// qualifies as a fling.
    pub fn finish(&mut self) -> Option<(f64, f64)> {
        self.finish_at(Instant::now())
    }

    fn begin_at(&mut self, at: Instant, x: f64, y: f64) {
        self.samples.clear();
        self.push(Sample { at, x, y });
    }

    fn record_at(&mut self, at: Instant, x: f64, y: f64) {
        self.push(Sample { at, x, y });
    }

    fn finish_at(&mut self, at: Instant) -> Option<(f64, f64)> {
        let last = *self.samples.last()?;
        let first = self.samples.iter().copied().find(|s| {
            at.duration_since(s.at) <= SAMPLE_WINDOW
        })?;
        self.samples.clear();

        let dt = last.at.duration_since(first.at).as_secs_f64();
        if dt <= 0.0 {
            return None;
        }
        let vx = (last.x - first.x) / dt;
        let vy = (last.y - first.y) / dt;
        if (vx*vx + vy*vy).sqrt() < MIN_FLING_VELOCITY {
            return None;
        }
        Some((vx, vy))
    }

    fn push(&mut self, sample: Sample) {
        if self.samples.len() == MAX_SAMPLES {
            self.samples.remove(0);
        }
        self.samples.push(sample);
    }
}


#[cfg(test)]
fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn fast_swipe_is_a_fling() {
    let t0 = Instant::now();
    let mut det = FlingDetector::new();
    det.begin_at(t0, 0.0, 0.0);
    det.record_at(t0 + ms(20), 30.0, -10.0);
    det.record_at(t0 + ms(40), 60.0, -20.0);

    let (vx, vy) = det.finish_at(t0 + ms(40)).unwrap();
    assert!((vx - 1500.0).abs() < 1e-9);
    assert!((vy + 500.0).abs() < 1e-9);
}

#[test]
fn slow_drag_is_not_a_fling() {
    let t0 = Instant::now();
    let mut det = FlingDetector::new();
    det.begin_at(t0, 0.0, 0.0);
    det.record_at(t0 + ms(500),  5.0, 0.0);
    det.record_at(t0 + ms(1000), 10.0, 0.0);

    // Only the final sample falls inside the window, so there is no
    // span to compute a velocity over.
    assert!(det.finish_at(t0 + ms(1000)).is_none());
}

#[test]
fn motionless_release_is_not_a_fling() {
    let t0 = Instant::now();
    let mut det = FlingDetector::new();
    det.begin_at(t0, 40.0, 40.0);
    det.record_at(t0 + ms(30), 40.0, 40.0);

    assert!(det.finish_at(t0 + ms(30)).is_none());
}

#[test]
fn stale_samples_are_dropped() {
    let t0 = Instant::now();
    let mut det = FlingDetector::new();
    det.begin_at(t0, 0.0, 0.0);
    for i in 1..40 {
        det.record_at(t0 + ms(i * 10), i as f64 * 20.0, 0.0);
    }

    // 2000 px/s throughout, measured only over the trailing window.
    let (vx, vy) = det.finish_at(t0 + ms(390)).unwrap();
    assert!((vx - 2000.0).abs() < 1e-9);
    assert!(vy == 0.0);
}

#[test]
fn finish_without_begin() {
    let mut det = FlingDetector::new();
    assert!(det.finish().is_none());
}
