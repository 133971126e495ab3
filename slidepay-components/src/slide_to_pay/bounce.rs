use std::time::Duration;

use crate::animation::{AnimationStep, LoopMode, Timeline};

/// Rhythm of the idle nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceCadence {
    /// Played from mount until the first gesture: rest 1s, nudge 9 over
    /// 400ms, back over 400ms.
    Initial,
    /// Played after every release: rest 1.2s, nudge 16 over 500ms, back over
    /// 300ms.
    Alternate,
}

impl BounceCadence {
    /// Furthest nudge distance.
    pub fn peak(self) -> f32 {
        match self {
            BounceCadence::Initial => 9.0,
            BounceCadence::Alternate => 16.0,
        }
    }

    /// The looping timeline for this cadence.
    pub fn timeline(self) -> Timeline {
        let (rest, out, back) = match self {
            BounceCadence::Initial => (1000, 400, 400),
            BounceCadence::Alternate => (1200, 500, 300),
        };
        Timeline::new([
            AnimationStep::new(0.0, Duration::from_millis(rest)),
            AnimationStep::new(self.peak(), Duration::from_millis(out)),
            AnimationStep::new(0.0, Duration::from_millis(back)),
        ])
        .with_loop(LoopMode::Forever)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_cycle_lengths() {
        assert_eq!(BounceCadence::Initial.timeline().cycle_duration(), ms(1800));
        assert_eq!(
            BounceCadence::Alternate.timeline().cycle_duration(),
            ms(2000)
        );
    }

    #[test]
    fn test_initial_cadence_peaks_and_returns() {
        let mut timeline = BounceCadence::Initial.timeline();
        timeline.start(ms(0), 0.0);
        assert_eq!(timeline.sample(ms(500)), 0.0);
        assert!((timeline.sample(ms(1400)) - 9.0).abs() < 1e-4);
        assert!((timeline.sample(ms(1200)) - 4.5).abs() < 1e-4);
        assert!(timeline.sample(ms(1799)) < 0.1);
        // Loops.
        assert!((timeline.sample(ms(1800 + 1400)) - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_nudge_stays_within_peak() {
        for cadence in [BounceCadence::Initial, BounceCadence::Alternate] {
            let mut timeline = cadence.timeline();
            timeline.start(ms(0), 0.0);
            for t in (0..4000).step_by(7) {
                let value = timeline.sample(ms(t));
                assert!((0.0..=cadence.peak() + 1e-4).contains(&value));
            }
        }
    }
}
