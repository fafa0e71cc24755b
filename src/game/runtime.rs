//! Frame runtime
//!
//! - `FrameContext`: what every entity's update gets to see
//! - `FrameTimer`: elapsed time between frames and the soft frame-rate cap

use rand::rngs::StdRng;

use super::swarm::Swarm;

/// Longest step a single frame may simulate (seconds).
/// Keeps a stalled window from teleporting everything.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Per-frame inputs shared by every entity update
pub struct FrameContext<'a> {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Backend clock at the start of the update phase
    pub now_ms: u64,
    /// Swarm state as of the start of this frame
    pub swarm: Swarm,
    pub rng: &'a mut StdRng,
}

/// Frame pacing against a target interval
#[derive(Debug, Clone)]
pub struct FrameTimer {
    target_ms: u64,
    last_frame_ms: Option<u64>,
    frame_start_ms: u64,
}

impl FrameTimer {
    pub fn new(target_ms: u64) -> Self {
        Self {
            target_ms,
            last_frame_ms: None,
            frame_start_ms: 0,
        }
    }

    /// Mark the start of a frame. Returns dt in seconds.
    /// The first frame pretends one target interval has passed.
    pub fn begin_frame(&mut self, now_ms: u64) -> f32 {
        let dt = match self.last_frame_ms {
            Some(last) => now_ms.saturating_sub(last) as f32 / 1000.0,
            None => self.target_ms as f32 / 1000.0,
        };
        self.last_frame_ms = Some(now_ms);
        self.frame_start_ms = now_ms;
        dt.min(MAX_FRAME_DT)
    }

    /// How long to sleep so the frame lasts the target interval.
    /// Zero when the frame already ran long.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(self.frame_start_ms);
        self.target_ms.saturating_sub(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_frame_uses_target() {
        let mut timer = FrameTimer::new(16);
        assert_relative_eq!(timer.begin_frame(5_000), 0.016);
    }

    #[test]
    fn test_dt_between_frames() {
        let mut timer = FrameTimer::new(16);
        timer.begin_frame(1_000);
        assert_relative_eq!(timer.begin_frame(1_020), 0.020);
    }

    #[test]
    fn test_dt_is_capped() {
        let mut timer = FrameTimer::new(16);
        timer.begin_frame(0);
        assert_relative_eq!(timer.begin_frame(3_000), MAX_FRAME_DT);
    }

    #[test]
    fn test_remaining_sleep() {
        let mut timer = FrameTimer::new(16);
        timer.begin_frame(100);
        assert_eq!(timer.remaining_ms(105), 11);
        assert_eq!(timer.remaining_ms(116), 0);
        assert_eq!(timer.remaining_ms(140), 0);
    }
}
