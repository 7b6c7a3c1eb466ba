//! Skips redundant terminal flushes.
//!
//! A frame whose fingerprint matches the last flushed one is only repainted
//! once per `repaint_interval_ms`, which keeps a stale terminal (after a resize
//! or a stray write) from staying wrong for long.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    repaint_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: Option<u64>,
}

impl RenderThrottle {
    pub fn new(repaint_interval_ms: u64) -> Self {
        Self {
            repaint_interval_ms,
            last_render_ms: 0,
            last_fingerprint: None,
        }
    }

    /// Decide whether the frame with `fingerprint` should be flushed at `now_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64) -> bool {
        let changed = self.last_fingerprint != Some(fingerprint);
        let stale = now_ms.saturating_sub(self.last_render_ms) >= self.repaint_interval_ms;
        if changed || stale {
            self.last_render_ms = now_ms;
            self.last_fingerprint = Some(fingerprint);
            return true;
        }
        false
    }

    /// Forget the last frame so the next one is always flushed.
    pub fn invalidate(&mut self) {
        self.last_fingerprint = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_renders() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(0, 1));
    }

    #[test]
    fn test_changed_frame_renders_immediately() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(0, 1));
        assert!(t.should_render(1, 2));
    }

    #[test]
    fn test_unchanged_frame_waits_for_interval() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(0, 1));
        assert!(!t.should_render(10, 1));
        assert!(!t.should_render(249, 1));
        assert!(t.should_render(250, 1));
    }

    #[test]
    fn test_invalidate_forces_render() {
        let mut t = RenderThrottle::new(250);
        assert!(t.should_render(0, 1));
        t.invalidate();
        assert!(t.should_render(1, 1));
    }
}
