//! Gesture recognition placeholder.
//!
//! True optical-flow gesture detection is out of scope; this keeps the typed
//! seam so a platform collaborator can slot a real detector in later without
//! touching the engine.

use wisp_core::SensorySnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    None,
}

#[derive(Debug, Default)]
pub struct GestureDetector;

impl GestureDetector {
    pub fn new() -> Self {
        Self
    }

    /// Always reports no gesture.
    pub fn detect(&mut self, _snapshot: &SensorySnapshot) -> GestureKind {
        GestureKind::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_is_a_noop() {
        let mut detector = GestureDetector::new();
        assert_eq!(
            detector.detect(&SensorySnapshot::default()),
            GestureKind::None
        );
    }
}
