//! Per-tick sensory input, produced by sensor fusion and consumed once.

use crate::zone::ZoneId;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Pointer position and velocity at snapshot time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub position: DVec2,
    /// Displacement since the previous pointer sample, in pixels.
    pub velocity: DVec2,
}

/// Focused-window metadata supplied by the platform collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowInfo {
    pub title: String,
    pub focused: bool,
}

/// Everything the affect engine sees in one tick.
///
/// Partial snapshots are legal: a missing pointer or zone simply skips the
/// mood-transition rules that need them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SensorySnapshot {
    /// Absent when no pointer sample has arrived yet.
    pub pointer: Option<PointerSample>,
    /// Normalized pointer activity in [0, 1].
    pub mouse_activity: f64,
    /// Normalized screen-change activity in [0, 1].
    pub visual_change: f64,
    /// Zone containing the pointer; `None` means background.
    pub zone: Option<ZoneId>,
    pub window: Option<WindowInfo>,
    /// Engine time in seconds.
    pub timestamp: f64,
}

impl SensorySnapshot {
    /// Zone name as the persistence schema spells it.
    pub fn zone_name(&self) -> &'static str {
        self.zone.map(ZoneId::as_str).unwrap_or("background")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_quiet_background() {
        let snap = SensorySnapshot::default();
        assert!(snap.pointer.is_none());
        assert_eq!(snap.mouse_activity, 0.0);
        assert_eq!(snap.visual_change, 0.0);
        assert_eq!(snap.zone_name(), "background");
    }

    #[test]
    fn test_zone_name() {
        let snap = SensorySnapshot {
            zone: Some(ZoneId::Notification),
            ..Default::default()
        };
        assert_eq!(snap.zone_name(), "notification");
    }

    #[test]
    fn test_json_roundtrip() {
        let snap = SensorySnapshot {
            pointer: Some(PointerSample {
                position: DVec2::new(120.0, 88.0),
                velocity: DVec2::new(3.0, -1.0),
            }),
            mouse_activity: 0.4,
            visual_change: 0.1,
            zone: Some(ZoneId::Active),
            window: Some(WindowInfo {
                title: "editor".to_string(),
                focused: true,
            }),
            timestamp: 12.5,
        };
        let json = serde_json::to_string(&snap).unwrap();
        let back: SensorySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
