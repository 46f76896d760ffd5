//! Screen zones: named rectangles used as stimulus/context classifiers.
//!
//! Zone lookup is an enum-indexed array, so access is O(1) and panic-free.
//! When a point falls inside several overlapping zones the fixed priority
//! order `notification > active > productivity > media` decides.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// The four well-known zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneId {
    /// Follows the pointer.
    Active,
    /// Centered on the focused window (or screen center).
    Productivity,
    /// Fixed top-right corner.
    Notification,
    /// Fixed bottom-center.
    Media,
}

impl ZoneId {
    pub const ALL: [ZoneId; 4] = [
        ZoneId::Active,
        ZoneId::Productivity,
        ZoneId::Notification,
        ZoneId::Media,
    ];

    /// Deterministic precedence for overlapping zones.
    pub const PRIORITY: [ZoneId; 4] = [
        ZoneId::Notification,
        ZoneId::Active,
        ZoneId::Productivity,
        ZoneId::Media,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ZoneId::Active => "active",
            ZoneId::Productivity => "productivity",
            ZoneId::Notification => "notification",
            ZoneId::Media => "media",
        }
    }
}

/// Axis-aligned zone rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Zone {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same size, centered on `point`.
    pub fn centered_at(point: DVec2, width: f64, height: f64) -> Self {
        Self {
            x: point.x - width / 2.0,
            y: point.y - height / 2.0,
            width,
            height,
        }
    }
}

/// All four zone rectangles, indexed by `ZoneId`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneSet {
    zones: [Zone; 4],
}

impl ZoneSet {
    /// Default layout for a screen of the given size: productivity at screen
    /// center, notification top-right, media bottom-center, active at origin
    /// until the first pointer sample arrives.
    pub fn layout(screen: DVec2) -> Self {
        let mut set = Self {
            zones: [Zone::new(0.0, 0.0, 100.0, 100.0); 4],
        };
        set.set(
            ZoneId::Productivity,
            Zone::centered_at(screen * 0.5, 300.0, 200.0),
        );
        set.set(
            ZoneId::Notification,
            Zone::new(screen.x - 210.0, 10.0, 200.0, 100.0),
        );
        set.set(
            ZoneId::Media,
            Zone::new(screen.x / 2.0 - 200.0, screen.y - 310.0, 400.0, 300.0),
        );
        set
    }

    pub fn get(&self, id: ZoneId) -> &Zone {
        &self.zones[id as usize]
    }

    pub fn set(&mut self, id: ZoneId, zone: Zone) {
        self.zones[id as usize] = zone;
    }

    /// Re-center the productivity zone on a focused-window rectangle.
    pub fn focus_productivity_on(&mut self, window_center: DVec2) {
        self.set(
            ZoneId::Productivity,
            Zone::centered_at(window_center, 300.0, 200.0),
        );
    }

    /// Keep the active zone glued to the pointer.
    pub fn follow_pointer(&mut self, pointer: DVec2, size: f64) {
        self.set(ZoneId::Active, Zone::centered_at(pointer, size, size));
    }

    /// Which zone contains `point`, honoring the fixed precedence order.
    pub fn classify(&self, point: DVec2) -> Option<ZoneId> {
        ZoneId::PRIORITY
            .into_iter()
            .find(|id| self.get(*id).contains(point))
    }
}
