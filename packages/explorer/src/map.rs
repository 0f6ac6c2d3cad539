//! Map focus state for the external map view.
//!
//! The map widget animates between viewports on its own; this only tells it
//! where to look.

use serde::{Deserialize, Serialize};

use crate::catalog::Destination;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Coordinate,
    pub zoom: u8,
}

/// Whole-world view shown when nothing is selected.
pub const WORLD_VIEW: Viewport = Viewport {
    center: Coordinate { lat: 20.0, lng: 0.0 },
    zoom: 2,
};

/// Zoom level used when a destination is focused.
pub const FOCUS_ZOOM: u8 = 6;

/// A marker the map view should draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub name: String,
    pub position: Coordinate,
}

impl From<&Destination> for Marker {
    fn from(d: &Destination) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            position: Coordinate {
                lat: d.lat,
                lng: d.lng,
            },
        }
    }
}

/// Holds at most one focus coordinate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSync {
    focus: Option<Coordinate>,
}

impl MapSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&mut self, destination: &Destination) {
        self.focus = Some(Coordinate {
            lat: destination.lat,
            lng: destination.lng,
        });
    }

    pub fn clear(&mut self) {
        self.focus = None;
    }

    pub fn focused(&self) -> Option<Coordinate> {
        self.focus
    }

    /// Where the map should be looking right now.
    pub fn viewport(&self) -> Viewport {
        match self.focus {
            Some(center) => Viewport {
                center,
                zoom: FOCUS_ZOOM,
            },
            None => WORLD_VIEW,
        }
    }
}
