//! Mapping between simulation space and the display collaborator's pixels
//!
//! Simulation coordinates are centred on the origin with y pointing up;
//! screen coordinates start at the top-left corner with y pointing down.

use crate::simulation::boundary::Domain;
use crate::simulation::states::NVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub width: f64, // pixels
    pub height: f64, // pixels
    pub scale: f64, // pixels per simulation unit
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 900.0,
            scale: 200.0,
        }
    }
}

impl ViewTransform {
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Self { width, height, scale }
    }

    pub fn screen_to_sim(&self, p: NVec2) -> NVec2 {
        NVec2::new(
            (p.x - self.width / 2.0) / self.scale,
            -(p.y - self.height / 2.0) / self.scale,
        )
    }

    pub fn sim_to_screen(&self, a: NVec2) -> NVec2 {
        NVec2::new(
            self.width / 2.0 + a.x * self.scale,
            self.height / 2.0 - a.y * self.scale,
        )
    }

    /// Visible area in simulation units.
    /// Taken once per frame so a resize never lands in the middle of one.
    pub fn domain(&self) -> Domain {
        let corner = self.screen_to_sim(NVec2::new(self.width, self.height));
        Domain::new(corner.x, corner.y)
    }

    /// Two-click drag gesture: the first click places the body, the vector
    /// to the second click becomes its velocity.
    pub fn drag_to_body(&self, start: NVec2, end: NVec2) -> (NVec2, NVec2) {
        let a = self.screen_to_sim(start);
        let b = self.screen_to_sim(end);
        (a, b - a)
    }
}
