use glam::Vec3;
use std::f32::consts::TAU;

pub const APPROACH_STEP: f32 = 0.05;
pub const ORBIT_STEP: f32 = 0.01;
pub const ASCEND_Z_STEP: f32 = 0.05;
pub const ASCEND_Y_STEP: f32 = 0.02;

/// Center of the painting on the left wall; the close-up orbit circles it
/// at radius 1 in the XZ plane.
pub const PAINTING_ANCHOR: Vec3 = Vec3::new(-4.9, 1.5, 5.0);
/// The wide orbit looks at the middle of the house.
pub const HOUSE_FOCUS: Vec3 = Vec3::new(0.0, 1.5, 0.0);
pub const HOUSE_ORBIT_RADIUS: f32 = 20.0;
pub const HOUSE_ORBIT_HEIGHT: f32 = 10.0;

/// Camera pose for one frame: a position and, in shots that pin the view,
/// an explicit look-at target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub look_at: Option<Vec3>,
}

impl Pose {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            look_at: None,
        }
    }
}

/// One shot of the scripted tour, in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourPhase {
    /// Dolly straight toward the house entrance along -Z.
    Approach,
    /// Circle the painting on the left wall at radius 1.
    OrbitPainting,
    /// Pull back and crane up above the roof.
    Ascend,
    /// Wide establishing orbit around the house at radius 20.
    OrbitHouse,
}

impl TourPhase {
    fn next(self) -> Self {
        match self {
            Self::Approach => Self::OrbitPainting,
            Self::OrbitPainting => Self::Ascend,
            Self::Ascend => Self::OrbitHouse,
            Self::OrbitHouse => Self::Approach,
        }
    }
}

/// Scripted four-phase camera tour, advanced once per rendered frame.
///
/// The per-tick increments are fixed scene-space steps, not delta-time
/// scaled: the tour's wall-clock duration is a function of the render
/// loop's tick rate. Every tick is a pure function of
/// `(phase, progress, pose)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TourController {
    phase: TourPhase,
    progress: f32,
}

impl TourController {
    pub fn new() -> Self {
        Self {
            phase: TourPhase::Approach,
            progress: 0.0,
        }
    }

    pub fn phase(&self) -> TourPhase {
        self.phase
    }

    /// Angular accumulator for the current phase. Only meaningful in the
    /// two orbit phases; reset to zero on every transition.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Advance the tour by one frame and produce the new camera pose.
    ///
    /// Transition thresholds are checked after the pose mutation, so the
    /// final tick of a phase both moves the camera and switches the phase.
    /// Comparisons are `>=`/`<=` on purpose: float accumulation almost
    /// never lands exactly on a threshold.
    pub fn tick(&mut self, pose: Pose) -> Pose {
        match self.phase {
            TourPhase::Approach => {
                let mut position = pose.position;
                position.z -= APPROACH_STEP;
                if position.z <= PAINTING_ANCHOR.z {
                    self.advance();
                }
                Pose::at(position)
            }
            TourPhase::OrbitPainting => {
                self.progress += ORBIT_STEP;
                let position = PAINTING_ANCHOR
                    + Vec3::new(self.progress.sin(), 0.0, self.progress.cos());
                if self.progress >= TAU {
                    self.advance();
                }
                Pose::at(position)
            }
            TourPhase::Ascend => {
                let mut position = pose.position;
                position.z += ASCEND_Z_STEP;
                position.y += ASCEND_Y_STEP;
                if position.y >= HOUSE_ORBIT_HEIGHT {
                    self.advance();
                }
                Pose::at(position)
            }
            TourPhase::OrbitHouse => {
                self.progress += ORBIT_STEP;
                let position = Vec3::new(
                    HOUSE_ORBIT_RADIUS * self.progress.cos(),
                    HOUSE_ORBIT_HEIGHT,
                    HOUSE_ORBIT_RADIUS * self.progress.sin(),
                );
                if self.progress >= TAU {
                    self.advance();
                }
                Pose {
                    position,
                    look_at: Some(HOUSE_FOCUS),
                }
            }
        }
    }

    fn advance(&mut self) {
        self.phase = self.phase.next();
        self.progress = 0.0;
    }
}

impl Default for TourController {
    fn default() -> Self {
        Self::new()
    }
}
