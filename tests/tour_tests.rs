use glam::Vec3;
use house_tour::tour::{
    Pose, TourController, TourPhase, HOUSE_FOCUS, HOUSE_ORBIT_HEIGHT, HOUSE_ORBIT_RADIUS,
    PAINTING_ANCHOR,
};

/// Drives the controller exactly the way the render loop does: each tick
/// feeds back the previous position.
fn run_ticks(tour: &mut TourController, start: Vec3, ticks: usize) -> Pose {
    let mut pose = Pose::at(start);
    for _ in 0..ticks {
        pose = tour.tick(pose);
    }
    pose
}

/// Ticks until the phase changes, returning the tick count and final pose.
fn run_until_transition(tour: &mut TourController, start: Vec3) -> (usize, Pose) {
    let from = tour.phase();
    let mut pose = Pose::at(start);
    let mut ticks = 0;
    while tour.phase() == from {
        pose = tour.tick(pose);
        ticks += 1;
        assert!(ticks < 100_000, "phase {:?} never transitioned", from);
    }
    (ticks, pose)
}

#[cfg(test)]
mod approach_tests {
    use super::*;

    #[test]
    fn test_approach_dollies_along_negative_z() {
        let mut tour = TourController::new();
        let pose = run_ticks(&mut tour, Vec3::new(0.0, 5.0, 20.0), 100);

        assert_eq!(tour.phase(), TourPhase::Approach, "Still far from the wall");
        assert!((pose.position.z - 15.0).abs() < 1e-3, "100 ticks at 0.05 covers 5 units");
        assert_eq!(pose.position.x, 0.0, "Approach must not drift in x");
        assert_eq!(pose.position.y, 5.0, "Approach must not drift in y");
    }

    #[test]
    fn test_approach_transitions_at_the_painting_wall() {
        let mut tour = TourController::new();
        let (ticks, pose) = run_until_transition(&mut tour, Vec3::new(0.0, 5.0, 5.5));

        assert_eq!(tour.phase(), TourPhase::OrbitPainting);
        // 0.5 units at 0.05 per tick. The tenth f32 subtraction lands at
        // ~4.999998, just under the threshold, so the count is exact.
        assert_eq!(ticks, 10, "expected exactly 10 ticks, got {}", ticks);
        assert!(pose.position.z <= 5.0 + 1e-4, "Camera should reach z=5, got {}", pose.position.z);
        assert_eq!(tour.progress(), 0.0, "Progress resets on transition");
    }
}

#[cfg(test)]
mod orbit_painting_tests {
    use super::*;

    #[test]
    fn test_painting_orbit_stays_on_the_unit_circle() {
        let mut tour = TourController::new();
        // Burn through the approach first.
        let mut pose = run_until_transition(&mut tour, Vec3::new(0.0, 5.0, 5.1)).1;

        for _ in 0..500 {
            pose = tour.tick(pose);
            let offset = pose.position - PAINTING_ANCHOR;
            let radius = (offset.x * offset.x + offset.z * offset.z).sqrt();
            assert!(
                (radius - 1.0).abs() < 1e-5,
                "Orbit radius should be 1.0, got {}",
                radius
            );
            assert!(
                (pose.position.y - PAINTING_ANCHOR.y).abs() < 1e-6,
                "Painting orbit stays at the painting's height"
            );
        }
    }

    #[test]
    fn test_painting_orbit_lasts_one_full_revolution() {
        let mut tour = TourController::new();
        let pose = run_until_transition(&mut tour, Vec3::new(0.0, 5.0, 5.1)).1;
        assert_eq!(tour.phase(), TourPhase::OrbitPainting);

        let (ticks, _) = run_until_transition(&mut tour, pose.position);

        // ceil(2*pi / 0.01)
        assert_eq!(ticks, 629, "One revolution at 0.01 rad per tick");
        assert_eq!(tour.phase(), TourPhase::Ascend);
        assert_eq!(tour.progress(), 0.0);
    }

    #[test]
    fn test_painting_orbit_does_not_pin_the_view() {
        let mut tour = TourController::new();
        let mut pose = run_until_transition(&mut tour, Vec3::new(0.0, 5.0, 5.1)).1;
        pose = tour.tick(pose);
        assert_eq!(pose.look_at, None, "Close-up orbit leaves the view free");
    }
}

#[cfg(test)]
mod ascend_tests {
    use super::*;

    #[test]
    fn test_ascend_pulls_back_while_climbing() {
        let mut tour = seeded(TourPhase::Ascend);
        let pose = run_ticks(&mut tour, Vec3::new(-4.9, 1.5, 6.0), 100);

        assert!((pose.position.z - 11.0).abs() < 1e-3, "z grows at 0.05 per tick");
        assert!((pose.position.y - 3.5).abs() < 1e-3, "y grows at 0.02 per tick");
        assert_eq!(pose.position.x, -4.9, "Ascend must not drift in x");
    }

    #[test]
    fn test_ascend_transitions_at_orbit_height() {
        let mut tour = seeded(TourPhase::Ascend);
        // One step below the threshold: the next climb crosses y >= 10.
        let pose = run_ticks(&mut tour, Vec3::new(-4.9, 9.99, 30.0), 1);

        assert_eq!(tour.phase(), TourPhase::OrbitHouse);
        assert!(pose.position.y >= HOUSE_ORBIT_HEIGHT - 1e-4);
    }
}

#[cfg(test)]
mod orbit_house_tests {
    use super::*;

    #[test]
    fn test_house_orbit_circles_at_radius_twenty() {
        let mut tour = seeded(TourPhase::OrbitHouse);
        let mut pose = Pose::at(Vec3::new(20.0, 10.0, 0.0));

        for _ in 0..600 {
            pose = tour.tick(pose);
            let r_sq = pose.position.x * pose.position.x + pose.position.z * pose.position.z;
            assert!(
                (r_sq - HOUSE_ORBIT_RADIUS * HOUSE_ORBIT_RADIUS).abs() < 1e-2,
                "x^2 + z^2 should stay at 400, got {}",
                r_sq
            );
            assert_eq!(pose.position.y, HOUSE_ORBIT_HEIGHT, "Orbit height is constant");
            assert_eq!(pose.look_at, Some(HOUSE_FOCUS), "Wide orbit pins the view on the house");
        }
    }

    #[test]
    fn test_house_orbit_wraps_back_to_approach() {
        let mut tour = seeded(TourPhase::OrbitHouse);
        let (ticks, _) = run_until_transition(&mut tour, Vec3::new(20.0, 10.0, 0.0));

        assert_eq!(ticks, 629, "Same angular step as the painting orbit");
        assert_eq!(tour.phase(), TourPhase::Approach, "The tour is a cycle");
    }
}

#[cfg(test)]
mod full_cycle_tests {
    use super::*;

    #[test]
    fn test_phases_occur_in_script_order() {
        let mut tour = TourController::new();
        let mut pose = Pose::at(Vec3::new(0.0, 5.0, 20.0));
        let mut seen = vec![tour.phase()];

        for _ in 0..3000 {
            pose = tour.tick(pose);
            if tour.phase() != *seen.last().unwrap() {
                seen.push(tour.phase());
            }
        }

        assert!(
            seen.starts_with(&[
                TourPhase::Approach,
                TourPhase::OrbitPainting,
                TourPhase::Ascend,
                TourPhase::OrbitHouse,
            ]),
            "Phases out of order: {:?}",
            seen
        );
    }

    #[test]
    fn test_tour_is_deterministic() {
        let start = Vec3::new(0.0, 5.0, 20.0);

        let mut a = TourController::new();
        let mut b = TourController::new();
        let mut pose_a = Pose::at(start);
        let mut pose_b = Pose::at(start);

        for tick in 0..5000 {
            pose_a = a.tick(pose_a);
            pose_b = b.tick(pose_b);
            assert_eq!(
                pose_a.position.to_array(),
                pose_b.position.to_array(),
                "Positions diverged at tick {}",
                tick
            );
            assert_eq!(pose_a.look_at, pose_b.look_at);
            assert_eq!(a.phase(), b.phase());
        }
    }
}

/// Builds a controller already in the given phase by replaying the script
/// up to it. Keeps the tests honest about reachable states.
fn seeded(target: TourPhase) -> TourController {
    let mut tour = TourController::new();
    let mut pose = Pose::at(Vec3::new(0.0, 5.0, 20.0));
    let mut guard = 0;
    while tour.phase() != target {
        pose = tour.tick(pose);
        guard += 1;
        assert!(guard < 100_000, "never reached phase {:?}", target);
    }
    tour
}
