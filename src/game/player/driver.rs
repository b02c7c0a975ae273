//! Player car steering and the chase camera that follows it.

use glam::Vec3;
use log::debug;

use crate::config::DriveConfig;
use crate::game::world::camera::Camera;

pub struct Driver {
    /// Accumulated horizontal drag; its angle is `steer / steer_divisor`.
    pub steer: f32,
    /// Accumulated vertical drag. Dragging up (negative) drives forward.
    pub throttle: f32,
    pub accel: f32,
    pub distance: f32,
    pub forward: Vec3,
    origin: Vec3,
    config: DriveConfig,
}

impl Driver {
    pub fn new(config: DriveConfig, origin: Vec3) -> Self {
        Self {
            steer: 0.0,
            throttle: 0.0,
            accel: 0.0,
            distance: 0.0,
            forward: Vec3::X,
            origin,
            config,
        }
    }

    pub fn add_steer(&mut self, delta: f32) {
        self.steer += delta;
    }

    pub fn add_throttle(&mut self, delta: f32) {
        self.throttle += delta;
    }

    pub fn reset_throttle(&mut self) {
        self.throttle = 0.0;
    }

    /// Advances one frame: integrates the throttle, repositions the camera and
    /// returns where the player car sits, at `start.y` height.
    pub fn update(&mut self, camera: &mut Camera, start: Vec3) -> Vec3 {
        let cfg = &self.config;

        if self.throttle.abs() < cfg.dead_zone {
            self.throttle = 0.0;
        }
        if self.throttle.abs() <= cfg.max_throttle {
            self.accel = -self.throttle * cfg.accel_gain;
        } else {
            self.throttle = self.throttle.clamp(-cfg.max_throttle, cfg.max_throttle);
        }
        self.distance += self.accel;

        if self.steer.abs() < cfg.dead_zone {
            self.steer = 0.0;
        }
        let (sin, cos) = (self.steer / cfg.steer_divisor).sin_cos();
        self.forward = Vec3::new(cos, 0.0, sin);

        let travelled = self.distance / cfg.distance_divisor;
        camera.eye.x = self.origin.x + travelled * self.forward.x;
        camera.eye.z = self.origin.z + travelled * self.forward.z;
        camera.target = camera.eye + cfg.look_ahead * self.forward;

        let car = Vec3::new(
            camera.eye.x + cfg.car_lead * self.forward.x,
            start.y,
            camera.eye.z + cfg.car_lead * self.forward.z,
        );
        debug!("throttle {} accel {} distance {}", self.throttle, self.accel, self.distance);
        car
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: Vec3 = Vec3::new(0.0, 5.0, 20.0);

    fn setup() -> (Driver, Camera) {
        let camera = Camera::default();
        (Driver::new(DriveConfig::default(), camera.eye), camera)
    }

    #[test]
    fn test_idle_frame() {
        let (mut driver, mut camera) = setup();
        let car = driver.update(&mut camera, START);
        assert_eq!(camera.eye, Vec3::new(0.0, 10.0, 25.0));
        assert_eq!(camera.target, Vec3::new(25.0, 10.0, 25.0));
        assert_eq!(car, Vec3::new(5.0, 5.0, 25.0));
    }

    #[test]
    fn test_dead_zone_snaps_small_input() {
        let (mut driver, mut camera) = setup();
        driver.add_throttle(1.5);
        driver.add_steer(-1.9);
        driver.update(&mut camera, START);
        assert_eq!(driver.throttle, 0.0);
        assert_eq!(driver.steer, 0.0);
        assert_eq!(driver.accel, 0.0);
    }

    #[test]
    fn test_throttle_accumulates_distance() {
        let (mut driver, mut camera) = setup();
        driver.add_throttle(-100.0);
        driver.update(&mut camera, START);
        assert_eq!(driver.accel, 200.0);
        driver.update(&mut camera, START);
        assert_eq!(driver.distance, 400.0);
        assert!((camera.eye.x - 0.4).abs() < 1e-6);
        assert_eq!(camera.eye.y, 10.0);
    }

    #[test]
    fn test_throttle_clamps_and_keeps_previous_accel() {
        let (mut driver, mut camera) = setup();
        driver.add_throttle(-100.0);
        driver.update(&mut camera, START);
        driver.add_throttle(-400.0);
        driver.update(&mut camera, START);
        assert_eq!(driver.throttle, -250.0);
        assert_eq!(driver.accel, 200.0);
        driver.update(&mut camera, START);
        assert_eq!(driver.accel, 500.0);
    }

    #[test]
    fn test_steering_turns_camera_and_car() {
        let (mut driver, mut camera) = setup();
        driver.add_steer(50.0 * std::f32::consts::FRAC_PI_2);
        let car = driver.update(&mut camera, START);
        assert!((driver.forward - Vec3::Z).length() < 1e-6);
        assert!((camera.target - Vec3::new(0.0, 10.0, 50.0)).length() < 1e-4);
        assert!((car - Vec3::new(0.0, 5.0, 30.0)).length() < 1e-4);
    }
}
