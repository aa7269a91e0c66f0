//! Keyboard-driven translation plus a constant spin around the Y axis.

use std::f32::consts::TAU;

use cgmath::{Rad, Vector3};
use instant::Duration;

use crate::{
    camera::{Projection, View},
    config::MotionConfig,
    input::Actions,
    math::Transform,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Motion {
    pub offset: Vector3<f32>,
    pub angle: Rad<f32>,
    move_speed: f32,
    rotation_speed: f32,
    scale: f32,
}

impl Motion {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            offset: Vector3::new(0.0, 0.0, 0.0),
            angle: Rad(0.0),
            move_speed: config.move_speed,
            rotation_speed: config.rotation_speed,
            scale: config.model_scale,
        }
    }

    /// Advance by `dt`: move along every held direction and keep spinning.
    pub fn update(&mut self, actions: Actions, dt: Duration) {
        let dt = dt.as_secs_f32();
        let dist = dt * self.move_speed;
        if actions.contains(Actions::MOVE_LEFT) {
            self.offset.x -= dist;
        }
        if actions.contains(Actions::MOVE_RIGHT) {
            self.offset.x += dist;
        }
        if actions.contains(Actions::MOVE_UP) {
            self.offset.y += dist;
        }
        if actions.contains(Actions::MOVE_DOWN) {
            self.offset.y -= dist;
        }
        if actions.contains(Actions::MOVE_FORWARD) {
            self.offset.z -= dist;
        }
        if actions.contains(Actions::MOVE_BACKWARD) {
            self.offset.z += dist;
        }

        self.angle = Rad((self.angle.0 + self.rotation_speed * dt).rem_euclid(TAU));
    }

    pub fn model(&self) -> Transform {
        Transform::identity()
            .scale(self.scale, self.scale, self.scale)
            .rotate((0.0, 1.0, 0.0), self.angle)
            .translate(self.offset.x, self.offset.y, self.offset.z)
    }

    /// `P · V · M` for the current model matrix.
    pub fn mvp(&self, view: &View, projection: &Projection) -> Transform {
        projection.calc_matrix() * view.calc_matrix() * self.model()
    }
}
