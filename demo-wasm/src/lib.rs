use ambler::{BodyConfig, JointId, NoOpStepObserver, Skeleton, StepConfig};
use wasm_bindgen::prelude::*;

/// Canvas-facing wrapper around the skeleton simulation.
///
/// The renderer reads flat f32 buffers after each `update`; nothing in
/// here mutates the simulation besides `update`, `toggle_walking`, and
/// `reset`.
#[wasm_bindgen]
pub struct WalkDemo {
    skeleton: Skeleton<f32>,
    config: StepConfig<f32>,
    body: BodyConfig<f32>,
}

#[wasm_bindgen]
impl WalkDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(center_x: f32, center_y: f32, scale: f32) -> Result<WalkDemo, JsError> {
        let body = BodyConfig::default();
        let config = StepConfig::default();
        config.validate().map_err(|e| JsError::new(&e.to_string()))?;
        let skeleton = Skeleton::new(center_x, center_y, scale, &body)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(WalkDemo { skeleton, config, body })
    }

    pub fn update(&mut self, dt: f32) {
        self.skeleton.step(dt, &self.config, &mut NoOpStepObserver);
    }

    pub fn toggle_walking(&mut self) {
        if self.skeleton.is_walking() {
            self.skeleton.stop_walking();
        } else {
            self.skeleton.start_walking();
        }
    }

    pub fn reset(&mut self, center_x: f32, center_y: f32, scale: f32) -> Result<(), JsError> {
        self.skeleton
            .reset(center_x, center_y, scale, &self.body)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn is_walking(&self) -> bool {
        self.skeleton.is_walking()
    }

    pub fn ground_y(&self) -> f32 {
        self.config.ground_y
    }

    /// Returns [x, y, radius] for the head circle.
    pub fn head(&self) -> Vec<f32> {
        let head = self.skeleton.joint(JointId::Head);
        vec![head.pos.x, head.pos.y, self.skeleton.head_radius()]
    }

    /// Returns [x0, y0, x1, y1, ...] for every joint, in id order.
    pub fn joint_positions(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(JointId::COUNT * 2);
        for (_, joint) in self.skeleton.joints().iter() {
            out.push(joint.pos.x);
            out.push(joint.pos.y);
        }
        out
    }

    /// Returns [ax, ay, bx, by, r, g, b] per bone, in solver order.
    pub fn bone_segments(&self) -> Vec<f32> {
        let mut out = Vec::new();
        for seg in self.skeleton.segments() {
            out.push(seg.start.x);
            out.push(seg.start.y);
            out.push(seg.end.x);
            out.push(seg.end.y);
            out.push(seg.color.0 as f32);
            out.push(seg.color.1 as f32);
            out.push(seg.color.2 as f32);
        }
        out
    }
}
