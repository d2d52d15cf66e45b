use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Tracked joints the mapper reads
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Joint {
    LeftShoulder,
    RightShoulder,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
}

impl Joint {
    pub const ALL: [Joint; 6] = [
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftHip,
        Joint::RightHip,
    ];

    /// Index in the 33-point BlazePose landmark list
    pub const fn blazepose_index(self) -> usize {
        match self {
            Joint::LeftShoulder => 11,
            Joint::RightShoulder => 12,
            Joint::LeftWrist => 15,
            Joint::RightWrist => 16,
            Joint::LeftHip => 23,
            Joint::RightHip => 24,
        }
    }
}

/// Normalized keypoint: `x, y, visibility` all in [0, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }

    pub fn to_pixels(&self, width: f32, height: f32) -> Vec2 {
        Vec2::new(self.x * width, self.y * height)
    }
}

/// One frame of pose output
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseFrame {
    pub landmarks: HashMap<Joint, Landmark>,
}

impl PoseFrame {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Pick the joints we care about out of a full BlazePose landmark list.
    ///
    /// Missing indices are simply absent from the frame.
    pub fn from_blazepose(points: &[Landmark]) -> Self {
        let landmarks = Joint::ALL
            .iter()
            .filter_map(|&joint| points.get(joint.blazepose_index()).map(|lm| (joint, *lm)))
            .collect();
        Self { landmarks }
    }

    pub fn with(mut self, joint: Joint, landmark: Landmark) -> Self {
        self.landmarks.insert(joint, landmark);
        self
    }

    pub fn get(&self, joint: Joint) -> Option<&Landmark> {
        self.landmarks.get(&joint)
    }
}
