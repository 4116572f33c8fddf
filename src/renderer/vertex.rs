//! GPU instance data for an instanced-quad backend
//!
//! Every shape becomes one quad instance; the fragment shader picks the SDF by
//! `kind`. Text and textured images are left to the backend.

use bytemuck::{Pod, Zeroable};

use super::{Color, DrawCommand};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Maximum instances uploaded per frame
pub const MAX_INSTANCES: usize = 4096;

/// Shape kinds understood by the shader
pub mod kind {
    pub const CIRCLE: u32 = 0;
    pub const RECT: u32 = 1;
    /// Flat quad standing in for a missing image
    pub const PLACEHOLDER: u32 = 2;
}

// Layout must match the shader
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ShapeInstance {
    pub center: [f32; 2],    // offset 0
    pub half_size: [f32; 2], // offset 8
    pub color: u32,          // offset 16, RGBA8 packed
    pub kind: u32,           // offset 20
    pub corner_radius: f32,  // offset 24
    pub stroke: f32,         // offset 28, 0 = filled
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    pub resolution: [f32; 2],
    pub time: f32,
    pub instance_count: u32,
}

impl FrameUniform {
    pub fn new(time: f32, instance_count: usize) -> Self {
        Self {
            resolution: [SCREEN_WIDTH, SCREEN_HEIGHT],
            time,
            instance_count: instance_count as u32,
        }
    }
}

/// RGBA bytes in memory order
pub fn pack_color(c: Color) -> u32 {
    u32::from_le_bytes(c)
}

fn to_instance(command: &DrawCommand) -> Option<ShapeInstance> {
    match command {
        DrawCommand::Circle {
            center,
            radius,
            color,
            stroke,
        } => Some(ShapeInstance {
            center: center.to_array(),
            half_size: [*radius, *radius],
            color: pack_color(*color),
            kind: kind::CIRCLE,
            corner_radius: 0.0,
            stroke: stroke.unwrap_or(0.0),
        }),
        DrawCommand::Rect {
            rect,
            color,
            corner_radius,
            stroke,
        } => Some(ShapeInstance {
            center: rect.center().to_array(),
            half_size: [rect.w / 2.0, rect.h / 2.0],
            color: pack_color(*color),
            kind: kind::RECT,
            corner_radius: *corner_radius,
            stroke: stroke.unwrap_or(0.0),
        }),
        DrawCommand::Overlay { color } => Some(ShapeInstance {
            center: [SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0],
            half_size: [SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0],
            color: pack_color(*color),
            kind: kind::RECT,
            corner_radius: 0.0,
            stroke: 0.0,
        }),
        DrawCommand::Image {
            center,
            size,
            placeholder: Some(rgb),
            ..
        } => Some(ShapeInstance {
            center: center.to_array(),
            half_size: (*size / 2.0).to_array(),
            color: pack_color([rgb[0], rgb[1], rgb[2], 255]),
            kind: kind::PLACEHOLDER,
            corner_radius: 0.0,
            stroke: 0.0,
        }),
        DrawCommand::Image { .. } | DrawCommand::Text { .. } | DrawCommand::Seabed { .. } => None,
    }
}

/// Pack the shape commands of a frame, in draw order
pub fn pack_shapes(commands: &[DrawCommand]) -> Vec<ShapeInstance> {
    let mut instances: Vec<ShapeInstance> = commands.iter().filter_map(to_instance).collect();
    if instances.len() > MAX_INSTANCES {
        log::warn!(
            "Dropping {} shape instances over the per-frame limit",
            instances.len() - MAX_INSTANCES
        );
        instances.truncate(MAX_INSTANCES);
    }
    instances
}

/// Raw bytes for a buffer upload
pub fn as_bytes(instances: &[ShapeInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}

/// Bytes one frame uploads: the uniform followed by the instances
pub fn frame_bytes(uniform: &FrameUniform, instances: &[ShapeInstance]) -> Vec<u8> {
    let mut bytes = bytemuck::bytes_of(uniform).to_vec();
    bytes.extend_from_slice(as_bytes(instances));
    bytes
}
