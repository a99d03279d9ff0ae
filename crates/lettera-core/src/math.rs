/// SIMD-accelerated math types re-exported from [`glam`].
///
/// Use these for CPU-side layout math (pen positions, translations).
///
/// ```
/// use lettera_core::math::Vec2;
///
/// let pen = Vec2::new(0.0, 0.0);
/// let advanced = pen + Vec2::X * 12.5;
/// assert_eq!(advanced.x, 12.5);
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

/// Packed vector types for GPU instance buffers.
///
/// These are `#[repr(C)]` and [`Pod`](bytemuck::Pod), so slices of them can be
/// cast straight to bytes with [`bytemuck::cast_slice`].
///
/// ```
/// use lettera_core::math::{PackedVec3, Vec3};
///
/// let packed = PackedVec3::from(Vec3::new(1.0, 2.0, 3.0));
/// let bytes: &[u8] = bytemuck::bytes_of(&packed);
/// assert_eq!(bytes.len(), 12);
/// ```
pub mod packed {
    use bytemuck::{Pod, Zeroable};

    /// A 2D vector with guaranteed `#[repr(C)]` layout.
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec2 {
        pub x: f32,
        pub y: f32,
    }

    /// A 3D vector with guaranteed `#[repr(C)]` layout.
    ///
    /// **Note**: GPU shaders often expect 16-byte alignment, pad explicitly
    /// when placing this inside a uniform block.
    #[repr(C)]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
    pub struct Vec3 {
        pub x: f32,
        pub y: f32,
        pub z: f32,
    }

    impl From<glam::Vec2> for Vec2 {
        fn from(v: glam::Vec2) -> Self {
            Self { x: v.x, y: v.y }
        }
    }

    impl From<glam::Vec3> for Vec3 {
        fn from(v: glam::Vec3) -> Self {
            Self {
                x: v.x,
                y: v.y,
                z: v.z,
            }
        }
    }
}

pub use fast::*;
pub use packed::{Vec2 as PackedVec2, Vec3 as PackedVec3};
