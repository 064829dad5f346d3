use nalgebra::{Point3, UnitQuaternion, Vector3};

/// The 8 vertices of an oriented box.
///
/// Corners 0..4 face forward (+x of the box), corners 4..8 face rearward.
/// Corner `i` and corner `i + 4` lie on the same edge running front to back.
pub type BoxCorners = [Point3<f64>; 8];

const X_SIGNS: [f64; 8] = [1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0];
const Y_SIGNS: [f64; 8] = [1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0];
const Z_SIGNS: [f64; 8] = [1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0];

/// An oriented 3D bounding box.
///
/// `size` is `[width, length, height]`; length runs along the box's local x
/// axis, width along y and height along z.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedBox {
    pub center: Vector3<f64>,
    pub size: [f64; 3],
    pub orientation: UnitQuaternion<f64>,
    pub name: Option<String>,
    pub token: Option<String>,
}

impl OrientedBox {
    pub fn new(center: Vector3<f64>, size: [f64; 3], orientation: UnitQuaternion<f64>) -> Self {
        Self {
            center,
            size,
            orientation,
            name: None,
            token: None,
        }
    }

    pub fn with_label(mut self, name: impl Into<String>, token: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.token = Some(token.into());
        self
    }

    pub fn width(&self) -> f64 {
        self.size[0]
    }

    pub fn length(&self) -> f64 {
        self.size[1]
    }

    pub fn height(&self) -> f64 {
        self.size[2]
    }

    /// Moves the center by `offset`. Orientation and size are unchanged.
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        self.center += offset;
    }

    /// Rotates the box about the origin of its current frame.
    pub fn rotate(&mut self, rotation: &UnitQuaternion<f64>) {
        self.center = rotation * self.center;
        self.orientation = rotation * self.orientation;
    }

    pub fn corners(&self) -> BoxCorners {
        self.scaled_corners(1.0)
    }

    /// Corners of the box with every dimension multiplied by `size_factor`.
    pub fn scaled_corners(&self, size_factor: f64) -> BoxCorners {
        let half_w = self.width() * size_factor / 2.0;
        let half_l = self.length() * size_factor / 2.0;
        let half_h = self.height() * size_factor / 2.0;

        std::array::from_fn(|i| {
            let local = Vector3::new(half_l * X_SIGNS[i], half_w * Y_SIGNS[i], half_h * Z_SIGNS[i]);
            Point3::from(self.orientation * local + self.center)
        })
    }
}
