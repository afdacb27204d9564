//! Diagonal isometric camera, view frustum, and slice state.

use barrow_geom::{Plane, Vec3};
use barrow_map::Facet;

/// The four diagonal viewing directions. Each cell keeps one compiled draw
/// list per orientation, indexed by `index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Northeast = 0,
    Southeast = 1,
    Southwest = 2,
    Northwest = 3,
}

pub const ALL_ORIENTATIONS: [Orientation; 4] = [
    Orientation::Northeast,
    Orientation::Southeast,
    Orientation::Southwest,
    Orientation::Northwest,
];

impl Orientation {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Next orientation clockwise (viewed from above).
    #[inline]
    pub fn rotated_cw(self) -> Orientation {
        match self {
            Orientation::Northeast => Orientation::Southeast,
            Orientation::Southeast => Orientation::Southwest,
            Orientation::Southwest => Orientation::Northwest,
            Orientation::Northwest => Orientation::Northeast,
        }
    }

    #[inline]
    pub fn rotated_ccw(self) -> Orientation {
        match self {
            Orientation::Northeast => Orientation::Northwest,
            Orientation::Northwest => Orientation::Southwest,
            Orientation::Southwest => Orientation::Southeast,
            Orientation::Southeast => Orientation::Northeast,
        }
    }

    /// Unit offset from the look point toward the eye.
    pub fn eye_offset(self) -> Vec3 {
        let (x, y) = match self {
            Orientation::Northeast => (1.0, 1.0),
            Orientation::Southeast => (1.0, -1.0),
            Orientation::Southwest => (-1.0, -1.0),
            Orientation::Northwest => (-1.0, 1.0),
        };
        Vec3::new(x, y, 1.0).normalized()
    }

    /// Facet draw order for this viewpoint, back to front: bottom, then the
    /// two facets turned away from the eye, then the two turned toward it,
    /// then the top.
    pub fn facet_order(self) -> [Facet; 6] {
        use Facet::*;
        match self {
            Orientation::Northeast => [Down, West, South, East, North, Up],
            Orientation::Southeast => [Down, West, North, East, South, Up],
            Orientation::Southwest => [Down, East, North, West, South, Up],
            Orientation::Northwest => [Down, East, South, West, North, Up],
        }
    }
}

/// Six inward-facing planes. A sphere is visible while no plane pushes it
/// fully outside.
#[derive(Clone, Copy, Debug)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Orthographic box around `look`: width/height across the view axis,
    /// depth along it, centered on the eye-to-look segment.
    pub fn orthographic(
        eye: Vec3,
        look: Vec3,
        half_width: f32,
        half_height: f32,
        depth: f32,
    ) -> Self {
        let forward = (look - eye).normalized();
        let right = forward.cross(Vec3::UP).normalized();
        let up = right.cross(forward).normalized();
        let planes = [
            Plane::from_point_normal(eye, forward),
            Plane::from_point_normal(eye + forward * depth, -forward),
            Plane::from_point_normal(look - right * half_width, right),
            Plane::from_point_normal(look + right * half_width, -right),
            Plane::from_point_normal(look - up * half_height, up),
            Plane::from_point_normal(look + up * half_height, -up),
        ];
        Self { planes }
    }

    pub fn contains_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|p| p.signed_distance(center) >= -radius)
    }
}

/// View state the pipeline consumes each frame.
pub trait Camera {
    fn look_point(&self) -> Vec3;
    fn orientation(&self) -> Orientation;
    /// Topmost z level drawn; everything above is sliced away.
    fn look_level(&self) -> i32;
    /// Depth of the shaded band below the look level.
    fn view_levels(&self) -> i32;
    fn sphere_in_frustum(&self, center: Vec3, radius: f32) -> bool;
}

/// Orthographic camera pinned to one of the four diagonals.
#[derive(Clone, Debug)]
pub struct IsoCamera {
    look: Vec3,
    orientation: Orientation,
    distance: f32,
    half_width: f32,
    half_height: f32,
    look_level: i32,
    view_levels: i32,
    frustum: Frustum,
}

impl IsoCamera {
    pub fn new(
        look: Vec3,
        orientation: Orientation,
        distance: f32,
        half_width: f32,
        half_height: f32,
        look_level: i32,
        view_levels: i32,
    ) -> Self {
        let frustum = Self::build_frustum(look, orientation, distance, half_width, half_height);
        Self {
            look,
            orientation,
            distance,
            half_width,
            half_height,
            look_level,
            view_levels: view_levels.max(1),
            frustum,
        }
    }

    fn build_frustum(
        look: Vec3,
        orientation: Orientation,
        distance: f32,
        half_width: f32,
        half_height: f32,
    ) -> Frustum {
        let eye = look + orientation.eye_offset() * distance;
        Frustum::orthographic(eye, look, half_width, half_height, distance * 2.0)
    }

    fn refresh(&mut self) {
        self.frustum = Self::build_frustum(
            self.look,
            self.orientation,
            self.distance,
            self.half_width,
            self.half_height,
        );
    }

    pub fn rotate_cw(&mut self) {
        self.orientation = self.orientation.rotated_cw();
        self.refresh();
    }

    pub fn rotate_ccw(&mut self) {
        self.orientation = self.orientation.rotated_ccw();
        self.refresh();
    }

    pub fn pan(&mut self, delta: Vec3) {
        self.look = self.look + delta;
        self.refresh();
    }

    pub fn set_look_level(&mut self, level: i32) {
        self.look_level = level;
    }

    pub fn set_view_levels(&mut self, levels: i32) {
        self.view_levels = levels.max(1);
    }

    pub fn zoom(&mut self, factor: f32) {
        if factor > 0.0 {
            self.half_width *= factor;
            self.half_height *= factor;
            self.refresh();
        }
    }
}

impl Camera for IsoCamera {
    fn look_point(&self) -> Vec3 {
        self.look
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn look_level(&self) -> i32 {
        self.look_level
    }

    fn view_levels(&self) -> i32 {
        self.view_levels
    }

    fn sphere_in_frustum(&self, center: Vec3, radius: f32) -> bool {
        self.frustum.contains_sphere(center, radius)
    }
}
