use crate::error::MapError;
use crate::facet::Facet;
use crate::slope::{Slope, SlopeKind};
use barrow_materials::{MaterialCatalog, MaterialId};

/// A single renderable quad on one side of a cube.
///
/// Owned exclusively by its cube through the per-facet slots; a face exists
/// only while its facet is exposed and not replaced by a slope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub facet: Facet,
    pub material: MaterialId,
    pub visible: bool,
}

impl Face {
    #[inline]
    pub const fn new(facet: Facet, material: MaterialId) -> Self {
        Self {
            facet,
            material,
            visible: true,
        }
    }
}

/// One terrain unit: material, solidity state, face slots, optional slope.
///
/// A cube is solid XOR liquid XOR empty; the flag setters maintain the
/// exclusion. None of the mutators touch the owning cell's dirty flag —
/// render-cache invalidation belongs to the terrain-edit layer.
#[derive(Clone, Debug, Default)]
pub struct Cube {
    material: MaterialId,
    solid: bool,
    liquid: bool,
    faces: [Option<Face>; 6],
    slope: Option<Slope>,
}

impl Cube {
    /// Resets the cube to an empty unit of the given material.
    pub fn init(&mut self, material: MaterialId, catalog: &MaterialCatalog) -> Result<(), MapError> {
        if !catalog.contains(material) {
            return Err(MapError::InvalidMaterial(material));
        }
        self.material = material;
        self.solid = false;
        self.liquid = false;
        self.faces = [None; 6];
        self.slope = None;
        Ok(())
    }

    #[inline]
    pub fn material(&self) -> MaterialId {
        self.material
    }

    pub fn set_material(
        &mut self,
        material: MaterialId,
        catalog: &MaterialCatalog,
    ) -> Result<(), MapError> {
        if !catalog.contains(material) {
            return Err(MapError::InvalidMaterial(material));
        }
        self.material = material;
        Ok(())
    }

    #[inline]
    pub fn is_solid(&self) -> bool {
        self.solid
    }

    /// Sets the solid flag; raising it force-clears liquid.
    #[inline]
    pub fn set_solid(&mut self, value: bool) {
        self.solid = value;
        if value {
            self.liquid = false;
        }
        debug_assert!(!(self.solid && self.liquid));
    }

    #[inline]
    pub fn is_liquid(&self) -> bool {
        self.liquid
    }

    /// Sets the liquid flag; raising it force-clears solid.
    #[inline]
    pub fn set_liquid(&mut self, value: bool) {
        self.liquid = value;
        if value {
            self.solid = false;
        }
        debug_assert!(!(self.solid && self.liquid));
    }

    /// Neither solid nor liquid.
    #[inline]
    pub fn is_open(&self) -> bool {
        !self.solid && !self.liquid
    }

    #[inline]
    pub fn face(&self, facet: Facet) -> Option<&Face> {
        self.faces[facet.index()].as_ref()
    }

    #[inline]
    pub fn set_face(&mut self, face: Face) {
        self.faces[face.facet.index()] = Some(face);
    }

    #[inline]
    pub fn clear_face(&mut self, facet: Facet) {
        self.faces[facet.index()] = None;
    }

    pub fn clear_faces(&mut self) {
        self.faces = [None; 6];
    }

    pub fn set_all_faces_visible(&mut self, value: bool) {
        for slot in self.faces.iter_mut().flatten() {
            slot.visible = value;
        }
    }

    #[inline]
    pub fn slope(&self) -> Option<&Slope> {
        self.slope.as_ref()
    }

    /// Replaces any existing slope and drops the suppressed Up face.
    pub fn set_slope(&mut self, kind: SlopeKind) {
        self.slope = Some(Slope::new(kind));
        self.faces[Facet::Up.index()] = None;
    }

    #[inline]
    pub fn clear_slope(&mut self) {
        self.slope = None;
    }
}
