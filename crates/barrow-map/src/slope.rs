//! Ramp shapes derived from the solidity pattern around a cube.

/// Fixed enumeration of ramp shapes.
///
/// Directional ramps rise toward the named neighbor. Outer corners join two
/// adjacent ramps (named by the solid pair's diagonal). Inner corners fill
/// three solid sides and open toward the one named gap.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SlopeKind {
    RampNorth,
    RampEast,
    RampSouth,
    RampWest,
    CornerNortheast,
    CornerSoutheast,
    CornerSouthwest,
    CornerNorthwest,
    InnerNorth,
    InnerEast,
    InnerSouth,
    InnerWest,
}

/// Derived ramp geometry owned by a cube; at most one per cube, and its
/// presence suppresses the cube's Up face.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Slope {
    pub kind: SlopeKind,
}

impl Slope {
    #[inline]
    pub const fn new(kind: SlopeKind) -> Self {
        Self { kind }
    }
}

/// Solidity of the four orthogonal neighbors at the cube's own level.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct NeighborPattern {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl NeighborPattern {
    #[inline]
    pub const fn new(north: bool, east: bool, south: bool, west: bool) -> Self {
        Self {
            north,
            east,
            south,
            west,
        }
    }

    #[inline]
    pub fn count(self) -> u32 {
        self.north as u32 + self.east as u32 + self.south as u32 + self.west as u32
    }
}

/// Complete decision table over the 16 orthogonal-neighbor patterns.
///
/// A pattern bit is set when that neighbor is solid. The mapping is a pure
/// function of the bit set, so it cannot depend on evaluation order:
/// no bits or all four bits mean level terrain (flat, no slope); one bit is
/// a directional ramp; two adjacent bits an outer corner; two opposite bits
/// are ambiguous and default to flat; three bits an inner corner opening
/// toward the gap.
pub fn slope_for(p: NeighborPattern) -> Option<SlopeKind> {
    use SlopeKind::*;
    match (p.north, p.east, p.south, p.west) {
        (false, false, false, false) => None,
        (true, false, false, false) => Some(RampNorth),
        (false, true, false, false) => Some(RampEast),
        (false, false, true, false) => Some(RampSouth),
        (false, false, false, true) => Some(RampWest),
        (true, true, false, false) => Some(CornerNortheast),
        (false, true, true, false) => Some(CornerSoutheast),
        (false, false, true, true) => Some(CornerSouthwest),
        (true, false, false, true) => Some(CornerNorthwest),
        // Opposite pairs: no single rising direction exists.
        (true, false, true, false) => None,
        (false, true, false, true) => None,
        (true, true, true, false) => Some(InnerWest),
        (true, true, false, true) => Some(InnerSouth),
        (true, false, true, true) => Some(InnerEast),
        (false, true, true, true) => Some(InnerNorth),
        (true, true, true, true) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_full_patterns_are_flat() {
        assert_eq!(slope_for(NeighborPattern::default()), None);
        assert_eq!(slope_for(NeighborPattern::new(true, true, true, true)), None);
    }

    #[test]
    fn single_neighbor_gives_directional_ramp() {
        assert_eq!(
            slope_for(NeighborPattern::new(true, false, false, false)),
            Some(SlopeKind::RampNorth)
        );
        assert_eq!(
            slope_for(NeighborPattern::new(false, false, false, true)),
            Some(SlopeKind::RampWest)
        );
    }

    #[test]
    fn opposite_pairs_default_to_flat() {
        assert_eq!(slope_for(NeighborPattern::new(true, false, true, false)), None);
        assert_eq!(slope_for(NeighborPattern::new(false, true, false, true)), None);
    }

    #[test]
    fn three_neighbors_open_toward_gap() {
        assert_eq!(
            slope_for(NeighborPattern::new(true, true, true, false)),
            Some(SlopeKind::InnerWest)
        );
        assert_eq!(
            slope_for(NeighborPattern::new(false, true, true, true)),
            Some(SlopeKind::InnerNorth)
        );
    }

    #[test]
    fn all_sixteen_patterns_are_covered() {
        // Every pattern must resolve without panicking, and corner variants
        // must be distinct per diagonal.
        let mut corners = Vec::new();
        for bits in 0u8..16 {
            let p = NeighborPattern::new(
                bits & 1 != 0,
                bits & 2 != 0,
                bits & 4 != 0,
                bits & 8 != 0,
            );
            if p.count() == 2
                && let Some(k) = slope_for(p)
            {
                corners.push(k);
            }
        }
        corners.sort_by_key(|k| *k as usize);
        corners.dedup();
        assert_eq!(corners.len(), 4);
    }
}
