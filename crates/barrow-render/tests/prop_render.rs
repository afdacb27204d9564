use barrow_geom::Vec3;
use barrow_render::{Camera, IsoCamera, Orientation, PickingColors, RenderPipeline};
use proptest::prelude::*;

proptest! {
    #[test]
    fn picking_colors_round_trip(index in 0u32..0x00ff_ffff) {
        let color = PickingColors::color_for(index);
        prop_assert_eq!(PickingColors::index_for(color), Some(index));
    }

    #[test]
    fn shading_stays_normalized(z in -64i32..64, look in -64i32..64, levels in 1i32..32) {
        let pipeline = RenderPipeline::new();
        let mut cam = IsoCamera::new(Vec3::ZERO, Orientation::Northeast, 32.0, 16.0, 16.0, 0, 4);
        cam.set_look_level(look);
        cam.set_view_levels(levels);
        let s = pipeline.shading(z, &cam);
        prop_assert!((0.0..=1.0).contains(&s));
        if z == look {
            prop_assert_eq!(s, 1.0);
        }
        if look - z >= levels || z > look {
            prop_assert_eq!(s, 0.0);
        }
    }

    #[test]
    fn eye_offsets_are_unit_diagonals(i in 0usize..4) {
        let o = barrow_render::ALL_ORIENTATIONS[i];
        let v = o.eye_offset();
        prop_assert!((v.length() - 1.0).abs() < 1e-5);
        prop_assert!(v.z > 0.0);
    }

    #[test]
    fn look_point_survives_rotation(x in -100.0f32..100.0, y in -100.0f32..100.0) {
        let mut cam = IsoCamera::new(
            Vec3::new(x, y, 0.0),
            Orientation::Southwest,
            32.0,
            16.0,
            16.0,
            0,
            4,
        );
        cam.rotate_cw();
        prop_assert_eq!(cam.look_point(), Vec3::new(x, y, 0.0));
    }
}
