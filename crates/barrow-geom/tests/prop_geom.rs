use barrow_geom::{Aabb, Plane, Vec3};
use proptest::num::f32::NORMAL;
use proptest::prelude::*;
use proptest::strategy::Strategy;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
fn vapprox(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx(a.x, b.x, eps) && approx(a.y, b.y, eps) && approx(a.z, b.z, eps)
}

fn bounded_f32() -> impl Strategy<Value = f32> {
    NORMAL.prop_filter("bounded", |v| v.is_finite() && v.abs() <= 1e6)
}

fn arb_vec3() -> impl Strategy<Value = Vec3> {
    (bounded_f32(), bounded_f32(), bounded_f32()).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn add_commutes(a in arb_vec3(), b in arb_vec3()) {
        prop_assert!(vapprox(a + b, b + a, 1e-5));
    }

    #[test]
    fn sub_undoes_add(a in arb_vec3(), b in arb_vec3()) {
        // Cancellation error grows with the operand magnitudes.
        let eps = 1e-5 * (a.length() + b.length()).max(1.0);
        prop_assert!(vapprox((a + b) - b, a, eps));
    }

    #[test]
    fn neg_is_mul_minus_one(a in arb_vec3()) {
        prop_assert!(vapprox(-a, a * -1.0, 1e-6));
    }

    #[test]
    fn cross_is_orthogonal(a in arb_vec3(), b in arb_vec3()) {
        let c = a.cross(b);
        // Orthogonality up to float noise, scaled by the operand magnitudes.
        let scale = (a.length() * b.length() * c.length()).max(1.0);
        prop_assert!(c.dot(a).abs() <= 1e-2 * scale);
        prop_assert!(c.dot(b).abs() <= 1e-2 * scale);
    }

    #[test]
    fn aabb_contains_center(a in arb_vec3(), b in arb_vec3()) {
        let min = Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z));
        let max = Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z));
        let bb = Aabb::new(min, max);
        prop_assert!(bb.contains(bb.center()));
    }

    #[test]
    fn plane_zero_on_anchor(p in arb_vec3(), n in arb_vec3()) {
        prop_assume!(n.length() > 1e-3);
        let plane = Plane::from_point_normal(p, n);
        prop_assert!(plane.signed_distance(p).abs() <= 1e-2 * p.length().max(1.0));
    }
}

#[test]
fn up_is_z() {
    assert_eq!(Vec3::UP, Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn plane_signed_distance_sides() {
    let plane = Plane::from_point_normal(Vec3::ZERO, Vec3::UP);
    assert!(plane.signed_distance(Vec3::new(0.0, 0.0, 2.0)) > 0.0);
    assert!(plane.signed_distance(Vec3::new(0.0, 0.0, -2.0)) < 0.0);
    assert!(approx(plane.signed_distance(Vec3::new(5.0, -3.0, 0.0)), 0.0, 1e-6));
}
