//! Distance falloff for area damage.

use blastwave_core::constants::FALLOFF;

/// Damage at `(tx, ty)` from a blast of `radius` centred on `(x, y)`.
///
/// The multiplier is `lerp(1 - d/radius, 1, FALLOFF)`: 1.0 at the centre,
/// `FALLOFF` at the edge. Distance is clamped to the radius so the multiplier
/// never leaves `FALLOFF..=1.0`. A zero radius deals full damage.
pub fn calculate_damage(x: f32, y: f32, tx: f32, ty: f32, radius: f32, damage: f32) -> f32 {
    if radius <= 0.0 {
        return damage;
    }
    let dist = (tx - x).hypot(ty - y);
    let normalized = (dist / radius).clamp(0.0, 1.0);
    damage * lerp(1.0 - normalized, 1.0, FALLOFF)
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_full_damage_at_center() {
        assert_eq!(calculate_damage(3.0, 4.0, 3.0, 4.0, 10.0, 100.0), 100.0);
    }

    #[test]
    fn test_edge_damage_is_falloff_fraction() {
        let d = calculate_damage(0.0, 0.0, 10.0, 0.0, 10.0, 100.0);
        assert!((d - 40.0).abs() < 1e-4, "got {d}");
    }

    #[test]
    fn test_halfway() {
        let d = calculate_damage(0.0, 0.0, 3.0, 4.0, 10.0, 100.0);
        assert!((d - 70.0).abs() < 1e-4, "got {d}");
    }

    #[test]
    fn test_beyond_radius_clamped_to_edge() {
        let d = calculate_damage(0.0, 0.0, 30.0, 0.0, 10.0, 100.0);
        assert!((d - 40.0).abs() < 1e-4, "got {d}");
    }

    #[test]
    fn test_zero_radius() {
        assert_eq!(calculate_damage(0.0, 0.0, 0.0, 0.0, 0.0, 25.0), 25.0);
    }

    proptest! {
        #[test]
        fn prop_monotone_non_increasing(
            radius in 0.1f32..500.0,
            base in 0.0f32..1000.0,
            a in 0.0f32..1.0,
            b in 0.0f32..1.0,
        ) {
            let (near, far) = if a <= b { (a, b) } else { (b, a) };
            let d_near = calculate_damage(0.0, 0.0, near * radius, 0.0, radius, base);
            let d_far = calculate_damage(0.0, 0.0, far * radius, 0.0, radius, base);
            prop_assert!(d_near + 1e-3 >= d_far);
        }

        #[test]
        fn prop_bounded_by_falloff_and_base(
            radius in 0.1f32..500.0,
            base in 0.0f32..1000.0,
            tx in -1000.0f32..1000.0,
            ty in -1000.0f32..1000.0,
        ) {
            let d = calculate_damage(0.0, 0.0, tx, ty, radius, base);
            prop_assert!(d <= base + 1e-3);
            prop_assert!(d >= base * FALLOFF - 1e-3);
        }
    }
}
