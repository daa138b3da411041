use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"kernelscan");
    let mut b = Fnv1a64::new_default();
    b.write_u8(b'k');
    b.write_bytes(b"ernelscan");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn f64_hash_distinguishes_signed_zero() {
    let mut a = Fnv1a64::new_default();
    a.write_f64(0.0);
    let mut b = Fnv1a64::new_default();
    b.write_f64(-0.0);
    assert_ne!(a.finish(), b.finish());
}

#[test]
fn clamp_index_replicates_edges() {
    assert_eq!(clamp_index(-3, 5), 0);
    assert_eq!(clamp_index(0, 5), 0);
    assert_eq!(clamp_index(4, 5), 4);
    assert_eq!(clamp_index(9, 5), 4);
    assert_eq!(clamp_index(7, 1), 0);
}
