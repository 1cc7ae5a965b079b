pub(crate) use super::*;

fn v(data: &[Real]) -> Vector {
    Vector::from_slice(data)
}

#[test]
fn test_constructors() {
    assert_eq!(Vector::zeros(3).as_slice(), &[0.0, 0.0, 0.0]);
    assert_eq!(Vector::ones(2).as_slice(), &[1.0, 1.0]);
    assert_eq!(Vector::full(2, 7.5).as_slice(), &[7.5, 7.5]);
    assert!(Vector::new().is_empty());
    let collected: Vector = (1..=3).map(|i| i as Real).collect();
    assert_eq!(collected, v(&[1.0, 2.0, 3.0]));
}

#[test]
fn test_checked_access() {
    let mut a = v(&[1.0, 2.0, 3.0]);
    assert_eq!(a.get(2).unwrap(), 3.0);
    assert_eq!(a.get(3), Err(LaminaError::index_out_of_bounds(3, 3)));
    a.set(0, 9.0).unwrap();
    assert_eq!(a[0], 9.0);
    assert!(a.set(5, 1.0).is_err());
    assert_eq!(a.as_slice(), &[9.0, 2.0, 3.0]);
}

#[test]
fn test_unchecked_access() {
    let mut a = v(&[1.0, 2.0]);
    // SAFETY: both indices are < len.
    unsafe {
        a.set_unchecked(1, 4.0);
        assert_eq!(a.get_unchecked(1), 4.0);
    }
}

#[test]
fn test_gaussian_noise_is_seeded() {
    let a = Vector::gaussian_noise(64, Some(42));
    let b = Vector::gaussian_noise(64, Some(42));
    let c = Vector::gaussian_noise(64, Some(43));
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.mean().abs() < 0.5);
}

#[test]
fn test_structural_ops() {
    let mut a = v(&[3.0, 1.0, 2.0]);
    a.push(5.0);
    a.insert(0, 0.0).unwrap();
    assert_eq!(a.as_slice(), &[0.0, 3.0, 1.0, 2.0, 5.0]);
    assert_eq!(a.remove(1).unwrap(), 3.0);
    assert_eq!(a.as_slice(), &[0.0, 1.0, 2.0, 5.0]);
    assert_eq!(a.remove_unordered(0).unwrap(), 0.0);
    assert_eq!(a.as_slice(), &[5.0, 1.0, 2.0]);
    assert!(a.insert(4, 1.0).is_err());
    assert!(a.remove(3).is_err());

    a.append(&v(&[8.0]));
    a.sort();
    assert_eq!(a.as_slice(), &[1.0, 2.0, 5.0, 8.0]);
    a.ordered_insert(3.0);
    assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 5.0, 8.0]);
    a.reverse();
    assert_eq!(a.as_slice(), &[8.0, 5.0, 3.0, 2.0, 1.0]);

    a.resize(7);
    assert_eq!(a.len(), 7);
    assert_eq!(a[6], 0.0);
    a.clear();
    assert!(a.is_empty());
}

#[test]
fn test_find_and_erase() {
    let mut a = v(&[1.0, 2.0, 1.0, 3.0, 1.0]);
    assert_eq!(a.find(1.0, 0), Some(0));
    assert_eq!(a.find(1.0, 1), Some(2));
    assert_eq!(a.find(7.0, 0), None);

    assert!(a.erase(2.0));
    assert!(!a.erase(2.0));
    assert_eq!(a.as_slice(), &[1.0, 1.0, 3.0, 1.0]);

    assert_eq!(a.erase_all_unordered(1.0), 3);
    assert_eq!(a.as_slice(), &[3.0]);
}

#[test]
fn test_elementwise_variants_agree() {
    let a = v(&[1.0, 2.0, 3.0]);
    let b = v(&[4.0, 5.0, 6.0]);

    let sum = a.add(&b).unwrap();
    assert_eq!(sum.as_slice(), &[5.0, 7.0, 9.0]);

    let mut in_place = a.clone();
    in_place.add_in_place(&b).unwrap();
    assert_eq!(in_place, sum);

    let mut out = Vector::zeros(3);
    a.add_into(&b, &mut out).unwrap();
    assert_eq!(out, sum);

    assert_eq!(a.hadamard_product(&b).unwrap().as_slice(), &[4.0, 10.0, 18.0]);
    assert_eq!(b.division_element_wise(&a).unwrap().as_slice(), &[4.0, 2.5, 2.0]);
    assert_eq!(b.sub(&a).unwrap().as_slice(), &[3.0, 3.0, 3.0]);
}

#[test]
fn test_shape_mismatch_leaves_operands_untouched() {
    let mut a = v(&[1.0, 2.0, 3.0]);
    let b = v(&[1.0, 2.0]);
    let err = a.add_in_place(&b).unwrap_err();
    assert_eq!(err, LaminaError::shape_mismatch("[3]", "[2]"));
    assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0]);

    let mut out = v(&[9.0, 9.0]);
    assert!(a.exp_into(&mut out).is_err());
    assert_eq!(out.as_slice(), &[9.0, 9.0]);
}

#[test]
fn test_scalar_and_unary_ops() {
    let a = v(&[1.0, 4.0, 9.0]);
    assert_eq!(a.scalar_multiply(2.0).as_slice(), &[2.0, 8.0, 18.0]);
    assert_eq!(a.scalar_add(-1.0).as_slice(), &[0.0, 3.0, 8.0]);
    assert_eq!(a.sqrt().as_slice(), &[1.0, 2.0, 3.0]);
    assert!(a.exponentiate(0.5).is_equal_approx(&a.sqrt(), 1e-12));
    assert_eq!(a.max_scalar(4.0).as_slice(), &[4.0, 4.0, 9.0]);
    assert_eq!(a.min_scalar(4.0).as_slice(), &[1.0, 4.0, 4.0]);
    assert_eq!(v(&[-2.0, 2.0]).abs().as_slice(), &[2.0, 2.0]);
    assert_eq!(v(&[-2.0, 0.5, 3.0]).clamp(0.0, 1.0).unwrap().as_slice(), &[0.0, 0.5, 1.0]);
    assert!(v(&[8.0, 27.0]).cbrt().is_equal_approx(&v(&[2.0, 3.0]), 1e-9));
    assert!(v(&[1.0]).exp().log().is_equal_approx(&v(&[1.0]), 1e-9));
    assert!(v(&[100.0]).log10().is_equal_approx(&v(&[2.0]), 1e-9));
    assert!(v(&[0.0]).erf().is_equal_approx(&v(&[0.0]), 1e-9));
    assert!((v(&[1.0]).erf()[0] - 0.842_700_79).abs() < 1e-6);

    let mut b = a.clone();
    b.scalar_multiply_in_place(-1.0);
    assert_eq!(b, -&a);
    assert_eq!(&a * 3.0, a.scalar_multiply(3.0));
}

#[test]
fn test_elementwise_min_max() {
    let a = v(&[1.0, 5.0, 3.0]);
    let b = v(&[2.0, 4.0, 3.0]);
    assert_eq!(a.max(&b).unwrap().as_slice(), &[2.0, 5.0, 3.0]);
    assert_eq!(a.min(&b).unwrap().as_slice(), &[1.0, 4.0, 3.0]);
}

#[test]
fn test_dot_and_cross() {
    let a = v(&[1.0, 0.0, 0.0]);
    let b = v(&[0.0, 1.0, 0.0]);
    assert_eq!(a.dot(&b).unwrap(), 0.0);
    assert_eq!(a.cross(&b).unwrap().as_slice(), &[0.0, 0.0, 1.0]);
    assert!(v(&[1.0, 2.0]).cross(&v(&[3.0, 4.0])).is_err());
    assert!(a.dot(&v(&[1.0])).is_err());
}

#[test]
fn test_reductions() {
    let a = v(&[3.0, -1.0, 4.0, 4.0]);
    assert_eq!(a.sum(), 10.0);
    assert_eq!(a.mean(), 2.5);
    assert_eq!(a.max_element().unwrap(), 4.0);
    assert_eq!(a.max_element_index().unwrap(), 2);
    assert_eq!(a.min_element().unwrap(), -1.0);
    assert_eq!(a.min_element_index().unwrap(), 1);
    assert_eq!(
        Vector::new().max_element(),
        Err(LaminaError::empty_input("max_element"))
    );
    assert_eq!(Vector::new().mean(), 0.0);
}

#[test]
fn test_norms_and_distances() {
    let a = v(&[3.0, 4.0]);
    assert_eq!(a.norm_2(), 5.0);
    assert_eq!(a.norm_sq(), 25.0);
    let b = v(&[0.0, 0.0]);
    assert_eq!(a.euclidean_distance(&b).unwrap(), 5.0);
    assert_eq!(a.euclidean_distance_squared(&b).unwrap(), 25.0);
}

#[test]
fn test_matrix_combinations() {
    let a = v(&[1.0, 2.0]);
    let b = v(&[3.0, 4.0, 5.0]);
    let outer = a.outer_product(&b);
    assert_eq!(outer.shape(), (2, 3));
    assert_eq!(outer.row(1).unwrap().as_slice(), &[6.0, 8.0, 10.0]);

    let d = a.diagonal_matrix();
    assert_eq!(d.as_slice(), &[1.0, 0.0, 0.0, 2.0]);

    let rows = Matrix::from_rows(&[vec![1.0, 1.0], vec![0.5, 0.5]]).unwrap();
    let r = v(&[10.0, 20.0]).subtract_matrix_rows(&rows).unwrap();
    assert_eq!(r.as_slice(), &[8.5, 18.5]);
    assert!(b.subtract_matrix_rows(&rows).is_err());
}

#[test]
fn test_concat() {
    let c = Vector::concat(&[v(&[1.0]), v(&[]), v(&[2.0, 3.0])]);
    assert_eq!(c.into_vec(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_display() {
    let text = v(&[1.0, 2.5]).to_string();
    assert!(text.starts_with("[Vector: size 2"));
    assert!(text.contains("2.5"));
}

#[test]
fn test_serde_roundtrip() {
    let a = v(&[1.0, -2.0, 0.25]);
    let json = serde_json::to_string(&a).unwrap();
    let back: Vector = serde_json::from_str(&json).unwrap();
    assert_eq!(a, back);
}

#[test]
fn test_cosine_similarity() {
    let a = v(&[1.0, 0.0]);
    assert!((a.cosine_similarity(&v(&[3.0, 0.0])).unwrap() - 1.0).abs() < 1e-12);
    assert!(a.cosine_similarity(&v(&[0.0, 2.0])).unwrap().abs() < 1e-12);
    assert!((a.cosine_similarity(&v(&[-1.0, 0.0])).unwrap() + 1.0).abs() < 1e-12);
    let c = v(&[1.0, 1.0]).cosine_similarity(&v(&[1.0, 0.0])).unwrap();
    assert!((c - (0.5 as Real).sqrt()).abs() < 1e-6);

    assert!(matches!(
        a.cosine_similarity(&Vector::zeros(2)),
        Err(LaminaError::InvalidArgument { .. })
    ));
    assert!(a.cosine_similarity(&v(&[1.0])).is_err());
}

#[test]
fn test_round() {
    let a = v(&[1.4, 1.5, -1.5, -0.2, 2.0]);
    assert_eq!(a.round().as_slice(), &[1.0, 2.0, -2.0, -0.0, 2.0]);
    let mut b = a.clone();
    b.round_in_place();
    assert_eq!(b, a.round());
}

#[test]
fn test_clamp_rejects_bad_bounds() {
    let mut a = v(&[-2.0, 0.5, 3.0]);
    assert!(matches!(a.clamp(1.0, 0.0), Err(LaminaError::InvalidArgument { .. })));
    assert!(a.clamp(Real::NAN, 1.0).is_err());
    assert!(a.clamp_in_place(0.0, Real::NAN).is_err());
    assert_eq!(a.as_slice(), &[-2.0, 0.5, 3.0]);
    a.clamp_in_place(0.0, 0.0).unwrap();
    assert_eq!(a.as_slice(), &[0.0, 0.0, 0.0]);
}

#[test]
fn test_is_equal_approx_default_tolerance() {
    let a = v(&[1.0, 2.0]);
    assert!(a.is_equal_approx_default(&v(&[1.0 + 5e-7, 2.0])));
    assert!(!a.is_equal_approx_default(&v(&[1.0 + 1e-4, 2.0])));
    assert!(!a.is_equal_approx_default(&v(&[1.0])));
}
