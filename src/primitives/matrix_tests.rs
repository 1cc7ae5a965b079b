pub(crate) use super::*;

fn m(rows: &[&[Real]]) -> Matrix {
    let nested: Vec<Vec<Real>> = rows.iter().map(|r| r.to_vec()).collect();
    Matrix::from_rows(&nested).expect("rectangular test data")
}

#[test]
fn test_from_vec() {
    let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.shape(), (2, 3));
    assert!((m.get(0, 0).unwrap() - 1.0).abs() < 1e-6);
    assert!((m.get(1, 2).unwrap() - 6.0).abs() < 1e-6);
}

#[test]
fn test_from_vec_error() {
    let result = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0]);
    assert!(matches!(result, Err(LaminaError::ShapeMismatch { .. })));
}

#[test]
fn test_from_rows_ragged() {
    let result = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]);
    assert!(matches!(result, Err(LaminaError::ShapeMismatch { .. })));
}

#[test]
fn test_zeros_identity_full() {
    let z = Matrix::zeros(2, 3);
    assert_eq!(z.shape(), (2, 3));
    assert!(z.as_slice().iter().all(|&x| x == 0.0));

    let eye = Matrix::identity(3);
    assert_eq!(eye.diagonal().as_slice(), &[1.0, 1.0, 1.0]);
    assert_eq!(eye.sum(), 3.0);

    assert_eq!(Matrix::full(1, 2, 4.0).as_slice(), &[4.0, 4.0]);
    assert_eq!(Matrix::ones(2, 2).sum(), 4.0);
}

#[test]
fn test_checked_and_indexed_access() {
    let mut a = Matrix::zeros(2, 2);
    a.set(0, 1, 5.0).unwrap();
    assert_eq!(a[(0, 1)], 5.0);
    a[(1, 0)] = -1.0;
    assert_eq!(a.get(1, 0).unwrap(), -1.0);
    assert_eq!(a.get(2, 0), Err(LaminaError::index_out_of_bounds(2, 2)));
    assert_eq!(a.get(0, 2), Err(LaminaError::index_out_of_bounds(2, 2)));
    assert!(a.set(0, 9, 1.0).is_err());
    // SAFETY: (1, 1) is inside a 2x2 matrix.
    unsafe {
        a.set_unchecked(1, 1, 3.0);
        assert_eq!(a.get_unchecked(1, 1), 3.0);
    }
}

#[test]
fn test_transpose() {
    let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    let t = a.transpose();
    assert_eq!(t.shape(), (3, 2));
    assert_eq!(t.get(0, 1).unwrap(), 4.0);
    assert_eq!(t.get(2, 1).unwrap(), 6.0);
}

#[test]
fn test_row_and_column() {
    let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    assert_eq!(a.row(1).unwrap().as_slice(), &[4.0, 5.0, 6.0]);
    assert_eq!(a.column(1).unwrap().as_slice(), &[2.0, 5.0]);
    assert!(a.row(2).is_err());
    assert!(a.column(3).is_err());

    let mut out = Vector::zeros(3);
    a.row_into(0, &mut out).unwrap();
    assert_eq!(out.as_slice(), &[1.0, 2.0, 3.0]);
    let mut short = Vector::zeros(2);
    assert!(a.row_into(0, &mut short).is_err());
}

#[test]
fn test_set_row_and_column() {
    let mut a = Matrix::zeros(2, 3);
    a.set_row(1, &Vector::from_slice(&[7.0, 8.0, 9.0])).unwrap();
    a.set_column(0, &Vector::from_slice(&[1.0, 2.0])).unwrap();
    assert_eq!(a.as_slice(), &[1.0, 0.0, 0.0, 2.0, 8.0, 9.0]);
    assert!(a.set_row(0, &Vector::from_slice(&[1.0])).is_err());
    assert!(a.set_column(0, &Vector::from_slice(&[1.0])).is_err());
    assert_eq!(a.as_slice(), &[1.0, 0.0, 0.0, 2.0, 8.0, 9.0]);
}

#[test]
fn test_row_add_remove_swap() {
    let mut a = Matrix::new();
    a.row_add(&Vector::from_slice(&[1.0, 2.0])).unwrap();
    a.row_add(&Vector::from_slice(&[3.0, 4.0])).unwrap();
    a.rows_add(&m(&[&[5.0, 6.0], &[7.0, 8.0]])).unwrap();
    assert_eq!(a.shape(), (4, 2));
    assert!(a.row_add(&Vector::from_slice(&[1.0])).is_err());
    assert_eq!(a.shape(), (4, 2));

    a.row_swap(0, 3).unwrap();
    assert_eq!(a.row(0).unwrap().as_slice(), &[7.0, 8.0]);
    assert_eq!(a.row(3).unwrap().as_slice(), &[1.0, 2.0]);

    a.row_remove(1).unwrap();
    assert_eq!(a.to_rows(), vec![vec![7.0, 8.0], vec![5.0, 6.0], vec![1.0, 2.0]]);

    a.row_remove_unordered(0).unwrap();
    assert_eq!(a.to_rows(), vec![vec![1.0, 2.0], vec![5.0, 6.0]]);
    assert!(a.row_remove(2).is_err());
    assert!(a.row_swap(0, 5).is_err());
}

#[test]
fn test_matmul() {
    let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    let b = m(&[&[7.0, 8.0], &[9.0, 10.0], &[11.0, 12.0]]);
    let c = a.matmul(&b).expect("matrix dimensions compatible: 2x3 * 3x2");
    assert_eq!(c.shape(), (2, 2));
    assert_eq!(c.as_slice(), &[58.0, 64.0, 139.0, 154.0]);
}

#[test]
fn test_matmul_dimension_error() {
    let a = Matrix::zeros(2, 3);
    let b = Matrix::zeros(2, 3);
    assert!(matches!(a.matmul(&b), Err(LaminaError::ShapeMismatch { .. })));
}

#[test]
fn test_matmul_into_checks_output() {
    let a = Matrix::identity(2);
    let b = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let mut out = Matrix::full(2, 2, 9.0);
    a.matmul_into(&b, &mut out).unwrap();
    assert_eq!(out, b);

    let mut wrong = Matrix::full(3, 2, 9.0);
    assert!(a.matmul_into(&b, &mut wrong).is_err());
    assert!(wrong.as_slice().iter().all(|&x| x == 9.0));
}

#[test]
fn test_mult_vec() {
    let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    let v = Vector::from_slice(&[1.0, 1.0, 1.0]);
    let r = a.mult_vec(&v).expect("matrix columns match vector length");
    assert_eq!(r.as_slice(), &[6.0, 15.0]);
    assert!(a.mult_vec(&Vector::zeros(2)).is_err());

    let mut out = Vector::zeros(2);
    a.mult_vec_into(&v, &mut out).unwrap();
    assert_eq!(out, r);
}

#[test]
fn test_add_and_sub() {
    let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let b = m(&[&[5.0, 6.0], &[7.0, 8.0]]);
    assert_eq!(a.add(&b).unwrap().as_slice(), &[6.0, 8.0, 10.0, 12.0]);
    assert_eq!(b.sub(&a).unwrap().as_slice(), &[4.0, 4.0, 4.0, 4.0]);
}

#[test]
fn test_add_shape_mismatch_no_partial_mutation() {
    let mut a = Matrix::ones(2, 3);
    let b = Matrix::ones(3, 2);
    let err = a.add_in_place(&b).unwrap_err();
    assert_eq!(err, LaminaError::shape_mismatch("2x3", "3x2"));
    assert_eq!(a, Matrix::ones(2, 3));

    let mut out = Matrix::zeros(2, 2);
    assert!(a.add_into(&a.clone(), &mut out).is_err());
    assert_eq!(out, Matrix::zeros(2, 2));
}

#[test]
fn test_scalar_ops_and_operators() {
    let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let doubled = a.scalar_multiply(2.0);
    assert_eq!(doubled.get(1, 1).unwrap(), 8.0);
    assert_eq!(&a * 2.0, doubled);
    assert_eq!((-&a).sum(), -10.0);
    assert_eq!(a.hadamard_product(&a).unwrap().as_slice(), &[1.0, 4.0, 9.0, 16.0]);
}

#[test]
fn test_kronecker_product() {
    let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let b = m(&[&[0.0, 5.0], &[6.0, 7.0]]);
    let k = a.kronecker_product(&b);
    assert_eq!(k.shape(), (4, 4));
    assert_eq!(k.row(0).unwrap().as_slice(), &[0.0, 5.0, 0.0, 10.0]);
    assert_eq!(k.row(3).unwrap().as_slice(), &[18.0, 21.0, 24.0, 28.0]);
}

#[test]
fn test_matrix_power() {
    let a = m(&[&[1.0, 1.0], &[1.0, 0.0]]);
    // Fibonacci: [[F(n+1), F(n)], [F(n), F(n-1)]]
    let p = a.matrix_power(10).unwrap();
    assert_eq!(p.as_slice(), &[89.0, 55.0, 55.0, 34.0]);
    assert_eq!(a.matrix_power(0).unwrap(), Matrix::identity(2));
    assert!(Matrix::zeros(2, 3).matrix_power(2).is_err());
}

#[test]
fn test_add_vec_broadcasts_rows() {
    let a = Matrix::zeros(2, 3);
    let r = a.add_vec(&Vector::from_slice(&[1.0, 2.0, 3.0])).unwrap();
    assert_eq!(r.as_slice(), &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
    assert!(a.add_vec(&Vector::zeros(2)).is_err());
}

#[test]
fn test_rotation_and_rotate() {
    let half_pi = std::f64::consts::FRAC_PI_2 as Real;
    let r = Matrix::rotation(half_pi, None).unwrap();
    assert!(r.is_equal_approx(&m(&[&[0.0, -1.0], &[1.0, 0.0]]), 1e-12));

    let rz = Matrix::rotation(half_pi, Some(2)).unwrap();
    assert_eq!(rz.shape(), (3, 3));
    assert!((rz.det().unwrap() - 1.0).abs() < 1e-12);
    assert!(Matrix::rotation(1.0, Some(3)).is_err());

    let points = m(&[&[1.0, 0.0]]);
    let rotated = points.rotate(half_pi, None).unwrap();
    assert!(rotated.is_equal_approx(&m(&[&[0.0, -1.0]]), 1e-12));
    assert!(points.rotate(half_pi, Some(0)).is_err());
}

#[test]
fn test_reductions() {
    let a = m(&[&[1.0, -2.0], &[3.0, 4.0]]);
    assert_eq!(a.trace().unwrap(), 5.0);
    assert_eq!(a.sum(), 6.0);
    assert_eq!(a.max_element().unwrap(), 4.0);
    assert_eq!(a.min_element().unwrap(), -2.0);
    assert!((a.norm_frobenius() - 30.0_f64.sqrt() as Real).abs() < 1e-12);
    assert!(Matrix::zeros(2, 3).trace().is_err());
    assert!(Matrix::new().max_element().is_err());
}

#[test]
fn test_cov_between_rows() {
    let a = m(&[&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0], &[3.0, 2.0, 1.0]]);
    let c = a.cov().unwrap();
    assert_eq!(c.shape(), (3, 3));
    assert!((c.get(0, 0).unwrap() - 1.0).abs() < 1e-12);
    assert!((c.get(1, 1).unwrap() - 4.0).abs() < 1e-12);
    assert!((c.get(0, 1).unwrap() - 2.0).abs() < 1e-12);
    assert!((c.get(0, 2).unwrap() + 1.0).abs() < 1e-12);
    assert!(c.is_equal_approx(&c.transpose(), 0.0));
    assert!(Matrix::zeros(2, 1).cov().is_err());
}

#[test]
fn test_diagonal_helpers() {
    let mut a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
    assert_eq!(a.diagonal().as_slice(), &[1.0, 4.0]);
    assert_eq!(a.diagonal_zeroed().as_slice(), &[0.0, 2.0, 3.0, 0.0]);
    a.diagonal_set(&Vector::from_slice(&[9.0, 8.0])).unwrap();
    assert_eq!(a.as_slice(), &[9.0, 2.0, 3.0, 8.0]);
    assert!(a.diagonal_set(&Vector::zeros(3)).is_err());
    assert_eq!(
        Matrix::from_diagonal(&Vector::from_slice(&[2.0, 3.0])).as_slice(),
        &[2.0, 0.0, 0.0, 3.0]
    );
}

#[test]
fn test_flatten_and_resize() {
    let mut a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
    assert_eq!(a.flatten().as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    a.resize(3, 1);
    assert_eq!(a.shape(), (3, 1));
    assert_eq!(a.sum(), 0.0);
}

#[test]
fn test_gaussian_noise_seeded() {
    let a = Matrix::gaussian_noise(4, 5, Some(7));
    assert_eq!(a.shape(), (4, 5));
    assert_eq!(a, Matrix::gaussian_noise(4, 5, Some(7)));
}

#[test]
fn test_image_roundtrip() {
    let a = m(&[&[0.0, 1.0, 0.25], &[1.5, -1.0, 0.75]]);
    let img = a.to_image();
    assert_eq!((img.width(), img.height()), (3, 2));
    assert_eq!(img.format(), ImageFormat::L8);
    assert_eq!(img.as_bytes(), &[0, 255, 63, 255, 0, 191]);

    let back = Matrix::from_image(&img, 0).unwrap();
    assert!(back.is_equal_approx(&a.clamp(0.0, 1.0).unwrap(), 1.0 / 255.0));
    assert!(Matrix::from_image(&img, 1).is_err());
}

#[test]
fn test_from_image_reads_one_rgba_channel() {
    let img = Image::from_bytes(2, 1, ImageFormat::Rgba8, vec![0, 51, 0, 255, 0, 102, 0, 255])
        .unwrap();
    let g = Matrix::from_image(&img, 1).unwrap();
    assert!(g.is_equal_approx(&m(&[&[0.2, 0.4]]), 1e-9));
}

#[test]
fn test_cholesky_solve() {
    // A = [[4, 2], [2, 3]], b = [1, 2] => x = [-0.125, 0.75]
    let a = m(&[&[4.0, 2.0], &[2.0, 3.0]]);
    let b = Vector::from_slice(&[1.0, 2.0]);
    let x = a
        .cholesky()
        .and_then(|c| c.solve(&b))
        .expect("matrix is square, symmetric positive definite, and vector matches size");

    assert_eq!(x.len(), 2);
    assert!((x[0] - (-0.125)).abs() < 1e-9);
    assert!((x[1] - 0.75).abs() < 1e-9);
}

#[test]
fn test_cholesky_solve_strict() {
    // A = [[9, 3, 3], [3, 5, 1], [3, 1, 4]], b = [15, 9, 8] => x = [1, 1, 1]
    let a3 = m(&[&[9.0, 3.0, 3.0], &[3.0, 5.0, 1.0], &[3.0, 1.0, 4.0]]);
    let b3 = Vector::from_slice(&[15.0, 9.0, 8.0]);
    let x3 = a3.cholesky().and_then(|c| c.solve(&b3)).unwrap();
    assert!(x3.is_equal_approx(&Vector::ones(3), 1e-9));

    let verify3 = a3.mult_vec(&x3).unwrap();
    assert!(verify3.is_equal_approx(&b3, 1e-9));
}

#[test]
fn test_solve_delegates() {
    let a = m(&[&[1.0, 1.0], &[1.5, 4.0]]);
    let x = a.solve(&Vector::from_slice(&[2200.0, 5050.0])).unwrap();
    assert!(x.is_equal_approx(&Vector::from_slice(&[1500.0, 700.0]), 1e-6));
}

#[test]
fn test_display() {
    let text = m(&[&[1.0, 2.0], &[3.0, 4.5]]).to_string();
    assert!(text.starts_with("[Matrix: 2x2"));
    assert!(text.contains("[3, 4.5]"));
}

#[test]
fn test_serde_roundtrip() {
    let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    let json = serde_json::to_string(&a).unwrap();
    let back: Matrix = serde_json::from_str(&json).unwrap();
    assert_eq!(a, back);
}

#[test]
fn test_deserialize_rejects_inconsistent_shape() {
    let short = serde_json::from_str::<Matrix>(r#"{"data":[1.0,2.0],"rows":3,"cols":3}"#);
    let err = short.unwrap_err().to_string();
    assert!(err.contains("shape mismatch"), "{err}");

    let overflow = format!(r#"{{"data":[],"rows":{},"cols":2}}"#, usize::MAX);
    assert!(serde_json::from_str::<Matrix>(&overflow).is_err());

    let ok: Matrix = serde_json::from_str(r#"{"data":[1.0,2.0],"rows":1,"cols":2}"#).unwrap();
    assert_eq!(ok.get(0, 1).unwrap(), 2.0);
}

#[test]
fn test_from_vec_overflowing_shape() {
    assert!(Matrix::from_vec(usize::MAX, 2, vec![]).is_err());
}
