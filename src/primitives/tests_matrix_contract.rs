// =========================================================================
// FALSIFY-MX: Matrix primitives contract
//
// Each test states one algebraic law of the Matrix type and fails with a
// FALSIFIED message naming the law when it does not hold.
//
// References:
//   - Golub & Van Loan (2013) "Matrix Computations"
// =========================================================================

use super::*;

fn at(m: &Matrix, i: usize, j: usize) -> Real {
    m.get(i, j).expect("index in range")
}

/// FALSIFY-MX-001: Transpose involution: (A^T)^T = A
#[test]
fn falsify_mx_001_transpose_involution() {
    let a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("valid");
    let att = a.transpose().transpose();

    assert_eq!(att.shape(), a.shape(), "FALSIFIED MX-001: shape mismatch");
    assert_eq!(att, a, "FALSIFIED MX-001: (A^T)^T != A");
}

/// FALSIFY-MX-002: Transpose swaps shape: (m×n)^T = (n×m)
#[test]
fn falsify_mx_002_transpose_swaps_shape() {
    let a = Matrix::zeros(3, 5);
    let at = a.transpose();

    assert_eq!(
        at.shape(),
        (5, 3),
        "FALSIFIED MX-002: transpose shape={:?}, expected (5,3)",
        at.shape()
    );
}

/// FALSIFY-MX-003: Matmul shape: (m×k) * (k×n) = (m×n)
#[test]
fn falsify_mx_003_matmul_shape() {
    let a = Matrix::ones(2, 3);
    let b = Matrix::ones(3, 4);
    let c = a.matmul(&b).expect("compatible dims");

    assert_eq!(
        c.shape(),
        (2, 4),
        "FALSIFIED MX-003: (2x3)*(3x4) shape={:?}, expected (2,4)",
        c.shape()
    );
}

/// FALSIFY-MX-004: Identity matmul: A * I = A
#[test]
fn falsify_mx_004_identity_matmul() {
    let a =
        Matrix::from_vec(3, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).expect("valid");
    let eye = Matrix::identity(3);
    let result = a.matmul(&eye).expect("compatible dims");

    for i in 0..3 {
        for j in 0..3 {
            assert!(
                (at(&result, i, j) - at(&a, i, j)).abs() < 1e-12,
                "FALSIFIED MX-004: (A*I)[{i},{j}]={} != A[{i},{j}]={}",
                at(&result, i, j),
                at(&a, i, j)
            );
        }
    }
}

/// FALSIFY-MX-005: (AB)^T = B^T A^T
#[test]
fn falsify_mx_005_transpose_of_product() {
    let a = Matrix::from_vec(2, 3, vec![1.0, -2.0, 0.5, 3.0, 4.0, -1.0]).expect("valid");
    let b = Matrix::from_vec(3, 2, vec![2.0, 0.0, 1.0, -3.0, 5.0, 1.5]).expect("valid");
    let lhs = a.matmul(&b).expect("compatible").transpose();
    let rhs = b.transpose().matmul(&a.transpose()).expect("compatible");

    assert!(
        lhs.is_equal_approx(&rhs, 1e-12),
        "FALSIFIED MX-005: (AB)^T={lhs} != B^T A^T={rhs}"
    );
}

/// FALSIFY-MX-006: trace(AB) = trace(BA)
#[test]
fn falsify_mx_006_trace_cyclic() {
    let a = Matrix::from_vec(2, 3, vec![1.0, -2.0, 0.5, 3.0, 4.0, -1.0]).expect("valid");
    let b = Matrix::from_vec(3, 2, vec![2.0, 0.0, 1.0, -3.0, 5.0, 1.5]).expect("valid");
    let ab = a.matmul(&b).expect("compatible").trace().expect("square");
    let ba = b.matmul(&a).expect("compatible").trace().expect("square");

    assert!(
        (ab - ba).abs() < 1e-12,
        "FALSIFIED MX-006: trace(AB)={ab} != trace(BA)={ba}"
    );
}

/// FALSIFY-MX-007: Kronecker mixed product (A⊗B)(C⊗D) = (AC)⊗(BD)
#[test]
fn falsify_mx_007_kronecker_mixed_product() {
    let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 0.0, 1.0]).expect("valid");
    let b = Matrix::from_vec(2, 2, vec![0.5, -1.0, 2.0, 3.0]).expect("valid");
    let c = Matrix::from_vec(2, 2, vec![2.0, 0.0, 1.0, 1.0]).expect("valid");
    let d = Matrix::from_vec(2, 2, vec![1.0, 1.0, -1.0, 2.0]).expect("valid");

    let lhs = a
        .kronecker_product(&b)
        .matmul(&c.kronecker_product(&d))
        .expect("4x4 * 4x4");
    let rhs = a
        .matmul(&c)
        .expect("2x2")
        .kronecker_product(&b.matmul(&d).expect("2x2"));

    assert!(
        lhs.is_equal_approx(&rhs, 1e-12),
        "FALSIFIED MX-007: (A⊗B)(C⊗D) != (AC)⊗(BD)"
    );
}

mod matrix_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    /// FALSIFY-MX-001-prop: Transpose involution for random matrices
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(30))]

        #[test]
        fn falsify_mx_001_prop_transpose_involution(
            rows in 1..=8usize,
            cols in 1..=8usize,
            seed in 0..500u32,
        ) {
            let data: Vec<Real> = (0..rows * cols)
                .map(|i| ((i as Real + seed as Real) * 0.37).sin() * 10.0)
                .collect();
            let a = Matrix::from_vec(rows, cols, data).expect("valid");
            let att = a.transpose().transpose();

            prop_assert_eq!(att.shape(), a.shape(), "FALSIFIED MX-001-prop: shape mismatch");
            prop_assert!(att == a, "FALSIFIED MX-001-prop: (A^T)^T != A");
        }
    }

    /// FALSIFY-MX-004-prop: Identity matmul for random square matrices
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn falsify_mx_004_prop_identity_matmul(
            n in 1..=6usize,
            seed in 0..500u32,
        ) {
            let data: Vec<Real> = (0..n * n)
                .map(|i| ((i as Real + seed as Real) * 0.37).sin() * 10.0)
                .collect();
            let a = Matrix::from_vec(n, n, data).expect("valid");
            let eye = Matrix::identity(n);
            let result = a.matmul(&eye).expect("compatible");

            for i in 0..n {
                for j in 0..n {
                    prop_assert!(
                        (at(&result, i, j) - at(&a, i, j)).abs() < 1e-9,
                        "FALSIFIED MX-004-prop: (A*I)[{},{}] != A[{},{}]",
                        i, j, i, j
                    );
                }
            }
        }
    }
}
