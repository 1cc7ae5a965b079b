//! Property-based tests using proptest.
//!
//! These tests verify the algebraic laws the containers and decompositions promise.

use lamina::prelude::*;
use proptest::prelude::*;

// Strategy for generating small matrices
fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
    proptest::collection::vec(-10.0 as Real..10.0, rows * cols).prop_map(move |data| {
        Matrix::from_vec(rows, cols, data).expect("Test data should be valid")
    })
}

// Strategy for generating vectors
fn vector_strategy(len: usize) -> impl Strategy<Value = Vector> {
    proptest::collection::vec(-10.0 as Real..10.0, len).prop_map(Vector::from_vec)
}

// Symmetric matrices as A + Aᵀ
fn symmetric_strategy(n: usize) -> impl Strategy<Value = Matrix> {
    matrix_strategy(n, n).prop_map(|a| a.add(&a.transpose()).expect("square"))
}

// Symmetric positive-definite matrices as AᵀA + nI
fn spd_strategy(n: usize) -> impl Strategy<Value = Matrix> {
    matrix_strategy(n, n).prop_map(move |a| {
        let gram = a.transpose().matmul(&a).expect("square");
        gram.add(&Matrix::identity(n).scalar_multiply(n as Real))
            .expect("same shape")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Vector properties
    #[test]
    fn vector_dot_is_commutative(a in vector_strategy(8), b in vector_strategy(8)) {
        let ab = a.dot(&b).unwrap();
        let ba = b.dot(&a).unwrap();
        prop_assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn vector_triangle_inequality(
        a in vector_strategy(6),
        b in vector_strategy(6),
        c in vector_strategy(6),
    ) {
        let ac = a.euclidean_distance(&c).unwrap();
        let ab = a.euclidean_distance(&b).unwrap();
        let bc = b.euclidean_distance(&c).unwrap();
        prop_assert!(ac <= ab + bc + 1e-9);
    }

    #[test]
    fn vector_sort_is_ordered_permutation(v in vector_strategy(12)) {
        let mut sorted = v.clone();
        sorted.sort();
        prop_assert!(sorted.as_slice().windows(2).all(|w| w[0] <= w[1]));
        prop_assert!((sorted.sum() - v.sum()).abs() < 1e-9);
    }

    // Matrix properties
    #[test]
    fn matrix_transpose_is_involution(a in matrix_strategy(3, 5)) {
        prop_assert_eq!(a.transpose().transpose(), a);
    }

    #[test]
    fn matrix_add_is_commutative(a in matrix_strategy(3, 4), b in matrix_strategy(3, 4)) {
        prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
    }

    #[test]
    fn matrix_product_transpose_law(a in matrix_strategy(3, 4), b in matrix_strategy(4, 2)) {
        let lhs = a.matmul(&b).unwrap().transpose();
        let rhs = b.transpose().matmul(&a.transpose()).unwrap();
        prop_assert!(lhs.is_equal_approx(&rhs, 1e-9));
    }

    #[test]
    fn matrix_mult_vec_matches_matmul(a in matrix_strategy(4, 3), v in vector_strategy(3)) {
        let direct = a.mult_vec(&v).unwrap();
        let as_column = a.matmul(&Matrix::from_vec(3, 1, v.to_vec()).unwrap()).unwrap();
        prop_assert!(direct.is_equal_approx(&Vector::from_slice(as_column.as_slice()), 1e-9));
    }

    // Decomposition properties
    #[test]
    fn inverse_of_spd_is_two_sided(a in spd_strategy(3)) {
        let inv = a.inverse().unwrap();
        let id = Matrix::identity(3);
        prop_assert!(a.matmul(&inv).unwrap().is_equal_approx(&id, 1e-4));
        prop_assert!(inv.matmul(&a).unwrap().is_equal_approx(&id, 1e-4));
    }

    #[test]
    fn cholesky_reconstructs_spd(a in spd_strategy(4)) {
        let c = a.cholesky().unwrap();
        prop_assert!(c.l.matmul(&c.lt).unwrap().is_equal_approx(&a, 1e-8));
        for i in 0..4 {
            prop_assert!(c.l[(i, i)] > 0.0);
            for j in i + 1..4 {
                prop_assert_eq!(c.l[(i, j)], 0.0);
            }
        }
    }

    #[test]
    fn qr_reconstructs_and_is_orthonormal(a in matrix_strategy(4, 3)) {
        let qr = a.qrd();
        prop_assume!(qr.is_ok());
        let QrResult { q, r } = qr.unwrap();
        prop_assert!(q.matmul(&r).unwrap().is_equal_approx(&a, 1e-8));
        let qtq = q.transpose().matmul(&q).unwrap();
        prop_assert!(qtq.is_equal_approx(&Matrix::identity(3), 1e-6));
    }

    #[test]
    fn eigenpairs_satisfy_definition(a in symmetric_strategy(4)) {
        let eig = a.eigen().unwrap();
        let values = eig.eigenvalues();
        prop_assert!(values.as_slice().windows(2).all(|w| w[0] >= w[1]));
        for k in 0..4 {
            let v = eig.vectors.column(k).unwrap();
            let av = a.mult_vec(&v).unwrap();
            prop_assert!(av.is_equal_approx(&v.scalar_multiply(values[k]), 1e-7));
        }
        let trace = a.trace().unwrap();
        prop_assert!((values.sum() - trace).abs() < 1e-8);
    }

    #[test]
    fn svd_reconstructs_symmetric(a in symmetric_strategy(3)) {
        let SvdResult { u, s, vt } = a.svd().unwrap();
        let rebuilt = u.matmul(&s).unwrap().matmul(&vt).unwrap();
        prop_assert!(rebuilt.is_equal_approx(&a, 1e-5));
    }

    #[test]
    fn spd_is_positive_definite(a in spd_strategy(3)) {
        prop_assert!(lamina::linalg::positive_definite(&a).unwrap());
        prop_assert!(!lamina::linalg::has_zero_eigenvalue(&a).unwrap());
    }
}
