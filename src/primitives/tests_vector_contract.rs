// =========================================================================
// FALSIFY-VE: Vector primitives contract
//
// Each test states one algebraic law of the Vector type and fails with a
// FALSIFIED message naming the law when it does not hold.
//
// References:
//   - Cauchy-Schwarz inequality: |dot(u,v)| <= norm(u) * norm(v)
//   - Lagrange identity: |u x v|^2 = |u|^2 |v|^2 - (u.v)^2
// =========================================================================

use super::*;

/// FALSIFY-VE-001: Dot product is commutative: dot(u,v) = dot(v,u)
#[test]
fn falsify_ve_001_dot_commutative() {
    let u = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let v = Vector::from_slice(&[4.0, 5.0, 6.0]);

    let uv = u.dot(&v).expect("equal lengths");
    let vu = v.dot(&u).expect("equal lengths");

    assert!(
        (uv - vu).abs() < 1e-6,
        "FALSIFIED VE-001: dot(u,v)={uv} != dot(v,u)={vu}"
    );
}

/// FALSIFY-VE-002: Norm is non-negative
#[test]
fn falsify_ve_002_norm_nonneg() {
    let v = Vector::from_slice(&[-3.0, 4.0]);
    let n = v.norm_2();

    assert!(n >= 0.0, "FALSIFIED VE-002: norm={n}, expected >= 0.0");
    assert!(
        (n - 5.0).abs() < 1e-5,
        "FALSIFIED VE-002: norm of [-3,4]={n}, expected 5.0"
    );
}

/// FALSIFY-VE-003: Cauchy-Schwarz: |dot(u,v)| <= norm(u) * norm(v)
#[test]
fn falsify_ve_003_cauchy_schwarz() {
    let u = Vector::from_slice(&[1.0, -2.0, 3.0, 0.5]);
    let v = Vector::from_slice(&[4.0, 0.0, -1.0, 2.0]);

    let dot = u.dot(&v).expect("equal lengths").abs();
    let bound = u.norm_2() * v.norm_2();

    assert!(
        dot <= bound + 1e-5,
        "FALSIFIED VE-003: |dot|={dot} > norm(u)*norm(v)={bound}"
    );
}

/// FALSIFY-VE-004: Mean equals sum / length
#[test]
fn falsify_ve_004_mean_equals_sum_over_len() {
    let v = Vector::from_slice(&[2.0, 4.0, 6.0, 8.0, 10.0]);

    let mean = v.mean();
    let expected = v.sum() / v.len() as Real;

    assert!(
        (mean - expected).abs() < 1e-6,
        "FALSIFIED VE-004: mean={mean}, expected sum/len={expected}"
    );
    assert!(
        (mean - 6.0).abs() < 1e-6,
        "FALSIFIED VE-004: mean={mean}, expected 6.0"
    );
}

/// FALSIFY-VE-005: Cross product is orthogonal to both operands
#[test]
fn falsify_ve_005_cross_orthogonal() {
    let u = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let v = Vector::from_slice(&[-2.0, 0.5, 4.0]);
    let w = u.cross(&v).expect("3-vectors");

    let du = w.dot(&u).expect("3-vectors");
    let dv = w.dot(&v).expect("3-vectors");
    assert!(
        du.abs() < 1e-9 && dv.abs() < 1e-9,
        "FALSIFIED VE-005: (u x v).u={du}, (u x v).v={dv}, expected 0"
    );
}

/// FALSIFY-VE-006: Lagrange identity |u x v|^2 = |u|^2 |v|^2 - (u.v)^2
#[test]
fn falsify_ve_006_lagrange_identity() {
    let u = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let v = Vector::from_slice(&[-2.0, 0.5, 4.0]);

    let lhs = u.cross(&v).expect("3-vectors").norm_sq();
    let d = u.dot(&v).expect("3-vectors");
    let rhs = u.norm_sq() * v.norm_sq() - d * d;
    assert!(
        (lhs - rhs).abs() < 1e-9,
        "FALSIFIED VE-006: |u x v|^2={lhs} != |u|^2|v|^2-(u.v)^2={rhs}"
    );
}

/// FALSIFY-VE-007: Triangle inequality for euclidean distance
#[test]
fn falsify_ve_007_triangle_inequality() {
    let a = Vector::from_slice(&[0.0, 0.0]);
    let b = Vector::from_slice(&[3.0, 1.0]);
    let c = Vector::from_slice(&[-1.0, 5.0]);

    let ab = a.euclidean_distance(&b).expect("equal lengths");
    let bc = b.euclidean_distance(&c).expect("equal lengths");
    let ac = a.euclidean_distance(&c).expect("equal lengths");
    assert!(
        ac <= ab + bc + 1e-12,
        "FALSIFIED VE-007: d(a,c)={ac} > d(a,b)+d(b,c)={}",
        ab + bc
    );
}
