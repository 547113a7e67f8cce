//! Mathematical utilities for frame analysis

use nalgebra::{DMatrix, DVector, Matrix3, SMatrix, SVector, Vector3};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;
pub type Mat3 = Matrix3<f64>;

/// 12x12 matrix for member stiffness
pub type Mat12 = SMatrix<f64, 12, 12>;
/// 12-element vector for member forces/displacements
pub type Vec12 = SVector<f64, 12>;

/// Three-point Gauss-Legendre rule on [-1, 1]; exact up to degree 5
const GAUSS_POINTS: [(f64, f64); 3] = [
    (-0.774_596_669_241_483_4, 5.0 / 9.0),
    (0.0, 8.0 / 9.0),
    (0.774_596_669_241_483_4, 5.0 / 9.0),
];

/// Local axes of a frame element, following the PyNite convention:
/// - vertical members: y in the XY plane (-X when pointing up), z = global Z
/// - horizontal members: y = global Y, z = x cross y
/// - inclined members: z horizontal and perpendicular to x, y = z cross x
pub fn member_local_axes(i_node: &[f64; 3], j_node: &[f64; 3]) -> Mat3 {
    let d = Vector3::new(j_node[0] - i_node[0], j_node[1] - i_node[1], j_node[2] - i_node[2]);
    let x = d.normalize();

    let (y, z) = if x[0].abs() < 1e-10 && x[2].abs() < 1e-10 {
        let y = if x[1] > 0.0 {
            Vector3::new(-1.0, 0.0, 0.0)
        } else {
            Vector3::new(1.0, 0.0, 0.0)
        };
        (y, Vector3::z())
    } else if d[1].abs() < 1e-10 {
        let y = Vector3::y();
        (y, x.cross(&y).normalize())
    } else {
        let proj = Vector3::new(d[0], 0.0, d[2]);
        let z = if x[1] > 0.0 { proj.cross(&x) } else { x.cross(&proj) }.normalize();
        (z.cross(&x).normalize(), z)
    };

    Mat3::from_rows(&[x.transpose(), y.transpose(), z.transpose()])
}

/// 12x12 transformation matrix from global to local coordinates
pub fn member_transformation_matrix(i_node: &[f64; 3], j_node: &[f64; 3]) -> Mat12 {
    let r = member_local_axes(i_node, j_node);
    let mut t = Mat12::zeros();
    for block in 0..4 {
        t.fixed_view_mut::<3, 3>(block * 3, block * 3).copy_from(&r);
    }
    t
}

/// Compute the local stiffness matrix for a 3D frame element
///
/// # Arguments
/// * `e` - Modulus of elasticity
/// * `g` - Shear modulus
/// * `a` - Cross-sectional area
/// * `iy` - Moment of inertia about local y-axis
/// * `iz` - Moment of inertia about local z-axis
/// * `j` - Torsional constant
/// * `length` - Element length
pub fn member_local_stiffness(
    e: f64,
    g: f64,
    a: f64,
    iy: f64,
    iz: f64,
    j: f64,
    length: f64,
) -> Mat12 {
    let l = length;
    let l2 = l * l;
    let l3 = l2 * l;

    let ea_l = e * a / l;
    let gj_l = g * j / l;

    let eiy_l3 = e * iy / l3;
    let eiy_l2 = e * iy / l2;
    let eiy_l = e * iy / l;

    let eiz_l3 = e * iz / l3;
    let eiz_l2 = e * iz / l2;
    let eiz_l = e * iz / l;

    #[rustfmt::skip]
    let data = [
        ea_l,  0.0,           0.0,           0.0,   0.0,          0.0,          -ea_l, 0.0,           0.0,           0.0,   0.0,          0.0,
        0.0,   12.0*eiz_l3,   0.0,           0.0,   0.0,          6.0*eiz_l2,   0.0,   -12.0*eiz_l3,  0.0,           0.0,   0.0,          6.0*eiz_l2,
        0.0,   0.0,           12.0*eiy_l3,   0.0,   -6.0*eiy_l2,  0.0,          0.0,   0.0,           -12.0*eiy_l3,  0.0,   -6.0*eiy_l2,  0.0,
        0.0,   0.0,           0.0,           gj_l,  0.0,          0.0,          0.0,   0.0,           0.0,           -gj_l, 0.0,          0.0,
        0.0,   0.0,           -6.0*eiy_l2,   0.0,   4.0*eiy_l,    0.0,          0.0,   0.0,           6.0*eiy_l2,    0.0,   2.0*eiy_l,    0.0,
        0.0,   6.0*eiz_l2,    0.0,           0.0,   0.0,          4.0*eiz_l,    0.0,   -6.0*eiz_l2,   0.0,           0.0,   0.0,          2.0*eiz_l,
        -ea_l, 0.0,           0.0,           0.0,   0.0,          0.0,          ea_l,  0.0,           0.0,           0.0,   0.0,          0.0,
        0.0,   -12.0*eiz_l3,  0.0,           0.0,   0.0,          -6.0*eiz_l2,  0.0,   12.0*eiz_l3,   0.0,           0.0,   0.0,          -6.0*eiz_l2,
        0.0,   0.0,           -12.0*eiy_l3,  0.0,   6.0*eiy_l2,   0.0,          0.0,   0.0,           12.0*eiy_l3,   0.0,   6.0*eiy_l2,   0.0,
        0.0,   0.0,           0.0,           -gj_l, 0.0,          0.0,          0.0,   0.0,           0.0,           gj_l,  0.0,          0.0,
        0.0,   0.0,           -6.0*eiy_l2,   0.0,   2.0*eiy_l,    0.0,          0.0,   0.0,           6.0*eiy_l2,    0.0,   4.0*eiy_l,    0.0,
        0.0,   6.0*eiz_l2,    0.0,           0.0,   0.0,          2.0*eiz_l,    0.0,   -6.0*eiz_l2,   0.0,           0.0,   0.0,          4.0*eiz_l,
    ];

    Mat12::from_row_slice(&data)
}

/// Fixed end reactions for a point load
///
/// # Arguments
/// * `p` - Load magnitude
/// * `a` - Distance from the element's i-end to the load
/// * `length` - Element length
/// * `direction` - Load direction index (0=x, 1=y, 2=z in local coords)
pub fn fer_point_load(p: f64, a: f64, length: f64, direction: usize) -> Vec12 {
    let l = length;
    let b = l - a;
    let l2 = l * l;
    let l3 = l2 * l;

    let mut fer = Vec12::zeros();

    match direction {
        0 => {
            fer[0] = -p * b / l;
            fer[6] = -p * a / l;
        }
        1 => {
            fer[1] = -p * b * b * (3.0 * a + b) / l3;
            fer[5] = -p * a * b * b / l2;
            fer[7] = -p * a * a * (a + 3.0 * b) / l3;
            fer[11] = p * a * a * b / l2;
        }
        2 => {
            fer[2] = -p * b * b * (3.0 * a + b) / l3;
            fer[4] = p * a * b * b / l2;
            fer[8] = -p * a * a * (a + 3.0 * b) / l3;
            fer[10] = -p * a * a * b / l2;
        }
        _ => {}
    }

    fer
}

/// Fixed end reactions for a linearly varying distributed load
///
/// The load runs from `w1` at station `x1` to `w2` at station `x2`, both
/// measured from the element's i-end. The point-load reactions are cubic in
/// the load position, so three Gauss points integrate them exactly.
pub fn fer_linear_load(
    w1: f64,
    w2: f64,
    x1: f64,
    x2: f64,
    length: f64,
    direction: usize,
) -> Vec12 {
    let half = (x2 - x1) / 2.0;
    let mid = (x1 + x2) / 2.0;

    GAUSS_POINTS
        .iter()
        .fold(Vec12::zeros(), |acc, &(xi, weight)| {
            let x = mid + half * xi;
            let w = w1 + (w2 - w1) * (xi + 1.0) / 2.0;
            acc + fer_point_load(w * weight * half, x, length, direction)
        })
}

/// Smallest LU pivot of `a` after symmetric diagonal (Jacobi) scaling.
///
/// Scaling makes every diagonal term 1 so that stiff and soft DOFs are
/// compared on equal terms. A ratio near machine precision means the
/// structure is a mechanism. A non-positive diagonal term returns 0.
pub fn min_pivot_ratio(a: &Mat) -> f64 {
    let diag = a.diagonal();
    if diag.iter().any(|&d| d <= 0.0) {
        return 0.0;
    }
    let inv_sqrt = diag.map(|d| 1.0 / d.sqrt());
    let scaled = Mat::from_fn(a.nrows(), a.ncols(), |i, j| a[(i, j)] * inv_sqrt[i] * inv_sqrt[j]);
    let u = scaled.lu().u();
    u.diagonal().iter().fold(f64::INFINITY, |m, v| m.min(v.abs()))
}

/// Solve a linear system using LU decomposition
pub fn solve_linear_system(a: &Mat, b: &Vec) -> Option<Vec> {
    a.clone().lu().solve(b)
}
