//! Gaussian weighting kernels
//!
//! The migration engine smooths its coalescence volume with a 3-D
//! Gaussian and fits 1-D Gaussians to marginal profiles when estimating
//! location uncertainty. Both are generated here.
//!
//! Kernels are unnormalized: the 3-D kernel peaks at exactly 1.0 at the
//! grid centre, and callers that need unit mass divide by the sum
//! themselves.

use ndarray::{Array, Array1, Array3, ArrayBase, Data, Dimension};
use serde::Serialize;

/// Width of a 3-D Gaussian, either shared by all axes or per axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Sigma {
    /// One sigma broadcast to x, y and z
    Isotropic(f64),
    /// Independent `(sigma_x, sigma_y, sigma_z)`
    Anisotropic([f64; 3]),
}

impl Sigma {
    /// Per-axis widths `[sx, sy, sz]`
    pub fn per_axis(&self) -> [f64; 3] {
        match *self {
            Sigma::Isotropic(s) => [s; 3],
            Sigma::Anisotropic(axes) => axes,
        }
    }
}

impl From<f64> for Sigma {
    fn from(sigma: f64) -> Self {
        Sigma::Isotropic(sigma)
    }
}

impl From<[f64; 3]> for Sigma {
    fn from(axes: [f64; 3]) -> Self {
        Sigma::Anisotropic(axes)
    }
}

impl From<(f64, f64, f64)> for Sigma {
    fn from((sx, sy, sz): (f64, f64, f64)) -> Self {
        Sigma::Anisotropic([sx, sy, sz])
    }
}

/// Evaluate `amplitude * exp(-(x - mean)^2 / (2 sigma^2))` at a single point
///
/// `sigma == 0` is not checked and yields NaN or zero.
#[inline]
pub fn gaussian(x: f64, amplitude: f64, mean: f64, sigma: f64) -> f64 {
    amplitude * (-((x - mean) * (x - mean)) / (2.0 * sigma * sigma)).exp()
}

/// Evaluate a 1-D Gaussian elementwise over an array of any shape
///
/// # Example
/// ```
/// use ndarray::array;
/// use quakemig::kernel::gaussian_1d;
///
/// let f = gaussian_1d(&array![0.0, 1.0], 2.0, 0.0, 1.0);
/// assert_eq!(f[0], 2.0);
/// ```
pub fn gaussian_1d<S, D>(x: &ArrayBase<S, D>, amplitude: f64, mean: f64, sigma: f64) -> Array<f64, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    x.mapv(|v| gaussian(v, amplitude, mean, sigma))
}

/// Coordinates `[-(n-1)/2, ..., +(n-1)/2]`, `n` points, unit spacing
pub fn centred_axis(n: usize) -> Array1<f64> {
    let half = (n as f64 - 1.0) / 2.0;
    Array1::linspace(-half, half, n)
}

/// Build an `(nx, ny, nz)` Gaussian volume centred on the grid
///
/// Axis order is preserved (element `[i, j, k]` sits at x-index `i`,
/// y-index `j`, z-index `k`). Even dimensions put the centre between two
/// voxels, so the peak there is slightly below 1.0.
///
/// # Example
/// ```
/// use quakemig::kernel::gaussian_3d;
///
/// let k = gaussian_3d(5, 5, 5, 1.5);
/// assert_eq!(k[[2, 2, 2]], 1.0);
/// let aniso = gaussian_3d(5, 3, 7, [1.0, 2.0, 0.5]);
/// assert_eq!(aniso.dim(), (5, 3, 7));
/// ```
pub fn gaussian_3d(nx: usize, ny: usize, nz: usize, sigma: impl Into<Sigma>) -> Array3<f64> {
    let [sx, sy, sz] = sigma.into().per_axis();
    let x = centred_axis(nx);
    let y = centred_axis(ny);
    let z = centred_axis(nz);

    Array3::from_shape_fn((nx, ny, nz), |(i, j, k)| {
        let (ix, iy, iz) = (x[i], y[j], z[k]);
        (-(ix * ix) / (2.0 * sx * sx) - (iy * iy) / (2.0 * sy * sy) - (iz * iz) / (2.0 * sz * sz))
            .exp()
    })
}

/// Index of the voxel at (or just below) the geometric centre
pub fn centre_index(nx: usize, ny: usize, nz: usize) -> [usize; 3] {
    [
        nx.saturating_sub(1) / 2,
        ny.saturating_sub(1) / 2,
        nz.saturating_sub(1) / 2,
    ]
}
