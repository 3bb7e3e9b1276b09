//! Serializable kernel summaries for `--format json`

use crate::kernel::{centre_index, Sigma};
use ndarray::Array3;
use serde::Serialize;

/// Shape, width and mass of a generated 3-D kernel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KernelSummary {
    /// `[nx, ny, nz]`
    pub shape: [usize; 3],
    /// Sigma as requested
    pub sigma: Sigma,
    /// Value at the centre voxel
    pub peak: f64,
    /// Index of the centre voxel
    pub peak_index: [usize; 3],
    /// Sum of all weights (the kernel is unnormalized)
    pub sum: f64,
}

impl KernelSummary {
    /// Summarise a kernel built with `sigma`
    pub fn from_kernel(kernel: &Array3<f64>, sigma: Sigma) -> Self {
        let (nx, ny, nz) = kernel.dim();
        let peak_index = centre_index(nx, ny, nz);
        let peak = kernel.get(peak_index).copied().unwrap_or(0.0);
        Self {
            shape: [nx, ny, nz],
            sigma,
            peak,
            peak_index,
            sum: kernel.sum(),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::gaussian_3d;

    #[test]
    fn test_summary_of_odd_kernel() {
        let kernel = gaussian_3d(5, 5, 5, 1.0);
        let summary = KernelSummary::from_kernel(&kernel, Sigma::Isotropic(1.0));
        assert_eq!(summary.shape, [5, 5, 5]);
        assert_eq!(summary.peak_index, [2, 2, 2]);
        assert_eq!(summary.peak, 1.0);
        assert!(summary.sum > 1.0);
    }

    #[test]
    fn test_summary_of_empty_kernel() {
        let kernel = gaussian_3d(0, 0, 0, 1.0);
        let summary = KernelSummary::from_kernel(&kernel, Sigma::Isotropic(1.0));
        assert_eq!(summary.peak, 0.0);
        assert_eq!(summary.sum, 0.0);
    }

    #[test]
    fn test_json_fields() {
        let sigma = Sigma::Anisotropic([1.0, 2.0, 3.0]);
        let kernel = gaussian_3d(3, 3, 3, sigma);
        let json = KernelSummary::from_kernel(&kernel, sigma).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["shape"], serde_json::json!([3, 3, 3]));
        assert_eq!(value["sigma"], serde_json::json!([1.0, 2.0, 3.0]));
        assert_eq!(value["peak"], serde_json::json!(1.0));
    }
}
