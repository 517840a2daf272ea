//! Conversions between row-major host batches and burn tensors.

use burn::prelude::*;

use crate::error::ApproximatorError;

/// Stack rows of width `width` into a `[rows, width]` tensor.
pub fn rows_to_tensor<B: Backend>(
    rows: &[Vec<f32>],
    width: usize,
    network: &'static str,
    device: &B::Device,
) -> Result<Tensor<B, 2>, ApproximatorError> {
    if let Some(bad) = rows.iter().find(|r| r.len() != width) {
        return Err(ApproximatorError::Shape {
            network,
            expected: width,
            actual: bad.len(),
        });
    }

    let flat: Vec<f32> = rows.iter().flatten().copied().collect();
    Ok(Tensor::<B, 1>::from_floats(flat.as_slice(), device).reshape([rows.len(), width]))
}

/// Read a `[rows, width]` tensor back into host rows.
///
/// Non-finite values are reported as divergence.
pub fn tensor_to_rows<B: Backend>(
    tensor: Tensor<B, 2>,
    network: &'static str,
) -> Result<Vec<Vec<f32>>, ApproximatorError> {
    let [rows, width] = tensor.dims();
    let values = tensor_to_vec(tensor, network)?;
    if rows == 0 || width == 0 {
        return Ok(vec![Vec::new(); rows]);
    }
    Ok(values.chunks(width).map(|c| c.to_vec()).collect())
}

/// Read any tensor back as a flat vector of finite values.
pub fn tensor_to_vec<B: Backend, const D: usize>(
    tensor: Tensor<B, D>,
    network: &'static str,
) -> Result<Vec<f32>, ApproximatorError> {
    let values = tensor
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| ApproximatorError::Readback {
            network,
            detail: format!("{:?}", e),
        })?;

    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(ApproximatorError::Diverged {
            network,
            detail: format!("non-finite value {}", bad),
        });
    }
    Ok(values)
}

/// Read a single-element tensor.
pub fn tensor_to_scalar<B: Backend>(
    tensor: Tensor<B, 1>,
    network: &'static str,
) -> Result<f32, ApproximatorError> {
    tensor_to_vec(tensor, network)?
        .first()
        .copied()
        .ok_or(ApproximatorError::Readback {
            network,
            detail: "empty tensor".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_rows_roundtrip() {
        let device = Default::default();
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];

        let tensor = rows_to_tensor::<TestBackend>(&rows, 2, "test", &device).unwrap();
        assert_eq!(tensor.dims(), [3, 2]);
        assert_eq!(tensor_to_rows(tensor, "test").unwrap(), rows);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let device = Default::default();
        let rows = vec![vec![1.0, 2.0], vec![3.0]];

        let err = rows_to_tensor::<TestBackend>(&rows, 2, "critic", &device).unwrap_err();
        assert!(matches!(
            err,
            ApproximatorError::Shape {
                network: "critic",
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_non_finite_readback_is_divergence() {
        let device = Default::default();
        let tensor = Tensor::<TestBackend, 1>::from_floats([1.0, f32::NAN], &device);

        let err = tensor_to_vec(tensor, "actor").unwrap_err();
        assert!(matches!(err, ApproximatorError::Diverged { network: "actor", .. }));
    }

    #[test]
    fn test_scalar_readback() {
        let device = Default::default();
        let tensor = Tensor::<TestBackend, 1>::from_floats([2.5], &device);
        assert_eq!(tensor_to_scalar(tensor, "critic").unwrap(), 2.5);
    }
}
