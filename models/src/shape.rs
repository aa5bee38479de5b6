//! Input-shape arithmetic for the fixed five-block architecture.
//!
//! The first linear layer has a fixed width, so only inputs whose spatial
//! extent survives five conv/pool stages with exactly the right number of
//! features can run. These helpers compute that ahead of the forward pass.

use crate::constants::{CONV_CHANNELS, FLATTEN_FEATURES, IN_CHANNELS, POOL_SIZE, POOL_STRIDE};
use crate::error::{ModelError, Result};
use crate::network::NeuralNetworkConfig;

/// Spatial extent after one convolution, `None` if the kernel does not fit.
fn after_conv(extent: usize, config: &NeuralNetworkConfig) -> Option<usize> {
    (extent + 2 * config.padding)
        .checked_sub(config.kernel_size)
        .map(|e| e + 1)
}

fn after_pool(extent: usize) -> Option<usize> {
    extent
        .checked_sub(POOL_SIZE)
        .map(|e| e / POOL_STRIDE + 1)
}

/// Extent of one spatial axis after all convolution blocks.
pub fn spatial_after_blocks(extent: usize, config: &NeuralNetworkConfig) -> Option<usize> {
    CONV_CHANNELS
        .iter()
        .try_fold(extent, |e, _| after_pool(after_conv(e, config)?))
}

/// Number of features the flatten step produces for an `height x width` input.
pub fn flattened_features(height: usize, width: usize, config: &NeuralNetworkConfig) -> Option<usize> {
    let h = spatial_after_blocks(height, config)?;
    let w = spatial_after_blocks(width, config)?;
    Some(CONV_CHANNELS[CONV_CHANNELS.len() - 1] * h * w)
}

/// Checks `[batch, channels, height, width]` against the architecture.
pub fn check_input(dims: [usize; 4], config: &NeuralNetworkConfig) -> Result<()> {
    let [batch, channels, height, width] = dims;

    if batch == 0 {
        return Err(ModelError::EmptyBatch);
    }
    if channels != IN_CHANNELS {
        return Err(ModelError::ShapeMismatch {
            dimension: "input channels",
            expected: IN_CHANNELS,
            actual: channels,
        });
    }

    let features = flattened_features(height, width, config).unwrap_or(0);
    if features != FLATTEN_FEATURES {
        return Err(ModelError::ShapeMismatch {
            dimension: "flattened features",
            expected: FLATTEN_FEATURES,
            actual: features,
        });
    }

    Ok(())
}
