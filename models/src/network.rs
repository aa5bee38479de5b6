use burn::prelude::*;

use crate::block::{ConvBlock, ConvBlockConfig};
use crate::constants::{CONV_CHANNELS, CONV_KERNEL_SIZE, CONV_PADDING, IN_CHANNELS};
use crate::error::ModelError;
use crate::head::{LinearHead, LinearHeadConfig};
use crate::shape;

/// Five convolution blocks (3 -> 16 -> 32 -> 64 -> 128 -> 256 channels) followed
/// by a three-layer linear head (256 -> 100 -> 20 -> 10).
///
/// Normalization follows the backend: on an autodiff backend the batch norms
/// use batch statistics, otherwise (or after [`AutodiffModule::valid`]) they use their
/// running statistics.
///
/// [`AutodiffModule::valid`]: burn::module::AutodiffModule::valid
#[derive(Module, Debug)]
pub struct NeuralNetwork<B: Backend> {
    blocks: Vec<ConvBlock<B>>,
    head: LinearHead<B>,
    kernel_size: usize,
    padding: usize,
}

#[derive(Config, Debug)]
pub struct NeuralNetworkConfig {
    #[config(default = "CONV_KERNEL_SIZE")]
    pub kernel_size: usize,
    /// Must be `kernel_size / 2` so convolutions keep the image size.
    #[config(default = "CONV_PADDING")]
    pub padding: usize,
}

impl NeuralNetworkConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if self.kernel_size % 2 == 0 {
            return Err(ModelError::InvalidConfig(format!(
                "kernel_size must be odd, got {}",
                self.kernel_size
            )));
        }
        if self.padding != self.kernel_size / 2 {
            return Err(ModelError::InvalidConfig(format!(
                "padding must be kernel_size / 2 = {}, got {}",
                self.kernel_size / 2,
                self.padding
            )));
        }
        Ok(())
    }

    /// Builds the network with freshly initialized parameters on `device`.
    pub fn init<B: Backend>(&self, device: &B::Device) -> crate::Result<NeuralNetwork<B>> {
        self.validate()?;

        let mut in_channels = IN_CHANNELS;
        let blocks = CONV_CHANNELS
            .iter()
            .map(|&out_channels| {
                let block = ConvBlockConfig::new(in_channels, out_channels)
                    .with_kernel_size(self.kernel_size)
                    .with_padding(self.padding)
                    .init(device);
                in_channels = out_channels;
                block
            })
            .collect();

        let head = LinearHeadConfig::new().init(device);

        let network = NeuralNetwork {
            blocks,
            head,
            kernel_size: self.kernel_size,
            padding: self.padding,
        };
        tracing::debug!(
            kernel_size = self.kernel_size,
            padding = self.padding,
            params = network.num_params(),
            "built network"
        );
        Ok(network)
    }
}

impl<B: Backend> NeuralNetwork<B> {
    /// Maps `[batch, 3, h, w]` images to `[batch, 10]` raw class scores.
    ///
    /// The input must reduce to exactly 256 flattened features after the five
    /// pooling stages (32x32 is the canonical size); anything else fails with
    /// [`ModelError::ShapeMismatch`] before any computation runs.
    pub fn forward(&self, input: Tensor<B, 4>) -> crate::Result<Tensor<B, 2>> {
        let dims = input.dims();
        shape::check_input(dims, &self.config())?;
        tracing::trace!(?dims, "forward");

        let features = self
            .blocks
            .iter()
            .fold(input, |x, block| block.forward(x));

        Ok(self.head.forward(features))
    }

    pub fn config(&self) -> NeuralNetworkConfig {
        NeuralNetworkConfig::new()
            .with_kernel_size(self.kernel_size)
            .with_padding(self.padding)
    }

    pub fn blocks(&self) -> &[ConvBlock<B>] {
        &self.blocks
    }
}

/// Index of the highest score in each row of `[batch, classes]` logits.
pub fn predict<B: Backend>(logits: Tensor<B, 2>) -> Vec<usize> {
    logits
        .argmax(1)
        .flatten::<1>(0, 1)
        .into_data()
        .iter::<i64>()
        .map(|class| class as usize)
        .collect()
}
