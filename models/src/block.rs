use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::pool::{MaxPool2d, MaxPool2dConfig};
use burn::nn::{BatchNorm, BatchNormConfig, PaddingConfig2d, Relu};
use burn::prelude::*;

use crate::constants::{CONV_KERNEL_SIZE, CONV_PADDING, POOL_SIZE, POOL_STRIDE};

/// One convolution stage: conv, ReLU, channel normalization, 2x2 max pool.
#[derive(Module, Debug)]
pub struct ConvBlock<B: Backend> {
    conv: Conv2d<B>,
    activation: Relu,
    norm: BatchNorm<B, 2>,
    pool: MaxPool2d,
}

#[derive(Config, Debug)]
pub struct ConvBlockConfig {
    pub in_channels: usize,
    pub out_channels: usize,
    #[config(default = "CONV_KERNEL_SIZE")]
    pub kernel_size: usize,
    #[config(default = "CONV_PADDING")]
    pub padding: usize,
}

impl ConvBlockConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> ConvBlock<B> {
        let conv = Conv2dConfig::new(
            [self.in_channels, self.out_channels],
            [self.kernel_size, self.kernel_size],
        )
        .with_padding(PaddingConfig2d::Explicit(self.padding, self.padding))
        .init(device);

        let pool = MaxPool2dConfig::new([POOL_SIZE, POOL_SIZE])
            .with_strides([POOL_STRIDE, POOL_STRIDE])
            .init();

        ConvBlock {
            conv,
            activation: Relu::new(),
            norm: BatchNormConfig::new(self.out_channels).init(device),
            pool,
        }
    }
}

impl<B: Backend> ConvBlock<B> {
    /// `[batch, in_channels, h, w]` -> `[batch, out_channels, h / 2, w / 2]`
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv.forward(input);
        let x = self.activation.forward(x);
        let x = self.norm.forward(x);
        self.pool.forward(x)
    }
}
