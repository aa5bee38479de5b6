use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;

use crate::constants::{FLATTEN_FEATURES, HIDDEN_SIZES, NUM_CLASSES};

/// Flatten followed by three fully-connected layers. The last layer has no
/// activation; it emits raw logits.
#[derive(Module, Debug)]
pub struct LinearHead<B: Backend> {
    fc1: Linear<B>,
    fc2: Linear<B>,
    fc3: Linear<B>,
    activation: Relu,
}

#[derive(Config, Debug)]
pub struct LinearHeadConfig {
    #[config(default = "FLATTEN_FEATURES")]
    pub in_features: usize,
    #[config(default = "HIDDEN_SIZES[0]")]
    pub hidden_1: usize,
    #[config(default = "HIDDEN_SIZES[1]")]
    pub hidden_2: usize,
    #[config(default = "NUM_CLASSES")]
    pub num_classes: usize,
}

impl LinearHeadConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> LinearHead<B> {
        LinearHead {
            fc1: LinearConfig::new(self.in_features, self.hidden_1).init(device),
            fc2: LinearConfig::new(self.hidden_1, self.hidden_2).init(device),
            fc3: LinearConfig::new(self.hidden_2, self.num_classes).init(device),
            activation: Relu::new(),
        }
    }
}

impl<B: Backend> LinearHead<B> {
    /// `[batch, c, h, w]` -> `[batch, num_classes]`, with `c * h * w == in_features`.
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 2> {
        // Flatten all dimensions except batch
        let x: Tensor<B, 2> = input.flatten(1, 3);

        let x = self.activation.forward(self.fc1.forward(x));
        let x = self.activation.forward(self.fc2.forward(x));
        self.fc3.forward(x)
    }
}
