//! A five-block convolutional image classifier built on burn.
//!
//! The network maps a batch of `3 x 32 x 32` images to 10 raw class scores:
//!
//! ```text
//! [conv 3x3 -> relu -> batch norm -> max pool 2x2] x 5   (3 -> 16 -> 32 -> 64 -> 128 -> 256)
//! flatten -> linear 256x100 -> relu -> linear 100x20 -> relu -> linear 20x10
//! ```
//!
//! The model is generic over burn backends. Use a plain backend such as
//! `NdArray` for evaluation and `Autodiff<NdArray>` when an external trainer
//! needs batch statistics and gradients.
//!
//! ```no_run
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use models::NeuralNetworkConfig;
//!
//! # fn main() -> Result<(), models::ModelError> {
//! let device = Default::default();
//! let model = NeuralNetworkConfig::new().init::<NdArray>(&device)?;
//! let logits = model.forward(Tensor::zeros([1, 3, 32, 32], &device))?;
//! assert_eq!(logits.dims(), [1, 10]);
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod constants;
mod error;
pub mod head;
pub mod network;
pub mod shape;

pub use block::{ConvBlock, ConvBlockConfig};
pub use error::{ModelError, Result};
pub use head::{LinearHead, LinearHeadConfig};
pub use network::{predict, NeuralNetwork, NeuralNetworkConfig};
