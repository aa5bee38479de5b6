// CNN model constants
pub const IN_CHANNELS: usize = 3;
pub const NUM_CLASSES: usize = 10;

/// Output channels of the five convolution blocks, in order.
pub const CONV_CHANNELS: [usize; 5] = [16, 32, 64, 128, 256];
pub const CONV_KERNEL_SIZE: usize = 3;
pub const CONV_PADDING: usize = 1;

pub const POOL_SIZE: usize = 2;
pub const POOL_STRIDE: usize = 2;

/// Width of the flattened feature vector entering the first linear layer.
pub const FLATTEN_FEATURES: usize = 256;
pub const HIDDEN_SIZES: [usize; 2] = [100, 20];

/// Canonical square input resolution. Five halvings leave 1x1 at 256 channels.
pub const INPUT_SIZE: usize = 32;
