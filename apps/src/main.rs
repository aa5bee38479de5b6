// Copyright 2026 The models Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use burn::backend::{Autodiff, NdArray};
use burn::prelude::*;
use clap::{Parser, ValueEnum};
use models::constants::{IN_CHANNELS, INPUT_SIZE, NUM_CLASSES};
use models::{predict, NeuralNetworkConfig};
use serde::Serialize;

mod input;

use input::IMAGE_LEN;

/// Normalization mode for the batch-norm layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Batch statistics, autodiff backend.
    Train,
    /// Running statistics, plain backend.
    Eval,
}

/// Arguments for the CNN classifier application
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Use the built-in synthetic 3x32x32 sample image.
    #[clap(long)]
    sample: bool,
    /// Path to an image file (3072 floats, channel-major).
    #[clap(long, env)]
    image_file: Option<PathBuf>,
    /// Number of copies of the image to run as one batch.
    #[clap(long, env, default_value_t = 1)]
    batch_size: usize,
    /// Seed for parameter initialization.
    #[clap(long, env, default_value_t = 42)]
    seed: u64,
    /// Normalization mode.
    #[clap(long, env, value_enum, default_value_t = Mode::Eval)]
    mode: Mode,
    /// Print logits and predictions as JSON.
    #[clap(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    logits: Vec<Vec<f32>>,
    predictions: Vec<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment variables from {:?}", path),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => bail!("failed to load .env file: {}", e),
    }
    let args = Args::parse();

    // Get the input data
    let pixels = if args.sample {
        tracing::info!("Using sample image...");
        input::sample_image()
    } else if let Some(path) = &args.image_file {
        tracing::info!("Loading image from: {}", path.display());
        input::load_image_from_file(path)?
    } else {
        bail!("Must specify either --sample or --image-file");
    };

    if pixels.len() != IMAGE_LEN {
        bail!(
            "image must contain exactly {} values ({}x{}x{}), got {}",
            IMAGE_LEN,
            IN_CHANNELS,
            INPUT_SIZE,
            INPUT_SIZE,
            pixels.len()
        );
    }

    let report = match args.mode {
        Mode::Eval => run::<NdArray>(&pixels, args.batch_size, args.seed)?,
        Mode::Train => run::<Autodiff<NdArray>>(&pixels, args.batch_size, args.seed)?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (row, (scores, class)) in report.logits.iter().zip(&report.predictions).enumerate() {
            println!("row {row}: class {class} scores {scores:?}");
        }
    }

    Ok(())
}

fn run<B: Backend>(pixels: &[f32], batch_size: usize, seed: u64) -> Result<Report> {
    B::seed(seed);
    let device = B::Device::default();

    let model = NeuralNetworkConfig::new()
        .init::<B>(&device)
        .context("failed to build network")?;
    tracing::info!("Network built with {} parameters", model.num_params());

    let Some(len) = pixels.len().checked_mul(batch_size) else {
        bail!("batch size {} is too large for {} values per image", batch_size, pixels.len());
    };
    let batch: Vec<f32> = pixels.iter().copied().cycle().take(len).collect();
    let data = TensorData::new(batch, [batch_size, IN_CHANNELS, INPUT_SIZE, INPUT_SIZE]);
    let input = Tensor::<B, 4>::from_data(data, &device);

    let logits = model.forward(input).context("forward pass failed")?;
    let predictions = predict(logits.clone());

    let logits = logits
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| anyhow!("failed to read logits: {:?}", e))?
        .chunks(NUM_CLASSES)
        .map(<[f32]>::to_vec)
        .collect::<Vec<_>>();

    for (row, class) in predictions.iter().enumerate() {
        tracing::info!("Row {}: predicted class {}", row, class);
    }

    Ok(Report {
        logits,
        predictions,
    })
}
