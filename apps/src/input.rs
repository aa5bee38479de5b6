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

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use models::constants::{IN_CHANNELS, INPUT_SIZE};

/// Number of values in one `3 x 32 x 32` image, channel-major.
pub const IMAGE_LEN: usize = IN_CHANNELS * INPUT_SIZE * INPUT_SIZE;

/// A synthetic image with a horizontal gradient in red, a vertical one in
/// green and a diagonal one in blue. Values are in `[0, 1]`.
pub fn sample_image() -> Vec<f32> {
    let max = (INPUT_SIZE - 1) as f32;
    (0..IN_CHANNELS)
        .flat_map(|c| {
            (0..INPUT_SIZE).flat_map(move |y| {
                (0..INPUT_SIZE).map(move |x| match c {
                    0 => x as f32 / max,
                    1 => y as f32 / max,
                    _ => (x + y) as f32 / (2.0 * max),
                })
            })
        })
        .collect()
}

pub fn load_image_from_file(path: &Path) -> Result<Vec<f32>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read image file {}", path.display()))?;
    parse_image(&contents)
}

/// Parses pixel values from a Rust array literal, a JSON array, comma-separated
/// or whitespace-separated text.
pub fn parse_image(contents: &str) -> Result<Vec<f32>> {
    let values = if contents.contains("pub const") && contents.contains("= [") {
        tracing::info!("Parsing Rust array format file");

        let start = contents
            .find("= [")
            .context("No array start '= [' found in Rust file")?
            + 3;
        let end = contents
            .rfind("];")
            .context("No array end '];' found in Rust file")?;

        contents[start..end]
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<f32>()
                    .with_context(|| format!("Failed to parse number: '{}'", s))
            })
            .collect::<Result<Vec<_>>>()?
    } else if contents.trim().starts_with('[') {
        serde_json::from_str(contents).context("invalid JSON image array")?
    } else if contents.contains(',') {
        contents
            .split(',')
            .map(|s| s.trim().parse::<f32>())
            .collect::<Result<Vec<_>, _>>()?
    } else {
        contents
            .split_whitespace()
            .map(str::parse::<f32>)
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(values)
}
