use burn::backend::{Autodiff, NdArray};
use burn::module::AutodiffModule;
use burn::prelude::*;
use burn::tensor::Distribution;
use models::constants::{INPUT_SIZE, NUM_CLASSES};
use models::{ModelError, NeuralNetwork, NeuralNetworkConfig};

type TestBackend = NdArray;

fn build(seed: u64) -> NeuralNetwork<TestBackend> {
    TestBackend::seed(seed);
    NeuralNetworkConfig::new()
        .init::<TestBackend>(&Default::default())
        .unwrap()
}

fn images(batch: usize) -> Tensor<TestBackend, 4> {
    Tensor::random(
        [batch, 3, INPUT_SIZE, INPUT_SIZE],
        Distribution::Normal(0.0, 1.0),
        &Default::default(),
    )
}

fn rows(tensor: Tensor<TestBackend, 2>) -> Vec<Vec<f32>> {
    let [_, classes] = tensor.dims();
    tensor
        .into_data()
        .to_vec::<f32>()
        .unwrap()
        .chunks(classes)
        .map(<[f32]>::to_vec)
        .collect()
}

fn assert_rows_close(a: &[f32], b: &[f32]) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b) {
        assert!((x - y).abs() < 1e-4, "{a:?} != {b:?}");
    }
}

#[test_log::test]
fn single_image_yields_ten_scores() {
    let model = build(1);
    let output = model.forward(images(1)).unwrap();
    assert_eq!(output.dims(), [1, NUM_CLASSES]);
}

#[test_log::test]
fn batch_dimension_is_preserved() {
    let model = build(1);
    let output = model.forward(images(4)).unwrap();
    assert_eq!(output.dims(), [4, NUM_CLASSES]);
}

#[test_log::test]
fn non_square_input_in_accepted_range() {
    let model = build(1);
    let input = Tensor::<TestBackend, 4>::zeros([2, 3, 63, 40], &Default::default());
    assert_eq!(model.forward(input).unwrap().dims(), [2, NUM_CLASSES]);
}

#[test_log::test]
fn forward_is_deterministic() {
    let model = build(3);
    let input = images(2);

    let first = rows(model.forward(input.clone()).unwrap());
    let second = rows(model.forward(input).unwrap());

    assert_eq!(first, second);
}

#[test_log::test]
fn each_row_depends_only_on_its_own_input() {
    let model = build(5);
    let batch = images(4);

    let batched = rows(model.forward(batch.clone()).unwrap());

    for (i, row) in batched.iter().enumerate() {
        let single = batch.clone().slice([i..i + 1]);
        let alone = rows(model.forward(single).unwrap());
        assert_rows_close(row, &alone[0]);
    }
}

#[test_log::test]
fn permuting_inputs_permutes_outputs() {
    let model = build(5);
    let batch = images(4);
    let order = [2, 0, 3, 1];

    let permuted = Tensor::cat(
        order
            .iter()
            .map(|&i| batch.clone().slice([i..i + 1]))
            .collect(),
        0,
    );

    let original = rows(model.forward(batch).unwrap());
    let shuffled = rows(model.forward(permuted).unwrap());

    for (row, &i) in order.iter().enumerate() {
        assert_rows_close(&shuffled[row], &original[i]);
    }
}

#[test_log::test]
fn wrong_channel_count_is_rejected() {
    let model = build(1);
    let device = Default::default();

    for channels in [1, 4] {
        let input = Tensor::<TestBackend, 4>::zeros([1, channels, 32, 32], &device);
        let err = model.forward(input).unwrap_err();
        assert_eq!(
            err,
            ModelError::ShapeMismatch {
                dimension: "input channels",
                expected: 3,
                actual: channels,
            }
        );
    }
}

#[test_log::test]
fn spatial_size_not_reducing_to_256_features_is_rejected() {
    let model = build(1);
    let device = Default::default();

    for size in [16, 28, 31, 64, 128] {
        let input = Tensor::<TestBackend, 4>::zeros([1, 3, size, size], &device);
        let err = model.forward(input).unwrap_err();
        assert!(
            matches!(err, ModelError::ShapeMismatch { dimension: "flattened features", expected: 256, .. }),
            "size {size}: {err}"
        );
    }
}

#[test_log::test]
fn shape_error_message_names_the_dimension() {
    let model = build(1);
    let input = Tensor::<TestBackend, 4>::zeros([1, 3, 64, 64], &Default::default());

    let err = model.forward(input).unwrap_err();

    assert_eq!(
        err.to_string(),
        "shape mismatch on flattened features: expected 256, got 1024"
    );
}

#[test_log::test]
fn train_mode_uses_batch_statistics() {
    type TrainBackend = Autodiff<NdArray>;
    let device = Default::default();
    TrainBackend::seed(9);
    let model = NeuralNetworkConfig::new().init::<TrainBackend>(&device).unwrap();

    let batch = Tensor::<TrainBackend, 4>::random(
        [4, 3, 32, 32],
        Distribution::Normal(0.0, 1.0),
        &device,
    );
    let output = model.forward(batch.clone()).unwrap();
    assert_eq!(output.dims(), [4, NUM_CLASSES]);

    // Batch statistics couple the rows: the same image scores differently
    // depending on the rest of its batch.
    let together = output.slice([0..1]).into_data().to_vec::<f32>().unwrap();
    let alone_input = Tensor::cat(vec![batch.clone().slice([0..1]), batch.slice([0..1])], 0);
    let alone = model
        .forward(alone_input)
        .unwrap()
        .slice([0..1])
        .into_data()
        .to_vec::<f32>()
        .unwrap();
    assert!(together.iter().zip(&alone).any(|(a, b)| (a - b).abs() > 1e-6));

    // The inference view of the same module runs on the inner backend.
    let valid = model.valid();
    assert_eq!(
        valid.forward(images(2)).unwrap().dims(),
        [2, NUM_CLASSES]
    );
}
