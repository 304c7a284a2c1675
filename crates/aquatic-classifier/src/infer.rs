use crate::error::ClassifierError;
use crate::labels::label_for;
use crate::model::{ClassifierConfig, ClassifierModel};
use crate::preprocess::ImageInput;
use burn::module::Module;
use burn::prelude::{Backend, Device};
use burn::record::CompactRecorder;
use burn::tensor::activation::softmax;
use image::DynamicImage;
use log::{debug, info};
use std::path::Path;

/// Index of the first largest score, `None` when there are no scores.
pub fn arg_max(scores: &[f32]) -> Option<usize> {
	let mut max_index = 0;
	for (i, score) in scores.iter().enumerate().skip(1) {
		if *score > scores[max_index] {
			max_index = i;
		}
	}

	(!scores.is_empty()).then_some(max_index)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
	pub class_index: usize,
	pub label: &'static str,
	/// Probability of `class_index`, taken from `scores`.
	pub confidence: f32,
	/// Per-class probabilities, already passed through softmax.
	pub scores: Vec<f32>,
}

impl Prediction {
	/// `scores` must be probabilities (the softmax of the model output); they are not normalized here.
	pub fn from_scores(scores: Vec<f32>) -> Option<Self> {
		let class_index = arg_max(&scores)?;

		Some(Self {
			class_index,
			label: label_for(class_index),
			confidence: scores[class_index],
			scores,
		})
	}
}

pub trait ImageClassifier {
	fn classify(&self, image: &DynamicImage) -> Result<Prediction, ClassifierError>;
}

pub struct Classifier<B: Backend> {
	model: ClassifierModel<B>,
	device: Device<B>,
	side: u32,
	num_classes: usize,
}

impl<B: Backend> Classifier<B> {
	/// Loads weights saved with [`CompactRecorder`]; the recorder appends its own file extension to `path`.
	pub fn load<P: AsRef<Path>>(
		path: P,
		config: &ClassifierConfig,
		side: u32,
		device: Device<B>,
	) -> Result<Self, ClassifierError> {
		let path = path.as_ref();
		info!("Loading model weights from {path:?}");

		let model = config
			.init::<B>(&device)
			.load_file(path.to_path_buf(), &CompactRecorder::new(), &device)
			.map_err(|err| ClassifierError::ModelLoad {
				path: path.display().to_string(),
				reason: format!("{err:?}"),
			})?;

		Ok(Self::from_model(model, config.num_classes, side, device))
	}

	pub fn from_model(model: ClassifierModel<B>, num_classes: usize, side: u32, device: Device<B>) -> Self {
		Self {
			model,
			device,
			side,
			num_classes,
		}
	}

	fn scores(&self, input: &ImageInput) -> Result<Vec<f32>, ClassifierError> {
		let output = self.model.forward(input.to_tensor::<B>(&self.device));
		let probabilities = softmax(output, 1);

		let scores = probabilities
			.into_data()
			.convert::<f32>()
			.to_vec::<f32>()
			.map_err(|err| ClassifierError::OutputData(format!("{err:?}")))?;

		if scores.len() != self.num_classes {
			return Err(ClassifierError::OutputShape {
				expected: self.num_classes,
				actual: scores.len(),
			});
		}

		Ok(scores)
	}
}

impl<B: Backend> ImageClassifier for Classifier<B> {
	fn classify(&self, image: &DynamicImage) -> Result<Prediction, ClassifierError> {
		let input = ImageInput::from_image(image, self.side)?;
		let scores = self.scores(&input)?;

		let prediction = Prediction::from_scores(scores).ok_or(ClassifierError::OutputShape {
			expected: self.num_classes,
			actual: 0,
		})?;
		debug!(
			"Predicted {} ({}) with confidence {:.4}",
			prediction.class_index, prediction.label, prediction.confidence
		);

		Ok(prediction)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::labels::NUM_CLASSES;
	use crate::preprocess::SIDE_LENGTH;
	use burn_tch::{LibTorch, LibTorchDevice};
	use image::{Rgb, RgbImage};

	fn classifier(num_classes: usize) -> Classifier<LibTorch> {
		let device = LibTorchDevice::Cpu;
		let config = ClassifierConfig::new().with_num_classes(num_classes);
		Classifier::from_model(config.init(&device), num_classes, SIDE_LENGTH, device)
	}

	#[test]
	fn arg_max_picks_largest() {
		assert_eq!(arg_max(&[0.1, 0.7, 0.2]), Some(1));
		assert_eq!(arg_max(&[3.0]), Some(0));
		assert_eq!(arg_max(&[-5.0, -1.0, -3.0]), Some(1));
	}

	#[test]
	fn arg_max_prefers_first_on_ties() {
		assert_eq!(arg_max(&[0.2, 0.4, 0.4, 0.1]), Some(1));
		assert_eq!(arg_max(&[1.0; 11]), Some(0));
	}

	#[test]
	fn arg_max_of_nothing_is_none() {
		assert_eq!(arg_max(&[]), None);
	}

	#[test]
	fn prediction_uses_label_table() {
		let mut scores = vec![0.0; NUM_CLASSES];
		scores[5] = 0.9;
		let prediction = Prediction::from_scores(scores).unwrap();

		assert_eq!(prediction.class_index, 5);
		assert_eq!(prediction.label, "Frog");
		assert!((prediction.confidence - 0.9).abs() < 1e-6);
	}

	#[test]
	fn index_zero_has_no_label() {
		let mut scores = vec![0.0; NUM_CLASSES];
		scores[0] = 1.0;

		assert_eq!(Prediction::from_scores(scores).unwrap().label, "Unknown");
	}

	#[test]
	fn classify_returns_probabilities_for_every_class() {
		let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([30, 120, 200])));
		let prediction = classifier(NUM_CLASSES).classify(&image).unwrap();

		assert_eq!(prediction.scores.len(), NUM_CLASSES);
		assert!(prediction.class_index < NUM_CLASSES);
		assert!((prediction.scores.iter().sum::<f32>() - 1.0).abs() < 1e-4);
		assert_eq!(prediction.confidence, prediction.scores[prediction.class_index]);
	}

	#[test]
	fn classify_rejects_mismatched_output() {
		let device = LibTorchDevice::Cpu;
		let model = ClassifierConfig::new().with_num_classes(4).init(&device);
		let classifier: Classifier<LibTorch> = Classifier::from_model(model, NUM_CLASSES, 32, device);
		let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([0, 0, 0])));

		assert!(matches!(
			classifier.classify(&image),
			Err(ClassifierError::OutputShape { expected: 11, actual: 4 })
		));
	}

	#[test]
	fn saved_weights_load_and_classify() {
		let device = LibTorchDevice::Cpu;
		let config = ClassifierConfig::new();
		let model: ClassifierModel<LibTorch> = config.init(&device);

		let dir = std::env::temp_dir().join(format!("aquatic-classifier-weights-{}", std::process::id()));
		std::fs::create_dir_all(&dir).unwrap();
		let path = dir.join("model");
		model
			.clone()
			.save_file(path.clone(), &CompactRecorder::new())
			.unwrap();

		let loaded = Classifier::<LibTorch>::load(&path, &config, SIDE_LENGTH, device);
		std::fs::remove_dir_all(&dir).ok();
		let loaded = loaded.unwrap();
		let original = Classifier::from_model(model, NUM_CLASSES, SIDE_LENGTH, device);

		let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 40, Rgb([200, 80, 10])));
		let expected = original.classify(&image).unwrap();
		let actual = loaded.classify(&image).unwrap();

		assert_eq!(actual.scores.len(), NUM_CLASSES);
		// weights are stored at half precision
		for (a, e) in actual.scores.iter().zip(&expected.scores) {
			assert!((a - e).abs() < 1e-2, "{a} != {e}");
		}
	}

	#[test]
	fn missing_weights_fail_to_load() {
		let result = Classifier::<LibTorch>::load(
			"does/not/exist/model",
			&ClassifierConfig::new(),
			SIDE_LENGTH,
			LibTorchDevice::Cpu,
		);

		assert!(matches!(result, Err(ClassifierError::ModelLoad { .. })));
	}
}
