use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
	#[error("Image has no pixels")]
	EmptyImage,
	#[error("Could not decode image")]
	Image(#[from] image::ImageError),
	#[error("Could not load model weights from {path}: {reason}")]
	ModelLoad {
		path: String,
		reason: String,
	},
	#[error("Model produced {actual} scores, expected {expected}")]
	OutputShape {
		expected: usize,
		actual: usize,
	},
	#[error("Could not read model output: {0}")]
	OutputData(String),
}
