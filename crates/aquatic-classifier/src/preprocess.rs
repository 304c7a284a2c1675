use crate::error::ClassifierError;
use burn::prelude::{Backend, Device, TensorData};
use burn::tensor::Tensor;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

/// Side length of the square images the model expects.
pub const SIDE_LENGTH: u32 = 224;
pub const CHANNELS: usize = 3;

pub fn resized_image(image: &DynamicImage, side: u32) -> RgbImage {
	image.resize_exact(side, side, FilterType::Triangle).into_rgb8()
}

/// A resized image held as `[side, side, 3]` floats in `[0, 1]`, row by row with the
/// channels of each pixel interleaved.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInput {
	pixels: Vec<f32>,
	side: usize,
}

impl ImageInput {
	pub fn from_image(image: &DynamicImage, side: u32) -> Result<Self, ClassifierError> {
		if image.width() == 0 || image.height() == 0 || side == 0 {
			return Err(ClassifierError::EmptyImage);
		}

		let pixels = resized_image(image, side)
			.into_raw()
			.into_iter()
			.map(|x| (x as f32) / 255.0)
			.collect();

		Ok(Self {
			pixels,
			side: side as usize,
		})
	}

	pub fn pixels(&self) -> &[f32] {
		&self.pixels
	}

	/// Single-image batch in the `[1, 3, side, side]` layout the convolutions take.
	pub fn to_tensor<B: Backend>(&self, device: &Device<B>) -> Tensor<B, 4> {
		let data = TensorData::new(self.pixels.clone(), [self.side, self.side, CHANNELS]);
		Tensor::<B, 3>::from_data(data.convert::<B::FloatElem>(), device)
			.permute([2, 0, 1]) // [3, side, side]
			.unsqueeze::<4>()
	}
}
