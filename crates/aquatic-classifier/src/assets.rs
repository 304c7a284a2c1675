use crate::error::ClassifierError;
use image::DynamicImage;

/// The three images shipped inside the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundledImage {
	First,
	Second,
	Third,
}

impl BundledImage {
	pub const ALL: [BundledImage; 3] = [BundledImage::First, BundledImage::Second, BundledImage::Third];

	pub fn from_choice(choice: &str) -> Option<Self> {
		match choice.trim() {
			"1" => Some(BundledImage::First),
			"2" => Some(BundledImage::Second),
			"3" => Some(BundledImage::Third),
			_ => None,
		}
	}

	pub fn title(&self) -> &'static str {
		match self {
			BundledImage::First => "Image 1",
			BundledImage::Second => "Image 2",
			BundledImage::Third => "Image 3",
		}
	}

	pub fn bytes(&self) -> &'static [u8] {
		match self {
			BundledImage::First => include_bytes!("../assets/image1.png"),
			BundledImage::Second => include_bytes!("../assets/image2.png"),
			BundledImage::Third => include_bytes!("../assets/image3.png"),
		}
	}

	pub fn decode(&self) -> Result<DynamicImage, ClassifierError> {
		Ok(image::load_from_memory(self.bytes())?)
	}
}
