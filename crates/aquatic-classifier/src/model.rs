use burn::config::Config;
use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig, MaxPool2d, MaxPool2dConfig};
use burn::nn::{Dropout, DropoutConfig, Linear, LinearConfig, PaddingConfig2d, Relu};
use burn::prelude::{Backend, Tensor};

#[derive(Debug, Module)]
pub struct ClassifierModel<B: Backend> {
	activation: Relu,
	dropout: Dropout,
	pool: MaxPool2d,
	conv1: Conv2d<B>,
	conv2: Conv2d<B>,
	conv3: Conv2d<B>,
	avgpool: AdaptiveAvgPool2d,
	fc1: Linear<B>,
	fc2: Linear<B>,
}

impl<B: Backend> ClassifierModel<B> {
	/// `[N, 3, H, W]` images to `[N, num_classes]` logits.
	pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
		let x = self.conv1.forward(images);
		let x = self.activation.forward(x);
		let x = self.pool.forward(x);

		let x = self.conv2.forward(x);
		let x = self.activation.forward(x);
		let x = self.pool.forward(x);

		let x = self.conv3.forward(x);
		let x = self.activation.forward(x);
		let x = self.pool.forward(x);

		// [N, 128, H/8, W/8] -> [N, 128]
		let x = self.avgpool.forward(x);
		let x = x.flatten::<2>(1, 3);

		let x = self.fc1.forward(x);
		let x = self.activation.forward(x);
		let x = self.dropout.forward(x);

		self.fc2.forward(x)
	}
}

#[derive(Debug, Config)]
pub struct ClassifierConfig {
	#[config(default = 11)]
	pub num_classes: usize,
	#[config(default = 0.3)]
	pub dropout: f64,
	#[config(default = 256)]
	pub hidden_size: usize,
}

impl ClassifierConfig {
	pub fn init<B: Backend>(&self, device: &B::Device) -> ClassifierModel<B> {
		let conv1 = Conv2dConfig::new([3, 32], [3, 3])
			.with_padding(PaddingConfig2d::Same)
			.init(device);

		let conv2 = Conv2dConfig::new([32, 64], [3, 3])
			.with_padding(PaddingConfig2d::Same)
			.init(device);

		let conv3 = Conv2dConfig::new([64, 128], [3, 3])
			.with_padding(PaddingConfig2d::Same)
			.init(device);

		let pool = MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init();
		let avgpool = AdaptiveAvgPool2dConfig::new([1, 1]).init();

		let fc1 = LinearConfig::new(128, self.hidden_size).init(device);
		let fc2 = LinearConfig::new(self.hidden_size, self.num_classes).init(device);

		ClassifierModel {
			activation: Relu::new(),
			dropout: DropoutConfig::new(self.dropout).init(),
			pool,
			conv1,
			conv2,
			conv3,
			avgpool,
			fc1,
			fc2,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::labels::NUM_CLASSES;
	use burn_tch::{LibTorch, LibTorchDevice};

	#[test]
	fn forward_produces_one_score_per_class() {
		let device = LibTorchDevice::Cpu;
		let model: ClassifierModel<LibTorch> = ClassifierConfig::new().init(&device);

		let images = Tensor::<LibTorch, 4>::zeros([2, 3, 224, 224], &device);
		let output = model.forward(images);

		assert_eq!(output.dims(), [2, NUM_CLASSES]);
	}

	#[test]
	fn class_count_follows_config() {
		let device = LibTorchDevice::Cpu;
		let model: ClassifierModel<LibTorch> = ClassifierConfig::new().with_num_classes(4).init(&device);

		let images = Tensor::<LibTorch, 4>::ones([1, 3, 32, 32], &device);

		assert_eq!(model.forward(images).dims(), [1, 4]);
	}
}
