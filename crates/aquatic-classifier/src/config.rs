use crate::labels::NUM_CLASSES;
use crate::model::ClassifierConfig;
use crate::preprocess::SIDE_LENGTH;
use burn::config::{Config, ConfigError};
use log::info;

/// Where the weights are looked for when neither `MODEL_PATH` nor a config file says otherwise.
/// No weights ship in the repository; place a `CompactRecorder` file here or point `MODEL_PATH` at one.
pub const DEFAULT_MODEL_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/image_recognition_model");

#[derive(Debug, Config)]
pub struct AppConfig {
	/// Weights file path, without the recorder's extension.
	pub model_path: String,
	pub model: ClassifierConfig,
	#[config(default = 224)]
	pub side_length: u32,
}

impl AppConfig {
	/// `CLASSIFIER_CONFIG` names a JSON config file; without it the defaults apply,
	/// with `MODEL_PATH` overriding the weights location.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_vars(std::env::var("CLASSIFIER_CONFIG").ok(), std::env::var("MODEL_PATH").ok())
	}

	pub fn from_vars(config_path: Option<String>, model_path: Option<String>) -> Result<Self, ConfigError> {
		if let Some(path) = config_path {
			info!("Reading config from {path}");
			return AppConfig::load(path);
		}

		let model_path = model_path.unwrap_or_else(|| DEFAULT_MODEL_PATH.into());
		let model = ClassifierConfig::new().with_num_classes(NUM_CLASSES);
		Ok(AppConfig::new(model_path, model).with_side_length(SIDE_LENGTH))
	}
}
