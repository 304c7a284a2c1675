use crate::app::{LoadedClassifier, Screen};
use crate::assets::BundledImage;
use crate::config::AppConfig;
use crate::infer::{Classifier, ImageClassifier};
use burn_tch::{LibTorch, LibTorchDevice};
use color_eyre::eyre::{bail, eyre, WrapErr};
use color_eyre::Result;
use log::{info, warn, LevelFilter};
use simple_logger::SimpleLogger;
use std::time::SystemTime;

mod app;
mod assets;
mod config;
mod error;
mod infer;
mod labels;
mod model;
mod preprocess;
mod ui;

type InferenceBackend = LibTorch;

const WEIGHTS_HINT: &str = "Model weights are not bundled: set MODEL_PATH to a CompactRecorder file (path without extension) or CLASSIFIER_CONFIG to a JSON config.";

fn main() -> Result<()> {
	color_eyre::install()?;

	let args: Vec<String> = std::env::args().skip(1).collect();
	match args.first().map(String::as_str) {
		None => run_screen(),
		Some("analyze") => {
			let Some(bundled) = args.get(1).and_then(|choice| BundledImage::from_choice(choice)) else {
				bail!("Usage: aquatic-classifier analyze <1|2|3>\n{WEIGHTS_HINT}");
			};
			analyze(bundled)
		}
		Some(other) => bail!("Unknown command {other:?}. Usage: aquatic-classifier [analyze <1|2|3>]\n{WEIGHTS_HINT}"),
	}
}

fn device() -> LibTorchDevice {
	if tch::utils::has_cuda() {
		LibTorchDevice::Cuda(0)
	} else {
		LibTorchDevice::Cpu
	}
}

fn load_classifier(config: &AppConfig) -> LoadedClassifier {
	let device = device();
	info!("Using device {device:?}");

	Classifier::<InferenceBackend>::load(&config.model_path, &config.model, config.side_length, device)
		.map(|classifier| Box::new(classifier) as Box<dyn ImageClassifier>)
		.map_err(|err| {
			warn!("{err}");
			err.to_string()
		})
}

fn run_screen() -> Result<()> {
	// stdout belongs to the terminal UI; enable logs through RUST_LOG only
	SimpleLogger::new().with_level(LevelFilter::Off).env().init()?;

	let config = AppConfig::from_env().map_err(|err| eyre!("Failed to read config: {err:?}"))?;
	let mut screen = Screen::new(load_classifier(&config));

	let mut terminal = ratatui::init();
	let result = screen.run(&mut terminal);
	ratatui::restore();

	result
}

fn analyze(bundled: BundledImage) -> Result<()> {
	SimpleLogger::new().with_level(LevelFilter::Info).env().init()?;

	let config = AppConfig::from_env().map_err(|err| eyre!("Failed to read config: {err:?}"))?;
	let classifier = match load_classifier(&config) {
		Ok(classifier) => classifier,
		Err(reason) => bail!("Model unavailable: {reason}\n{WEIGHTS_HINT}"),
	};

	let time = SystemTime::now();

	let image = bundled.decode().wrap_err_with(|| format!("Failed to decode {}", bundled.title()))?;
	let prediction = classifier.classify(&image).wrap_err("Inference failed")?;

	info!(
		"Classified {} in {}s with confidence {:.4}",
		bundled.title(),
		time.elapsed()?.as_millis() as f64 / 1000.0,
		prediction.confidence
	);

	println!("Predicted Class: {}", prediction.class_index);
	println!("Label: {}", prediction.label);

	Ok(())
}
