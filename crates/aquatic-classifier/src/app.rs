use crate::assets::BundledImage;
use crate::infer::ImageClassifier;
use crate::ui::ui;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use image::DynamicImage;
use log::{error, info, warn};
use ratatui::{DefaultTerminal, Frame};

pub const NO_SELECTION_MESSAGE: &str = "Please select an image first.";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CurrentScreen {
	#[default]
	Main,
	Exiting,
}

/// Either a ready classifier or the reason it could not be loaded.
pub type LoadedClassifier = std::result::Result<Box<dyn ImageClassifier>, String>;

pub struct Screen {
	pub exit: bool,
	pub current_screen: CurrentScreen,
	pub cursor: usize,
	pub selected: Option<(BundledImage, DynamicImage)>,
	pub result_text: String,
	pub label_text: String,
	classifier: LoadedClassifier,
}

impl Screen {
	pub fn new(classifier: LoadedClassifier) -> Self {
		Self {
			exit: false,
			current_screen: CurrentScreen::default(),
			cursor: 0,
			selected: None,
			result_text: String::new(),
			label_text: String::new(),
			classifier,
		}
	}

	pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
		while !self.exit {
			terminal.draw(|frame| self.render(frame))?;

			if let Event::Key(key) = event::read()? {
				self.handle_key_event(key);
			}
		}
		Ok(())
	}

	fn render(&self, frame: &mut Frame) {
		ui(frame, self);
	}

	pub fn selected_image(&self) -> Option<BundledImage> {
		self.selected.as_ref().map(|(bundled, _)| *bundled)
	}

	pub fn select(&mut self, bundled: BundledImage) {
		match bundled.decode() {
			Ok(image) => {
				info!("Selected {} ({}x{})", bundled.title(), image.width(), image.height());
				self.selected = Some((bundled, image));
			}
			Err(err) => {
				error!("Could not decode {}: {err}", bundled.title());
				self.result_text = format!("Could not load {}: {err}", bundled.title());
			}
		}
	}

	pub fn analyze(&mut self) {
		let Some((_, image)) = &self.selected else {
			self.result_text = NO_SELECTION_MESSAGE.into();
			return;
		};

		let classifier = match &self.classifier {
			Ok(classifier) => classifier,
			Err(reason) => {
				warn!("Analyze requested without a model");
				self.result_text = format!("Model unavailable: {reason}");
				return;
			}
		};

		match classifier.classify(image) {
			Ok(prediction) => {
				self.result_text = format!("Predicted Class: {}", prediction.class_index);
				self.label_text = format!("Label: {}", prediction.label);
			}
			Err(err) => {
				error!("Inference failed: {err}");
				self.result_text = format!("Inference failed: {err}");
				self.label_text.clear();
			}
		}
	}

	pub fn handle_key_event(&mut self, key_event: KeyEvent) {
		if key_event.kind != KeyEventKind::Press {
			return;
		}
		match self.current_screen {
			CurrentScreen::Exiting => match key_event.code {
				KeyCode::Char('y') => {
					self.exit = true;
				}
				KeyCode::Char('n') | KeyCode::Esc => {
					self.current_screen = CurrentScreen::Main;
				}
				_ => {}
			},
			CurrentScreen::Main => match key_event.code {
				KeyCode::Char('q') => {
					self.current_screen = CurrentScreen::Exiting;
				}
				KeyCode::Up => {
					self.cursor = self.cursor.saturating_sub(1);
				}
				KeyCode::Down => {
					self.cursor = (self.cursor + 1).min(BundledImage::ALL.len() - 1);
				}
				KeyCode::Char(' ') | KeyCode::Enter => {
					self.select(BundledImage::ALL[self.cursor]);
				}
				KeyCode::Char('a') => {
					self.analyze();
				}
				KeyCode::Char(c) => {
					if let Some(bundled) = BundledImage::from_choice(&c.to_string()) {
						self.cursor = BundledImage::ALL.iter().position(|b| *b == bundled).unwrap_or(0);
						self.select(bundled);
					}
				}
				_ => {}
			},
		}
	}
}
