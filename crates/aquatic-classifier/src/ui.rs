use crate::app::{CurrentScreen, Screen};
use crate::assets::BundledImage;
use image::imageops::FilterType;
use image::DynamicImage;
use ratatui::{
	prelude::*,
	widgets::{Block, Paragraph},
};

pub fn ui(f: &mut Frame, app: &Screen) {
	let chunks = Layout::default()
		.constraints([Constraint::Percentage(100)])
		.split(f.area());

	match app.current_screen {
		CurrentScreen::Main => main_screen(f, app, chunks[0]),
		CurrentScreen::Exiting => exiting_screen(f, chunks[0]),
	}
}

fn main_screen(f: &mut Frame, app: &Screen, area: Rect) {
	let rows = Layout::default()
		.direction(Direction::Vertical)
		.constraints([
			Constraint::Length(5),
			Constraint::Min(6),
			Constraint::Length(4),
			Constraint::Length(1),
		])
		.split(area);

	render_radio_group(f, app, rows[0]);
	render_preview(f, app, rows[1]);
	render_result(f, app, rows[2]);

	let hints = Paragraph::new("1-3/↑↓+Enter select  a analyze  q quit").style(Style::default().fg(Color::Gray));
	f.render_widget(hints, rows[3]);
}

fn render_radio_group(f: &mut Frame, app: &Screen, area: Rect) {
	let selected = app.selected_image();
	let lines: Vec<Line> = BundledImage::ALL
		.iter()
		.enumerate()
		.map(|(i, bundled)| {
			let marker = if selected == Some(*bundled) { "(•)" } else { "( )" };
			let line = Line::from(format!("{marker} {}", bundled.title()));
			if i == app.cursor {
				line.bold()
			} else {
				line
			}
		})
		.collect();

	let paragraph = Paragraph::new(lines).block(Block::bordered().title("Choose an image"));
	f.render_widget(paragraph, area);
}

fn render_preview(f: &mut Frame, app: &Screen, area: Rect) {
	let block = Block::bordered().title("Preview");
	let inner = block.inner(area);
	f.render_widget(block, area);

	if let Some((_, image)) = &app.selected {
		let preview = Paragraph::new(half_block_lines(image, inner.width, inner.height)).alignment(Alignment::Center);
		f.render_widget(preview, inner);
	}
}

fn render_result(f: &mut Frame, app: &Screen, area: Rect) {
	let text = vec![
		Line::from(app.result_text.as_str()),
		Line::from(app.label_text.as_str()).bold(),
	];
	let paragraph = Paragraph::new(text).block(Block::bordered().title("Result"));
	f.render_widget(paragraph, area);
}

fn exiting_screen(f: &mut Frame, area: Rect) {
	let text = "Are you sure you want to quit? (y/n)";
	let paragraph = Paragraph::new(text)
		.block(Block::bordered().title("Exit"))
		.alignment(Alignment::Center);
	f.render_widget(paragraph, area);
}

/// Draws the image with `▀` cells: foreground is the upper pixel, background the lower one.
pub fn half_block_lines(image: &DynamicImage, width: u16, height: u16) -> Vec<Line<'static>> {
	if width == 0 || height == 0 {
		return Vec::new();
	}

	let thumbnail = image.resize(width as u32, height as u32 * 2, FilterType::Triangle).into_rgb8();
	(0..thumbnail.height())
		.step_by(2)
		.map(|y| {
			let spans: Vec<Span> = (0..thumbnail.width())
				.map(|x| {
					let [r, g, b] = thumbnail.get_pixel(x, y).0;
					let style = Style::default().fg(Color::Rgb(r, g, b));
					let style = if y + 1 < thumbnail.height() {
						let [r, g, b] = thumbnail.get_pixel(x, y + 1).0;
						style.bg(Color::Rgb(r, g, b))
					} else {
						style
					};
					Span::styled("▀", style)
				})
				.collect();
			Line::from(spans)
		})
		.collect()
}
