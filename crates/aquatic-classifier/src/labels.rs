/// Length of the score vector the model produces.
pub const NUM_CLASSES: usize = 11;

pub const UNKNOWN_LABEL: &str = "Unknown";

// Keyed from 1 while the arg-max index starts at 0.
const LABELS: [(usize, &str); NUM_CLASSES] = [
	(1, "Alligator"),
	(2, "Bass"),
	(3, "Crocodile"),
	(4, "Axolotl"),
	(5, "Frog"),
	(6, "Goldfish"),
	(7, "Hammerhead Shark"),
	(8, "Sea Turtle"),
	(9, "Great White Shark"),
	(10, "Stingray"),
	(11, "Turtle"),
];

/// Readable name for a predicted class, or [`UNKNOWN_LABEL`] when the class has no entry.
pub fn label_for(class: usize) -> &'static str {
	LABELS
		.iter()
		.find(|(key, _)| *key == class)
		.map(|(_, label)| *label)
		.unwrap_or(UNKNOWN_LABEL)
}
