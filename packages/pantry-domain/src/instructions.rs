use std::sync::LazyLock;

use regex::Regex;

/// Newline splitting yielding this many steps or fewer falls back to sentence splitting.
const MIN_NEWLINE_STEPS: usize = 3;
/// Sentence fragments shorter than this (in chars) are discarded.
const MIN_SENTENCE_CHARS: usize = 10;

static SENTENCE_BOUNDARY: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\.\s+").expect("Sentence boundary pattern must compile."));
static STEP_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)^(STEP\s*)?\d+[.):\s]+").expect("Step prefix pattern must compile.")
});

/// Split free-text cooking instructions into ordered steps.
///
/// The corpus stores instructions either as newline-separated steps or as one block of
/// numbered prose. Newlines are tried first; when they produce two steps or fewer the text
/// is re-split on sentence boundaries instead. Leading step numbers (`"1."`, `"STEP 2:"`,
/// `"3)"`) are stripped from every step.
pub fn segment(text: &str) -> Vec<String> {
	if text.trim().is_empty() {
		return Vec::new();
	}

	let mut steps: Vec<String> = text
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_string)
		.collect();

	if steps.len() < MIN_NEWLINE_STEPS {
		steps = split_sentences(text);
	}

	steps.into_iter().map(|step| strip_step_number(&step)).collect()
}

fn split_sentences(text: &str) -> Vec<String> {
	SENTENCE_BOUNDARY
		.split(text)
		.map(str::trim)
		.filter(|fragment| fragment.chars().count() >= MIN_SENTENCE_CHARS)
		.map(|fragment| {
			if fragment.ends_with('.') { fragment.to_string() } else { format!("{fragment}.") }
		})
		.collect()
}

fn strip_step_number(step: &str) -> String {
	STEP_PREFIX.replace(step, "").trim().to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_prose_on_sentences() {
		let steps = segment("Preheat oven. Mix flour and eggs. Bake for 20 minutes.");

		assert_eq!(steps, vec!["Preheat oven.", "Mix flour and eggs.", "Bake for 20 minutes."]);
	}

	#[test]
	fn keeps_newline_steps_and_strips_numbers() {
		let steps = segment("1. Boil water\r\nSTEP 2: Add pasta\n\n3) Drain and serve");

		assert_eq!(steps, vec!["Boil water", "Add pasta", "Drain and serve"]);
	}

	#[test]
	fn drops_short_sentence_fragments() {
		let steps = segment("Stir. Simmer gently for ten minutes. Eat.");

		assert_eq!(steps, vec!["Simmer gently for ten minutes."]);
	}

	#[test]
	fn two_lines_fall_back_to_sentences() {
		let steps = segment("Chop the onions finely. Fry them in butter.\nServe with rice now.");

		assert_eq!(steps, vec![
			"Chop the onions finely.",
			"Fry them in butter.",
			"Serve with rice now.",
		]);
	}

	#[test]
	fn strips_prefix_only_at_start() {
		assert_eq!(strip_step_number("step 12 Whisk 3 eggs"), "Whisk 3 eggs");
		assert_eq!(strip_step_number("Bake for 20 minutes."), "Bake for 20 minutes.");
	}

	#[test]
	fn blank_text_has_no_steps() {
		assert!(segment("  \n ").is_empty());
	}
}
