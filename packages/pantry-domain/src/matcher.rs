use crate::recipe::MealRecord;

/// Percentage (0-100) of `user_ingredients` found in the record's ingredient lines.
///
/// A user ingredient is found when some normalized line contains it, or when it equals the
/// last whitespace-delimited token of some line. An empty user list scores 0.
pub fn score<S>(record: &MealRecord, user_ingredients: &[S]) -> u8
where
	S: AsRef<str>,
{
	let lines: Vec<String> = record.ingredient_lines().iter().map(|line| normalize(line)).collect();

	score_lines(&lines, user_ingredients)
}

fn score_lines<S>(normalized_lines: &[String], user_ingredients: &[S]) -> u8
where
	S: AsRef<str>,
{
	let total = user_ingredients.len();

	if total == 0 {
		return 0;
	}

	let found = user_ingredients
		.iter()
		.filter(|ingredient| ingredient_found(normalized_lines, &normalize((*ingredient).as_ref())))
		.count();

	percent_half_up(found, total)
}

fn ingredient_found(normalized_lines: &[String], normalized_ingredient: &str) -> bool {
	normalized_lines.iter().any(|line| {
		line.contains(normalized_ingredient)
			|| line.split_whitespace().last() == Some(normalized_ingredient)
	})
}

fn normalize(value: &str) -> String {
	value.trim().to_lowercase()
}

fn percent_half_up(found: usize, total: usize) -> u8 {
	let pct = (found * 200 + total) / (total * 2);

	pct.min(100) as u8
}
