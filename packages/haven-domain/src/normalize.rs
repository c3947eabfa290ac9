/// Lowercases, folds punctuation to spaces, collapses whitespace, and drops
/// noise words. Idempotent: the output only ever contains `[a-z0-9<>. ]` and
/// single spaces, so a second pass is a no-op.
///
/// Commas and dots are kept only between digits ("50,000,000", "3.5"); the
/// comma is then dropped as a thousands separator while the dot survives as a
/// decimal point. `<` and `>` survive so comparison qualifiers reach the
/// extractors.
pub fn normalize(raw: &str, noise_words: &[String]) -> String {
	let lowered = raw.to_lowercase();
	let chars: Vec<char> = lowered.chars().collect();
	let mut folded = String::with_capacity(lowered.len());

	for (idx, &ch) in chars.iter().enumerate() {
		let between_digits = idx > 0
			&& idx + 1 < chars.len()
			&& chars[idx - 1].is_ascii_digit()
			&& chars[idx + 1].is_ascii_digit();

		match ch {
			'a'..='z' | '0'..='9' | '<' | '>' => folded.push(ch),
			',' if between_digits => {},
			'.' if between_digits => folded.push('.'),
			_ => folded.push(' '),
		}
	}

	let tokens: Vec<&str> = folded
		.split_whitespace()
		.filter(|token| !noise_words.iter().any(|word| word == token))
		.collect();

	tokens.join(" ")
}

/// Token-boundary substring check over normalized text. Both sides are
/// expected to be lowercase and single-spaced already.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
	if text.is_empty() || phrase.is_empty() {
		return false;
	}

	format!(" {text} ").contains(&format!(" {phrase} "))
}
