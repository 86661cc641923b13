/// Lowercases `text` and splits it into runs of word characters
/// (alphanumerics and `_`). Tokens shorter than two characters are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().nth(1).is_some())
        .map(str::to_string)
        .collect()
}
