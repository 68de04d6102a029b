//! Finds the substitution keys a template refers to

use regex::Regex;

use super::helpers::HELPER_NAMES;

pub struct PlaceholderScanner {
    expression_regex: Regex,
    token_regex: Regex,
    key_regex: Regex,
}

impl PlaceholderScanner {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            expression_regex: Regex::new(r#"\{\{~?\s*([^{}]*?)\s*~?\}\}"#)?,
            token_regex: Regex::new(r#""[^"]*"|\S+"#)?,
            key_regex: Regex::new(r#"^[A-Za-z_][A-Za-z0-9_]*$"#)?,
        })
    }

    /// Keys in order of first appearance, without duplicates.
    pub fn keys(&self, template: &str) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();

        for caps in self.expression_regex.captures_iter(template) {
            for token in self.token_regex.find_iter(&caps[1]) {
                let token = token.as_str();
                if HELPER_NAMES.contains(&token) || !self.key_regex.is_match(token) {
                    continue;
                }
                if !keys.iter().any(|k| k == token) {
                    keys.push(token.to_string());
                }
            }
        }

        keys
    }
}
