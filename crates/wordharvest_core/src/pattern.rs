use fancy_regex::Regex;

use crate::ConfigError;

const LOWER: &str = "a-z";
const UPPER: &str = "A-Z";
const VOWELS: &str = "aeiouy";
const UPPER_VOWELS: &str = "AEIOUY";

/// Preceded by whitespace or an opening parenthesis.
const LEFT_BOUNDARY: &str = r"(?<=[\s(])";
/// Followed by whitespace, period, comma, semicolon or closing parenthesis.
const RIGHT_BOUNDARY: &str = r"(?=[\s.,;)])";

/// Options that decide what counts as a word.
///
/// When `override_pattern` is set and non-empty the other two fields are
/// ignored entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractionConfig {
    pub allow_capitalized: bool,
    pub extra_chars: Vec<char>,
    pub override_pattern: Option<String>,
}

impl ExtractionConfig {
    pub fn with_extra_chars(mut self, chars: &str) -> Self {
        self.extra_chars = chars.chars().collect();
        self
    }

    fn active_override(&self) -> Option<&str> {
        self.override_pattern
            .as_deref()
            .filter(|pattern| !pattern.is_empty())
    }
}

/// Compose the word pattern for `config`.
///
/// Every match needs a run of vowel-like characters in the middle, which
/// keeps consonant clusters, punctuation runs and numbers out without a
/// dictionary. Only the leading segment may contain capitals.
pub fn build_pattern(config: &ExtractionConfig) -> String {
    if let Some(pattern) = config.active_override() {
        return pattern.to_string();
    }

    let extra = escape_each_char(&config.extra_chars);
    let (caps_first, caps_vowels) = if config.allow_capitalized {
        (UPPER, UPPER_VOWELS)
    } else {
        ("", "")
    };

    let leading = format!("[{extra}{caps_first}{LOWER}]*");
    let vowels = format!("[{caps_vowels}{VOWELS}]+");
    let trailing = format!("[{extra}{LOWER}]*");

    format!("{LEFT_BOUNDARY}{leading}{vowels}{trailing}{RIGHT_BOUNDARY}")
}

/// Backslash ASCII punctuation so `-`, `]`, `^`, `&` and `~` stay literal
/// inside a bracket class. `<` and `>` are left bare since `\<` and `\>` are
/// word-boundary assertions.
fn escape_each_char(chars: &[char]) -> String {
    let mut escaped = String::with_capacity(chars.len() * 2);
    for &c in chars {
        if c.is_ascii_punctuation() && c != '<' && c != '>' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// A compiled word pattern together with its source text.
#[derive(Debug, Clone)]
pub struct WordPattern {
    source: String,
    regex: Regex,
}

impl WordPattern {
    pub fn compile(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        let source = build_pattern(config);
        let regex = Regex::new(&source).map_err(|err| ConfigError::InvalidPattern {
            pattern: source.clone(),
            message: err.to_string(),
        })?;
        Ok(Self { source, regex })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}
