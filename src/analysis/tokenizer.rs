//! Byte-level tokenizer with UTF-8 Cyrillic case-folding.
//!
//! The tokenizer works directly on UTF-8 bytes. Only ASCII and the Russian
//! Cyrillic block are treated as letters; everything else terminates a token.
//! Case-folding is likewise byte-level: ASCII letters map through
//! `to_ascii_lowercase`, uppercase Cyrillic `А..Я` (`0xD0 0x90..0xAF`) maps
//! into the lowercase range `а..я` (which spans `0xD0 0xB0..0xBF` and
//! `0xD1 0x80..0x8F`), and `Ё` maps to `ё`.

use std::collections::HashSet;
use std::sync::Arc;

/// Common Russian and English function words dropped when stop-word removal
/// is enabled.
const STOP_WORDS: &[&str] = &[
    "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все", "она", "так",
    "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только", "её", "мне", "было",
    "вот", "от", "меня", "ещё", "нет", "о", "из", "ему", "для", "при", "без", "до", "под", "над",
    "об", "про", "это", "этот", "эта", "эти", "был", "была", "были", "быть", "есть", "или",
    "также", "году", "года", "лет", "который", "которая", "которое", "которые", "где", "когда",
    "если", "чем", "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of",
    "with", "is", "was", "are", "were", "been", "be", "have", "has", "had", "it", "its",
];

/// Configuration for the tokenizer.
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Minimum token length in bytes; shorter tokens are dropped.
    pub min_length: usize,
    /// Whether to case-fold tokens to lowercase.
    pub lowercase: bool,
    /// Whether to drop stop words.
    pub remove_stopwords: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        TokenizerConfig {
            min_length: 2,
            lowercase: true,
            remove_stopwords: true,
        }
    }
}

/// A tokenizer that splits text into maximal runs of letter bytes.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    config: TokenizerConfig,
    stop_words: Arc<HashSet<&'static str>>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}

/// Case-fold a UTF-8 string at the byte level.
///
/// ASCII letters are lowercased; uppercase Cyrillic two-byte sequences are
/// shifted into the lowercase range; `Ё` becomes `ё`. All other bytes pass
/// through unchanged. Scripts outside ASCII and Russian Cyrillic are not
/// folded.
pub fn fold_lowercase(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());

    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];

        if c < 128 {
            out.push(c.to_ascii_lowercase());
            i += 1;
        } else if (c & 0xE0) == 0xC0 && i + 1 < bytes.len() {
            let c2 = bytes[i + 1];

            if c == 0xD0 && (0x90..=0x9F).contains(&c2) {
                // А..П -> а..п
                out.push(0xD0);
                out.push(c2 + 0x20);
            } else if c == 0xD0 && (0xA0..=0xAF).contains(&c2) {
                // Р..Я -> р..я, crossing into the 0xD1 lead byte
                out.push(0xD1);
                out.push(c2 - 0x20);
            } else if c == 0xD0 && c2 == 0x81 {
                // Ё -> ё
                out.push(0xD1);
                out.push(0x91);
            } else {
                out.push(c);
                out.push(c2);
            }
            i += 2;
        } else {
            out.push(c);
            i += 1;
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

/// Classify the two-byte sequence starting with `c1` as a Cyrillic letter.
fn is_cyrillic_pair(c1: u8, c2: u8) -> bool {
    (c1 == 0xD0 && (0x90..=0xBF).contains(&c2))
        || (c1 == 0xD1 && (0x80..=0x8F).contains(&c2))
        || (c1 == 0xD0 && c2 == 0x81)
        || (c1 == 0xD1 && c2 == 0x91)
}

impl Tokenizer {
    /// Create a new tokenizer with the given configuration.
    pub fn new(config: TokenizerConfig) -> Self {
        Tokenizer {
            config,
            stop_words: Arc::new(STOP_WORDS.iter().copied().collect()),
        }
    }

    /// Get the tokenizer configuration.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Check if a word is in the stop-word set.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Normalize a single term using the configured case-folding.
    pub fn normalize(&self, term: &str) -> String {
        if self.config.lowercase {
            fold_lowercase(term)
        } else {
            term.to_string()
        }
    }

    /// Split `text` into normalized tokens, preserving input order.
    ///
    /// A token is a maximal run of ASCII alphanumerics and Cyrillic letters.
    /// Tokens shorter than `min_length` bytes are dropped, as are stop words
    /// when `remove_stopwords` is set.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized;
        let input = if self.config.lowercase {
            normalized = fold_lowercase(text);
            &normalized
        } else {
            text
        };

        let bytes = input.as_bytes();
        let mut tokens = Vec::new();
        let mut current = Vec::new();

        let mut i = 0;
        while i < bytes.len() {
            let c = bytes[i];

            if c.is_ascii_alphanumeric() {
                current.push(c);
                i += 1;
                continue;
            }

            if (c == 0xD0 || c == 0xD1) && i + 1 < bytes.len() && is_cyrillic_pair(c, bytes[i + 1])
            {
                current.push(c);
                current.push(bytes[i + 1]);
                i += 2;
                continue;
            }

            self.flush_token(&mut current, &mut tokens);
            i += 1;
        }

        self.flush_token(&mut current, &mut tokens);

        tokens
    }

    fn flush_token(&self, current: &mut Vec<u8>, tokens: &mut Vec<String>) {
        if current.is_empty() {
            return;
        }

        if current.len() >= self.config.min_length {
            let token = String::from_utf8_lossy(current).into_owned();
            if !self.config.remove_stopwords || !self.is_stop_word(&token) {
                tokens.push(token);
            }
        }

        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_tokenizer() -> Tokenizer {
        Tokenizer::new(TokenizerConfig {
            min_length: 2,
            lowercase: true,
            remove_stopwords: false,
        })
    }

    #[test]
    fn test_fold_ascii() {
        assert_eq!(fold_lowercase("Hello World"), "hello world");
    }

    #[test]
    fn test_fold_cyrillic() {
        assert_eq!(fold_lowercase("МОСКВА"), "москва");
        assert_eq!(fold_lowercase("Привет"), "привет");
    }

    #[test]
    fn test_fold_yo() {
        assert_eq!(fold_lowercase("Ёлка"), "ёлка");
    }

    #[test]
    fn test_fold_full_alphabet() {
        assert_eq!(
            fold_lowercase("АБВГДЕЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ"),
            "абвгдежзийклмнопрстуфхцчшщъыьэюя"
        );
    }

    #[test]
    fn test_fold_passthrough() {
        // Punctuation and digits are untouched
        assert_eq!(fold_lowercase("a-1, б!"), "a-1, б!");
    }

    #[test]
    fn test_tokenize_basic() {
        let tokens = raw_tokenizer().tokenize("Hello, world! 123");
        assert_eq!(tokens, vec!["hello", "world", "123"]);
    }

    #[test]
    fn test_tokenize_cyrillic() {
        let tokens = raw_tokenizer().tokenize("Москва — столица России.");
        assert_eq!(tokens, vec!["москва", "столица", "россии"]);
    }

    #[test]
    fn test_tokenize_mixed_scripts() {
        let tokens = raw_tokenizer().tokenize("Wolfgang Амадей Mozart");
        assert_eq!(tokens, vec!["wolfgang", "амадей", "mozart"]);
    }

    #[test]
    fn test_tokenize_min_length() {
        // "a" is one byte and is dropped; "я" is two bytes and survives
        let tokens = raw_tokenizer().tokenize("a bb я");
        assert_eq!(tokens, vec!["bb", "я"]);
    }

    #[test]
    fn test_tokenize_punctuation_splits() {
        let tokens = raw_tokenizer().tokenize("covid-19");
        assert_eq!(tokens, vec!["covid", "19"]);
    }

    #[test]
    fn test_tokenize_stopwords_removed() {
        let tokenizer = Tokenizer::new(TokenizerConfig {
            min_length: 2,
            lowercase: true,
            remove_stopwords: true,
        });
        let tokens = tokenizer.tokenize("кот и собака in the house");
        assert_eq!(tokens, vec!["кот", "собака", "house"]);
    }

    #[test]
    fn test_tokenize_stopwords_preserved() {
        let tokens = raw_tokenizer().tokenize("the cat");
        assert_eq!(tokens, vec!["the", "cat"]);
    }

    #[test]
    fn test_normalize() {
        let tokenizer = raw_tokenizer();
        assert_eq!(tokenizer.normalize("МУЗЫКА"), "музыка");
        assert_eq!(tokenizer.normalize("Mozart"), "mozart");
    }

    #[test]
    fn test_empty_input() {
        assert!(raw_tokenizer().tokenize("").is_empty());
        assert!(raw_tokenizer().tokenize("  ...  ").is_empty());
    }
}
