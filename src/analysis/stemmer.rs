//! Stemming for reducing inflected word forms to a common stem.
//!
//! [`RussianStemmer`] is a Snowball-style suffix stripper for Russian. It
//! operates on lowercased UTF-8 words at the byte level; region boundaries
//! (RV/R1/R2) are found on code points and converted to byte offsets, which
//! is exact for Cyrillic text where every letter occupies two bytes. Words
//! without Cyrillic vowels (ASCII words, numbers) pass through unchanged.

/// Trait for stemming algorithms.
pub trait Stemmer: Send + Sync {
    /// Stem a word to its root form.
    fn stem(&self, word: &str) -> String;

    /// Get the name of this stemmer.
    fn name(&self) -> &'static str;
}

const PERFECTIVE_GERUND_1: &[&str] = &["вшись", "вши", "в"];

const PERFECTIVE_GERUND_2: &[&str] = &["ившись", "ывшись", "ивши", "ывши", "ив", "ыв"];

const ADJECTIVE: &[&str] = &[
    "ими", "ыми", "его", "ого", "ему", "ому", "ее", "ие", "ые", "ое", "ей", "ий", "ый", "ой",
    "ем", "им", "ым", "ом", "их", "ых", "ую", "юю", "ая", "яя", "ою", "ею",
];

const PARTICIPLE_2: &[&str] = &["ивш", "ывш", "ующ"];

const REFLEXIVE: &[&str] = &["ся", "сь"];

const VERB_1: &[&str] = &[
    "ете", "йте", "ешь", "нно", "ла", "на", "ли", "ем", "ло", "но", "ет", "ют", "ны", "ть", "й",
    "л", "н",
];

const VERB_2: &[&str] = &[
    "ейте", "уйте", "ила", "ыла", "ена", "ите", "или", "ыли", "ило", "ыло", "ено", "ует", "уют",
    "ены", "ить", "ыть", "ишь", "ую", "ей", "уй", "ил", "ыл", "им", "ым", "ен", "ят", "ит", "ыт",
    "ую", "ю",
];

const NOUN: &[&str] = &[
    "иями", "ями", "ами", "ией", "иям", "ием", "иях", "ев", "ов", "ие", "ье", "е|", "ьи", "ей",
    "ой", "ий", "ям", "ем", "ам", "ом", "ах", "ях", "ию", "ью", "ия", "ья", "и", "ы", "ь", "ю",
    "у", "о", "а", "е", "й",
];

const SUPERLATIVE: &[&str] = &["ейше", "ейш"];

const DERIVATIONAL: &[&str] = &["ость", "ост"];

/// Word regions in bytes. RV starts after the first vowel, R1 after the
/// first consonant following a vowel, R2 is R1 applied again from R1.
#[derive(Debug, Clone, Copy, Default)]
struct Regions {
    rv: usize,
    r1: usize,
    r2: usize,
}

/// Snowball-style Russian stemmer.
#[derive(Debug, Clone, Default)]
pub struct RussianStemmer;

impl RussianStemmer {
    /// Create a new Russian stemmer.
    pub fn new() -> Self {
        RussianStemmer
    }

    fn is_vowel(ch: char) -> bool {
        matches!(ch, 'а' | 'е' | 'и' | 'о' | 'у' | 'ы' | 'э' | 'ю' | 'я' | 'ё')
    }

    fn find_regions(word: &str) -> Regions {
        let chars: Vec<char> = word.chars().collect();
        let len = chars.len();
        let mut regions = Regions::default();

        // RV: just past the first vowel
        for (i, &ch) in chars.iter().enumerate() {
            if Self::is_vowel(ch) {
                regions.rv = i + 1;
                break;
            }
        }

        // R1: just past the first consonant that follows a vowel
        let mut found_vowel = false;
        for (i, &ch) in chars.iter().enumerate() {
            if Self::is_vowel(ch) {
                found_vowel = true;
            } else if found_vowel {
                regions.r1 = i + 1;
                break;
            }
        }

        // R2: R1 applied to the suffix starting at R1
        found_vowel = false;
        for i in regions.r1..len {
            if Self::is_vowel(chars[i]) {
                found_vowel = true;
            } else if found_vowel {
                regions.r2 = i + 1;
                break;
            }
        }

        // Code-point positions to byte positions: every Cyrillic letter is
        // two bytes in UTF-8.
        regions.rv *= 2;
        regions.r1 *= 2;
        regions.r2 *= 2;

        regions
    }

    /// Strip `suffix` if the word ends with it and the suffix lies entirely
    /// at or past byte offset `limit`.
    fn strip_in_region(word: &mut String, suffix: &str, limit: usize) -> bool {
        if word.ends_with(suffix) && word.len() - suffix.len() >= limit {
            word.truncate(word.len() - suffix.len());
            true
        } else {
            false
        }
    }

    fn step1(word: &mut String, regions: Regions) {
        // PERFECTIVE GERUND group 2
        for suffix in PERFECTIVE_GERUND_2 {
            if Self::strip_in_region(word, suffix, regions.rv) {
                return;
            }
        }

        // PERFECTIVE GERUND group 1 requires a preceding 'а' or 'я'
        for suffix in PERFECTIVE_GERUND_1 {
            for prefix in ["а", "я"] {
                let test = format!("{prefix}{suffix}");
                if word.ends_with(&test) && word.len() - test.len() >= regions.rv {
                    word.truncate(word.len() - suffix.len());
                    return;
                }
            }
        }

        // REFLEXIVE
        for suffix in REFLEXIVE {
            if Self::strip_in_region(word, suffix, regions.rv) {
                break;
            }
        }

        // ADJECTIVE, then an optional participle tail
        for suffix in ADJECTIVE {
            if Self::strip_in_region(word, suffix, regions.rv) {
                for p_suffix in PARTICIPLE_2 {
                    if word.ends_with(p_suffix) {
                        word.truncate(word.len() - p_suffix.len());
                        break;
                    }
                }
                return;
            }
        }

        // VERB group 2
        for suffix in VERB_2 {
            if Self::strip_in_region(word, suffix, regions.rv) {
                return;
            }
        }

        // VERB group 1 requires a preceding 'а' or 'я'
        for suffix in VERB_1 {
            let preceded = ["а", "я"]
                .iter()
                .any(|p| word.ends_with(&format!("{p}{suffix}")));
            let base = word.len().checked_sub(suffix.len() + 2);
            if preceded && base.is_some_and(|b| b >= regions.rv) {
                word.truncate(word.len() - suffix.len());
                return;
            }
        }

        // NOUN
        for suffix in NOUN {
            if Self::strip_in_region(word, suffix, regions.rv) {
                return;
            }
        }
    }

    fn step2(word: &mut String, regions: Regions) {
        Self::strip_in_region(word, "и", regions.rv);
    }

    fn step3(word: &mut String, regions: Regions) {
        for suffix in DERIVATIONAL {
            if Self::strip_in_region(word, suffix, regions.r2) {
                break;
            }
        }
    }

    fn step4(word: &mut String, regions: Regions) {
        for suffix in SUPERLATIVE {
            if Self::strip_in_region(word, suffix, regions.rv) {
                break;
            }
        }

        // 'нн' -> 'н', otherwise a trailing soft sign is dropped
        if word.ends_with("нн") && word.len() - 2 >= regions.rv {
            word.truncate(word.len() - "н".len());
        } else {
            Self::strip_in_region(word, "ь", regions.rv);
        }
    }
}

impl Stemmer for RussianStemmer {
    fn stem(&self, word: &str) -> String {
        if word.len() < 4 {
            return word.to_string();
        }

        let regions = Self::find_regions(word);

        let mut result = word.to_string();
        Self::step1(&mut result, regions);
        Self::step2(&mut result, regions);
        Self::step3(&mut result, regions);
        Self::step4(&mut result, regions);

        result
    }

    fn name(&self) -> &'static str {
        "russian"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noun_suffixes() {
        let stemmer = RussianStemmer::new();

        assert_eq!(stemmer.stem("музыку"), "музык");
        assert_eq!(stemmer.stem("музыка"), "музык");
        assert_eq!(stemmer.stem("столица"), "столиц");
    }

    #[test]
    fn test_verb_suffixes() {
        let stemmer = RussianStemmer::new();

        assert_eq!(stemmer.stem("играет"), "игра");
        assert_eq!(stemmer.stem("учился"), "уч");
    }

    #[test]
    fn test_adjective_suffixes() {
        let stemmer = RussianStemmer::new();

        assert_eq!(stemmer.stem("красивый"), "красив");
        assert_eq!(stemmer.stem("быстрее"), "быстр");
    }

    #[test]
    fn test_derivational_suffix() {
        let stemmer = RussianStemmer::new();

        assert_eq!(stemmer.stem("готовность"), "готовн");
    }

    #[test]
    fn test_short_words_unchanged() {
        let stemmer = RussianStemmer::new();

        // Fewer than 4 bytes: a single Cyrillic letter or short ASCII word
        assert_eq!(stemmer.stem("я"), "я");
        assert_eq!(stemmer.stem("was"), "was");
    }

    #[test]
    fn test_ascii_passthrough() {
        let stemmer = RussianStemmer::new();

        assert_eq!(stemmer.stem("composer"), "composer");
        assert_eq!(stemmer.stem("wolfgang"), "wolfgang");
    }

    #[test]
    fn test_unknown_ending_unchanged() {
        let stemmer = RussianStemmer::new();

        assert_eq!(stemmer.stem("музыкант"), "музыкант");
    }

    #[test]
    fn test_idempotence() {
        let stemmer = RussianStemmer::new();

        for word in [
            "музыку",
            "столица",
            "быстрее",
            "готовность",
            "музыкант",
            "composer",
        ] {
            let once = stemmer.stem(word);
            let twice = stemmer.stem(&once);
            assert_eq!(once, twice, "stem not idempotent for {word}");
        }
    }

    #[test]
    fn test_stemmer_name() {
        assert_eq!(RussianStemmer::new().name(), "russian");
    }
}
