//! Suffix rules and irregular-form tables used by the built-in lemmatizers.
//!
//! Both functions expect a lower-case word and return `None` when no rule
//! applies, in which case the word is its own lemma.

/// Irregular noun plurals.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("wolves", "wolf"),
    ("halves", "half"),
    ("selves", "self"),
    ("shelves", "shelf"),
    ("loaves", "loaf"),
    ("thieves", "thief"),
    ("calves", "calf"),
];

/// Irregular verb forms.
const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("has", "have"),
    ("had", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("went", "go"),
    ("gone", "go"),
    ("ran", "run"),
    ("got", "get"),
    ("said", "say"),
    ("made", "make"),
    ("came", "come"),
    ("took", "take"),
    ("knew", "know"),
    ("saw", "see"),
    ("seen", "see"),
    ("told", "tell"),
    ("thought", "think"),
    ("bought", "buy"),
    ("sent", "send"),
    ("won", "win"),
    ("kept", "keep"),
    ("felt", "feel"),
    ("gave", "give"),
    ("found", "find"),
];

/// Words ending in `s` that are not plurals.
const NOT_PLURAL: &[&str] = &[
    "is", "was", "has", "his", "this", "us", "yes", "bus", "gas", "plus", "its", "does", "as",
];

/// `-ing`/`-ed` words that are not verb inflections.
const NOT_INFLECTED: &[&str] = &[
    "morning", "evening", "nothing", "something", "anything", "everything", "wedding",
    "during", "speed", "hundred", "sorted",
];

fn lookup(table: &[(&str, &str)], word: &str) -> Option<String> {
    table
        .iter()
        .find(|(form, _)| *form == word)
        .map(|(_, lemma)| (*lemma).to_string())
}

fn is_vowel(c: u8) -> bool {
    matches!(c, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn has_vowel(s: &str) -> bool {
    s.bytes().any(is_vowel)
}

/// Noun lemma: irregular plurals, then regular plural suffixes.
pub fn noun_lemma(word: &str) -> Option<String> {
    if !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }
    if let Some(lemma) = lookup(IRREGULAR_NOUNS, word) {
        return Some(lemma);
    }
    if NOT_PLURAL.contains(&word) || word.len() <= 3 {
        return None;
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return None;
    }
    if let Some(base) = word.strip_suffix("ies") {
        return (base.len() > 1).then(|| format!("{base}y"));
    }
    for suffix in ["sses", "ches", "shes", "xes", "zes"] {
        if word.ends_with(suffix) {
            return Some(word[..word.len() - 2].to_string());
        }
    }
    word.strip_suffix('s').map(str::to_string)
}

/// Verb lemma: irregular forms, then `-ing` and `-ed` stripping with
/// consonant undoubling and silent-`e` restoration.
pub fn verb_lemma(word: &str) -> Option<String> {
    if !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return None;
    }
    if let Some(lemma) = lookup(IRREGULAR_VERBS, word) {
        return Some(lemma);
    }
    if NOT_INFLECTED.contains(&word) {
        return None;
    }
    if word.len() >= 5 {
        if let Some(base) = word.strip_suffix("ied") {
            return Some(format!("{base}y"));
        }
        for suffix in ["ing", "ed"] {
            if let Some(base) = word.strip_suffix(suffix) {
                if has_vowel(base) && base.len() >= 2 {
                    return Some(restore_base(base));
                }
            }
        }
    }
    None
}

fn restore_base(base: &str) -> String {
    let b = base.as_bytes();
    let n = b.len();
    // runn -> run, stopp -> stop; calls/kiss/buzz keep their double letter
    if n >= 3 && b[n - 1] == b[n - 2] && !is_vowel(b[n - 1]) && !matches!(b[n - 1], b'l' | b's' | b'z')
    {
        return base[..n - 1].to_string();
    }
    // mak -> make, com -> come
    if n == 3
        && !is_vowel(b[0])
        && is_vowel(b[1])
        && !is_vowel(b[2])
        && !matches!(b[2], b'w' | b'x' | b'y')
    {
        return format!("{base}e");
    }
    base.to_string()
}
