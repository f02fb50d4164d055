//! English pluralization for collection path segments: "user" -> "users", "person" -> "people".

/// Irregular singular -> plural pairs. Checked before the suffix rules.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("ox", "oxen"),
];

/// Words whose plural equals the singular.
const UNCOUNTABLE: &[&str] = &["sheep", "fish", "deer", "series", "species", "equipment", "information"];

/// Pluralize a singular English noun.
/// e.g. "user" -> "users", "category" -> "categories", "box" -> "boxes"
pub fn pluralize(word: &str) -> String {
    let lower = word.to_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    for (singular, plural) in IRREGULAR {
        if lower == *singular {
            return (*plural).to_string();
        }
    }
    if let Some(stem) = word.strip_suffix('y') {
        // consonant + y -> ies; vowel + y -> ys (e.g. "day" -> "days")
        let before = stem.chars().last();
        if before.map(|c| !"aeiou".contains(c.to_ascii_lowercase())).unwrap_or(false) {
            return format!("{}ies", stem);
        }
    }
    if word.ends_with('s')
        || word.ends_with('x')
        || word.ends_with('z')
        || word.ends_with("ch")
        || word.ends_with("sh")
    {
        return format!("{}es", word);
    }
    if let Some(stem) = word.strip_suffix("fe") {
        return format!("{}ves", stem);
    }
    if let Some(stem) = word.strip_suffix('f') {
        return format!("{}ves", stem);
    }
    format!("{}s", word)
}
