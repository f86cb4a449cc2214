//! Title-to-filename slug derivation.

/// Derive a filesystem-safe slug from a title.
///
/// Lower-cases the title, joins whitespace runs with a single `-`, and
/// drops characters that are hostile in filenames. Deterministic and
/// idempotent: `slugify(slugify(t)) == slugify(t)`.
pub fn slugify(title: &str) -> String {
    title
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_joins_whitespace() {
        assert_eq!(slugify("The Wandering Light"), "the-wandering-light");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(slugify("  A   Quiet\tPlace \n"), "a-quiet-place");
    }

    #[test]
    fn strips_filename_hostile_characters() {
        assert_eq!(slugify("\"Echoes\" of: Time/Space"), "echoes-of-timespace");
    }

    #[test]
    fn is_idempotent() {
        for title in ["The Wandering Light", "  A   Quiet Place", "\"Echoes\"!"] {
            let once = slugify(title);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn contains_no_whitespace() {
        let slug = slugify("many words in a long title");
        assert!(!slug.chars().any(char::is_whitespace));
    }

    #[test]
    fn empty_title_gives_empty_slug() {
        assert_eq!(slugify("   "), "");
    }
}
