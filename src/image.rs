use regex::Regex;
use std::sync::LazyLock;

static INFOBOX_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)image\s*=\s*[^\n|]+").unwrap());
static FILE_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\[\[File:").unwrap());

/// Heuristic check for an infobox `image =` field or an embedded `[[File:` link.
pub fn has_image(wikitext: Option<&str>) -> bool {
    match wikitext {
        Some(text) if !text.is_empty() => INFOBOX_IMAGE.is_match(text) || FILE_LINK.is_match(text),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infobox_field() {
        assert!(has_image(Some("{{Infobox drug\n| image = Foo.png\n| width = 200\n}}")));
        assert!(has_image(Some("{{Infobox|Image=Bar.svg}}")));
    }

    #[test]
    fn file_link_any_case() {
        assert!(has_image(Some("Text [[file:Chart.png|thumb]] more")));
        assert!(has_image(Some("[[File:Chart.png]]")));
    }

    #[test]
    fn field_value_needs_a_character_before_pipe() {
        assert!(!has_image(Some("| image =|caption = x")));
        assert!(!has_image(Some("| image =\n")));
        // whitespace before the pipe still counts
        assert!(has_image(Some("| image = |caption = x")));
    }

    #[test]
    fn plain_text_has_no_image() {
        assert!(!has_image(Some("'''Aspirin''' is a medication. [[Pain]]")));
        assert!(!has_image(Some("[[Image:Old.png]]")));
    }

    #[test]
    fn absent_or_empty() {
        assert!(!has_image(None));
        assert!(!has_image(Some("")));
    }
}
