use unicode_normalization::UnicodeNormalization;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Canonical comparison form for listing text.
///
/// Trims, lowercases with Unicode case mapping (independent of any process
/// locale), decomposes, drops nonspacing marks (category Mn) and recomposes.
/// Spacing and enclosing marks are kept. Absent or blank
/// input yields an empty string.
///
/// The output is a fixed point: `normalize(Some(&normalize(x))) == normalize(x)`.
pub fn normalize(input: Option<&str>) -> String {
    let Some(input) = input else {
        return String::new();
    };
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let stripped: String = trimmed
        .to_lowercase()
        .nfd()
        .filter(|c| c.general_category() != GeneralCategory::NonspacingMark)
        .nfc()
        .collect();

    // A stripped mark may have sat between text and outer whitespace.
    if stripped.trim().len() == stripped.len() {
        stripped
    } else {
        stripped.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("")), "");
        assert_eq!(normalize(Some("   \t\n")), "");
    }

    #[test]
    fn strips_case_and_diacritics() {
        assert_eq!(normalize(Some("Café Central")), "cafe central");
        assert_eq!(normalize(Some("  Loft Chicó ")), "loft chico");
        assert_eq!(normalize(Some("DÚPLEX CEDRITOS")), "duplex cedritos");
        assert_eq!(normalize(Some("Bogotá")), "bogota");
        assert_eq!(normalize(Some("Ñandú")), "nandu");
    }

    #[test]
    fn preserves_punctuation_and_inner_whitespace() {
        assert_eq!(
            normalize(Some("Cra 7 #12-34, Bogotá")),
            "cra 7 #12-34, bogota"
        );
    }

    #[test]
    fn decomposed_and_precomposed_inputs_agree() {
        let precomposed = "Medell\u{00ED}n";
        let decomposed = "Medelli\u{0301}n";
        assert_eq!(normalize(Some(precomposed)), normalize(Some(decomposed)));
        assert_eq!(normalize(Some(decomposed)), "medellin");
    }

    #[test]
    fn only_nonspacing_marks_are_removed() {
        // U+093F DEVANAGARI VOWEL SIGN I is a spacing mark.
        assert_eq!(normalize(Some("\u{0915}\u{093F}")), "\u{0915}\u{093F}");
        // U+094D DEVANAGARI SIGN VIRAMA is nonspacing.
        assert_eq!(normalize(Some("\u{0915}\u{094D}")), "\u{0915}");
        // U+20DD COMBINING ENCLOSING CIRCLE is an enclosing mark.
        assert_eq!(normalize(Some("a\u{20DD}")), "a\u{20DD}");
        assert_ne!(normalize(Some("\u{0915}\u{093F}")), normalize(Some("\u{0915}")));
    }

    #[test]
    fn dangling_mark_does_not_leave_whitespace() {
        assert_eq!(normalize(Some("casa \u{0301}")), "casa");
    }

    #[test]
    fn idempotent_on_mixed_samples() {
        let samples = [
            "Café Central",
            "  ÀÉÎÕÜ  ",
            "İstanbul",
            "casa \u{0301}",
            "Penthouse Sur",
            "\u{212B}ngstr\u{00F6}m",
            "straße",
            "\u{0915}\u{093F}\u{0924}\u{093E}\u{092C}",
            "",
        ];
        for s in samples {
            let once = normalize(Some(s));
            let twice = normalize(Some(&once));
            assert_eq!(once, twice, "normalize not idempotent for {s:?}");
        }
    }
}
