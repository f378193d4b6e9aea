//! Property-based tests for the content formatter

use super::inline::to_markup;
use super::*;
use proptest::prelude::*;

/// Text that mixes callout keywords, numbered markers and stray asterisks
fn arb_marked_up() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        Just("**Alerta:** ".to_string()),
        Just("**Recomendación** ".to_string()),
        Just("**ALERT**".to_string()),
        Just("1. **Paso** ".to_string()),
        Just("42. **".to_string()),
        Just("**".to_string()),
        Just("*".to_string()),
        Just("\n".to_string()),
        "[a-záéíóúñ ]{1,12}",
        "[0-9]{1,12}\\. ",
    ];
    proptest::collection::vec(token, 0..24).prop_map(|parts| parts.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_unmarked_text_is_one_paragraph_per_line(raw in "[a-zA-Z0-9 .,:\n]{0,200}") {
        let expected: Vec<ContentBlock> = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| ContentBlock::Paragraph { spans: vec![TextSpan::Plain(l.to_string())] })
            .collect();
        prop_assert_eq!(format(&raw), expected);
    }

    #[test]
    fn prop_format_is_total_and_deterministic(raw in "\\PC{0,200}") {
        let first = format(&raw);
        prop_assert_eq!(&first, &format(&raw));
    }

    #[test]
    fn prop_no_empty_blocks(raw in arb_marked_up()) {
        for block in format(&raw) {
            match block {
                ContentBlock::Paragraph { spans } | ContentBlock::AlertHeader { spans } => {
                    prop_assert!(!spans.is_empty());
                    prop_assert!(spans.iter().all(|s| !s.text().is_empty()));
                }
                ContentBlock::NumberedItem { title, .. } => {
                    prop_assert!(!plain_text(&title).trim().is_empty());
                }
            }
        }
    }

    #[test]
    fn prop_inline_parse_is_lossless(line in "[a-z *]{0,60}") {
        prop_assert_eq!(to_markup(&parse_inline(&line)), line);
    }

    #[test]
    fn prop_emphasized_spans_hold_no_markers(line in "[a-z *]{0,60}") {
        for span in parse_inline(&line) {
            if let TextSpan::Emphasized(text) = span {
                prop_assert!(!text.is_empty());
                prop_assert!(!text.contains('*'));
            }
        }
    }

    #[test]
    fn prop_every_header_precedes_its_items(raw in arb_marked_up()) {
        let blocks = format(&raw);
        if let Some(first_item) = blocks
            .iter()
            .position(|b| matches!(b, ContentBlock::NumberedItem { .. }))
        {
            let has_header = blocks[..first_item]
                .iter()
                .any(|b| matches!(b, ContentBlock::AlertHeader { .. }));
            prop_assert!(has_header, "item without a preceding header in {:?}", blocks);
        }
    }
}
