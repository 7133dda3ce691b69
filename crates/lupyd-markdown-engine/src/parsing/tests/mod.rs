//! Behavioural tests for the recursive parser.
//!
//! Every parse goes through `invariants::check` so ordering and bounds are
//! verified on all inputs, not just the ones written for them.


use std::ops::Range;

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::{
    ElementType, ParseError,
    catalog::{PatternCatalog, PatternRule, RuleKind, Strip, matcher::FenceMatcher},
    parsing::{Document, MarkupParser, ParseOptions, parse, parse_text},
};

const N: ElementType = ElementType::NORMAL;
const B: ElementType = ElementType::BOLD;
const I: ElementType = ElementType::ITALIC;

fn parse_checked(input: &str) -> Document {
    let doc = parse_text(input).unwrap();
    invariants::check(input, &doc);
    doc
}

fn pairs(input: &str) -> Vec<(String, ElementType)> {
    parse_checked(input)
        .into_iter()
        .map(|span| (span.text().to_string(), span.element_type()))
        .collect()
}

fn expected(items: &[(&str, ElementType)]) -> Vec<(String, ElementType)> {
    items.iter().map(|(t, ty)| (t.to_string(), *ty)).collect()
}

#[test]
fn greeting_scenario() {
    assert_eq!(
        pairs("Hello ***world***, @alice said #hi"),
        expected(&[
            ("Hello ", N),
            ("world", B),
            (", ", N),
            ("alice", ElementType::MENTION),
            (" said ", N),
            ("hi", ElementType::HASHTAG),
        ])
    );
}

#[rstest]
#[case("just some words")]
#[case("a sentence, with punctuation.")]
#[case("multi\nline\ttext")]
#[case("emoji 🎉 and accents é")]
fn text_without_delimiters_is_one_normal_span(#[case] input: &str) {
    assert_eq!(pairs(input), expected(&[(input, N)]));
}

#[test]
fn empty_input_yields_no_spans() {
    assert!(parse_checked("").is_empty());
}

#[test]
fn nested_styles_accumulate() {
    assert_eq!(
        pairs("***bold //italic// text***"),
        expected(&[("bold ", B), ("italic", B | I), (" text", B)])
    );
}

#[test]
fn bold_inside_header_carries_both_flags() {
    assert_eq!(
        pairs("###title ***x***###"),
        expected(&[("title ", ElementType::HEADER), ("x", B | ElementType::HEADER)])
    );
}

#[test]
fn hashtag_inside_bold_is_exclusive() {
    assert_eq!(
        pairs("***text #tag more***"),
        expected(&[("text ", B), ("tag", ElementType::HASHTAG), (" more", B)])
    );
}

#[test]
fn spoiler_replaces_ambient_type() {
    assert_eq!(
        pairs("***a |||b *c*|||***"),
        expected(&[
            ("a ", B),
            ("b ", ElementType::SPOILER),
            ("c", ElementType::SPOILER | B),
        ])
    );
}

#[test]
fn escaped_fences_stay_literal() {
    assert_eq!(
        pairs(r"\*\*\*not bold\*\*\*"),
        expected(&[("***not bold***", N)])
    );
}

#[test]
fn escaped_standalone_tokens_stay_literal() {
    assert_eq!(
        pairs(r"mail \@bob about \#rust"),
        expected(&[("mail @bob about #rust", N)])
    );
}

#[test]
fn doubled_backslash_does_not_suppress_markup() {
    assert_eq!(pairs(r"\\*hi*"), expected(&[(r"\", N), ("hi", B)]));
}

#[test]
fn code_is_terminal() {
    assert_eq!(
        pairs("```#hashtag inside code```"),
        expected(&[("#hashtag inside code", ElementType::CODE)])
    );
}

#[test]
fn code_keeps_backslashes() {
    assert_eq!(
        pairs(r"```a\*b```"),
        expected(&[(r"a\*b", ElementType::CODE)])
    );
}

#[test]
fn unterminated_fence_degrades_to_text() {
    assert_eq!(
        pairs("***never closed"),
        expected(&[("***never closed", N)])
    );
}

#[test]
fn empty_fence_contributes_nothing() {
    let doc = parse_checked("a ****** b");
    assert_eq!(doc.pairs(), vec![("a ", N), (" b", N)]);
    assert_eq!(doc.spans()[1].source(), 8..10);
}

#[rstest]
#[case("*word*", "word", B)]
#[case("/word/", "word", I)]
#[case("_word_", "word", ElementType::UNDERLINE)]
#[case("#word#", "word", ElementType::HEADER)]
#[case("|word|", "word", ElementType::SPOILER)]
#[case("///words here///", "words here", I)]
#[case("___words here___", "words here", ElementType::UNDERLINE)]
#[case("|||words here|||", "words here", ElementType::SPOILER)]
fn single_construct(#[case] input: &str, #[case] text: &str, #[case] ty: ElementType) {
    assert_eq!(pairs(input), expected(&[(text, ty)]));
}

#[test]
fn quote_line_is_kept_whole() {
    assert_eq!(
        pairs(">| quoted line\nnext"),
        expected(&[(">| quoted line", ElementType::QUOTE), ("\nnext", N)])
    );
}

#[test]
fn quote_needs_a_line_start() {
    assert_eq!(
        pairs("@a>| not a line start @c"),
        expected(&[
            ("a", ElementType::MENTION),
            (">| not a line start ", N),
            ("c", ElementType::MENTION),
        ])
    );
}

#[test]
fn quote_inside_bold_mid_line_is_plain() {
    assert_eq!(
        pairs("x ***>| in bold*** y"),
        expected(&[("x ", N), (">| in bold", B), (" y", N)])
    );
}

#[test]
fn quote_after_a_newline_inside_a_gap_or_interior() {
    assert_eq!(
        pairs("@a\n>| q"),
        expected(&[
            ("a", ElementType::MENTION),
            ("\n", N),
            (">| q", ElementType::QUOTE),
        ])
    );
    assert_eq!(
        pairs("***a\n>| q***"),
        expected(&[("a\n", B), (">| q", ElementType::QUOTE)])
    );
}

#[test]
fn long_delimiter_runs_parse_quickly() {
    for delimiter in ["_", "*", "/", "|", "#"] {
        let input = delimiter.repeat(100_000);
        let start = std::time::Instant::now();
        parse_checked(&input);
        assert!(
            start.elapsed() < std::time::Duration::from_secs(5),
            "run of {delimiter} took {:?}",
            start.elapsed()
        );
    }
}

#[test]
fn hyperlink_shields_its_url() {
    assert_eq!(
        pairs("see [docs](https://x.io/a/b) now"),
        expected(&[
            ("see ", N),
            ("[docs](https://x.io/a/b)", ElementType::HYPERLINK),
            (" now", N),
        ])
    );
}

#[test]
fn svg_block_is_a_leaf() {
    let svg = r#"<svg width="1"><circle r="1"/></svg>"#;
    let input = format!("a {svg} b");
    assert_eq!(
        pairs(&input),
        expected(&[("a ", N), (svg, ElementType::SVG), (" b", N)])
    );
}

#[test]
fn earliest_start_wins_over_later_overlap() {
    // `@y` starts inside the bold match and only surfaces when the interior
    // is parsed again.
    assert_eq!(
        pairs("***x @y*** @z"),
        expected(&[
            ("x ", B),
            ("y", ElementType::MENTION),
            (" ", N),
            ("z", ElementType::MENTION),
        ])
    );
}

#[test]
fn sources_point_at_stripped_interiors() {
    let input = "ab ***cd*** #ef";
    let doc = parse_checked(input);
    let sources: Vec<&str> = doc.iter().map(|s| &input[s.source()]).collect();
    assert_eq!(sources, vec!["ab ", "cd", " ", "ef"]);
}

#[test]
fn ambient_type_applies_to_plain_text() {
    let doc = parse("plain *bold*", ElementType::HEADER, PatternCatalog::standard()).unwrap();
    assert_eq!(
        doc.pairs(),
        vec![
            ("plain ", ElementType::HEADER),
            ("bold", ElementType::HEADER | B),
        ]
    );
}

#[test]
fn empty_catalog_returns_input_unchanged() {
    let doc = parse(r"***x*** \*", I, &PatternCatalog::empty()).unwrap();
    assert_eq!(doc.pairs(), vec![(r"***x*** \*", I)]);
}

#[test]
fn empty_input_with_empty_catalog_is_one_empty_span() {
    let doc = parse("", B, &PatternCatalog::empty()).unwrap();
    assert_eq!(doc.pairs(), vec![("", B)]);
    assert_eq!(doc.spans()[0].source(), 0..0);
}

#[test]
fn tie_goes_to_first_declared_rule() {
    let star = || FenceMatcher::new("**");
    let catalog = PatternCatalog::new(vec![
        PatternRule::new(RuleKind::Custom("first"), star(), ElementType::CODE)
            .with_strip(Strip::Both(2)),
        PatternRule::new(RuleKind::Custom("second"), star(), B).with_strip(Strip::Both(2)),
    ]);
    let doc = parse("**x**", N, &catalog).unwrap();
    assert_eq!(doc.pairs(), vec![("x", ElementType::CODE)]);
}

#[test]
fn depth_guard_returns_raw_branch() {
    let input = "***///___x___///***";
    let parser =
        MarkupParser::new(PatternCatalog::standard()).with_options(ParseOptions { max_depth: 1 });
    let doc = parser.parse(input, N).unwrap();
    invariants::check(input, &doc);
    // Bold is parsed at depth 0 and italic at depth 1; the italic interior
    // sits past the limit and keeps its underline delimiters.
    assert_eq!(doc.pairs(), vec![("___x___", B | I)]);
    assert_eq!(doc.spans()[0].source(), 6..13);
}

#[test]
fn self_recursive_rule_is_stopped_by_depth_guard() {
    let whole = |text: &str| -> Vec<Range<usize>> { vec![0..text.len()] };
    let catalog = PatternCatalog::new(vec![
        PatternRule::new(RuleKind::Custom("whole"), whole, B).recursive(),
    ]);
    let parser = MarkupParser::new(&catalog).with_options(ParseOptions { max_depth: 8 });
    let doc = parser.parse("loop", N).unwrap();
    assert_eq!(doc.pairs(), vec![("loop", B)]);
}

#[test]
fn short_match_for_strip_is_an_error() {
    let catalog = PatternCatalog::new(vec![
        PatternRule::new(RuleKind::Custom("short"), FenceMatcher::new("~"), B)
            .with_strip(Strip::Both(3)),
    ]);
    let err = parse("~~", N, &catalog).unwrap_err();
    assert_eq!(
        err,
        ParseError::DelimiterUnderflow {
            rule: RuleKind::Custom("short"),
            len: 2,
            required: 6,
        }
    );
}

#[test]
fn out_of_bounds_match_is_an_error() {
    let wild = |_: &str| -> Vec<Range<usize>> { vec![0..100] };
    let catalog = PatternCatalog::new(vec![PatternRule::new(RuleKind::Custom("wild"), wild, B)]);
    assert!(matches!(
        parse("short", N, &catalog),
        Err(ParseError::InvalidMatchRange { .. })
    ));
}

#[test]
fn display_lists_spans() {
    let doc = parse_checked("hi *there*");
    insta::assert_snapshot!(doc.to_string().trim_end(), @r#"
    { text: "hi ", type: Normal }
    { text: "there", type: Bold }
    "#);
}

#[test]
fn parser_is_shareable_across_threads() {
    let parser = MarkupParser::new(PatternCatalog::standard());
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| scope.spawn(move || parser.parse(&format!("*{i}* #t{i}"), N).unwrap()))
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let doc = handle.join().unwrap();
            assert_eq!(doc.spans()[0].text(), i.to_string());
        }
    });
}
