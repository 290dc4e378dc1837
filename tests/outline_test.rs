//! Integration tests for outline extraction over in-memory layouts.

use docsift::{
    outline_from_provider, HeadingLevel, LevelingStrategy, Line, OutlineConfig, Page,
    RepetitionConfig, RepetitionScope, StaticProvider,
};

fn body_line(text: &str) -> Line {
    Line::with_span(text, 12.0, "Helvetica")
}

#[test]
fn test_single_heading_page_yields_h1() {
    // One page: a short bold line at twice the body size plus ordinary prose.
    let provider = StaticProvider::new(
        "paper.pdf",
        vec![Page::with_lines(
            1,
            vec![
                Line::with_span("Introduction", 24.0, "Times-Bold"),
                body_line("This opening paragraph describes the scope of the work in detail."),
                body_line("A second paragraph continues with more background and more context."),
            ],
        )],
    );

    let result = outline_from_provider(&provider, &OutlineConfig::default()).unwrap();

    assert_eq!(result.outline.len(), 1);
    let entry = &result.outline[0];
    assert_eq!(entry.level, HeadingLevel::H1);
    assert_eq!(entry.text, "Introduction");
    assert_eq!(entry.page, 1);
}

#[test]
fn test_repeated_boilerplate_never_becomes_heading() {
    // The same bold line tops and tails every one of five pages. Even
    // though it scores like a heading, repetition filters it out.
    let pages: Vec<Page> = (1..=5)
        .map(|n| {
            Page::with_lines(
                n,
                vec![
                    Line::with_span("Confidential - Draft", 18.0, "Helvetica-Bold"),
                    body_line("Ordinary body content for this page runs along at normal size."),
                    Line::with_span("Confidential - Draft", 18.0, "Helvetica-Bold"),
                ],
            )
        })
        .collect();
    let provider = StaticProvider::new("draft.pdf", pages);

    let result = outline_from_provider(&provider, &OutlineConfig::default()).unwrap();

    assert!(result.outline.is_empty());
    assert_ne!(result.title, "Confidential - Draft");
    let json = serde_json::to_string(&result).unwrap();
    assert!(!json.contains("Confidential - Draft"));
}

#[test]
fn test_repetition_filter_inactive_below_three_pages() {
    // Two pages are too few to call anything boilerplate.
    let pages: Vec<Page> = (1..=2)
        .map(|n| {
            Page::with_lines(
                n,
                vec![
                    Line::with_span("Status Update", 18.0, "Helvetica-Bold"),
                    body_line("Body content here keeps to the usual twelve point size for text."),
                ],
            )
        })
        .collect();
    let provider = StaticProvider::new("memo.pdf", pages);

    let result = outline_from_provider(&provider, &OutlineConfig::default()).unwrap();
    assert!(result.outline.iter().any(|e| e.text == "Status Update"));
}

#[test]
fn test_quantile_levels_follow_score_spread() {
    // Three score tiers across the document should land H1/H2/H3.
    let provider = StaticProvider::new(
        "report.pdf",
        vec![
            Page::with_lines(
                1,
                vec![
                    Line::with_span("Annual Results", 28.0, "Helvetica-Bold"),
                    body_line("The body of the report is set at twelve points throughout it."),
                ],
            ),
            Page::with_lines(
                2,
                vec![
                    Line::with_span("Revenue", 18.0, "Helvetica-Bold"),
                    body_line("Revenue discussion follows in ordinary paragraphs of body prose."),
                ],
            ),
            Page::with_lines(
                3,
                vec![
                    Line::with_span("Regional detail", 14.0, "Helvetica"),
                    body_line("Each region is covered in its own ordinary body text paragraph."),
                ],
            ),
        ],
    );

    let result = outline_from_provider(&provider, &OutlineConfig::default()).unwrap();

    let level_of = |text: &str| {
        result
            .outline
            .iter()
            .find(|e| e.text == text)
            .map(|e| e.level)
    };
    assert_eq!(level_of("Annual Results"), Some(HeadingLevel::H1));
    assert_eq!(level_of("Revenue"), Some(HeadingLevel::H2));
    assert_eq!(level_of("Regional detail"), Some(HeadingLevel::H3));
}

#[test]
fn test_numbering_strategy_end_to_end() {
    let provider = StaticProvider::new(
        "manual.pdf",
        vec![
            Page::with_lines(
                1,
                vec![
                    Line::with_span("Operator Manual", 26.0, "Helvetica-Bold"),
                    Line::with_span("1 Safety", 14.0, "Helvetica"),
                    body_line("Read all instructions before operating the machine for anything."),
                ],
            ),
            Page::with_lines(
                2,
                vec![
                    Line::with_span("1.1 Protective equipment", 13.0, "Helvetica"),
                    Line::with_span("1.1.2 Gloves", 12.0, "Helvetica"),
                    body_line("Wear the gloves supplied with the unit whenever it is running."),
                ],
            ),
        ],
    );

    let config = OutlineConfig::new().with_leveling(LevelingStrategy::NumberingExact);
    let result = outline_from_provider(&provider, &config).unwrap();

    assert_eq!(result.title, "Operator Manual");
    let collected: Vec<(HeadingLevel, &str, u32)> = result
        .outline
        .iter()
        .map(|e| (e.level, e.text.as_str(), e.page))
        .collect();
    assert_eq!(
        collected,
        vec![
            (HeadingLevel::H1, "1 Safety", 1),
            (HeadingLevel::H2, "1.1 Protective equipment", 2),
            (HeadingLevel::H3, "1.1.2 Gloves", 2),
        ]
    );
}

#[test]
fn test_outline_json_shape() {
    let provider = StaticProvider::new(
        "doc.pdf",
        vec![Page::with_lines(
            1,
            vec![
                Line::with_span("Findings", 22.0, "Helvetica-Bold"),
                body_line("Supporting prose sits below the heading at the usual body size."),
            ],
        )],
    );

    let result = outline_from_provider(&provider, &OutlineConfig::default()).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["title"], "Findings");
    assert_eq!(value["outline"][0]["level"], "H1");
    assert_eq!(value["outline"][0]["text"], "Findings");
    assert_eq!(value["outline"][0]["page"], 1);
}

#[test]
fn test_all_lines_repetition_scope() {
    // A watermark buried mid-page is only caught with the wider scope.
    let mid_watermark = |n: u32| {
        let mut lines: Vec<Line> = (0..6)
            .map(|i| body_line(&format!("Leading paragraph {i} of page {n} in the usual size.")))
            .collect();
        lines.push(Line::with_span("INTERNAL USE ONLY", 16.0, "Helvetica-Bold"));
        lines.extend(
            (0..6).map(|i| body_line(&format!("Trailing paragraph {i} of page {n} closing out."))),
        );
        Page::with_lines(n, lines)
    };
    let pages: Vec<Page> = (1..=4).map(mid_watermark).collect();
    let provider = StaticProvider::new("wm.pdf", pages);

    let config = OutlineConfig::new().with_repetition(
        RepetitionConfig::default().with_scope(RepetitionScope::AllLines),
    );
    let result = outline_from_provider(&provider, &config).unwrap();
    assert!(result.outline.iter().all(|e| e.text != "INTERNAL USE ONLY"));
}
