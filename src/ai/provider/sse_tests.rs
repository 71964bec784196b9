//! Tests for SSE parsing

use super::*;
use bytes::Bytes;
use proptest::prelude::*;

fn delta(text: &str) -> String {
    format!(
        "event: content_block_delta\ndata: {{\"type\":\"content_block_delta\",\"index\":0,\"delta\":{{\"type\":\"text_delta\",\"text\":\"{}\"}}}}\n\n",
        text
    )
}

#[test]
fn test_parser_extracts_delta_text() {
    let data =
        r#"{"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hi"}}"#;
    assert_eq!(AnthropicEventParser.parse_data(data), Some("Hi".to_string()));
}

#[test]
fn test_parser_ignores_other_events() {
    let data = r#"{"type":"message_start","message":{"id":"msg_1"}}"#;
    assert_eq!(AnthropicEventParser.parse_data(data), None);
    assert_eq!(AnthropicEventParser.parse_data("not json"), None);
}

#[test]
fn test_done_marker() {
    assert!(AnthropicEventParser.is_done("[DONE]"));
    assert!(!AnthropicEventParser.is_done("{}"));
}

#[test]
fn test_chunk_with_several_events() {
    let mut parser = SseParser::new(AnthropicEventParser);
    let stream = format!("{}{}", delta("Hello"), delta(" world"));
    let results = parser.parse_chunk(&Bytes::from(stream));
    assert_eq!(results, vec!["Hello".to_string(), " world".to_string()]);
}

#[test]
fn test_line_split_across_chunks() {
    let mut parser = SseParser::new(AnthropicEventParser);
    let stream = delta("Paragraph");
    let (first, second) = stream.split_at(40);

    assert!(parser.parse_chunk(&Bytes::from(first.to_string())).is_empty());
    assert_eq!(
        parser.parse_chunk(&Bytes::from(second.to_string())),
        vec!["Paragraph".to_string()]
    );
}

#[test]
fn test_done_and_blank_lines_are_skipped() {
    let mut parser = SseParser::new(AnthropicEventParser);
    let results = parser.parse_chunk(&Bytes::from_static(b"\n   \ndata: [DONE]\n"));
    assert!(results.is_empty());
}

#[test]
fn test_invalid_utf8_chunk_is_skipped() {
    let mut parser = SseParser::new(AnthropicEventParser);
    assert!(parser.parse_chunk(&Bytes::from_static(&[0xff, 0xfe, b'\n'])).is_empty());

    let results = parser.parse_chunk(&Bytes::from(delta("ok")));
    assert_eq!(results, vec!["ok".to_string()]);
}

#[test]
fn test_character_split_across_chunks() {
    let mut parser = SseParser::new(AnthropicEventParser);
    let stream = format!("{}{}", delta("café one"), delta(" two")).into_bytes();
    let cut = stream.iter().position(|b| *b == 0xC3).unwrap() + 1;

    let mut texts = parser.parse_chunk(&Bytes::copy_from_slice(&stream[..cut]));
    texts.extend(parser.parse_chunk(&Bytes::copy_from_slice(&stream[cut..])));

    assert_eq!(texts, vec!["café one".to_string(), " two".to_string()]);
}

#[test]
fn test_bad_line_does_not_drop_neighbours() {
    let mut parser = SseParser::new(AnthropicEventParser);
    let mut stream = delta("before").into_bytes();
    stream.extend_from_slice(&[b'd', b'a', 0xff, b'\n']);
    stream.extend_from_slice(delta("after").as_bytes());

    let texts = parser.parse_chunk(&Bytes::from(stream));
    assert_eq!(texts, vec!["before".to_string(), "after".to_string()]);
}

#[test]
fn test_data_without_space_after_colon() {
    let mut parser = SseParser::new(AnthropicEventParser);
    let line = r#"data:{"type":"content_block_delta","delta":{"text":"tight"}}"#;
    let texts = parser.parse_chunk(&Bytes::from(format!("{}\n", line)));
    assert_eq!(texts, vec!["tight".to_string()]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // However the stream is cut into chunks, the same text comes out.
    #[test]
    fn prop_chunking_does_not_change_output(
        words in prop::collection::vec("[a-zA-Z ]{1,10}", 1..6),
        cut in 1usize..200,
    ) {
        let stream: String = words.iter().map(|w| delta(w)).collect();
        let cut = cut.min(stream.len());

        let mut whole = SseParser::new(AnthropicEventParser);
        let expected = whole.parse_chunk(&Bytes::from(stream.clone()));

        let mut split = SseParser::new(AnthropicEventParser);
        let (a, b) = stream.split_at(cut);
        let mut actual = split.parse_chunk(&Bytes::from(a.to_string()));
        actual.extend(split.parse_chunk(&Bytes::from(b.to_string())));

        prop_assert_eq!(actual, expected);
    }

    // Cutting at any byte, even inside a multi-byte character, loses nothing.
    #[test]
    fn prop_byte_cut_keeps_multibyte_text(
        words in prop::collection::vec("[a-zé日ü ]{1,8}", 1..5),
        cut in 0usize..400,
    ) {
        let stream: Vec<u8> = words.iter().map(|w| delta(w)).collect::<String>().into_bytes();
        let cut = cut.min(stream.len());

        let mut parser = SseParser::new(AnthropicEventParser);
        let mut texts = parser.parse_chunk(&Bytes::copy_from_slice(&stream[..cut]));
        texts.extend(parser.parse_chunk(&Bytes::copy_from_slice(&stream[cut..])));

        prop_assert_eq!(texts, words);
    }
}
