use std::path::PathBuf;

use handsign_hand_model::{parse_frame_line, parse_frames, parse_header, LANDMARK_COUNT};
use proptest::prelude::*;

fn sample_stream() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-session")
        .join("frames.jsonl");
    std::fs::read_to_string(path).expect("sample stream fixture")
}

#[test]
fn sample_stream_parses() {
    let content = sample_stream();

    let header = parse_header(&content).expect("sample stream has a header");
    assert_eq!(header.schema_version, "1.0");
    assert_eq!(header.source.as_deref(), Some("synthetic"));

    let frames = parse_frames(&content).unwrap();
    assert_eq!(frames.len(), 6);
    assert_eq!(frames.iter().filter(|f| f.has_hand()).count(), 4);
    assert!(frames.windows(2).all(|w| w[0].timestamp_ns < w[1].timestamp_ns));
    for frame in frames.iter().filter(|f| f.has_hand()) {
        let hand = frame.hand.as_ref().unwrap();
        assert_eq!(hand.points().len(), LANDMARK_COUNT);
        assert!(hand.points().iter().all(|p| p.is_finite()));
    }
}

#[test]
fn hand_with_wrong_landmark_count_is_rejected() {
    let twenty = vec![r#"{"x":0.0,"y":0.0,"z":0.0}"#; 20].join(",");
    let line = format!(r#"{{"t":1,"hand":[{twenty}]}}"#);
    assert!(parse_frame_line(&line).unwrap().is_err());
}

proptest! {
    #[test]
    fn arbitrary_lines_never_panic(line in "\\PC*") {
        let _ = parse_frame_line(&line);
        let _ = parse_header(&line);
    }

    #[test]
    fn comment_lines_are_always_skipped(body in "[ -~]*") {
        let line = format!("#{body}");
        prop_assert!(parse_frame_line(&line).is_none());
    }
}
