use lexsum::core::models::{ApiResponse, Comparison, LengthBounds, Mode, SummarizeRequest, SummaryLength};

#[test]
fn test_request_defaults() {
    let request: SummarizeRequest = serde_json::from_str(r#"{"text": "Clause one."}"#).unwrap();
    assert_eq!(request.mode(), Mode::Extractive);
    assert_eq!(request.length(), SummaryLength::Medium);
    assert_eq!(request.num_sentences, 3);
}

#[test]
fn test_unknown_mode_and_length_degrade() {
    let request: SummarizeRequest = serde_json::from_str(
        r#"{"text": "x", "mode": "poetic", "length": "epic", "num_sentences": -4}"#,
    )
    .unwrap();
    assert_eq!(request.mode(), Mode::Extractive);
    assert_eq!(request.length(), SummaryLength::Medium);
    assert_eq!(request.num_sentences, -4);
}

#[test]
fn test_mode_parsing_is_case_insensitive() {
    assert_eq!(" Abstractive ".parse::<Mode>().unwrap(), Mode::Abstractive);
    assert_eq!("COMPARE".parse::<Mode>().unwrap(), Mode::Compare);
    assert_eq!("Long".parse::<SummaryLength>().unwrap(), SummaryLength::Long);
}

#[test]
fn test_length_bounds() {
    let cases = [
        (SummaryLength::Short, 30, 60),
        (SummaryLength::Medium, 60, 150),
        (SummaryLength::Long, 150, 300),
    ];
    for (length, min_length, max_length) in cases {
        assert_eq!(
            length.bounds(),
            LengthBounds {
                min_length,
                max_length
            }
        );
    }
}

#[test]
fn test_response_envelope_shape() {
    let single = serde_json::to_value(ApiResponse::single(Mode::Abstractive, "Short.".into())).unwrap();
    assert_eq!(
        single,
        serde_json::json!({"ok": true, "data": {"abstractive": "Short."}})
    );

    let both = serde_json::to_value(ApiResponse::comparison(Comparison {
        extractive: "E.".into(),
        abstractive: "A.".into(),
    }))
    .unwrap();
    assert_eq!(
        both,
        serde_json::json!({"ok": true, "data": {"extractive": "E.", "abstractive": "A."}})
    );
}

#[test]
fn test_unknown_mode_answers_under_canonical_key() {
    let request: SummarizeRequest =
        serde_json::from_str(r#"{"text": "x", "mode": "Bogus"}"#).unwrap();
    let response = ApiResponse::single(request.mode(), "x".into());
    assert_eq!(
        serde_json::to_value(response).unwrap(),
        serde_json::json!({"ok": true, "data": {"extractive": "x"}})
    );
}
