mod common;

use std::time::Duration;

use common::{cat_hat, spawn, Reply};
use serde_json::json;
use word_freq::core::client::{AnalyzeError, AnalyzeRequest, FrequencyClient};

fn request(text: &str) -> AnalyzeRequest {
    AnalyzeRequest::new(text, true, false).unwrap()
}

#[tokio::test]
async fn posts_options_and_decodes_result() {
    let service = spawn(Reply::Json(cat_hat())).await;
    let client = FrequencyClient::new(service.endpoint(), Some(Duration::from_secs(5))).unwrap();

    let result = client.analyze(&request("  the cat and the hat ")).await.unwrap();
    assert_eq!(result.word_count, 5);
    assert_eq!(result.unique_words, 4);
    assert_eq!(result.frequencies[0].word, "the");

    assert_eq!(
        service.requests(),
        vec![json!({
            "text": "the cat and the hat",
            "removeStopwords": true,
            "caseSensitive": false
        })]
    );
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let service = spawn(Reply::Status(500)).await;
    let client = FrequencyClient::new(service.endpoint(), None).unwrap();
    let err = client.analyze(&request("text")).await.unwrap_err();
    assert_eq!(err, AnalyzeError::Status(500));
    assert_eq!(err.to_string(), "Server error: HTTP 500");
}

#[tokio::test]
async fn undecodable_body_is_malformed() {
    let service = spawn(Reply::Raw("<html>oops</html>")).await;
    let client = FrequencyClient::new(service.endpoint(), None).unwrap();
    let err = client.analyze(&request("text")).await.unwrap_err();
    assert!(matches!(err, AnalyzeError::MalformedResponse(_)), "{err:?}");
}

#[tokio::test]
async fn missing_field_is_malformed() {
    let service = spawn(Reply::Json(json!({ "wordCount": 3, "frequencies": [] }))).await;
    let client = FrequencyClient::new(service.endpoint(), None).unwrap();
    let err = client.analyze(&request("text")).await.unwrap_err();
    assert!(matches!(err, AnalyzeError::MalformedResponse(_)), "{err:?}");
}

#[tokio::test]
async fn top_n_subset_needs_lenient_mode() {
    // The service truncated to its most common entries.
    let body = json!({
        "wordCount": 120,
        "uniqueWords": 80,
        "frequencies": [
            { "word": "the", "count": 12 },
            { "word": "of", "count": 9 }
        ]
    });
    let service = spawn(Reply::Json(body)).await;
    let strict = FrequencyClient::new(service.endpoint(), None).unwrap();
    let err = strict.analyze(&request("text")).await.unwrap_err();
    assert!(matches!(err, AnalyzeError::MalformedResponse(ref m) if m.contains("wordCount")));

    let lenient = strict.strict(false);
    let result = lenient.analyze(&request("text")).await.unwrap();
    assert_eq!(result.frequencies.len(), 2);
}

#[tokio::test]
async fn unsorted_frequencies_are_rejected() {
    let body = json!({
        "wordCount": 3,
        "uniqueWords": 2,
        "frequencies": [
            { "word": "a", "count": 1 },
            { "word": "b", "count": 2 }
        ]
    });
    let service = spawn(Reply::Json(body)).await;
    let client = FrequencyClient::new(service.endpoint(), None).unwrap().strict(false);
    let err = client.analyze(&request("text")).await.unwrap_err();
    assert!(matches!(err, AnalyzeError::MalformedResponse(ref m) if m.contains("sorted")));
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = FrequencyClient::new(format!("http://{addr}/analyze"), None).unwrap();
    let err = client.analyze(&request("text")).await.unwrap_err();
    assert!(matches!(err, AnalyzeError::Network(_)), "{err:?}");
    assert!(err.is_network_or_server());
}

#[tokio::test]
async fn slow_service_times_out() {
    let service = spawn(Reply::Slow(Duration::from_secs(3), cat_hat())).await;
    let client = FrequencyClient::new(service.endpoint(), Some(Duration::from_millis(150))).unwrap();
    let err = client.analyze(&request("text")).await.unwrap_err();
    assert!(matches!(err, AnalyzeError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn overflowing_counts_are_malformed_not_a_panic() {
    let body = json!({
        "wordCount": u64::MAX,
        "uniqueWords": 2,
        "frequencies": [
            { "word": "a", "count": u64::MAX },
            { "word": "b", "count": u64::MAX }
        ]
    });
    let service = spawn(Reply::Json(body)).await;
    let client = FrequencyClient::new(service.endpoint(), None).unwrap();
    for strict in [true, false] {
        let err = client.clone().strict(strict).analyze(&request("text")).await.unwrap_err();
        assert_eq!(err, AnalyzeError::MalformedResponse("counts overflow".into()));
    }
}
