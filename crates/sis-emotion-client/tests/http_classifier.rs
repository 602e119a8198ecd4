//! HTTP classifier tests against a mock emotion service.

use std::time::Duration;

use serde_json::json;
use sis_emotion_client::{
    ClassifierError, EmotionClassifier, EmotionClientConfig, HttpEmotionClassifier,
};
use sis_models::EmotionType;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn classifier(server: &MockServer, max_retries: u32) -> HttpEmotionClassifier {
    HttpEmotionClassifier::new(EmotionClientConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
        max_retries,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_analyze_maps_scores() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .and(body_json(json!({"inputs": "Get out of my house!"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"label": "anger", "score": 0.72},
            {"label": "fear", "score": 0.31},
            {"label": "neutral", "score": 0.05}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let arc = classifier(&server, 0)
        .analyze("Get out of my house!")
        .await
        .unwrap();

    assert_eq!(arc.emotion(), EmotionType::Anger);
    assert_eq!(arc.intensity(), 72);
    assert!(arc.mixed_emotions);
    assert_eq!(arc.secondary_emotions[0].emotion, EmotionType::Fear);
}

#[tokio::test]
async fn test_batched_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[
            {"label": "grief", "score": 0.9}
        ]])))
        .mount(&server)
        .await;

    let arc = classifier(&server, 0).analyze("She is gone.").await.unwrap();
    assert_eq!(arc.emotion(), EmotionType::Despair);
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(422).set_body_string("bad input"))
        .expect(1)
        .mount(&server)
        .await;

    let err = classifier(&server, 2).analyze("text").await.unwrap_err();
    assert!(matches!(err, ClassifierError::RequestFailed(_)));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_server_error_without_retries() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = classifier(&server, 0).analyze("text").await.unwrap_err();
    assert!(matches!(err, ClassifierError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn test_server_error_retried_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let err = classifier(&server, 1).analyze("text").await.unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_empty_scores_are_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/classify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = classifier(&server, 0).analyze("text").await.unwrap_err();
    assert!(matches!(err, ClassifierError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    assert!(classifier(&server, 0).health_check().await.unwrap());
}

#[tokio::test]
async fn test_health_check_ignores_extra_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "healthy", "model": "go-emotions", "uptime": 12})),
        )
        .mount(&server)
        .await;

    assert!(classifier(&server, 0).health_check().await.unwrap());
}

#[tokio::test]
async fn test_health_check_unhealthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(!classifier(&server, 0).health_check().await.unwrap());
}
