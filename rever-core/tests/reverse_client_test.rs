use futures_util::future::join_all;
use rever_core::{
    ClientConfig,
    client::{CallError, CallOptions, ConnectionError, ReverseClient, RpcError},
};
use reverse_service::ReverseServiceServer;
use reverse_service_impl::{
    FailingReverseService, HeaderEchoService, ReverseServiceImpl, SlowReverseService,
};
use std::time::Duration;
use tonic::Code;


fn reverse_client() -> ReverseClient<ReverseServiceServer<ReverseServiceImpl>> {
    ReverseClient::from_service(ReverseServiceServer::new(ReverseServiceImpl))
}

#[tokio::test]
async fn test_reverse_hello_world() {
    let client = reverse_client();

    let reversed = client.reverse("Hello, World").await.unwrap();

    assert_eq!(reversed, "dlroW ,olleH");
}

#[tokio::test]
async fn test_reverse_empty_string() {
    let client = reverse_client();

    assert_eq!(client.reverse("").await.unwrap(), "");
}

#[tokio::test]
async fn test_reverse_single_character() {
    let client = reverse_client();

    assert_eq!(client.reverse("a").await.unwrap(), "a");
}

#[tokio::test]
async fn test_reverse_multi_byte_code_points() {
    let client = reverse_client();

    let reversed = client.reverse("añ😀").await.unwrap();

    assert_eq!(reversed, "😀ña");
}

#[tokio::test]
async fn test_reverse_twice_is_identity() {
    let client = reverse_client();
    let input = "The quick brown fox, ünïcödé included";

    let once = client.reverse(input).await.unwrap();
    let twice = client.reverse(&once).await.unwrap();

    assert_eq!(twice, input);
}

#[tokio::test]
async fn test_concurrent_calls_on_one_channel() {
    let client = reverse_client();
    let inputs: Vec<String> = (0..32).map(|i| format!("call-{i}")).collect();

    let results = join_all(inputs.iter().map(|s| client.reverse(s))).await;

    for (input, result) in inputs.iter().zip(results) {
        let expected: String = input.chars().rev().collect();
        assert_eq!(result.unwrap(), expected);
    }
}

#[tokio::test]
async fn test_remote_fault_is_rpc_status_error() {
    let client = ReverseClient::from_service(ReverseServiceServer::new(FailingReverseService));

    let result = client.reverse("anything").await;

    match result {
        Err(CallError::Rpc(RpcError::Status { code, message })) => {
            assert_eq!(code, Code::Internal);
            assert_eq!(message, "reverse engine on fire");
        }
        other => panic!("Expected RpcError::Status, got: {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_slow_server_exceeds_deadline() {
    let client = ReverseClient::from_service(ReverseServiceServer::new(SlowReverseService(
        Duration::from_secs(60),
    )));

    let result = client
        .reverse_with_deadline("slow", Duration::from_millis(50))
        .await;

    assert!(
        matches!(
            result,
            Err(CallError::Rpc(RpcError::DeadlineExceeded(d))) if d == Duration::from_millis(50)
        ),
        "Expected DeadlineExceeded, got: {:?}",
        result
    );
}

#[tokio::test(start_paused = true)]
async fn test_default_deadline_comes_from_options() {
    let client = ReverseClient::from_service(ReverseServiceServer::new(SlowReverseService(
        Duration::from_secs(60),
    )))
    .with_options(CallOptions {
        timeout: Duration::from_millis(100),
        headers: vec![],
    });

    let result = client.reverse("slow").await;

    assert!(matches!(
        result,
        Err(CallError::Rpc(RpcError::DeadlineExceeded(d))) if d == Duration::from_millis(100)
    ));
}

#[tokio::test]
async fn test_headers_reach_the_server() {
    let client = ReverseClient::from_service(ReverseServiceServer::new(HeaderEchoService))
        .with_options(CallOptions {
            headers: vec![("x-echo".to_string(), "from-metadata".to_string())],
            ..CallOptions::default()
        });

    let reply = client.reverse("ignored").await.unwrap();

    assert_eq!(reply, "from-metadata");
}

#[tokio::test]
async fn test_invalid_header_fails_before_sending() {
    let client = reverse_client().with_options(CallOptions {
        headers: vec![("not a header".to_string(), "v".to_string())],
        ..CallOptions::default()
    });

    let result = client.reverse("abc").await;

    assert!(matches!(
        result,
        Err(CallError::Rpc(RpcError::InvalidMetadataKey { .. }))
    ));
}

#[tokio::test]
async fn test_close_is_idempotent() {
    let mut client = reverse_client();
    assert!(!client.is_closed());

    client.close();
    assert!(client.is_closed());

    client.close();
    assert!(client.is_closed());
}

#[tokio::test]
async fn test_close_without_any_call() {
    let mut client = reverse_client();

    client.close();

    assert!(client.is_closed());
}

#[tokio::test]
async fn test_call_after_close_fails() {
    let mut client = reverse_client();
    assert_eq!(client.reverse("ok").await.unwrap(), "ko");

    client.close();

    let result = client.reverse("too late").await;
    assert!(matches!(
        result,
        Err(CallError::Connection(ConnectionError::Closed))
    ));
}

#[tokio::test]
async fn test_close_after_failed_call() {
    let mut client = ReverseClient::from_service(ReverseServiceServer::new(FailingReverseService));

    assert!(client.reverse("x").await.is_err());

    client.close();
    client.close();
    assert!(client.is_closed());
}

#[tokio::test]
async fn test_unbounded_deadline_still_calls() {
    let client = reverse_client();

    let reversed = client
        .reverse_with_deadline("Hello, World", Duration::MAX)
        .await
        .unwrap();

    assert_eq!(reversed, "dlroW ,olleH");
}

#[tokio::test]
async fn test_largest_configured_timeout_still_calls() {
    let config: ClientConfig =
        serde_json::from_str(r#"{ "timeout_ms": 18446744073709551615 }"#).unwrap();
    let client = reverse_client().with_options(CallOptions::from(&config));

    assert_eq!(client.reverse("abc").await.unwrap(), "cba");
}
