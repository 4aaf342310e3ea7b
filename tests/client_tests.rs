mod common;

use common::{create_temp_directory, create_test_file, RecordingTransport, PNG_BYTES};
use imageoptim_client::{
    Client, ImageOptimError, ImageSource, OptimizationOptions, RequestBody, Status,
    TransportResponse,
};
use reqwest::header::{HeaderValue, CONTENT_TYPE, WARNING};
use reqwest::StatusCode;

fn options() -> OptimizationOptions {
    OptimizationOptions {
        width: Some(100),
        height: Some(50),
        ..OptimizationOptions::new("bob")
    }
}

#[tokio::test]
async fn file_upload_is_single_multipart_part() {
    let temp_dir = create_temp_directory();
    let path = create_test_file(temp_dir.path(), "cat.png", PNG_BYTES);

    let mut response = TransportResponse::new(StatusCode::OK);
    response.body = vec![1, 2, 3];
    response
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("image/png"));
    let transport = RecordingTransport::replying(response);
    let client = Client::new(&transport).with_base_address("http://localhost:9000/");

    let result = client
        .optimize(&options(), &ImageSource::File(path))
        .await
        .unwrap();

    assert_eq!(result.status, Status::Success);
    assert_eq!(result.file, vec![1, 2, 3]);
    assert_eq!(result.original_size, PNG_BYTES.len() as u64);

    let request = transport.last_request().unwrap();
    assert_eq!(request.url, "http://localhost:9000/bob/100x50/");
    match request.body {
        Some(RequestBody::Multipart(part)) => {
            assert_eq!(part.field, "file");
            assert_eq!(part.file_name, "cat.png");
            assert_eq!(part.content_type, "image/png");
            assert_eq!(part.bytes, PNG_BYTES);
        }
        None => panic!("expected a multipart body"),
    }
}

#[tokio::test]
async fn url_source_has_zero_original_size() {
    let transport = RecordingTransport::replying(TransportResponse::new(StatusCode::OK));
    let client = Client::new(&transport);

    let source = ImageSource::parse("https://example.com/big.jpg");
    let result = client.optimize(&options(), &source).await.unwrap();

    assert_eq!(result.original_size, 0);
    assert_eq!(
        transport.last_request().unwrap().url,
        "https://im2.io/bob/100x50/https://example.com/big.jpg"
    );
}

#[tokio::test]
async fn unknown_extension_is_input_error() {
    let temp_dir = create_temp_directory();
    let path = create_test_file(temp_dir.path(), "notes.txt", b"not an image");
    let transport = RecordingTransport::replying(TransportResponse::new(StatusCode::OK));
    let client = Client::new(&transport);

    let err = client
        .optimize(&options(), &ImageSource::File(path))
        .await
        .unwrap_err();

    assert!(matches!(err, ImageOptimError::UnknownContentType(ref name) if name == "notes.txt"));
    assert!(err.is_input());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn configuration_checked_before_file() {
    let transport = RecordingTransport::replying(TransportResponse::new(StatusCode::OK));
    let client = Client::new(&transport);

    let options = OptimizationOptions {
        bg_color: Some("#fff".to_string()),
        ..OptimizationOptions::new("bob")
    };
    let source = ImageSource::parse("/does/not/exist.png");
    let err = client.optimize(&options, &source).await.unwrap_err();

    assert!(matches!(err, ImageOptimError::BgColorHash(_)));
    assert!(err.is_configuration());
}

#[tokio::test]
async fn dry_run_returns_local_bytes_without_network() {
    let temp_dir = create_temp_directory();
    let path = create_test_file(temp_dir.path(), "cat.png", PNG_BYTES);
    let transport = RecordingTransport::failing("network must not be used");
    let client = Client::new(&transport).with_dry_run(true);

    let result = client
        .optimize(&options(), &ImageSource::File(path))
        .await
        .unwrap();

    assert_eq!(result.status, Status::TestSuccess);
    assert_eq!(result.file, PNG_BYTES);
    assert_eq!(result.original_size, PNG_BYTES.len() as u64);
    assert!(result.elapsed_seconds >= 0.0);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn error_statuses_carry_body_text() {
    let cases = [
        (StatusCode::BAD_REQUEST, Status::OptionsOrImageIncorrect),
        (StatusCode::PAYMENT_REQUIRED, Status::PaymentRequired),
        (StatusCode::FORBIDDEN, Status::UsernameMissingIncorrect),
        (StatusCode::NOT_FOUND, Status::CannotFindImage),
        (StatusCode::SERVICE_UNAVAILABLE, Status::OtherError),
    ];

    for (code, expected) in cases {
        let mut response = TransportResponse::new(code);
        response.body = format!("failed with {}", code.as_u16()).into_bytes();
        response
            .headers
            .append(WARNING, HeaderValue::from_static("199 - \"one\""));
        response
            .headers
            .append(WARNING, HeaderValue::from_static("199 - \"two\""));

        let client = Client::new(RecordingTransport::replying(response));
        let result = client
            .optimize(&options(), &ImageSource::parse("https://example.com/a.png"))
            .await
            .unwrap();

        assert_eq!(result.status, expected);
        assert!(result.file.is_empty());
        assert!(result.file_type.is_none());
        assert_eq!(
            result.status_message,
            Some(format!("failed with {}", code.as_u16()))
        );
        assert_eq!(result.warnings.len(), 2);
    }
}

#[tokio::test]
async fn transport_error_is_absorbed() {
    let client = Client::new(RecordingTransport::failing("connection reset by peer"));
    let result = client
        .optimize(&options(), &ImageSource::parse("https://example.com/a.png"))
        .await
        .unwrap();

    assert_eq!(result.status, Status::OtherError);
    assert!(result
        .status_message
        .unwrap()
        .contains("connection reset by peer"));
    assert!(result.file.is_empty());
    assert!(result.file_type.is_none());
    assert!(result.via_header.is_none());
}

#[tokio::test]
async fn independent_clients_run_concurrently() {
    let first = Client::new(RecordingTransport::replying(TransportResponse::new(
        StatusCode::OK,
    )));
    let second = Client::new(RecordingTransport::replying(TransportResponse::new(
        StatusCode::NOT_FOUND,
    )));
    let source = ImageSource::parse("https://example.com/a.png");
    let options = options();

    let (a, b) = tokio::join!(
        first.optimize(&options, &source),
        second.optimize(&options, &source)
    );

    assert_eq!(a.unwrap().status, Status::Success);
    assert_eq!(b.unwrap().status, Status::CannotFindImage);
}
