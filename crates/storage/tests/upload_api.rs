//! Integration tests for the signed-URL upload protocol against a mock
//! asset service.

use assert_matches::assert_matches;
use fxlab_storage::store::{AssetStore, UploadError};

// ---------------------------------------------------------------------------
// Test: happy path -- signed URL, PUT, deterministic public URL
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upload_returns_deterministic_public_url() {
    let mut server = mockito::Server::new_async().await;
    let signed_path = "/signed/put-target";

    let signed_url_mock = server
        .mock("GET", "/media/get-upload-url")
        .match_query(mockito::Matcher::Regex(
            r"^fileName=media%2F[A-Za-z0-9]{21}\.png&projectId=dressr$".to_string(),
        ))
        .with_status(200)
        .with_body(format!("{}{}", server.url(), signed_path))
        .create_async()
        .await;

    let put_mock = server
        .mock("PUT", signed_path)
        .match_header("content-type", "image/png")
        .match_body("fake png bytes")
        .with_status(200)
        .create_async()
        .await;

    let store = AssetStore::new(
        server.url(),
        "https://assets.test".to_string(),
        "dressr".to_string(),
    );

    let public_url = store
        .upload(b"fake png bytes".to_vec(), "portrait.png", "image/png")
        .await
        .unwrap();

    assert!(public_url.starts_with("https://assets.test/media/"));
    assert!(public_url.ends_with(".png"));
    signed_url_mock.assert_async().await;
    put_mock.assert_async().await;
}

// ---------------------------------------------------------------------------
// Test: signed-URL request failure aborts before any PUT
// ---------------------------------------------------------------------------

#[tokio::test]
async fn signed_url_failure_aborts_the_upload() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/media/get-upload-url")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .with_body("storage backend down")
        .create_async()
        .await;

    let store = AssetStore::new(
        server.url(),
        "https://assets.test".to_string(),
        "dressr".to_string(),
    );

    let err = store
        .upload(b"bytes".to_vec(), "a.jpg", "image/jpeg")
        .await
        .unwrap_err();

    assert_matches!(
        err,
        UploadError::SignedUrlRequest { status: 500, ref body } if body == "storage backend down"
    );
}

// ---------------------------------------------------------------------------
// Test: rejected PUT surfaces as an upload failure
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rejected_put_surfaces_upload_error() {
    let mut server = mockito::Server::new_async().await;
    let signed_path = "/signed/expired";

    server
        .mock("GET", "/media/get-upload-url")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(format!("{}{}", server.url(), signed_path))
        .create_async()
        .await;

    server
        .mock("PUT", signed_path)
        .with_status(403)
        .with_body("signature expired")
        .create_async()
        .await;

    let store = AssetStore::new(
        server.url(),
        "https://assets.test".to_string(),
        "dressr".to_string(),
    );

    let err = store
        .upload(b"bytes".to_vec(), "a.jpg", "image/jpeg")
        .await
        .unwrap_err();

    assert_matches!(
        err,
        UploadError::Upload { status: 403, ref body } if body == "signature expired"
    );
}

// ---------------------------------------------------------------------------
// Test: extensionless file names are stored with a .jpg key
// ---------------------------------------------------------------------------

#[tokio::test]
async fn extensionless_upload_defaults_to_jpg_key() {
    let mut server = mockito::Server::new_async().await;
    let signed_path = "/signed/put-target";

    let signed_url_mock = server
        .mock("GET", "/media/get-upload-url")
        .match_query(mockito::Matcher::Regex(
            r"^fileName=media%2F[A-Za-z0-9]{21}\.jpg&projectId=dressr$".to_string(),
        ))
        .with_status(200)
        .with_body(format!("{}{}", server.url(), signed_path))
        .create_async()
        .await;

    server
        .mock("PUT", signed_path)
        .with_status(200)
        .create_async()
        .await;

    let store = AssetStore::new(
        server.url(),
        "https://assets.test".to_string(),
        "dressr".to_string(),
    );

    let public_url = store
        .upload(b"bytes".to_vec(), "camera-roll-export", "image/jpeg")
        .await
        .unwrap();

    assert!(public_url.ends_with(".jpg"));
    signed_url_mock.assert_async().await;
}
