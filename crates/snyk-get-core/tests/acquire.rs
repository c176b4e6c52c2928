//! End-to-end acquisition scenarios against mock distribution servers.

use mockito::Server;
use reqwest::Client;
use sha2::{Digest, Sha256};

use snyk_get_core::artifact::ArtifactName;
use snyk_get_core::engine::{AcquireRequest, RetryPolicy};
use snyk_get_core::platform::{LibcProbe, PlatformKey};
use snyk_get_core::reporter::NullReporter;
use snyk_get_core::source::{Source, source_list};
use snyk_get_core::version::VersionSelector;

struct GlibcHost;

impl LibcProbe for GlibcHost {
    fn is_musl(&self) -> bool {
        false
    }
}

fn digest_of(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn policy() -> RetryPolicy {
    RetryPolicy {
        attempts: 1,
        backoff_unit: std::time::Duration::from_millis(1),
    }
}

#[tokio::test]
async fn resolves_downloads_verifies_and_installs() {
    let platform = PlatformKey::resolve("linux", "x86_64", &GlibcHost).unwrap();
    let artifact = ArtifactName::for_platform(&platform).unwrap();
    assert_eq!(artifact.remote_name, "snyk-linux");

    let body = b"snyk binary bytes".to_vec();
    let mut server = Server::new_async().await;
    let artifact_mock = server
        .mock("GET", "/cli/v1.1290.0/snyk-linux")
        .with_status(200)
        .with_body(&body)
        .expect(1)
        .create_async()
        .await;
    // sha256sum-style sidecar: digest, two spaces, filename.
    let sidecar_mock = server
        .mock("GET", "/cli/v1.1290.0/snyk-linux.sha256")
        .with_status(200)
        .with_body(format!("{}  snyk-linux\n", digest_of(&body)))
        .expect(1)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = Client::new();
    let version = VersionSelector::parse("1.1290.0");
    let sources = [Source::new(server.url())];

    let installed = AcquireRequest::new(
        &client,
        &artifact,
        &version,
        &sources,
        policy(),
        dir.path(),
        &NullReporter,
    )
    .execute()
    .await
    .unwrap();

    artifact_mock.assert_async().await;
    sidecar_mock.assert_async().await;

    assert_eq!(installed.path, dir.path().join("snyk"));
    assert_eq!(installed.digest, digest_of(&body));
    assert_eq!(std::fs::read(&installed.path).unwrap(), body);
    // The temporary download name is gone once the install lands.
    assert!(!dir.path().join("snyk-linux").exists());
}

#[tokio::test]
async fn latest_channel_is_requested_without_a_v_prefix() {
    let body = b"latest build".to_vec();
    let mut server = Server::new_async().await;
    let artifact_mock = server
        .mock("GET", "/cli/latest/snyk-linux")
        .with_status(200)
        .with_body(&body)
        .expect(1)
        .create_async()
        .await;
    let _sidecar_mock = server
        .mock("GET", "/cli/latest/snyk-linux.sha256")
        .with_status(200)
        .with_body(digest_of(&body))
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = Client::new();
    let artifact = ArtifactName {
        remote_name: "snyk-linux".to_string(),
        local_name: "snyk".to_string(),
    };
    let version = VersionSelector::parse("latest");
    let sources = [Source::new(server.url())];

    AcquireRequest::new(
        &client,
        &artifact,
        &version,
        &sources,
        policy(),
        dir.path(),
        &NullReporter,
    )
    .execute()
    .await
    .unwrap();

    artifact_mock.assert_async().await;
}

#[tokio::test]
async fn preferred_mirror_is_tried_before_the_defaults() {
    let body = b"mirrored build".to_vec();
    let mut mirror = Server::new_async().await;
    let mirror_artifact = mirror
        .mock("GET", "/cli/latest/snyk-linux")
        .with_status(200)
        .with_body(&body)
        .expect(1)
        .create_async()
        .await;
    let _mirror_sidecar = mirror
        .mock("GET", "/cli/latest/snyk-linux.sha256")
        .with_status(200)
        .with_body(digest_of(&body))
        .create_async()
        .await;

    // The mirror is first and succeeds, so the built-in defaults behind it
    // are never contacted.
    let sources = source_list(Some(&mirror.url()));
    assert_eq!(sources.len(), 3);
    assert_eq!(sources[0], Source::new(mirror.url()));

    let dir = tempfile::tempdir().unwrap();
    let client = Client::new();
    let artifact = ArtifactName {
        remote_name: "snyk-linux".to_string(),
        local_name: "snyk".to_string(),
    };
    let version = VersionSelector::parse("latest");

    let installed = AcquireRequest::new(
        &client,
        &artifact,
        &version,
        &sources,
        policy(),
        dir.path(),
        &NullReporter,
    )
    .execute()
    .await
    .unwrap();

    mirror_artifact.assert_async().await;
    assert_eq!(installed.source, sources[0]);
}

#[tokio::test]
async fn reinstall_overwrites_the_previous_binary() {
    let old_body = b"old release".to_vec();
    let new_body = b"new release".to_vec();

    let dir = tempfile::tempdir().unwrap();
    let client = Client::new();
    let artifact = ArtifactName {
        remote_name: "snyk-linux".to_string(),
        local_name: "snyk".to_string(),
    };
    let version = VersionSelector::parse("latest");

    for body in [&old_body, &new_body] {
        let mut server = Server::new_async().await;
        let _artifact_mock = server
            .mock("GET", "/cli/latest/snyk-linux")
            .with_status(200)
            .with_body(body.as_slice())
            .create_async()
            .await;
        let _sidecar_mock = server
            .mock("GET", "/cli/latest/snyk-linux.sha256")
            .with_status(200)
            .with_body(digest_of(body))
            .create_async()
            .await;

        let sources = [Source::new(server.url())];
        AcquireRequest::new(
            &client,
            &artifact,
            &version,
            &sources,
            policy(),
            dir.path(),
            &NullReporter,
        )
        .execute()
        .await
        .unwrap();
    }

    // Last successful install wins.
    assert_eq!(std::fs::read(dir.path().join("snyk")).unwrap(), new_body);
}
