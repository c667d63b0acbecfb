//! Profile service tests: session, profile, and avatar flows.

use std::sync::Arc;

use crate::board::{
    adapters::memory::{InMemoryAuthGateway, InMemoryBlobStorage},
    domain::UserId,
    ports::{AuthError, AuthGateway, BlobStorage, Credentials, Profile},
    services::{ProfileError, ProfileService},
};
use chrono::Utc;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

struct Harness {
    auth: Arc<InMemoryAuthGateway>,
    blobs: Arc<InMemoryBlobStorage>,
    service: ProfileService<InMemoryAuthGateway, InMemoryBlobStorage, DefaultClock>,
}

#[fixture]
fn harness() -> Harness {
    let auth = Arc::new(InMemoryAuthGateway::new());
    let blobs = Arc::new(InMemoryBlobStorage::new());
    let service =
        ProfileService::new(Arc::clone(&auth), Arc::clone(&blobs), Arc::new(DefaultClock));
    Harness {
        auth,
        blobs,
        service,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_up_creates_a_session_and_publishes_it(harness: Harness) {
    let mut changes = harness.service.session_changes();

    let session = harness
        .service
        .sign_up(Credentials::new("ana@example.com", "hunter2"))
        .await
        .expect("sign up should succeed");

    assert_eq!(session.email, "ana@example.com");
    assert_eq!(
        harness.service.session().await.expect("session readable"),
        Some(session.clone())
    );
    changes.changed().await.expect("change should be published");
    assert_eq!(changes.borrow().clone(), Some(session));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sign_in_rejects_a_wrong_password(harness: Harness) {
    harness
        .service
        .sign_up(Credentials::new("ana@example.com", "hunter2"))
        .await
        .expect("sign up should succeed");
    harness.service.sign_out().await.expect("sign out");

    let result = harness
        .service
        .sign_in(Credentials::new("ana@example.com", "wrong"))
        .await;

    assert!(matches!(
        result,
        Err(ProfileError::Auth(AuthError::InvalidCredentials))
    ));
    assert_eq!(harness.service.session().await.expect("readable"), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_username_creates_the_profile_row_when_missing(harness: Harness) {
    let session = harness
        .service
        .sign_up(Credentials::new("ana@example.com", "hunter2"))
        .await
        .expect("sign up should succeed");

    let profile = harness
        .service
        .update_username(session.user_id, "ana")
        .await
        .expect("upsert should succeed");

    assert_eq!(profile.id, session.user_id);
    assert_eq!(profile.username, "ana");
    assert_eq!(profile.avatar_url, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upload_avatar_keys_the_object_by_user_and_random_suffix(harness: Harness) {
    let user_id = UserId::new();

    let profile = harness
        .service
        .upload_avatar(user_id, "png", vec![1, 2, 3])
        .await
        .expect("upload should succeed");

    let path = profile.avatar_url.expect("avatar url recorded");
    assert!(path.starts_with(&format!("{user_id}-")));
    assert!(path.ends_with(".png"));
    assert_eq!(
        harness
            .blobs
            .download(&path)
            .await
            .expect("object stored"),
        vec![1, 2, 3]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeated_avatar_uploads_never_reuse_a_key(harness: Harness) {
    let user_id = UserId::new();

    harness
        .service
        .upload_avatar(user_id, "png", vec![1])
        .await
        .expect("first upload");
    harness
        .service
        .upload_avatar(user_id, "png", vec![2])
        .await
        .expect("second upload");

    assert_eq!(harness.blobs.paths().expect("paths readable").len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn load_profile_degrades_to_no_avatar_when_download_fails(harness: Harness) {
    let user_id = UserId::new();
    harness
        .auth
        .upsert_profile(Profile {
            id: user_id,
            username: "ana".to_owned(),
            avatar_url: Some("missing-object.png".to_owned()),
            updated_at: Utc::now(),
        })
        .await
        .expect("profile upsert should succeed");

    let loaded = harness
        .service
        .load_profile(user_id)
        .await
        .expect("load should succeed")
        .expect("profile exists");

    assert_eq!(loaded.profile.username, "ana");
    assert_eq!(loaded.avatar, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn load_profile_returns_none_for_unknown_users(harness: Harness) {
    let loaded = harness
        .service
        .load_profile(UserId::new())
        .await
        .expect("load should succeed");
    assert!(loaded.is_none());
}
