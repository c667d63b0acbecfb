//! Behavioural tests for session and profile flows.
#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use mockable::DefaultClock;
use quadro::board::{
    adapters::memory::{InMemoryAuthGateway, InMemoryBlobStorage},
    ports::{AuthError, Credentials},
    services::{ProfileError, ProfileService},
};
use std::sync::Arc;

type TestService = ProfileService<InMemoryAuthGateway, InMemoryBlobStorage, DefaultClock>;

fn service() -> (TestService, Arc<InMemoryBlobStorage>) {
    let blobs = Arc::new(InMemoryBlobStorage::new());
    let service = ProfileService::new(
        Arc::new(InMemoryAuthGateway::new()),
        Arc::clone(&blobs),
        Arc::new(DefaultClock),
    );
    (service, blobs)
}

#[tokio::test(flavor = "multi_thread")]
async fn account_lifecycle_from_sign_up_to_sign_out() {
    let (service, _) = service();
    let mut changes = service.session_changes();

    let session = service
        .sign_up(Credentials::new("marcos@example.com", "s3cret"))
        .await
        .expect("sign up should succeed");
    changes.changed().await.expect("sign-up published");

    service.sign_out().await.expect("sign out should succeed");
    changes.changed().await.expect("sign-out published");
    assert_eq!(changes.borrow().clone(), None);

    let back = service
        .sign_in(Credentials::new("marcos@example.com", "s3cret"))
        .await
        .expect("sign in should succeed");
    assert_eq!(back.user_id, session.user_id);
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_sign_up_is_rejected() {
    let (service, _) = service();
    service
        .sign_up(Credentials::new("marcos@example.com", "s3cret"))
        .await
        .expect("first sign up should succeed");

    let result = service
        .sign_up(Credentials::new("marcos@example.com", "other"))
        .await;

    assert!(matches!(
        result,
        Err(ProfileError::Auth(AuthError::EmailTaken(_)))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_with_avatar_round_trips() {
    let (service, blobs) = service();
    let session = service
        .sign_up(Credentials::new("ana@example.com", "hunter2"))
        .await
        .expect("sign up should succeed");

    service
        .update_username(session.user_id, "ana")
        .await
        .expect("username should persist");
    service
        .upload_avatar(session.user_id, "jpg", vec![0xff, 0xd8])
        .await
        .expect("avatar should upload");

    let loaded = service
        .load_profile(session.user_id)
        .await
        .expect("load should succeed")
        .expect("profile exists");
    assert_eq!(loaded.profile.username, "ana");
    assert_eq!(loaded.avatar, Some(vec![0xff, 0xd8]));
    assert_eq!(blobs.paths().expect("paths readable").len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn password_reset_request_is_accepted_for_any_address() {
    let (service, _) = service();
    service
        .request_password_reset("unknown@example.com")
        .await
        .expect("reset request should be accepted");
}
