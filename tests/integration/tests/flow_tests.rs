//! End-to-end use-case flows
//!
//! Every test wires the services over fresh in-memory repositories.
//!
//! Run with: cargo test -p integration-tests --test flow_tests

use instalike_core::{DomainEvent, Snowflake};
use instalike_service::dto::{ChangePasswordRequest, EditUserDetailsRequest};
use integration_tests::{
    assert_status, comment_request, picture_payload, post_request, registration, test_config,
    unique_registration, TestApp, TEST_PASSWORD,
};

// ============================================================================
// Account Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    let app = TestApp::start();
    let request = unique_registration();
    let nickname = request.nickname.clone();

    let user_id = app.register_with(request).await.unwrap();
    let user = app.accounts().authenticate(&nickname, TEST_PASSWORD).await.unwrap();

    assert_eq!(user.nickname().as_str(), nickname);
    assert_eq!(
        app.event_types().await,
        vec!["USER_REGISTERED", "USER_LOGGED_IN"]
    );
    assert_eq!(app.events().await[0].actor_id(), user_id);
}

#[tokio::test]
async fn test_register_duplicate_nickname() {
    let app = TestApp::start();
    app.register("taken").await.unwrap();

    let mut again = registration("taken");
    again.email = "someone-else@example.com".to_string();

    let result = app.accounts().register(again).await;
    assert_status(result, 409).unwrap();
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::start();
    app.register("first").await.unwrap();

    let mut again = registration("second");
    again.email = "first@example.com".to_string();

    let result = app.accounts().register(again).await;
    assert_status(result, 409).unwrap();
}

#[tokio::test]
async fn test_register_reports_every_invalid_field() {
    let app = TestApp::start();
    let mut request = registration("ok");
    request.nickname = "has space".to_string();
    request.surname = "   ".to_string();

    let err = assert_status(app.accounts().register(request).await, 400).unwrap();
    let message = err.to_string();
    assert!(message.contains("Nickname cannot contain spaces"));
    assert!(message.contains("Surname cannot be empty"));
}

#[tokio::test]
async fn test_strong_password_policy() {
    let mut config = test_config();
    config.security.strong_passwords = true;
    let app = TestApp::start_with_config(config);

    let mut request = registration("weak");
    request.password = "alllowercase".to_string();
    assert_status(app.accounts().register(request).await, 400).unwrap();

    // Fixture password has mixed case and a digit
    app.register("strong").await.unwrap();
}

#[tokio::test]
async fn test_authentication_fails_uniformly() {
    let app = TestApp::start();
    app.register("member").await.unwrap();

    let unknown = assert_status(
        app.accounts().authenticate("stranger", TEST_PASSWORD).await,
        401,
    )
    .unwrap();
    let wrong = assert_status(app.accounts().authenticate("member", "WrongPass1").await, 401)
        .unwrap();

    assert_eq!(unknown.to_string(), "Username or password are not valid.");
    assert_eq!(unknown.to_string(), wrong.to_string());
    assert!(app.event_types().await.iter().all(|t| *t != "USER_LOGGED_IN"));
}

#[tokio::test]
async fn test_edit_details_and_reset_picture() {
    let app = TestApp::start();
    let mut request = registration("painter");
    request.profile_picture = Some(picture_payload(32));
    let user_id = app.register_with(request).await.unwrap();

    let updated = app
        .accounts()
        .edit_details(EditUserDetailsRequest {
            user_id,
            nickname: "sculptor".to_string(),
            name: "New".to_string(),
            surname: "Name".to_string(),
            email: "sculptor@example.com".to_string(),
            biography: "Changed careers".to_string(),
            profile_picture: None,
        })
        .await
        .unwrap();

    assert_eq!(updated.nickname, "sculptor");
    assert_eq!(updated.surname, "Name");
    assert!(updated.profile_picture.starts_with("data:image/png;base64,"));

    // The old nickname is free again
    app.register("painter").await.unwrap();
    assert!(app.accounts().authenticate("sculptor", TEST_PASSWORD).await.is_ok());
}

#[tokio::test]
async fn test_edit_details_rejects_taken_nickname() {
    let app = TestApp::start();
    app.register("first").await.unwrap();
    let second = app.register("second").await.unwrap();

    let result = app
        .accounts()
        .edit_details(EditUserDetailsRequest {
            user_id: second,
            nickname: "first".to_string(),
            name: "Test".to_string(),
            surname: "User".to_string(),
            email: "second@example.com".to_string(),
            biography: String::new(),
            profile_picture: None,
        })
        .await;

    assert_status(result, 409).unwrap();
}

#[tokio::test]
async fn test_change_password_then_login() {
    let app = TestApp::start();
    let user_id = app.register("rotator").await.unwrap();

    app.accounts()
        .change_password(ChangePasswordRequest {
            user_id,
            current_password: TEST_PASSWORD.to_string(),
            new_password: "Rotated456".to_string(),
        })
        .await
        .unwrap();

    assert!(app.accounts().authenticate("rotator", TEST_PASSWORD).await.is_err());
    assert!(app.accounts().authenticate("rotator", "Rotated456").await.is_ok());
}

#[tokio::test]
async fn test_logout_dispatches_event() {
    let app = TestApp::start();
    let user_id = app.register("leaver").await.unwrap();

    app.accounts().logout(user_id).await.unwrap();

    let events = app.events().await;
    let Some(DomainEvent::UserLoggedOut(event)) = events.last() else {
        panic!("expected a logout event, got {events:?}");
    };
    assert_eq!(event.user_id, user_id);
    assert_eq!(event.nickname.as_str(), "leaver");
}

// ============================================================================
// Social Tests
// ============================================================================

#[tokio::test]
async fn test_follow_notifies_followed_user() {
    let app = TestApp::start();
    let alice = app.register("alice").await.unwrap();
    let bob = app.register("bob").await.unwrap();

    app.social().follow(alice, "bob").await.unwrap();

    let unread = app.notifications().unread_for(bob).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].sender_nickname, "alice");
    assert_eq!(
        unread[0].message,
        "<a href=\"https://insta.test/profile/alice\">alice</a> started following you."
    );
    assert!(app.notifications().unread_for(alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_follow_notification_escapes_nickname_markup() {
    let app = TestApp::start();
    let mut request = registration("mallory");
    request.nickname = "<b>mallory</b>".to_string();
    let mallory = app.register_with(request).await.unwrap();
    let bob = app.register("bob").await.unwrap();

    app.social().follow(mallory, "bob").await.unwrap();

    let unread = app.notifications().unread_for(bob).await.unwrap();
    assert_eq!(unread[0].sender_nickname, "<b>mallory</b>");
    assert!(unread[0]
        .message
        .starts_with("<a href=\"https://insta.test/profile/%3Cb%3Emallory%3C%2Fb%3E\">&lt;b&gt;"));
    assert!(!unread[0].message.contains("<b>"));
}

#[tokio::test]
async fn test_follow_twice_conflicts() {
    let app = TestApp::start();
    let alice = app.register("alice").await.unwrap();
    app.register("bob").await.unwrap();

    app.social().follow(alice, "bob").await.unwrap();
    assert_status(app.social().follow(alice, "bob").await, 409).unwrap();
}

#[tokio::test]
async fn test_self_follow_rejected() {
    let app = TestApp::start();
    let alice = app.register("alice").await.unwrap();

    assert_status(app.social().follow(alice, "alice").await, 422).unwrap();
    assert!(app.notifications().all_for(alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unfollow_restores_profile() {
    let app = TestApp::start();
    let alice = app.register("alice").await.unwrap();
    app.register("bob").await.unwrap();

    app.social().follow(alice, "bob").await.unwrap();
    app.social().unfollow(alice, "bob").await.unwrap();

    let profile = app.social().profile("bob", Some(alice)).await.unwrap();
    assert_eq!(profile.followers_count, 0);
    assert_eq!(profile.followed_by_viewer, Some(false));
    assert_eq!(
        app.event_types().await.last().copied(),
        Some("USER_UNFOLLOWED")
    );
}

#[tokio::test]
async fn test_timeline_shows_followed_posts() {
    let app = TestApp::start();
    let reader = app.register("reader").await.unwrap();
    let writer = app.register("writer").await.unwrap();
    let stranger = app.register("stranger").await.unwrap();

    app.posts().publish(post_request(writer, "followed")).await.unwrap();
    app.posts().publish(post_request(stranger, "ignored")).await.unwrap();
    app.social().follow(reader, "writer").await.unwrap();

    let timeline = app.social().timeline(reader).await.unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].text, "followed");
    assert_eq!(timeline[0].liked_by_viewer, Some(false));
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_like_produces_exactly_one_notification() {
    let app = TestApp::start();
    let author = app.register("author").await.unwrap();
    let fan = app.register("fan").await.unwrap();
    let post_id = app.posts().publish(post_request(author, "sunset")).await.unwrap();

    app.posts().like(post_id, fan).await.unwrap();

    let unread = app.notifications().unread_for(author).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(
        unread[0].message,
        format!(
            "<a href=\"https://insta.test/profile/fan\">fan</a> liked your \
             <a href=\"https://insta.test/post/{post_id}\">post.</a>"
        )
    );
    assert!(app.notifications().all_for(fan).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unlike_sends_no_notification() {
    let app = TestApp::start();
    let author = app.register("author").await.unwrap();
    let fan = app.register("fan").await.unwrap();
    let post_id = app.posts().publish(post_request(author, "")).await.unwrap();

    app.posts().like(post_id, fan).await.unwrap();
    app.posts().unlike(post_id, fan).await.unwrap();

    assert_eq!(app.notifications().all_for(author).await.unwrap().len(), 1);
    assert_eq!(app.posts().find(post_id, Some(fan)).await.unwrap().liked_by_viewer, Some(false));
}

#[tokio::test]
async fn test_comment_notifies_author_but_not_self() {
    let app = TestApp::start();
    let author = app.register("author").await.unwrap();
    let fan = app.register("fan").await.unwrap();
    let post_id = app.posts().publish(post_request(author, "")).await.unwrap();

    app.posts()
        .comment(comment_request(post_id, fan, "Great shot"))
        .await
        .unwrap();
    app.posts()
        .comment(comment_request(post_id, author, "Thanks!"))
        .await
        .unwrap();

    let unread = app.notifications().unread_for(author).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert!(unread[0].message.contains("wrote a comment"));

    let post = app.posts().find(post_id, None).await.unwrap();
    assert_eq!(post.comments.len(), 2);
}

async fn rename(app: &TestApp, user_id: Snowflake, nickname: &str) {
    app.accounts()
        .edit_details(EditUserDetailsRequest {
            user_id,
            nickname: nickname.to_string(),
            name: "Test".to_string(),
            surname: "User".to_string(),
            email: format!("{nickname}@example.com"),
            biography: String::new(),
            profile_picture: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_renamed_users_show_current_nickname() {
    let app = TestApp::start();
    let author = app.register("author").await.unwrap();
    let fan = app.register("fan").await.unwrap();
    let post_id = app.posts().publish(post_request(author, "sunset")).await.unwrap();
    app.posts().like(post_id, fan).await.unwrap();
    app.posts()
        .comment(comment_request(post_id, fan, "Great shot"))
        .await
        .unwrap();

    rename(&app, author, "photographer").await;
    rename(&app, fan, "admirer").await;

    let post = app.posts().find(post_id, None).await.unwrap();
    assert_eq!(post.author_nickname, "photographer");
    assert_eq!(post.comments[0].author_nickname, "admirer");

    let listed = app.posts().posts_by("photographer").await.unwrap();
    assert_eq!(listed[0].author_nickname, "photographer");
    assert_status(app.posts().posts_by("author").await, 404).unwrap();

    let unread = app.notifications().unread_for(author).await.unwrap();
    assert_eq!(unread.len(), 2);
    assert!(unread.iter().all(|n| n.sender_nickname == "admirer"));
}

#[tokio::test]
async fn test_blank_comment_rejected() {
    let app = TestApp::start();
    let author = app.register("author").await.unwrap();
    let post_id = app.posts().publish(post_request(author, "")).await.unwrap();

    let result = app.posts().comment(comment_request(post_id, author, "    ")).await;
    assert_status(result, 400).unwrap();
}

#[tokio::test]
async fn test_oversized_picture_rejected() {
    let mut config = test_config();
    config.media.max_picture_kb = 1;
    let app = TestApp::start_with_config(config);
    let author = app.register("author").await.unwrap();

    let mut request = post_request(author, "too big");
    request.picture = picture_payload(4096);

    assert_status(app.posts().publish(request).await, 413).unwrap();
    assert!(app.posts().posts_by("author").await.unwrap().is_empty());
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_mark_notification_as_read() {
    let app = TestApp::start();
    let alice = app.register("alice").await.unwrap();
    let bob = app.register("bob").await.unwrap();
    app.social().follow(alice, "bob").await.unwrap();

    let unread = app.notifications().unread_for(bob).await.unwrap();
    let notification_id: Snowflake = unread[0].id.parse().unwrap();

    // Only the recipient may acknowledge it
    assert_status(
        app.notifications().mark_as_read(alice, notification_id).await,
        404,
    )
    .unwrap();

    app.notifications().mark_as_read(bob, notification_id).await.unwrap();
    assert!(app.notifications().unread_for(bob).await.unwrap().is_empty());
    assert!(app.notifications().all_for(bob).await.unwrap()[0].read);
}

// ============================================================================
// Missing Entity Tests
// ============================================================================

#[tokio::test]
async fn test_missing_entities_are_not_found() {
    let app = TestApp::start();
    let user = app.register("lonely").await.unwrap();
    let ghost = Snowflake::new(424_242);

    assert_status(app.posts().like(ghost, user).await, 404).unwrap();
    assert_status(app.posts().publish(post_request(ghost, "")).await, 404).unwrap();
    assert_status(app.social().follow(user, "nobody").await, 404).unwrap();
    assert_status(app.social().follow(ghost, "lonely").await, 404).unwrap();
    assert_status(app.accounts().logout(ghost).await, 404).unwrap();
}

#[test]
fn test_events_serialize_with_type_tag() {
    let event = DomainEvent::UserLoggedIn(instalike_core::events::UserLoggedInEvent::new(
        Snowflake::new(7),
        instalike_core::Nickname::create("tagged").unwrap(),
    ));

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "USER_LOGGED_IN");
    assert_eq!(json["nickname"], "tagged");
}
