use super::support::{
    ADMIN_EMAIL, FakeDirectory, OWNER_EMAIL, PASSWORD, is_settled_dashboard, wait_for_notification,
    wait_for_view,
};
use crate::{
    AdminAllowList, AuthMode, Command, Controller, ControllerConfig, ControllerHandle, Severity,
    View, messages,
};

use mt_core::RecordStatus;
use mt_db::Directory;

use std::sync::Arc;
use std::time::Duration;

use googletest::prelude::*;

fn config() -> ControllerConfig {
    ControllerConfig {
        admins: AdminAllowList::new([ADMIN_EMAIL]),
        ..ControllerConfig::default()
    }
}

/// Controller started with `email` already signed in and its first list loaded.
async fn signed_in(directory: &Arc<FakeDirectory>, email: &str) -> ControllerHandle {
    directory.sign_in(email, PASSWORD).await.unwrap();
    let handle = Controller::spawn(directory.clone(), config());
    wait_for_view(&handle, is_settled_dashboard).await;
    handle
}

fn owner_with_records() -> Arc<FakeDirectory> {
    let directory = FakeDirectory::new();
    directory.seed_user(OWNER_EMAIL, "12가3456");
    directory.seed_user(ADMIN_EMAIL, "admin-car");
    directory.seed_record("12가3456", "엔진오일교체", "2024-01-10", 30);
    directory.seed_record("34나5678", "타이어교체", "2024-02-01", 20);
    directory
}

#[tokio::test(start_paused = true)]
async fn given_no_session_when_started_then_auth_view_and_mode_toggles() {
    let directory = FakeDirectory::new();
    let handle = Controller::spawn(directory.clone(), config());

    assert!(handle.current_view().is_auth());

    handle.send(Command::ToggleAuthMode).await.unwrap();
    let view = wait_for_view(&handle, |v| {
        matches!(v, View::Auth(auth) if auth.mode == AuthMode::Register)
    })
    .await;

    assert!(view.is_auth());
    assert_that!(directory.query_calls(), eq(0));
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_auth_view_when_login_sent_then_dashboard_loads_owner_records() {
    let directory = owner_with_records();
    let handle = Controller::spawn(directory.clone(), config());

    handle
        .send(Command::Login {
            email: OWNER_EMAIL.to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();
    let view = wait_for_view(&handle, is_settled_dashboard).await;

    let dashboard = view.as_dashboard().unwrap();
    assert_that!(dashboard.email, eq(OWNER_EMAIL));
    assert_that!(dashboard.is_admin, eq(false));
    assert_that!(dashboard.show_add_button, eq(false));
    assert_that!(dashboard.cards, len(eq(1)));
    assert_that!(dashboard.cards[0].car_identifier, eq("12가3456"));
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_rapid_keystrokes_when_typing_then_one_list_call_after_last() {
    let directory = owner_with_records();
    let handle = signed_in(&directory, OWNER_EMAIL).await;
    let before = directory.query_calls();

    for text in ["엔", "엔진", "엔진 12가"] {
        handle
            .send(Command::SearchInput {
                text: text.to_string(),
            })
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_that!(directory.query_calls(), eq(before));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_that!(directory.query_calls(), eq(before + 1));

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_that!(directory.query_calls(), eq(before + 1));

    let view = wait_for_view(&handle, is_settled_dashboard).await;
    let dashboard = view.as_dashboard().unwrap();
    assert_that!(dashboard.search_text, eq("엔진 12가"));
    assert_that!(dashboard.cards, len(eq(1)));
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_slow_older_load_when_newer_finishes_first_then_older_dropped() {
    let directory = owner_with_records();
    let handle = signed_in(&directory, OWNER_EMAIL).await;

    directory.delay_next_query(Duration::from_secs(1));
    handle.send(Command::Refresh).await.unwrap();
    handle
        .send(Command::SearchInput {
            text: "없음".to_string(),
        })
        .await
        .unwrap();

    // Debounced search resolves at 300ms, the slow refresh at 1s
    tokio::time::sleep(Duration::from_secs(2)).await;

    let view = handle.current_view();
    let dashboard = view.as_dashboard().unwrap();
    assert!(dashboard.cards.is_empty());
    assert!(!dashboard.loading);
    assert_that!(dashboard.empty_message, some(eq(messages::NO_SEARCH_RESULTS)));
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_pending_record_when_owner_approves_then_actions_disappear() {
    let directory = owner_with_records();
    let handle = signed_in(&directory, OWNER_EMAIL).await;
    let approve = handle.current_view().as_dashboard().unwrap().cards[0].actions[0]
        .command
        .clone();

    handle.send(approve).await.unwrap();
    let view = wait_for_view(&handle, |v| {
        v.as_dashboard().is_some_and(|d| {
            !d.loading && d.cards.first().is_some_and(|c| c.actions.is_empty())
        })
    })
    .await;

    let card = &view.as_dashboard().unwrap().cards[0];
    assert_that!(card.status.status, eq(RecordStatus::Approved));
    assert_that!(
        directory.record(card.id).unwrap().status,
        eq(RecordStatus::Approved)
    );
    assert_that!(
        handle.current_notification().unwrap().message,
        eq(messages::RECORD_APPROVED)
    );
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_admin_when_approving_then_rejected_as_owner_only() {
    let directory = owner_with_records();
    let record = directory.seed_record("12가3456", "세차", "2024-05-01", 1);
    let handle = signed_in(&directory, ADMIN_EMAIL).await;

    handle
        .send(Command::Approve {
            record_id: record.id,
        })
        .await
        .unwrap();
    wait_for_notification(&handle, |n| n.message == messages::OWNER_ONLY).await;

    assert_that!(
        directory.record(record.id).unwrap().status,
        eq(RecordStatus::Pending)
    );
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_admin_when_creating_record_then_card_shows_creator() {
    let directory = owner_with_records();
    let handle = signed_in(&directory, ADMIN_EMAIL).await;
    assert!(handle.current_view().as_dashboard().unwrap().show_add_button);

    handle
        .send(Command::CreateRecord {
            car_identifier: "56 다 7890".to_string(),
            date: "2024-06-01".to_string(),
            record_type: "타이어교체".to_string(),
            description: "뒷바퀴".to_string(),
        })
        .await
        .unwrap();
    let view = wait_for_view(&handle, |v| {
        v.as_dashboard()
            .is_some_and(|d| !d.loading && d.cards.iter().any(|c| c.car_identifier == "56다7890"))
    })
    .await;

    let card = view
        .as_dashboard()
        .unwrap()
        .cards
        .iter()
        .find(|c| c.car_identifier == "56다7890")
        .unwrap();
    assert_that!(card.admin_email, some(eq(ADMIN_EMAIL)));
    assert!(card.actions.is_empty());
    assert_that!(card.status.status, eq(RecordStatus::Pending));
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_owner_when_creating_record_then_admin_only_warning() {
    let directory = owner_with_records();
    let handle = signed_in(&directory, OWNER_EMAIL).await;
    let before = directory.record_count();

    handle
        .send(Command::CreateRecord {
            car_identifier: "12가3456".to_string(),
            date: "2024-06-01".to_string(),
            record_type: "세차".to_string(),
            description: String::new(),
        })
        .await
        .unwrap();
    let shown = wait_for_notification(&handle, |n| n.message == messages::ADMIN_ONLY).await;

    assert_that!(shown.severity, eq(Severity::Warning));
    assert_that!(directory.record_count(), eq(before));
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_malformed_date_when_creating_record_then_validation_warning() {
    let directory = owner_with_records();
    let handle = signed_in(&directory, ADMIN_EMAIL).await;
    let before = directory.record_count();

    handle
        .send(Command::CreateRecord {
            car_identifier: "12가3456".to_string(),
            date: "2024/06/01".to_string(),
            record_type: "세차".to_string(),
            description: String::new(),
        })
        .await
        .unwrap();
    wait_for_notification(&handle, |n| n.message == messages::INVALID_DATE).await;

    assert_that!(directory.record_count(), eq(before));
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_owner_when_car_identifier_changed_then_list_follows_new_car() {
    let directory = owner_with_records();
    let handle = signed_in(&directory, OWNER_EMAIL).await;

    handle
        .send(Command::ChangeCarIdentifier {
            car_identifier: "34 나 5678".to_string(),
        })
        .await
        .unwrap();
    let view = wait_for_view(&handle, |v| {
        v.as_dashboard()
            .is_some_and(|d| !d.loading && d.car_identifier == "34나5678")
    })
    .await;

    let dashboard = view.as_dashboard().unwrap();
    assert_that!(dashboard.cards, len(eq(1)));
    assert_that!(dashboard.cards[0].title, eq("타이어교체"));
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_dashboard_when_logout_sent_then_auth_view_and_search_cleared() {
    let directory = owner_with_records();
    let handle = signed_in(&directory, OWNER_EMAIL).await;
    handle
        .send(Command::SearchInput {
            text: "엔진".to_string(),
        })
        .await
        .unwrap();

    handle.send(Command::Logout).await.unwrap();
    let view = wait_for_view(&handle, View::is_auth).await;

    assert!(matches!(view, View::Auth(auth) if auth.mode == AuthMode::Login));
    let queries = directory.query_calls();
    // The pending debounced search must not fire after sign-out
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_that!(directory.query_calls(), eq(queries));
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_profile_lookup_failure_when_session_starts_then_forced_back_to_auth() {
    let directory = owner_with_records();
    directory.fail_get_profile(true);
    let handle = Controller::spawn(directory.clone(), config());

    directory.sign_in(OWNER_EMAIL, PASSWORD).await.unwrap();
    let shown =
        wait_for_notification(&handle, |n| n.message == messages::PROFILE_LOAD_FAILED).await;

    assert_that!(shown.severity, eq(Severity::Error));
    assert!(handle.current_view().is_auth());
    assert!(directory.session().borrow().is_none());
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_missing_profile_when_signed_in_then_dashboard_loads_recovered_profile() {
    let directory = FakeDirectory::new();
    directory.seed_account("lost@example.com", PASSWORD);
    directory.seed_record("lost", "엔진오일교체", "2024-01-10", 5);
    let handle = Controller::spawn(directory.clone(), config());

    directory.sign_in("lost@example.com", PASSWORD).await.unwrap();
    let view = wait_for_view(&handle, is_settled_dashboard).await;

    let dashboard = view.as_dashboard().unwrap();
    assert_that!(dashboard.car_identifier, eq("lost"));
    assert_that!(dashboard.cards, len(eq(1)));
    assert_that!(directory.profile_writes(), eq(1));
    assert_that!(
        handle.current_notification().unwrap().message,
        eq(messages::PROFILE_RECOVERED)
    );
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_failing_queries_when_refreshed_then_error_notified() {
    let directory = owner_with_records();
    let handle = signed_in(&directory, OWNER_EMAIL).await;
    directory.fail_queries(true);

    handle.send(Command::Refresh).await.unwrap();
    let shown = wait_for_notification(&handle, |n| n.severity == Severity::Error).await;

    assert!(shown.message.starts_with(messages::LIST_LOAD_FAILED));
    let view = wait_for_view(&handle, is_settled_dashboard).await;
    assert!(view.as_dashboard().unwrap().cards.is_empty());
    handle.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn given_stopped_controller_when_sending_then_error() {
    let directory = FakeDirectory::new();
    let handle = Controller::spawn(directory, config());

    handle.send(Command::Shutdown).await.unwrap();
    // Allow the task to exit and drop its receiver
    tokio::time::sleep(Duration::from_millis(10)).await;

    let result = handle.send(Command::Refresh).await;
    assert!(matches!(result, Err(crate::AppError::ControllerStopped { .. })));
}

#[tokio::test(start_paused = true)]
async fn given_session_published_by_directory_when_observed_then_dashboard_follows() {
    let directory = owner_with_records();
    let owner = directory.seed_user("second@example.com", "34나5678");
    let handle = Controller::spawn(directory.clone(), config());

    directory.publish_session(Some(owner));
    let view = wait_for_view(&handle, is_settled_dashboard).await;
    let dashboard = view.as_dashboard().unwrap();
    assert_that!(dashboard.email, eq("second@example.com"));
    assert_that!(dashboard.cards, len(eq(1)));

    directory.publish_session(None);
    wait_for_view(&handle, View::is_auth).await;
    assert_that!(directory.sign_out_calls(), eq(0));
    handle.shutdown().await;
}
