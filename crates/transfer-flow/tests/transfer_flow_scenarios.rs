//! End-to-end transfer flow scenarios.
//!
//! Each test drives a real `FlowRuntime` through its `FlowHandle` on a
//! paused tokio clock, so auth and toast timers fire deterministically.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, TimeZone};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use transfer_flow::adapters::{FixedClock, InMemoryClipboard, InMemoryDisplayBus};
use transfer_flow::domain::AuthPhase;
use transfer_flow::{
    FlowError, FlowHandle, FlowRuntime, Recipient, RecipientDirectory, ScreenId, TransferConfig,
    TransferFlowApi, TransferFlowService,
};

// =============================================================================
// HARNESS
// =============================================================================

struct App {
    handle: FlowHandle,
    display: Arc<InMemoryDisplayBus>,
    clipboard: Arc<InMemoryClipboard>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<TransferFlowService>,
}

impl App {
    fn start() -> Self {
        Self::start_with(TransferConfig::default())
    }

    fn start_with(config: TransferConfig) -> Self {
        let display = Arc::new(InMemoryDisplayBus::new());
        let clipboard = Arc::new(InMemoryClipboard::new());
        let clock = Arc::new(FixedClock::new(
            Local.with_ymd_and_hms(2026, 10, 19, 14, 5, 0).unwrap(),
        ));
        let (handle, runtime) =
            FlowRuntime::build(config, display.clone(), clipboard.clone(), clock).unwrap();
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(runtime.run(shutdown_rx));
        Self {
            handle,
            display,
            clipboard,
            shutdown,
            task,
        }
    }

    async fn type_amount(&self, digits: &str) {
        for d in digits.chars() {
            self.handle.append_digit(d).await.unwrap();
        }
    }

    async fn screen(&self) -> ScreenId {
        self.handle.status().await.unwrap().active_screen
    }

    async fn stop(self) -> TransferFlowService {
        self.shutdown.send(true).unwrap();
        self.task.await.unwrap()
    }
}

fn alice() -> Recipient {
    Recipient::new("Alice", "ABC", "123")
}

async fn elapse(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

// =============================================================================
// HAPPY PATH
// =============================================================================

#[tokio::test(start_paused = true)]
async fn alice_500_reaches_success_after_both_delays() {
    let app = App::start();

    app.handle.activate(ScreenId::Recipient).await.unwrap();
    app.handle.select_recipient(alice()).await.unwrap();
    assert_eq!(app.screen().await, ScreenId::Amount);

    app.type_amount("500").await;
    let status = app.handle.status().await.unwrap();
    assert!(status.verdict.allowed);
    assert!(status.view.amount.next_enabled);

    app.handle.activate(ScreenId::Auth).await.unwrap();
    assert_eq!(
        app.handle.status().await.unwrap().auth_phase,
        AuthPhase::InProgress
    );

    elapse(2_050).await;
    let status = app.handle.status().await.unwrap();
    assert_eq!(status.auth_phase, AuthPhase::Succeeded);
    assert_eq!(status.active_screen, ScreenId::Auth);

    elapse(1_500).await;
    let status = app.handle.status().await.unwrap();
    assert_eq!(status.active_screen, ScreenId::Success);
    let success = status.view.success.expect("success summary");
    let card = success.recipient.expect("recipient card");
    assert_eq!(card.name, "Alice");
    assert_eq!(card.account_line, "ABC 123");
    assert_eq!(success.amount_text, "NT$500");

    let service = app.stop().await;
    assert_eq!(service.last_receipt().map(|r| r.amount), Some(500));
}

#[tokio::test(start_paused = true)]
async fn share_copies_receipt_and_shows_toast() {
    let app = App::start();
    app.handle.select_recipient(alice()).await.unwrap();
    app.type_amount("500").await;
    app.handle.set_memo("lunch".into()).await.unwrap();
    app.handle.activate(ScreenId::Auth).await.unwrap();
    elapse(3_600).await;

    app.handle.share().await.unwrap();
    let text = app.clipboard.contents().expect("copied");
    assert!(text.contains("Recipient: Alice"));
    assert!(text.contains("Amount: NT$500"));
    assert!(text.ends_with("Memo: lunch"));
    assert_eq!(
        app.display.latest().unwrap().toast.as_deref(),
        Some("Transaction details copied to clipboard")
    );
}

// =============================================================================
// VALIDATION
// =============================================================================

#[tokio::test(start_paused = true)]
async fn amount_over_limit_blocks_auth() {
    let app = App::start();
    app.handle.select_recipient(alice()).await.unwrap();
    app.type_amount("60000").await;

    let view = app.display.latest().unwrap();
    assert!(!view.amount.next_enabled);
    assert_eq!(
        view.amount.warning.as_deref(),
        Some("Single transfer limit is NT$50,000")
    );

    let err = app.handle.activate(ScreenId::Auth).await.unwrap_err();
    assert!(matches!(err, FlowError::AmountNotAllowed { amount: 60_000, .. }));
    assert_eq!(app.screen().await, ScreenId::Amount);
}

#[tokio::test(start_paused = true)]
async fn quick_amounts_accumulate_and_validate() {
    let app = App::start_with(TransferConfig::default().with_limits(50_000, 12_000));
    app.handle.select_recipient(alice()).await.unwrap();
    app.handle.add_quick_amount(10_000).await.unwrap();
    app.handle.add_quick_amount(1_000).await.unwrap();
    assert!(app.handle.status().await.unwrap().verdict.allowed);

    app.handle.add_quick_amount(5_000).await.unwrap();
    let view = app.display.latest().unwrap();
    assert_eq!(view.amount.amount_text, "16,000");
    assert_eq!(view.amount.warning.as_deref(), Some("Insufficient balance"));
}

#[tokio::test(start_paused = true)]
async fn unknown_screen_name_is_rejected() {
    let app = App::start();
    assert_eq!(
        app.handle.activate_by_name("settings").await.unwrap_err(),
        FlowError::InvalidScreenId {
            raw: "settings".into()
        }
    );
    app.handle.activate_by_name("recipient-screen").await.unwrap();
    assert_eq!(app.screen().await, ScreenId::Recipient);
}

// =============================================================================
// NAVIGATION
// =============================================================================

#[tokio::test(start_paused = true)]
async fn home_from_success_resets_everything() {
    let app = App::start();
    app.handle.select_recipient(alice()).await.unwrap();
    app.type_amount("500").await;
    app.handle.activate(ScreenId::Auth).await.unwrap();
    elapse(3_600).await;
    assert_eq!(app.screen().await, ScreenId::Success);

    app.handle.activate(ScreenId::Home).await.unwrap();
    let status = app.handle.status().await.unwrap();
    assert_eq!(status.transfer.amount, 0);
    assert!(status.transfer.recipient.is_none());
    assert_eq!(status.transfer.memo, "");
    assert_eq!(status.auth_phase, AuthPhase::Idle);
    assert!(status.view.selected.is_none());
}

#[tokio::test(start_paused = true)]
async fn home_from_amount_clears_warning() {
    let app = App::start();
    app.handle.select_recipient(alice()).await.unwrap();
    app.type_amount("99999").await;
    app.handle.activate(ScreenId::Home).await.unwrap();

    let view = app.display.latest().unwrap();
    assert_eq!(view.active_screen, ScreenId::Home);
    assert!(view.amount.warning.is_none());
    assert_eq!(view.amount.amount, 0);
}

#[tokio::test(start_paused = true)]
async fn leaving_auth_early_never_commits() {
    let app = App::start();
    app.handle.select_recipient(alice()).await.unwrap();
    app.type_amount("500").await;
    app.handle.activate(ScreenId::Auth).await.unwrap();

    elapse(2_500).await;
    assert_eq!(
        app.handle.status().await.unwrap().auth_phase,
        AuthPhase::Succeeded
    );
    app.handle.activate(ScreenId::Amount).await.unwrap();

    elapse(10_000).await;
    let status = app.handle.status().await.unwrap();
    assert_eq!(status.active_screen, ScreenId::Amount);
    assert_eq!(status.auth_phase, AuthPhase::Idle);
    assert!(status.last_receipt.is_none());
    assert_eq!(status.transfer.amount, 500);
}

#[tokio::test(start_paused = true)]
async fn reentering_amount_keeps_state() {
    let app = App::start();
    app.handle.select_recipient(alice()).await.unwrap();
    app.type_amount("1234").await;
    let before = app.handle.status().await.unwrap();

    app.handle.activate(ScreenId::Amount).await.unwrap();
    app.handle.activate(ScreenId::Amount).await.unwrap();
    let after = app.handle.status().await.unwrap();

    assert_eq!(after.transfer, before.transfer);
    assert_eq!(after.view.amount, before.view.amount);
    assert_eq!(after.view.selected, before.view.selected);
}

#[tokio::test(start_paused = true)]
async fn directory_search_feeds_selection() {
    let directory = RecipientDirectory::from_json(
        r#"[
            {"name": "Alice Chen", "bank": "Cathay", "account": "***1234"},
            {"name": "Bob Lin", "bank": "E.Sun", "account": "***5678"}
        ]"#,
    )
    .unwrap();
    let hits = directory.filter("esun");
    assert!(hits.is_empty());
    let hits = directory.filter("e.sun");
    assert_eq!(hits.len(), 1);

    let app = App::start();
    app.handle.select_recipient(hits[0].clone()).await.unwrap();
    let card = app.display.latest().unwrap().selected.unwrap();
    assert_eq!(card.avatar, "B");
    assert_eq!(card.account_line, "E.Sun ***5678");
}
