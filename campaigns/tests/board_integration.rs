//! Integration tests for the ticket board flow.
//!
//! Exercises the paged fetch, the refresh-on-change contract, and the
//! batched reservation/release round trips against the in-memory mock
//! gateway, both through a running store and at the reducer level.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use rifaqui_campaigns::{
    actions::CampaignAction,
    environment::CampaignEnvironment,
    mocks::MockCampaignGateway,
    reducers::CampaignReducer,
    state::{
        Campaign, CampaignId, CampaignState, CustomerData, LoadPhase, Money, Ticket, TicketStatus,
        UserId,
    },
};
use rifaqui_core::Clock;
use rifaqui_core::reducer::Reducer;
use rifaqui_runtime::Store;
use rifaqui_testing::assertions;
use rifaqui_testing::init_test_logging;
use rifaqui_testing::mocks::{FixedClock, test_clock};

/// Create a test environment around a fresh mock gateway.
fn create_test_env() -> CampaignEnvironment<MockCampaignGateway, FixedClock> {
    init_test_logging();
    CampaignEnvironment::new(MockCampaignGateway::new(), test_clock())
}

/// Create the unified reducer under test.
fn create_test_reducer() -> CampaignReducer<MockCampaignGateway, FixedClock> {
    CampaignReducer::new()
}

/// Create a store wired to the given environment.
fn create_test_store(
    env: CampaignEnvironment<MockCampaignGateway, FixedClock>,
) -> Store<
    CampaignState,
    CampaignAction,
    CampaignEnvironment<MockCampaignGateway, FixedClock>,
    CampaignReducer<MockCampaignGateway, FixedClock>,
> {
    Store::new(CampaignState::default(), create_test_reducer(), env)
}

fn test_campaign(total_quotas: i64) -> Campaign {
    Campaign {
        id: CampaignId::new(),
        slug: "rifa-da-moto".to_string(),
        title: "Rifa da Moto".to_string(),
        description: None,
        total_quotas,
        quota_price: Money::from_cents(250),
        min_purchase: 1,
        max_purchase: 1_000_000,
        promotions: Vec::new(),
        organizer_id: None,
        draw_date: None,
    }
}

fn test_customer() -> CustomerData {
    CustomerData {
        name: "Maria Silva".to_string(),
        phone: "11988887766".to_string(),
        email: Some("maria@example.com".to_string()),
    }
}

fn available_ticket(quota_number: i64) -> Ticket {
    Ticket {
        quota_number,
        status: TicketStatus::Available,
        user_id: None,
        reserved_at: None,
        bought_at: None,
    }
}

#[tokio::test]
async fn test_open_board_fetches_pages_of_one_thousand() {
    let env = create_test_env();
    let campaign = test_campaign(2500);
    let campaign_id = campaign.id;
    env.gateway.seed_board(campaign).unwrap();

    let store = create_test_store(env.clone());
    let mut handle = store
        .send(CampaignAction::OpenBoard {
            campaign_id,
            viewer: None,
        })
        .await
        .unwrap();
    handle.wait().await;

    let (phase, ticket_count, loaded_at, has_campaign) = store
        .state(|s| {
            (
                s.board.phase,
                s.board.tickets.len(),
                s.board.loaded_at,
                s.campaign.is_some(),
            )
        })
        .await;
    assert_eq!(phase, LoadPhase::Loaded);
    assert_eq!(ticket_count, 2500);
    assert_eq!(loaded_at, Some(test_clock().now()));
    assert!(has_campaign);

    // 2500 quotas split into two full pages and one short page.
    assert_eq!(
        env.gateway.page_calls().unwrap(),
        vec![(0, 1000), (1000, 1000), (2000, 500)]
    );
}

#[tokio::test]
async fn test_failed_page_leaves_no_partial_board() {
    let env = create_test_env();
    let campaign = test_campaign(2500);
    let campaign_id = campaign.id;
    env.gateway.seed_board(campaign).unwrap();
    env.gateway.fail_page_at_offset(1000).unwrap();

    let store = create_test_store(env.clone());
    let mut handle = store
        .send(CampaignAction::OpenBoard {
            campaign_id,
            viewer: None,
        })
        .await
        .unwrap();
    handle.wait().await;

    let (phase, tickets_empty, last_error) = store
        .state(|s| {
            (
                s.board.phase,
                s.board.tickets.is_empty(),
                s.board.last_error.clone(),
            )
        })
        .await;
    assert_eq!(phase, LoadPhase::Failed);
    assert!(tickets_empty, "a failed fetch must not keep partial pages");
    assert!(last_error.unwrap().contains("scripted page failure"));
}

#[tokio::test]
async fn test_ticket_change_triggers_full_refetch() {
    let env = create_test_env();
    let campaign = test_campaign(120);
    let campaign_id = campaign.id;
    env.gateway.seed_board(campaign).unwrap();

    let store = create_test_store(env.clone());
    let mut handle = store
        .send(CampaignAction::OpenBoard {
            campaign_id,
            viewer: None,
        })
        .await
        .unwrap();
    handle.wait().await;
    assert_eq!(env.gateway.page_calls().unwrap().len(), 1);

    let mut handle = store
        .send(CampaignAction::TicketChanged { campaign_id })
        .await
        .unwrap();
    handle.wait().await;

    // The change is answered with a second full fetch, never a patch.
    assert_eq!(
        env.gateway.page_calls().unwrap(),
        vec![(0, 120), (0, 120)]
    );
    let epoch = store.state(|s| s.board.refresh_epoch).await;
    assert_eq!(epoch, 2);
}

#[tokio::test]
async fn test_ticket_change_for_another_campaign_is_ignored() {
    let env = create_test_env();
    let campaign = test_campaign(50);
    let campaign_id = campaign.id;
    env.gateway.seed_board(campaign).unwrap();

    let store = create_test_store(env.clone());
    let mut handle = store
        .send(CampaignAction::OpenBoard {
            campaign_id,
            viewer: None,
        })
        .await
        .unwrap();
    handle.wait().await;

    let mut handle = store
        .send(CampaignAction::TicketChanged {
            campaign_id: CampaignId::new(),
        })
        .await
        .unwrap();
    handle.wait().await;

    assert_eq!(env.gateway.page_calls().unwrap().len(), 1);
    let phase = store.state(|s| s.board.phase).await;
    assert_eq!(phase, LoadPhase::Loaded);
}

#[tokio::test]
async fn test_change_viewer_refetches_the_board() {
    let env = create_test_env();
    let campaign = test_campaign(50);
    let campaign_id = campaign.id;
    env.gateway.seed_board(campaign).unwrap();

    let store = create_test_store(env.clone());
    let mut handle = store
        .send(CampaignAction::OpenBoard {
            campaign_id,
            viewer: None,
        })
        .await
        .unwrap();
    handle.wait().await;

    let viewer = UserId::new();
    let mut handle = store
        .send(CampaignAction::ChangeViewer {
            viewer: Some(viewer),
        })
        .await
        .unwrap();
    handle.wait().await;

    assert_eq!(env.gateway.page_calls().unwrap().len(), 2);
    let stored_viewer = store.state(|s| s.board.viewer).await;
    assert_eq!(stored_viewer, Some(viewer));
}

#[tokio::test]
async fn test_reserve_splits_batches_of_five_hundred() {
    let env = create_test_env();
    let campaign = test_campaign(1200);
    let campaign_id = campaign.id;
    env.gateway.seed_board(campaign).unwrap();

    let store = create_test_store(env.clone());
    let mut handle = store
        .send(CampaignAction::OpenBoard {
            campaign_id,
            viewer: None,
        })
        .await
        .unwrap();
    handle.wait().await;

    let quotas: Vec<String> = (1..=1200).map(|n| n.to_string()).collect();
    let mut handle = store
        .send(CampaignAction::ReserveTickets {
            quotas,
            customer: test_customer(),
        })
        .await
        .unwrap();
    handle.wait().await;

    let calls = env.gateway.reserve_calls().unwrap();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].len(), 500);
    assert_eq!(calls[1].len(), 500);
    assert_eq!(calls[2].len(), 200);

    // Batches preserve input order end to end.
    assert_eq!(calls[0][0], 1);
    assert_eq!(calls[1][0], 501);
    assert_eq!(calls[2][199], 1200);

    assert_eq!(env.gateway.reserve_customers().unwrap().len(), 3);
    assert!(!store.state(|s| s.board.reserving).await);
}

#[tokio::test]
async fn test_reserve_stops_at_first_failing_batch() {
    let env = create_test_env();
    let campaign = test_campaign(1200);
    let campaign_id = campaign.id;
    env.gateway.seed_board(campaign).unwrap();
    env.gateway.fail_reserve_call(2).unwrap();

    let store = create_test_store(env.clone());
    let mut handle = store
        .send(CampaignAction::OpenBoard {
            campaign_id,
            viewer: None,
        })
        .await
        .unwrap();
    handle.wait().await;

    let quotas: Vec<String> = (1..=1200).map(|n| n.to_string()).collect();
    let mut handle = store
        .send(CampaignAction::ReserveTickets {
            quotas,
            customer: test_customer(),
        })
        .await
        .unwrap();
    handle.wait().await;

    // The second batch failed; the third was never attempted.
    assert_eq!(env.gateway.reserve_calls().unwrap().len(), 2);

    let (reserving, last_error) = store
        .state(|s| (s.board.reserving, s.board.last_error.clone()))
        .await;
    assert!(!reserving);
    assert!(last_error.unwrap().contains("scripted reserve failure"));
}

#[tokio::test]
async fn test_non_numeric_quotas_are_dropped_before_the_wire() {
    let env = create_test_env();
    let campaign = test_campaign(20);
    let campaign_id = campaign.id;
    env.gateway.seed_board(campaign).unwrap();

    let store = create_test_store(env.clone());
    let mut handle = store
        .send(CampaignAction::OpenBoard {
            campaign_id,
            viewer: None,
        })
        .await
        .unwrap();
    handle.wait().await;

    let quotas = vec![
        "5".to_string(),
        "abc".to_string(),
        " 7 ".to_string(),
        "1.5".to_string(),
        "12".to_string(),
    ];
    let mut handle = store
        .send(CampaignAction::ReserveTickets {
            quotas,
            customer: test_customer(),
        })
        .await
        .unwrap();
    handle.wait().await;

    assert_eq!(env.gateway.reserve_calls().unwrap(), vec![vec![5, 7, 12]]);
}

#[tokio::test]
async fn test_release_goes_through_the_batched_path() {
    let env = create_test_env();
    let campaign = test_campaign(20);
    let campaign_id = campaign.id;
    env.gateway.seed_board(campaign).unwrap();

    let store = create_test_store(env.clone());
    let mut handle = store
        .send(CampaignAction::OpenBoard {
            campaign_id,
            viewer: None,
        })
        .await
        .unwrap();
    handle.wait().await;

    let quotas = vec!["1".to_string(), "2".to_string(), "3".to_string()];
    let mut handle = store
        .send(CampaignAction::ReleaseTickets { quotas })
        .await
        .unwrap();
    handle.wait().await;

    assert_eq!(env.gateway.release_calls().unwrap(), vec![vec![1, 2, 3]]);
    assert!(!store.state(|s| s.board.releasing).await);
}

#[tokio::test]
async fn test_reserve_rejects_invalid_customer_without_calling_out() {
    let reducer = create_test_reducer();
    let env = create_test_env();
    let mut state = CampaignState::default();
    state.board.campaign_id = Some(CampaignId::new());

    let effects = reducer.reduce(
        &mut state,
        CampaignAction::ReserveTickets {
            quotas: vec!["1".to_string()],
            customer: CustomerData {
                name: String::new(),
                phone: "11988887766".to_string(),
                email: None,
            },
        },
        &env,
    );

    assertions::assert_no_effects(&effects);
    assert!(!state.board.reserving);
    assert!(
        state
            .board
            .last_error
            .as_deref()
            .unwrap()
            .contains("Customer name")
    );
    assert!(env.gateway.reserve_calls().unwrap().is_empty());
}

#[tokio::test]
async fn test_reservation_confirmation_marks_board_stale() {
    let reducer = create_test_reducer();
    let env = create_test_env();
    let mut state = CampaignState::default();
    state.board.campaign_id = Some(CampaignId::new());
    state.board.phase = LoadPhase::Loaded;
    state.board.refresh_epoch = 1;
    state.board.reserving = true;

    let effects = reducer.reduce(
        &mut state,
        CampaignAction::TicketsReserved { quotas: vec![7] },
        &env,
    );

    // Confirmation clears the flag and starts a fresh fetch.
    assertions::assert_has_future_effect(&effects);
    assert!(!state.board.reserving);
    assert_eq!(state.board.refresh_epoch, 2);
    assert_eq!(state.board.phase, LoadPhase::Loading);
}

#[tokio::test]
async fn test_stale_snapshot_never_replaces_fresher_one() {
    let reducer = create_test_reducer();
    let env = create_test_env();
    let mut state = CampaignState::default();
    state.board.campaign_id = Some(CampaignId::new());

    // Two overlapping refreshes: epoch 1, then epoch 2.
    let _ = reducer.reduce(&mut state, CampaignAction::RefreshBoard, &env);
    let _ = reducer.reduce(&mut state, CampaignAction::RefreshBoard, &env);
    assert_eq!(state.board.refresh_epoch, 2);

    // The slow epoch-1 snapshot arrives after epoch 2 started: dropped.
    let effects = reducer.reduce(
        &mut state,
        CampaignAction::BoardLoaded {
            epoch: 1,
            campaign: Box::new(test_campaign(10)),
            tickets: vec![available_ticket(1)],
        },
        &env,
    );
    assertions::assert_no_effects(&effects);
    assert!(state.board.tickets.is_empty());
    assert_eq!(state.board.phase, LoadPhase::Loading);

    // The epoch-2 snapshot applies.
    let _ = reducer.reduce(
        &mut state,
        CampaignAction::BoardLoaded {
            epoch: 2,
            campaign: Box::new(test_campaign(10)),
            tickets: vec![available_ticket(1), available_ticket(2)],
        },
        &env,
    );
    assert_eq!(state.board.phase, LoadPhase::Loaded);
    assert_eq!(state.board.tickets.len(), 2);

    // A straggling epoch-1 failure does not un-load the board either.
    let effects = reducer.reduce(
        &mut state,
        CampaignAction::BoardLoadFailed {
            epoch: 1,
            error: "too late".to_string(),
        },
        &env,
    );
    assertions::assert_no_effects(&effects);
    assert_eq!(state.board.phase, LoadPhase::Loaded);
    assert!(state.board.last_error.is_none());
}

#[tokio::test]
async fn test_board_load_clamps_selection_into_new_limits() {
    let reducer = create_test_reducer();
    let env = create_test_env();
    let mut state = CampaignState::default();
    state.board.campaign_id = Some(CampaignId::new());
    state.selection.quantity = 500;

    let _ = reducer.reduce(&mut state, CampaignAction::RefreshBoard, &env);

    let mut campaign = test_campaign(1000);
    campaign.min_purchase = 5;
    campaign.max_purchase = 100;
    let epoch = state.board.refresh_epoch;
    let _ = reducer.reduce(
        &mut state,
        CampaignAction::BoardLoaded {
            epoch,
            campaign: Box::new(campaign),
            tickets: Vec::new(),
        },
        &env,
    );

    assert_eq!(state.selection.quantity, 100);
}
