//! Integration tests for the draw flow.
//!
//! Covers the server-authoritative draw, the pre-draw number check, and
//! the winners/details reads.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use chrono::Utc;
use rifaqui_campaigns::{
    actions::CampaignAction,
    environment::CampaignEnvironment,
    mocks::MockCampaignGateway,
    reducers::CampaignReducer,
    state::{
        CampaignId, CampaignState, DrawPhase, TicketStatus, TicketValidation, Winner,
        WinnerDetails,
    },
};
use rifaqui_runtime::Store;
use rifaqui_testing::ReducerTest;
use rifaqui_testing::assertions;
use rifaqui_testing::init_test_logging;
use rifaqui_testing::mocks::{FixedClock, test_clock};

fn create_test_env() -> CampaignEnvironment<MockCampaignGateway, FixedClock> {
    init_test_logging();
    CampaignEnvironment::new(MockCampaignGateway::new(), test_clock())
}

fn create_test_store(
    env: CampaignEnvironment<MockCampaignGateway, FixedClock>,
) -> Store<
    CampaignState,
    CampaignAction,
    CampaignEnvironment<MockCampaignGateway, FixedClock>,
    CampaignReducer<MockCampaignGateway, FixedClock>,
> {
    Store::new(CampaignState::default(), CampaignReducer::new(), env)
}

fn test_winner(quota_number: i64) -> Winner {
    Winner {
        quota_number,
        customer_name: "João Souza".to_string(),
        customer_phone: Some("11977776655".to_string()),
        user_id: None,
        drawn_at: Utc::now(),
        position: None,
    }
}

#[tokio::test]
async fn test_draw_happy_path() {
    let env = create_test_env();
    env.gateway.seed_draw_outcome(test_winner(42)).unwrap();

    let store = create_test_store(env);
    let mut handle = store
        .send(CampaignAction::PerformDraw {
            campaign_id: CampaignId::new(),
        })
        .await
        .unwrap();
    handle.wait().await;

    let (phase, latest) = store.state(|s| (s.draw.phase, s.draw.latest.clone())).await;
    assert_eq!(phase, DrawPhase::Drawn);
    assert_eq!(latest.unwrap().quota_number, 42);
}

#[tokio::test]
async fn test_duplicate_draw_request_is_ignored() {
    let mut state = CampaignState::default();
    state.draw.phase = DrawPhase::Drawing;

    ReducerTest::new(CampaignReducer::new())
        .with_env(create_test_env())
        .given_state(state)
        .when_action(CampaignAction::PerformDraw {
            campaign_id: CampaignId::new(),
        })
        .then_state(|state| {
            assert_eq!(state.draw.phase, DrawPhase::Drawing);
        })
        .then_effects(|effects| {
            assertions::assert_no_effects(effects);
        })
        .run();
}

#[tokio::test]
async fn test_failed_draw_reports_the_error() {
    let env = create_test_env();
    env.gateway.fail_draw().unwrap();

    let store = create_test_store(env);
    let mut handle = store
        .send(CampaignAction::PerformDraw {
            campaign_id: CampaignId::new(),
        })
        .await
        .unwrap();
    handle.wait().await;

    let (phase, last_error) = store
        .state(|s| (s.draw.phase, s.draw.last_error.clone()))
        .await;
    assert_eq!(phase, DrawPhase::Failed);
    assert!(last_error.unwrap().contains("scripted draw failure"));
}

#[tokio::test]
async fn test_validate_numbers_coerces_before_the_wire() {
    let env = create_test_env();
    env.gateway
        .seed_validations(vec![
            TicketValidation {
                quota_number: 7,
                valid: true,
                status: Some(TicketStatus::Purchased),
            },
            TicketValidation {
                quota_number: 9,
                valid: false,
                status: Some(TicketStatus::Available),
            },
        ])
        .unwrap();

    let store = create_test_store(env.clone());
    let numbers = vec!["7".to_string(), "x".to_string(), "9".to_string()];
    let mut handle = store
        .send(CampaignAction::ValidateDrawNumbers {
            campaign_id: CampaignId::new(),
            numbers,
        })
        .await
        .unwrap();
    handle.wait().await;

    assert_eq!(env.gateway.validate_calls().unwrap(), vec![vec![7, 9]]);

    let validations = store.state(|s| s.draw.validations.clone()).await;
    assert_eq!(validations.len(), 2);
    assert!(validations[0].valid);
    assert!(!validations[1].valid);
}

#[tokio::test]
async fn test_validate_rejects_input_with_no_numbers() {
    ReducerTest::new(CampaignReducer::new())
        .with_env(create_test_env())
        .given_state(CampaignState::default())
        .when_action(CampaignAction::ValidateDrawNumbers {
            campaign_id: CampaignId::new(),
            numbers: vec!["abc".to_string()],
        })
        .then_state(|state| {
            assert!(
                state
                    .draw
                    .last_error
                    .as_deref()
                    .unwrap()
                    .contains("No valid quota numbers")
            );
        })
        .then_effects(|effects| {
            assertions::assert_no_effects(effects);
        })
        .run();
}

#[tokio::test]
async fn test_winners_list_loads_newest_first() {
    let env = create_test_env();
    let mut first = test_winner(42);
    first.position = Some(1);
    let mut second = test_winner(7);
    second.position = Some(2);
    env.gateway.seed_winners(vec![second, first]).unwrap();

    let store = create_test_store(env);
    let mut handle = store
        .send(CampaignAction::LoadWinners {
            campaign_id: CampaignId::new(),
        })
        .await
        .unwrap();
    handle.wait().await;

    let winners = store.state(|s| s.draw.winners.clone()).await;
    assert_eq!(winners.len(), 2);
    assert_eq!(winners[0].quota_number, 7);
    assert_eq!(winners[1].quota_number, 42);
}

#[tokio::test]
async fn test_winner_details_load() {
    let env = create_test_env();
    env.gateway
        .seed_winner_details(WinnerDetails {
            quota_number: 42,
            customer_name: "João Souza".to_string(),
            customer_phone: Some("11977776655".to_string()),
            customer_email: Some("joao@example.com".to_string()),
            bought_at: Some(Utc::now()),
        })
        .unwrap();

    let store = create_test_store(env);
    let mut handle = store
        .send(CampaignAction::LoadWinnerDetails {
            campaign_id: CampaignId::new(),
            quota_number: 42,
        })
        .await
        .unwrap();
    handle.wait().await;

    let details = store.state(|s| s.draw.winner_details.clone()).await;
    assert_eq!(details.unwrap().customer_name, "João Souza");
}
