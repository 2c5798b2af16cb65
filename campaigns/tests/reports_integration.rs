//! Integration tests for the organizer reports flow.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use chrono::NaiveDate;
use rifaqui_campaigns::{
    actions::CampaignAction,
    environment::CampaignEnvironment,
    mocks::MockCampaignGateway,
    reducers::CampaignReducer,
    state::{CampaignId, CampaignState, LoadPhase, Money, RankingRow, SalesPoint},
};
use rifaqui_runtime::Store;
use rifaqui_testing::ReducerTest;
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

fn ranking_row(name: &str, count: i64) -> RankingRow {
    RankingRow {
        customer_name: name.to_string(),
        customer_phone: None,
        ticket_count: count,
    }
}

fn sales_point(day: NaiveDate, sold: i64) -> SalesPoint {
    SalesPoint {
        day,
        tickets_sold: sold,
        revenue: Money::from_cents(sold * 250),
    }
}

#[tokio::test]
async fn test_ranking_loads_top_buyers_in_order() {
    let env = create_test_env();
    env.gateway
        .seed_ranking(vec![
            ranking_row("Maria", 40),
            ranking_row("João", 25),
            ranking_row("Ana", 10),
        ])
        .unwrap();

    let store = create_test_store(env);
    let mut handle = store
        .send(CampaignAction::LoadRanking {
            campaign_id: CampaignId::new(),
            limit: 10,
        })
        .await
        .unwrap();
    handle.wait().await;

    let (phase, ranking) = store
        .state(|s| (s.reports.ranking_phase, s.reports.ranking.clone()))
        .await;
    assert_eq!(phase, LoadPhase::Loaded);
    assert_eq!(ranking.len(), 3);
    assert_eq!(ranking[0].customer_name, "Maria");
    assert_eq!(ranking[0].ticket_count, 40);
}

#[tokio::test]
async fn test_ranking_respects_the_limit() {
    let env = create_test_env();
    let rows: Vec<RankingRow> = (0..15)
        .map(|i| ranking_row(&format!("buyer-{i}"), 100 - i))
        .collect();
    env.gateway.seed_ranking(rows).unwrap();

    let store = create_test_store(env);
    let mut handle = store
        .send(CampaignAction::LoadRanking {
            campaign_id: CampaignId::new(),
            limit: 10,
        })
        .await
        .unwrap();
    handle.wait().await;

    let ranking = store.state(|s| s.reports.ranking.clone()).await;
    assert_eq!(ranking.len(), 10);
}

#[tokio::test]
async fn test_sales_history_loads_oldest_first() {
    let env = create_test_env();
    let base = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
    env.gateway
        .seed_history(vec![
            sales_point(base, 12),
            sales_point(base.succ_opt().unwrap(), 30),
            sales_point(base.succ_opt().unwrap().succ_opt().unwrap(), 7),
        ])
        .unwrap();

    let store = create_test_store(env);
    let mut handle = store
        .send(CampaignAction::LoadSalesHistory {
            campaign_id: CampaignId::new(),
            days: 30,
        })
        .await
        .unwrap();
    handle.wait().await;

    let (phase, history) = store
        .state(|s| (s.reports.history_phase, s.reports.history.clone()))
        .await;
    assert_eq!(phase, LoadPhase::Loaded);
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].day, base);
    assert_eq!(history[1].tickets_sold, 30);
    assert_eq!(history[1].revenue, Money::from_cents(7500));
}

#[tokio::test]
async fn test_ranking_failure_marks_the_phase() {
    ReducerTest::new(CampaignReducer::new())
        .with_env(create_test_env())
        .given_state(CampaignState::default())
        .when_action(CampaignAction::RankingLoadFailed {
            error: "boom".to_string(),
        })
        .then_state(|state| {
            assert_eq!(state.reports.ranking_phase, LoadPhase::Failed);
            assert_eq!(state.reports.last_error.as_deref(), Some("boom"));
        })
        .run();
}

#[tokio::test]
async fn test_history_failure_marks_the_phase() {
    ReducerTest::new(CampaignReducer::new())
        .with_env(create_test_env())
        .given_state(CampaignState::default())
        .when_action(CampaignAction::SalesHistoryLoadFailed {
            error: "boom".to_string(),
        })
        .then_state(|state| {
            assert_eq!(state.reports.history_phase, LoadPhase::Failed);
            assert_eq!(state.reports.last_error.as_deref(), Some("boom"));
        })
        .run();
}
