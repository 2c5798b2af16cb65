//! Campaign actions.
//!
//! One enum carries every input to the campaign reducer: commands express
//! intent (open the board, reserve tickets, run the draw) and events carry
//! facts produced by effects or by the realtime feed. Failure events carry
//! the error as a display string; the typed error stays at the call site
//! where it was logged.

use rifaqui_macros::Action;

use crate::state::{
    Campaign, CampaignId, CustomerData, PhoneTicket, RankingRow, SalesPoint, Ticket,
    TicketValidation, UserId, Winner, WinnerDetails,
};

/// All campaign actions.
#[derive(Action, Clone, Debug, PartialEq)]
pub enum CampaignAction {
    // ═══════════════════════════════════════════════════════════
    // Board Flow
    // ═══════════════════════════════════════════════════════════
    /// Open the ticket board of a campaign and start the first fetch.
    #[command]
    OpenBoard {
        /// Campaign to show.
        campaign_id: CampaignId,
        /// Signed-in viewer, if any.
        viewer: Option<UserId>,
    },

    /// Switch the signed-in viewer and refetch the board.
    #[command]
    ChangeViewer {
        /// The new viewer, if any.
        viewer: Option<UserId>,
    },

    /// Refetch the full board.
    #[command]
    RefreshBoard,

    /// A realtime change notification arrived for a ticket table row.
    #[event]
    TicketChanged {
        /// Campaign the change belongs to.
        campaign_id: CampaignId,
    },

    /// A board fetch completed.
    #[event]
    BoardLoaded {
        /// Epoch the fetch was started with.
        epoch: u64,
        /// The campaign record, refreshed alongside the tickets.
        campaign: Box<Campaign>,
        /// Full per-ticket status list, in quota-number order.
        tickets: Vec<Ticket>,
    },

    /// A board fetch failed.
    #[event]
    BoardLoadFailed {
        /// Epoch the fetch was started with.
        epoch: u64,
        /// What went wrong.
        error: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Reservation Flow
    // ═══════════════════════════════════════════════════════════
    /// Reserve the given quota numbers for a customer.
    ///
    /// Quota input is raw and possibly malformed; non-numeric entries
    /// are dropped before the wire.
    #[command]
    ReserveTickets {
        /// Raw quota identifiers, as collected from the grid.
        quotas: Vec<String>,
        /// Buyer form input.
        customer: CustomerData,
    },

    /// Every reservation batch went through.
    #[event]
    TicketsReserved {
        /// The quota numbers the backend confirmed.
        quotas: Vec<i64>,
    },

    /// Reservation stopped on a failed batch.
    #[event]
    ReserveFailed {
        /// What went wrong.
        error: String,
    },

    /// Release the given quota numbers back to the pool.
    #[command]
    ReleaseTickets {
        /// Raw quota identifiers.
        quotas: Vec<String>,
    },

    /// Every release batch went through.
    #[event]
    TicketsReleased {
        /// The quota numbers the backend confirmed.
        quotas: Vec<i64>,
    },

    /// Release stopped on a failed batch.
    #[event]
    ReleaseFailed {
        /// What went wrong.
        error: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Selection Flow
    // ═══════════════════════════════════════════════════════════
    /// Set the selected quantity, clamped to the purchase limits.
    #[command]
    SetQuantity {
        /// Requested quantity.
        quantity: u32,
    },

    /// Step the selected quantity by a delta, clamped to the limits.
    #[command]
    AddQuantity {
        /// Signed step (e.g. +10, -1).
        delta: i32,
    },

    // ═══════════════════════════════════════════════════════════
    // Draw Flow
    // ═══════════════════════════════════════════════════════════
    /// Ask the backend to draw a winner.
    #[command]
    PerformDraw {
        /// Campaign to draw for.
        campaign_id: CampaignId,
    },

    /// The draw completed server-side.
    #[event]
    DrawCompleted {
        /// The drawn winner.
        winner: Winner,
    },

    /// The draw failed.
    #[event]
    DrawFailed {
        /// What went wrong.
        error: String,
    },

    /// Check externally-drawn numbers against sold tickets.
    #[command]
    ValidateDrawNumbers {
        /// Campaign to check against.
        campaign_id: CampaignId,
        /// Raw drawn numbers, possibly malformed.
        numbers: Vec<String>,
    },

    /// The pre-draw check completed.
    #[event]
    DrawNumbersValidated {
        /// Per-number validity.
        validations: Vec<TicketValidation>,
    },

    /// The pre-draw check failed.
    #[event]
    DrawValidationFailed {
        /// What went wrong.
        error: String,
    },

    /// Load the recorded winners of a campaign.
    #[command]
    LoadWinners {
        /// Campaign to load winners for.
        campaign_id: CampaignId,
    },

    /// The winners list arrived.
    #[event]
    WinnersLoaded {
        /// Recorded winners, newest first.
        winners: Vec<Winner>,
    },

    /// The winners list failed to load.
    #[event]
    WinnersLoadFailed {
        /// What went wrong.
        error: String,
    },

    /// Load buyer contact details for a winning quota.
    #[command]
    LoadWinnerDetails {
        /// Campaign the quota belongs to.
        campaign_id: CampaignId,
        /// The winning quota number.
        quota_number: i64,
    },

    /// Winner contact details arrived.
    #[event]
    WinnerDetailsLoaded {
        /// The buyer behind the winning quota.
        details: WinnerDetails,
    },

    /// Winner contact details failed to load.
    #[event]
    WinnerDetailsFailed {
        /// What went wrong.
        error: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Reports Flow
    // ═══════════════════════════════════════════════════════════
    /// Load the top-buyers ranking.
    #[command]
    LoadRanking {
        /// Campaign to rank buyers for.
        campaign_id: CampaignId,
        /// Maximum rows to return.
        limit: u32,
    },

    /// The ranking arrived.
    #[event]
    RankingLoaded {
        /// Top buyers, best first.
        ranking: Vec<RankingRow>,
    },

    /// The ranking failed to load.
    #[event]
    RankingLoadFailed {
        /// What went wrong.
        error: String,
    },

    /// Load the per-day sales history.
    #[command]
    LoadSalesHistory {
        /// Campaign to aggregate.
        campaign_id: CampaignId,
        /// How many days back to aggregate.
        days: u32,
    },

    /// The sales history arrived.
    #[event]
    SalesHistoryLoaded {
        /// Per-day points, oldest first.
        history: Vec<SalesPoint>,
    },

    /// The sales history failed to load.
    #[event]
    SalesHistoryLoadFailed {
        /// What went wrong.
        error: String,
    },

    // ═══════════════════════════════════════════════════════════
    // Buyer Lookup Flow
    // ═══════════════════════════════════════════════════════════
    /// Find a buyer's tickets by phone.
    #[command]
    LookupByPhone {
        /// Free-form phone input; normalized before the call.
        phone: String,
    },

    /// The lookup completed.
    #[event]
    LookupCompleted {
        /// Tickets found for that phone, across campaigns.
        tickets: Vec<PhoneTicket>,
    },

    /// The lookup failed.
    #[event]
    LookupFailed {
        /// What went wrong.
        error: String,
    },
}
