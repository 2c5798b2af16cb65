//! Quota grid view-models.
//!
//! Status filter tabs with badge counts, client-side pagination over the
//! loaded ticket list, and the zero-padded display labels buyers see on
//! the grid.

use serde::{Deserialize, Serialize};

use crate::constants::grid;
use crate::state::{Ticket, TicketStatus, UserId};

/// Status filter tabs of the quota grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    /// Every ticket.
    #[default]
    All,
    /// Available tickets only.
    Available,
    /// Reserved tickets only.
    Reserved,
    /// Purchased tickets only.
    Purchased,
    /// Tickets owned by the viewer.
    Mine,
}

impl StatusFilter {
    /// Tab label, as shown to buyers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "Todos",
            Self::Available => "Disponíveis",
            Self::Reserved => "Reservados",
            Self::Purchased => "Comprados",
            Self::Mine => "Meus números",
        }
    }

    fn matches(self, ticket: &Ticket, viewer: Option<UserId>) -> bool {
        match self {
            Self::All => true,
            Self::Available => ticket.status == TicketStatus::Available,
            Self::Reserved => ticket.status == TicketStatus::Reserved,
            Self::Purchased => ticket.status == TicketStatus::Purchased,
            Self::Mine => ticket.is_mine(viewer),
        }
    }
}

/// Per-tab ticket counts (the tab badges).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCounts {
    /// All tickets.
    pub all: usize,
    /// Available tickets.
    pub available: usize,
    /// Reserved tickets.
    pub reserved: usize,
    /// Purchased tickets.
    pub purchased: usize,
    /// Tickets owned by the viewer.
    pub mine: usize,
}

/// Count tickets per tab in one pass over the loaded list.
#[must_use]
pub fn filter_counts(tickets: &[Ticket], viewer: Option<UserId>) -> FilterCounts {
    let mut counts = FilterCounts::default();
    for ticket in tickets {
        counts.all += 1;
        match ticket.status {
            TicketStatus::Available => counts.available += 1,
            TicketStatus::Reserved => counts.reserved += 1,
            TicketStatus::Purchased => counts.purchased += 1,
        }
        if ticket.is_mine(viewer) {
            counts.mine += 1;
        }
    }
    counts
}

/// Tickets matching a filter tab, preserving board order.
#[must_use]
pub fn filter_tickets<'a>(
    tickets: &'a [Ticket],
    filter: StatusFilter,
    viewer: Option<UserId>,
) -> Vec<&'a Ticket> {
    tickets
        .iter()
        .filter(|ticket| filter.matches(ticket, viewer))
        .collect()
}

/// One display page of the filtered grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPage<'a> {
    /// Tickets on this page, in board order.
    pub tickets: Vec<&'a Ticket>,
    /// Zero-based page index, clamped into range.
    pub page: usize,
    /// Total pages at this page size.
    pub page_count: usize,
    /// Total tickets across all pages of this filter.
    pub total: usize,
}

/// Slice one display page out of the loaded ticket list.
///
/// `page` is zero-based and clamps into range; a zero `page_size` falls
/// back to [`grid::DEFAULT_GRID_PAGE_SIZE`].
#[must_use]
pub fn grid_page<'a>(
    tickets: &'a [Ticket],
    filter: StatusFilter,
    viewer: Option<UserId>,
    page: usize,
    page_size: usize,
) -> GridPage<'a> {
    let page_size = if page_size == 0 {
        grid::DEFAULT_GRID_PAGE_SIZE
    } else {
        page_size
    };

    let filtered = filter_tickets(tickets, filter, viewer);
    let total = filtered.len();
    let page_count = total.div_ceil(page_size).max(1);
    let page = page.min(page_count - 1);

    let start = page * page_size;
    let end = (start + page_size).min(total);
    let tickets = filtered
        .get(start..end)
        .map(<[&Ticket]>::to_vec)
        .unwrap_or_default();

    GridPage {
        tickets,
        page,
        page_count,
        total,
    }
}

/// The label buyers see for a quota.
///
/// Labels are zero-based: quota `n` renders as `n - 1`, zero-padded to
/// the width of the largest label (`total_quotas - 1`). A 10 000-quota
/// campaign shows "0000" through "9999".
#[must_use]
pub fn display_label(quota_number: i64, total_quotas: i64) -> String {
    let value = (quota_number - 1).max(0);
    let width = (total_quotas - 1).max(0).to_string().len();
    format!("{value:0width$}")
}
