//! Dashboard aggregates over event requests.
//!
//! All functions are single passes over an in-memory slice; callers load
//! the rows and hand them in.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{EventRequest, RequestStatus};

/// Number of requests in each status.
///
/// `pending + approved + rejected == total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCounts {
    /// Requests awaiting review.
    pub pending: usize,
    /// Approved requests.
    pub approved: usize,
    /// Rejected requests.
    pub rejected: usize,
    /// All requests.
    pub total: usize,
}

impl StatusCounts {
    /// Counts `requests` by status.
    #[must_use]
    pub fn tally(requests: &[EventRequest]) -> Self {
        requests.iter().fold(Self::default(), |mut acc, r| {
            match r.status {
                RequestStatus::Pending => acc.pending += 1,
                RequestStatus::Approved => acc.approved += 1,
                RequestStatus::Rejected => acc.rejected += 1,
            }
            acc.total += 1;
            acc
        })
    }
}

/// Approved requests created on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DateBucket {
    /// The day.
    pub date: NaiveDate,
    /// Axis label, e.g. `"Oct 5"`.
    pub label: String,
    /// Approved requests created that day.
    pub count: usize,
}

/// Buckets approved requests by the UTC date of `created_at`, oldest day
/// first. Days without approvals are omitted.
#[must_use]
pub fn approvals_by_date(requests: &[EventRequest]) -> Vec<DateBucket> {
    let mut days: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for r in requests.iter().filter(|r| r.status == RequestStatus::Approved) {
        *days.entry(r.created_at.date_naive()).or_default() += 1;
    }
    days.into_iter()
        .map(|(date, count)| DateBucket {
            date,
            label: date.format("%b %-d").to_string(),
            count,
        })
        .collect()
}

/// One segment of the status pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusSlice {
    /// Stable segment index.
    pub id: u8,
    /// Segment size.
    pub value: usize,
    /// Legend label.
    pub label: &'static str,
}

/// Pie segments in fixed order: Approved, Pending, Rejected.
#[must_use]
pub fn status_slices(counts: &StatusCounts) -> [StatusSlice; 3] {
    [
        StatusSlice {
            id: 0,
            value: counts.approved,
            label: "Approved",
        },
        StatusSlice {
            id: 1,
            value: counts.pending,
            label: "Pending",
        },
        StatusSlice {
            id: 2,
            value: counts.rejected,
            label: "Rejected",
        },
    ]
}

/// Everything the admin overview renders.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardSummary {
    /// Status totals for the summary cards.
    pub counts: StatusCounts,
    /// Bar chart series.
    pub approvals_by_date: Vec<DateBucket>,
    /// Pie chart segments.
    pub slices: Vec<StatusSlice>,
    /// When the summary was computed.
    pub generated_at: DateTime<Utc>,
}

impl DashboardSummary {
    /// Builds the summary from the full request list.
    #[must_use]
    pub fn from_requests(requests: &[EventRequest]) -> Self {
        let counts = StatusCounts::tally(requests);
        Self {
            counts,
            approvals_by_date: approvals_by_date(requests),
            slices: status_slices(&counts).to_vec(),
            generated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::{Category, RequestId, UserId};
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn request(status: RequestStatus, created_at: DateTime<Utc>) -> EventRequest {
        EventRequest {
            id: RequestId::new(),
            name: "n".to_string(),
            email: "n@example.com".to_string(),
            event_title: "e".to_string(),
            category: Category::Wedding,
            location: "l".to_string(),
            image_url: "u".to_string(),
            status,
            user_id: UserId::new(),
            created_at,
            reviewed_at: None,
            reviewed_by: None,
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        let Some(ts) = Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single() else {
            panic!("invalid test timestamp");
        };
        ts
    }

    #[test]
    fn empty_input_yields_zeroes() {
        assert_eq!(StatusCounts::tally(&[]), StatusCounts::default());
        assert!(approvals_by_date(&[]).is_empty());
    }

    #[test]
    fn tally_counts_each_status() {
        let now = Utc::now();
        let rows = vec![
            request(RequestStatus::Pending, now),
            request(RequestStatus::Pending, now),
            request(RequestStatus::Approved, now),
            request(RequestStatus::Rejected, now),
        ];
        let counts = StatusCounts::tally(&rows);
        assert_eq!(
            counts,
            StatusCounts {
                pending: 2,
                approved: 1,
                rejected: 1,
                total: 4
            }
        );
    }

    #[test]
    fn approvals_grouped_by_day_in_date_order() {
        let rows = vec![
            request(RequestStatus::Approved, at(2025, 10, 5, 23)),
            request(RequestStatus::Approved, at(2025, 9, 30, 8)),
            request(RequestStatus::Approved, at(2025, 10, 5, 1)),
            request(RequestStatus::Pending, at(2025, 10, 1, 12)),
            request(RequestStatus::Rejected, at(2025, 10, 2, 12)),
        ];
        let buckets = approvals_by_date(&rows);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "Sep 30");
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[1].label, "Oct 5");
        assert_eq!(buckets[1].count, 2);
    }

    #[test]
    fn year_boundary_sorts_chronologically() {
        let rows = vec![
            request(RequestStatus::Approved, at(2026, 1, 2, 0)),
            request(RequestStatus::Approved, at(2025, 12, 31, 0)),
        ];
        let labels: Vec<_> = approvals_by_date(&rows).into_iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["Dec 31", "Jan 2"]);
    }

    #[test]
    fn slices_have_fixed_order() {
        let counts = StatusCounts {
            pending: 3,
            approved: 5,
            rejected: 1,
            total: 9,
        };
        let slices = status_slices(&counts);
        assert_eq!(slices[0].label, "Approved");
        assert_eq!(slices[0].value, 5);
        assert_eq!(slices[1].label, "Pending");
        assert_eq!(slices[2].id, 2);
    }

    fn status_strategy() -> impl Strategy<Value = RequestStatus> {
        prop_oneof![
            Just(RequestStatus::Pending),
            Just(RequestStatus::Approved),
            Just(RequestStatus::Rejected),
        ]
    }

    proptest! {
        #[test]
        fn counts_sum_to_input_length(
            statuses in proptest::collection::vec(status_strategy(), 0..200),
            day_offsets in proptest::collection::vec(0i64..400, 200),
        ) {
            let base = at(2025, 1, 1, 12);
            let rows: Vec<_> = statuses
                .iter()
                .zip(day_offsets.iter())
                .map(|(s, d)| request(*s, base + chrono::Duration::days(*d)))
                .collect();
            let counts = StatusCounts::tally(&rows);
            prop_assert_eq!(counts.total, rows.len());
            prop_assert_eq!(counts.pending + counts.approved + counts.rejected, counts.total);

            let buckets = approvals_by_date(&rows);
            let bucketed: usize = buckets.iter().map(|b| b.count).sum();
            prop_assert_eq!(bucketed, counts.approved);
            prop_assert!(buckets.windows(2).all(|w| w[0].date < w[1].date));
        }
    }
}
