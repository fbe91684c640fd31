use super::{ApplicationStatus, BankGroup, resolve};

/// A snapshot of an application aggregate.
///
/// The `status` field is the *persisted* status, which may lag reality: the
/// sweeper is the only writer of terminal statuses, so an application whose
/// window elapsed a moment ago will still read back as `Open` here. Callers
/// presenting status to a user should go through [`status_as_of`], which
/// applies the pure resolver without writing anything.
///
/// [`status_as_of`]: ApplicationRecord::status_as_of
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound(
        serialize = "DateTime: serde::Serialize, ApplicationId: serde::Serialize, \
                     BankId: serde::Serialize + Eq + std::hash::Hash",
        deserialize = "DateTime: serde::Deserialize<'de>, ApplicationId: serde::Deserialize<'de>, \
                       BankId: serde::Deserialize<'de> + Eq + std::hash::Hash"
    ))
)]
pub struct ApplicationRecord<DateTime, ApplicationId, BankId> {
    /// Unique identifier for the application
    pub id: ApplicationId,
    /// When the financing request was submitted
    pub submitted_at: DateTime,
    /// When the auction window closes; immutable after creation
    pub auction_end_at: DateTime,
    /// The persisted lifecycle status
    pub status: ApplicationStatus,
    /// Cached count of distinct banks with an offer on the ledger
    pub offer_count: u32,
    /// Banks that have viewed this application
    pub viewed_by: BankGroup<BankId>,
    /// Banks that have committed to this application (purchased the lead
    /// and/or submitted an offer)
    pub purchased_by: BankGroup<BankId>,
    /// Accumulated lead fees, bumped each time a bank first enters
    /// `purchased_by`
    pub revenue_collected: u64,
}

// Manual impl: the `BankGroup` fields compare under `BankId: Eq + Hash`,
// which the derive cannot express.
impl<DateTime: PartialEq, ApplicationId: PartialEq, BankId: Eq + std::hash::Hash> PartialEq
    for ApplicationRecord<DateTime, ApplicationId, BankId>
{
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.submitted_at == other.submitted_at
            && self.auction_end_at == other.auction_end_at
            && self.status == other.status
            && self.offer_count == other.offer_count
            && self.viewed_by == other.viewed_by
            && self.purchased_by == other.purchased_by
            && self.revenue_collected == other.revenue_collected
    }
}

impl<DateTime: PartialOrd + Copy, ApplicationId, BankId>
    ApplicationRecord<DateTime, ApplicationId, BankId>
{
    /// Derive the effective status at `now` without writing.
    pub fn status_as_of(&self, now: DateTime) -> ApplicationStatus {
        resolve(now, self.auction_end_at, self.offer_count, self.status)
    }

    /// Whether the auction window has elapsed as of `now`.
    ///
    /// A window ending exactly at `now` counts as elapsed.
    pub fn is_expired(&self, now: DateTime) -> bool {
        now >= self.auction_end_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(end: i64, offers: u32, status: ApplicationStatus) -> ApplicationRecord<i64, u8, u8> {
        ApplicationRecord {
            id: 1,
            submitted_at: 0,
            auction_end_at: end,
            status,
            offer_count: offers,
            viewed_by: BankGroup::default(),
            purchased_by: BankGroup::default(),
            revenue_collected: 0,
        }
    }

    #[test]
    fn derived_status_tracks_the_clock() {
        let open = record(100, 0, ApplicationStatus::Open);
        assert_eq!(open.status_as_of(99), ApplicationStatus::Open);
        assert_eq!(open.status_as_of(100), ApplicationStatus::Abandoned);

        let with_offers = record(100, 2, ApplicationStatus::Open);
        assert_eq!(with_offers.status_as_of(99), ApplicationStatus::Open);
        assert_eq!(with_offers.status_as_of(100), ApplicationStatus::Won);
    }

    #[test]
    fn persisted_terminal_status_wins() {
        let won = record(100, 0, ApplicationStatus::Won);
        assert_eq!(won.status_as_of(0), ApplicationStatus::Won);
    }

    #[test]
    fn serde_round_trip_preserves_interaction_sets() {
        // identifier types are Eq + Hash but not Default
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        struct Lender(u64);

        let record: ApplicationRecord<i64, u8, Lender> = ApplicationRecord {
            id: 1,
            submitted_at: 0,
            auction_end_at: 100,
            status: ApplicationStatus::Open,
            offer_count: 2,
            viewed_by: [Lender(7), Lender(9)].into_iter().collect(),
            purchased_by: [Lender(7)].into_iter().collect(),
            revenue_collected: 100,
        };

        let json = serde_json::to_value(&record).unwrap();
        let back: ApplicationRecord<i64, u8, Lender> = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let open = record(100, 0, ApplicationStatus::Open);
        assert!(!open.is_expired(99));
        assert!(open.is_expired(100));
        assert!(open.is_expired(101));
    }
}
