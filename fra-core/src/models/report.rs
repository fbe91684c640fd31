/// Tallies produced by one expiry sweep cycle.
///
/// `processed` counts every expired application the sweep visited,
/// including ones a concurrent sweeper transitioned first; those lost races
/// are successes, so `won + abandoned` may be less than `processed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepReport {
    /// Expired applications visited this cycle
    pub processed: u32,
    /// Applications this cycle transitioned to `won`
    pub won: u32,
    /// Applications this cycle transitioned to `abandoned`
    pub abandoned: u32,
}

/// Tallies produced by a reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconcileReport {
    /// Applications whose cached state was checked against the ledger
    pub examined: u32,
    /// Applications whose counters or sets had drifted and were corrected
    pub corrected: u32,
}
