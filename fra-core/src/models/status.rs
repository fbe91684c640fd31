/// The lifecycle state of an application.
///
/// `Open` is the initial state. `Won` and `Abandoned` are terminal and
/// mutually exclusive: once the sweeper persists either one, no component
/// ever recomputes or reopens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ApplicationStatus {
    /// The auction window has not yet elapsed; offers are accepted.
    Open,
    /// The window elapsed with at least one offer on the ledger.
    Won,
    /// The window elapsed without any offers.
    Abandoned,
}

impl ApplicationStatus {
    /// Whether this status is terminal (`Won` or `Abandoned`).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Open)
    }

    /// The canonical lowercase name, as persisted by storage backends.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Won => "won",
            Self::Abandoned => "abandoned",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when parsing an unrecognized status name.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized application status: {0:?}")]
pub struct ParseStatusError(pub String);

impl std::str::FromStr for ApplicationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "won" => Ok(Self::Won),
            "abandoned" => Ok(Self::Abandoned),
            other => Err(ParseStatusError(other.to_owned())),
        }
    }
}

/// Resolve the effective status of an application at a point in time.
///
/// This is the single source of truth for the lifecycle rules. It is used in
/// two ways: on read, to derive the displayed status without writing, and by
/// the expiry sweeper, which persists the result with a conditional write.
///
/// The rules, in order:
/// 1. A terminal persisted status is returned unchanged.
/// 2. While `now < auction_end_at` (strictly), the application is open.
/// 3. Past the window, the application is won if it has any offers,
///    abandoned otherwise.
///
/// Note the tie-break: a window ending at exactly `now` is already expired.
pub fn resolve<T: PartialOrd>(
    now: T,
    auction_end_at: T,
    offer_count: u32,
    persisted: ApplicationStatus,
) -> ApplicationStatus {
    if persisted.is_terminal() {
        persisted
    } else if now < auction_end_at {
        ApplicationStatus::Open
    } else if offer_count > 0 {
        ApplicationStatus::Won
    } else {
        ApplicationStatus::Abandoned
    }
}
