//! Chanting progress of a registrant.

use serde::{Deserialize, Serialize};

/// Which of the three recitations a registrant has completed.
///
/// Also the body of the "update chanting status" request: an update
/// replaces all three flags at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChantingStatus {
    #[serde(default)]
    pub chanted_pariwat: bool,
    #[serde(default)]
    pub chanted_manat: bool,
    #[serde(default)]
    pub chanted_ok_apan: bool,
}

impl ChantingStatus {
    pub fn stages_done(&self) -> usize {
        [self.chanted_pariwat, self.chanted_manat, self.chanted_ok_apan]
            .into_iter()
            .filter(|done| *done)
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.stages_done() == 3
    }
}

/// Counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChantingSummary {
    pub total: u64,
    pub chanted_pariwat: u64,
    pub chanted_manat: u64,
    pub chanted_ok_apan: u64,
}

impl ChantingSummary {
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a ChantingStatus>) -> Self {
        statuses
            .into_iter()
            .fold(Self::default(), |mut acc, status| {
                acc.total += 1;
                acc.chanted_pariwat += u64::from(status.chanted_pariwat);
                acc.chanted_manat += u64::from(status.chanted_manat);
                acc.chanted_ok_apan += u64::from(status.chanted_ok_apan);
                acc
            })
    }
}
