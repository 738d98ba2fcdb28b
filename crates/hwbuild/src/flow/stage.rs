//! Build stage machine.
//!
//! ```text
//! Validated ──clean──▶ Cleaned ──▶ Done
//!     │
//!     ├──hw──▶ HwBuilt ──sim──▶ SimRun ──▶ Done
//!     │           └────────────────────────▶ Done
//!     ├──sim─────────────────▶ SimRun
//!     └────────────────────────────────────▶ Done
//! ```
//!
//! `Cleaned` only leads to `Done`: a clean never shares an invocation with
//! hardware or simulation work, whatever else was requested.

use super::BuildRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// DUT found in the catalog; nothing has been touched yet.
    Validated,
    /// Target directory removed (or was already absent).
    Cleaned,
    HwBuilt,
    SimRun,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Validated => "validated",
            Stage::Cleaned => "cleaned",
            Stage::HwBuilt => "hw-built",
            Stage::SimRun => "sim-run",
            Stage::Done => "done",
        }
    }

    /// The stage this request moves to next; `None` once `Done`.
    pub fn next(self, request: &BuildRequest) -> Option<Stage> {
        match self {
            Stage::Validated if request.clean => Some(Stage::Cleaned),
            Stage::Validated if request.hw => Some(Stage::HwBuilt),
            Stage::Validated | Stage::HwBuilt if request.sim => Some(Stage::SimRun),
            Stage::Validated | Stage::HwBuilt | Stage::Cleaned | Stage::SimRun => Some(Stage::Done),
            Stage::Done => None,
        }
    }

    /// Every stage a request passes through, starting at `Validated`.
    pub fn plan(request: &BuildRequest) -> Vec<Stage> {
        let mut stages = vec![Stage::Validated];
        let mut cur = Stage::Validated;
        while let Some(next) = cur.next(request) {
            stages.push(next);
            cur = next;
        }
        stages
    }
}
