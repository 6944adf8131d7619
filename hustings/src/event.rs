use crate::*;

use uuid::Uuid;

/// Every state change an election makes, in the order it happened.
///
/// Tally events are appended in a fixed sequence so downstream consumers can
/// replay a result: winner events per constituency in registration order,
/// then the method's aggregation events, then per-party totals, then the
/// overall winner.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    ConstituencyAdded {
        name: Name,
        /// The seat count as requested, `None` when defaulted to 1
        seats: Option<u32>,
    },

    CandidateAdded {
        candidate: Name,
        party: Name,
        constituency: Name,
    },

    PartyAdded {
        party: Name,
    },

    VoterAdded {
        voter: Uuid,
        constituency: Name,
    },

    ElectionStarted,

    VoteCast {
        voter: Uuid,
        candidate: Option<Name>,
        party: Option<Name>,
    },

    ElectionEnded,

    /// A single-seat constituency result
    ConstituencyWinner {
        constituency: Name,
        candidate: Name,
        party: Name,
    },

    /// A filled seat in a multi-seat constituency
    ConstituencyCandidateElected {
        constituency: Name,
        candidate: Name,
        party: Name,
    },

    AllConstituencyWinnersCalculated,

    /// Per-party constituency seat count before top-up allocation
    PartyConstituencyResults {
        party: Name,
        seats: u32,
    },

    AdditionalSeatsAllocated {
        party: Name,
        seats: u32,
    },

    AllAdditionalSeatsAllocated,

    ElectionResultsCalculated,

    PartyResults {
        party: Name,
        total_seats: u32,
    },

    ElectionWinner {
        party: Name,
        total_seats: u32,
    },
}
