use crate::*;

use indexmap::IndexMap;
use uuid::Uuid;

/// A constituency and its slate of candidates.
///
/// Candidates are keyed by name in registration order. Registration order is
/// load-bearing: it breaks ties in every tally.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Constituency {
    pub name: Name,

    /// Number of seats this constituency returns. Always 1 outside STV.
    pub seats: u32,

    pub candidates: IndexMap<Name, Candidate>,
}

impl Constituency {
    pub fn new(name: Name, seats: u32) -> Self {
        Constituency {
            name,
            seats,
            candidates: IndexMap::new(),
        }
    }
}

/// A candidate standing in a single constituency.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Candidate {
    pub name: Name,

    pub party: Name,

    /// Votes received. Under FPTP and AMS this counts up as ballots are
    /// cast; under STV it is written at tally time with the candidate's
    /// first-preference count.
    pub vote_count: u64,
}

impl Candidate {
    pub fn new(name: Name, party: Name) -> Self {
        Candidate {
            name,
            party,
            vote_count: 0,
        }
    }
}

/// A registered party and its running seat totals.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Party {
    pub name: Name,

    /// Party-list votes under AMS. Unused by the other methods.
    pub popular_votes: u64,

    pub constituency_seats: u32,

    /// Top-up seats. Always zero outside AMS.
    pub additional_seats: u32,

    pub total_seats: u32,
}

impl Party {
    pub fn new(name: Name) -> Self {
        Party {
            name,
            popular_votes: 0,
            constituency_seats: 0,
            additional_seats: 0,
            total_seats: 0,
        }
    }
}

/// A registered voter, tied to the constituency they vote in.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Voter {
    pub identity: Uuid,

    pub constituency: Name,

    pub has_voted: bool,
}

impl Voter {
    pub fn new(identity: Uuid, constituency: Name) -> Self {
        Voter {
            identity,
            constituency,
            has_voted: false,
        }
    }
}
