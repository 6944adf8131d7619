use crate::*;

use rust_decimal::Decimal;

/// A cast ballot. The variant must match the election method:
/// `Single` for FPTP, `Split` for AMS, `Ranked` for STV.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "ballot", rename_all = "snake_case")]
pub enum Ballot {
    /// One candidate in the voter's constituency
    Single { candidate: Name },

    /// A constituency candidate plus a party-list vote
    Split { candidate: Name, party: Name },

    /// Candidates in the voter's constituency, most preferred first.
    /// Partial rankings are valid.
    Ranked { ranking: Vec<Name> },
}

/// A ranked ballot in mid-count form.
///
/// `ranking` holds candidate indexes into the constituency slate, `pointer`
/// the position currently being counted, and `value` the ballot's transfer
/// value. A fresh ballot is worth exactly one vote; surplus transfers scale
/// the value down.
#[derive(Debug, Clone)]
pub struct BallotRecord {
    pub ranking: Vec<usize>,
    pub value: Decimal,
    pub pointer: usize,
}

impl BallotRecord {
    pub fn new(ranking: Vec<usize>) -> Self {
        BallotRecord {
            ranking,
            value: Decimal::from(1),
            pointer: 0,
        }
    }
}
