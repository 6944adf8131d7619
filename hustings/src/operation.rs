use crate::*;

use uuid::Uuid;

/// A serialized election operation, ready to be applied by a caller.
///
/// Operations are the wire form of every mutation an [`Election`] accepts.
/// They encode to CBOR by default and also accept JSON, sniffed by the
/// leading byte.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    AddConstituency { name: Name, seats: Option<u32> },

    AddCandidate {
        name: Name,
        party: Name,
        constituency: Name,
    },

    AddVoter { identity: Uuid, constituency: Name },

    StartElection,

    CastVote { ballot: Ballot },

    EndElection,

    CalculateResults,
}

impl Operation {
    pub fn as_bytes(&self) -> Vec<u8> {
        serde_cbor::to_vec(self).expect("hustings: error serializing operation")
    }

    /// Decode an operation from CBOR or JSON bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        // Sniff JSON by the leading `{`
        if bytes.first() == Some(&123) {
            let operation = serde_json::from_slice(bytes)?;
            Ok(operation)
        } else {
            let operation = serde_cbor::from_slice(bytes)?;
            Ok(operation)
        }
    }
}

impl Election {
    /// Apply an operation on behalf of `caller`.
    pub fn apply(&mut self, caller: Uuid, operation: Operation) -> Result<(), Error> {
        match operation {
            Operation::AddConstituency { name, seats } => {
                self.add_constituency(caller, name, seats)
            }
            Operation::AddCandidate {
                name,
                party,
                constituency,
            } => self.add_candidate(caller, constituency, name, party),
            Operation::AddVoter {
                identity,
                constituency,
            } => self.add_voter(caller, identity, constituency),
            Operation::StartElection => self.start_election(caller),
            Operation::CastVote { ballot } => self.cast_vote(caller, ballot),
            Operation::EndElection => self.end_election(caller),
            Operation::CalculateResults => self.calculate_results(caller),
        }
    }
}
