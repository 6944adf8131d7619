use crate::*;

use thiserror::Error;

/// Error types
///
/// Every rejection carries the human-readable reason surfaced to callers.
/// Operations are atomic: a returned error means no state changed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("hustings: only the election admin can perform this action")]
    NotAdmin,

    #[error("hustings: the election has not started so it is not possible to perform this action")]
    NotStarted,

    #[error("hustings: the election has already started so it is not possible to perform this action")]
    AlreadyStarted,

    #[error("hustings: the election has not ended so it is not possible to perform this action")]
    NotEnded,

    #[error("hustings: the election has already ended so it is not possible to perform this action")]
    AlreadyEnded,

    #[error("hustings: the election results have already been calculated so it is not possible to perform this action")]
    AlreadyCalculated,

    #[error("hustings: the election results have not been calculated yet")]
    ResultsNotCalculated,

    #[error("hustings: constituency {0} does not exist")]
    ConstituencyNotFound(Name),

    #[error("hustings: constituency {0} already exists")]
    ConstituencyExists(Name),

    #[error("hustings: candidate {0} does not exist in this constituency")]
    CandidateNotFound(Name),

    #[error("hustings: candidate {0} already exists in this constituency")]
    CandidateExists(Name),

    #[error("hustings: party {0} is not registered")]
    PartyNotFound(Name),

    #[error("hustings: this voter is already registered to vote")]
    VoterExists,

    #[error("hustings: this voter is not registered to vote")]
    NotRegistered,

    #[error("hustings: you have already voted")]
    AlreadyVoted,

    #[error("hustings: the ballot shape does not match the election method")]
    BallotShapeMismatch,

    #[error("hustings: a ranking cannot be empty")]
    EmptyRanking,

    #[error("hustings: a ranking cannot have more entries than the constituency has candidates")]
    RankingTooLong,

    #[error("hustings: a ranking cannot rank the same candidate twice")]
    DuplicateRankingEntry,

    #[error("hustings: a constituency must have at least one seat")]
    ZeroSeats,

    #[error("hustings: constituencies have exactly one seat under this election method")]
    SingleSeatMethod,

    #[error("hustings: name cannot be empty")]
    EmptyName,

    #[error("hustings: name is longer than {} bytes", NAME_LEN)]
    NameTooLong,

    #[error("hustings: name contains a NUL byte")]
    NameContainsNul,

    #[error("hustings: invalid name identifier - invalid hexadecimal")]
    NameBadHex,

    #[error("hustings: invalid name identifier - wrong length")]
    NameBadLen,

    #[error("hustings: invalid name identifier - bad encoding")]
    NameBadEncoding,

    #[error("hustings: JSON error deserializing operation: {0}")]
    JSONDeserialization(#[from] serde_json::Error),

    #[error("hustings: CBOR error deserializing operation: {0}")]
    CBORDeserialization(#[from] serde_cbor::Error),
}

/// Failure taxonomy.
///
/// Groups the concrete error variants into the categories callers gate on.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller is not admin for an admin-only operation
    AccessDenied,
    /// Operation attempted outside its required lifecycle phase
    PhaseViolation,
    /// Referenced constituency, candidate or party does not exist
    NotFound,
    /// Constituency, candidate or voter already exists
    Duplicate,
    /// Malformed input: empty names, bad rankings, bad seat counts
    Validation,
    /// Caller is not a registered voter, or has already voted
    NotEligible,
    /// Wire-format decode failure
    Serialization,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotAdmin => ErrorKind::AccessDenied,

            Error::NotStarted
            | Error::AlreadyStarted
            | Error::NotEnded
            | Error::AlreadyEnded
            | Error::AlreadyCalculated
            | Error::ResultsNotCalculated => ErrorKind::PhaseViolation,

            Error::ConstituencyNotFound(_)
            | Error::CandidateNotFound(_)
            | Error::PartyNotFound(_) => ErrorKind::NotFound,

            Error::ConstituencyExists(_) | Error::CandidateExists(_) | Error::VoterExists => {
                ErrorKind::Duplicate
            }

            Error::BallotShapeMismatch
            | Error::EmptyRanking
            | Error::RankingTooLong
            | Error::DuplicateRankingEntry
            | Error::ZeroSeats
            | Error::SingleSeatMethod
            | Error::EmptyName
            | Error::NameTooLong
            | Error::NameContainsNul
            | Error::NameBadHex
            | Error::NameBadLen
            | Error::NameBadEncoding => ErrorKind::Validation,

            Error::NotRegistered | Error::AlreadyVoted => ErrorKind::NotEligible,

            Error::JSONDeserialization(_) | Error::CBORDeserialization(_) => {
                ErrorKind::Serialization
            }
        }
    }
}
