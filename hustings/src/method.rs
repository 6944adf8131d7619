use num_enum::TryFromPrimitive;

/// The electoral method an election is run under.
///
/// The method is fixed at creation and selects which tally runs when the
/// election ends: plain plurality, plurality plus a proportional top-up, or
/// ranked transfer.
#[derive(Serialize, Deserialize, TryFromPrimitive, Copy, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Method {
    /// First-Past-the-Post: single-choice plurality per constituency
    Fptp = 1,
    /// Additional Member System: constituency plurality plus popular-vote
    /// top-up seats
    Ams = 2,
    /// Single Transferable Vote: ranked ballots, Droop quota, surplus
    /// transfer
    Stv = 3,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Method::Fptp => "FPTP",
            Method::Ams => "AMS",
            Method::Stv => "STV",
        };
        write!(f, "{}", name)
    }
}

/// Election lifecycle phase.
///
/// Only ever advances forward: Setup, Started, Ended, ResultsCalculated.
#[derive(Serialize, Deserialize, TryFromPrimitive, Copy, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Phase {
    Setup = 1,
    Started = 2,
    Ended = 3,
    ResultsCalculated = 4,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Phase::Setup => "Setup",
            Phase::Started => "Started",
            Phase::Ended => "Ended",
            Phase::ResultsCalculated => "ResultsCalculated",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn phase_ordering_is_monotonic_in_repr() {
        assert!((Phase::Setup as u8) < (Phase::Started as u8));
        assert!((Phase::Started as u8) < (Phase::Ended as u8));
        assert!((Phase::Ended as u8) < (Phase::ResultsCalculated as u8));
    }

    #[test]
    fn method_from_primitive() {
        assert_eq!(Method::try_from(1u8).unwrap(), Method::Fptp);
        assert_eq!(Method::try_from(3u8).unwrap(), Method::Stv);
        assert!(Method::try_from(9u8).is_err());
        assert_eq!(format!("{}", Method::Ams), "AMS");
    }
}
