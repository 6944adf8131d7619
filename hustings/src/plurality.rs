use crate::*;

/// The plurality winner of a constituency slate, or `None` for an empty
/// slate.
///
/// Ties go to the earlier-registered candidate: a later candidate only
/// displaces the leader with a strictly greater count.
pub fn plurality_winner(constituency: &Constituency) -> Option<&Candidate> {
    let mut winner: Option<&Candidate> = None;
    for candidate in constituency.candidates.values() {
        let leading = winner.map(|w| w.vote_count).unwrap_or(0);
        if winner.is_none() || candidate.vote_count > leading {
            winner = Some(candidate);
        }
    }
    winner
}
