use crate::tally::{overall_winner, zero_totals, Elected, TallyOutcome};
use crate::*;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The Droop quota: the smallest count that only `seats` candidates can
/// simultaneously reach.
pub fn droop_quota(valid_ballots: u64, seats: u32) -> u64 {
    valid_ballots / (seats as u64 + 1) + 1
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Status {
    Hopeful,
    Elected,
    Eliminated,
}

/// Single Transferable Vote tally.
///
/// Each constituency is counted independently: ballots pile on their first
/// hopeful preference, candidates reaching the Droop quota are elected and
/// their surplus transfers at a fractional value (Gregory method), and when
/// nobody reaches the quota the lowest candidate is eliminated and their
/// pile transfers at full value. Once the hopefuls no longer outnumber the
/// open seats they are all elected, highest count first.
pub(crate) fn tally(election: &Election) -> TallyOutcome {
    let mut events = Vec::new();
    let mut constituency_winners = IndexMap::new();
    let mut party_totals = zero_totals(election);
    let mut first_preferences = Vec::new();

    for constituency in election.constituencies.values() {
        let count = tally_constituency(election, constituency);

        let mut seated = Vec::new();
        for index in count.elected {
            if let Some((name, candidate)) = constituency.candidates.get_index(index) {
                events.push(Event::ConstituencyCandidateElected {
                    constituency: constituency.name,
                    candidate: *name,
                    party: candidate.party,
                });
                seated.push(Elected {
                    candidate: *name,
                    party: candidate.party,
                });
                if let Some(totals) = party_totals.get_mut(&candidate.party) {
                    totals.constituency_seats += 1;
                }
            }
        }
        constituency_winners.insert(constituency.name, seated);

        for (index, count) in count.first_preferences.iter().enumerate() {
            if let Some((name, _)) = constituency.candidates.get_index(index) {
                first_preferences.push((constituency.name, *name, *count));
            }
        }
    }
    events.push(Event::AllConstituencyWinnersCalculated);

    for totals in party_totals.values_mut() {
        totals.total_seats = totals.constituency_seats;
    }

    events.push(Event::ElectionResultsCalculated);
    for (name, totals) in &party_totals {
        events.push(Event::PartyResults {
            party: *name,
            total_seats: totals.total_seats,
        });
    }

    let winner = overall_winner(&party_totals);
    if let Some(party) = winner {
        let total_seats = party_totals
            .get(&party)
            .map(|totals| totals.total_seats)
            .unwrap_or(0);
        events.push(Event::ElectionWinner { party, total_seats });
    }

    TallyOutcome {
        results: ElectionResults {
            constituency_winners,
            party_totals,
            overall_winner: winner,
        },
        events,
        first_preferences,
    }
}

struct ConstituencyCount {
    /// Candidate slate indexes in the order they were elected
    elected: Vec<usize>,
    first_preferences: Vec<u64>,
}

fn tally_constituency(election: &Election, constituency: &Constituency) -> ConstituencyCount {
    let candidate_index: HashMap<Name, usize> = constituency
        .candidates
        .keys()
        .enumerate()
        .map(|(index, name)| (*name, index))
        .collect();

    let mut ballots: Vec<BallotRecord> = election
        .ballots
        .iter()
        .filter(|(voter, _)| {
            election
                .voters
                .get(*voter)
                .map(|v| v.constituency == constituency.name)
                .unwrap_or(false)
        })
        .filter_map(|(_, ballot)| match ballot {
            Ballot::Ranked { ranking } => Some(BallotRecord::new(
                ranking
                    .iter()
                    .filter_map(|name| candidate_index.get(name).cloned())
                    .collect(),
            )),
            _ => None,
        })
        .collect();

    let slots = constituency.candidates.len();
    let mut counts = vec![Decimal::from(0); slots];
    let mut piles: Vec<Vec<usize>> = vec![Vec::new(); slots];
    let mut status = vec![Status::Hopeful; slots];

    for (b, ballot) in ballots.iter().enumerate() {
        if let Some(first) = ballot.ranking.first() {
            counts[*first] += ballot.value;
            piles[*first].push(b);
        }
    }
    let first_preferences: Vec<u64> = piles.iter().map(|pile| pile.len() as u64).collect();

    let quota = Decimal::from(droop_quota(ballots.len() as u64, constituency.seats));
    let mut elected = Vec::new();
    let mut remaining = constituency.seats as usize;

    while remaining > 0 {
        let hopefuls: Vec<usize> = (0..slots)
            .filter(|&i| status[i] == Status::Hopeful)
            .collect();
        if hopefuls.is_empty() {
            break;
        }

        // Once the field no longer outnumbers the open seats, everyone
        // left is elected regardless of quota
        if hopefuls.len() <= remaining {
            let mut by_count = hopefuls;
            by_count.sort_by(|&a, &b| counts[b].cmp(&counts[a]).then(a.cmp(&b)));
            for i in by_count {
                status[i] = Status::Elected;
                elected.push(i);
            }
            break;
        }

        // Highest hopeful at or over quota, earlier-registered winning ties
        let mut winner: Option<usize> = None;
        for &i in &hopefuls {
            if counts[i] < quota {
                continue;
            }
            let leading = winner.map(|w| counts[w]).unwrap_or(quota);
            if winner.is_none() || counts[i] > leading {
                winner = Some(i);
            }
        }

        if let Some(winner) = winner {
            status[winner] = Status::Elected;
            elected.push(winner);
            remaining -= 1;

            let surplus = counts[winner] - quota;
            let pile = std::mem::take(&mut piles[winner]);
            if surplus > Decimal::from(0) && counts[winner] > Decimal::from(0) {
                // Gregory: every paper transfers, scaled to the surplus
                let ratio = surplus / counts[winner];
                for b in pile {
                    ballots[b].value *= ratio;
                    transfer(b, &mut ballots, &status, &mut counts, &mut piles);
                }
            }
            counts[winner] = quota;
        } else {
            // Nobody reached quota: eliminate the lowest hopeful,
            // later-registered losing ties
            let mut lowest = hopefuls[0];
            for &i in &hopefuls[1..] {
                if counts[i] <= counts[lowest] {
                    lowest = i;
                }
            }
            status[lowest] = Status::Eliminated;
            let pile = std::mem::take(&mut piles[lowest]);
            for b in pile {
                transfer(b, &mut ballots, &status, &mut counts, &mut piles);
            }
            counts[lowest] = Decimal::from(0);
        }
    }

    ConstituencyCount {
        elected,
        first_preferences,
    }
}

/// Move one ballot to its next hopeful preference. Exhausted ballots leave
/// the count.
fn transfer(
    b: usize,
    ballots: &mut [BallotRecord],
    status: &[Status],
    counts: &mut [Decimal],
    piles: &mut [Vec<usize>],
) {
    loop {
        ballots[b].pointer += 1;
        let next = match ballots[b].ranking.get(ballots[b].pointer) {
            Some(next) => *next,
            None => return,
        };
        if status[next] == Status::Hopeful {
            counts[next] += ballots[b].value;
            piles[next].push(b);
            return;
        }
    }
}
