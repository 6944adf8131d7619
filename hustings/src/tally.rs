use crate::{ams, stv};
use crate::*;

use indexmap::IndexMap;

/// A candidate holding a seat.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Elected {
    pub candidate: Name,
    pub party: Name,
}

/// Per-party seat totals after the tally.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PartyTotals {
    pub constituency_seats: u32,
    pub additional_seats: u32,
    pub total_seats: u32,
}

/// The complete outcome of a tallied election.
///
/// Both maps preserve registration order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElectionResults {
    pub constituency_winners: IndexMap<Name, Vec<Elected>>,
    pub party_totals: IndexMap<Name, PartyTotals>,
    pub overall_winner: Option<Name>,
}

/// What a tally hands back to the election: the results, the result events
/// to append, and any vote counts only known at tally time.
pub(crate) struct TallyOutcome {
    pub results: ElectionResults,
    pub events: Vec<Event>,
    pub first_preferences: Vec<(Name, Name, u64)>,
}

pub(crate) fn run(election: &Election) -> TallyOutcome {
    match election.method {
        Method::Fptp => fptp(election),
        Method::Ams => ams::tally(election),
        Method::Stv => stv::tally(election),
    }
}

/// One `PartyTotals` per registered party, in registration order.
pub(crate) fn zero_totals(election: &Election) -> IndexMap<Name, PartyTotals> {
    election
        .parties
        .keys()
        .map(|name| (*name, PartyTotals::default()))
        .collect()
}

/// The party with the most total seats, earlier-registered winning ties.
pub(crate) fn overall_winner(totals: &IndexMap<Name, PartyTotals>) -> Option<Name> {
    let mut winner: Option<(Name, u32)> = None;
    for (name, party) in totals {
        let leading = winner.map(|(_, seats)| seats).unwrap_or(0);
        if winner.is_none() || party.total_seats > leading {
            winner = Some((*name, party.total_seats));
        }
    }
    winner.map(|(name, _)| name)
}

fn fptp(election: &Election) -> TallyOutcome {
    let mut events = Vec::new();
    let mut constituency_winners = IndexMap::new();
    let mut party_totals = zero_totals(election);

    for constituency in election.constituencies.values() {
        let winner = match plurality_winner(constituency) {
            Some(winner) => winner,
            None => continue,
        };
        events.push(Event::ConstituencyWinner {
            constituency: constituency.name,
            candidate: winner.name,
            party: winner.party,
        });
        constituency_winners.insert(
            constituency.name,
            vec![Elected {
                candidate: winner.name,
                party: winner.party,
            }],
        );
        if let Some(totals) = party_totals.get_mut(&winner.party) {
            totals.constituency_seats += 1;
            totals.total_seats += 1;
        }
    }
    events.push(Event::AllConstituencyWinnersCalculated);
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
        first_preferences: Vec::new(),
    }
}
