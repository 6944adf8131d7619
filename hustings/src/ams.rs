use crate::tally::{overall_winner, zero_totals, Elected, TallyOutcome};
use crate::*;

use indexmap::IndexMap;

/// Additional Member System tally.
///
/// Constituency seats go to plurality winners exactly as under FPTP. The
/// remaining seats in the chamber are then topped up from the party-list
/// vote: a party is under-represented when its proportional entitlement,
/// `floor(total_seats * popular / total_popular)`, exceeds the constituency
/// seats it already holds, and the top-up pool is split between
/// under-represented parties in proportion to their popular vote, rounded
/// down. Fractional remainders stay unallocated.
pub(crate) fn tally(election: &Election) -> TallyOutcome {
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
        }
    }

    for (name, totals) in &party_totals {
        events.push(Event::PartyConstituencyResults {
            party: *name,
            seats: totals.constituency_seats,
        });
    }
    events.push(Event::AllConstituencyWinnersCalculated);

    let total_seats = election.total_seats as u64;
    let seats_won: u64 = party_totals
        .values()
        .map(|totals| totals.constituency_seats as u64)
        .sum();
    let pool = total_seats.saturating_sub(seats_won);
    let total_popular: u64 = election
        .parties
        .values()
        .map(|party| party.popular_votes)
        .sum();

    // A party is owed top-up seats when its proportional entitlement
    // exceeds the constituency seats it already won
    let mut needy_votes = 0u64;
    if total_popular > 0 {
        for (name, party) in &election.parties {
            let entitlement = total_seats * party.popular_votes / total_popular;
            let held = party_totals
                .get(name)
                .map(|totals| totals.constituency_seats as u64)
                .unwrap_or(0);
            if entitlement > held {
                needy_votes += party.popular_votes;
            }
        }
    }

    if needy_votes > 0 {
        for (name, party) in &election.parties {
            let entitlement = total_seats * party.popular_votes / total_popular;
            let totals = match party_totals.get_mut(name) {
                Some(totals) => totals,
                None => continue,
            };
            if entitlement > totals.constituency_seats as u64 {
                let additional = pool * party.popular_votes / needy_votes;
                totals.additional_seats = additional as u32;
                if additional > 0 {
                    events.push(Event::AdditionalSeatsAllocated {
                        party: *name,
                        seats: additional as u32,
                    });
                }
            }
        }
    }
    events.push(Event::AllAdditionalSeatsAllocated);

    for totals in party_totals.values_mut() {
        totals.total_seats = totals.constituency_seats + totals.additional_seats;
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
        first_preferences: Vec::new(),
    }
}
