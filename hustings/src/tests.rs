use crate::*;

use uuid::Uuid;

fn n(s: &str) -> Name {
    Name::new(s).unwrap()
}

fn events_after_close(election: &Election) -> &[Event] {
    let closed = election
        .events()
        .iter()
        .position(|event| *event == Event::ElectionEnded)
        .unwrap();
    &election.events()[closed + 1..]
}

#[test]
fn fptp_general_election() {
    let admin = Uuid::new_v4();
    let mut election = Election::new(admin, Method::Fptp, 0);

    // Three-way races in four constituencies. Candidate registration order
    // fixes party registration order: Conservatives, Labour, Reform.
    let races: &[(&str, &[(&str, &str, usize)])] = &[
        (
            "Harrogate",
            &[
                ("Jim Fellow", "Conservatives", 10),
                ("Anna Mcnally", "Labour", 5),
                ("Bill Hill", "Reform", 9),
            ],
        ),
        (
            "Knaresborough",
            &[
                ("Steve Smith", "Conservatives", 8),
                ("Hope Lowe", "Labour", 4),
                ("Dave Walker", "Reform", 3),
            ],
        ),
        (
            "York",
            &[
                ("Angela Crow", "Conservatives", 3),
                ("Garry Bell", "Labour", 10),
                ("Finn Rose", "Reform", 2),
            ],
        ),
        (
            "Leeds",
            &[
                ("Olivia Park", "Conservatives", 8),
                ("Tim Brown", "Labour", 9),
                ("Jake Stone", "Reform", 10),
            ],
        ),
    ];

    let mut plan: Vec<(Uuid, Name)> = Vec::new();
    for (constituency, slate) in races {
        election
            .add_constituency(admin, n(constituency), None)
            .unwrap();
        for (candidate, party, votes) in *slate {
            election
                .add_candidate(admin, n(constituency), n(candidate), n(party))
                .unwrap();
            for _ in 0..*votes {
                let voter = Uuid::new_v4();
                election.add_voter(admin, voter, n(constituency)).unwrap();
                plan.push((voter, n(candidate)));
            }
        }
    }

    election.start_election(admin).unwrap();
    for (voter, candidate) in plan {
        election
            .cast_vote(voter, Ballot::Single { candidate })
            .unwrap();
    }
    assert_eq!(election.number_of_votes(), 81);
    election.end_election(admin).unwrap();

    assert_eq!(
        events_after_close(&election),
        &[
            Event::ConstituencyWinner {
                constituency: n("Harrogate"),
                candidate: n("Jim Fellow"),
                party: n("Conservatives"),
            },
            Event::ConstituencyWinner {
                constituency: n("Knaresborough"),
                candidate: n("Steve Smith"),
                party: n("Conservatives"),
            },
            Event::ConstituencyWinner {
                constituency: n("York"),
                candidate: n("Garry Bell"),
                party: n("Labour"),
            },
            Event::ConstituencyWinner {
                constituency: n("Leeds"),
                candidate: n("Jake Stone"),
                party: n("Reform"),
            },
            Event::AllConstituencyWinnersCalculated,
            Event::ElectionResultsCalculated,
            Event::PartyResults {
                party: n("Conservatives"),
                total_seats: 2,
            },
            Event::PartyResults {
                party: n("Labour"),
                total_seats: 1,
            },
            Event::PartyResults {
                party: n("Reform"),
                total_seats: 1,
            },
            Event::ElectionWinner {
                party: n("Conservatives"),
                total_seats: 2,
            },
        ]
    );

    assert_eq!(election.election_winner().unwrap(), Some(n("Conservatives")));
    assert_eq!(election.party_seats(n("Labour")).unwrap().total_seats, 1);
    let winners = election.constituency_winners().unwrap();
    assert_eq!(
        winners.get(&n("York")).unwrap(),
        &vec![Elected {
            candidate: n("Garry Bell"),
            party: n("Labour"),
        }]
    );

    // Tallied counts match the cast ballots
    assert_eq!(
        election
            .constituency(n("Leeds"))
            .unwrap()
            .candidates
            .get(&n("Tim Brown"))
            .unwrap()
            .vote_count,
        9
    );
}

#[test]
fn ams_top_up_allocation() {
    let admin = Uuid::new_v4();
    // 100-seat chamber over 70 single-seat constituencies, 10 voters each
    let mut election = Election::new(admin, Method::Ams, 100);

    let parties = ["Conservatives", "Labour", "Liberal Democrats", "Reform"];
    let mut plan: Vec<(Uuid, Name, Name)> = Vec::new();
    let mut party_votes_left: Vec<(Name, u64)> = vec![
        (n("Conservatives"), 301),
        (n("Labour"), 287),
        (n("Liberal Democrats"), 91),
        (n("Reform"), 21),
    ];

    for index in 0..70 {
        let constituency = n(&format!("Constituency {}", index));
        election.add_constituency(admin, constituency, None).unwrap();
        for party in &parties {
            let candidate = n(&format!("{} {}", party, index));
            election
                .add_candidate(admin, constituency, candidate, n(party))
                .unwrap();
        }

        // Constituency winners: 54 Conservative, 11 Labour, 5 Reform
        let winner = if index < 54 {
            n(&format!("Conservatives {}", index))
        } else if index < 65 {
            n(&format!("Labour {}", index))
        } else {
            n(&format!("Reform {}", index))
        };

        for _ in 0..10 {
            let voter = Uuid::new_v4();
            election.add_voter(admin, voter, constituency).unwrap();
            // Party-list votes run down the planned national totals
            let party = {
                let slot = party_votes_left
                    .iter_mut()
                    .find(|(_, left)| *left > 0)
                    .unwrap();
                slot.1 -= 1;
                slot.0
            };
            plan.push((voter, winner, party));
        }
    }

    election.start_election(admin).unwrap();
    for (voter, candidate, party) in plan {
        election
            .cast_vote(voter, Ballot::Split { candidate, party })
            .unwrap();
    }
    election.end_election(admin).unwrap();

    let tail = events_after_close(&election);
    assert_eq!(
        &tail[70..75],
        &[
            Event::PartyConstituencyResults {
                party: n("Conservatives"),
                seats: 54,
            },
            Event::PartyConstituencyResults {
                party: n("Labour"),
                seats: 11,
            },
            Event::PartyConstituencyResults {
                party: n("Liberal Democrats"),
                seats: 0,
            },
            Event::PartyConstituencyResults {
                party: n("Reform"),
                seats: 5,
            },
            Event::AllConstituencyWinnersCalculated,
        ]
    );

    // Entitlements over 700 popular votes: Conservatives 43 of 54 held
    // (satisfied), Labour 41 of 11, Liberal Democrats 13 of 0, Reform 3 of
    // 5 (satisfied). The 30-seat pool splits 287:91 between the two
    // under-represented parties, rounded down.
    assert_eq!(
        &tail[75..78],
        &[
            Event::AdditionalSeatsAllocated {
                party: n("Labour"),
                seats: 22,
            },
            Event::AdditionalSeatsAllocated {
                party: n("Liberal Democrats"),
                seats: 7,
            },
            Event::AllAdditionalSeatsAllocated,
        ]
    );

    let conservative = election.party_seats(n("Conservatives")).unwrap();
    assert_eq!(conservative.constituency_seats, 54);
    assert_eq!(conservative.additional_seats, 0);
    assert_eq!(conservative.total_seats, 54);

    let labour = election.party_seats(n("Labour")).unwrap();
    assert_eq!(labour.constituency_seats, 11);
    assert_eq!(labour.additional_seats, 22);
    assert_eq!(labour.total_seats, 33);

    assert_eq!(
        election.party_seats(n("Liberal Democrats")).unwrap().total_seats,
        7
    );
    assert_eq!(election.party_seats(n("Reform")).unwrap().total_seats, 5);

    // Two pool seats stay unallocated to rounding
    assert_eq!(election.election_winner().unwrap(), Some(n("Conservatives")));
    assert_eq!(
        tail.last(),
        Some(&Event::ElectionWinner {
            party: n("Conservatives"),
            total_seats: 54,
        })
    );

    // Popular vote landed where planned
    assert_eq!(election.party(n("Labour")).unwrap().popular_votes, 287);
    assert_eq!(election.party(n("Reform")).unwrap().popular_votes, 21);
}

fn stv_election(
    admin: Uuid,
    seats: u32,
    candidates: &[(&str, &str)],
    ballots: &[(usize, &[&str])],
) -> Election {
    let mut election = Election::new(admin, Method::Stv, 0);
    election
        .add_constituency(admin, n("Borough"), Some(seats))
        .unwrap();
    for (candidate, party) in candidates {
        election
            .add_candidate(admin, n("Borough"), n(candidate), n(party))
            .unwrap();
    }

    let mut plan = Vec::new();
    for (copies, ranking) in ballots {
        for _ in 0..*copies {
            let voter = Uuid::new_v4();
            election.add_voter(admin, voter, n("Borough")).unwrap();
            plan.push((voter, ranking.iter().map(|name| n(name)).collect::<Vec<_>>()));
        }
    }

    election.start_election(admin).unwrap();
    for (voter, ranking) in plan {
        election
            .cast_vote(voter, Ballot::Ranked { ranking })
            .unwrap();
    }
    election.end_election(admin).unwrap();
    election
}

#[test]
fn stv_single_seat_elimination() {
    let admin = Uuid::new_v4();
    // 100 ballots, quota 51. Nobody reaches it on first preferences, so the
    // lowest candidate is eliminated and their transfers decide the seat.
    let election = stv_election(
        admin,
        1,
        &[
            ("Alice Aston", "Greens"),
            ("Bob Bridges", "Labour"),
            ("Carol Chen", "Conservatives"),
            ("Dan Drew", "Independent"),
        ],
        &[
            (45, &["Alice Aston"]),
            (20, &["Bob Bridges"]),
            (25, &["Carol Chen"]),
            (10, &["Dan Drew", "Alice Aston"]),
        ],
    );

    assert_eq!(election.droop_quota(n("Borough")).unwrap(), 51);
    let winners = election.constituency_winners().unwrap();
    assert_eq!(
        winners.get(&n("Borough")).unwrap(),
        &vec![Elected {
            candidate: n("Alice Aston"),
            party: n("Greens"),
        }]
    );
    assert_eq!(election.election_winner().unwrap(), Some(n("Greens")));

    // First preferences are recorded, not post-transfer counts
    let borough = election.constituency(n("Borough")).unwrap();
    assert_eq!(borough.candidates.get(&n("Alice Aston")).unwrap().vote_count, 45);
    assert_eq!(borough.candidates.get(&n("Dan Drew")).unwrap().vote_count, 10);
}

#[test]
fn stv_surplus_transfers_fill_three_seats() {
    let admin = Uuid::new_v4();
    // 100 ballots, 3 seats, quota 26. The first winner's surplus elects the
    // second, whose surplus elects the third.
    let election = stv_election(
        admin,
        3,
        &[
            ("Alice Aston", "Greens"),
            ("Bob Bridges", "Greens"),
            ("Carol Chen", "Labour"),
            ("Dan Drew", "Conservatives"),
        ],
        &[
            (45, &["Alice Aston", "Bob Bridges", "Carol Chen"]),
            (10, &["Bob Bridges", "Carol Chen"]),
            (25, &["Carol Chen"]),
            (20, &["Dan Drew"]),
        ],
    );

    assert_eq!(election.droop_quota(n("Borough")).unwrap(), 26);
    let winners = election.constituency_winners().unwrap();
    assert_eq!(
        winners
            .get(&n("Borough"))
            .unwrap()
            .iter()
            .map(|seat| seat.candidate)
            .collect::<Vec<_>>(),
        vec![n("Alice Aston"), n("Bob Bridges"), n("Carol Chen")]
    );

    // Greens hold two of the three seats
    assert_eq!(election.party_seats(n("Greens")).unwrap().total_seats, 2);
    assert_eq!(election.election_winner().unwrap(), Some(n("Greens")));

    let tail = events_after_close(&election);
    assert_eq!(
        &tail[..3],
        &[
            Event::ConstituencyCandidateElected {
                constituency: n("Borough"),
                candidate: n("Alice Aston"),
                party: n("Greens"),
            },
            Event::ConstituencyCandidateElected {
                constituency: n("Borough"),
                candidate: n("Bob Bridges"),
                party: n("Greens"),
            },
            Event::ConstituencyCandidateElected {
                constituency: n("Borough"),
                candidate: n("Carol Chen"),
                party: n("Labour"),
            },
        ]
    );
}

#[test]
fn stv_remaining_hopefuls_fill_open_seats() {
    let admin = Uuid::new_v4();
    // Two seats, 24 ballots, quota 9. Nobody reaches quota and transfers
    // all exhaust, so eliminations run until the survivors fill the seats
    // in count order.
    let election = stv_election(
        admin,
        2,
        &[
            ("Alice Aston", "Greens"),
            ("Bob Bridges", "Labour"),
            ("Carol Chen", "Conservatives"),
            ("Dan Drew", "Independent"),
        ],
        &[
            (8, &["Alice Aston"]),
            (7, &["Bob Bridges"]),
            (6, &["Carol Chen"]),
            (3, &["Dan Drew"]),
        ],
    );

    assert_eq!(election.droop_quota(n("Borough")).unwrap(), 9);
    assert_eq!(
        election
            .constituency_winners()
            .unwrap()
            .get(&n("Borough"))
            .unwrap()
            .iter()
            .map(|seat| seat.candidate)
            .collect::<Vec<_>>(),
        vec![n("Alice Aston"), n("Bob Bridges")]
    );
}

#[test]
fn state_snapshot_round_trip() {
    let admin = Uuid::new_v4();
    let voter = Uuid::new_v4();
    let mut election = Election::new(admin, Method::Fptp, 0);
    election.add_constituency(admin, n("Hexham"), None).unwrap();
    election
        .add_candidate(admin, n("Hexham"), n("Joe Morris"), n("Labour"))
        .unwrap();
    election.add_voter(admin, voter, n("Hexham")).unwrap();
    election.start_election(admin).unwrap();
    election
        .cast_vote(
            voter,
            Ballot::Single {
                candidate: n("Joe Morris"),
            },
        )
        .unwrap();

    let snapshot = serde_json::to_string(&election).unwrap();
    let mut restored: Election = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(restored.phase(), Phase::Started);
    assert_eq!(restored.events(), election.events());

    restored.end_election(admin).unwrap();
    assert_eq!(restored.election_winner().unwrap(), Some(n("Labour")));
}
