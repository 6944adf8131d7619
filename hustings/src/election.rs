use crate::tally;
use crate::*;

use indexmap::IndexMap;
use uuid::Uuid;

/// A single election: its registries, its cast ballots, its event log and,
/// once ended, its results.
///
/// All mutating operations are atomic. Validation happens up front against
/// shared borrows, and state is only touched once every check has passed, so
/// a returned error always means nothing changed.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Election {
    pub(crate) admin: Uuid,

    pub(crate) method: Method,

    pub(crate) phase: Phase,

    /// Chamber size under AMS. Ignored by the other methods, where the seat
    /// count is the sum of constituency seats.
    pub(crate) total_seats: u32,

    pub(crate) constituencies: IndexMap<Name, Constituency>,

    pub(crate) parties: IndexMap<Name, Party>,

    pub(crate) voters: IndexMap<Uuid, Voter>,

    pub(crate) ballots: IndexMap<Uuid, Ballot>,

    pub(crate) events: Vec<Event>,

    pub(crate) results: Option<ElectionResults>,
}

impl Election {
    pub fn new(admin: Uuid, method: Method, total_seats: u32) -> Self {
        Election {
            admin,
            method,
            phase: Phase::Setup,
            total_seats,
            constituencies: IndexMap::new(),
            parties: IndexMap::new(),
            voters: IndexMap::new(),
            ballots: IndexMap::new(),
            events: Vec::new(),
            results: None,
        }
    }

    pub fn admin(&self) -> Uuid {
        self.admin
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Register a constituency. Admin-only, setup phase only.
    ///
    /// `seats` of `None` defaults to a single seat. Seat counts above one
    /// are only valid under STV.
    pub fn add_constituency(
        &mut self,
        caller: Uuid,
        name: Name,
        seats: Option<u32>,
    ) -> Result<(), Error> {
        self.require_admin(caller)?;
        self.require_setup()?;

        if self.constituencies.contains_key(&name) {
            return Err(Error::ConstituencyExists(name));
        }

        let seat_count = seats.unwrap_or(1);
        if seat_count == 0 {
            return Err(Error::ZeroSeats);
        }
        if seat_count > 1 && self.method != Method::Stv {
            return Err(Error::SingleSeatMethod);
        }

        self.constituencies
            .insert(name, Constituency::new(name, seat_count));
        self.events.push(Event::ConstituencyAdded { name, seats });
        Ok(())
    }

    /// Register a candidate in a constituency. Admin-only, setup phase
    /// only. The candidate's party is registered on first sight.
    pub fn add_candidate(
        &mut self,
        caller: Uuid,
        constituency: Name,
        name: Name,
        party: Name,
    ) -> Result<(), Error> {
        self.require_admin(caller)?;
        self.require_setup()?;

        let slate = self
            .constituencies
            .get(&constituency)
            .ok_or(Error::ConstituencyNotFound(constituency))?;
        if slate.candidates.contains_key(&name) {
            return Err(Error::CandidateExists(name));
        }

        if !self.parties.contains_key(&party) {
            self.parties.insert(party, Party::new(party));
            self.events.push(Event::PartyAdded { party });
        }

        if let Some(slate) = self.constituencies.get_mut(&constituency) {
            slate.candidates.insert(name, Candidate::new(name, party));
        }
        self.events.push(Event::CandidateAdded {
            candidate: name,
            party,
            constituency,
        });
        Ok(())
    }

    /// Register a voter in a constituency. Admin-only, setup phase only.
    pub fn add_voter(
        &mut self,
        caller: Uuid,
        identity: Uuid,
        constituency: Name,
    ) -> Result<(), Error> {
        self.require_admin(caller)?;
        self.require_setup()?;

        if !self.constituencies.contains_key(&constituency) {
            return Err(Error::ConstituencyNotFound(constituency));
        }
        if self.voters.contains_key(&identity) {
            return Err(Error::VoterExists);
        }

        self.voters
            .insert(identity, Voter::new(identity, constituency));
        self.events.push(Event::VoterAdded {
            voter: identity,
            constituency,
        });
        Ok(())
    }

    /// Open the election for voting. Admin-only.
    pub fn start_election(&mut self, caller: Uuid) -> Result<(), Error> {
        self.require_admin(caller)?;
        match self.phase {
            Phase::Setup => (),
            Phase::Started => return Err(Error::AlreadyStarted),
            Phase::Ended | Phase::ResultsCalculated => return Err(Error::AlreadyEnded),
        }

        self.phase = Phase::Started;
        self.events.push(Event::ElectionStarted);
        Ok(())
    }

    /// Cast a ballot. The caller must be a registered voter who has not
    /// yet voted, and the ballot shape must match the election method.
    pub fn cast_vote(&mut self, caller: Uuid, ballot: Ballot) -> Result<(), Error> {
        match self.phase {
            Phase::Setup => return Err(Error::NotStarted),
            Phase::Started => (),
            Phase::Ended | Phase::ResultsCalculated => return Err(Error::AlreadyEnded),
        }

        let voter = self.voters.get(&caller).ok_or(Error::NotRegistered)?;
        if voter.has_voted {
            return Err(Error::AlreadyVoted);
        }
        let constituency = voter.constituency;

        // The registration ops can't fail here, the constituency outlives
        // its voters
        let slate = self
            .constituencies
            .get(&constituency)
            .ok_or(Error::ConstituencyNotFound(constituency))?;

        let event = match (self.method, &ballot) {
            (Method::Fptp, Ballot::Single { candidate }) => {
                if !slate.candidates.contains_key(candidate) {
                    return Err(Error::CandidateNotFound(*candidate));
                }
                Event::VoteCast {
                    voter: caller,
                    candidate: Some(*candidate),
                    party: None,
                }
            }
            (Method::Ams, Ballot::Split { candidate, party }) => {
                if !slate.candidates.contains_key(candidate) {
                    return Err(Error::CandidateNotFound(*candidate));
                }
                if !self.parties.contains_key(party) {
                    return Err(Error::PartyNotFound(*party));
                }
                Event::VoteCast {
                    voter: caller,
                    candidate: Some(*candidate),
                    party: Some(*party),
                }
            }
            (Method::Stv, Ballot::Ranked { ranking }) => {
                if ranking.is_empty() {
                    return Err(Error::EmptyRanking);
                }
                if ranking.len() > slate.candidates.len() {
                    return Err(Error::RankingTooLong);
                }
                for (position, candidate) in ranking.iter().enumerate() {
                    if !slate.candidates.contains_key(candidate) {
                        return Err(Error::CandidateNotFound(*candidate));
                    }
                    if ranking[..position].contains(candidate) {
                        return Err(Error::DuplicateRankingEntry);
                    }
                }
                Event::VoteCast {
                    voter: caller,
                    candidate: None,
                    party: None,
                }
            }
            _ => return Err(Error::BallotShapeMismatch),
        };

        match &ballot {
            Ballot::Single { candidate } => {
                if let Some(slate) = self.constituencies.get_mut(&constituency) {
                    if let Some(candidate) = slate.candidates.get_mut(candidate) {
                        candidate.vote_count += 1;
                    }
                }
            }
            Ballot::Split { candidate, party } => {
                if let Some(slate) = self.constituencies.get_mut(&constituency) {
                    if let Some(candidate) = slate.candidates.get_mut(candidate) {
                        candidate.vote_count += 1;
                    }
                }
                if let Some(party) = self.parties.get_mut(party) {
                    party.popular_votes += 1;
                }
            }
            // Ranked ballots are only counted at tally time
            Ballot::Ranked { .. } => (),
        }

        if let Some(voter) = self.voters.get_mut(&caller) {
            voter.has_voted = true;
        }
        self.ballots.insert(caller, ballot);
        self.events.push(event);
        Ok(())
    }

    /// Close the election and run the tally. Admin-only.
    pub fn end_election(&mut self, caller: Uuid) -> Result<(), Error> {
        self.require_admin(caller)?;
        match self.phase {
            Phase::Setup => return Err(Error::NotStarted),
            Phase::Started => (),
            Phase::Ended | Phase::ResultsCalculated => return Err(Error::AlreadyEnded),
        }

        self.phase = Phase::Ended;
        self.events.push(Event::ElectionEnded);
        self.run_tally()
    }

    /// Run the tally on an ended election that does not have results yet.
    /// Admin-only. Ending an election already runs the tally, so this only
    /// succeeds on a state restored from before results were written.
    pub fn calculate_results(&mut self, caller: Uuid) -> Result<(), Error> {
        self.require_admin(caller)?;
        match self.phase {
            Phase::Setup | Phase::Started => return Err(Error::NotEnded),
            Phase::Ended => (),
            Phase::ResultsCalculated => return Err(Error::AlreadyCalculated),
        }
        self.run_tally()
    }

    fn run_tally(&mut self) -> Result<(), Error> {
        if self.results.is_some() {
            return Err(Error::AlreadyCalculated);
        }

        let outcome = tally::run(self);

        for (constituency, candidate, count) in outcome.first_preferences {
            if let Some(slate) = self.constituencies.get_mut(&constituency) {
                if let Some(candidate) = slate.candidates.get_mut(&candidate) {
                    candidate.vote_count = count;
                }
            }
        }
        for (name, totals) in &outcome.results.party_totals {
            if let Some(party) = self.parties.get_mut(name) {
                party.constituency_seats = totals.constituency_seats;
                party.additional_seats = totals.additional_seats;
                party.total_seats = totals.total_seats;
            }
        }

        self.events.extend(outcome.events);
        self.results = Some(outcome.results);
        self.phase = Phase::ResultsCalculated;
        Ok(())
    }

    fn require_admin(&self, caller: Uuid) -> Result<(), Error> {
        if caller != self.admin {
            return Err(Error::NotAdmin);
        }
        Ok(())
    }

    fn require_setup(&self) -> Result<(), Error> {
        match self.phase {
            Phase::Setup => Ok(()),
            Phase::Started => Err(Error::AlreadyStarted),
            Phase::Ended | Phase::ResultsCalculated => Err(Error::AlreadyEnded),
        }
    }

    // ------------------------------------------------------------------
    // Queries

    pub fn constituency_names(&self) -> Vec<Name> {
        self.constituencies.keys().cloned().collect()
    }

    pub fn constituency(&self, name: Name) -> Result<&Constituency, Error> {
        self.constituencies
            .get(&name)
            .ok_or(Error::ConstituencyNotFound(name))
    }

    pub fn candidate_names(&self, constituency: Name) -> Result<Vec<Name>, Error> {
        Ok(self.constituency(constituency)?.candidates.keys().cloned().collect())
    }

    pub fn candidates(&self, constituency: Name) -> Result<Vec<&Candidate>, Error> {
        Ok(self.constituency(constituency)?.candidates.values().collect())
    }

    pub fn party_names(&self) -> Vec<Name> {
        self.parties.keys().cloned().collect()
    }

    pub fn party(&self, name: Name) -> Result<&Party, Error> {
        self.parties.get(&name).ok_or(Error::PartyNotFound(name))
    }

    pub fn eligible_voters(&self) -> Vec<Uuid> {
        self.voters.keys().cloned().collect()
    }

    pub fn eligible_voters_and_constituencies(&self) -> Vec<(Uuid, Name)> {
        self.voters
            .values()
            .map(|voter| (voter.identity, voter.constituency))
            .collect()
    }

    pub fn voter_constituency(&self, voter: Uuid) -> Result<Name, Error> {
        self.voters
            .get(&voter)
            .map(|voter| voter.constituency)
            .ok_or(Error::NotRegistered)
    }

    pub fn voters_who_have_voted(&self) -> Vec<Uuid> {
        self.voters
            .values()
            .filter(|voter| voter.has_voted)
            .map(|voter| voter.identity)
            .collect()
    }

    pub fn voters_who_have_not_voted(&self) -> Vec<Uuid> {
        self.voters
            .values()
            .filter(|voter| !voter.has_voted)
            .map(|voter| voter.identity)
            .collect()
    }

    pub fn ballot(&self, voter: Uuid) -> Option<&Ballot> {
        self.ballots.get(&voter)
    }

    pub fn number_of_votes(&self) -> u64 {
        self.ballots.len() as u64
    }

    /// Total seats in play: the fixed chamber size under AMS, the sum of
    /// constituency seats otherwise.
    pub fn number_of_seats(&self) -> u32 {
        match self.method {
            Method::Ams => self.total_seats,
            Method::Fptp | Method::Stv => {
                self.constituencies.values().map(|c| c.seats).sum()
            }
        }
    }

    pub fn number_of_constituencies(&self) -> usize {
        self.constituencies.len()
    }

    /// The Droop quota a candidate must reach to be elected in the given
    /// constituency, from the ballots cast there so far.
    pub fn droop_quota(&self, constituency: Name) -> Result<u64, Error> {
        let slate = self.constituency(constituency)?;
        let cast = self
            .ballots
            .keys()
            .filter(|voter| {
                self.voters
                    .get(*voter)
                    .map(|v| v.constituency == constituency)
                    .unwrap_or(false)
            })
            .count() as u64;
        Ok(droop_quota(cast, slate.seats))
    }

    pub fn constituency_winners(&self) -> Result<&IndexMap<Name, Vec<Elected>>, Error> {
        Ok(&self.results()?.constituency_winners)
    }

    pub fn election_winner(&self) -> Result<Option<Name>, Error> {
        Ok(self.results()?.overall_winner)
    }

    pub fn party_seats(&self, party: Name) -> Result<&PartyTotals, Error> {
        self.results()?
            .party_totals
            .get(&party)
            .ok_or(Error::PartyNotFound(party))
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn results(&self) -> Result<&ElectionResults, Error> {
        self.results.as_ref().ok_or(Error::ResultsNotCalculated)
    }
}
