//! A scouting session: one match, one roster, one stat sheet per athlete.
//!
//! The session is created when scouting starts and dropped when it ends.
//! Nothing is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{
    Athlete, Direction, Fundamental, FundamentalStat, JerseyNumber, Mark, PlayerStats,
    RawCounters, TeamStats,
};
use crate::report::{Language, Report};
use crate::roster::{Roster, RosterErrorKind, RosterLineError};

/// Errors raised by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Jersey number {0} is already registered")]
    DuplicateJersey(JerseyNumber),

    #[error("No athlete with jersey number {0}")]
    UnknownAthlete(JerseyNumber),

    #[error("Blocked attempts are only tracked for attack, not {0}")]
    BlockedOutsideAttack(Fundamental),

    #[error("Invalid roster entry: {0}")]
    Roster(RosterErrorKind),

    #[error("Tally of {0} attempts exceeds the limit of {}", MAX_TALLY)]
    TallyTooLarge(u64),
}

/// Largest total one tally row may be set to.
pub const MAX_TALLY: u64 = (u32::MAX / 2) as u64;

/// One tally change coming from the scouting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoutEvent {
    pub jersey_number: JerseyNumber,
    pub fundamental: Fundamental,
    pub mark: Mark,
    #[serde(default)]
    pub direction: Direction,
}

impl ScoutEvent {
    pub fn increment(jersey_number: JerseyNumber, fundamental: Fundamental, mark: Mark) -> Self {
        Self {
            jersey_number,
            fundamental,
            mark,
            direction: Direction::Increment,
        }
    }

    pub fn decrement(jersey_number: JerseyNumber, fundamental: Fundamental, mark: Mark) -> Self {
        Self {
            jersey_number,
            fundamental,
            mark,
            direction: Direction::Decrement,
        }
    }
}

/// Result of replaying a batch of events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    pub applied: usize,
    pub rejected: usize,
}

/// Result of importing a roster file into a session.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub added: Vec<JerseyNumber>,
    pub errors: Vec<RosterLineError>,
}

/// Scouting state for one match.
#[derive(Debug, Clone)]
pub struct ScoutingSession {
    match_name: String,
    started_at: DateTime<Utc>,
    roster: Roster,
    /// One entry per roster athlete, in registration order
    players: Vec<PlayerStats>,
}

impl ScoutingSession {
    pub fn new(match_name: impl Into<String>) -> Self {
        let match_name = match_name.into();
        info!("Starting scouting session {:?}", match_name);
        Self {
            match_name,
            started_at: Utc::now(),
            roster: Roster::new(),
            players: Vec::new(),
        }
    }

    pub fn match_name(&self) -> &str {
        &self.match_name
    }

    pub fn set_match_name(&mut self, match_name: impl Into<String>) {
        self.match_name = match_name.into();
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Register an athlete and open a zeroed stat sheet for them.
    pub fn add_athlete(&mut self, athlete: Athlete) -> Result<&PlayerStats, SessionError> {
        let athlete = match self.roster.add(athlete) {
            Ok(athlete) => athlete,
            Err(RosterErrorKind::DuplicateNumber(n)) => {
                return Err(SessionError::DuplicateJersey(n))
            }
            Err(other) => return Err(SessionError::Roster(other)),
        };

        info!(
            "Registered athlete #{} {}",
            athlete.jersey_number(),
            athlete.display_name()
        );
        self.players.push(PlayerStats::new(athlete));
        Ok(&self.players[self.players.len() - 1])
    }

    /// Import a roster file, opening a stat sheet for every added athlete.
    pub fn import_roster(&mut self, text: &str) -> ImportSummary {
        let (added, errors) = self.roster.import(text);
        let added = added
            .into_iter()
            .map(|athlete| {
                let number = athlete.jersey_number();
                self.players.push(PlayerStats::new(athlete));
                number
            })
            .collect();

        ImportSummary { added, errors }
    }

    /// Drop an athlete and their stats. Later team totals no longer include
    /// them.
    pub fn remove_athlete(&mut self, number: JerseyNumber) -> Result<PlayerStats, SessionError> {
        let index = self
            .players
            .iter()
            .position(|p| p.jersey_number() == number)
            .ok_or(SessionError::UnknownAthlete(number))?;

        self.roster.remove(number);
        info!("Removed athlete #{}", number);
        Ok(self.players.remove(index))
    }

    pub fn player(&self, number: JerseyNumber) -> Option<&PlayerStats> {
        self.players.iter().find(|p| p.jersey_number() == number)
    }

    fn player_mut(&mut self, number: JerseyNumber) -> Result<&mut PlayerStats, SessionError> {
        self.players
            .iter_mut()
            .find(|p| p.jersey_number() == number)
            .ok_or(SessionError::UnknownAthlete(number))
    }

    pub fn players(&self) -> &[PlayerStats] {
        &self.players
    }

    /// Apply one scouting event. Returns the updated stat.
    pub fn apply(&mut self, event: &ScoutEvent) -> Result<&FundamentalStat, SessionError> {
        let player = self.player_mut(event.jersey_number)?;
        let stat = player.fundamental_mut(event.fundamental);

        if !stat.apply(event.mark, event.direction) {
            return Err(SessionError::BlockedOutsideAttack(event.fundamental));
        }

        debug!(
            "#{} {} {} {:?} -> {} attempts",
            event.jersey_number,
            event.fundamental,
            event.mark,
            event.direction,
            stat.total_attempts()
        );
        Ok(stat)
    }

    /// Apply events in order, skipping the ones that cannot be applied.
    pub fn apply_all<'a, I>(&mut self, events: I) -> ApplySummary
    where
        I: IntoIterator<Item = &'a ScoutEvent>,
    {
        let mut summary = ApplySummary::default();
        for event in events {
            match self.apply(event) {
                Ok(_) => summary.applied += 1,
                Err(e) => {
                    warn!("Skipping scouting event: {}", e);
                    summary.rejected += 1;
                }
            }
        }
        summary
    }

    /// Overwrite all counters of one fundamental for one athlete.
    pub fn replace_counters(
        &mut self,
        number: JerseyNumber,
        fundamental: Fundamental,
        counters: RawCounters,
    ) -> Result<&FundamentalStat, SessionError> {
        if counters.blocked > 0 && !fundamental.tracks_blocked() {
            return Err(SessionError::BlockedOutsideAttack(fundamental));
        }
        if counters.sum() > MAX_TALLY {
            return Err(SessionError::TallyTooLarge(counters.sum()));
        }

        let player = self.player_mut(number)?;
        player.replace_counters(fundamental, counters);
        debug!("#{} {} counters replaced", number, fundamental);
        Ok(player.fundamental(fundamental))
    }

    /// Team totals over the athletes currently registered.
    pub fn team_stats(&self) -> TeamStats {
        TeamStats::aggregate(&self.players)
    }

    /// Build the statistical report for the current state.
    pub fn report(&self, language: Language) -> Report {
        Report::build(&self.match_name, &self.players, language)
    }
}
