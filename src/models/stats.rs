//! Per-player and team-wide statistics.

use std::sync::Arc;

use serde::Serialize;

use super::{Athlete, Fundamental, FundamentalStat, JerseyNumber, RawCounters};

/// The four fundamental stats of one athlete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    /// Shared with the roster; never mutated here
    athlete: Arc<Athlete>,
    service: FundamentalStat,
    reception: FundamentalStat,
    attack: FundamentalStat,
    defense: FundamentalStat,
}

impl PlayerStats {
    /// Zeroed stats for a newly registered athlete.
    pub fn new(athlete: Arc<Athlete>) -> Self {
        Self {
            athlete,
            service: FundamentalStat::new(Fundamental::Service),
            reception: FundamentalStat::new(Fundamental::Reception),
            attack: FundamentalStat::new(Fundamental::Attack),
            defense: FundamentalStat::new(Fundamental::Defense),
        }
    }

    pub fn athlete(&self) -> &Athlete {
        &self.athlete
    }

    pub fn jersey_number(&self) -> JerseyNumber {
        self.athlete.jersey_number()
    }

    pub fn fundamental(&self, fundamental: Fundamental) -> &FundamentalStat {
        match fundamental {
            Fundamental::Service => &self.service,
            Fundamental::Reception => &self.reception,
            Fundamental::Attack => &self.attack,
            Fundamental::Defense => &self.defense,
        }
    }

    pub fn fundamental_mut(&mut self, fundamental: Fundamental) -> &mut FundamentalStat {
        match fundamental {
            Fundamental::Service => &mut self.service,
            Fundamental::Reception => &mut self.reception,
            Fundamental::Attack => &mut self.attack,
            Fundamental::Defense => &mut self.defense,
        }
    }

    /// Stats in report order.
    pub fn iter(&self) -> impl Iterator<Item = &FundamentalStat> {
        Fundamental::ALL.into_iter().map(|f| self.fundamental(f))
    }

    /// Overwrite every counter of one fundamental at once.
    pub fn replace_counters(&mut self, fundamental: Fundamental, counters: RawCounters) {
        *self.fundamental_mut(fundamental) = FundamentalStat::with_counters(fundamental, counters);
    }

    /// Recompute all four fundamentals.
    pub fn recompute_all(&mut self) {
        for fundamental in Fundamental::ALL {
            self.fundamental_mut(fundamental).recompute();
        }
    }
}

/// Team totals: raw counters summed over players, metrics recomputed from
/// the sums (never averaged from the players' own percentages).
///
/// A snapshot; it keeps no reference to the players it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStats {
    /// Jersey numbers that contributed, ascending
    players: Vec<JerseyNumber>,
    service: FundamentalStat,
    reception: FundamentalStat,
    attack: FundamentalStat,
    defense: FundamentalStat,
}

impl TeamStats {
    /// Sum the raw counters of every player and derive team metrics.
    ///
    /// The result depends only on the multiset of player counters: the
    /// iteration order does not matter and an empty input yields zeroed
    /// stats.
    pub fn aggregate<'a, I>(players: I) -> Self
    where
        I: IntoIterator<Item = &'a PlayerStats>,
    {
        let mut totals = [RawCounters::default(); 4];
        let mut jerseys = Vec::new();

        for player in players {
            jerseys.push(player.jersey_number());
            for (total, fundamental) in totals.iter_mut().zip(Fundamental::ALL) {
                *total += player.fundamental(fundamental).counters();
            }
        }

        jerseys.sort();
        let [service, reception, attack, defense] = totals;

        Self {
            players: jerseys,
            service: FundamentalStat::with_counters(Fundamental::Service, service),
            reception: FundamentalStat::with_counters(Fundamental::Reception, reception),
            attack: FundamentalStat::with_counters(Fundamental::Attack, attack),
            defense: FundamentalStat::with_counters(Fundamental::Defense, defense),
        }
    }

    /// Jersey numbers included in the totals.
    pub fn players(&self) -> &[JerseyNumber] {
        &self.players
    }

    pub fn fundamental(&self, fundamental: Fundamental) -> &FundamentalStat {
        match fundamental {
            Fundamental::Service => &self.service,
            Fundamental::Reception => &self.reception,
            Fundamental::Attack => &self.attack,
            Fundamental::Defense => &self.defense,
        }
    }

    /// Stats in report order.
    pub fn iter(&self) -> impl Iterator<Item = &FundamentalStat> {
        Fundamental::ALL.into_iter().map(|f| self.fundamental(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, Mark, Outcome};
    use pretty_assertions::assert_eq;

    fn player(number: i64, name: &str) -> PlayerStats {
        let athlete = Athlete::new(JerseyNumber::new(number).unwrap(), name, None).unwrap();
        PlayerStats::new(Arc::new(athlete))
    }

    fn tally(player: &mut PlayerStats, fundamental: Fundamental, mark: Mark, times: u32) {
        let stat = player.fundamental_mut(fundamental);
        for _ in 0..times {
            stat.apply(mark, Direction::Increment);
        }
    }

    fn sample_players() -> Vec<PlayerStats> {
        let mut setter = player(1, "Alessia");
        tally(&mut setter, Fundamental::Service, Mark::Excellent, 1);
        tally(&mut setter, Fundamental::Defense, Mark::Good, 3);

        let mut hitter = player(2, "Miriam");
        tally(&mut hitter, Fundamental::Service, Mark::Excellent, 2);
        tally(&mut hitter, Fundamental::Service, Mark::Good, 1);
        tally(&mut hitter, Fundamental::Service, Mark::Error, 1);
        tally(&mut hitter, Fundamental::Attack, Mark::Excellent, 4);
        tally(&mut hitter, Fundamental::Attack, Mark::Blocked, 2);

        let mut libero = player(5, "Monica");
        tally(&mut libero, Fundamental::Reception, Mark::Excellent, 3);
        tally(&mut libero, Fundamental::Reception, Mark::Error, 1);

        vec![setter, hitter, libero]
    }

    #[test]
    fn test_player_stats_start_zeroed() {
        let stats = player(4, "Sara");
        for stat in stats.iter() {
            assert_eq!(stat.total_attempts(), 0);
            assert_eq!(stat.efficiency(), 0.0);
        }
        assert_eq!(
            stats.iter().map(|s| s.kind()).collect::<Vec<_>>(),
            Fundamental::ALL.to_vec()
        );
    }

    #[test]
    fn test_player_fundamental_mut_routes_to_kind() {
        let mut stats = player(4, "Sara");
        stats.fundamental_mut(Fundamental::Defense).increment(Outcome::Good);

        assert_eq!(stats.fundamental(Fundamental::Defense).count(Outcome::Good), 1);
        assert_eq!(stats.fundamental(Fundamental::Service).total_attempts(), 0);
    }

    #[test]
    fn test_recompute_all_is_idempotent() {
        let mut stats = sample_players().remove(1);
        let before = stats.clone();
        stats.recompute_all();
        stats.recompute_all();
        assert_eq!(stats, before);
    }

    #[test]
    fn test_replace_counters() {
        let mut stats = player(8, "Ofelia");
        stats.replace_counters(
            Fundamental::Reception,
            RawCounters {
                excellent: 1,
                good: 1,
                poor: 1,
                error: 1,
                blocked: 0,
            },
        );

        let reception = stats.fundamental(Fundamental::Reception);
        assert_eq!(reception.total_attempts(), 4);
        assert_eq!(reception.points(), 0);
        assert_eq!(reception.errors(), 1);
        assert_eq!(reception.efficiency(), -25.0);
        assert_eq!(reception.positivity(), 50.0);
    }

    #[test]
    fn test_team_service_example() {
        let mut first = player(1, "Alessia");
        tally(&mut first, Fundamental::Service, Mark::Excellent, 1);

        let mut second = player(2, "Miriam");
        tally(&mut second, Fundamental::Service, Mark::Excellent, 2);
        tally(&mut second, Fundamental::Service, Mark::Good, 1);
        tally(&mut second, Fundamental::Service, Mark::Error, 1);

        let team = TeamStats::aggregate(&[first, second]);
        let service = team.fundamental(Fundamental::Service);

        assert_eq!(
            service.counters(),
            &RawCounters {
                excellent: 3,
                good: 1,
                poor: 0,
                error: 1,
                blocked: 0,
            }
        );
        assert_eq!(service.total_attempts(), 5);
        assert_eq!(service.points(), 3);
        assert_eq!(service.errors(), 1);
        assert_eq!(service.efficiency(), 40.0);
        assert_eq!(service.positivity(), 80.0);
    }

    #[test]
    fn test_team_sums_blocked_into_attack() {
        let team = TeamStats::aggregate(&sample_players());
        let attack = team.fundamental(Fundamental::Attack);

        assert_eq!(attack.blocked(), 2);
        assert_eq!(attack.total_attempts(), 6);
        assert_eq!(attack.errors(), 2);
    }

    #[test]
    fn test_team_is_order_independent() {
        let players = sample_players();
        let forward = TeamStats::aggregate(&players);

        let mut reversed = players.clone();
        reversed.reverse();
        let backward = TeamStats::aggregate(&reversed);

        let rotated: Vec<_> = players[1..].iter().chain(&players[..1]).collect();
        let rotated = TeamStats::aggregate(rotated);

        assert_eq!(forward, backward);
        assert_eq!(forward, rotated);
    }

    #[test]
    fn test_team_is_recomputed_from_scratch() {
        let players = sample_players();
        let first = TeamStats::aggregate(&players);
        let second = TeamStats::aggregate(&players);
        assert_eq!(first, second);

        let fewer = TeamStats::aggregate(&players[..1]);
        assert_eq!(fewer.players().len(), 1);
        assert_eq!(fewer.fundamental(Fundamental::Service).total_attempts(), 1);
    }

    #[test]
    fn test_team_empty() {
        let nobody: Vec<PlayerStats> = Vec::new();
        let team = TeamStats::aggregate(&nobody);

        assert!(team.players().is_empty());
        for stat in team.iter() {
            assert_eq!(stat.counters(), &RawCounters::default());
            assert_eq!(stat.total_attempts(), 0);
            assert_eq!(stat.efficiency(), 0.0);
            assert_eq!(stat.positivity(), 0.0);
        }
    }

    #[test]
    fn test_team_does_not_touch_players() {
        let players = sample_players();
        let snapshot = players.clone();
        let _ = TeamStats::aggregate(&players);
        assert_eq!(players, snapshot);
    }

    #[test]
    fn test_team_uses_sums_not_averages() {
        let mut a = player(1, "A");
        tally(&mut a, Fundamental::Defense, Mark::Excellent, 1);

        let mut b = player(2, "B");
        tally(&mut b, Fundamental::Defense, Mark::Poor, 3);

        let team = TeamStats::aggregate(&[a, b]);
        // Averaging 100% and 0% would give 50%.
        assert_eq!(team.fundamental(Fundamental::Defense).positivity(), 25.0);
    }

    #[test]
    fn test_team_large_counts_saturate() {
        let huge = RawCounters {
            excellent: 3_000_000_000,
            ..RawCounters::default()
        };
        let mut a = player(1, "A");
        a.replace_counters(Fundamental::Defense, huge);
        let mut b = player(2, "B");
        b.replace_counters(Fundamental::Defense, huge);

        let team = TeamStats::aggregate(&[a, b]);
        let defense = team.fundamental(Fundamental::Defense);
        assert_eq!(defense.counters().excellent, u32::MAX);
        assert_eq!(defense.total_attempts(), u32::MAX);
        assert_eq!(defense.positivity(), 100.0);
    }
}
