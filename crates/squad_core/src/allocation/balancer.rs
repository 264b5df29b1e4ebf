//! Position-bucketed round-robin team balancer
//!
//! Pipeline: normalize positions → classify strength → bucket by position →
//! mandatory GKs → DF → MF → ST → extra GKs.
//!
//! Each bucket goes through the same batch procedure against one shared
//! score table, so later buckets' remainder placements compensate for
//! imbalance left by earlier ones. No retry happens here; see
//! [`super::orchestrator`].

use crate::config::{AllocationConfig, StrengthThresholds};
use crate::error::{Result, SquadError};
use crate::models::{Line, Player, PlayerRecord, Position, Team};
use crate::player::normalize_position;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Scores closer than this count as tied when picking the weakest team.
const SCORE_TIE_EPSILON: f64 = 1e-9;

/// Players grouped by canonical position, in input order.
#[derive(Debug, Default)]
struct PositionBuckets {
    goalkeepers: Vec<Player>,
    defenders: Vec<Player>,
    midfielders: Vec<Player>,
    strikers: Vec<Player>,
}

impl PositionBuckets {
    fn push(&mut self, player: Player) {
        match player.position {
            Position::GK => self.goalkeepers.push(player),
            Position::DF => self.defenders.push(player),
            Position::MF => self.midfielders.push(player),
            Position::ST => self.strikers.push(player),
        }
    }

    fn take_line(&mut self, line: Line) -> Vec<Player> {
        match line {
            Line::DF => std::mem::take(&mut self.defenders),
            Line::MF => std::mem::take(&mut self.midfielders),
            Line::ST => std::mem::take(&mut self.strikers),
        }
    }
}

/// Teams under construction plus their running tier totals.
#[derive(Debug)]
struct TeamSlots {
    teams: Vec<Team>,
    scores: Vec<f64>,
}

impl TeamSlots {
    fn new(team_count: usize) -> Self {
        Self { teams: vec![Team::new(); team_count], scores: vec![0.0; team_count] }
    }

    fn team_count(&self) -> usize {
        self.teams.len()
    }

    fn place(&mut self, team: usize, player: Player) {
        self.scores[team] += player.tier;
        self.teams[team].push(player);
    }

    /// Index of the lowest-scoring team, ties broken uniformly at random.
    fn weakest_team<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let min = self.scores.iter().copied().fold(f64::INFINITY, f64::min);
        let tied: Vec<usize> = self
            .scores
            .iter()
            .enumerate()
            .filter(|(_, &score)| score - min <= SCORE_TIE_EPSILON)
            .map(|(idx, _)| idx)
            .collect();
        tied.choose(rng).copied().unwrap_or(0)
    }

    /// Round-robin batch procedure for one bucket.
    ///
    /// Shuffle then stable-sort by tier (descending) so equal tiers land in a
    /// random order. Full batches of `team_count` are shuffled and dealt one
    /// per team; the remainder goes greedily to the weakest team.
    fn assign_bucket<R: Rng + ?Sized>(&mut self, mut bucket: Vec<Player>, rng: &mut R) {
        if bucket.is_empty() {
            return;
        }
        let team_count = self.team_count();

        bucket.shuffle(rng);
        bucket.sort_by(|a, b| b.tier.total_cmp(&a.tier));

        let full_len = bucket.len() - bucket.len() % team_count;
        let remainder = bucket.split_off(full_len);

        let mut players = bucket.into_iter();
        loop {
            let mut batch: Vec<Player> = players.by_ref().take(team_count).collect();
            if batch.is_empty() {
                break;
            }
            batch.shuffle(rng);
            for (team, player) in batch.into_iter().enumerate() {
                self.place(team, player);
            }
        }

        for player in remainder {
            let team = self.weakest_team(rng);
            self.place(team, player);
        }
    }
}

/// Splits a roster into teams under the goalkeeper quota.
#[derive(Debug, Clone)]
pub struct TeamBalancer {
    thresholds: StrengthThresholds,
    require_gk_per_team: bool,
}

impl TeamBalancer {
    pub fn new(thresholds: StrengthThresholds, require_gk_per_team: bool) -> Self {
        Self { thresholds, require_gk_per_team }
    }

    pub fn from_config(config: &AllocationConfig) -> Self {
        Self::new(config.thresholds, config.require_gk_per_team)
    }

    /// Normalize, validate and classify one record.
    pub fn prepare_player(&self, record: &PlayerRecord) -> Result<Player> {
        let label = normalize_position(&record.position);
        let position = Position::from_label(&label).ok_or_else(|| SquadError::InvalidPosition {
            player: record.name.clone(),
            position: record.position.clone(),
        })?;

        Ok(Player {
            name: record.name.clone(),
            tier: record.tier,
            position,
            strength: self.thresholds.classify(record.tier),
        })
    }

    /// Partition `players` into `team_count` teams.
    ///
    /// Every input player ends up in exactly one team. Fails on
    /// `team_count < 1`, a non-canonical position, or (when required) fewer
    /// goalkeepers than teams.
    pub fn balance<R: Rng + ?Sized>(
        &self,
        players: &[PlayerRecord],
        team_count: usize,
        rng: &mut R,
    ) -> Result<Vec<Team>> {
        if team_count < 1 {
            return Err(SquadError::InvalidTeamCount(team_count));
        }

        let mut buckets = PositionBuckets::default();
        for record in players {
            buckets.push(self.prepare_player(record)?);
        }

        let mut goalkeepers = std::mem::take(&mut buckets.goalkeepers);
        let extra_goalkeepers = if self.require_gk_per_team {
            if goalkeepers.len() < team_count {
                return Err(SquadError::NotEnoughGoalkeepers {
                    required: team_count,
                    found: goalkeepers.len(),
                });
            }
            goalkeepers.split_off(team_count)
        } else {
            std::mem::take(&mut goalkeepers)
        };

        debug!(
            team_count,
            players = players.len(),
            extra_goalkeepers = extra_goalkeepers.len(),
            "balancing roster"
        );

        let mut slots = TeamSlots::new(team_count);
        slots.assign_bucket(goalkeepers, rng);
        for line in Line::ALL {
            let bucket = buckets.take_line(line);
            slots.assign_bucket(bucket, rng);
        }
        slots.assign_bucket(extra_goalkeepers, rng);

        Ok(slots.teams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strength;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn balancer() -> TeamBalancer {
        TeamBalancer::from_config(&AllocationConfig::default())
    }

    /// 2 GK, 4 DF, 4 MF, 4 ST with varied tiers
    fn roster_14() -> Vec<PlayerRecord> {
        let roster = [
            ("Keeper A", 3.0, "GK"),
            ("Keeper B", 2.6, "GK"),
            ("Def 1", 3.8, "DF"),
            ("Def 2", 3.1, "DF"),
            ("Def 3", 2.7, "DF"),
            ("Def 4", 2.2, "DF"),
            ("Mid 1", 4.2, "MF"),
            ("Mid 2", 3.4, "['MF', 'ST']"),
            ("Mid 3", 3.0, "mf"),
            ("Mid 4", 2.5, "MF"),
            ("Str 1", 4.0, "ST"),
            ("Str 2", 3.6, "ST"),
            ("Str 3", 2.9, "ST"),
            ("Str 4", 1.8, "ST"),
        ];
        roster.iter().map(|(n, t, p)| PlayerRecord::new(*n, *t, *p)).collect()
    }

    #[test]
    fn test_partition_is_complete() {
        let roster = roster_14();
        let teams = balancer().balance(&roster, 2, &mut test_rng()).unwrap();

        assert_eq!(teams.len(), 2);
        let names: Vec<&str> =
            teams.iter().flat_map(|t| t.players.iter().map(|p| p.name.as_str())).collect();
        assert_eq!(names.len(), roster.len());
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), roster.len());
        for record in &roster {
            assert!(unique.contains(record.name.as_str()));
        }
    }

    #[test]
    fn test_each_team_gets_a_goalkeeper() {
        let teams = balancer().balance(&roster_14(), 2, &mut test_rng()).unwrap();
        for team in &teams {
            assert_eq!(team.goalkeeper_count(), 1);
        }
    }

    #[test]
    fn test_even_lines_split_evenly() {
        let teams = balancer().balance(&roster_14(), 2, &mut test_rng()).unwrap();
        for team in &teams {
            assert_eq!(team.len(), 7);
            for line in Line::ALL {
                assert_eq!(team.line_tiers(line).len(), 2);
            }
        }
    }

    #[test]
    fn test_full_batches_pair_high_with_high() {
        // Sorted DF tiers 3.8, 3.1 | 2.7, 2.2: each team gets one of each batch
        let teams = balancer().balance(&roster_14(), 2, &mut test_rng()).unwrap();
        for team in &teams {
            let tiers = team.line_tiers(Line::DF);
            assert_eq!(tiers.iter().filter(|&&t| t >= 3.1).count(), 1);
        }
    }

    /// Team index holding `name` in a balance run with the given seed
    fn team_of(roster: &[PlayerRecord], name: &str, seed: u64) -> usize {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let teams = balancer().balance(roster, 2, &mut rng).unwrap();
        teams
            .iter()
            .position(|t| t.players.iter().any(|p| p.name == name))
            .unwrap()
    }

    #[test]
    fn test_remainder_tie_is_broken_randomly() {
        // Equal keepers leave both teams tied at 3.0 before the lone DF
        let roster = vec![
            PlayerRecord::new("Keeper A", 3.0, "GK"),
            PlayerRecord::new("Keeper B", 3.0, "GK"),
            PlayerRecord::new("Lone Def", 2.0, "DF"),
        ];
        let placements: HashSet<usize> =
            (0..50).map(|seed| team_of(&roster, "Lone Def", seed)).collect();
        assert_eq!(placements, HashSet::from([0, 1]));
    }

    #[test]
    fn test_full_batch_is_shuffled() {
        let roster = vec![
            PlayerRecord::new("Top Keeper", 4.0, "GK"),
            PlayerRecord::new("Low Keeper", 2.0, "GK"),
            PlayerRecord::new("Def 1", 3.0, "DF"),
            PlayerRecord::new("Def 2", 3.0, "DF"),
        ];
        let placements: HashSet<usize> =
            (0..50).map(|seed| team_of(&roster, "Top Keeper", seed)).collect();
        assert_eq!(placements, HashSet::from([0, 1]));
    }

    #[test]
    fn test_strength_is_recomputed() {
        let mut roster = roster_14();
        roster[0].strength = Some(Strength::Weak); // stale value, tier 3.0
        let teams = balancer().balance(&roster, 2, &mut test_rng()).unwrap();
        let keeper = teams
            .iter()
            .flat_map(|t| t.players.iter())
            .find(|p| p.name == "Keeper A")
            .unwrap();
        assert_eq!(keeper.strength, Strength::Balanced);
        assert_eq!(keeper.position, Position::GK);
    }

    #[test]
    fn test_not_enough_goalkeepers() {
        let mut roster = roster_14();
        roster.retain(|p| p.name != "Keeper B");
        let err = balancer().balance(&roster, 2, &mut test_rng()).unwrap_err();
        assert_eq!(err, SquadError::NotEnoughGoalkeepers { required: 2, found: 1 });
        assert!(err.is_structural());
    }

    #[test]
    fn test_goalkeepers_optional() {
        let mut roster = roster_14();
        roster.retain(|p| p.name != "Keeper B");
        let balancer = TeamBalancer::new(StrengthThresholds::default(), false);
        let teams = balancer.balance(&roster, 2, &mut test_rng()).unwrap();
        let total: usize = teams.iter().map(Team::len).sum();
        assert_eq!(total, 13);
    }

    #[test]
    fn test_invalid_position_is_fatal() {
        let mut roster = roster_14();
        roster.push(PlayerRecord::new("Leo", 2.7, "DEF"));
        let err = balancer().balance(&roster, 2, &mut test_rng()).unwrap_err();
        assert_eq!(
            err,
            SquadError::InvalidPosition { player: "Leo".to_string(), position: "DEF".to_string() }
        );
    }

    #[test]
    fn test_zero_teams_rejected() {
        let err = balancer().balance(&roster_14(), 0, &mut test_rng()).unwrap_err();
        assert_eq!(err, SquadError::InvalidTeamCount(0));
    }

    #[test]
    fn test_extra_goalkeepers_are_placed_last() {
        let mut roster = roster_14();
        roster.push(PlayerRecord::new("Keeper C", 1.5, "GK"));
        let teams = balancer().balance(&roster, 2, &mut test_rng()).unwrap();

        let goalkeepers: usize = teams.iter().map(Team::goalkeeper_count).sum();
        assert_eq!(goalkeepers, 3);
        for team in &teams {
            assert!(team.goalkeeper_count() >= 1);
            // first player placed is the mandatory keeper
            assert!(team.players[0].is_goalkeeper());
        }
        let with_extra = teams.iter().find(|t| t.goalkeeper_count() == 2).unwrap();
        assert_eq!(with_extra.players.last().unwrap().name, "Keeper C");
    }

    #[test]
    fn test_remainder_goes_to_weakest_team() {
        // Mandatory GKs 4.0 / 1.0, then a single DF must go to the 1.0 team
        let roster = vec![
            PlayerRecord::new("Strong Keeper", 4.0, "GK"),
            PlayerRecord::new("Weak Keeper", 1.0, "GK"),
            PlayerRecord::new("Lone Defender", 3.0, "DF"),
        ];
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let teams = balancer().balance(&roster, 2, &mut rng).unwrap();
            let weak_team = teams
                .iter()
                .find(|t| t.players.iter().any(|p| p.name == "Weak Keeper"))
                .unwrap();
            assert!(weak_team.players.iter().any(|p| p.name == "Lone Defender"));
        }
    }

    #[test]
    fn test_same_seed_same_teams() {
        let roster = roster_14();
        let a = balancer().balance(&roster, 2, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        let b = balancer().balance(&roster, 2, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_three_teams() {
        let mut roster = roster_14();
        roster.push(PlayerRecord::new("Keeper C", 2.9, "GK"));
        let teams = balancer().balance(&roster, 3, &mut test_rng()).unwrap();
        assert_eq!(teams.len(), 3);
        assert!(teams.iter().all(|t| t.goalkeeper_count() == 1));
        assert_eq!(teams.iter().map(Team::len).sum::<usize>(), 15);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_roster() -> impl Strategy<Value = (usize, Vec<PlayerRecord>)> {
            (2usize..5).prop_flat_map(|teams| {
                let outfield = prop::collection::vec((1.0f64..5.0, 0usize..3), 0..24);
                let keepers = prop::collection::vec(1.0f64..5.0, teams..teams + 3);
                (Just(teams), keepers, outfield).prop_map(|(teams, keepers, outfield)| {
                    let mut roster: Vec<PlayerRecord> = keepers
                        .into_iter()
                        .enumerate()
                        .map(|(i, tier)| PlayerRecord::new(format!("GK{}", i), tier, "GK"))
                        .collect();
                    for (i, (tier, line)) in outfield.into_iter().enumerate() {
                        let position = ["DF", "MF", "ST"][line];
                        roster.push(PlayerRecord::new(format!("P{}", i), tier, position));
                    }
                    (teams, roster)
                })
            })
        }

        proptest! {
            /// Property: every player lands in exactly one team
            #[test]
            fn prop_partition_complete((teams, roster) in arb_roster(), seed in any::<u64>()) {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let result = balancer().balance(&roster, teams, &mut rng).unwrap();
                prop_assert_eq!(result.len(), teams);
                let mut names: Vec<String> = result
                    .iter()
                    .flat_map(|t| t.players.iter().map(|p| p.name.clone()))
                    .collect();
                names.sort();
                let mut expected: Vec<String> = roster.iter().map(|p| p.name.clone()).collect();
                expected.sort();
                prop_assert_eq!(names, expected);
            }

            /// Property: GK quota holds whenever it is satisfiable
            #[test]
            fn prop_every_team_has_goalkeeper(
                (teams, roster) in arb_roster(),
                seed in any::<u64>(),
            ) {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let result = balancer().balance(&roster, teams, &mut rng).unwrap();
                for team in &result {
                    prop_assert!(team.goalkeeper_count() >= 1);
                }
            }
        }
    }
}
