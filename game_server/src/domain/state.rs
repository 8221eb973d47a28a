// Per-game aggregate: the game record plus the player records of its members.

use super::entities::{Faction, Game, Player, PlayerId, Position, Role};
use super::errors::{JoinError, StartError};
use super::rules::GameRules;
use rand::Rng;
use std::collections::BTreeMap;

const MAX_NAME_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct GameState {
    /// Lifecycle fields and board.
    pub game: Game,
    /// Records of this game's members, keyed by id.
    pub players: BTreeMap<PlayerId, Player>,
}

/// Result of admitting a player into a game.
#[derive(Debug, Clone)]
pub struct Admission {
    /// The new member as placed on the board.
    pub player: Player,
    // True when this join filled the game and started it.
    pub started: bool,
}

impl GameState {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            players: BTreeMap::new(),
        }
    }

    /// Player record, only if the player is a member of this game.
    pub fn member(&self, player_id: PlayerId) -> Option<&Player> {
        self.players
            .get(&player_id)
            .filter(|player| player.game_id == self.game.id)
    }

    /// The living player standing on `position`, if any.
    pub fn living_occupant(&self, position: Position) -> Option<&Player> {
        self.game
            .member_ids
            .iter()
            .filter_map(|id| self.players.get(id))
            .find(|player| player.alive && player.position == position)
    }

    pub fn living_count(&self, faction: Faction) -> usize {
        self.game
            .member_ids
            .iter()
            .filter_map(|id| self.players.get(id))
            .filter(|player| player.alive && player.role.faction() == faction)
            .count()
    }

    /// Adds a new member. The first entrant becomes the Wolf, everyone after a Villager.
    /// Filling the last seat starts the game. `allocate_id` runs only once the join is
    /// known to succeed, so rejected joins never consume an id.
    pub fn admit<R, F>(
        &mut self,
        name: &str,
        rules: &GameRules,
        rng: &mut R,
        allocate_id: F,
    ) -> Result<Admission, JoinError>
    where
        R: Rng + ?Sized,
        F: FnOnce() -> PlayerId,
    {
        let name = validate_player_name(name)?;
        if self.game.is_over() {
            return Err(JoinError::GameOver);
        }
        if self.game.started {
            return Err(JoinError::AlreadyStarted);
        }
        if self.game.member_ids.len() >= rules.max_players {
            return Err(JoinError::GameFull);
        }

        let role = if self.game.member_ids.is_empty() {
            Role::Wolf
        } else {
            Role::Villager
        };
        let player_id = allocate_id();
        let position = self.game.board.random_vacant_position(rng);
        self.game.board.place_marker(position, role.marker());

        let player = Player {
            id: player_id,
            name,
            game_id: self.game.id,
            role,
            position,
            alive: true,
        };
        self.players.insert(player_id, player.clone());
        self.game.member_ids.push(player_id);

        let started =
            self.game.member_ids.len() >= rules.max_players && self.start().is_ok();

        Ok(Admission { player, started })
    }

    /// Opens round 0. Requires at least one living Wolf and one living Villager.
    pub fn start(&mut self) -> Result<(), StartError> {
        if self.game.is_over() {
            return Err(StartError::GameOver);
        }
        if self.game.started {
            return Err(StartError::AlreadyStarted);
        }
        if self.living_count(Faction::Wolves) == 0 || self.living_count(Faction::Villagers) == 0 {
            return Err(StartError::NotEnoughPlayers);
        }

        self.game.started = true;
        self.game.round_in_progress = 0;
        Ok(())
    }
}

fn validate_player_name(value: &str) -> Result<String, JoinError> {
    let name = value.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN || name.chars().any(char::is_control) {
        return Err(JoinError::InvalidName);
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{IDLE_ROUND, Marker};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rules(max_players: usize) -> GameRules {
        GameRules {
            board_size: 10,
            max_players,
            visibility_radius: 2,
        }
    }

    #[test]
    fn when_players_join_then_first_is_wolf_and_rest_are_villagers() {
        let mut state = GameState::new(Game::new(1, "Game 1", 10));
        let mut rng = StdRng::seed_from_u64(1);
        let rules = rules(4);

        let roles: Vec<Role> = (1..=3)
            .map(|id| {
                state
                    .admit("Pilot", &rules, &mut rng, || id)
                    .expect("join should succeed")
                    .player
                    .role
            })
            .collect();

        assert_eq!(roles, vec![Role::Wolf, Role::Villager, Role::Villager]);
        assert_eq!(state.game.member_ids, vec![1, 2, 3]);
    }

    #[test]
    fn when_player_joins_then_marker_is_placed_at_spawn() {
        let mut state = GameState::new(Game::new(1, "Game 1", 10));
        let mut rng = StdRng::seed_from_u64(9);

        let admission = state
            .admit("Alpha", &rules(8), &mut rng, || 1)
            .expect("join should succeed");

        let position = admission.player.position;
        assert_eq!(state.game.board.marker(position), Marker::Wolf);
        assert_eq!(
            state.game.board.cells().filter(|(_, m)| *m != Marker::Empty).count(),
            1
        );
    }

    #[test]
    fn when_last_seat_is_filled_then_game_starts_and_later_joins_fail() {
        let mut state = GameState::new(Game::new(1, "Game 1", 10));
        let mut rng = StdRng::seed_from_u64(2);
        let rules = rules(2);

        let first = state.admit("A", &rules, &mut rng, || 1).expect("first join");
        assert!(!first.started);
        let second = state.admit("B", &rules, &mut rng, || 2).expect("second join");
        assert!(second.started);
        assert_eq!(state.game.round_in_progress, 0);

        assert_eq!(
            state.admit("C", &rules, &mut rng, || 3).map(|a| a.player.id),
            Err(JoinError::AlreadyStarted)
        );
    }

    #[test]
    fn when_game_is_full_but_unstarted_then_join_is_rejected() {
        let mut state = GameState::new(Game::new(1, "Game 1", 10));
        state.game.member_ids = vec![10, 11];
        let mut rng = StdRng::seed_from_u64(2);

        let result = state.admit("C", &rules(2), &mut rng, || 3);
        assert!(matches!(result, Err(JoinError::GameFull)));
    }

    #[test]
    fn when_name_is_blank_or_too_long_then_join_is_rejected() {
        let mut state = GameState::new(Game::new(1, "Game 1", 10));
        let mut rng = StdRng::seed_from_u64(2);

        assert!(matches!(
            state.admit("   ", &rules(8), &mut rng, || 1),
            Err(JoinError::InvalidName)
        ));
        assert!(matches!(
            state.admit(&"x".repeat(33), &rules(8), &mut rng, || 1),
            Err(JoinError::InvalidName)
        ));
        assert!(state.game.member_ids.is_empty());
    }

    #[test]
    fn when_only_a_wolf_joined_then_start_is_refused() {
        let mut state = GameState::new(Game::new(1, "Game 1", 10));
        let mut rng = StdRng::seed_from_u64(2);
        state.admit("A", &rules(8), &mut rng, || 1).expect("join");

        assert_eq!(state.start(), Err(StartError::NotEnoughPlayers));
        assert!(!state.game.started);
        assert_eq!(state.game.round_in_progress, IDLE_ROUND);
    }

    #[test]
    fn when_game_has_winner_then_start_and_join_are_refused() {
        let mut state = GameState::new(Game::new(1, "Game 1", 10));
        state.game.winner = Some(Faction::Wolves);
        let mut rng = StdRng::seed_from_u64(2);

        assert_eq!(state.start(), Err(StartError::GameOver));
        assert!(matches!(
            state.admit("A", &rules(8), &mut rng, || 1),
            Err(JoinError::GameOver)
        ));
    }
}
