//! Evaluation of terminal battle states
//!
//! The search scores every completed trajectory with an [`Evaluator`]. Any
//! closure `Fn(&S) -> f64` is an evaluator; [`DefaultEvaluation`] is the
//! heuristic used when nothing else is supplied.

use crate::game_state::CombatState;

/// Trait for strategies that score a terminal (or abandoned) state
pub trait Evaluator<S> {
    /// Returns the quality of `state`; higher is better
    fn evaluate(&self, state: &S) -> f64;
}

impl<S, F> Evaluator<S> for F
where
    F: Fn(&S) -> f64,
{
    fn evaluate(&self, state: &S) -> f64 {
        self(state)
    }
}

/// Outcome of an encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Undecided,
    PlayerVictory,
    PlayerLoss,
}

/// Encounters the default heuristic treats specially
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encounter {
    /// Three-shape boss fight (spikers possible)
    ThreeShapes,
    /// Four-shape boss fight (spikers possible)
    FourShapes,
    /// Any other encounter, identified by the rules engine's own id
    Other(u32),
}

impl Encounter {
    /// Spiker fights punish attacking, so leftover energy is expected there
    pub fn could_have_spikers(self) -> bool {
        matches!(self, Encounter::ThreeShapes | Encounter::FourShapes)
    }
}

/// HP view of one monster slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterHp {
    pub cur_hp: i32,
    pub max_hp: i32,
    pub is_minion: bool,
    /// Slot holds no real monster
    pub is_invalid: bool,
}

/// Battle quantities read by [`DefaultEvaluation`]
pub trait BattleSummary {
    fn outcome(&self) -> Outcome;

    fn potion_count(&self) -> i32;

    /// Energy left unspent at the end of turns so far
    fn energy_wasted(&self) -> i32;

    fn cards_drawn(&self) -> i32;

    fn encounter(&self) -> Encounter;

    /// Monsters present in the encounter, in slot order
    fn monsters(&self) -> Vec<MonsterHp>;

    fn monsters_alive(&self) -> i32 {
        self.monsters()
            .iter()
            .filter(|m| !m.is_invalid && m.cur_hp > 0)
            .count() as i32
    }
}

/// Ratio of current to max HP over present, non-minion monsters
///
/// Returns 0 when either total is zero.
pub fn non_minion_monster_hp_ratio(monsters: &[MonsterHp]) -> f64 {
    let mut cur_hp_total = 0i32;
    let mut max_hp_total = 0i32;

    for m in monsters.iter().filter(|m| !m.is_minion && !m.is_invalid) {
        cur_hp_total += m.cur_hp;
        max_hp_total += m.max_hp;
    }

    if cur_hp_total == 0 || max_hp_total == 0 {
        return 0.0;
    }

    cur_hp_total as f64 / max_hp_total as f64
}

/// The default end-state heuristic
///
/// Victories score in the thousands and are ranked by remaining HP and
/// potions. Everything else scores low and is ranked by how close the player
/// came to winning. The constants are fixed; trained policies and regression
/// baselines depend on their exact values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEvaluation;

impl DefaultEvaluation {
    pub fn new() -> Self {
        DefaultEvaluation
    }
}

impl<S> Evaluator<S> for DefaultEvaluation
where
    S: CombatState + BattleSummary,
{
    fn evaluate(&self, state: &S) -> f64 {
        let potion_score = state.potion_count() as f64 * 4.0;
        let turn = state.turn() as f64;

        if state.outcome() == Outcome::PlayerVictory {
            return 100.0 * (35.0 + state.player_hp() as f64 + potion_score - (turn * 0.01));
        }

        let spiker_factor = if state.encounter().could_have_spikers() {
            0.0
        } else {
            1.0
        };
        let energy_penalty = state.energy_wasted() as f64 * -0.2 * spiker_factor;
        let draw_bonus = state.cards_drawn() as f64 * 0.03;
        let alive_score = state.monsters_alive() as f64 * -1.0;
        let hp_ratio = non_minion_monster_hp_ratio(&state.monsters());

        (1.0 - hp_ratio) * 10.0
            + alive_score
            + energy_penalty
            + draw_bonus
            + potion_score / 2.0
            + (turn * 0.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::Action;

    #[derive(Debug, Clone)]
    struct NoAction;

    impl Action for NoAction {
        fn id(&self) -> u64 {
            0
        }
    }

    #[derive(Debug, Clone)]
    struct EndState {
        outcome: Outcome,
        player_hp: i32,
        potions: i32,
        turn: i32,
        energy_wasted: i32,
        cards_drawn: i32,
        encounter: Encounter,
        monsters: Vec<MonsterHp>,
    }

    impl EndState {
        fn loss() -> Self {
            EndState {
                outcome: Outcome::PlayerLoss,
                player_hp: 0,
                potions: 1,
                turn: 4,
                energy_wasted: 3,
                cards_drawn: 5,
                encounter: Encounter::Other(7),
                monsters: vec![MonsterHp {
                    cur_hp: 40,
                    max_hp: 100,
                    is_minion: false,
                    is_invalid: false,
                }],
            }
        }
    }

    impl CombatState for EndState {
        type Action = NoAction;

        fn is_terminal(&self) -> bool {
            self.outcome != Outcome::Undecided
        }

        fn legal_actions(&self) -> Vec<NoAction> {
            vec![]
        }

        fn apply_action(&mut self, _action: &NoAction) {}

        fn seed(&self) -> u64 {
            0
        }

        fn floor_num(&self) -> u64 {
            0
        }

        fn player_hp(&self) -> i32 {
            self.player_hp
        }

        fn turn(&self) -> i32 {
            self.turn
        }
    }

    impl BattleSummary for EndState {
        fn outcome(&self) -> Outcome {
            self.outcome
        }

        fn potion_count(&self) -> i32 {
            self.potions
        }

        fn energy_wasted(&self) -> i32 {
            self.energy_wasted
        }

        fn cards_drawn(&self) -> i32 {
            self.cards_drawn
        }

        fn encounter(&self) -> Encounter {
            self.encounter
        }

        fn monsters(&self) -> Vec<MonsterHp> {
            self.monsters.clone()
        }
    }

    #[test]
    fn test_victory_score() {
        let state = EndState {
            outcome: Outcome::PlayerVictory,
            player_hp: 50,
            potions: 2,
            turn: 10,
            ..EndState::loss()
        };

        let score = DefaultEvaluation.evaluate(&state);
        assert!((score - 9290.0).abs() < 1e-9, "got {}", score);
    }

    #[test]
    fn test_loss_score() {
        // 6 - 1 - 0.6 + 0.15 + 2 + 0.8
        let score = DefaultEvaluation.evaluate(&EndState::loss());
        assert!((score - 7.35).abs() < 1e-9, "got {}", score);
    }

    #[test]
    fn test_spiker_encounters_ignore_wasted_energy() {
        let normal = DefaultEvaluation.evaluate(&EndState::loss());

        for encounter in [Encounter::ThreeShapes, Encounter::FourShapes] {
            let state = EndState {
                encounter,
                ..EndState::loss()
            };
            let score = DefaultEvaluation.evaluate(&state);
            assert!((score - (normal + 0.6)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_hp_ratio_skips_minions_and_invalid_slots() {
        let monsters = [
            MonsterHp { cur_hp: 10, max_hp: 40, is_minion: false, is_invalid: false },
            MonsterHp { cur_hp: 30, max_hp: 30, is_minion: true, is_invalid: false },
            MonsterHp { cur_hp: 99, max_hp: 99, is_minion: false, is_invalid: true },
            MonsterHp { cur_hp: 0, max_hp: 60, is_minion: false, is_invalid: false },
        ];

        assert_eq!(non_minion_monster_hp_ratio(&monsters), 0.1);
    }

    #[test]
    fn test_hp_ratio_zero_totals() {
        assert_eq!(non_minion_monster_hp_ratio(&[]), 0.0);

        let dead = [MonsterHp { cur_hp: 0, max_hp: 50, is_minion: false, is_invalid: false }];
        assert_eq!(non_minion_monster_hp_ratio(&dead), 0.0);
    }

    #[test]
    fn test_monsters_alive_default() {
        let state = EndState {
            monsters: vec![
                MonsterHp { cur_hp: 5, max_hp: 10, is_minion: true, is_invalid: false },
                MonsterHp { cur_hp: 0, max_hp: 10, is_minion: false, is_invalid: false },
                MonsterHp { cur_hp: 8, max_hp: 10, is_minion: false, is_invalid: true },
            ],
            ..EndState::loss()
        };

        assert_eq!(state.monsters_alive(), 1);
    }

    #[test]
    fn test_closure_evaluator() {
        let evaluator = |state: &EndState| state.player_hp as f64 * 2.0;
        let state = EndState {
            player_hp: 21,
            ..EndState::loss()
        };

        assert_eq!(evaluator.evaluate(&state), 42.0);
    }
}
