//! A small deterministic battle used by the integration tests

#![allow(dead_code)]

use combat_mcts::{Action, BattleSummary, CombatState, Encounter, MonsterHp, Outcome};

pub const STRIKE_DAMAGE: i32 = 6;
pub const BLOCK_PER_DEFEND: i32 = 5;
pub const ENERGY_PER_TURN: i32 = 3;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DuelAction {
    Strike(usize),
    Defend,
    DrinkPotion,
    EndTurn,
}

impl Action for DuelAction {
    fn id(&self) -> u64 {
        match self {
            DuelAction::Strike(target) => 0x100 | *target as u64,
            DuelAction::Defend => 0x200,
            DuelAction::DrinkPotion => 0x300,
            DuelAction::EndTurn => 0x400,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Monster {
    pub cur_hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub is_minion: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Duel {
    pub seed: u64,
    pub floor: u64,
    pub player_hp: i32,
    pub block: i32,
    pub energy: i32,
    pub potions: i32,
    pub turn: i32,
    pub max_turns: i32,
    pub energy_wasted: i32,
    pub cards_drawn: i32,
    pub encounter: Encounter,
    pub monsters: Vec<Monster>,
    /// Stops offering actions from this turn on, imitating a broken engine
    pub broken_from_turn: Option<i32>,
}

impl Duel {
    pub fn new(seed: u64) -> Self {
        Duel {
            seed,
            floor: 3,
            player_hp: 30,
            block: 0,
            energy: ENERGY_PER_TURN,
            potions: 1,
            turn: 1,
            max_turns: 8,
            energy_wasted: 0,
            cards_drawn: 5,
            encounter: Encounter::Other(1),
            monsters: vec![
                Monster {
                    cur_hp: 20,
                    max_hp: 20,
                    attack: 6,
                    is_minion: false,
                },
                Monster {
                    cur_hp: 8,
                    max_hp: 8,
                    attack: 3,
                    is_minion: true,
                },
            ],
            broken_from_turn: None,
        }
    }

    /// A battle that is already won
    pub fn won(seed: u64) -> Self {
        let mut duel = Duel::new(seed);
        for monster in &mut duel.monsters {
            monster.cur_hp = 0;
        }
        duel.player_hp = 17;
        duel
    }

    fn end_turn(&mut self) {
        self.energy_wasted += self.energy;

        let incoming: i32 = self
            .monsters
            .iter()
            .filter(|m| m.cur_hp > 0)
            .map(|m| m.attack)
            .sum();
        self.player_hp -= (incoming - self.block).max(0);

        self.block = 0;
        self.energy = ENERGY_PER_TURN;
        self.turn += 1;
        self.cards_drawn += 5;
    }
}

impl CombatState for Duel {
    type Action = DuelAction;

    fn is_terminal(&self) -> bool {
        BattleSummary::outcome(self) != Outcome::Undecided
    }

    fn legal_actions(&self) -> Vec<DuelAction> {
        if self.is_terminal() {
            return vec![];
        }
        if self.broken_from_turn.map_or(false, |turn| self.turn >= turn) {
            return vec![];
        }

        let mut actions = Vec::new();
        if self.energy > 0 {
            for (i, monster) in self.monsters.iter().enumerate() {
                if monster.cur_hp > 0 {
                    actions.push(DuelAction::Strike(i));
                }
            }
            actions.push(DuelAction::Defend);
        }
        if self.potions > 0 {
            actions.push(DuelAction::DrinkPotion);
        }
        actions.push(DuelAction::EndTurn);
        actions
    }

    fn apply_action(&mut self, action: &DuelAction) {
        match action {
            DuelAction::Strike(target) => {
                self.energy -= 1;
                let monster = &mut self.monsters[*target];
                monster.cur_hp = (monster.cur_hp - STRIKE_DAMAGE).max(0);
            }
            DuelAction::Defend => {
                self.energy -= 1;
                self.block += BLOCK_PER_DEFEND;
            }
            DuelAction::DrinkPotion => {
                self.potions -= 1;
                self.player_hp += 5;
            }
            DuelAction::EndTurn => self.end_turn(),
        }
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn floor_num(&self) -> u64 {
        self.floor
    }

    fn player_hp(&self) -> i32 {
        self.player_hp
    }

    fn turn(&self) -> i32 {
        self.turn
    }

    fn describe_action(&self, action: &DuelAction) -> String {
        match action {
            DuelAction::Strike(target) => {
                format!("strike monster {} ({} hp)", target, self.monsters[*target].cur_hp)
            }
            DuelAction::Defend => format!("defend ({} block)", self.block),
            DuelAction::DrinkPotion => format!("drink potion ({} left)", self.potions),
            DuelAction::EndTurn => format!("end turn {}", self.turn),
        }
    }

    fn context_description(&self) -> String {
        format!("duel turn {} player hp {}", self.turn, self.player_hp)
    }
}

impl BattleSummary for Duel {
    fn outcome(&self) -> Outcome {
        if self.player_hp <= 0 {
            Outcome::PlayerLoss
        } else if self.monsters.iter().all(|m| m.cur_hp <= 0) {
            Outcome::PlayerVictory
        } else if self.turn > self.max_turns {
            Outcome::PlayerLoss
        } else {
            Outcome::Undecided
        }
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
        self.monsters
            .iter()
            .map(|m| MonsterHp {
                cur_hp: m.cur_hp,
                max_hp: m.max_hp,
                is_minion: m.is_minion,
                is_invalid: false,
            })
            .collect()
    }
}
