//! Searches a small scripted battle and prints what the search found
//!
//! Run with `RUST_LOG=debug cargo run --example duel` to see search logging.

use combat_mcts::{
    Action, BattleSummary, CombatState, DefaultEvaluation, Encounter, MonsterHp, Outcome,
    SearchConfig, SearchDriver,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Card {
    Strike,
    Bash,
    Defend,
    EndTurn,
}

impl Action for Card {
    fn id(&self) -> u64 {
        match self {
            Card::Strike => 0x01,
            Card::Bash => 0x02,
            Card::Defend => 0x03,
            Card::EndTurn => 0xff,
        }
    }
}

#[derive(Clone, Debug)]
struct Battle {
    seed: u64,
    player_hp: i32,
    block: i32,
    energy: i32,
    turn: i32,
    vulnerable: i32,
    monster_hp: i32,
    energy_wasted: i32,
    cards_drawn: i32,
}

impl Battle {
    fn new(seed: u64) -> Self {
        Battle {
            seed,
            player_hp: 40,
            block: 0,
            energy: 3,
            turn: 1,
            vulnerable: 0,
            monster_hp: 44,
            energy_wasted: 0,
            cards_drawn: 5,
        }
    }

    fn monster_intent(&self) -> i32 {
        // Alternates a heavy hit with a light one
        if self.turn % 2 == 1 {
            11
        } else {
            7
        }
    }

    fn deal(&mut self, damage: i32) {
        let damage = if self.vulnerable > 0 {
            damage * 3 / 2
        } else {
            damage
        };
        self.monster_hp = (self.monster_hp - damage).max(0);
    }
}

impl CombatState for Battle {
    type Action = Card;

    fn is_terminal(&self) -> bool {
        self.outcome() != Outcome::Undecided
    }

    fn legal_actions(&self) -> Vec<Card> {
        if self.is_terminal() {
            return vec![];
        }
        let mut cards = vec![Card::EndTurn];
        if self.energy >= 1 {
            cards.push(Card::Strike);
            cards.push(Card::Defend);
        }
        if self.energy >= 2 {
            cards.push(Card::Bash);
        }
        cards
    }

    fn apply_action(&mut self, action: &Card) {
        match action {
            Card::Strike => {
                self.energy -= 1;
                self.deal(6);
            }
            Card::Bash => {
                self.energy -= 2;
                self.deal(8);
                self.vulnerable += 2;
            }
            Card::Defend => {
                self.energy -= 1;
                self.block += 5;
            }
            Card::EndTurn => {
                self.energy_wasted += self.energy;
                self.player_hp -= (self.monster_intent() - self.block).max(0);
                self.block = 0;
                self.energy = 3;
                self.vulnerable = (self.vulnerable - 1).max(0);
                self.turn += 1;
                self.cards_drawn += 5;
            }
        }
    }

    fn seed(&self) -> u64 {
        self.seed
    }

    fn floor_num(&self) -> u64 {
        1
    }

    fn player_hp(&self) -> i32 {
        self.player_hp
    }

    fn turn(&self) -> i32 {
        self.turn
    }

    fn describe_action(&self, action: &Card) -> String {
        format!("{:?} (energy {}, monster {} hp)", action, self.energy, self.monster_hp)
    }
}

impl BattleSummary for Battle {
    fn outcome(&self) -> Outcome {
        if self.player_hp <= 0 || self.turn > 12 {
            Outcome::PlayerLoss
        } else if self.monster_hp <= 0 {
            Outcome::PlayerVictory
        } else {
            Outcome::Undecided
        }
    }

    fn potion_count(&self) -> i32 {
        0
    }

    fn energy_wasted(&self) -> i32 {
        self.energy_wasted
    }

    fn cards_drawn(&self) -> i32 {
        self.cards_drawn
    }

    fn encounter(&self) -> Encounter {
        Encounter::Other(0)
    }

    fn monsters(&self) -> Vec<MonsterHp> {
        vec![MonsterHp {
            cur_hp: self.monster_hp,
            max_hp: 44,
            is_minion: false,
            is_invalid: false,
        }]
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let battle = Battle::new(2021);
    let mut driver = SearchDriver::new(battle.clone(), DefaultEvaluation, SearchConfig::new(3.0))?;
    driver.search(5_000)?;

    println!("{}", driver.statistics().summary());
    println!();
    println!("Best value: {:.2}", driver.best_action_value());
    println!("Worst value: {:.2}", driver.min_action_value());
    println!("Player HP after best line: {}", driver.outcome_player_hp());

    println!();
    println!("Best line:");
    let mut state = battle;
    for card in driver.best_action_sequence() {
        println!("  {}", state.describe_action(card));
        state.apply_action(card);
    }

    println!();
    println!("Top of the tree:");
    driver.print_search_tree(&mut std::io::stdout(), 2)?;

    Ok(())
}
