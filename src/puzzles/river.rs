//! River crossing: farmer, fox, hen and grain
//!
//! The farmer rows a boat that carries at most one passenger. Left without
//! the farmer, the fox eats the hen and the hen eats the grain.
//!
//! [`solve`] runs a breadth-first search over the 16 possible side
//! assignments ([`Sides`]), trying crossings in the order alone, fox, hen,
//! grain. [`generate`] turns the 7 crossings it finds into a departure frame
//! and an arrival frame each.

use crate::model::StepModel;
use std::collections::VecDeque;
use std::fmt;

/// Rules shown next to the river
pub const LISTING: &[&str] = &[
    "The boat carries the farmer and at most one passenger.",
    "The fox may not be left alone with the hen.",
    "The hen may not be left alone with the grain.",
    "Get everyone to the right bank.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Passenger {
    Fox,
    Hen,
    Grain,
}

impl Passenger {
    pub const ALL: [Passenger; 3] = [Passenger::Fox, Passenger::Hen, Passenger::Grain];

    pub fn label(self) -> &'static str {
        match self {
            Passenger::Fox => "fox",
            Passenger::Hen => "hen",
            Passenger::Grain => "grain",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Passenger::Fox => 0b0010,
            Passenger::Hen => 0b0100,
            Passenger::Grain => 0b1000,
        }
    }
}

impl fmt::Display for Passenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bank {
    Left,
    Right,
}

impl Bank {
    pub fn opposite(self) -> Self {
        match self {
            Bank::Left => Bank::Right,
            Bank::Right => Bank::Left,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Bank::Left => "left",
            Bank::Right => "right",
        }
    }
}

const FARMER: u8 = 0b0001;
const EVERYONE: u8 = 0b1111;

/// Which bank everyone is on; a set bit means the right bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sides(u8);

impl Sides {
    pub fn start() -> Self {
        Sides(0)
    }

    pub fn is_goal(self) -> bool {
        self.0 == EVERYONE
    }

    pub fn farmer(self) -> Bank {
        if self.0 & FARMER == 0 {
            Bank::Left
        } else {
            Bank::Right
        }
    }

    pub fn side_of(self, passenger: Passenger) -> Bank {
        if self.0 & passenger.bit() == 0 {
            Bank::Left
        } else {
            Bank::Right
        }
    }

    /// Passengers on `bank`, in fox, hen, grain order
    pub fn on(self, bank: Bank) -> Vec<Passenger> {
        Passenger::ALL
            .into_iter()
            .filter(|&p| self.side_of(p) == bank)
            .collect()
    }

    /// No bank without the farmer holds a predator and its prey
    pub fn is_safe(self) -> bool {
        let unattended = self.farmer().opposite();
        let alone = |p: Passenger| self.side_of(p) == unattended;
        let fox_eats_hen = alone(Passenger::Fox) && alone(Passenger::Hen);
        let hen_eats_grain = alone(Passenger::Hen) && alone(Passenger::Grain);
        !(fox_eats_hen || hen_eats_grain)
    }

    /// Farmer rows across with `cargo`; `None` if the cargo is on the other bank
    pub fn cross(self, cargo: Option<Passenger>) -> Option<Sides> {
        let mut bits = FARMER;
        if let Some(p) = cargo {
            if self.side_of(p) != self.farmer() {
                return None;
            }
            bits |= p.bit();
        }
        Some(Sides(self.0 ^ bits))
    }
}

/// One boat trip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossing {
    pub from: Bank,
    pub cargo: Option<Passenger>,
}

const CARGO_ORDER: [Option<Passenger>; 4] = [
    None,
    Some(Passenger::Fox),
    Some(Passenger::Hen),
    Some(Passenger::Grain),
];

/// Shortest safe sequence of crossings
pub fn solve() -> Vec<Crossing> {
    let mut parent: [Option<(Sides, Crossing)>; 16] = [None; 16];
    let mut seen = [false; 16];
    let mut queue = VecDeque::from([Sides::start()]);
    seen[0] = true;

    while let Some(state) = queue.pop_front() {
        if state.is_goal() {
            let mut path = Vec::new();
            let mut at = state;
            while let Some((prev, crossing)) = parent[at.0 as usize] {
                path.push(crossing);
                at = prev;
            }
            path.reverse();
            return path;
        }
        for cargo in CARGO_ORDER {
            let Some(next) = state.cross(cargo) else {
                continue;
            };
            if !next.is_safe() || seen[next.0 as usize] {
                continue;
            }
            seen[next.0 as usize] = true;
            parent[next.0 as usize] = Some((
                state,
                Crossing {
                    from: state.farmer(),
                    cargo,
                },
            ));
            queue.push_back(next);
        }
    }
    Vec::new()
}

/// Where the farmer is in a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FarmerPosition {
    OnBank(Bank),
    Rowing { from: Bank },
}

/// Payload of one river frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiverState {
    pub left: Vec<Passenger>,
    pub right: Vec<Passenger>,
    pub boat: Option<Passenger>,
    pub farmer: FarmerPosition,
    /// Crossings started so far
    pub crossings: usize,
}

fn describe_group(group: &[Passenger]) -> String {
    let names: Vec<&str> = group.iter().map(|p| p.label()).collect();
    match names.as_slice() {
        [] => String::new(),
        [one] => format!("the {}", one),
        [init @ .., last] => format!("the {} and the {}", init.join(", the "), last),
    }
}

/// The solution as depart/arrive frames
pub fn generate() -> StepModel<RiverState> {
    let crossings = solve();
    let total = crossings.len();
    let mut rec = StepModel::recorder();
    let mut sides = Sides::start();

    rec.push(
        "Everyone starts on the left bank.",
        &[1, 4],
        RiverState {
            left: sides.on(Bank::Left),
            right: Vec::new(),
            boat: None,
            farmer: FarmerPosition::OnBank(Bank::Left),
            crossings: 0,
        },
    );

    for (k, crossing) in crossings.iter().enumerate() {
        let Some(next) = sides.cross(crossing.cargo) else {
            break;
        };
        let from = crossing.from;
        let to = from.opposite();

        let mut left = sides.on(Bank::Left);
        let mut right = sides.on(Bank::Right);
        if let Some(p) = crossing.cargo {
            left.retain(|&q| q != p);
            right.retain(|&q| q != p);
        }
        let behind = if from == Bank::Left { &left } else { &right };
        let safety = if behind.is_empty() {
            format!("The {} bank is empty.", from.label())
        } else if behind.len() == 1 {
            format!("{} is safe alone.", capitalize(&describe_group(behind)))
        } else {
            format!("{} are safe together.", capitalize(&describe_group(behind)))
        };
        let trip = match crossing.cargo {
            Some(p) => format!("farmer takes the {} to the {} bank", p, to.label()),
            None => format!("farmer returns alone to the {} bank", to.label()),
        };
        rec.push(
            format!("Move {}: {}. {}", k + 1, trip, safety),
            &[1, 2, 3],
            RiverState {
                left,
                right,
                boat: crossing.cargo,
                farmer: FarmerPosition::Rowing { from },
                crossings: k + 1,
            },
        );

        sides = next;
        let mut arrival = match crossing.cargo {
            Some(p) => format!("Farmer and {} arrive on the {} bank.", p, to.label()),
            None => format!("Farmer arrives on the {} bank.", to.label()),
        };
        let lines: &[usize] = if sides.is_goal() {
            arrival.push_str(" Solved: everyone is across!");
            &[4]
        } else {
            &[2, 3]
        };
        rec.push(
            arrival,
            lines,
            RiverState {
                left: sides.on(Bank::Left),
                right: sides.on(Bank::Right),
                boat: None,
                farmer: FarmerPosition::OnBank(to),
                crossings: k + 1,
            },
        );
    }

    tracing::debug!(crossings = total, frames = rec.len(), "generated river crossing");
    rec.finish()
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Timeline;

    #[test]
    fn test_solution_is_seven_crossings() {
        let cargo: Vec<Option<Passenger>> = solve().iter().map(|c| c.cargo).collect();
        assert_eq!(
            cargo,
            vec![
                Some(Passenger::Hen),
                None,
                Some(Passenger::Fox),
                Some(Passenger::Hen),
                Some(Passenger::Grain),
                None,
                Some(Passenger::Hen),
            ]
        );
    }

    #[test]
    fn test_every_intermediate_state_is_safe() {
        let mut sides = Sides::start();
        for crossing in solve() {
            assert_eq!(crossing.from, sides.farmer());
            sides = sides.cross(crossing.cargo).unwrap();
            assert!(sides.is_safe());
        }
        assert!(sides.is_goal());
    }

    #[test]
    fn test_safety_rules() {
        // farmer leaves with the grain: fox and hen left together
        let bad = Sides::start().cross(Some(Passenger::Grain)).unwrap();
        assert!(!bad.is_safe());
        // farmer leaves with the fox: hen and grain left together
        let bad = Sides::start().cross(Some(Passenger::Fox)).unwrap();
        assert!(!bad.is_safe());
        assert!(Sides::start().cross(Some(Passenger::Hen)).unwrap().is_safe());
    }

    #[test]
    fn test_cargo_must_share_the_farmers_bank() {
        let after = Sides::start().cross(Some(Passenger::Hen)).unwrap();
        assert_eq!(after.cross(Some(Passenger::Fox)), None);
        assert_eq!(after.side_of(Passenger::Hen), Bank::Right);
    }

    #[test]
    fn test_generated_frames() {
        let model = generate();
        assert_eq!(model.frame_count(), 15);

        let depart = model.get(1).unwrap();
        assert_eq!(depart.payload().boat, Some(Passenger::Hen));
        assert_eq!(depart.payload().left, vec![Passenger::Fox, Passenger::Grain]);
        assert!(depart.narration().contains("The fox and the grain are safe together"));

        let done = model.last().payload();
        assert!(done.left.is_empty());
        assert_eq!(done.right, Passenger::ALL.to_vec());
        assert_eq!(done.farmer, FarmerPosition::OnBank(Bank::Right));
        assert!(model.last().narration().contains("Solved"));
    }
}
