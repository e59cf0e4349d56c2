// Lineup screen navigation
//
// The lineup screen is a row of batting slots with a cursor that starts on
// slot 0. Pressing A on a slot picks it up and pressing A on another slot
// swaps the two. Slots are numbered 0..=8 and a batting target is the slot
// itself. Custom players enter the lineup in roster order at slots 1..=n;
// the walk below moves each to its batting target with a cycle sort.
use super::error::{AutomationError, AutomationResult};
use super::mii::MiiSelection;
use std::str::FromStr;

pub const BATTING_SLOTS: u8 = 9;
/// Cursor slot the walk ends on, where the confirm prompt sits.
const FINAL_SLOT: u8 = BATTING_SLOTS - 1;
/// Custom players start at slot 1, so at most eight fit on the cursor row.
const MAX_CUSTOM_PLAYERS: usize = FINAL_SLOT as usize;

/// Batting targets (0-based slots) of the custom players, in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lineup {
    targets: Vec<u8>,
}

impl Lineup {
    pub fn new(targets: Vec<u8>) -> AutomationResult<Self> {
        if targets.len() > MAX_CUSTOM_PLAYERS {
            return Err(AutomationError::InvalidLineup {
                reason: format!(
                    "{} custom players, at most {MAX_CUSTOM_PLAYERS} fit",
                    targets.len()
                ),
            });
        }
        for (i, &target) in targets.iter().enumerate() {
            if target > FINAL_SLOT {
                return Err(AutomationError::InvalidLineup {
                    reason: format!("batting slot {target} is outside 0..={FINAL_SLOT}"),
                });
            }
            if targets[..i].contains(&target) {
                return Err(AutomationError::InvalidLineup {
                    reason: format!("batting slot {target} is assigned twice"),
                });
            }
        }
        Ok(Self { targets })
    }

    pub fn targets(&self) -> &[u8] {
        &self.targets
    }

    /// Instruction string (`l`, `r`, `a`) that sorts the lineup into place.
    pub fn walk(&self) -> String {
        let mut order = self.targets.clone();
        let mut out = String::new();
        let mut cursor: u8 = 0;
        let mut i = 0;

        while i < order.len() {
            let slot = i as u8 + 1;
            move_cursor(&mut out, &mut cursor, slot);
            out.push('a');
            let target = order[i];
            move_cursor(&mut out, &mut cursor, target);
            out.push('a');
            // targets are distinct, so each swap parks one player for good
            if target > slot && (target as usize) <= order.len() {
                order.swap(i, target as usize - 1);
            } else {
                i += 1;
            }
        }
        move_cursor(&mut out, &mut cursor, FINAL_SLOT);
        out
    }
}

fn move_cursor(out: &mut String, cursor: &mut u8, to: u8) {
    while *cursor < to {
        out.push('r');
        *cursor += 1;
    }
    while *cursor > to {
        out.push('l');
        *cursor -= 1;
    }
}

impl FromStr for Lineup {
    type Err = AutomationError;

    /// Comma-separated targets, e.g. `"3,1,2"`. An empty string is an empty lineup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Lineup::default());
        }
        let targets = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u8>()
                    .map_err(|_| AutomationError::InvalidLineup {
                        reason: format!("'{}' is not a batting slot", part.trim()),
                    })
            })
            .collect::<AutomationResult<Vec<u8>>>()?;
        Lineup::new(targets)
    }
}

/// Both teams' lineups, away first as the game presents them, plus the Miis
/// to pick on the character select screen beforehand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formation {
    pub away: Lineup,
    pub home: Lineup,
    pub miis: Option<MiiSelection>,
}

impl FromStr for Formation {
    type Err = AutomationError;

    /// `"<away>/<home>"`, each side as accepted by [`Lineup::from_str`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (away, home) = s.split_once('/').ok_or_else(|| AutomationError::InvalidLineup {
            reason: format!("expected '<away>/<home>', got '{s}'"),
        })?;
        Ok(Formation {
            away: away.parse()?,
            home: home.parse()?,
            miis: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lineup_moves_to_final_slot() {
        assert_eq!(Lineup::default().walk(), "rrrrrrrr");
    }

    #[test]
    fn test_single_player_in_place() {
        let lineup = Lineup::new(vec![1]).unwrap();
        assert_eq!(lineup.walk(), "raarrrrrrr");
    }

    #[test]
    fn test_two_players_swapped() {
        let lineup = Lineup::new(vec![2, 1]).unwrap();
        assert_eq!(lineup.walk(), "raralaaraarrrrrr");
    }

    #[test]
    fn test_three_cycle() {
        let lineup: Lineup = "3,1,2".parse().unwrap();
        assert_eq!(lineup.walk(), "rarrallaralaaraaraarrrrr");
    }

    #[test]
    fn test_target_past_custom_players() {
        let lineup = Lineup::new(vec![8]).unwrap();
        assert_eq!(lineup.walk(), "rarrrrrrra");
    }

    #[test]
    fn test_leadoff_target() {
        let lineup = Lineup::new(vec![0]).unwrap();
        assert_eq!(lineup.walk(), "ralarrrrrrrr");

        let lineup = Lineup::new(vec![0, 1]).unwrap();
        assert_eq!(lineup.walk(), "ralarralarrrrrrr");
    }

    #[test]
    fn test_cursor_stays_on_the_row() {
        let lineups = [
            vec![8],
            vec![0, 8],
            vec![8, 7, 6, 5, 4, 3, 2, 1],
            vec![0, 1, 2, 3, 4, 5, 6, 7],
            vec![3, 0, 8, 1],
        ];
        for targets in lineups {
            let walk = Lineup::new(targets.clone()).unwrap().walk();
            let mut cursor: i32 = 0;
            for c in walk.chars() {
                match c {
                    'r' => cursor += 1,
                    'l' => cursor -= 1,
                    _ => {}
                }
                assert!(
                    (0..=FINAL_SLOT as i32).contains(&cursor),
                    "{targets:?} moved the cursor to slot {cursor}"
                );
            }
            assert_eq!(cursor, FINAL_SLOT as i32);
        }
    }

    #[test]
    fn test_duplicate_target_rejected() {
        let err = Lineup::new(vec![2, 2]).unwrap_err();
        assert!(matches!(err, AutomationError::InvalidLineup { ref reason } if reason.contains("twice")));
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(Lineup::new(vec![9]).is_err());
        assert!(Lineup::new((0..9).collect()).is_err());
        assert!("1,x".parse::<Lineup>().is_err());
    }

    #[test]
    fn test_formation_parse() {
        let formation: Formation = "2,1/".parse().unwrap();
        assert_eq!(formation.away.targets(), &[2, 1]);
        assert!(formation.home.targets().is_empty());
        assert!("2,1".parse::<Formation>().is_err());
    }
}
