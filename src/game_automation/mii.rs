// Mii selection screen navigation
//
// Miis sit in pages of ten, two rows of five. Opening the picker puts the
// cursor on the first Mii of page 0; each `rrrrralllll` turns one page. The
// last page is laid out differently and needs an extra `lllu` to land on its
// first cell.
use super::error::{AutomationError, AutomationResult};
use super::formation::BATTING_SLOTS;
use std::str::FromStr;

const MIIS_PER_PAGE: u16 = 10;
const MIIS_PER_ROW: u16 = 5;

const OPEN_PICKER: &str = "awllllll";
const NEXT_PAGE: &str = "rrrrralllll";
const LAST_PAGE_ANCHOR: &str = "lllu";
/// Pick the Mii, back out, then let the menu settle.
const CONFIRM_PICK: &str = "abw";
const LEAVE_AWAY: &str = "uuadd";
const LEAVE_HOME: &str = "dauu";
/// Closes the character select once both sides are done.
const FINISH_SELECTION: &str = "a";

/// Which Miis each team picks, by index into the saved Mii list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiiSelection {
    total: u16,
    away: Vec<u16>,
    home: Vec<u16>,
}

impl MiiSelection {
    pub fn new(total: u16, away: Vec<u16>, home: Vec<u16>) -> AutomationResult<Self> {
        for (side, picks) in [("away", &away), ("home", &home)] {
            if picks.len() > BATTING_SLOTS as usize {
                return Err(AutomationError::InvalidMiiSelection {
                    reason: format!("{} Miis on the {side} team", picks.len()),
                });
            }
            if let Some(&index) = picks.iter().find(|&&index| index >= total) {
                return Err(AutomationError::InvalidMiiSelection {
                    reason: format!("Mii {index} is past the end of a list of {total}"),
                });
            }
        }
        Ok(Self { total, away, home })
    }

    pub fn total(&self) -> u16 {
        self.total
    }

    pub fn away(&self) -> &[u16] {
        &self.away
    }

    pub fn home(&self) -> &[u16] {
        &self.home
    }

    /// Instruction string for both teams, away first.
    pub fn walk(&self) -> String {
        let mut out = self.side_walk(&self.away);
        out.push_str(LEAVE_AWAY);
        out.push_str(&self.side_walk(&self.home));
        out.push_str(LEAVE_HOME);
        out.push_str(FINISH_SELECTION);
        out
    }

    fn side_walk(&self, picks: &[u16]) -> String {
        let last_page = self.total.saturating_sub(1) / MIIS_PER_PAGE;
        let mut out = String::new();
        for &index in picks {
            let page = index / MIIS_PER_PAGE;
            let cell = index % MIIS_PER_PAGE;
            out.push_str(OPEN_PICKER);
            for _ in 0..page {
                out.push_str(NEXT_PAGE);
            }
            if page == last_page {
                out.push_str(LAST_PAGE_ANCHOR);
            }
            for _ in 0..cell % MIIS_PER_ROW {
                out.push('r');
            }
            if cell >= MIIS_PER_ROW {
                out.push('d');
            }
            out.push_str(CONFIRM_PICK);
        }
        out
    }
}

fn parse_picks(s: &str) -> AutomationResult<Vec<u16>> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(|part| {
            part.trim()
                .parse::<u16>()
                .map_err(|_| AutomationError::InvalidMiiSelection {
                    reason: format!("'{}' is not a Mii index", part.trim()),
                })
        })
        .collect()
}

impl FromStr for MiiSelection {
    type Err = AutomationError;

    /// `"<total>:<away>/<home>"`, e.g. `"25:3,14/21"`. Either side may be empty.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AutomationError::InvalidMiiSelection {
            reason: format!("expected '<total>:<away>/<home>', got '{s}'"),
        };
        let (total, teams) = s.split_once(':').ok_or_else(invalid)?;
        let (away, home) = teams.split_once('/').ok_or_else(invalid)?;
        let total = total.trim().parse::<u16>().map_err(|_| invalid())?;
        MiiSelection::new(total, parse_picks(away)?, parse_picks(home)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_miis_only_leaves_both_sides() {
        let selection = MiiSelection::new(25, vec![], vec![]).unwrap();
        assert_eq!(selection.walk(), "uuadddauua");
    }

    #[test]
    fn test_first_page_top_and_bottom_rows() {
        let selection = MiiSelection::new(25, vec![2, 7], vec![]).unwrap();
        assert_eq!(
            selection.walk(),
            "awllllllrrabw\
             awllllllrrdabw\
             uuadd\
             dauu\
             a"
        );
    }

    #[test]
    fn test_page_turns() {
        let selection = MiiSelection::new(35, vec![], vec![13]).unwrap();
        assert_eq!(
            selection.walk(),
            "uuadd\
             awllllllrrrrralllllrrrabw\
             dauu\
             a"
        );
    }

    #[test]
    fn test_last_page_anchor() {
        let selection = MiiSelection::new(28, vec![27], vec![]).unwrap();
        assert_eq!(
            selection.walk(),
            "awllllllrrrrralllllrrrrrallllllllurrdabw\
             uuadd\
             dauu\
             a"
        );
    }

    #[test]
    fn test_single_page_list_is_the_last_page() {
        let selection = MiiSelection::new(5, vec![3], vec![]).unwrap();
        assert_eq!(selection.walk(), "awlllllllllurrrabwuuadddauua");
    }

    #[test]
    fn test_parse() {
        let selection: MiiSelection = "25:3,14/21".parse().unwrap();
        assert_eq!(selection.total(), 25);
        assert_eq!(selection.away(), &[3, 14]);
        assert_eq!(selection.home(), &[21]);

        let selection: MiiSelection = "4:/".parse().unwrap();
        assert!(selection.away().is_empty() && selection.home().is_empty());
    }

    #[test]
    fn test_invalid_selection_rejected() {
        assert!("25:3,14".parse::<MiiSelection>().is_err());
        assert!("x:1/2".parse::<MiiSelection>().is_err());
        assert!("10:10/".parse::<MiiSelection>().is_err());
        assert!(MiiSelection::new(0, vec![0], vec![]).is_err());
        assert!(MiiSelection::new(99, (0..10).collect(), vec![]).is_err());
    }
}
