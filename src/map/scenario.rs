//! Scenario text format.
//!
//! A scenario is six `[row,col]` pairs in placement order: agent, nemesis,
//! monster, rock, goal, safe haven. Brackets and commas are optional
//! separators, so `[0,0] [4,2] ...` and `0 0 4 2 ...` are equivalent. The
//! pairs may span several lines; blank lines are ignored and anything else
//! after the sixth pair is an error.

use super::*;
use crate::constants::*;
use itertools::Itertools;

const VALUES_PER_SCENARIO: usize = PLACEMENT_ORDER.len() * 2;

pub fn parse_placements(text: &str) -> MapResult<Placements> {
    let mut values: Vec<(usize, i64)> = Vec::with_capacity(VALUES_PER_SCENARIO);

    for (line_index, line) in text.lines().enumerate() {
        let cleaned = line.replace(['[', ']', ','], " ");
        for token in cleaned.split_whitespace() {
            let value = token.parse::<i64>().map_err(|_| MapError::Parse {
                line: line_index + 1,
                reason: format!("`{}` is not an integer", token),
            })?;
            values.push((line_index + 1, value));
        }
    }

    if values.len() < VALUES_PER_SCENARIO {
        return Err(MapError::Parse {
            line: text.lines().count().max(1),
            reason: format!(
                "expected {} coordinates, found {}",
                VALUES_PER_SCENARIO,
                values.len()
            ),
        });
    }
    if values.len() > VALUES_PER_SCENARIO {
        let (line, _) = values[VALUES_PER_SCENARIO];
        return Err(MapError::Parse {
            line,
            reason: "trailing coordinates after the safe haven".to_string(),
        });
    }

    let positions: Vec<Position> = values
        .iter()
        .map(|&(_, value)| value)
        .tuples()
        .map(|(row, col)| {
            if (0..GRID_HEIGHT as i64).contains(&row) && (0..GRID_WIDTH as i64).contains(&col) {
                Ok(Position::new(row as u8, col as u8))
            } else {
                Err(MapError::OutOfBounds { row, col })
            }
        })
        .collect::<MapResult<_>>()?;

    Ok(Placements {
        agent: positions[0],
        nemesis: positions[1],
        monster: positions[2],
        rock: positions[3],
        goal: positions[4],
        safe_haven: positions[5],
    })
}

/// Parse and validate a scenario in one step.
pub fn parse_map(text: &str) -> MapResult<GameMap> {
    GameMap::initialize(&parse_placements(text)?)
}

impl Placements {
    /// Format as a single scenario line.
    pub fn to_scenario(&self) -> String {
        self.objects().map(|object| object.position.to_string()).join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bracketed_pairs() {
        let placements =
            parse_placements("[0,0] [4,2] [2,7] [7,4] [8,8] [0,8]\n").unwrap();
        assert_eq!(placements.nemesis, Position::new(4, 2));
        assert_eq!(placements.safe_haven, Position::new(0, 8));
        assert_eq!(
            placements.to_scenario(),
            "[0,0] [4,2] [2,7] [7,4] [8,8] [0,8]"
        );
    }

    #[test]
    fn pairs_may_span_lines() {
        let placements = parse_placements("0 0 4 2\n2 7 7 4\n8 8 0 8").unwrap();
        assert_eq!(placements.rock, Position::new(7, 4));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            parse_placements("[0,0] [4,x]"),
            Err(MapError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            parse_placements("[0,0] [4,2]"),
            Err(MapError::Parse { .. })
        ));
        assert_eq!(
            parse_placements("[0,0] [4,2] [2,9] [7,4] [8,8] [0,8]").unwrap_err(),
            MapError::OutOfBounds { row: 2, col: 9 }
        );
    }

    #[test]
    fn later_lines_are_checked_too() {
        let scenario = "[0,0] [4,2] [2,7] [7,4] [8,8] [0,8]";
        assert!(parse_placements(&format!("{}\n\n   \n", scenario)).is_ok());
        assert!(matches!(
            parse_placements(&format!("{}\nfoo", scenario)),
            Err(MapError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            parse_placements(&format!("{}\n\n[1,1]", scenario)),
            Err(MapError::Parse { line: 3, .. })
        ));
        assert!(matches!(
            parse_placements(&format!("{} 5", scenario)),
            Err(MapError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn parse_map_validates_placements() {
        // Goal inside the Monster's perception ring.
        let err = parse_map("[0,0] [4,2] [2,7] [7,4] [2,6] [0,8]").unwrap_err();
        assert!(matches!(err, MapError::Conflict { .. }));
    }
}
