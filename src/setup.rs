//! Розбір файлу сценарію.
//!
//! Формат:
//!
//! ```text
//! 5 5              ширина висота
//! 1,1 1,3 3,3      пастки (рядок може бути порожнім)
//! 2 4              сховище
//! 0 1 N            старт черепахи
//! R M L M M        команди, по рядку на черепаху
//! ```

use crate::agent::Run;
use crate::core::{AgentState, Command, Heading, Position, SetupError};
use crate::grid::Grid;
use std::fs;
use std::path::Path;
use tracing::debug;

const HEADER_LINES: usize = 4;

/// Усе, що потрібно для запуску: сітка, старт і сценарії черепах.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub grid: Grid,
    pub start: AgentState,
    pub commands: Vec<Vec<Command>>,
}

impl Scenario {
    /// Маршрути з нумерацією від 1; кожен отримує копію стартового стану.
    pub fn runs(&self) -> Vec<Run> {
        self.commands
            .iter()
            .enumerate()
            .map(|(i, commands)| Run::new(i + 1, self.start, commands.clone()))
            .collect()
    }
}

pub fn load(path: &Path) -> Result<Scenario, SetupError> {
    let raw = fs::read_to_string(path).map_err(|source| SetupError::UnreadableConfig {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&raw)
}

pub fn parse(raw: &str) -> Result<Scenario, SetupError> {
    let lines: Vec<&str> = raw.lines().collect();
    if lines.len() <= HEADER_LINES {
        return Err(SetupError::TruncatedConfig { found: lines.len() });
    }

    let mut grid = parse_dimensions(lines[0])?;
    parse_traps(&mut grid, lines[1])?;
    parse_refuge(&mut grid, lines[2])?;
    let start = parse_start(&grid, lines[3])?;

    let commands = lines
        .iter()
        .enumerate()
        .skip(HEADER_LINES)
        .filter(|(_, row)| !row.trim().is_empty())
        .map(|(i, row)| parse_commands(i + 1, row))
        .collect::<Result<Vec<_>, _>>()?;
    if commands.is_empty() {
        return Err(SetupError::TruncatedConfig { found: lines.len() });
    }

    debug!(
        width = grid.width(),
        height = grid.height(),
        entities = grid.entities().len(),
        turtles = commands.len(),
        "Сценарій розібрано"
    );
    Ok(Scenario {
        grid,
        start,
        commands,
    })
}

fn parse_dimensions(row: &str) -> Result<Grid, SetupError> {
    let invalid = || SetupError::InvalidDimensionPair {
        row: row.to_string(),
    };
    let (width, height) = number_pair(row.split_whitespace()).ok_or_else(invalid)?;
    Grid::new(width, height).map_err(|_| invalid())
}

fn parse_traps(grid: &mut Grid, row: &str) -> Result<(), SetupError> {
    for pair in row.split_whitespace() {
        let invalid = || SetupError::InvalidEntityPosition {
            row: pair.to_string(),
        };
        let (x, y) = number_pair(pair.split(',')).ok_or_else(invalid)?;
        grid.add_trap(Position::new(x, y)).map_err(|_| invalid())?;
    }
    Ok(())
}

fn parse_refuge(grid: &mut Grid, row: &str) -> Result<(), SetupError> {
    let invalid = || SetupError::InvalidEntityPosition {
        row: row.to_string(),
    };
    let (x, y) = number_pair(row.split_whitespace()).ok_or_else(invalid)?;
    grid.add_refuge(Position::new(x, y)).map_err(|_| invalid())
}

fn parse_start(grid: &Grid, row: &str) -> Result<AgentState, SetupError> {
    let invalid = || SetupError::InvalidStartingState {
        row: row.to_string(),
    };
    let chunks: Vec<&str> = row.split_whitespace().collect();
    let &[x, y, heading] = chunks.as_slice() else {
        return Err(invalid());
    };
    let (x, y) = number_pair([x, y]).ok_or_else(invalid)?;
    let heading: Heading = heading.parse().map_err(|_| invalid())?;
    grid.check_start(AgentState {
        position: Position::new(x, y),
        heading,
    })
    .map_err(|_| invalid())
}

fn parse_commands(line: usize, row: &str) -> Result<Vec<Command>, SetupError> {
    row.split_whitespace()
        .map(|token| {
            token
                .parse::<Command>()
                .map_err(|_| SetupError::InvalidCommandToken {
                    line,
                    token: token.to_string(),
                })
        })
        .collect()
}

/// Рівно два цілих числа.
fn number_pair<'a>(chunks: impl IntoIterator<Item = &'a str>) -> Option<(i32, i32)> {
    let mut chunks = chunks.into_iter();
    let first = chunks.next()?.trim().parse().ok()?;
    let second = chunks.next()?.trim().parse().ok()?;
    if chunks.next().is_some() {
        return None;
    }
    Some((first, second))
}
