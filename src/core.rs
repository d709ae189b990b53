// СЛОВНИК
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Порядковий номер черепахи (1-based, у порядку рядків команд).
pub type AgentId = usize;

/// Клітинка сітки. `x` росте на схід, `y` росте на південь.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Значення координати на заданій осі.
    pub fn on(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Копія позиції з заміненою координатою на осі `axis`.
    pub fn with(self, axis: Axis, value: i32) -> Self {
        match axis {
            Axis::X => Self { x: value, ..self },
            Axis::Y => Self { y: value, ..self },
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Вісь сітки.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
        })
    }
}

/// Напрямок повороту.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// Куди дивиться черепаха.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    South,
    East,
    West,
}

impl Heading {
    /// Поворот на 90°: праворуч за годинниковою стрілкою, ліворуч проти.
    pub fn rotate(self, turn: Turn) -> Heading {
        match (turn, self) {
            (Turn::Right, Heading::North) => Heading::East,
            (Turn::Right, Heading::East) => Heading::South,
            (Turn::Right, Heading::South) => Heading::West,
            (Turn::Right, Heading::West) => Heading::North,
            (Turn::Left, Heading::North) => Heading::West,
            (Turn::Left, Heading::West) => Heading::South,
            (Turn::Left, Heading::South) => Heading::East,
            (Turn::Left, Heading::East) => Heading::North,
        }
    }

    /// Вісь та знак одного кроку вперед.
    pub fn step(self) -> (Axis, i32) {
        match self {
            Heading::North => (Axis::Y, -1),
            Heading::South => (Axis::Y, 1),
            Heading::East => (Axis::X, 1),
            Heading::West => (Axis::X, -1),
        }
    }

    pub fn letter(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::South => 'S',
            Heading::East => 'E',
            Heading::West => 'W',
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Heading {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Heading::North),
            "S" => Ok(Heading::South),
            "E" => Ok(Heading::East),
            "W" => Ok(Heading::West),
            other => Err(UnknownToken(other.to_string())),
        }
    }
}

/// Одна команда зі сценарію черепахи.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Command {
    Move,
    RotateRight,
    RotateLeft,
}

impl Command {
    /// Поворот, який виконує команда; `None` для кроку.
    pub fn turn(self) -> Option<Turn> {
        match self {
            Command::Move => None,
            Command::RotateRight => Some(Turn::Right),
            Command::RotateLeft => Some(Turn::Left),
        }
    }
}

impl FromStr for Command {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Command::Move),
            "R" => Ok(Command::RotateRight),
            "L" => Ok(Command::RotateLeft),
            other => Err(UnknownToken(other.to_string())),
        }
    }
}

/// Тип точкового об'єкта на сітці.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Trap,
    Refuge,
}

impl EntityKind {
    /// Чим закінчується маршрут черепахи, що потрапила на цей об'єкт.
    pub fn outcome(self) -> Outcome {
        match self {
            EntityKind::Trap => Outcome::Caught,
            EntityKind::Refuge => Outcome::Saved,
        }
    }
}

/// Пастка або сховище в конкретній клітинці.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entity {
    pub position: Position,
    pub kind: EntityKind,
}

/// Позиція та напрямок черепахи.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentState {
    pub position: Position,
    pub heading: Heading,
}

/// Що робити з кроком, який виводить за межі сітки.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// Крок поглинається, черепаха лишається на місці.
    #[default]
    Pass,
    /// Маршрут зупиняється.
    Stop,
    /// Черепаха з'являється з протилежного краю.
    Portal,
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BoundaryPolicy::Pass => "pass",
            BoundaryPolicy::Stop => "stop",
            BoundaryPolicy::Portal => "portal",
        })
    }
}

impl FromStr for BoundaryPolicy {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pass" => Ok(BoundaryPolicy::Pass),
            "stop" => Ok(BoundaryPolicy::Stop),
            "portal" => Ok(BoundaryPolicy::Portal),
            other => Err(UnknownToken(other.to_string())),
        }
    }
}

/// Остаточний результат маршруту.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Outcome {
    Caught,
    Saved,
    OutOfBoundStopped,
    Unfinished,
}

impl Outcome {
    /// Чи дійшла черепаха до пастки або сховища.
    pub fn is_finished(self) -> bool {
        matches!(self, Outcome::Caught | Outcome::Saved)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Caught => "caught",
            Outcome::Saved => "saved",
            Outcome::OutOfBoundStopped => "out of bound",
            Outcome::Unfinished => "unfinished",
        })
    }
}

/// Що саме сталося на кроці маршруту.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Action {
    Rotated(Heading),
    Stepped { axis: Axis, delta: i32 },
    Passed { axis: Axis, delta: i32 },
    Wrapped { axis: Axis, to: i32 },
    Stopped { axis: Axis },
    Finished(Outcome),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn direction(delta: i32) -> &'static str {
            if delta > 0 {
                "increment"
            } else {
                "decrement"
            }
        }

        match self {
            Action::Rotated(heading) => write!(f, "changed direction to {heading}"),
            Action::Stepped { axis, delta } => write!(f, "{} {axis} step", direction(*delta)),
            Action::Passed { axis, delta } => write!(f, "pass {} {axis} step", direction(*delta)),
            Action::Wrapped { axis, to } => write!(f, "portal by {axis} step to {to}"),
            Action::Stopped { axis } => write!(f, "stop by {axis} step"),
            Action::Finished(outcome) => write!(f, "finished: {outcome}"),
        }
    }
}

/// Запис журналу виконання маршруту.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    pub command: Command,
    pub index: usize,
    pub action: Action,
}

/// Токен поза закритим словником (напрямок, команда чи політика меж).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("невідомий токен `{0}`")]
pub struct UnknownToken(pub String);

/// Помилки підготовки симуляції. Кожна з них фатальна.
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("не задано шлях до файлу конфігурації")]
    MissingConfig,
    #[error("не вдалося прочитати конфігурацію {}", path.display())]
    UnreadableConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("конфігурація містить {found} рядків, потрібно щонайменше 4 рядки опису та рядок команд")]
    TruncatedConfig { found: usize },
    #[error("некоректні розміри сітки: `{row}`")]
    InvalidDimensionPair { row: String },
    #[error("некоректна позиція об'єкта: `{row}`")]
    InvalidEntityPosition { row: String },
    #[error("некоректний стартовий стан черепахи: `{row}`")]
    InvalidStartingState { row: String },
    #[error("некоректна команда `{token}` у рядку {line}")]
    InvalidCommandToken { line: usize, token: String },
    #[error("некоректна поведінка на межі `{0}`, очікується pass, stop або portal")]
    InvalidBoundaryPolicy(String),
}

/// Збої координатора під час паралельного виконання маршрутів.
#[derive(Error, Debug)]
pub enum SwarmError {
    #[error("черепаха {agent_id} не повернула результат маршруту")]
    RunLost { agent_id: AgentId },
}
