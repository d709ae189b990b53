//! Сітка з пастками та сховищами.
//!
//! Після підготовки сітка лише читається: координатор ділить її між
//! маршрутами через `Arc`.

use crate::core::{AgentState, Entity, EntityKind, Position};
use thiserror::Error;

/// Помилки побудови сітки.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("сітка {width}x{height} не містить жодної клітинки")]
    Empty { width: i32, height: i32 },
    #[error("позиція {position} поза межами [0, {width}) x [0, {height})")]
    OutOfBounds {
        position: Position,
        width: i32,
        height: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    entities: Vec<Entity>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::Empty { width, height });
        }
        Ok(Self {
            width,
            height,
            entities: Vec::new(),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }

    /// Перевіряє, що позиція лежить у межах сітки.
    pub fn check(&self, position: Position) -> Result<Position, GridError> {
        if self.contains(position) {
            Ok(position)
        } else {
            Err(GridError::OutOfBounds {
                position,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Перевіряє стартовий стан черепахи.
    pub fn check_start(&self, start: AgentState) -> Result<AgentState, GridError> {
        self.check(start.position).map(|_| start)
    }

    pub fn add_trap(&mut self, position: Position) -> Result<(), GridError> {
        self.add_entity(position, EntityKind::Trap)
    }

    pub fn add_refuge(&mut self, position: Position) -> Result<(), GridError> {
        self.add_entity(position, EntityKind::Refuge)
    }

    fn add_entity(&mut self, position: Position, kind: EntityKind) -> Result<(), GridError> {
        let position = self.check(position)?;
        self.entities.push(Entity { position, kind });
        Ok(())
    }

    /// Об'єкти у порядку додавання.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Перший за порядком додавання об'єкт у клітинці.
    pub fn entity_at(&self, position: Position) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.position == position)
    }
}
