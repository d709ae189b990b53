use crate::boundary::{resolve_step, StepResolution};
use crate::core::{Action, AgentId, AgentState, Axis, BoundaryPolicy, Command, LogEntry, Outcome};
use crate::grid::Grid;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Маршрут однієї черепахи: сценарій команд, власний стан і журнал.
#[derive(Debug, Clone, Serialize)]
pub struct Run {
    id: AgentId,
    commands: Vec<Command>,
    state: AgentState,
    log: Vec<LogEntry>,
    current_index: usize,
    outcome: Outcome,
    #[serde(skip)]
    executed: bool,
}

impl Run {
    /// Створює маршрут з власною копією стартового стану.
    pub fn new(id: AgentId, start: AgentState, commands: Vec<Command>) -> Self {
        Self {
            id,
            commands,
            state: start,
            log: Vec::new(),
            current_index: 0,
            outcome: Outcome::Unfinished,
            executed: false,
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Кількість команд, що лишились невиконаними.
    pub fn commands_left(&self) -> usize {
        self.commands
            .len()
            .saturating_sub(self.current_index)
            .saturating_sub(1)
    }

    /// Виконує сценарій до першої пастки, сховища, зупинки на межі
    /// або до кінця команд. Повторний виклик нічого не змінює.
    pub fn execute(&mut self, grid: &Grid, policy: BoundaryPolicy) {
        if self.executed {
            warn!(agent_id = self.id, "Маршрут уже виконано, пропускаю");
            return;
        }
        self.executed = true;
        debug!(
            agent_id = self.id,
            commands = self.commands.len(),
            %policy,
            "Черепаха вирушає в дорогу"
        );

        for index in 0..self.commands.len() {
            let command = self.commands[index];

            // Старт або попередній крок міг лишити черепаху на об'єкті.
            if self.reached_entity(grid, index, command) {
                return;
            }

            self.current_index = index;

            match command.turn() {
                Some(turn) => {
                    self.state.heading = self.state.heading.rotate(turn);
                    self.push(index, command, Action::Rotated(self.state.heading));
                }
                None => {
                    if !self.advance(grid, policy, index, command) {
                        return;
                    }
                }
            }

            if self.reached_entity(grid, index, command) {
                return;
            }
        }

        self.outcome = Outcome::Unfinished;
        info!(
            agent_id = self.id,
            x = self.state.position.x,
            y = self.state.position.y,
            "Команди закінчились, черепаха лишається на полі"
        );
    }

    /// Один крок уперед. Повертає `false`, якщо маршрут зупинено на межі.
    fn advance(&mut self, grid: &Grid, policy: BoundaryPolicy, index: usize, command: Command) -> bool {
        let (axis, delta) = self.state.heading.step();
        let position = self.state.position;
        let extent = match axis {
            Axis::X => grid.width(),
            Axis::Y => grid.height(),
        };

        let action = match resolve_step(policy, position.on(axis), delta, extent) {
            StepResolution::Moved(next) => {
                self.state.position = position.with(axis, next);
                Action::Stepped { axis, delta }
            }
            StepResolution::Passed(_) => Action::Passed { axis, delta },
            StepResolution::Wrapped(to) => {
                self.state.position = position.with(axis, to);
                Action::Wrapped { axis, to }
            }
            StepResolution::Stopped => {
                self.push(index, command, Action::Stopped { axis });
                self.outcome = Outcome::OutOfBoundStopped;
                info!(
                    agent_id = self.id,
                    index,
                    %position,
                    "Крок за межу сітки, маршрут зупинено"
                );
                return false;
            }
        };

        debug!(agent_id = self.id, index, %action, "Крок");
        self.push(index, command, action);
        true
    }

    /// Перевіряє клітинку під черепахою. `true` означає кінець маршруту.
    fn reached_entity(&mut self, grid: &Grid, index: usize, command: Command) -> bool {
        let Some(entity) = grid.entity_at(self.state.position) else {
            return false;
        };
        let outcome = entity.kind.outcome();
        self.outcome = outcome;
        self.push(index, command, Action::Finished(outcome));
        info!(
            agent_id = self.id,
            x = entity.position.x,
            y = entity.position.y,
            %outcome,
            "Черепаха завершила подорож"
        );
        true
    }

    fn push(&mut self, index: usize, command: Command, action: Action) {
        self.log.push(LogEntry {
            command,
            index,
            action,
        });
    }
}
