//! Паралельне виконання маршрутів.
//!
//! Кожен маршрут отримує власну копію стану та окреме завдання; сітка
//! одна на всіх і лише читається. Звіти повертаються координатору через
//! `mpsc`, канал закривається тільки після завершення останнього завдання.

use crate::agent::Run;
use crate::core::{BoundaryPolicy, SwarmError};
use crate::grid::Grid;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

const DEFAULT_REPORT_CAPACITY: usize = 32;

pub struct Coordinator {
    grid: Arc<Grid>,
    policy: BoundaryPolicy,
    report_capacity: usize,
}

impl Coordinator {
    pub fn new(grid: Grid, policy: BoundaryPolicy) -> Self {
        Self {
            grid: Arc::new(grid),
            policy,
            report_capacity: DEFAULT_REPORT_CAPACITY,
        }
    }

    /// Розмір буфера каналу звітів.
    pub fn with_report_capacity(mut self, capacity: usize) -> Self {
        self.report_capacity = capacity.max(1);
        self
    }

    /// Запускає всі маршрути одночасно і чекає, поки завершиться кожен.
    /// Результати записуються назад у `runs` у тому ж порядку.
    pub async fn execute(&self, runs: &mut [Run]) -> Result<(), SwarmError> {
        if runs.is_empty() {
            return Ok(());
        }

        let (tx, mut rx) = mpsc::channel::<(usize, Run)>(self.report_capacity);
        info!(
            runs = runs.len(),
            policy = %self.policy,
            "Координатор: запуск маршрутів"
        );

        for (slot, run) in runs.iter().enumerate() {
            let mut run = run.clone();
            let grid = Arc::clone(&self.grid);
            let policy = self.policy;
            let tx = tx.clone();

            // Маршрут не призупиняється, тому виконується поза async-воркерами.
            tokio::task::spawn_blocking(move || {
                run.execute(&grid, policy);
                let agent_id = run.id();
                if tx.blocking_send((slot, run)).is_err() {
                    error!(agent_id, "Втрачено зв'язок з координатором");
                }
            });
        }
        drop(tx);

        let mut reported = vec![false; runs.len()];
        while let Some((slot, run)) = rx.recv().await {
            debug!(
                agent_id = run.id(),
                outcome = %run.outcome(),
                index = run.current_index(),
                heading = %run.state().heading,
                entries = run.log().len(),
                "Отримано звіт маршруту"
            );
            runs[slot] = run;
            reported[slot] = true;
        }

        if let Some(slot) = reported.iter().position(|done| !done) {
            return Err(SwarmError::RunLost {
                agent_id: runs[slot].id(),
            });
        }

        info!(runs = runs.len(), "Координатор: усі маршрути завершено");
        Ok(())
    }
}
