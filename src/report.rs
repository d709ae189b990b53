//! Текстовий звіт про маршрути.

use crate::agent::Run;

/// Один рядок звіту для маршруту.
pub fn render(run: &Run) -> String {
    let left = match run.commands_left() {
        0 => String::new(),
        n => format!(", commands left: {n}"),
    };
    let turtle = run.id();
    let outcome = run.outcome();
    if outcome.is_finished() {
        format!("Turtle {turtle} finish travel and {outcome}{left}")
    } else {
        format!("Turtle {turtle} not finish travel and still in area{left}")
    }
}

/// Повний дамп маршрутів для налагодження.
pub fn dump(runs: &[Run]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(runs)
}
