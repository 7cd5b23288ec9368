//! Built-in tile catalog.
//!
//! The sixteen modules the app ships with, their default display order and
//! the storage key the whole board is persisted under.

use chrono::{NaiveDate, Utc};
use serde_json::json;

use crate::{ModuleDescriptor, ModuleId, Registry};

/// Storage key holding the serialized board snapshot.
pub const STORAGE_KEY: &str = "versaboard.modules.v3";

pub const QUICK_NOTE: &str = "quickNote";
pub const CHECKLIST: &str = "checklist";
pub const POMODORO: &str = "pomodoro";
pub const HABIT_STREAK: &str = "habitStreak";
pub const LINK_SAVER: &str = "linkSaver";
pub const WATER_TRACKER: &str = "waterTracker";
pub const COUNTER: &str = "counter";
pub const STOPWATCH: &str = "stopwatch";
pub const UNIT_CONVERTER: &str = "unitConverter";
pub const EXPENSE_MINI: &str = "expenseMini";
pub const PASSWORD_GEN: &str = "passwordGen";
pub const MOOD: &str = "mood";
pub const BREATHING: &str = "breathing";
pub const COUNTDOWN: &str = "countdown";
pub const RANDOM_PICKER: &str = "randomPicker";
pub const ROUTINE_BUILDER: &str = "routineBuilder";

/// Order a fresh install shows the tiles in.
///
/// Differs from registry order: the routine builder is promoted next to the
/// habit tracker.
pub const DEFAULT_ORDER: [&str; 16] = [
    QUICK_NOTE,
    CHECKLIST,
    POMODORO,
    HABIT_STREAK,
    ROUTINE_BUILDER,
    LINK_SAVER,
    WATER_TRACKER,
    COUNTER,
    STOPWATCH,
    UNIT_CONVERTER,
    EXPENSE_MINI,
    PASSWORD_GEN,
    MOOD,
    BREATHING,
    COUNTDOWN,
    RANDOM_PICKER,
];

const POMODORO_FOCUS_SECS: u32 = 25 * 60;
const POMODORO_BREAK_SECS: u32 = 5 * 60;
const WATER_TARGET_ML: u32 = 2000;

impl Registry {
    /// The built-in catalog, with date-dependent defaults seeded from today (UTC).
    pub fn builtin() -> Self {
        Self::builtin_on(Utc::now().date_naive())
    }

    /// The built-in catalog with date-dependent defaults seeded from `today`.
    pub fn builtin_on(today: NaiveDate) -> Self {
        Self::from_unique(builtin_modules(today))
    }
}

/// Default order as owned ids.
pub fn default_order() -> Vec<ModuleId> {
    DEFAULT_ORDER.iter().copied().map(ModuleId::known).collect()
}

fn module(
    id: &'static str,
    title: &str,
    icon: &str,
    initial_state: serde_json::Value,
) -> ModuleDescriptor {
    ModuleDescriptor::new(ModuleId::known(id), title, icon, initial_state)
}

fn builtin_modules(today: NaiveDate) -> Vec<ModuleDescriptor> {
    vec![
        module(
            QUICK_NOTE,
            "Quick Note",
            "pencil",
            json!({ "notes": [], "draft": "", "search": "" }),
        ),
        module(CHECKLIST, "Checklist", "checkbox", json!([])),
        module(
            POMODORO,
            "Pomodoro",
            "timer",
            json!({
                "seconds": POMODORO_FOCUS_SECS,
                "running": false,
                "mode": "focus",
                "preset": "25/5",
                "durations": { "focus": POMODORO_FOCUS_SECS, "break": POMODORO_BREAK_SECS },
                "cycles": 0,
            }),
        ),
        module(
            HABIT_STREAK,
            "Habit Streak",
            "flame",
            json!({ "habits": [] }),
        ),
        module(LINK_SAVER, "Link Saver", "bookmark", json!([])),
        module(
            WATER_TRACKER,
            "Water",
            "water",
            json!({
                "date": today.format("%Y-%m-%d").to_string(),
                "ml": 0,
                "target": WATER_TARGET_ML,
            }),
        ),
        module(COUNTER, "Counter", "stats-chart", json!(0)),
        module(
            STOPWATCH,
            "Stopwatch",
            "time",
            json!({ "seconds": 0, "running": false, "laps": [] }),
        ),
        module(
            UNIT_CONVERTER,
            "Unit Converter",
            "swap-horizontal",
            json!({ "cat": "Length", "from": "m", "to": "km", "value": "" }),
        ),
        module(EXPENSE_MINI, "Expenses", "wallet", json!([])),
        module(
            PASSWORD_GEN,
            "Password Gen",
            "key",
            json!({
                "value": "",
                "opt": { "length": 12, "upper": true, "lower": true, "digits": true, "symbols": false },
            }),
        ),
        module(MOOD, "Mood", "happy", json!({ "history": [] })),
        module(
            BREATHING,
            "Breathing",
            "medkit",
            json!({ "running": false, "phase": "inhale", "seconds": 4, "mode": "box", "cycles": 0 }),
        ),
        module(
            COUNTDOWN,
            "Countdown",
            "hourglass",
            json!({ "title": "My deadline", "iso": "" }),
        ),
        module(
            RANDOM_PICKER,
            "Random Picker",
            "shuffle",
            json!({ "input": "" }),
        ),
        module(
            ROUTINE_BUILDER,
            "Routine Builder",
            "list",
            json!({ "name": "My Routine", "steps": [], "history": [] }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_order_covers_registry() {
        let registry = Registry::builtin();
        let ordered: HashSet<&str> = DEFAULT_ORDER.iter().copied().collect();
        let registered: HashSet<&str> = registry.ids().map(ModuleId::as_str).collect();
        assert_eq!(ordered, registered);
        assert_eq!(ordered.len(), DEFAULT_ORDER.len());
    }

    #[test]
    fn water_tracker_seeded_with_date() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let registry = Registry::builtin_on(day);
        let water = registry.by_id(WATER_TRACKER).unwrap();
        assert_eq!(water.initial_state["date"], "2024-03-09");
        assert_eq!(water.initial_state["target"], 2000);
    }

    #[test]
    fn counter_defaults_to_zero() {
        let registry = Registry::builtin();
        assert_eq!(registry.by_id(COUNTER).unwrap().initial_state, json!(0));
    }
}
