//! Tagged union over the built-in tiles.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use vb_model::catalog;

use crate::lenient::{format_number, list_from_value, number_from_value};
use crate::states::{
    BreathingState, ChecklistItem, CountdownState, HabitStreakState, LinkItem, MoodState,
    PasswordGenState, PomodoroState, QuickNoteState, RandomPickerState, RoutineBuilderState,
    StopwatchState, Txn, UnitConverterState, WaterState,
};

/// Longest quick-note preview before it is cut.
pub const NOTE_PREVIEW_CHARS: usize = 60;

/// Typed state of one tile.
#[derive(Debug, Clone, PartialEq)]
pub enum TileState {
    QuickNote(QuickNoteState),
    Checklist(Vec<ChecklistItem>),
    Pomodoro(PomodoroState),
    HabitStreak(HabitStreakState),
    RoutineBuilder(RoutineBuilderState),
    LinkSaver(Vec<LinkItem>),
    WaterTracker(WaterState),
    Counter(f64),
    Stopwatch(StopwatchState),
    UnitConverter(UnitConverterState),
    ExpenseMini(Vec<Txn>),
    PasswordGen(PasswordGenState),
    Mood(MoodState),
    Breathing(BreathingState),
    Countdown(CountdownState),
    RandomPicker(RandomPickerState),
    /// A module this build has no typed view of. Kept verbatim.
    Unknown(Value),
}

impl TileState {
    /// Interpret the stored value of module `id`.
    ///
    /// Never fails. A value of the wrong overall shape becomes the tile's
    /// default; fields of the wrong type become that field's default.
    pub fn decode(id: &str, value: &Value) -> TileState {
        match id {
            catalog::QUICK_NOTE => Self::QuickNote(match value {
                // Older builds stored the note as a bare string.
                Value::String(draft) => QuickNoteState {
                    draft: draft.clone(),
                    ..QuickNoteState::default()
                },
                other => object(id, other),
            }),
            catalog::CHECKLIST => Self::Checklist(list(id, value)),
            catalog::POMODORO => Self::Pomodoro(object(id, value)),
            catalog::HABIT_STREAK => Self::HabitStreak(object(id, value)),
            catalog::ROUTINE_BUILDER => Self::RoutineBuilder(object(id, value)),
            catalog::LINK_SAVER => Self::LinkSaver(list(id, value)),
            catalog::WATER_TRACKER => Self::WaterTracker(object(id, value)),
            catalog::COUNTER => Self::Counter(number_from_value(value)),
            catalog::STOPWATCH => Self::Stopwatch(object(id, value)),
            catalog::UNIT_CONVERTER => Self::UnitConverter(object(id, value)),
            catalog::EXPENSE_MINI => Self::ExpenseMini(list(id, value)),
            catalog::PASSWORD_GEN => Self::PasswordGen(object(id, value)),
            catalog::MOOD => Self::Mood(object(id, value)),
            catalog::BREATHING => Self::Breathing(object(id, value)),
            catalog::COUNTDOWN => Self::Countdown(object(id, value)),
            catalog::RANDOM_PICKER => Self::RandomPicker(object(id, value)),
            _ => Self::Unknown(value.clone()),
        }
    }

    /// Module id this state belongs to, `None` for [`TileState::Unknown`].
    pub fn module_id(&self) -> Option<&'static str> {
        Some(match self {
            Self::QuickNote(_) => catalog::QUICK_NOTE,
            Self::Checklist(_) => catalog::CHECKLIST,
            Self::Pomodoro(_) => catalog::POMODORO,
            Self::HabitStreak(_) => catalog::HABIT_STREAK,
            Self::RoutineBuilder(_) => catalog::ROUTINE_BUILDER,
            Self::LinkSaver(_) => catalog::LINK_SAVER,
            Self::WaterTracker(_) => catalog::WATER_TRACKER,
            Self::Counter(_) => catalog::COUNTER,
            Self::Stopwatch(_) => catalog::STOPWATCH,
            Self::UnitConverter(_) => catalog::UNIT_CONVERTER,
            Self::ExpenseMini(_) => catalog::EXPENSE_MINI,
            Self::PasswordGen(_) => catalog::PASSWORD_GEN,
            Self::Mood(_) => catalog::MOOD,
            Self::Breathing(_) => catalog::BREATHING,
            Self::Countdown(_) => catalog::COUNTDOWN,
            Self::RandomPicker(_) => catalog::RANDOM_PICKER,
            Self::Unknown(_) => return None,
        })
    }

    /// JSON form suitable for writing back through the store.
    pub fn to_value(&self) -> Value {
        match self {
            Self::QuickNote(s) => to_value(s),
            Self::Checklist(s) => to_value(s),
            Self::Pomodoro(s) => to_value(s),
            Self::HabitStreak(s) => to_value(s),
            Self::RoutineBuilder(s) => to_value(s),
            Self::LinkSaver(s) => to_value(s),
            Self::WaterTracker(s) => to_value(s),
            Self::Counter(n) => serde_json::Number::from_f64(*n)
                .map(|n| match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => Value::from(f as i64),
                    _ => Value::Number(n),
                })
                .unwrap_or(Value::from(0)),
            Self::Stopwatch(s) => to_value(s),
            Self::UnitConverter(s) => to_value(s),
            Self::ExpenseMini(s) => to_value(s),
            Self::PasswordGen(s) => to_value(s),
            Self::Mood(s) => to_value(s),
            Self::Breathing(s) => to_value(s),
            Self::Countdown(s) => to_value(s),
            Self::RandomPicker(s) => to_value(s),
            Self::Unknown(value) => value.clone(),
        }
    }

    /// One-line summary shown under the tile on the home grid.
    pub fn preview(&self) -> String {
        match self {
            Self::QuickNote(s) => note_preview(s),
            Self::Checklist(items) => {
                let done = items.iter().filter(|item| item.done).count();
                format!("{done}/{} done", items.len())
            }
            Self::Pomodoro(s) => (if s.on_break() { "Break" } else { "Focus" }).to_string(),
            Self::HabitStreak(s) => {
                let marks = s.active().map_or(0, |habit| habit.marks.len());
                format!("{marks} marks")
            }
            Self::RoutineBuilder(s) => format!(
                "{} steps • {} min",
                s.effective_steps().len(),
                format_number(s.total_minutes())
            ),
            Self::LinkSaver(links) => format!("{} saved links", links.len()),
            Self::WaterTracker(s) => format!("{} / {} ml", s.ml, s.effective_target()),
            Self::Counter(n) => format_number(*n),
            Self::Stopwatch(s) => format!("{} min", s.seconds.max(0) / 60),
            Self::UnitConverter(s) => {
                let cat = if s.cat.is_empty() { "Length" } else { &s.cat };
                format!("{cat} converter")
            }
            Self::ExpenseMini(txns) => {
                let total: f64 = txns.iter().map(|txn| txn.amount).sum();
                format!("{total:.2}")
            }
            Self::PasswordGen(s) => {
                let length = if s.opt.length > 0 {
                    s.opt.length
                } else {
                    crate::states::PasswordOptions::DEFAULT_LENGTH
                };
                format!("{length} chars")
            }
            Self::Mood(s) => match s.today.as_deref() {
                Some(today) if !today.is_empty() => format!("Today: {today}"),
                _ => "How do you feel today?".to_string(),
            },
            Self::Breathing(s) => {
                let pattern = if s.mode == "box" { "Box 4-4-4" } else { "4-7-8" };
                format!("{pattern} • {} cycles", s.cycles)
            }
            Self::Countdown(s) => (if s.has_target() {
                "Countdown set"
            } else {
                "Set a target"
            })
            .to_string(),
            Self::RandomPicker(s) => match s.last.as_deref() {
                Some(last) if !last.is_empty() => format!("Last: {last}"),
                _ => "Add choices".to_string(),
            },
            Self::Unknown(_) => String::new(),
        }
    }
}

/// Preview line for the stored value of module `id`.
pub fn preview(id: &str, value: &Value) -> String {
    TileState::decode(id, value).preview()
}

fn note_preview(state: &QuickNoteState) -> String {
    let text = if !state.draft.is_empty() {
        state.draft.as_str()
    } else {
        state.notes.first().map_or("", |note| note.text.as_str())
    };
    if text.is_empty() {
        return "Write a quick note…".to_string();
    }
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(NOTE_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

fn object<T: DeserializeOwned + Default>(id: &str, value: &Value) -> T {
    if !value.is_object() {
        if !value.is_null() {
            tracing::debug!(module = id, "Stored state is not an object, using tile default");
        }
        return T::default();
    }
    serde_json::from_value(value.clone()).unwrap_or_else(|e| {
        tracing::debug!(module = id, error = %e, "Unreadable tile state, using tile default");
        T::default()
    })
}

fn list<T: DeserializeOwned>(id: &str, value: &Value) -> Vec<T> {
    if !value.is_array() && !value.is_null() {
        tracing::debug!(module = id, "Stored state is not a list, using empty list");
    }
    list_from_value(value.clone())
}

fn to_value<T: Serialize>(state: &T) -> Value {
    serde_json::to_value(state).unwrap_or(Value::Null)
}
