//! Typed state of each built-in tile.
//!
//! Every field is optional on the wire. Missing fields take the struct's
//! default; fields of the wrong type take the field type's default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lenient;

// ============================================================================
// Notes and lists
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Note {
    #[serde(deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(deserialize_with = "lenient::value")]
    pub text: String,
    #[serde(deserialize_with = "lenient::value")]
    pub pinned: bool,
    /// ISO 8601 timestamp.
    #[serde(deserialize_with = "lenient::value")]
    pub created_at: String,
    #[serde(
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickNoteState {
    #[serde(deserialize_with = "lenient::list")]
    pub notes: Vec<Note>,
    #[serde(deserialize_with = "lenient::value")]
    pub draft: String,
    #[serde(deserialize_with = "lenient::value")]
    pub search: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistItem {
    #[serde(deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(deserialize_with = "lenient::value")]
    pub text: String,
    #[serde(deserialize_with = "lenient::value")]
    pub done: bool,
    #[serde(
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub cat: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkItem {
    #[serde(deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(deserialize_with = "lenient::value")]
    pub url: String,
    #[serde(
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::value")]
    pub fav: bool,
    #[serde(deserialize_with = "lenient::list")]
    pub tags: Vec<String>,
    #[serde(
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<i64>,
}

/// One expense entry. Amounts may have been stored as numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Txn {
    #[serde(deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(deserialize_with = "lenient::value")]
    pub name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub amount: f64,
    #[serde(deserialize_with = "lenient::value")]
    pub cat: String,
    #[serde(deserialize_with = "lenient::value")]
    pub date: String,
}

// ============================================================================
// Timers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroState {
    #[serde(deserialize_with = "lenient::integer")]
    pub seconds: i64,
    #[serde(deserialize_with = "lenient::value")]
    pub running: bool,
    #[serde(deserialize_with = "lenient::value")]
    pub mode: String,
    #[serde(deserialize_with = "lenient::value")]
    pub preset: String,
    #[serde(deserialize_with = "lenient::value")]
    pub durations: BTreeMap<String, i64>,
    #[serde(deserialize_with = "lenient::integer")]
    pub cycles: i64,
}

impl Default for PomodoroState {
    fn default() -> Self {
        Self {
            seconds: 1500,
            running: false,
            mode: "focus".to_string(),
            preset: "25/5".to_string(),
            durations: BTreeMap::from([("focus".to_string(), 1500), ("break".to_string(), 300)]),
            cycles: 0,
        }
    }
}

impl PomodoroState {
    /// Any mode other than focus counts as a break, including the short/long
    /// variants written by newer builds.
    pub fn on_break(&self) -> bool {
        matches!(self.mode.as_str(), "break" | "short" | "long")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwatchState {
    #[serde(deserialize_with = "lenient::integer")]
    pub seconds: i64,
    #[serde(deserialize_with = "lenient::value")]
    pub running: bool,
    #[serde(deserialize_with = "lenient::list")]
    pub laps: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathingState {
    #[serde(deserialize_with = "lenient::value")]
    pub running: bool,
    #[serde(deserialize_with = "lenient::value")]
    pub phase: String,
    #[serde(deserialize_with = "lenient::integer")]
    pub seconds: i64,
    /// `box` (4-4-4) or `478`.
    #[serde(deserialize_with = "lenient::value")]
    pub mode: String,
    #[serde(deserialize_with = "lenient::integer")]
    pub cycles: i64,
    #[serde(
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub target: Option<i64>,
    #[serde(deserialize_with = "lenient::value")]
    pub completed: bool,
}

impl Default for BreathingState {
    fn default() -> Self {
        Self {
            running: false,
            phase: "inhale".to_string(),
            seconds: 4,
            mode: "box".to_string(),
            cycles: 0,
            target: None,
            completed: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownItem {
    #[serde(deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(deserialize_with = "lenient::value")]
    pub title: String,
    #[serde(deserialize_with = "lenient::value")]
    pub iso: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownState {
    #[serde(deserialize_with = "lenient::value")]
    pub title: String,
    #[serde(deserialize_with = "lenient::value")]
    pub iso: String,
    #[serde(deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<CountdownItem>,
}

impl Default for CountdownState {
    fn default() -> Self {
        Self {
            title: "My deadline".to_string(),
            iso: String::new(),
            items: Vec::new(),
        }
    }
}

impl CountdownState {
    /// Whether a target date has been chosen, either directly or on any item.
    pub fn has_target(&self) -> bool {
        !self.iso.is_empty() || self.items.iter().any(|item| !item.iso.is_empty())
    }
}

// ============================================================================
// Habits and routines
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Habit {
    #[serde(deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(deserialize_with = "lenient::value")]
    pub name: String,
    /// Marked days as `YYYY-MM-DD`.
    #[serde(deserialize_with = "lenient::list")]
    pub marks: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HabitStreakState {
    #[serde(
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub active_id: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub habits: Vec<Habit>,
}

impl HabitStreakState {
    /// The habit selected by `activeId`, if it still exists.
    pub fn active(&self) -> Option<&Habit> {
        let active = self.active_id.as_deref()?;
        self.habits.iter().find(|habit| habit.id == active)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutineStep {
    #[serde(deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(deserialize_with = "lenient::value")]
    pub title: String,
    #[serde(deserialize_with = "lenient::number")]
    pub minutes: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutineRun {
    #[serde(deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(deserialize_with = "lenient::value")]
    pub at: String,
    #[serde(deserialize_with = "lenient::number")]
    pub total_minutes: f64,
}

/// A saved routine in the older multi-routine shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Routine {
    #[serde(deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(deserialize_with = "lenient::value")]
    pub name: String,
    #[serde(deserialize_with = "lenient::list")]
    pub steps: Vec<RoutineStep>,
}

/// Current single-routine shape, plus the legacy `{bank, activeId}` fields
/// that older builds persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoutineBuilderState {
    #[serde(deserialize_with = "lenient::value")]
    pub name: String,
    #[serde(deserialize_with = "lenient::list")]
    pub steps: Vec<RoutineStep>,
    #[serde(deserialize_with = "lenient::list")]
    pub history: Vec<RoutineRun>,
    #[serde(deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub bank: Vec<Routine>,
    #[serde(
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub active_id: Option<String>,
}

impl Default for RoutineBuilderState {
    fn default() -> Self {
        Self {
            name: "My Routine".to_string(),
            steps: Vec::new(),
            history: Vec::new(),
            bank: Vec::new(),
            active_id: None,
        }
    }
}

impl RoutineBuilderState {
    /// Steps of the routine being shown: the current steps, or in the legacy
    /// shape the active (else first) routine of the bank.
    pub fn effective_steps(&self) -> &[RoutineStep] {
        if !self.steps.is_empty() || self.bank.is_empty() {
            return &self.steps;
        }
        let active = self
            .active_id
            .as_deref()
            .and_then(|id| self.bank.iter().find(|routine| routine.id == id));
        active
            .or_else(|| self.bank.first())
            .map(|routine| routine.steps.as_slice())
            .unwrap_or_default()
    }

    pub fn total_minutes(&self) -> f64 {
        self.effective_steps().iter().map(|step| step.minutes).sum()
    }
}

// ============================================================================
// Trackers and tools
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterState {
    #[serde(deserialize_with = "lenient::value")]
    pub date: String,
    #[serde(deserialize_with = "lenient::integer")]
    pub ml: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub target: i64,
}

impl Default for WaterState {
    fn default() -> Self {
        Self {
            date: String::new(),
            ml: 0,
            target: WaterState::DEFAULT_TARGET_ML,
        }
    }
}

impl WaterState {
    pub const DEFAULT_TARGET_ML: i64 = 2000;

    /// Target in ml, with a zero or negative target read as the default.
    pub fn effective_target(&self) -> i64 {
        if self.target > 0 {
            self.target
        } else {
            Self::DEFAULT_TARGET_ML
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConverterState {
    #[serde(deserialize_with = "lenient::value")]
    pub cat: String,
    #[serde(deserialize_with = "lenient::value")]
    pub from: String,
    #[serde(deserialize_with = "lenient::value")]
    pub to: String,
    #[serde(deserialize_with = "lenient::value")]
    pub value: String,
}

impl Default for UnitConverterState {
    fn default() -> Self {
        Self {
            cat: "Length".to_string(),
            from: "m".to_string(),
            to: "km".to_string(),
            value: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PasswordOptions {
    #[serde(deserialize_with = "lenient::integer")]
    pub length: i64,
    #[serde(deserialize_with = "lenient::value")]
    pub upper: bool,
    #[serde(deserialize_with = "lenient::value")]
    pub lower: bool,
    #[serde(deserialize_with = "lenient::value")]
    pub digits: bool,
    #[serde(deserialize_with = "lenient::value")]
    pub symbols: bool,
    #[serde(deserialize_with = "lenient::value")]
    pub exclude_similar: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: PasswordOptions::DEFAULT_LENGTH,
            upper: true,
            lower: true,
            digits: true,
            symbols: false,
            exclude_similar: false,
        }
    }
}

impl PasswordOptions {
    pub const DEFAULT_LENGTH: i64 = 12;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordGenState {
    #[serde(deserialize_with = "lenient::value")]
    pub value: String,
    #[serde(deserialize_with = "lenient::value")]
    pub opt: PasswordOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodEntry {
    #[serde(deserialize_with = "lenient::value")]
    pub date: String,
    #[serde(
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub mood: Option<String>,
    #[serde(
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodState {
    #[serde(
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub today: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub history: Vec<MoodEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomPickerState {
    #[serde(deserialize_with = "lenient::value")]
    pub input: String,
    #[serde(
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub last: Option<String>,
}

impl RandomPickerState {
    /// Non-empty choices, one per line or comma-separated.
    pub fn choices(&self) -> Vec<&str> {
        self.input
            .split(['\n', ','])
            .map(str::trim)
            .filter(|choice| !choice.is_empty())
            .collect()
    }
}
