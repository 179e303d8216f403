//! Level definitions.

use serde::{Deserialize, Serialize};

use crate::identifiers::{InventoryKind, ItemName, LevelIndex};
use crate::inventory::{InventoryInfo, LevelInventory};

/// Hint text as authored. The template and its arguments are stored and
/// forwarded to the front end untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintMessage {
    pub template: String,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

impl HintMessage {
    /// Create a message with no arguments.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            args: Vec::new(),
        }
    }

    /// Append a template argument.
    pub fn with_arg(mut self, arg: serde_json::Value) -> Self {
        self.args.push(arg);
        self
    }
}

/// A hint shown when the player's goal state matches `goal_pattern`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hint {
    /// Abstract goal state the hint is bound to.
    pub goal_pattern: String,
    pub message: HintMessage,
    /// Only shown on request.
    pub hidden: bool,
    /// Only shown on an exact match of the goal state.
    pub strict: bool,
}

impl Hint {
    /// Create a hint shown on a loose match of the goal.
    pub fn new(goal_pattern: impl Into<String>, message: HintMessage) -> Self {
        Self {
            goal_pattern: goal_pattern.into(),
            message,
            hidden: false,
            strict: false,
        }
    }

    /// Only show the hint when the player asks for it.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Only show the hint on an exact goal match.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

/// One exercise of a world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLevel {
    pub index: LevelIndex,
    pub title: String,
    pub introduction: String,
    pub conclusion: String,
    /// Short text shown above the goal.
    pub description: String,
    /// The formal statement the player has to prove.
    pub goal: String,
    /// Name under which the proven statement is available as a lemma in
    /// later levels.
    pub statement_name: Option<ItemName>,
    pub hints: Vec<Hint>,
    pub inventory: LevelInventory,
    pub image: Option<String>,
}

impl GameLevel {
    /// Create an empty level at `index`.
    pub fn new(index: LevelIndex) -> Self {
        Self {
            index,
            title: String::new(),
            introduction: String::new(),
            conclusion: String::new(),
            description: String::new(),
            goal: String::new(),
            statement_name: None,
            hints: Vec::new(),
            inventory: LevelInventory::default(),
            image: None,
        }
    }

    /// Set the level title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the text shown before the exercise.
    pub fn with_introduction(mut self, text: impl Into<String>) -> Self {
        self.introduction = text.into();
        self
    }

    /// Set the text shown after the exercise is solved.
    pub fn with_conclusion(mut self, text: impl Into<String>) -> Self {
        self.conclusion = text.into();
        self
    }

    /// Set the text shown above the goal.
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Set the statement to prove.
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
    }

    /// Name the proven statement so later levels can use it as a lemma.
    pub fn with_statement_name(mut self, name: impl Into<ItemName>) -> Self {
        self.statement_name = Some(name.into());
        self
    }

    /// Add a hint.
    pub fn with_hint(mut self, hint: Hint) -> Self {
        self.hints.push(hint);
        self
    }

    /// Replace the inventory deltas of one kind.
    pub fn with_inventory(mut self, kind: InventoryKind, info: InventoryInfo) -> Self {
        *self.inventory.get_mut(kind) = info;
        self
    }

    /// Inventory deltas of one kind.
    pub fn inventory(&self, kind: InventoryKind) -> &InventoryInfo {
        self.inventory.get(kind)
    }

    /// Hints visible without the player asking for them.
    pub fn visible_hints(&self) -> impl Iterator<Item = &Hint> {
        self.hints.iter().filter(|h| !h.hidden)
    }
}
