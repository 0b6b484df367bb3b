use crate::error::{DrillError, Result};
use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

static CATALOG_DIR: Dir = include_dir!("src/catalog/data");

/// Order categories appear in the lesson browser.
pub const CATEGORY_ORDER: [&str; 5] = [
    "multiplication",
    "division",
    "squares",
    "mental_math",
    "number_sense",
];

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub lessons: Vec<Lesson>,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub content: Vec<ContentBlock>,
    pub practice: Vec<PracticeItem>,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PracticeItem {
    pub question: String,
    pub answer: i64,
    #[serde(default)]
    pub hint: Option<String>,
}

/// One block of a lesson's "Learn" page.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    Explanation {
        text: String,
    },
    Example {
        #[serde(default)]
        before: Option<String>,
        expression: String,
        #[serde(default)]
        after: Option<String>,
        #[serde(default)]
        result: Option<String>,
        #[serde(default)]
        note: Option<String>,
    },
    Visual {
        layout: VisualLayout,
        emoji: String,
    },
    Tip {
        text: String,
    },
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum VisualLayout {
    /// `groups` bunches of `items_per_group`.
    Groups { groups: u32, items_per_group: u32 },
    Grid { rows: u32, cols: u32 },
    Square { size: u32 },
    /// `total` items dealt evenly into `groups`.
    Division { total: u32, groups: u32 },
}

impl VisualLayout {
    /// Lines of emoji that draw this picture in a terminal.
    pub fn rows(&self, emoji: &str) -> Vec<String> {
        let line = |n: u32| vec![emoji; n as usize].join(" ");
        match *self {
            VisualLayout::Groups { groups: 0, .. } => vec!["Zero groups = nothing!".to_string()],
            VisualLayout::Groups {
                groups,
                items_per_group,
            } => (0..groups).map(|_| line(items_per_group)).collect(),
            VisualLayout::Grid { rows, cols } => (0..rows).map(|_| line(cols)).collect(),
            VisualLayout::Square { size } => (0..size).map(|_| line(size)).collect(),
            VisualLayout::Division { groups: 0, .. } => {
                vec!["Nothing to share between zero groups".to_string()]
            }
            VisualLayout::Division { total, groups } => (0..groups)
                .map(|g| format!("Group {}: {}", g + 1, line(total / groups)))
                .collect(),
        }
    }

    /// Arithmetic shown under the picture, if any.
    pub fn caption(&self) -> Option<String> {
        match *self {
            VisualLayout::Grid { rows, cols } => {
                Some(format!("{rows} rows × {cols} columns = {}", rows * cols))
            }
            VisualLayout::Square { size } => Some(format!("{size} × {size} = {}", size * size)),
            VisualLayout::Groups { .. } | VisualLayout::Division { .. } => None,
        }
    }
}

/// All categories shipped with the binary, in browser order.
#[derive(Clone, Debug)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn builtin() -> Result<Self> {
        let categories = CATEGORY_ORDER
            .iter()
            .map(|id| read_category_from_file(format!("{id}.json")))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { categories })
    }

    pub fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub fn lesson(&self, id: &str) -> Result<&Lesson> {
        self.categories
            .iter()
            .flat_map(|c| c.lessons.iter())
            .find(|l| l.id == id)
            .ok_or_else(|| DrillError::UnknownLesson(id.to_string()))
    }

    /// Category index and lesson index of a lesson id, for the browser.
    pub fn position(&self, id: &str) -> Option<(usize, usize)> {
        self.categories.iter().enumerate().find_map(|(ci, c)| {
            c.lessons
                .iter()
                .position(|l| l.id == id)
                .map(|li| (ci, li))
        })
    }

    pub fn lesson_count(&self) -> usize {
        self.categories.iter().map(|c| c.lessons.len()).sum()
    }
}

fn read_category_from_file(file_name: String) -> Result<Category> {
    let file = CATALOG_DIR
        .get_file(&file_name)
        .ok_or_else(|| DrillError::Catalog(format!("{file_name} is missing")))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| DrillError::Catalog(format!("{file_name} is not UTF-8")))?;

    from_str(file_as_str).map_err(|e| DrillError::Catalog(format!("{file_name}: {e}")))
}
