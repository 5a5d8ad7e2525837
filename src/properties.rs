//! Property rows of the add-category page. Local state only; the rows are
//! read once, in order, when the category is submitted.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRow {
    pub id: RowId,
    pub label: String,
}

#[derive(Debug, Clone, Default)]
pub struct PropertyList {
    rows: Vec<PropertyRow>,
    next_id: u64,
}

impl PropertyList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>) -> RowId {
        let id = RowId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.rows.push(PropertyRow {
            id,
            label: label.into(),
        });
        id
    }

    /// Removes one row. Returns false when the row was already gone.
    pub fn remove(&mut self, id: RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() != before
    }

    pub fn rows(&self) -> &[PropertyRow] {
        &self.rows
    }

    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.label.clone()).collect()
    }
}
