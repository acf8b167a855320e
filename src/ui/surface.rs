use crate::ui::rows::{Row, RowKey};

/// What the controller needs from whatever draws the rows.
pub trait RenderSurface {
    fn render_all(&mut self, rows: Vec<Row>);

    /// Appends a row at the end of the table.
    fn insert(&mut self, row: Row);

    /// Swaps the row with `key` for `row`, keeping its position.
    fn replace(&mut self, key: RowKey, row: Row) -> bool;

    fn remove(&mut self, key: RowKey) -> bool;
}

/// Ordered row descriptors: the view model a concrete surface draws from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowProjection {
    rows: Vec<Row>,
}

impl RowProjection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn position(&self, key: RowKey) -> Option<usize> {
        self.rows.iter().position(|row| row.key == key)
    }

    pub fn find(&self, key: RowKey) -> Option<&Row> {
        self.rows.iter().find(|row| row.key == key)
    }

    pub fn keys(&self) -> Vec<RowKey> {
        self.rows.iter().map(|row| row.key).collect()
    }
}

impl RenderSurface for RowProjection {
    fn render_all(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    fn insert(&mut self, row: Row) {
        match self.position(row.key) {
            Some(index) => self.rows[index] = row,
            None => self.rows.push(row),
        }
    }

    fn replace(&mut self, key: RowKey, row: Row) -> bool {
        match self.position(key) {
            Some(index) => {
                self.rows[index] = row;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, key: RowKey) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.key != key);
        self.rows.len() != before
    }
}
