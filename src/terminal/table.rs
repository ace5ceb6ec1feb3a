//! Plain-text table rendering
//!
//! Two layouts: cells aligned on tab stops, or a grid with `|` separators
//! and a dashed rule under every row.

/// Column alignment granularity of the tabbed layout
pub const TAB_WIDTH: usize = 8;

/// Extra columns each bordered cell gets beyond the widest value
pub const BORDER_MARGIN: usize = 2;

/// How a table is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    Tabbed,
    Bordered,
}

impl TableStyle {
    pub fn from_bordered(bordered: bool) -> Self {
        if bordered {
            TableStyle::Bordered
        } else {
            TableStyle::Tabbed
        }
    }
}

/// Rows of string cells
#[derive(Debug, Clone, Default)]
pub struct TextTable {
    rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest cell per column over the current rows. Short rows count as empty cells.
    pub fn column_widths(&self) -> Vec<usize> {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        (0..columns)
            .map(|i| {
                self.rows
                    .iter()
                    .map(|row| row.get(i).map_or(0, |cell| display_len(cell)))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    pub fn render(&self, style: TableStyle) -> String {
        match style {
            TableStyle::Tabbed => self.render_tabbed(),
            TableStyle::Bordered => self.render_bordered(),
        }
    }

    fn render_tabbed(&self) -> String {
        let widths = self.column_widths();
        let mut output = String::new();

        for row in &self.rows {
            for (cell, width) in row.iter().zip(&widths) {
                // Next tab stop strictly beyond the column's widest value
                let stop = width + TAB_WIDTH - width % TAB_WIDTH;
                let tabs = (stop - display_len(cell) - 1) / TAB_WIDTH + 1;
                output.push_str(cell);
                output.push_str(&"\t".repeat(tabs));
            }
            output.push('\n');
        }

        output
    }

    fn render_bordered(&self) -> String {
        let widths = self.column_widths();
        let rule_len: usize = widths.iter().map(|w| w + BORDER_MARGIN).sum();
        let rule = "-".repeat(rule_len);
        let mut output = String::new();

        for row in &self.rows {
            for (i, width) in widths.iter().enumerate() {
                let cell = row.get(i).map_or("", String::as_str);
                let padded = width + BORDER_MARGIN - 1;
                output.push_str(cell);
                output.push_str(&" ".repeat(padded - display_len(cell)));
                output.push('|');
            }
            output.push('\n');
            output.push_str(&rule);
            output.push('\n');
        }

        output
    }
}

fn display_len(cell: &str) -> usize {
    cell.chars().count()
}
