use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
    pub align: Align,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, min_width: usize) -> Self {
        Self {
            header: header.into(),
            min_width,
            align: Align::Left,
        }
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }
}

/// Simple table model used for rendering read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<T: Into<String>>(title: Option<T>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(|value| value.into()),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows
            .push(cells.into_iter().map(|value| value.into()).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Renders [`Table`] instances as padded columns. Widths grow to fit the widest cell.
pub struct TableRenderer;

impl TableRenderer {
    pub fn render(table: &Table, plain: bool) -> String {
        let widths: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                table
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain([column.header.chars().count(), column.min_width])
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let total_width = widths.iter().map(|width| width + 2).sum::<usize>().max(1);

        let mut lines = Vec::new();
        if let Some(title) = &table.title {
            lines.push(if plain {
                title.clone()
            } else {
                title.bold().to_string()
            });
        }

        let header = Self::line(
            table.columns.iter().map(|col| col.header.as_str()),
            &table.columns,
            &widths,
        );
        lines.push(if plain {
            header
        } else {
            header.bold().to_string()
        });
        lines.push(if plain { "-" } else { "─" }.repeat(total_width));

        for row in &table.rows {
            let cells = (0..table.columns.len()).map(|idx| row.get(idx).map(String::as_str).unwrap_or(""));
            lines.push(Self::line(cells, &table.columns, &widths));
        }
        lines.join("\n")
    }

    fn line<'a>(
        cells: impl Iterator<Item = &'a str>,
        columns: &[TableColumn],
        widths: &[usize],
    ) -> String {
        let rendered: Vec<String> = cells
            .zip(columns.iter().zip(widths))
            .map(|(cell, (column, width))| {
                let pad = width.saturating_sub(cell.chars().count());
                match column.align {
                    Align::Left => format!("{cell}{}", " ".repeat(pad)),
                    Align::Right => format!("{}{cell}", " ".repeat(pad)),
                }
            })
            .collect();
        rendered.join("  ").trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_grow_to_fit_cells_and_align() {
        let mut table = Table::new(
            Some("Expenses"),
            vec![TableColumn::new("Id", 2), TableColumn::new("Amount", 4).right()],
        );
        table.add_row(vec!["1", "₹12.50"]);
        table.add_row(vec!["1000", "₹1.00"]);

        let rendered = TableRenderer::render(&table, true);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "Expenses");
        assert_eq!(lines[1], "Id    Amount");
        assert_eq!(lines[3], "1     ₹12.50");
        assert_eq!(lines[4], "1000   ₹1.00");
    }
}
