use std::collections::HashMap;

use serde_json::{Map, Value};

/// In-memory table: ordered named columns over row-major cells. Cells are raw
/// JSON values, `Value::Null` marks a missing or nulled-out cell. This is the
/// only artifact the endpoint wrappers hand back to callers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Zero rows, zero columns.
    pub fn empty() -> Self {
        Table::default()
    }

    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Table { columns, rows }
    }

    /// Flatten a sequence of JSON objects into one table, nested objects
    /// becoming dot-separated column paths (`asset.id`). Arrays stay opaque.
    /// Column order is first-seen across rows; keys absent in a row are Null.
    pub fn normalize(records: &[Value]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut flats: Vec<Vec<(String, Value)>> = Vec::new();

        for record in records {
            let mut flat = Vec::new();
            if let Value::Object(map) = record {
                flatten_object("", map, &mut flat);
            }
            for (key, _) in &flat {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
            flats.push(flat);
        }

        let rows = flats
            .into_iter()
            .map(|flat| {
                let mut row = vec![Value::Null; columns.len()];
                for (key, value) in flat {
                    let i = columns.iter().position(|c| c == &key).unwrap();
                    row[i] = value;
                }
                row
            })
            .collect();

        Table { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row count.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let i = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[i])
    }

    pub fn column_values(&self, name: &str) -> Option<Vec<&Value>> {
        let i = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[i]).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    pub fn rename_column(&mut self, from: &str, to: &str) {
        if let Some(i) = self.column_index(from) {
            self.columns[i] = to.to_string();
        }
    }

    /// Drop the named columns; names that are not present are ignored.
    pub fn drop_columns(&mut self, names: &[&str]) {
        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|&i| !names.contains(&self.columns[i].as_str()))
            .collect();
        if keep.len() == self.columns.len() {
            return;
        }
        self.columns = keep.iter().map(|&i| self.columns[i].clone()).collect();
        self.rows = self
            .rows
            .iter()
            .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
            .collect();
    }

    /// Rewrite every cell of one column in place.
    pub fn map_column<F: Fn(&Value) -> Value>(&mut self, name: &str, f: F) {
        if let Some(i) = self.column_index(name) {
            for row in &mut self.rows {
                row[i] = f(&row[i]);
            }
        }
    }

    /// Append a column; `values` must have one entry per row.
    pub fn add_column(&mut self, name: &str, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns.push(name.to_string());
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.push(values.next().unwrap_or(Value::Null));
        }
    }

    /// Full outer join on a single shared key column. Key values are compared
    /// by canonical string form because Steam spells the same id as a JSON
    /// string in one collection and a number in another. The left side drives
    /// row order; unmatched right rows are appended with the left columns
    /// nulled except the key. Non-key column names are assumed disjoint.
    pub fn outer_join(&self, right: &Table, key: &str) -> Table {
        let left_key = self.column_index(key);
        let right_key = right.column_index(key);

        let right_cols: Vec<usize> = (0..right.columns.len())
            .filter(|&i| Some(i) != right_key)
            .collect();
        let mut columns = self.columns.clone();
        columns.extend(right_cols.iter().map(|&i| right.columns[i].clone()));

        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        if let Some(rk) = right_key {
            for (i, row) in right.rows.iter().enumerate() {
                if let Some(k) = join_key(&row[rk]) {
                    index.entry(k).or_default().push(i);
                }
            }
        }

        let mut rows = Vec::new();
        let mut right_matched = vec![false; right.rows.len()];

        for lrow in &self.rows {
            let matches = left_key
                .and_then(|lk| join_key(&lrow[lk]))
                .and_then(|k| index.get(&k).cloned())
                .unwrap_or_default();
            if matches.is_empty() {
                let mut row = lrow.clone();
                row.extend(right_cols.iter().map(|_| Value::Null));
                rows.push(row);
            } else {
                for ri in matches {
                    right_matched[ri] = true;
                    let mut row = lrow.clone();
                    row.extend(right_cols.iter().map(|&c| right.rows[ri][c].clone()));
                    rows.push(row);
                }
            }
        }

        for (ri, rrow) in right.rows.iter().enumerate() {
            if right_matched[ri] {
                continue;
            }
            let mut row = vec![Value::Null; self.columns.len()];
            if let (Some(lk), Some(rk)) = (left_key, right_key) {
                row[lk] = rrow[rk].clone();
            }
            row.extend(right_cols.iter().map(|&c| rrow[c].clone()));
            rows.push(row);
        }

        Table { columns, rows }
    }

    /// Vertical concatenation preserving input order. The column set is the
    /// union in first-seen order; cells absent from a part become Null.
    pub fn concat<I: IntoIterator<Item = Table>>(tables: I) -> Table {
        let parts: Vec<Table> = tables.into_iter().collect();

        let mut columns: Vec<String> = Vec::new();
        for part in &parts {
            for column in &part.columns {
                if !columns.iter().any(|c| c == column) {
                    columns.push(column.clone());
                }
            }
        }

        let mut rows = Vec::new();
        for part in &parts {
            let positions: Vec<usize> = part
                .columns
                .iter()
                .map(|c| columns.iter().position(|u| u == c).unwrap())
                .collect();
            for row in &part.rows {
                let mut out = vec![Value::Null; columns.len()];
                for (j, value) in row.iter().enumerate() {
                    out[positions[j]] = value.clone();
                }
                rows.push(out);
            }
        }

        Table { columns, rows }
    }

    /// Presentation reorder: the listed columns (those present) lead in the
    /// given order, the rest keep their prior relative order.
    pub fn set_leading_columns(&mut self, leading: &[&str]) {
        let mut order: Vec<usize> = leading
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect();
        for i in 0..self.columns.len() {
            if !order.contains(&i) {
                order.push(i);
            }
        }
        self.columns = order.iter().map(|&i| self.columns[i].clone()).collect();
        self.rows = self
            .rows
            .iter()
            .map(|row| order.iter().map(|&i| row[i].clone()).collect())
            .collect();
    }

    /// Null out the target columns on every row whose predicate column equals
    /// the given value. Targets that are not present are ignored.
    pub fn null_where_eq(&mut self, predicate_column: &str, predicate_value: &Value, targets: &[&str]) {
        let pi = match self.column_index(predicate_column) {
            Some(i) => i,
            None => return,
        };
        let targets: Vec<usize> = targets.iter().filter_map(|t| self.column_index(t)).collect();
        for row in &mut self.rows {
            if row[pi] == *predicate_value {
                for &t in &targets {
                    row[t] = Value::Null;
                }
            }
        }
    }
}

fn flatten_object(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) => flatten_object(&path, inner, out),
            other => out.push((path, other.clone())),
        }
    }
}

/// Canonical string form of a join key; non-scalar keys never match.
fn join_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
