//! Relation shapes: the typed columns of a computed result being written.

use inkwell_db_schema::{Column, LogicalType};

use crate::{Error, Result};

/// One column of a relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationColumn {
    pub name: String,
    pub logical_type: LogicalType,
}

/// The ordered (name, logical type) columns of a relation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationShape {
    columns: Vec<RelationColumn>,
}

impl RelationShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    pub fn column(mut self, name: impl Into<String>, logical_type: LogicalType) -> Self {
        self.columns.push(RelationColumn {
            name: name.into(),
            logical_type,
        });
        self
    }

    pub fn columns(&self) -> &[RelationColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Map every column to a nullable storage column, in order.
    ///
    /// Fails on the first column whose type has no storage representation,
    /// and on an empty shape. A name that repeats keeps its first
    /// occurrence.
    pub fn to_storage_columns(&self) -> Result<Vec<Column>> {
        if self.columns.is_empty() {
            return Err(Error::EmptyRelation);
        }

        let mut out: Vec<Column> = Vec::with_capacity(self.columns.len());
        for col in &self.columns {
            let data_type =
                col.logical_type
                    .to_storage_type()
                    .map_err(|source| Error::UnsupportedType {
                        column: col.name.clone(),
                        source,
                    })?;
            if out.iter().any(|c| c.name == col.name) {
                continue;
            }
            out.push(Column::nullable(col.name.as_str(), data_type));
        }
        Ok(out)
    }
}

impl<S: Into<String>> FromIterator<(S, LogicalType)> for RelationShape {
    fn from_iter<I: IntoIterator<Item = (S, LogicalType)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |shape, (name, ty)| shape.column(name, ty))
    }
}
