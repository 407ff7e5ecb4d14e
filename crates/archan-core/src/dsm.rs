//! Matrix data model: DSM, DMM and MDM.
//!
//! A [`DesignStructureMatrix`] is a square matrix of dependency counts
//! between the entities of one domain (usually modules). Row `i`, column
//! `j` holds the number of dependencies from entity `i` to entity `j`.
//!
//! A [`DomainMappingMatrix`] maps the entities of one domain onto the
//! entities of another, and a [`MultipleDomainMatrix`] stitches several
//! domains together: DSMs on the diagonal, DMMs everywhere else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Architectural category of a DSM entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Framework code (standard library, web framework, ...).
    Framework,
    /// Third-party core libraries.
    CoreLib,
    /// Libraries written for the application.
    AppLib,
    /// Application modules.
    AppModule,
    /// Broker mediating access between application modules.
    Broker,
    /// Data modules.
    Data,
}

impl Category {
    /// All categories, in the order they are usually layered.
    pub const ALL: [Self; 6] = [
        Self::Framework,
        Self::CoreLib,
        Self::AppLib,
        Self::AppModule,
        Self::Broker,
        Self::Data,
    ];

    /// Returns the snake_case name of this category.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Framework => "framework",
            Self::CoreLib => "core_lib",
            Self::AppLib => "app_lib",
            Self::AppModule => "app_module",
            Self::Broker => "broker",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DsmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| DsmError::UnknownCategory(s.to_string()))
    }
}

/// Errors raised when building a matrix with inconsistent dimensions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DsmError {
    /// Matrix row `row` does not have the expected number of columns.
    #[error("row {row} has {actual} column(s), expected {expected}")]
    RowLength {
        /// Index of the offending row.
        row: usize,
        /// Expected number of columns.
        expected: usize,
        /// Actual number of columns.
        actual: usize,
    },

    /// Number of rows does not match the number of row entities.
    #[error("matrix has {rows} row(s) but {entities} entities")]
    EntityCount {
        /// Number of data rows.
        rows: usize,
        /// Number of entities.
        entities: usize,
    },

    /// Number of categories does not match the number of entities.
    #[error("{categories} categories given for {entities} entities")]
    CategoryCount {
        /// Number of categories.
        categories: usize,
        /// Number of entities.
        entities: usize,
    },

    /// A category name could not be parsed.
    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// Multiple domain matrix is not a square grid.
    #[error("multiple domain matrix row {row} has {actual} cell(s), expected {expected}")]
    GridShape {
        /// Index of the offending grid row.
        row: usize,
        /// Expected number of cells.
        expected: usize,
        /// Actual number of cells.
        actual: usize,
    },

    /// A multiple domain matrix cell holds the wrong kind of matrix.
    #[error("multiple domain matrix cell {row}:{column} must be a {expected}")]
    CellKind {
        /// Grid row.
        row: usize,
        /// Grid column.
        column: usize,
        /// Expected matrix kind.
        expected: &'static str,
    },

    /// A domain mapping matrix does not line up with its diagonal domains.
    #[error("multiple domain matrix cell {row}:{column} is {rows}x{columns}, expected {expected_rows}x{expected_columns}")]
    CellSize {
        /// Grid row.
        row: usize,
        /// Grid column.
        column: usize,
        /// Rows in the cell.
        rows: usize,
        /// Columns in the cell.
        columns: usize,
        /// Rows expected from the diagonal DSM of this grid row.
        expected_rows: usize,
        /// Columns expected from the diagonal DSM of this grid column.
        expected_columns: usize,
    },
}

fn check_rows(data: &[Vec<u32>], columns: usize) -> Result<(), DsmError> {
    for (row, values) in data.iter().enumerate() {
        if values.len() != columns {
            return Err(DsmError::RowLength {
                row,
                expected: columns,
                actual: values.len(),
            });
        }
    }
    Ok(())
}

#[derive(Deserialize)]
struct RawDsm {
    entities: Vec<String>,
    #[serde(default)]
    categories: Option<Vec<Category>>,
    data: Vec<Vec<u32>>,
}

/// Square matrix of dependency counts between the entities of one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDsm")]
pub struct DesignStructureMatrix {
    entities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<Vec<Category>>,
    data: Vec<Vec<u32>>,
}

impl TryFrom<RawDsm> for DesignStructureMatrix {
    type Error = DsmError;

    fn try_from(raw: RawDsm) -> Result<Self, Self::Error> {
        Self::new(raw.entities, raw.categories, raw.data)
    }
}

impl DesignStructureMatrix {
    /// Creates a validated DSM.
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is not square, or if the entity or
    /// category counts do not match its size.
    pub fn new(
        entities: Vec<String>,
        categories: Option<Vec<Category>>,
        data: Vec<Vec<u32>>,
    ) -> Result<Self, DsmError> {
        if data.len() != entities.len() {
            return Err(DsmError::EntityCount {
                rows: data.len(),
                entities: entities.len(),
            });
        }
        check_rows(&data, entities.len())?;
        if let Some(categories) = &categories {
            if categories.len() != entities.len() {
                return Err(DsmError::CategoryCount {
                    categories: categories.len(),
                    entities: entities.len(),
                });
            }
        }
        Ok(Self {
            entities,
            categories,
            data,
        })
    }

    /// Number of entities (rows and columns).
    #[must_use]
    pub fn size(&self) -> usize {
        self.entities.len()
    }

    /// Entity names, in row order.
    #[must_use]
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    /// Name of entity `i`.
    #[must_use]
    pub fn entity(&self, i: usize) -> &str {
        &self.entities[i]
    }

    /// Categories of the entities, if the DSM carries any.
    #[must_use]
    pub fn categories(&self) -> Option<&[Category]> {
        self.categories.as_deref()
    }

    /// Number of dependencies from entity `i` to entity `j`.
    #[must_use]
    pub fn dependency(&self, i: usize, j: usize) -> u32 {
        self.data[i][j]
    }

    /// Raw dependency rows.
    #[must_use]
    pub fn data(&self) -> &[Vec<u32>] {
        &self.data
    }

    /// Category of entity `i`, if the DSM is categorized.
    #[must_use]
    pub fn category(&self, i: usize) -> Option<Category> {
        self.categories.as_ref().map(|c| c[i])
    }

    /// Top-level package of entity `i` (text before the first dot).
    #[must_use]
    pub fn package(&self, i: usize) -> &str {
        let entity = self.entity(i);
        entity.split('.').next().unwrap_or(entity)
    }
}

#[derive(Deserialize)]
struct RawDmm {
    rows: Vec<String>,
    columns: Vec<String>,
    data: Vec<Vec<u32>>,
}

/// Rectangular matrix mapping the entities of one domain onto another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDmm")]
pub struct DomainMappingMatrix {
    rows: Vec<String>,
    columns: Vec<String>,
    data: Vec<Vec<u32>>,
}

impl TryFrom<RawDmm> for DomainMappingMatrix {
    type Error = DsmError;

    fn try_from(raw: RawDmm) -> Result<Self, Self::Error> {
        Self::new(raw.rows, raw.columns, raw.data)
    }
}

impl DomainMappingMatrix {
    /// Creates a validated DMM.
    ///
    /// # Errors
    ///
    /// Returns an error if the data does not have one row per row entity
    /// and one column per column entity.
    pub fn new(
        rows: Vec<String>,
        columns: Vec<String>,
        data: Vec<Vec<u32>>,
    ) -> Result<Self, DsmError> {
        if data.len() != rows.len() {
            return Err(DsmError::EntityCount {
                rows: data.len(),
                entities: rows.len(),
            });
        }
        check_rows(&data, columns.len())?;
        Ok(Self {
            rows,
            columns,
            data,
        })
    }

    /// Row entities.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Column entities.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Value at row `i`, column `j`.
    #[must_use]
    pub fn value(&self, i: usize, j: usize) -> u32 {
        self.data[i][j]
    }
}

#[derive(Deserialize)]
struct RawMdm {
    cells: Vec<Vec<Data>>,
}

/// Grid of matrices spanning several domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMdm")]
pub struct MultipleDomainMatrix {
    cells: Vec<Vec<Data>>,
}

impl TryFrom<RawMdm> for MultipleDomainMatrix {
    type Error = DsmError;

    fn try_from(raw: RawMdm) -> Result<Self, Self::Error> {
        Self::new(raw.cells)
    }
}

impl MultipleDomainMatrix {
    /// Creates a validated MDM.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is not square, if a diagonal cell is not
    /// a DSM, if an off-diagonal cell is not a DMM, or if a DMM's dimensions
    /// disagree with the DSMs of its grid row and column.
    pub fn new(cells: Vec<Vec<Data>>) -> Result<Self, DsmError> {
        let n = cells.len();
        let mut sizes = Vec::with_capacity(n);
        for (i, row) in cells.iter().enumerate() {
            if row.len() != n {
                return Err(DsmError::GridShape {
                    row: i,
                    expected: n,
                    actual: row.len(),
                });
            }
            match &row[i] {
                Data::Dsm(dsm) => sizes.push(dsm.size()),
                _ => {
                    return Err(DsmError::CellKind {
                        row: i,
                        column: i,
                        expected: "DSM",
                    })
                }
            }
        }

        for (i, row) in cells.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                if i == j {
                    continue;
                }
                let Data::Dmm(dmm) = cell else {
                    return Err(DsmError::CellKind {
                        row: i,
                        column: j,
                        expected: "DMM",
                    });
                };
                if dmm.rows().len() != sizes[i] || dmm.columns().len() != sizes[j] {
                    return Err(DsmError::CellSize {
                        row: i,
                        column: j,
                        rows: dmm.rows().len(),
                        columns: dmm.columns().len(),
                        expected_rows: sizes[i],
                        expected_columns: sizes[j],
                    });
                }
            }
        }

        Ok(Self { cells })
    }

    /// Number of domains.
    #[must_use]
    pub fn domains(&self) -> usize {
        self.cells.len()
    }

    /// Cell at grid position `(i, j)`.
    #[must_use]
    pub fn cell(&self, i: usize, j: usize) -> &Data {
        &self.cells[i][j]
    }

    /// The DSM of domain `i`.
    #[must_use]
    pub fn domain(&self, i: usize) -> Option<&DesignStructureMatrix> {
        match &self.cells[i][i] {
            Data::Dsm(dsm) => Some(dsm),
            _ => None,
        }
    }
}

/// Data produced by a provider and consumed by checkers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Data {
    /// A design structure matrix.
    Dsm(DesignStructureMatrix),
    /// A domain mapping matrix.
    Dmm(DomainMappingMatrix),
    /// A multiple domain matrix.
    Mdm(MultipleDomainMatrix),
}

impl Data {
    /// Short name of the data kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Dsm(_) => "DSM",
            Self::Dmm(_) => "DMM",
            Self::Mdm(_) => "MDM",
        }
    }

    /// Returns the DSM, if this is one.
    #[must_use]
    pub fn as_dsm(&self) -> Option<&DesignStructureMatrix> {
        match self {
            Self::Dsm(dsm) => Some(dsm),
            _ => None,
        }
    }

    /// One-line description used in logs and reports.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Dsm(dsm) => format!("DSM of {} entities", dsm.size()),
            Self::Dmm(dmm) => format!("DMM of {}x{}", dmm.rows().len(), dmm.columns().len()),
            Self::Mdm(mdm) => format!("MDM of {} domains", mdm.domains()),
        }
    }
}

impl From<DesignStructureMatrix> for Data {
    fn from(dsm: DesignStructureMatrix) -> Self {
        Self::Dsm(dsm)
    }
}

impl From<DomainMappingMatrix> for Data {
    fn from(dmm: DomainMappingMatrix) -> Self {
        Self::Dmm(dmm)
    }
}

impl From<MultipleDomainMatrix> for Data {
    fn from(mdm: MultipleDomainMatrix) -> Self {
        Self::Mdm(mdm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn small_dsm() -> DesignStructureMatrix {
        DesignStructureMatrix::new(
            names(&["app.a", "app.b"]),
            Some(vec![Category::AppModule, Category::AppModule]),
            vec![vec![0, 1], vec![0, 0]],
        )
        .unwrap()
    }

    #[test]
    fn category_round_trips_through_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!(matches!(
            "library".parse::<Category>(),
            Err(DsmError::UnknownCategory(_))
        ));
    }

    #[test]
    fn dsm_rejects_non_square_data() {
        let err = DesignStructureMatrix::new(names(&["a", "b"]), None, vec![vec![0, 1], vec![0]])
            .unwrap_err();
        assert_eq!(
            err,
            DsmError::RowLength {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn dsm_rejects_entity_mismatch() {
        let err = DesignStructureMatrix::new(names(&["a"]), None, vec![vec![0, 1], vec![0, 0]])
            .unwrap_err();
        assert!(matches!(err, DsmError::EntityCount { rows: 2, entities: 1 }));
    }

    #[test]
    fn dsm_rejects_category_mismatch() {
        let err = DesignStructureMatrix::new(
            names(&["a", "b"]),
            Some(vec![Category::Data]),
            vec![vec![0, 0], vec![0, 0]],
        )
        .unwrap_err();
        assert!(matches!(err, DsmError::CategoryCount { .. }));
    }

    #[test]
    fn package_is_first_segment() {
        let dsm = small_dsm();
        assert_eq!(dsm.package(0), "app");
        assert_eq!(dsm.dependency(0, 1), 1);
    }

    #[test]
    fn category_lookup_needs_categories() {
        assert_eq!(small_dsm().category(1), Some(Category::AppModule));
        let bare = DesignStructureMatrix::new(names(&["a"]), None, vec![vec![0]]).unwrap();
        assert_eq!(bare.category(0), None);
    }

    #[test]
    fn deserialization_validates() {
        let bad = r#"{"type": "dsm", "entities": ["a"], "data": [[0, 1]]}"#;
        assert!(serde_json::from_str::<Data>(bad).is_err());

        let good = r#"{"type": "dsm", "entities": ["a"], "categories": ["broker"], "data": [[3]]}"#;
        let data: Data = serde_json::from_str(good).unwrap();
        let dsm = data.as_dsm().unwrap();
        assert_eq!(dsm.categories(), Some(&[Category::Broker][..]));
        assert_eq!(dsm.dependency(0, 0), 3);
    }

    #[test]
    fn mdm_requires_dsm_on_diagonal() {
        let dmm = DomainMappingMatrix::new(names(&["x"]), names(&["y"]), vec![vec![1]]).unwrap();
        let err = MultipleDomainMatrix::new(vec![vec![dmm.into()]]).unwrap_err();
        assert!(matches!(err, DsmError::CellKind { expected: "DSM", .. }));
    }

    #[test]
    fn mdm_checks_mapping_dimensions() {
        let left = small_dsm();
        let right = DesignStructureMatrix::new(names(&["db"]), None, vec![vec![0]]).unwrap();
        let good = DomainMappingMatrix::new(
            names(&["app.a", "app.b"]),
            names(&["db"]),
            vec![vec![1], vec![0]],
        )
        .unwrap();
        let back =
            DomainMappingMatrix::new(names(&["db"]), names(&["app.a", "app.b"]), vec![vec![0, 0]])
                .unwrap();

        let mdm = MultipleDomainMatrix::new(vec![
            vec![left.clone().into(), good.clone().into()],
            vec![back.into(), right.clone().into()],
        ])
        .unwrap();
        assert_eq!(mdm.domains(), 2);
        assert_eq!(mdm.domain(1).map(DesignStructureMatrix::size), Some(1));

        let err = MultipleDomainMatrix::new(vec![
            vec![left.into(), good.clone().into()],
            vec![good.into(), right.into()],
        ])
        .unwrap_err();
        assert!(matches!(err, DsmError::CellSize { row: 1, column: 0, .. }));
    }

    #[test]
    fn summary_describes_kind() {
        let data = Data::from(small_dsm());
        assert_eq!(data.kind(), "DSM");
        assert_eq!(data.summary(), "DSM of 2 entities");
    }
}
