use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};

use hashbrown::HashMap;

use crate::schema::error::Error;
use crate::schema::types::AttributeSet;

/// A tableau cell.
///
/// `Distinguished` cells stand for the one value shared by every row that
/// knows its column exactly (`a_j`). `Symbolic` cells are free variables
/// local to a row (`b_ij`) until the chase equates them with something else.
#[cfg_attr(feature = "serde", derive(::serde::Serialize, ::serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cell {
    Distinguished { column: usize },
    Symbolic { row: usize, column: usize },
}

impl Cell {
    #[must_use]
    pub const fn is_distinguished(&self) -> bool {
        matches!(self, Self::Distinguished { .. })
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Distinguished { column } => write!(f, "a{column}"),
            Self::Symbolic { row, column } => write!(f, "b{row}_{column}"),
        }
    }
}

/// Chase tableau: one row per decomposition part, one column per attribute.
///
/// Columns follow the attribute order of the universe and rows follow the
/// order the parts were supplied in. Parts taken from a
/// [`Decomposition`](crate::Decomposition), as in
/// [`Schema::check_lossless_join`](crate::Schema::check_lossless_join), are
/// therefore in sorted order with duplicates already collapsed.
#[cfg_attr(feature = "serde", derive(::serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tableau<A: Ord> {
    parts: Vec<AttributeSet<A>>,
    attributes: Vec<A>,
    cells: Vec<Vec<Cell>>,
}

impl<A> Tableau<A>
where
    A: Ord + Clone,
{
    /// Build the initial tableau: row `i` holds `a_j` where part `i` contains
    /// attribute `j` and `b_ij` everywhere else.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSubset`] for the first part that is not
    /// contained in `attributes`.
    pub fn new<'a, I>(parts: I, attributes: &AttributeSet<A>) -> Result<Self, Error<A>>
    where
        I: IntoIterator<Item = &'a AttributeSet<A>>,
        A: 'a,
    {
        let parts: Vec<AttributeSet<A>> = parts.into_iter().cloned().collect();
        if let Some(part) = parts.iter().find(|part| !part.is_subset(attributes)) {
            return Err(Error::InvalidSubset {
                subset: part.clone(),
                universe: attributes.clone(),
            });
        }
        Ok(Self::from_parts(parts, attributes))
    }

    pub(crate) fn from_parts(parts: Vec<AttributeSet<A>>, attributes: &AttributeSet<A>) -> Self {
        let attributes: Vec<A> = attributes.iter().cloned().collect();
        let cells = parts
            .iter()
            .enumerate()
            .map(|(row, part)| {
                attributes
                    .iter()
                    .enumerate()
                    .map(|(column, attribute)| {
                        if part.contains(attribute) {
                            Cell::Distinguished { column }
                        } else {
                            Cell::Symbolic { row, column }
                        }
                    })
                    .collect()
            })
            .collect();
        Self {
            parts,
            attributes,
            cells,
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.attributes.len()
    }

    /// The part each row was built from.
    #[must_use]
    pub fn parts(&self) -> &[AttributeSet<A>] {
        &self.parts
    }

    /// The attribute of each column.
    #[must_use]
    pub fn attributes(&self) -> &[A] {
        &self.attributes
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row]
    }

    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    /// Column index of `attribute`, if it belongs to the universe.
    #[must_use]
    pub fn column(&self, attribute: &A) -> Option<usize> {
        self.attributes.binary_search(attribute).ok()
    }

    /// Whether every attribute of `attributes` has a column.
    #[must_use]
    pub fn covers(&self, attributes: &AttributeSet<A>) -> bool {
        attributes.iter().all(|attribute| self.column(attribute).is_some())
    }

    /// The attributes of the columns, as a set.
    #[must_use]
    pub fn universe(&self) -> AttributeSet<A> {
        self.attributes.iter().cloned().collect()
    }

    /// Column indices of `attributes`, or `None` if one has no column.
    fn columns_of(&self, attributes: &AttributeSet<A>) -> Option<Vec<usize>> {
        attributes
            .iter()
            .map(|attribute| self.column(attribute))
            .collect()
    }

    /// Groups of two or more rows that currently hold identical cells in
    /// every column of `determinant`.
    ///
    /// Rows within a group are ascending and groups are ordered by their
    /// first row. A determinant naming an attribute without a column has no
    /// agreeing rows.
    #[must_use]
    pub fn agreeing_groups(&self, determinant: &AttributeSet<A>) -> Vec<Vec<usize>> {
        let Some(columns) = self.columns_of(determinant) else {
            return Vec::new();
        };
        let mut groups: HashMap<Vec<Cell>, Vec<usize>> = HashMap::new();
        for (row, cells) in self.cells.iter().enumerate() {
            let projection = columns.iter().map(|&column| cells[column]).collect();
            groups.entry(projection).or_default().push(row);
        }
        let mut groups: Vec<Vec<usize>> = groups
            .into_values()
            .filter(|rows| rows.len() > 1)
            .collect();
        groups.sort_unstable_by_key(|rows| rows[0]);
        groups
    }

    /// Equate the `dependent` columns of `rows`.
    ///
    /// For each column the surviving value is the distinguished cell if any
    /// row of the group has it, otherwise the cell of the lowest row. Every
    /// other value found in the group is replaced by the survivor wherever it
    /// occurs in that column, so equal symbols stay equal across the whole
    /// tableau. Returns `true` if any cell changed. Nothing changes if
    /// `dependent` names an attribute without a column.
    pub fn equate(&mut self, dependent: &AttributeSet<A>, rows: &[usize]) -> bool {
        let Some(&first) = rows.first() else {
            return false;
        };
        let Some(columns) = self.columns_of(dependent) else {
            return false;
        };
        let mut changed = false;
        for column in columns {
            let survivor = rows
                .iter()
                .map(|&row| self.cells[row][column])
                .find(Cell::is_distinguished)
                .unwrap_or(self.cells[first][column]);
            for &row in rows {
                let replaced = self.cells[row][column];
                if replaced != survivor {
                    self.rename(column, replaced, survivor);
                    changed = true;
                }
            }
        }
        changed
    }

    fn rename(&mut self, column: usize, from: Cell, to: Cell) {
        for cells in &mut self.cells {
            if cells[column] == from {
                cells[column] = to;
            }
        }
    }

    /// The first row made only of distinguished cells, if any.
    #[must_use]
    pub fn distinguished_row(&self) -> Option<usize> {
        self.cells
            .iter()
            .position(|cells| cells.iter().all(Cell::is_distinguished))
    }
}

/// Renders the row and column legends followed by the cell grid.
impl<A> Display for Tableau<A>
where
    A: Ord + Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows:")?;
        for (row, part) in self.parts.iter().enumerate() {
            writeln!(f, "  {row}: {part}")?;
        }
        writeln!(f, "Columns:")?;
        for (column, attribute) in self.attributes.iter().enumerate() {
            writeln!(f, "  {attribute}: {column}")?;
        }

        let rendered: Vec<Vec<String>> = self
            .cells
            .iter()
            .map(|cells| cells.iter().map(ToString::to_string).collect())
            .collect();
        let width = rendered
            .iter()
            .flatten()
            .map(String::len)
            .max()
            .unwrap_or(0);
        writeln!(f, "Tableau:")?;
        for cells in &rendered {
            write!(f, " ")?;
            for cell in cells {
                write!(f, " {cell:<width$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn tableau(parts: &[&[&'static str]]) -> Tableau<&'static str> {
        let parts: Vec<AttributeSet<_>> = parts
            .iter()
            .map(|part| part.iter().copied().collect())
            .collect();
        Tableau::new(&parts, &AttributeSet::from(["A", "B", "C"])).unwrap()
    }

    #[test]
    fn test_initial_tableau() {
        let tableau = tableau(&[&["A", "B"], &["B", "C"]]);
        assert_eq!((tableau.rows(), tableau.columns()), (2, 3));
        assert_eq!(
            tableau.row(0),
            &[
                Cell::Distinguished { column: 0 },
                Cell::Distinguished { column: 1 },
                Cell::Symbolic { row: 0, column: 2 },
            ]
        );
        assert_eq!(tableau.cell(1, 0), Cell::Symbolic { row: 1, column: 0 });
        assert_eq!(tableau.column(&"C"), Some(2));
        assert_eq!(tableau.column(&"Z"), None);
        assert_eq!(tableau.distinguished_row(), None);
    }

    #[test]
    fn test_agreeing_groups() {
        let tableau = tableau(&[&["A", "B"], &["B", "C"], &["A"], &["B"]]);
        assert_eq!(
            tableau.agreeing_groups(&AttributeSet::from(["B"])),
            vec![vec![0, 1, 3]]
        );
        assert_eq!(
            tableau.agreeing_groups(&AttributeSet::from(["A"])),
            vec![vec![0, 2]]
        );
        assert!(tableau
            .agreeing_groups(&AttributeSet::from(["A", "B"]))
            .is_empty());
    }

    #[test]
    fn test_equate_prefers_distinguished() {
        let mut tableau = tableau(&[&["A", "B"], &["B", "C"]]);
        assert!(tableau.equate(&AttributeSet::from(["C"]), &[0, 1]));
        assert_eq!(tableau.cell(0, 2), Cell::Distinguished { column: 2 });
        assert_eq!(tableau.distinguished_row(), Some(0));
        assert!(!tableau.equate(&AttributeSet::from(["C"]), &[0, 1]));
    }

    #[test]
    fn test_equate_symbols_uses_lowest_row_everywhere() {
        let mut tableau = tableau(&[&["A"], &["A"], &["B"]]);
        // Row 2 shares row 1's symbol for C before rows 0 and 1 are equated.
        assert!(tableau.equate(&AttributeSet::from(["C"]), &[1, 2]));
        assert_eq!(tableau.cell(2, 2), Cell::Symbolic { row: 1, column: 2 });

        assert!(tableau.equate(&AttributeSet::from(["C"]), &[0, 1]));
        for row in 0..3 {
            assert_eq!(tableau.cell(row, 2), Cell::Symbolic { row: 0, column: 2 });
        }
    }

    #[test]
    fn test_new_rejects_foreign_part() {
        let parts = [AttributeSet::from(["A", "B"]), AttributeSet::from(["B", "Z"])];
        let result = Tableau::new(&parts, &AttributeSet::from(["A", "B", "C"]));
        assert_eq!(
            result,
            Err(Error::InvalidSubset {
                subset: AttributeSet::from(["B", "Z"]),
                universe: AttributeSet::from(["A", "B", "C"]),
            })
        );
    }

    #[test]
    fn test_unknown_attributes_never_agree_or_change() {
        let mut tableau = tableau(&[&["A", "B"], &["B", "C"]]);
        assert!(!tableau.covers(&AttributeSet::from(["B", "Z"])));
        assert!(tableau.agreeing_groups(&AttributeSet::from(["Z"])).is_empty());
        assert!(!tableau.equate(&AttributeSet::from(["A", "Z"]), &[0, 1]));
        assert_eq!(tableau.distinguished_row(), None);
    }

    #[test]
    fn test_display() {
        let tableau = tableau(&[&["A", "B"], &["C"]]);
        assert_eq!(
            tableau.to_string(),
            "Rows:\n  0: A, B\n  1: C\nColumns:\n  A: 0\n  B: 1\n  C: 2\nTableau:\n  a0   a1   b0_2\n  b1_0 b1_1 a2  \n"
        );
    }
}
