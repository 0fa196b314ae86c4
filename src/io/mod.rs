//! Input/Output: xlsx import and CSV export

mod csv;
mod xlsx;

pub use self::csv::write_matrix_csv;
pub use xlsx::{read_sheet, Cell, Sheet};
