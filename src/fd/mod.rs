/*!
 * File Descriptor Module
 */

mod table;

pub use table::FdTable;
