/*!
 * I/O Module
 * Console and shutdown collaborator interfaces
 */

mod console;
mod power;

pub use console::{Console, StdConsole};
pub use power::{Power, SoftPower};
