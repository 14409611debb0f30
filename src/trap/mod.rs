/*!
 * Trap Module
 * Frame layout and argument extraction at the syscall boundary
 */

mod args;
mod frame;

pub use args::{read_arguments, MAX_ARGS};
pub use frame::TrapFrame;
