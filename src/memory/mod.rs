/*!
 * Memory Module
 * Simulated user address space and the trap-boundary validator
 */

mod paged;
mod validator;

pub use paged::{
    AddressSpace, PagedMemory, PAGE_SIZE, USER_DATA_BASE, USER_DATA_SIZE, USER_STACK_SIZE,
};
pub use validator::UserMemory;
