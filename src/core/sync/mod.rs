/*!
 * Synchronization Primitives
 */

mod once_signal;

pub use once_signal::OnceSignal;
