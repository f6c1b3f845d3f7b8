pub mod debounce;
pub mod selection;

pub use debounce::{LeaveDebouncer, LeaveTicket};
pub use selection::SelectionState;
