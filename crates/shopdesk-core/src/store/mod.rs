mod data_store;
mod slice;

pub use data_store::DataStore;
pub use slice::{ListTicket, Placement, ResourceSlice, SliceState, ValueSlot, ValueState};
