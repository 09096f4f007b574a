mod availability;
mod persisted;
mod store;

pub use availability::count_available;
pub use persisted::{
    read_persisted_state, write_persisted_state, PersistedState, PersistedStateError, StorageKeys,
};
pub use store::ReadingListStore;
