pub mod poller;

pub use poller::{PollSubscription, PollingWorker};
