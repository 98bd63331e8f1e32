pub mod linux_do;

pub use linux_do::{register, CategoryOutcome, LinuxDoSource};
