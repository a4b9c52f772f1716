pub mod placeholder_sweeper;
