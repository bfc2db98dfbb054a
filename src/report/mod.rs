mod core;


pub use self::core::{Mode, Report, write_terse, write_verbose};
