pub mod case;
pub mod file;
pub mod reporter;
pub mod suite;
pub mod types;

pub use case::{CaseRunner, SETUP_FAILURE_CODE, TestContext};
pub use file::FileRunner;
pub use reporter::{ExitSignal, Reporter};
pub use suite::SuiteRunner;
pub use types::{SuiteSummary, TestTally};
