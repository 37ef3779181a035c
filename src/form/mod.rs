pub mod submission;
pub mod export;

pub use submission::{commit_housekeeper_number, snapshot_from_form, validate_submission};
pub use export::{export_instruction_to_csv, worklog_filename, worklog_json};
