pub mod add;
pub mod agenda;
pub mod amend;
pub mod delete;
pub mod done;
pub mod edit;
pub mod list;
pub mod preview;
pub mod skip;
