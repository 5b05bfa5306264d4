pub mod event;
pub mod match_record;
