pub mod attempt_service;
pub mod report_service;
pub mod scoring_service;
pub mod test_type_service;
pub mod user_service;
