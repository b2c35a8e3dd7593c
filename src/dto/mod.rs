pub mod auth_dto;
pub mod report_dto;
pub mod test_dto;
