pub mod question;
pub mod test_attempt;
pub mod test_type;
pub mod user;
