pub mod answer;
pub mod question;

pub use question::{BankQuestion, CandidateQuestion};
