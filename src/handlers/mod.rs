pub mod comments;
pub mod questions;
pub mod users;

pub use comments::{create_voice_comment, get_question_comments};
pub use questions::{create_question, get_question_url, get_user_questions};
pub use users::{create_user, get_user};
