/// Shareable question URL builder
use uuid::Uuid;

/// Deterministic link to a question on the frontend:
/// `{base}/{insta_id}/{question_id}`.
pub fn share_url(base_url: &str, insta_id: &str, question_id: Uuid) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        insta_id,
        question_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_frontend_link() {
        let question_id = Uuid::new_v4();
        assert_eq!(
            share_url("http://localhost:3000", "alice", question_id),
            format!("http://localhost:3000/alice/{question_id}")
        );
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let question_id = Uuid::new_v4();
        assert_eq!(
            share_url("http://localhost:3000/", "alice", question_id),
            format!("http://localhost:3000/alice/{question_id}")
        );
    }
}
