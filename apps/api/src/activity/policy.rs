//! Who may view the activity log.

use crate::models::user::User;

/// Role check for restricted views. Carried in `AppState` as `Arc<dyn AccessPolicy>`.
pub trait AccessPolicy: Send + Sync {
    fn can_view_activity(&self, viewer: &User) -> bool;
}

/// Grants access to a configured list of admin email addresses.
pub struct AllowListPolicy {
    emails: Vec<String>,
}

impl AllowListPolicy {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            emails: emails
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }
}

impl AccessPolicy for AllowListPolicy {
    fn can_view_activity(&self, viewer: &User) -> bool {
        let email = viewer.email.to_lowercase();
        self.emails.iter().any(|e| *e == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::test_user;

    #[test]
    fn test_listed_admin_is_allowed() {
        let policy = AllowListPolicy::new(["Admin@Example.com"]);
        assert!(policy.can_view_activity(&test_user("admin@example.com")));
    }

    #[test]
    fn test_other_users_denied() {
        let policy = AllowListPolicy::new(["admin@example.com"]);
        assert!(!policy.can_view_activity(&test_user("someone@example.com")));
    }

    #[test]
    fn test_empty_list_denies_everyone() {
        let policy = AllowListPolicy::new(Vec::<String>::new());
        assert!(!policy.can_view_activity(&test_user("admin@example.com")));
    }
}
