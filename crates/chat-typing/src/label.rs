//! Typing indicator label
//!
//! Turns the set of typing users into the line shown under the message box.

use chat_core::UserId;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Name shown for users missing from the lookup
pub const UNKNOWN_NAME: &str = "Someone";

/// Lookup from user id to display name
pub trait DisplayNames {
    /// Get the display name for a user, if known
    fn display_name(&self, user_id: &UserId) -> Option<Cow<'_, str>>;
}

impl<S: BuildHasher> DisplayNames for HashMap<UserId, String, S> {
    fn display_name(&self, user_id: &UserId) -> Option<Cow<'_, str>> {
        self.get(user_id).map(|name| Cow::Borrowed(name.as_str()))
    }
}

impl DisplayNames for BTreeMap<UserId, String> {
    fn display_name(&self, user_id: &UserId) -> Option<Cow<'_, str>> {
        self.get(user_id).map(|name| Cow::Borrowed(name.as_str()))
    }
}

impl<F> DisplayNames for F
where
    F: Fn(&UserId) -> Option<String>,
{
    fn display_name(&self, user_id: &UserId) -> Option<Cow<'_, str>> {
        self(user_id).map(Cow::Owned)
    }
}

/// Compose the typing indicator label
///
/// - no users: empty string
/// - one user: `"<name> is typing..."`
/// - two users: `"<name1> and <name2> are typing..."`
/// - three or more: `"<count> people are typing..."`
///
/// Blank or missing names are shown as `"Someone"`.
pub fn compose_typing_label<N>(users: &[UserId], names: &N) -> String
where
    N: DisplayNames + ?Sized,
{
    match users {
        [] => String::new(),
        [only] => format!("{} is typing...", name_of(names, only)),
        [first, second] => format!(
            "{} and {} are typing...",
            name_of(names, first),
            name_of(names, second)
        ),
        _ => format!("{} people are typing...", users.len()),
    }
}

fn name_of<'a, N>(names: &'a N, user_id: &UserId) -> Cow<'a, str>
where
    N: DisplayNames + ?Sized,
{
    names
        .display_name(user_id)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(Cow::Borrowed(UNKNOWN_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<UserId> {
        raw.iter().map(|id| UserId::new(*id)).collect()
    }

    fn names(pairs: &[(&str, &str)]) -> HashMap<UserId, String> {
        pairs
            .iter()
            .map(|(id, name)| (UserId::new(*id), (*name).to_string()))
            .collect()
    }

    #[test]
    fn test_no_users() {
        assert_eq!(compose_typing_label(&[], &names(&[("A", "Alice")])), "");
    }

    #[test]
    fn test_single_unknown_user() {
        assert_eq!(
            compose_typing_label(&ids(&["A"]), &HashMap::<UserId, String>::new()),
            "Someone is typing..."
        );
    }

    #[test]
    fn test_single_known_user() {
        assert_eq!(
            compose_typing_label(&ids(&["A"]), &names(&[("A", "Alice")])),
            "Alice is typing..."
        );
    }

    #[test]
    fn test_two_users() {
        assert_eq!(
            compose_typing_label(&ids(&["A", "B"]), &names(&[("A", "Alice"), ("B", "Bob")])),
            "Alice and Bob are typing..."
        );
    }

    #[test]
    fn test_two_users_one_missing() {
        assert_eq!(
            compose_typing_label(&ids(&["A", "B"]), &names(&[("B", "Bob")])),
            "Someone and Bob are typing..."
        );
    }

    #[test]
    fn test_many_users_not_capped() {
        let lookup = names(&[("A", "Alice"), ("B", "Bob"), ("C", "Carol")]);
        assert_eq!(
            compose_typing_label(&ids(&["A", "B", "C"]), &lookup),
            "3 people are typing..."
        );

        let crowd: Vec<UserId> = (0..12).map(|i| UserId::new(format!("u{i}"))).collect();
        assert_eq!(compose_typing_label(&crowd, &lookup), "12 people are typing...");
    }

    #[test]
    fn test_blank_name_treated_as_missing() {
        assert_eq!(
            compose_typing_label(&ids(&["A"]), &names(&[("A", "  ")])),
            "Someone is typing..."
        );
    }

    #[test]
    fn test_closure_and_btree_lookups() {
        let lookup = |id: &UserId| (id.as_str() == "A").then(|| "Ann".to_string());
        assert_eq!(compose_typing_label(&ids(&["A"]), &lookup), "Ann is typing...");

        let tree: BTreeMap<UserId, String> = names(&[("B", "Bea")]).into_iter().collect();
        assert_eq!(compose_typing_label(&ids(&["B"]), &tree), "Bea is typing...");
    }
}
