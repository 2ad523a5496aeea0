use anyhow::Result;
use chrono::Utc;

use chatboard_types::Message;

use crate::MessageStore;

impl MessageStore {
    // -- Reads --

    pub fn len(&self) -> Result<usize> {
        self.with_board(|board| board.messages.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Every message, oldest first.
    pub fn all(&self) -> Result<Vec<Message>> {
        self.with_board(|board| board.messages.clone())
    }

    /// Up to `limit` most recent messages, newest first.
    pub fn latest(&self, limit: usize) -> Result<Vec<Message>> {
        self.with_board(|board| {
            let start = board.messages.len().saturating_sub(limit);
            board.messages[start..].iter().rev().cloned().collect()
        })
    }

    /// Messages whose text contains `needle`, ignoring case, oldest first.
    pub fn search(&self, needle: &str) -> Result<Vec<Message>> {
        self.with_board(|board| {
            board
                .messages
                .iter()
                .filter(|m| m.text_contains(needle))
                .cloned()
                .collect()
        })
    }

    pub fn get(&self, id: &str) -> Result<Option<Message>> {
        self.with_board(|board| board.messages.iter().find(|m| m.id == id).cloned())
    }

    pub fn contains(&self, id: &str) -> Result<bool> {
        self.with_board(|board| board.position(id).is_some())
    }

    // -- Writes --

    /// Append a new message stamped with the current UTC time.
    pub fn insert(&self, from: &str, text: &str) -> Result<Message> {
        let scheme = self.id_scheme();
        self.with_board_mut(|board| {
            let message = Message {
                id: board.allocate_id(scheme),
                from: from.to_string(),
                text: text.to_string(),
                time_sent: Some(Utc::now()),
            };
            board.messages.push(message.clone());
            message
        })
    }

    /// Replace author and body of the first message with `id`, leaving its id
    /// and timestamp alone. Returns `None` if no such message exists.
    pub fn update(&self, id: &str, from: &str, text: &str) -> Result<Option<Message>> {
        self.with_board_mut(|board| {
            let message = board.messages.iter_mut().find(|m| m.id == id)?;
            message.from = from.to_string();
            message.text = text.to_string();
            Some(message.clone())
        })
    }

    /// Remove the first message with `id`. Returns false if none matched.
    pub fn remove(&self, id: &str) -> Result<bool> {
        self.with_board_mut(|board| match board.position(id) {
            Some(index) => {
                board.messages.remove(index);
                true
            }
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{IdScheme, MessageStore, SEED_FROM, SEED_TEXT};

    fn ids(messages: &[chatboard_types::Message]) -> Vec<&str> {
        messages.iter().map(|m| m.id.as_str()).collect()
    }

    fn store_with(count: usize) -> MessageStore {
        let store = MessageStore::new(IdScheme::Counter);
        for i in 0..count {
            store.insert("Test", &format!("Message {}", i)).unwrap();
        }
        store
    }

    #[test]
    fn seeded_store_holds_welcome_message() {
        let store = MessageStore::seeded(IdScheme::Counter);
        assert_eq!(store.len().unwrap(), 1);

        let seed = store.get("0").unwrap().unwrap();
        assert_eq!(seed.from, SEED_FROM);
        assert_eq!(seed.text, SEED_TEXT);
        assert!(seed.time_sent.is_none());
    }

    #[test]
    fn insert_appends_with_timestamp() {
        let store = MessageStore::seeded(IdScheme::Counter);
        let msg = store.insert("Tom", "Hi").unwrap();

        assert_eq!(msg.id, "1");
        assert_eq!(msg.from, "Tom");
        assert_eq!(msg.text, "Hi");
        assert!(msg.time_sent.is_some());
        assert_eq!(store.len().unwrap(), 2);
        assert_eq!(ids(&store.all().unwrap()), vec!["0", "1"]);
    }

    #[test]
    fn latest_returns_everything_reversed_when_short() {
        let store = store_with(3);
        assert_eq!(ids(&store.latest(10).unwrap()), vec!["2", "1", "0"]);
    }

    #[test]
    fn latest_caps_at_limit_newest_first() {
        let store = store_with(15);
        let latest = store.latest(10).unwrap();
        assert_eq!(latest.len(), 10);
        assert_eq!(latest.first().unwrap().id, "14");
        assert_eq!(latest.last().unwrap().id, "5");
    }

    #[test]
    fn latest_on_empty_store_is_empty() {
        let store = MessageStore::new(IdScheme::Counter);
        assert!(store.is_empty().unwrap());
        assert!(store.latest(10).unwrap().is_empty());
    }

    #[test]
    fn search_is_case_insensitive_and_ordered() {
        let store = MessageStore::seeded(IdScheme::Counter);
        store.insert("Lisa", "hello everyone").unwrap();
        store.insert("Homer", "nothing to see").unwrap();
        store.insert("Marge", "HELLO again").unwrap();

        assert_eq!(ids(&store.search("Hello").unwrap()), vec!["1", "3"]);
        assert_eq!(ids(&store.search("welcome").unwrap()), vec!["0"]);
        assert!(store.search("absent").unwrap().is_empty());
    }

    #[test]
    fn update_keeps_id_and_timestamp() {
        let store = MessageStore::seeded(IdScheme::Counter);
        let original = store.insert("Tom", "Hi").unwrap();

        let updated = store.update(&original.id, "Marge", "Updated").unwrap().unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.time_sent, original.time_sent);
        assert_eq!(updated.from, "Marge");
        assert_eq!(updated.text, "Updated");
        assert_eq!(store.get(&original.id).unwrap().unwrap(), updated);
    }

    #[test]
    fn update_missing_id_changes_nothing() {
        let store = MessageStore::seeded(IdScheme::Counter);
        assert!(store.update("42", "x", "y").unwrap().is_none());
        assert_eq!(store.get("0").unwrap().unwrap().from, SEED_FROM);
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let store = store_with(4);
        assert!(store.remove("1").unwrap());
        assert_eq!(ids(&store.all().unwrap()), vec!["0", "2", "3"]);
        assert!(store.get("1").unwrap().is_none());
        assert!(!store.remove("1").unwrap());
        assert_eq!(store.len().unwrap(), 3);
    }

    #[test]
    fn counter_ids_are_not_reused_after_delete() {
        let store = MessageStore::seeded(IdScheme::Counter);
        store.insert("a", "one").unwrap();
        store.insert("b", "two").unwrap();
        store.remove("1").unwrap();

        let next = store.insert("c", "three").unwrap();
        assert_eq!(next.id, "3");
    }

    #[test]
    fn length_ids_collide_after_delete() {
        let store = MessageStore::seeded(IdScheme::Length);
        store.insert("a", "one").unwrap();
        store.insert("b", "two").unwrap();
        store.remove("1").unwrap();

        let next = store.insert("c", "three").unwrap();
        assert_eq!(next.id, "2");
        assert_eq!(ids(&store.all().unwrap()), vec!["0", "2", "2"]);
    }

    #[test]
    fn counter_starts_past_preloaded_ids() {
        let preloaded = store_with(3).all().unwrap();
        let store = MessageStore::from_messages(vec![preloaded[2].clone()], IdScheme::Counter);
        assert_eq!(store.insert("x", "y").unwrap().id, "3");
    }

    #[test]
    fn poisoned_lock_is_reported_not_panicked() {
        let store = Arc::new(MessageStore::seeded(IdScheme::Counter));
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.board.lock().unwrap();
            panic!("poison the board");
        })
        .join();

        assert!(store.len().is_err());
        assert!(store.insert("Tom", "Hi").is_err());
    }
}
