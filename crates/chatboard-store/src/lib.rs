pub mod models;
pub mod queries;

use anyhow::Result;
use std::sync::Mutex;
use tracing::info;

use chatboard_types::Message;

pub use models::{IdScheme, UnknownIdScheme};

pub const SEED_FROM: &str = "Bart";
pub const SEED_TEXT: &str = "Welcome to CYF chat system!";

/// In-memory, insertion-ordered message board.
///
/// One mutex guards both the messages and the id counter, so every operation
/// sees a consistent snapshot. Construct one per process and share it behind
/// an `Arc`.
pub struct MessageStore {
    board: Mutex<Board>,
    id_scheme: IdScheme,
}

struct Board {
    messages: Vec<Message>,
    /// Next id under [`IdScheme::Counter`]. Never decreases.
    next_id: u64,
}

impl MessageStore {
    /// An empty store.
    pub fn new(id_scheme: IdScheme) -> Self {
        Self::from_messages(Vec::new(), id_scheme)
    }

    /// A store holding only the welcome message (id `"0"`, no timestamp).
    pub fn seeded(id_scheme: IdScheme) -> Self {
        let store = Self::from_messages(vec![seed_message()], id_scheme);
        info!("Message store seeded ({} id scheme)", id_scheme);
        store
    }

    /// A store preloaded with `messages`, kept in the given order.
    pub fn from_messages(messages: Vec<Message>, id_scheme: IdScheme) -> Self {
        // Start the counter past every numeric id already present.
        let next_id = messages
            .iter()
            .filter_map(|m| m.id.parse::<u64>().ok())
            .map(|id| id + 1)
            .chain(std::iter::once(messages.len() as u64))
            .max()
            .unwrap_or(0);

        Self {
            board: Mutex::new(Board { messages, next_id }),
            id_scheme,
        }
    }

    pub fn id_scheme(&self) -> IdScheme {
        self.id_scheme
    }

    fn with_board<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Board) -> T,
    {
        let board = self
            .board
            .lock()
            .map_err(|e| anyhow::anyhow!("Message store lock poisoned: {}", e))?;
        Ok(f(&*board))
    }

    fn with_board_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Board) -> T,
    {
        let mut board = self
            .board
            .lock()
            .map_err(|e| anyhow::anyhow!("Message store lock poisoned: {}", e))?;
        Ok(f(&mut *board))
    }
}

impl Board {
    fn allocate_id(&mut self, scheme: IdScheme) -> String {
        match scheme {
            IdScheme::Counter => {
                let id = self.next_id;
                self.next_id += 1;
                id.to_string()
            }
            IdScheme::Length => self.messages.len().to_string(),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.messages.iter().position(|m| m.id == id)
    }
}

fn seed_message() -> Message {
    Message {
        id: "0".to_string(),
        from: SEED_FROM.to_string(),
        text: SEED_TEXT.to_string(),
        time_sent: None,
    }
}
