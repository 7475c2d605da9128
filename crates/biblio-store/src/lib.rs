use biblio_types::{Book, User, UserId};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
}

impl StoreError {
    fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        debug!("Rejected: {}", message);
        StoreError::Validation(message)
    }
}

/// In-memory catalog of users and books. Records are kept in insertion order
/// and only ever handed out by shared reference; the sole mutation of a
/// stored record is [`RecordStore::set_book_availability`].
#[derive(Debug, Default)]
pub struct RecordStore {
    users: Vec<User>,
    books: Vec<Book>,
    next_user_id: UserId,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_user(&mut self, name: &str, email: &str) -> Result<&User, StoreError> {
        self.create_user_at(name, email, Utc::now())
    }

    pub fn create_user_at(
        &mut self,
        name: &str,
        email: &str,
        registered_at: DateTime<Utc>,
    ) -> Result<&User, StoreError> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() || email.is_empty() {
            return Err(StoreError::validation("A name and a valid email are required"));
        }
        if !email.contains('@') {
            return Err(StoreError::validation("The email address is not valid"));
        }

        let id = self.next_user_id;
        self.users.push(User::new(id, name.to_string(), email.to_string(), registered_at));
        self.next_user_id = id.next();

        info!("Registered user {} ({})", id, name);
        Ok(&self.users[self.users.len() - 1])
    }

    pub fn list_users(&self) -> &[User] {
        &self.users
    }

    pub fn create_book(
        &mut self,
        isbn: &str,
        title: &str,
        author: &str,
        category: &str,
    ) -> Result<&Book, StoreError> {
        let isbn = isbn.trim();
        let title = title.trim();
        let author = author.trim();
        let category = category.trim();

        if isbn.is_empty() || title.is_empty() || author.is_empty() {
            return Err(StoreError::validation("ISBN, title and author are required"));
        }

        self.books.push(Book::new(
            isbn.to_string(),
            title.to_string(),
            author.to_string(),
            category.to_string(),
        ));

        info!("Added book {} '{}'", isbn, title);
        Ok(&self.books[self.books.len() - 1])
    }

    pub fn list_books(&self) -> &[Book] {
        &self.books
    }

    pub fn search_books_by_title(&self, query: &str) -> Result<Vec<&Book>, StoreError> {
        let needle = query.trim();
        if needle.is_empty() {
            return Err(StoreError::validation("Enter a word or phrase to search for"));
        }

        let matches: Vec<&Book> = self
            .books
            .iter()
            .filter(|book| book.title_contains(needle))
            .collect();
        debug!("Title search '{}' matched {} book(s)", needle, matches.len());
        Ok(matches)
    }

    /// Updates the first book whose ISBN equals `isbn` exactly. Later books
    /// sharing the same ISBN are left untouched.
    pub fn set_book_availability(
        &mut self,
        isbn: &str,
        available: bool,
    ) -> Result<&Book, StoreError> {
        let isbn = isbn.trim();
        if isbn.is_empty() {
            return Err(StoreError::validation("A valid ISBN is required"));
        }

        let Some(book) = self.books.iter_mut().find(|book| book.isbn == isbn) else {
            debug!("No book with ISBN {}", isbn);
            return Err(StoreError::NotFound(format!("No book found with ISBN {}", isbn)));
        };

        book.available = available;
        info!("Book {} is now {}", isbn, book.availability());
        Ok(book)
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn next_user_id(&self) -> UserId {
        self.next_user_id
    }
}
