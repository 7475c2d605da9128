use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;

use biblio_types::*;

pub fn format_user_created(user: &User) -> String {
    format!("User '{}' registered with ID: {}.", user.name, user.id)
}

pub fn format_user_list(users: &[User], date_format: &str) -> String {
    if users.is_empty() {
        return "No users registered in the system.".to_string();
    }

    let mut lines = vec!["--- REGISTERED USERS ---".to_string()];
    for user in users {
        let registered = format_timestamp(&user.registered_at.with_timezone(&Local), date_format);
        lines.push(format!(
            "ID: {} | Name: {} | Email: {} | Registered: {}",
            user.id, user.name, user.email, registered
        ));
    }
    lines.join("\n")
}

pub fn format_book_created(book: &Book) -> String {
    format!("Book '{}' added to the catalog.", book.title)
}

pub fn format_book_list(books: &[Book]) -> String {
    if books.is_empty() {
        return "No books registered in the system.".to_string();
    }

    let mut lines = vec!["--- BOOK CATALOG ---".to_string()];
    lines.extend(books.iter().map(|book| {
        format!(
            "{} | Status: {}",
            format_book_line(book),
            book.availability()
        )
    }));
    lines.join("\n")
}

pub fn format_search_result(books: &[&Book]) -> String {
    if books.is_empty() {
        return "No books found with that title.".to_string();
    }

    books
        .iter()
        .map(|book| format_book_line(book))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_availability_updated(book: &Book) -> String {
    format!(
        "The book with ISBN {} is now marked as {}.",
        book.isbn,
        book.availability().as_str().to_lowercase()
    )
}

fn format_book_line(book: &Book) -> String {
    format!(
        "ISBN: {} | Title: {} | Author: {} | Category: {}",
        book.isbn, book.title, book.author, book.category
    )
}

/// Renders `at` with a strftime pattern. Patterns chrono cannot parse fall
/// back to [`DEFAULT_DATE_FORMAT`] instead of panicking at display time.
pub fn format_timestamp<Tz>(at: &DateTime<Tz>, date_format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let valid = !StrftimeItems::new(date_format).any(|item| matches!(item, Item::Error));
    let pattern = if valid {
        date_format
    } else {
        DEFAULT_DATE_FORMAT
    };
    at.format(pattern).to_string()
}

pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: u64, name: &str) -> User {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        User::new(UserId(id), name.to_string(), format!("{}@x.com", name.to_lowercase()), at)
    }

    fn book(isbn: &str, title: &str, available: bool) -> Book {
        let mut book = Book::new(
            isbn.to_string(),
            title.to_string(),
            "J. Smith".to_string(),
            "Tech".to_string(),
        );
        book.available = available;
        book
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(
            format_user_list(&[], DEFAULT_DATE_FORMAT),
            "No users registered in the system."
        );
        assert_eq!(format_book_list(&[]), "No books registered in the system.");
        assert_eq!(format_search_result(&[]), "No books found with that title.");
    }

    #[test]
    fn test_user_list_keeps_order() {
        let output = format_user_list(&[user(0, "Ana"), user(1, "Leo")], DEFAULT_DATE_FORMAT);
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "--- REGISTERED USERS ---");
        assert!(lines[1].starts_with("ID: 0 | Name: Ana | Email: ana@x.com | Registered: "));
        assert!(lines[2].starts_with("ID: 1 | Name: Leo | Email: leo@x.com | Registered: "));
    }

    #[test]
    fn test_book_list_shows_status() {
        let output = format_book_list(&[book("111", "Go Basics", false)]);
        assert_eq!(
            output,
            "--- BOOK CATALOG ---\n\
             ISBN: 111 | Title: Go Basics | Author: J. Smith | Category: Tech | Status: Not available"
        );
    }

    #[test]
    fn test_search_result_omits_status() {
        let a = book("1", "Go in Action", true);
        let b = book("2", "gopher tales", false);
        let output = format_search_result(&[&a, &b]);
        assert_eq!(output.lines().count(), 2);
        assert!(!output.contains("Status"));
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            format_user_created(&user(3, "Ana")),
            "User 'Ana' registered with ID: 3."
        );
        assert_eq!(
            format_book_created(&book("1", "Go Basics", true)),
            "Book 'Go Basics' added to the catalog."
        );
        assert_eq!(
            format_availability_updated(&book("111", "Go Basics", false)),
            "The book with ISBN 111 is now marked as not available."
        );
    }

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(&at, DEFAULT_DATE_FORMAT), "01-03-2024 09:30");
        assert_eq!(format_timestamp(&at, "%Y/%m/%d"), "2024/03/01");
        assert_eq!(format_timestamp(&at, "%Q"), "01-03-2024 09:30");
    }
}
