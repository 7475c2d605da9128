use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    NotAvailable,
}

impl Availability {
    pub fn from_flag(available: bool) -> Self {
        if available {
            Availability::Available
        } else {
            Availability::NotAvailable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::NotAvailable => "Not available",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A catalog entry. `isbn` is the lookup key for availability updates but is
/// not required to be unique across the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub category: String,
    pub available: bool,
}

impl Book {
    pub fn new(isbn: String, title: String, author: String, category: String) -> Self {
        Self {
            isbn,
            title,
            author,
            category,
            available: true,
        }
    }

    pub fn availability(&self) -> Availability {
        Availability::from_flag(self.available)
    }

    /// Case-insensitive substring match against the title.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str) -> Book {
        Book::new(
            "111".to_string(),
            title.to_string(),
            "J. Smith".to_string(),
            String::new(),
        )
    }

    #[test]
    fn test_new_book_is_available() {
        let b = book("Go Basics");
        assert!(b.available);
        assert_eq!(b.availability(), Availability::Available);
    }

    #[test]
    fn test_title_contains_ignores_case() {
        assert!(book("Go in Action").title_contains("go"));
        assert!(book("gopher tales").title_contains("go"));
        assert!(book("The GOLDEN Compass").title_contains("golden"));
        assert!(!book("Rust in Action").title_contains("go"));
        assert!(book("gopher tales").title_contains("GOPHER"));
        assert!(book("Go in Action").title_contains("In Act"));
    }

    #[test]
    fn test_availability_display() {
        assert_eq!(Availability::from_flag(true).to_string(), "Available");
        assert_eq!(Availability::from_flag(false).to_string(), "Not available");
    }
}
