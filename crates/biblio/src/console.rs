use std::io::{BufRead, Write};

use biblio_output::*;
use biblio_store::RecordStore;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Invalid option, please try again.")]
    InvalidSelection(String),
    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Main,
    Users,
    Books,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenUsers,
    OpenBooks,
    Exit,
    RegisterUser,
    ListUsers,
    RegisterBook,
    ListBooks,
    SearchBooks,
    SetAvailability,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Stay,
    Goto(Menu),
    Exit,
}

impl Menu {
    fn title(self) -> &'static str {
        match self {
            Menu::Main => "===== MAIN MENU =====",
            Menu::Users => "--- USER MENU ---",
            Menu::Books => "--- BOOK MENU ---",
        }
    }

    /// Options in display order; selection `n` picks the `n`th entry.
    fn options(self) -> &'static [(&'static str, Action)] {
        match self {
            Menu::Main => &[
                ("User management", Action::OpenUsers),
                ("Book management", Action::OpenBooks),
                ("Exit", Action::Exit),
            ],
            Menu::Users => &[
                ("Register new user", Action::RegisterUser),
                ("List users", Action::ListUsers),
                ("Back to main menu", Action::Back),
            ],
            Menu::Books => &[
                ("Register new book", Action::RegisterBook),
                ("Show book catalog", Action::ListBooks),
                ("Search books by title", Action::SearchBooks),
                ("Change book availability", Action::SetAvailability),
                ("Back to main menu", Action::Back),
            ],
        }
    }

    pub fn parse_selection(self, input: &str) -> Result<Action, ConsoleError> {
        let invalid = || ConsoleError::InvalidSelection(input.to_string());
        let digits = input.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index: usize = digits.parse().map_err(|_| invalid())?;
        index
            .checked_sub(1)
            .and_then(|i| self.options().get(i))
            .map(|(_, action)| *action)
            .ok_or_else(invalid)
    }
}

#[derive(Debug, Clone)]
pub struct DisplayOptions {
    pub date_format: String,
    pub json: bool,
}

impl DisplayOptions {
    fn render<T, F>(&self, value: &T, text: F) -> Result<String, ConsoleError>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        if self.json {
            Ok(format_json(value)?)
        } else {
            Ok(text(value))
        }
    }
}

/// Menu-driven front end over a [`RecordStore`]. Reads one line per prompt
/// from `input`; end of input ends the session.
pub struct ConsoleDriver<'a, R, W> {
    store: &'a mut RecordStore,
    input: R,
    output: W,
    display: DisplayOptions,
}

impl<'a, R: BufRead, W: Write> ConsoleDriver<'a, R, W> {
    pub fn new(store: &'a mut RecordStore, input: R, output: W, display: DisplayOptions) -> Self {
        Self {
            store,
            input,
            output,
            display,
        }
    }

    pub fn run(&mut self) -> Result<(), ConsoleError> {
        let mut menu = Menu::Main;
        info!("Console session started");

        loop {
            self.render_menu(menu)?;
            let Some(selection) = self.prompt("Select an option: ")? else {
                debug!("End of input in {:?} menu", menu);
                break;
            };

            let action = match menu.parse_selection(&selection) {
                Ok(action) => action,
                Err(err) => {
                    if let ConsoleError::InvalidSelection(raw) = &err {
                        debug!("Invalid selection {:?} in {:?} menu", raw, menu);
                    }
                    self.say(&err.to_string())?;
                    continue;
                }
            };

            match self.dispatch(action)? {
                Transition::Stay => {}
                Transition::Goto(next) => menu = next,
                Transition::Exit => break,
            }
        }

        self.say("\nExiting the system...")?;
        info!("Console session ended");
        Ok(())
    }

    fn dispatch(&mut self, action: Action) -> Result<Transition, ConsoleError> {
        match action {
            Action::OpenUsers => Ok(Transition::Goto(Menu::Users)),
            Action::OpenBooks => Ok(Transition::Goto(Menu::Books)),
            Action::Back => Ok(Transition::Goto(Menu::Main)),
            Action::Exit => Ok(Transition::Exit),
            Action::RegisterUser => self.register_user(),
            Action::ListUsers => self.list_users(),
            Action::RegisterBook => self.register_book(),
            Action::ListBooks => self.list_books(),
            Action::SearchBooks => self.search_books(),
            Action::SetAvailability => self.set_availability(),
        }
    }

    fn register_user(&mut self) -> Result<Transition, ConsoleError> {
        let Some(name) = self.prompt("Enter the user's name: ")? else {
            return Ok(Transition::Exit);
        };
        let Some(email) = self.prompt("Enter the user's email: ")? else {
            return Ok(Transition::Exit);
        };

        let text = match self.store.create_user(&name, &email) {
            Ok(user) => self.display.render(user, format_user_created)?,
            Err(err) => err.to_string(),
        };
        self.say(&format!("\n{}", text))?;
        Ok(Transition::Stay)
    }

    fn list_users(&mut self) -> Result<Transition, ConsoleError> {
        let users = self.store.list_users();
        let date_format = &self.display.date_format;
        let text = self
            .display
            .render(users, |users| format_user_list(users, date_format))?;
        self.say(&format!("\n{}", text))?;
        Ok(Transition::Stay)
    }

    fn register_book(&mut self) -> Result<Transition, ConsoleError> {
        let mut fields = Vec::with_capacity(4);
        for label in [
            "Enter the book's ISBN: ",
            "Enter the book's title: ",
            "Enter the book's author: ",
            "Enter the book's category: ",
        ] {
            match self.prompt(label)? {
                Some(value) => fields.push(value),
                None => return Ok(Transition::Exit),
            }
        }

        let text = match self
            .store
            .create_book(&fields[0], &fields[1], &fields[2], &fields[3])
        {
            Ok(book) => self.display.render(book, format_book_created)?,
            Err(err) => err.to_string(),
        };
        self.say(&format!("\n{}", text))?;
        Ok(Transition::Stay)
    }

    fn list_books(&mut self) -> Result<Transition, ConsoleError> {
        let text = self.display.render(self.store.list_books(), format_book_list)?;
        self.say(&format!("\n{}", text))?;
        Ok(Transition::Stay)
    }

    fn search_books(&mut self) -> Result<Transition, ConsoleError> {
        let Some(query) = self.prompt("Enter a title or keyword: ")? else {
            return Ok(Transition::Exit);
        };

        let text = match self.store.search_books_by_title(&query) {
            Ok(books) => self
                .display
                .render(&books, |books| format_search_result(books))?,
            Err(err) => err.to_string(),
        };
        self.say(&format!("\n{}", text))?;
        Ok(Transition::Stay)
    }

    fn set_availability(&mut self) -> Result<Transition, ConsoleError> {
        let Some(isbn) = self.prompt("Enter the book's ISBN: ")? else {
            return Ok(Transition::Exit);
        };
        let Some(answer) = self.prompt("Mark as available? (y/n): ")? else {
            return Ok(Transition::Exit);
        };

        let text = match self.store.set_book_availability(&isbn, is_yes(&answer)) {
            Ok(book) => self.display.render(book, format_availability_updated)?,
            Err(err) => err.to_string(),
        };
        self.say(&format!("\n{}", text))?;
        Ok(Transition::Stay)
    }

    fn render_menu(&mut self, menu: Menu) -> Result<(), ConsoleError> {
        writeln!(self.output, "\n{}", menu.title())?;
        for (i, (label, _)) in menu.options().iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, label)?;
        }
        Ok(())
    }

    /// Returns `None` once input is exhausted.
    fn prompt(&mut self, message: &str) -> Result<Option<String>, ConsoleError> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: &str) -> Result<(), ConsoleError> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
