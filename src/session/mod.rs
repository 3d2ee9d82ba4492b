// Interactive estimate sheet: input form, accumulated estimates, last error.
// The evaluation pipeline never touches this state; the front end owns it.

pub mod command;
pub mod list;

pub use command::{Command, Reply};
pub use list::{Entry, EstimateList};

use crate::config::Defaults;
use crate::estimate;

/// Current values of the input fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub label: String,
    pub unit: String,
    pub rate: String,
    defaults: Defaults,
}

impl Form {
    pub fn new(defaults: Defaults) -> Self {
        Self {
            label: String::new(),
            unit: defaults.unit.clone(),
            rate: defaults.rate.clone(),
            defaults,
        }
    }

    /// Clear the label and restore the configured unit and rate
    pub fn reset(&mut self) {
        self.label.clear();
        self.unit = self.defaults.unit.clone();
        self.rate = self.defaults.rate.clone();
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub form: Form,
    pub estimates: EstimateList,
    pub last_error: Option<String>,
}

impl Session {
    pub fn new(defaults: Defaults) -> Self {
        Self {
            form: Form::new(defaults),
            estimates: EstimateList::new(),
            last_error: None,
        }
    }

    /// Parse and apply one line of user input
    pub fn handle_line(&mut self, line: &str) -> Reply {
        match Command::parse(line) {
            Ok(command) => self.handle(command),
            Err(message) => Reply::Error(message),
        }
    }

    pub fn handle(&mut self, command: Command) -> Reply {
        match command {
            Command::Add(expression) => self.add(&expression),
            Command::Label(label) => {
                self.form.label = label;
                Reply::Nothing
            }
            Command::Unit(unit) => match estimate::TargetUnit::parse(&unit) {
                Ok(_) => {
                    self.form.unit = unit;
                    Reply::Nothing
                }
                Err(e) => Reply::Error(e.to_string()),
            },
            Command::Rate(rate) => match estimate::Rate::parse(&rate) {
                Ok(_) => {
                    self.form.rate = rate;
                    Reply::Nothing
                }
                Err(e) => Reply::Error(e.to_string()),
            },
            Command::Delete(position) => {
                // Positions are shown to the user starting at 1
                match position
                    .checked_sub(1)
                    .and_then(|index| self.estimates.remove(index))
                {
                    Some(entry) => Reply::Message(format!("Removed: {}", entry.label)),
                    None => Reply::Error(format!(
                        "No estimate #{} ({} in list)",
                        position,
                        self.estimates.len()
                    )),
                }
            }
            Command::Reset => {
                self.form.reset();
                self.last_error = None;
                Reply::Message("Fields reset".to_string())
            }
            Command::Clear => {
                self.estimates.clear();
                Reply::Message("Estimates cleared".to_string())
            }
            Command::List => Reply::Message(if self.estimates.is_empty() {
                "Estimates will appear here as you add them.".to_string()
            } else {
                self.estimates.to_string()
            }),
            Command::Summary => Reply::Message(self.estimates.summary()),
            Command::Help => Reply::Message(self::command::HELP.to_string()),
            Command::Quit => Reply::Quit,
        }
    }

    fn add(&mut self, expression: &str) -> Reply {
        match estimate::evaluate(expression, &self.form.unit, &self.form.rate) {
            Ok(result) => {
                self.last_error = None;
                let entry = self.estimates.add(Some(self.form.label.as_str()), result);
                Reply::Message(format!("{} = {}", entry.label, entry.estimate.result_display))
            }
            Err(e) => {
                let message = e.to_string();
                log::debug!("rejected {:?}: {}", expression, message);
                self.last_error = Some(message.clone());
                Reply::Error(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Defaults::default())
    }

    #[test]
    fn test_add_uses_form_fields() {
        let mut s = session();
        s.handle_line(":label Storage");
        let reply = s.handle_line("30 billion * 500 bytes");
        assert_eq!(reply, Reply::Message("Storage = 15 TB".to_string()));
        assert_eq!(s.estimates.len(), 1);

        s.handle_line(":rate /day");
        s.handle_line(":label");
        s.handle_line("500 million / month");
        let entry = s.estimates.iter().nth(1).unwrap();
        assert_eq!(entry.label, "500 million / month");
        assert_eq!(entry.estimate.result_display, "~17 million/day");
    }

    #[test]
    fn test_error_is_kept_not_fatal() {
        let mut s = session();
        let reply = s.handle_line("10 /");
        assert!(matches!(reply, Reply::Error(_)));
        assert!(s.last_error.is_some());
        assert!(s.estimates.is_empty());

        s.handle_line("1 + 1");
        assert!(s.last_error.is_none());
        assert_eq!(s.estimates.len(), 1);
    }

    #[test]
    fn test_invalid_unit_rejected() {
        let mut s = session();
        let reply = s.handle_line(":unit XB");
        assert_eq!(reply, Reply::Error("Unknown target unit: XB".to_string()));
        assert_eq!(s.form.unit, "auto");
    }

    #[test]
    fn test_delete_and_reset() {
        let mut s = session();
        s.handle_line("1 + 1");
        s.handle_line("2 + 2");
        assert!(matches!(s.handle_line(":del 3"), Reply::Error(_)));
        assert!(matches!(s.handle_line(":del 0"), Reply::Error(_)));
        assert_eq!(
            s.handle_line(":del 1"),
            Reply::Message("Removed: 1 + 1".to_string())
        );
        assert_eq!(s.estimates.len(), 1);

        s.handle_line(":unit GB");
        s.handle_line(":label x");
        s.handle_line(":reset");
        assert_eq!(s.form.unit, "auto");
        assert_eq!(s.form.label, "");
        // Reset leaves the estimates alone
        assert_eq!(s.estimates.len(), 1);

        s.handle_line(":clear");
        assert!(s.estimates.is_empty());
    }
}
