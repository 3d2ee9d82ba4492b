pub const HELP: &str = "\
Type an expression to add it, e.g. `30 billion * 500 bytes` or `500 million / month`.
  :label TEXT   label for the next estimate (empty to use the expression)
  :unit UNIT    auto, none, bytes, KB, MB, GB, TB, PB
  :rate RATE    none, /s, /min, /hour, /day, /month, /year
  :del N        remove estimate N
  :reset        reset label, unit and rate
  :clear        remove all estimates
  :list         show estimates
  :summary      show estimates as plain lines
  :quit         exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Label(String),
    Unit(String),
    Rate(String),
    /// 1-based position as listed
    Delete(usize),
    Reset,
    Clear,
    List,
    Summary,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Nothing,
    Message(String),
    Error(String),
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            if line.is_empty() {
                return Err("Enter an expression or :help".to_string());
            }
            return Ok(Command::Add(line.to_string()));
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "label" => Ok(Command::Label(arg.to_string())),
            "unit" => required(name, arg).map(|a| Command::Unit(a.to_string())),
            "rate" => required(name, arg).map(|a| Command::Rate(a.to_string())),
            "del" | "delete" => {
                let arg = required(name, arg)?;
                arg.parse::<usize>()
                    .map(Command::Delete)
                    .map_err(|_| format!("Invalid index: {}", arg))
            }
            "reset" => Ok(Command::Reset),
            "clear" => Ok(Command::Clear),
            "list" | "ls" => Ok(Command::List),
            "summary" => Ok(Command::Summary),
            "help" | "h" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command: :{}", other)),
        }
    }
}

fn required<'a>(name: &str, arg: &'a str) -> Result<&'a str, String> {
    if arg.is_empty() {
        Err(format!(":{} needs an argument", name))
    } else {
        Ok(arg)
    }
}
