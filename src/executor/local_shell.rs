//! Client-side shell simulator
//!
//! Nothing touches the real filesystem. Directory changes only move the
//! prompt around a fake home of `/Users/developer`.

use chrono::Local;

use super::{CommandExecutor, ExecError, ExecOutput};
use crate::commands::{self, COMMANDS};

const HOME: &str = "~";
const HOME_PATH: &str = "/Users/developer";
const USER: &str = "developer";

const LS_LISTING: &str = "Documents    Downloads    Desktop\n\
                          Pictures     Music       Videos\n\
                          Projects     web_development";

const PS_TABLE: &str = "PID    COMMAND\n\
                        1234   terminal\n\
                        5678   browser\n\
                        9012   code_editor";

#[derive(Debug, Clone)]
pub struct LocalShell {
    cwd: String,
}

impl Default for LocalShell {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalShell {
    pub fn new() -> Self {
        Self {
            cwd: HOME.to_string(),
        }
    }

    fn pwd(&self) -> String {
        match self.cwd.strip_prefix("~/") {
            Some(rest) => format!("{}/{}", HOME_PATH, rest),
            None => HOME_PATH.to_string(),
        }
    }

    fn cd(&mut self, target: Option<&str>) -> String {
        match target {
            None => {
                self.cwd = HOME.to_string();
                "Changed directory to home".to_string()
            }
            // The fake tree is one level deep
            Some("..") => {
                self.cwd = HOME.to_string();
                "Changed directory to parent".to_string()
            }
            Some(target) if target.contains("web") => {
                self.cwd = "~/web_development".to_string();
                "Changed directory to web_development".to_string()
            }
            Some(target) => {
                self.cwd = format!("~/{}", target);
                format!("Changed directory to {}", target)
            }
        }
    }

    fn help() -> String {
        let width = COMMANDS
            .iter()
            .map(|info| info.name.len())
            .max()
            .unwrap_or(0);
        let mut text = String::from("Available commands:");
        for info in COMMANDS {
            text.push_str(&format!("\n  {:<width$}  {}", info.name, info.help));
        }
        text
    }
}

impl CommandExecutor for LocalShell {
    fn execute(&mut self, line: &str) -> Result<ExecOutput, ExecError> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(ExecOutput::Text(String::new()));
        };
        let command = word.to_lowercase();
        let args: Vec<&str> = words.collect();

        let text = match command.as_str() {
            "clear" => return Ok(ExecOutput::Clear),
            "help" => Self::help(),
            "ls" => LS_LISTING.to_string(),
            "pwd" => self.pwd(),
            "cd" => self.cd(args.first().copied()),
            "whoami" => USER.to_string(),
            "date" => Local::now().format("%a %b %d %Y %H:%M:%S").to_string(),
            "echo" => args.join(" "),
            "mkdir" => match args.first() {
                Some(name) => format!("Directory '{}' created", name),
                None => return Err(ExecError::Usage("mkdir <directory>".to_string())),
            },
            "touch" => match args.first() {
                Some(name) => format!("File '{}' created", name),
                None => return Err(ExecError::Usage("touch <filename>".to_string())),
            },
            "ps" => PS_TABLE.to_string(),
            other if commands::find(other).is_some() => {
                format!("{}: command simulated successfully", other)
            }
            _ => return Err(ExecError::NotFound(word.to_string())),
        };

        Ok(ExecOutput::Text(text))
    }

    fn cwd(&self) -> &str {
        &self.cwd
    }
}

#[cfg(test)]
#[path = "local_shell_tests.rs"]
mod local_shell_tests;
