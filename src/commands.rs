//! Built-in command catalogue
//!
//! Shared by the local suggestion matcher and the simulated shell, so the
//! dropdown never offers a command the simulator does not know about.

/// A command the simulated shell understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: &'static str,
    pub help: &'static str,
}

const fn cmd(name: &'static str, help: &'static str) -> CommandInfo {
    CommandInfo { name, help }
}

/// Catalogue order is the suggestion order
pub const COMMANDS: &[CommandInfo] = &[
    cmd("ls", "List directory contents"),
    cmd("cd", "Change directory (cd .. to go up)"),
    cmd("pwd", "Print working directory"),
    cmd("mkdir", "Create a new directory"),
    cmd("rm", "Remove a file"),
    cmd("rmdir", "Remove an empty directory"),
    cmd("touch", "Create or update a file"),
    cmd("cat", "Display file contents"),
    cmd("echo", "Print text to terminal"),
    cmd("clear", "Clear the terminal screen"),
    cmd("mv", "Move or rename files"),
    cmd("cp", "Copy files"),
    cmd("head", "Show first 10 lines of a file"),
    cmd("tail", "Show last 10 lines of a file"),
    cmd("grep", "Search for text in files"),
    cmd("find", "Find files by name"),
    cmd("whoami", "Show current user"),
    cmd("date", "Show current date and time"),
    cmd("ps", "Show running processes"),
    cmd("kill", "Terminate a process by PID"),
    cmd("help", "Show this help message"),
];

/// Look up a command by name (exact, lowercase)
pub fn find(name: &str) -> Option<&'static CommandInfo> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// All command names in catalogue order
pub fn names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}
