use std::io;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

fn opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/C", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

/// Open `url` with the platform's default handler, without waiting for it.
pub fn open_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("Nothing to open".to_string());
    }

    let (program, args) = opener();
    let mut command = Command::new(program);
    command.args(args).arg(url);
    spawn_reaped(command)
        .map(|_| ())
        .map_err(|e| format!("Failed to open {}: {}", url, e))
}

/// Spawn `command` detached from the terminal and reap it on a background thread.
fn spawn_reaped(mut command: Command) -> io::Result<JoinHandle<()>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(thread::spawn(move || {
        let _ = child.wait();
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_is_rejected() {
        assert!(open_url("").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn spawned_process_is_waited_for() {
        let handle = spawn_reaped(Command::new("true")).unwrap();
        // The reaper thread only finishes once the child has been waited on
        handle.join().unwrap();
    }

    #[test]
    fn missing_program_is_an_error() {
        assert!(spawn_reaped(Command::new("grainview-no-such-opener")).is_err());
    }
}
