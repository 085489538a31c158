/*!
 * OS Simulator - Main Entry Point
 * Thin interactive shell over the simulation kernel: reads command lines
 * from stdin and prints new activity-log entries. No engine logic lives here.
 */

use os_sim_kernel::Kernel;
use std::io::{self, BufRead, Write};
use time::macros::format_description;

fn main() -> io::Result<()> {
    env_logger::init();

    let mut kernel = Kernel::new();
    let mut last_seq = print_new_entries(&kernel, 0);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("os> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") {
            println!("Session ended");
            break;
        }

        kernel.execute_command(input);
        last_seq = print_new_entries(&kernel, last_seq);
    }

    Ok(())
}

/// Print log entries appended since `last_seq`; returns the newest seq seen
fn print_new_entries(kernel: &Kernel, last_seq: u64) -> u64 {
    let clock = format_description!("[hour]:[minute]:[second]");
    let mut newest = last_seq;
    for entry in kernel.log_entries() {
        if entry.seq > last_seq {
            let stamp = entry
                .timestamp
                .format(&clock)
                .unwrap_or_else(|_| String::new());
            println!("[{stamp}] [{}] {}", entry.level, entry.message);
            newest = entry.seq;
        }
    }
    newest
}
