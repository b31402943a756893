//! Keyboard stand-in for the gesture sensor.
//!
//! A background thread reads whitespace-separated commands from stdin and
//! feeds them into the gesture channel the way a sensor interrupt would.

use std::io::{self, BufRead};
use std::thread;

use airdeck_core::gesture::{Gesture, GestureChannel, SensorFault};
use log::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Swipe(Gesture),
    Fault(SensorFault),
    Quit,
}

/// Map one typed token to a command.
pub fn parse_command(token: &str) -> Option<Command> {
    let command = match token.to_ascii_lowercase().as_str() {
        "w" | "k" | "up" => Command::Swipe(Gesture::Up),
        "s" | "j" | "down" => Command::Swipe(Gesture::Down),
        "a" | "h" | "left" => Command::Swipe(Gesture::Left),
        "d" | "l" | "right" => Command::Swipe(Gesture::Right),
        "!" | "fault" => Command::Fault(SensorFault::Bus),
        "q" | "quit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Start the stdin reader. End of input exits the process cleanly.
pub fn spawn(gestures: &'static GestureChannel) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("gesture-input".into())
        .spawn(move || {
            read_commands(gestures);
            info!(" Input closed, shutting down");
            std::process::exit(0);
        })
}

fn read_commands(gestures: &GestureChannel) {
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!(" Failed to read input: {}", err);
                return;
            }
        };

        for token in line.split_whitespace() {
            match parse_command(token) {
                Some(Command::Swipe(gesture)) => {
                    if !gestures.offer(gesture) {
                        debug!(" Swipe {:?} ignored, panel busy", gesture);
                    }
                }
                Some(Command::Fault(fault)) => {
                    warn!(" Injecting sensor fault: {}", fault);
                    gestures.fail(fault);
                }
                Some(Command::Quit) => return,
                None => warn!(" Unknown input '{}' (use w/a/s/d, ! or q)", token),
            }
        }
    }
}
