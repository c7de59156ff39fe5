use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::ledger::DEFAULT_CAPACITY;
use crate::time::Day;

#[derive(Parser, Debug)]
pub struct Args {
    /// Where the users, session and bookings are kept.
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    /// The most active bookings allowed on a single day.
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Keep everything in memory. Nothing outlives the command,
    /// so this is only useful for trying things out.
    #[arg(short, long)]
    memory: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account.
    Register {
        name: String,
        email: String,
        password: String,
    },
    /// Log in, replacing any current session.
    Login { email: String, password: String },
    /// End the current session.
    Logout,
    /// Show who is logged in.
    Whoami,
    /// Book a service on a day (YYYY-MM-DD).
    Book {
        service: String,
        date: Day,
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// List your bookings, newest first.
    List,
    /// Move one of your bookings to another day.
    Reschedule { id: String, date: Day },
    /// Cancel one of your bookings.
    Cancel { id: String },
    /// Show how full a day is.
    Capacity { date: Day },
}

impl Args {
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn memory(&self) -> bool {
        self.memory
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}
