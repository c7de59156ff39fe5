use std::process::ExitCode;

use clap::Parser;
use log::{error, trace};

mod args;
use args::{Args, Command};

mod auth;
mod backend;
use backend::{FileBackend, MemBackend, Store};

mod bookcorner;
use bookcorner::{BookCorner, Error, Result};

mod booking;
mod directory;
mod id;
mod ledger;
mod session;
mod time;
mod user;

fn main() -> ExitCode {
    pretty_env_logger::init();

    let args = Args::parse();
    trace!("{args:?}");

    let result = if args.memory() {
        run(MemBackend::default(), &args)
    } else {
        match FileBackend::new(args.data_dir()) {
            Ok(backend) => run(backend, &args),
            Err(e) => {
                error!("couldn't open data dir {:?}: {e:?}", args.data_dir());
                Err(Error::Internal)
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run<S: Store>(store: S, args: &Args) -> Result<()> {
    let corner = BookCorner::new(store, args.capacity())?;

    match args.command() {
        Command::Register {
            name,
            email,
            password,
        } => {
            corner.register(name, email, password)?;
            println!("Registration successful. Please log in.");
        }
        Command::Login { email, password } => {
            let authed = corner.login(email, password)?;
            println!("Welcome, {}!", authed.session().name);
        }
        Command::Logout => {
            // logging out twice is harmless
            match corner.resume() {
                Ok(authed) => authed.logout()?,
                Err(Error::NotLoggedIn) => {}
                Err(e) => return Err(e),
            }
            println!("Logged out.");
        }
        Command::Whoami => {
            let authed = corner.resume()?;
            let session = authed.session();
            println!("{} <{}>", session.name, session.email);
        }
        Command::Book {
            service,
            date,
            note,
        } => {
            let id = corner.resume()?.book(service, *date, note)?;
            println!("Appointment booked! ({id})");
            println!("{date}: {}", corner.availability(*date));
        }
        Command::List => {
            let bookings = corner.resume()?.bookings();
            if bookings.is_empty() {
                println!("No appointments yet.");
            }
            for booking in bookings {
                println!("{booking}");
            }
        }
        Command::Reschedule { id, date } => {
            corner.resume()?.reschedule(id, *date)?;
            println!("Appointment updated.");
        }
        Command::Cancel { id } => {
            corner.resume()?.cancel(id)?;
            println!("Appointment canceled.");
        }
        Command::Capacity { date } => {
            let availability = corner.availability(*date);
            if availability.is_full() {
                println!("{date}: {availability} (full)");
            } else {
                println!("{date}: {availability}");
            }
        }
    }

    Ok(())
}
